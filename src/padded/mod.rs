//! Padded byte buffers.
//!
//! - [`PaddedBuffer`] - Byte buffer with word-tracked scratch space in front

mod buffer;
mod header;

pub use buffer::PaddedBuffer;
