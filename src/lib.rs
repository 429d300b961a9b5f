//! padbuf
//!
//! Padded byte buffers with O(1) amortized growth at both ends.
//!
//! A `Vec<u8>` amortizes appends but every prepend shifts the whole content.
//! `padbuf` keeps scratch space in front of the buffer as well, so encoders
//! can write a body first and prepend its framing afterwards without copying
//! the body again. It is designed as a small, composable primitive for:
//!
//! - protocol encoders that learn header fields after the payload
//! - nested framing (length prefixes, envelopes, tunnels)
//! - hot paths that want to reuse allocations across messages
//!
//! The crate intentionally:
//! - does NOT do I/O
//! - does NOT define serialization formats
//! - does NOT keep global state
//!
//! It only does two things: **grow bytes at either end → recycle the block**
//!
//! # Buffers
//!
//! ```
//! use padbuf::PaddedBuffer;
//!
//! let body = PaddedBuffer::new(0, 64, 16).append(b"hello world");
//!
//! // Length prefix, one word wide, written into the padding in place.
//! let len = (body.len() as u64).to_be_bytes();
//! let frame = body.prepend(&len);
//!
//! assert_eq!(frame.len(), 8 + 11);
//! assert_eq!(frame.remaining_padding(), 8);
//! ```
//!
//! # Pooling
//!
//! ```
//! use padbuf::BufferPool;
//!
//! let pool = BufferPool::new();
//!
//! for _ in 0..3 {
//!     let buf = pool.acquire(0, 1024, 64).append(b"payload");
//!     // ... hand `buf` to the transport ...
//!     pool.release(buf);
//! }
//!
//! assert_eq!(pool.stats().misses, 1);
//! assert_eq!(pool.stats().hits, 2);
//! ```

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod padded;
mod pool;

mod util; // internal size arithmetic

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_MAX_BLOCK_SIZE, DEFAULT_MAX_BLOCKS, PoolConfig};
pub use error::PaddedError;
pub use padded::PaddedBuffer;
pub use pool::{BufferPool, POISON_BYTE, PoolStats};

/// Unit of padding accounting: the native machine-word size in bytes.
pub const WORD_SIZE: usize = util::WORD;
