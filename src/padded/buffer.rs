//! The PaddedBuffer type - a byte buffer with scratch space in front.

use std::fmt;
use std::ops::{Deref, DerefMut};

use bytes::{Bytes, BytesMut};
use tracing::trace;

use super::header::{self, MAX_PADDING_WORDS};
use crate::error::PaddedError;
use crate::util::{WORD, block_size, round_to_word};

/// A byte buffer that can grow cheaply at both ends.
///
/// Besides the usual trailing capacity, a `PaddedBuffer` owns scratch space
/// (padding) in front of its first byte. [`append`](Self::append) fills the
/// trailing capacity and [`prepend`](Self::prepend) fills the padding, both
/// without reallocating while room is left.
///
/// Padding is consumed in whole machine words: a prepend whose length is not
/// a multiple of `size_of::<usize>()` always reallocates. Write framing in
/// word-sized pieces (or pad headers to a word) to stay on the fast path.
///
/// Both growth operations take the buffer by value and return the result,
/// which may live in a different allocation.
///
/// # Example
///
/// ```
/// use padbuf::PaddedBuffer;
///
/// let body = PaddedBuffer::from_slice(b"payload!", 16);
/// assert_eq!(body.remaining_padding(), 16);
///
/// let framed = body.prepend(&8u64.to_be_bytes());
/// assert_eq!(framed.remaining_padding(), 8);
/// assert_eq!(&framed[8..], b"payload!");
/// ```
#[derive(Clone)]
pub struct PaddedBuffer {
    /// Whole backing block: header word, padding, content, capacity.
    block: Box<[u8]>,
    /// Offset of the first visible byte; always at least one word.
    start: usize,
    len: usize,
    /// Capacity counted from `start`; `start + cap <= block.len()`.
    cap: usize,
}

impl PaddedBuffer {
    /// Allocates a buffer of `len` zeroed bytes with room for `cap` bytes
    /// and at least `pad` bytes of padding.
    ///
    /// The padding is rounded up to the next multiple of the word size, so
    /// [`remaining_padding`](Self::remaining_padding) may report a little
    /// more than requested.
    ///
    /// # Panics
    ///
    /// Panics if `len > cap` or the total block size overflows `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use padbuf::PaddedBuffer;
    ///
    /// let buf = PaddedBuffer::new(100, 200, 301);
    /// assert_eq!(buf.len(), 100);
    /// assert_eq!(buf.capacity(), 200);
    /// assert_eq!(buf.remaining_padding() % size_of::<usize>(), 0);
    /// assert!(buf.remaining_padding() >= 301);
    /// ```
    pub fn new(len: usize, cap: usize, pad: usize) -> Self {
        assert!(len <= cap, "length {} exceeds capacity {}", len, cap);
        Self::allocate(len, cap, round_to_word(pad))
    }

    /// Like [`new`](Self::new), but reports `len > cap` as an error.
    pub fn try_new(len: usize, cap: usize, pad: usize) -> Result<Self, PaddedError> {
        if len > cap {
            return Err(PaddedError::LengthExceedsCapacity { len, cap });
        }
        Ok(Self::allocate(len, cap, round_to_word(pad)))
    }

    /// Copies `data` into a new buffer with exact capacity and at least
    /// `pad` bytes of padding.
    pub fn from_slice(data: &[u8], pad: usize) -> Self {
        let mut buf = Self::new(data.len(), data.len(), pad);
        buf.copy_from_slice(data);
        buf
    }

    /// Fresh zeroed block with a marker ladder over `pad` (already rounded).
    fn allocate(len: usize, cap: usize, pad: usize) -> Self {
        let block = vec![0u8; block_size(&[WORD, pad, cap])].into_boxed_slice();
        Self::from_block(block, len, cap, pad)
    }

    /// Lays out a `[len, cap]` view with `pad` bytes of padding over `block`.
    ///
    /// `pad` must be word-aligned and `block` at least `pad + WORD + cap` long.
    /// Bytes outside the marker region are left as they are.
    pub(crate) fn from_block(mut block: Box<[u8]>, len: usize, cap: usize, pad: usize) -> Self {
        debug_assert!(len <= cap);
        debug_assert_eq!(pad % WORD, 0);
        assert!(pad / WORD <= MAX_PADDING_WORDS, "padding too large");

        let start = pad + WORD;
        debug_assert!(start + cap <= block.len());

        header::write_ladder(&mut block[..start]);
        Self {
            block,
            start,
            len,
            cap,
        }
    }

    /// Block holding an empty marker word followed by `parts` back to back.
    fn unpadded(cap: usize, parts: [&[u8]; 2]) -> Self {
        let len = parts[0].len() + parts[1].len();
        debug_assert!(len <= cap);

        let mut block = vec![0u8; block_size(&[WORD, cap])].into_boxed_slice();
        let mut at = WORD;
        for part in parts {
            block[at..at + part.len()].copy_from_slice(part);
            at += part.len();
        }

        Self {
            block,
            start: WORD,
            len,
            cap,
        }
    }

    /// Appends `elems` to the end of the buffer.
    ///
    /// Writes in place when the spare capacity suffices. Otherwise the
    /// content moves to a new block with geometrically grown capacity and
    /// no padding: after a reallocating append,
    /// [`remaining_padding`](Self::remaining_padding) reports 0.
    ///
    /// # Example
    ///
    /// ```
    /// use padbuf::PaddedBuffer;
    ///
    /// let buf = PaddedBuffer::new(0, 4, 8).append(b"abcd");
    /// assert_eq!(buf.remaining_padding(), 8);
    ///
    /// let buf = buf.append(b"e");
    /// assert_eq!(&buf[..], b"abcde");
    /// assert_eq!(buf.remaining_padding(), 0);
    /// ```
    #[must_use = "the returned buffer may live in a new allocation"]
    pub fn append(mut self, elems: &[u8]) -> Self {
        let n = elems.len();
        if n <= self.spare_capacity() {
            let at = self.start + self.len;
            self.block[at..at + n].copy_from_slice(elems);
            self.len += n;
            return self;
        }

        let len = block_size(&[self.len, n]);
        let cap = len.max(self.cap.saturating_mul(2));
        trace!(len, cap, "append exceeds capacity, reallocating");
        Self::unpadded(cap, [self.as_slice(), elems])
    }

    /// Prepends `elems` to the front of the buffer.
    ///
    /// Writes in place, consuming padding, when `elems.len()` is a multiple
    /// of the word size and no larger than the remaining padding. Otherwise
    /// the content moves to a new block without padding; the trailing spare
    /// capacity is carried over.
    ///
    /// # Example
    ///
    /// ```
    /// use padbuf::PaddedBuffer;
    ///
    /// let buf = PaddedBuffer::from_slice(b"body", 16);
    /// let ptr = buf.as_ptr();
    ///
    /// let buf = buf.prepend(&[0xAB; 8]);
    /// assert_eq!(buf.remaining_padding(), 8);
    /// assert_eq!(buf[8..].as_ptr(), ptr);
    ///
    /// // Unaligned prepends always reallocate.
    /// let buf = buf.prepend(b"!");
    /// assert_eq!(buf.remaining_padding(), 0);
    /// assert_eq!(buf.len(), 13);
    /// ```
    #[must_use = "the returned buffer may live in a new allocation"]
    pub fn prepend(mut self, elems: &[u8]) -> Self {
        let n = elems.len();
        if n % WORD == 0 && n <= self.remaining_padding() {
            self.start -= n;
            self.len += n;
            self.cap += n;
            self.block[self.start..self.start + n].copy_from_slice(elems);
            return self;
        }

        let len = block_size(&[self.len, n]);
        let cap = block_size(&[len, self.spare_capacity()]);
        let aligned = n % WORD == 0;
        trace!(len, cap, aligned, "prepend exceeds padding, reallocating");
        Self::unpadded(cap, [elems, self.as_slice()])
    }

    /// Returns the number of padding bytes left in front of the buffer.
    ///
    /// Always a multiple of the word size.
    pub fn remaining_padding(&self) -> usize {
        let Some(marker) = self.start.checked_sub(WORD) else {
            return 0;
        };
        let pad = header::read_marker(&self.block[marker..self.start]) * WORD;
        debug_assert!(pad <= marker, "padding marker out of range");
        pad.min(marker)
    }

    /// Returns the number of visible bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity, counted from the first visible byte.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns how many bytes can be appended without reallocating.
    pub fn spare_capacity(&self) -> usize {
        self.cap - self.len
    }

    /// Returns the visible bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.block[self.start..self.start + self.len]
    }

    /// Returns the visible bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.block[self.start..self.start + self.len]
    }

    /// Shortens the buffer to `len` bytes. Has no effect if `len` is not
    /// smaller than the current length. Padding and capacity are kept.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Removes all bytes. Padding and capacity are kept.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Copies the visible bytes into a `Vec`.
    pub fn into_vec(self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Converts into an immutable [`Bytes`] view over the same allocation.
    pub fn freeze(self) -> Bytes {
        let range = self.start..self.start + self.len;
        Bytes::from(self.block).slice(range)
    }

    /// Gives up the view and returns the whole backing block.
    pub(crate) fn into_block(self) -> Box<[u8]> {
        let origin = self.start - self.remaining_padding() - WORD;
        debug_assert_eq!(origin, 0, "marker ladder does not lead to the block origin");
        self.block
    }
}

impl Default for PaddedBuffer {
    fn default() -> Self {
        Self::allocate(0, 0, 0)
    }
}

impl Deref for PaddedBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for PaddedBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for PaddedBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for PaddedBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl PartialEq for PaddedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PaddedBuffer {}

impl PartialEq<[u8]> for PaddedBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<&[u8]> for PaddedBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_slice() == *other
    }
}

impl From<PaddedBuffer> for Bytes {
    fn from(buf: PaddedBuffer) -> Self {
        buf.freeze()
    }
}

impl From<PaddedBuffer> for BytesMut {
    fn from(buf: PaddedBuffer) -> Self {
        BytesMut::from(buf.as_slice())
    }
}

impl From<PaddedBuffer> for Vec<u8> {
    fn from(buf: PaddedBuffer) -> Self {
        buf.into_vec()
    }
}

impl fmt::Debug for PaddedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddedBuffer")
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("padding", &self.remaining_padding())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_after_new() {
        let buf = PaddedBuffer::new(3, 10, 2 * WORD);
        assert_eq!(buf.start, 3 * WORD);
        assert_eq!(buf.block.len(), 3 * WORD + 10);
        assert_eq!(&buf[..], &[0, 0, 0]);
    }

    #[test]
    fn test_zero_padding() {
        let buf = PaddedBuffer::new(0, 0, 0);
        assert_eq!(buf.remaining_padding(), 0);
        assert_eq!(buf.block.len(), WORD);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_try_new_rejects_len_over_cap() {
        let err = PaddedBuffer::try_new(5, 4, 0).unwrap_err();
        assert_eq!(err, PaddedError::LengthExceedsCapacity { len: 5, cap: 4 });
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn test_new_panics_on_len_over_cap() {
        let _ = PaddedBuffer::new(5, 4, 0);
    }

    #[test]
    fn test_prepend_empty_is_noop() {
        let buf = PaddedBuffer::from_slice(b"abc", 0);
        let ptr = buf.as_ptr();
        let buf = buf.prepend(&[]);
        assert_eq!(buf.as_ptr(), ptr);
        assert_eq!(&buf[..], b"abc");
    }

    #[test]
    fn test_prepend_fills_padding_word_by_word() {
        let mut buf = PaddedBuffer::new(0, 0, 4 * WORD);
        for i in 0..4u8 {
            buf = buf.prepend(&[i; WORD]);
            assert_eq!(buf.remaining_padding(), (3 - i as usize) * WORD);
        }
        assert_eq!(buf.start, WORD);
        assert_eq!(buf.len(), 4 * WORD);
        assert_eq!(buf[0], 3);
        assert_eq!(buf[4 * WORD - 1], 0);
    }

    #[test]
    fn test_slow_prepend_keeps_spare_capacity() {
        let buf = PaddedBuffer::new(2, 10, 0).prepend(b"x");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.spare_capacity(), 8);
        assert_eq!(buf.start, WORD);
    }

    #[test]
    fn test_slow_append_doubles_capacity() {
        let buf = PaddedBuffer::new(4, 4, WORD).append(b"z");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.capacity(), 8);

        let buf = PaddedBuffer::new(0, 0, 0).append(&[1; 20]);
        assert_eq!(buf.capacity(), 20);
    }

    #[test]
    fn test_into_block_after_prepends() {
        let buf = PaddedBuffer::new(1, 1, 3 * WORD).prepend(&[7; WORD]);
        let block = buf.into_block();
        assert_eq!(block.len(), 4 * WORD + 1);
        assert_eq!(header::read_marker(&block[..WORD]), 0);
    }

    #[test]
    fn test_freeze_shares_content() {
        let buf = PaddedBuffer::from_slice(b"hello", WORD).prepend(b"12345678");
        let bytes = buf.freeze();
        assert_eq!(&bytes[..], b"12345678hello");
    }

    #[test]
    fn test_truncate_and_clear_keep_layout() {
        let mut buf = PaddedBuffer::from_slice(b"abcdef", WORD);
        buf.truncate(10);
        assert_eq!(buf.len(), 6);
        buf.truncate(2);
        assert_eq!(&buf[..], b"ab");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 6);
        assert_eq!(buf.remaining_padding(), WORD);
    }

    #[test]
    fn test_debug_output() {
        let buf = PaddedBuffer::new(1, 2, WORD);
        let out = format!("{:?}", buf);
        assert!(out.contains("len: 1"));
        assert!(out.contains(&format!("padding: {}", WORD)));
    }
}
