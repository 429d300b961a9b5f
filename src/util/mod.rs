//! Internal utility functions and helpers.
//!
//! This module contains small size-arithmetic helpers shared by the buffer
//! and the pool. It is an implementation detail and not part of the public API.

/// Native machine-word size in bytes. Padding is tracked in whole words.
pub(crate) const WORD: usize = size_of::<usize>();

/// Rounds `pad` up to the next multiple of [`WORD`]. Zero stays zero.
///
/// Panics on overflow, like `Vec` does for oversized capacities.
pub(crate) fn round_to_word(pad: usize) -> usize {
    match pad.checked_next_multiple_of(WORD) {
        Some(rounded) => rounded,
        None => capacity_overflow(),
    }
}

/// Sums block region sizes, panicking on overflow.
pub(crate) fn block_size(parts: &[usize]) -> usize {
    parts
        .iter()
        .try_fold(0usize, |acc, &part| acc.checked_add(part))
        .unwrap_or_else(|| capacity_overflow())
}

#[cold]
#[track_caller]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_word() {
        assert_eq!(round_to_word(0), 0);
        assert_eq!(round_to_word(1), WORD);
        assert_eq!(round_to_word(WORD), WORD);
        assert_eq!(round_to_word(WORD + 1), 2 * WORD);
        assert_eq!(round_to_word(512), 512);
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(&[]), 0);
        assert_eq!(block_size(&[8, 256, 512]), 776);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_block_size_overflow() {
        block_size(&[usize::MAX, 1]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_round_to_word_overflow() {
        round_to_word(usize::MAX);
    }
}
