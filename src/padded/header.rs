//! Padding markers.
//!
//! The leading region of a block (header word plus padding) is split into
//! words, and the word at index `i` holds `i` as an unsigned LEB128 varint.
//! The word right before a buffer's visible start therefore always records
//! how many whole padding words are still free in front of it, no matter how
//! many aligned prepends moved the start back. Slow-path blocks keep a zeroed
//! word before the start and read as "no padding".

use crate::util::WORD;

/// Largest word count whose varint encoding fits in a single word.
pub(crate) const MAX_PADDING_WORDS: usize = (1usize << (7 * WORD)) - 1;

/// Writes the marker ladder over `region`, which must be word-aligned in length.
pub(crate) fn write_ladder(region: &mut [u8]) {
    debug_assert_eq!(region.len() % WORD, 0);
    debug_assert!(region.len() / WORD <= MAX_PADDING_WORDS + 1);

    for (index, word) in region.chunks_exact_mut(WORD).enumerate() {
        encode(index, word);
    }
}

/// Decodes the padding word count stored in `word`.
///
/// A word without a terminating byte decodes as 0.
pub(crate) fn read_marker(word: &[u8]) -> usize {
    let mut value = 0usize;
    for (i, &byte) in word.iter().take(WORD).enumerate() {
        value |= ((byte & 0x7f) as usize) << (7 * i);
        if byte & 0x80 == 0 {
            return value;
        }
    }
    0
}

fn encode(mut value: usize, word: &mut [u8]) {
    let mut i = 0;
    while value >= 0x80 {
        word[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    word[i] = value as u8;
    word[i + 1..].fill(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_roundtrip_small() {
        let mut word = [0u8; WORD];
        for value in [0, 1, 63, 127] {
            encode(value, &mut word);
            assert_eq!(word[0], value as u8);
            assert_eq!(read_marker(&word), value);
        }
    }

    #[test]
    fn test_marker_multibyte() {
        let mut word = [0u8; WORD];
        encode(300, &mut word);
        assert_eq!(&word[..2], &[0xac, 0x02]);
        assert_eq!(read_marker(&word), 300);

        encode(MAX_PADDING_WORDS, &mut word);
        assert_eq!(read_marker(&word), MAX_PADDING_WORDS);
    }

    #[test]
    fn test_zero_word_reads_zero() {
        assert_eq!(read_marker(&[0u8; WORD]), 0);
    }

    #[test]
    fn test_unterminated_word_reads_zero() {
        assert_eq!(read_marker(&[0xa5u8; WORD]), 0);
    }

    #[test]
    fn test_ladder() {
        let mut region = vec![0xffu8; 5 * WORD];
        write_ladder(&mut region);

        for (i, word) in region.chunks_exact(WORD).enumerate() {
            assert_eq!(read_marker(word), i);
        }
    }
}
