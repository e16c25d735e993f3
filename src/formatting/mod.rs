//! Bit-level formatting primitives.
//!
//! This module bridges per-round sampling records and the byte-oriented
//! interface of the downstream extractor service: flattening outcome
//! records into a single ordered bit sequence, and packing bit sequences
//! into bytes. Both operations are deterministic.

/// Flattens per-round outcome records into one ordered bit sequence.
///
/// Rounds are concatenated in order; bits within a round keep their
/// original order. The aggregate length is preserved.
pub fn flatten_rounds(rounds: &[Vec<u8>]) -> Vec<u8> {
    rounds.iter().flatten().copied().collect()
}

/// Packs an ordered bit sequence into bytes, MSB-first.
///
/// Produces exactly `ceil(bits.len() / 8)` bytes. The final byte is
/// zero-padded in its low-order positions when the bit count is not a
/// multiple of eight. Any nonzero input value counts as a one bit.
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        if bit != 0 {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_order_and_length() {
        let rounds = vec![vec![1, 0, 1], vec![0, 0], vec![1]];
        let bits = flatten_rounds(&rounds);

        assert_eq!(bits, vec![1, 0, 1, 0, 0, 1]);
        assert_eq!(bits.len(), rounds.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_rounds(&[]).is_empty());
        assert!(flatten_rounds(&[vec![], vec![]]).is_empty());
    }

    #[test]
    fn test_pack_length_boundaries() {
        // ceil(n/8) bytes at the byte boundaries
        for (n, expected_bytes) in [(0, 0), (1, 1), (7, 1), (8, 1), (9, 2)] {
            let bits = vec![1u8; n];
            assert_eq!(pack_bits(&bits).len(), expected_bytes, "n = {}", n);
        }
    }

    #[test]
    fn test_pack_msb_first() {
        // 10000000 -> 0x80
        assert_eq!(pack_bits(&[1]), vec![0x80]);
        // 10110000 -> 0xB0
        assert_eq!(pack_bits(&[1, 0, 1, 1]), vec![0xB0]);
        // 11111111 1 -> 0xFF 0x80
        assert_eq!(pack_bits(&[1; 9]), vec![0xFF, 0x80]);
    }

    #[test]
    fn test_pack_all_zeros() {
        assert_eq!(pack_bits(&[0; 16]), vec![0x00, 0x00]);
    }
}
