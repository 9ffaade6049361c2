//! The sum-to-zero checksum law
//!
//! Every RDB structure variant (rigid disk block, partition block, boot
//! block) declares a word count and a checksum field chosen so that the
//! signed 32-bit sum over the declared span is exactly zero.

use crate::endian::read_i32;

/// Verify the checksum over the first `summed_longs` big-endian 32-bit
/// words of `bytes`.
///
/// A declared word count that would overrun the buffer is itself a
/// validation failure; the span is never read out of bounds. Summation
/// wraps on overflow.
pub fn verify_block_sum(bytes: &[u8], summed_longs: u32) -> bool {
    let words = summed_longs as usize;
    match words.checked_mul(4) {
        Some(span) if span <= bytes.len() => {}
        _ => return false,
    }

    let mut sum: i32 = 0;
    for word in 0..words {
        sum = sum.wrapping_add(read_i32(bytes, word * 4));
    }
    sum == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a buffer of `words` big-endian longs whose sum is zero, by
    /// storing the negated sum in the third word (the chk_sum slot).
    fn sealed_buffer(words: usize) -> Vec<u8> {
        let mut buf = vec![0u8; words * 4];
        for (i, chunk) in buf.chunks_mut(4).enumerate() {
            chunk.copy_from_slice(&(i as u32).to_be_bytes());
        }
        let mut sum: i32 = 0;
        for i in 0..words {
            if i != 2 {
                sum = sum.wrapping_add(read_i32(&buf, i * 4));
            }
        }
        buf[8..12].copy_from_slice(&sum.wrapping_neg().to_be_bytes());
        buf
    }

    #[test]
    fn test_valid_sum() {
        let buf = sealed_buffer(64);
        assert!(verify_block_sum(&buf, 64));
    }

    #[test]
    fn test_single_byte_mutation_detected() {
        // Every byte within the summed span must be load-bearing.
        let reference = sealed_buffer(16);
        for offset in 0..16 * 4 {
            let mut buf = reference.clone();
            buf[offset] ^= 0x01;
            assert!(
                !verify_block_sum(&buf, 16),
                "mutation at byte {} went undetected",
                offset
            );
        }
    }

    #[test]
    fn test_mutation_outside_span_ignored() {
        let mut buf = sealed_buffer(16);
        buf.extend_from_slice(&[0xAB; 8]);
        buf[16 * 4] ^= 0xFF;
        assert!(verify_block_sum(&buf, 16));
    }

    #[test]
    fn test_declared_count_overrunning_buffer_rejected() {
        let buf = sealed_buffer(16);
        assert!(!verify_block_sum(&buf, 17));
        assert!(!verify_block_sum(&buf, u32::MAX));
    }

    #[test]
    fn test_zero_words_sums_to_zero() {
        assert!(verify_block_sum(&[], 0));
    }
}
