//! Payload generation for self-tests.
//!
//! Generated payloads mix shapes that stress different parts of the codec:
//! - All-zero and all-0xFF runs (0xFF packs to the cell that wraps to unit zero)
//! - Descriptor-like text, the typical signature payload
//! - Short repeating patterns
//! - Uniformly random bytes
//!
//! The first payloads walk every length from 0 to 15 so each residue mod 7
//! and both sides of the 7-byte group boundary are always covered.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Lengths every run starts with.
const BOUNDARY_LENGTHS: usize = 16;

/// Alphabet for descriptor-like payloads.
const DESCRIPTOR_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789/;<>[$.";

/// Generate `count` payloads of at most `max_len` bytes.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `count`: number of payloads
/// - `max_len`: upper bound on each payload's length
pub fn generate_payloads(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let len = if i < BOUNDARY_LENGTHS {
                i.min(max_len)
            } else {
                rng.gen_range(0..=max_len)
            };
            generate_payload(&mut rng, len)
        })
        .collect()
}

/// Generate one payload of exactly `len` bytes with a randomly chosen shape.
pub fn generate_payload(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    let shape: u8 = rng.gen_range(0..10);

    match shape {
        // 10% all zero
        0 => vec![0x00; len],

        // 10% all 0xFF
        1 => vec![0xFF; len],

        // 30% descriptor-like text
        2..=4 => (0..len)
            .map(|_| DESCRIPTOR_ALPHABET[rng.gen_range(0..DESCRIPTOR_ALPHABET.len())])
            .collect(),

        // 20% repeating pattern
        5..=6 => {
            let pattern = generate_pattern(rng);
            pattern.iter().copied().cycle().take(len).collect()
        }

        // 30% random bytes
        _ => (0..len).map(|_| rng.gen()).collect(),
    }
}

/// Generate a small repeating pattern.
fn generate_pattern(rng: &mut ChaCha8Rng) -> Vec<u8> {
    let pattern_len = rng.gen_range(1..=13);
    (0..pattern_len).map(|_| rng.gen()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_lengths_first() {
        let payloads = generate_payloads(42, 20, 100);
        assert_eq!(payloads.len(), 20);
        for (i, payload) in payloads.iter().take(BOUNDARY_LENGTHS).enumerate() {
            assert_eq!(payload.len(), i);
        }
    }

    #[test]
    fn test_max_len_respected() {
        let payloads = generate_payloads(7, 200, 50);
        assert!(payloads.iter().all(|p| p.len() <= 50));

        let tiny = generate_payloads(7, 20, 3);
        assert!(tiny.iter().all(|p| p.len() <= 3));
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_payloads(12345, 50, 500), generate_payloads(12345, 50, 500));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_payloads(1, 50, 500), generate_payloads(2, 50, 500));
    }

    #[test]
    fn test_exact_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(999);
        for len in [0, 1, 7, 100, 10000] {
            assert_eq!(generate_payload(&mut rng, len).len(), len);
        }
    }
}
