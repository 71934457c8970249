//! Deterministic RNG derivation for the shuffle grouping.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Create a deterministic RNG from a seed and a salt.
///
/// The same seed and salt always yield the same stream, so a caller that
/// sets `shuffleSeed` gets reproducible shuffle output.
pub fn rng_for(seed: u32, salt: &str) -> Pcg32 {
    let mut input = Vec::with_capacity(4 + 1 + salt.len());
    input.extend_from_slice(&seed.to_le_bytes());
    input.push(0);
    input.extend_from_slice(salt.as_bytes());

    let hash = blake3::hash(&input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4].try_into().unwrap();
    let derived = u32::from_le_bytes(bytes);
    let seed64 = (derived as u64) | ((derived as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// RNG for an unseeded shuffle: ambient entropy, explicitly
/// non-deterministic.
pub fn rng_from_entropy() -> Pcg32 {
    Pcg32::from_entropy()
}
