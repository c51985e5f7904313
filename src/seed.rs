//! Seed generation and deterministic combination

use rand::rngs::OsRng;
use rand::RngCore;

use crate::commitment::shake256_32;
use crate::domain::{Seed256, SEED_LEN};

/// Build a seed from caller-supplied bytes, truncated or zero-padded to
/// 32 bytes.
pub fn from_bytes(bytes: &[u8]) -> Seed256 {
    let mut out = [0u8; SEED_LEN];
    let n = bytes.len().min(SEED_LEN);
    out[..n].copy_from_slice(&bytes[..n]);
    Seed256::new(out)
}

/// Draw a fresh seed from the OS entropy source.
pub fn generate() -> Result<Seed256, rand::Error> {
    let mut out = [0u8; SEED_LEN];
    OsRng.try_fill_bytes(&mut out)?;
    Ok(Seed256::new(out))
}

/// Fold an ordered sequence of revealed seeds into one:
/// `H(s₀ ‖ s₁ ‖ … ‖ sₖ₋₁)` at 32 bytes, input order preserved bit-exactly.
///
/// An empty input yields the all-zero seed. That is the documented contract,
/// not a safety claim; callers must supply at least one seed when security
/// matters.
pub fn combine_seeds(seeds: &[Seed256]) -> Seed256 {
    if seeds.is_empty() {
        return Seed256::zero();
    }
    let mut concat = Vec::with_capacity(seeds.len() * SEED_LEN);
    for seed in seeds {
        concat.extend_from_slice(seed.as_bytes());
    }
    Seed256::new(shake256_32(&concat))
}
