//! SHAKE256 commitments binding seeds to their published hashes

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

use crate::domain::{Hash256, Seed256, HASH_LEN};

/// FIPS 202 SHAKE256 truncated to 32 bytes of output. Every hash in the
/// protocol (seed commitments, combined seeds, card hashes) goes through
/// this one function.
pub fn shake256_32(input: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Shake256::default();
    hasher.update(input);
    let mut out = [0u8; HASH_LEN];
    hasher.finalize_xof().read(&mut out);
    out
}

/// Commitment to a seed: `H(seed)` at 32 bytes.
pub fn commit_seed(seed: &Seed256) -> Hash256 {
    Hash256::new(shake256_32(seed.as_bytes()))
}

/// Whether `commitment` binds `seed`.
pub fn binds(commitment: &Hash256, seed: &Seed256) -> bool {
    commit_seed(seed) == *commitment
}
