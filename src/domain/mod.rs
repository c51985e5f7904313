//! Core protocol types for the verifiable shuffle

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

pub mod cards;

pub use cards::{card_hash, card_preimage, check_card};

/// ---------- Common type aliases ----------
pub type HandId = u64;
pub type SeatIndex = i32;

/// Seat index that routes to the operator slot.
pub const OPERATOR_SEAT: SeatIndex = -1;

pub const SEED_LEN: usize = 32;
pub const HASH_LEN: usize = 32;

/// ---------- Fixed-width byte arrays ----------

/// 32-byte SHAKE256 output, used for seed commitments and card hashes alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256([u8; HASH_LEN]);

impl Hash256 {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self([0u8; HASH_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; HASH_LEN] {
        self.0
    }
}

impl Default for Hash256 {
    fn default() -> Self {
        Self::zero()
    }
}

impl AsRef<[u8; HASH_LEN]> for Hash256 {
    fn as_ref(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl From<[u8; HASH_LEN]> for Hash256 {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Hash256::new(bytes)
    }
}

impl From<Hash256> for [u8; HASH_LEN] {
    fn from(hash: Hash256) -> Self {
        hash.0
    }
}

/// Commitment to a single face-down card; same layout as [`Hash256`],
/// distinguished only by role.
pub type CardHash = Hash256;

/// A participant's 256-bit seed contribution, secret until revealed. The
/// all-zero value doubles as "not yet revealed" in slot bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct Seed256([u8; SEED_LEN]);

impl Seed256 {
    pub const fn new(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn zero() -> Self {
        Self([0u8; SEED_LEN])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; SEED_LEN]
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; SEED_LEN] {
        self.0
    }
}

impl Default for Seed256 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[u8; SEED_LEN]> for Seed256 {
    fn from(bytes: [u8; SEED_LEN]) -> Self {
        Seed256::new(bytes)
    }
}

impl From<Seed256> for [u8; SEED_LEN] {
    fn from(seed: Seed256) -> Self {
        seed.0
    }
}

/// ---------- Participants ----------

/// A protocol participant. The wire convention encodes the operator as seat
/// `-1`; the translation happens at the session boundary so the core never
/// carries the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    Operator,
    Player(u16),
}

impl Party {
    /// Translate a wire seat index. Returns `None` for indices that denote
    /// neither the operator nor a representable player seat.
    pub fn from_seat(seat: SeatIndex) -> Option<Party> {
        match seat {
            OPERATOR_SEAT => Some(Party::Operator),
            s if s >= 0 => u16::try_from(s).ok().map(Party::Player),
            _ => None,
        }
    }

    pub fn seat(&self) -> SeatIndex {
        match self {
            Party::Operator => OPERATOR_SEAT,
            Party::Player(seat) => SeatIndex::from(*seat),
        }
    }
}

/// ---------- Cards ----------

/// Plaintext card representation (1..52)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
pub struct CardPlain(pub u8);

/// ---------- Verdict ----------

/// Outcome of hand verification. Protocol mismatches collapse into the
/// single `Fail` verdict; diagnostics go to the audit log only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// ---------- Boundary entries ----------

/// Roster entry supplied at hand begin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub seat: SeatIndex,
    pub nickname: String,
}

/// A participant's published commitment, keyed by wire seat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCommitment {
    pub seat: SeatIndex,
    pub hash: Hash256,
}

/// A participant's revealed seed, keyed by wire seat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSeed {
    pub seat: SeatIndex,
    pub seed: Seed256,
}

/// A revealed card: position in the shuffled deck plus the salted plaintext
/// preimage of the hash published there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReveal {
    pub position: usize,
    pub salt: Vec<u8>,
    pub card: CardPlain,
}
