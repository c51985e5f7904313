use thiserror::Error;

use crate::domain::HandId;
use crate::session::hand::HandPhase;

/// Caller-contract and environmental failures. Cryptographic mismatches are
/// never errors; they surface as [`Verdict::Fail`](crate::domain::Verdict).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("unknown hand {0}")]
    UnknownHand(HandId),

    #[error("hand {0} already begun")]
    DuplicateHand(HandId),

    #[error("initial deck is empty")]
    EmptyDeck,

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("operation out of phase for hand {hand_id}: currently {phase:?}")]
    WrongPhase { hand_id: HandId, phase: HandPhase },

    #[error("reveal position {position} out of range for deck of {deck_len}")]
    RevealOutOfRange { position: usize, deck_len: usize },

    #[error("entropy source unavailable")]
    Entropy(#[from] rand::Error),
}
