//! Per-hand session lifecycle: commit, collect, verify, abort

pub mod error;
pub mod hand;
pub mod store;

pub use error::SessionError;
pub use hand::{HandPhase, HandState, PartySlot, PlayerState};
pub use store::HandStore;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::audit::{AuditRecord, AuditSink, NoAudit};
use crate::commitment;
use crate::domain::{
    cards, CardHash, CardReveal, HandId, Hash256, Party, PlayerEntry, SeatCommitment, SeatIndex,
    SeatSeed, Seed256, Verdict,
};
use crate::seed;
use crate::shuffling;

const LOG_TARGET: &str = "verideck::session";

/// Parameters for [`RngSessionManager::begin_hand`].
#[derive(Debug, Clone)]
pub struct BeginHandParams {
    pub hand_id: HandId,
    /// Wire seat of the local party; `-1` when the local party is the
    /// operator.
    pub self_seat: SeatIndex,
    /// The hashed deck as published, before shuffling.
    pub initial_deck: Vec<CardHash>,
    pub players: Vec<PlayerEntry>,
    /// Caller-supplied seed material; drawn from OS entropy when absent or
    /// empty.
    pub seed_bytes: Option<Vec<u8>>,
}

/// Session manager owning every active hand. Many hands may be in flight
/// concurrently; within one hand callers must drive
/// begin → record commitments → verify in order.
pub struct RngSessionManager {
    store: HandStore,
    audit: Arc<dyn AuditSink>,
}

impl RngSessionManager {
    pub fn new() -> Self {
        Self::with_audit(Arc::new(NoAudit))
    }

    pub fn with_audit(audit: Arc<dyn AuditSink>) -> Self {
        Self {
            store: HandStore::new(),
            audit,
        }
    }

    /// Open a hand: register the deck and roster, commit to a seed, return
    /// the commitment for broadcast.
    pub fn begin_hand(&self, params: BeginHandParams) -> Result<Hash256, SessionError> {
        let BeginHandParams {
            hand_id,
            self_seat,
            initial_deck,
            players,
            seed_bytes,
        } = params;

        if initial_deck.is_empty() {
            return Err(SessionError::EmptyDeck);
        }
        let self_party = Party::from_seat(self_seat).ok_or_else(|| {
            SessionError::InvalidRoster(format!("self seat {self_seat} is not a seat"))
        })?;

        let mut roster = Vec::with_capacity(players.len());
        for entry in players {
            let Some(Party::Player(seat)) = Party::from_seat(entry.seat) else {
                return Err(SessionError::InvalidRoster(format!(
                    "player seat {} out of range",
                    entry.seat
                )));
            };
            roster.push(PlayerState {
                seat,
                nickname: entry.nickname,
                slot: PartySlot::default(),
            });
        }

        let mut state = HandState::new(hand_id, self_party, initial_deck, roster);
        if state.players.windows(2).any(|w| w[0].seat == w[1].seat) {
            return Err(SessionError::InvalidRoster("duplicate player seat".into()));
        }
        if let Party::Player(seat) = self_party {
            if state.player(seat).is_none() {
                return Err(SessionError::InvalidRoster(format!(
                    "self seat {seat} missing from roster"
                )));
            }
        }

        let self_seed = match seed_bytes {
            Some(bytes) if !bytes.is_empty() => seed::from_bytes(&bytes),
            _ => seed::generate()?,
        };
        let self_commit = commitment::commit_seed(&self_seed);
        state.self_seed = self_seed;
        state.self_commit = self_commit;
        state.record_commitment(self_seat, self_commit);
        state.record_seed(self_seat, self_seed);

        self.store.create(state)?;
        info!(target: LOG_TARGET, hand_id, self_seat, "hand begun");
        Ok(self_commit)
    }

    /// Record peer commitments and hand back the local seed for broadcast.
    /// May be invoked repeatedly; later entries overwrite earlier ones.
    pub fn record_commitments(
        &self,
        hand_id: HandId,
        commitments: &[SeatCommitment],
    ) -> Result<Seed256, SessionError> {
        let mut state = self.store.lookup(hand_id)?;
        match state.phase {
            HandPhase::Begun | HandPhase::CommitmentsCollected => {}
            phase => return Err(SessionError::WrongPhase { hand_id, phase }),
        }

        for entry in commitments {
            state.record_commitment(entry.seat, entry.hash);
        }
        state.phase = HandPhase::CommitmentsCollected;
        debug!(
            target: LOG_TARGET,
            hand_id,
            count = commitments.len(),
            "commitments recorded"
        );
        Ok(state.self_seed)
    }

    /// Combine the revealed seeds, shuffle, and check every commitment and
    /// card reveal. Re-invocable after a verdict with corrected inputs.
    pub fn verify_hand(
        &self,
        hand_id: HandId,
        seeds: &[SeatSeed],
        reveals: &[CardReveal],
    ) -> Result<Verdict, SessionError> {
        let mut state = self.store.lookup(hand_id)?;
        match state.phase {
            HandPhase::CommitmentsCollected | HandPhase::Verified(_) => {}
            phase => return Err(SessionError::WrongPhase { hand_id, phase }),
        }
        let deck_len = state.initial_deck.len();
        if let Some(reveal) = reveals.iter().find(|r| r.position >= deck_len) {
            return Err(SessionError::RevealOutOfRange {
                position: reveal.position,
                deck_len,
            });
        }

        for entry in seeds {
            state.record_seed(entry.seat, entry.seed);
        }
        let ordered: Vec<Seed256> = seeds.iter().map(|s| s.seed).collect();
        state.combined_seed = seed::combine_seeds(&ordered);
        state.shuffled_deck = shuffling::shuffle_deck(&state.initial_deck, &state.combined_seed);
        state.reveals = reveals.to_vec();

        if let Err(err) = self.audit.append(&AuditRecord::of(&state)) {
            warn!(target: LOG_TARGET, hand_id, error = %err, "audit sink write failed");
        }

        let verdict = Self::judge(&state);
        state.phase = HandPhase::Verified(verdict);
        info!(target: LOG_TARGET, hand_id, ?verdict, "hand verified");
        Ok(verdict)
    }

    /// Discard hand state without verification. Always succeeds, even for
    /// unknown hands.
    pub fn abort_hand(&self, hand_id: HandId) {
        if self.store.remove(hand_id) {
            info!(target: LOG_TARGET, hand_id, "hand aborted");
        }
    }

    pub fn active_hands(&self) -> usize {
        self.store.len()
    }

    fn judge(state: &HandState) -> Verdict {
        let self_slot = match state.self_slot() {
            Some(slot) => slot,
            None => return Verdict::Fail,
        };
        if self_slot.hash != state.self_commit || self_slot.seed != state.self_seed {
            return Verdict::Fail;
        }

        for slot in state.slots() {
            if slot.seed.is_zero() {
                continue;
            }
            if !commitment::binds(&slot.hash, &slot.seed) {
                return Verdict::Fail;
            }
        }

        for reveal in &state.reveals {
            if !cards::check_card(
                &state.shuffled_deck[reveal.position],
                &reveal.salt,
                reveal.card,
            ) {
                return Verdict::Fail;
            }
        }
        Verdict::Pass
    }
}

impl Default for RngSessionManager {
    fn default() -> Self {
        Self::new()
    }
}
