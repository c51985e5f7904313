//! Pure per-hand protocol state. No locking here; the store serializes
//! access to each hand.

use crate::domain::{
    CardHash, CardReveal, HandId, Hash256, Party, SeatIndex, Seed256, Verdict,
};

/// Lifecycle of a hand inside the session store. A hand id that is absent
/// from the store is implicitly idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPhase {
    Begun,
    CommitmentsCollected,
    Verified(Verdict),
}

/// Commitment and reveal slot for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartySlot {
    pub hash: Hash256,
    pub seed: Seed256,
}

/// Roster entry for a seated player.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub seat: u16,
    pub nickname: String,
    pub slot: PartySlot,
}

#[derive(Debug)]
pub struct HandState {
    pub hand_id: HandId,
    pub self_party: Party,
    pub initial_deck: Vec<CardHash>,
    pub operator: PartySlot,
    /// Sorted ascending by seat.
    pub players: Vec<PlayerState>,
    pub self_seed: Seed256,
    pub self_commit: Hash256,
    pub combined_seed: Seed256,
    pub shuffled_deck: Vec<CardHash>,
    pub reveals: Vec<CardReveal>,
    pub phase: HandPhase,
}

impl HandState {
    pub fn new(
        hand_id: HandId,
        self_party: Party,
        initial_deck: Vec<CardHash>,
        mut players: Vec<PlayerState>,
    ) -> Self {
        players.sort_by_key(|p| p.seat);
        Self {
            hand_id,
            self_party,
            initial_deck,
            operator: PartySlot::default(),
            players,
            self_seed: Seed256::zero(),
            self_commit: Hash256::zero(),
            combined_seed: Seed256::zero(),
            shuffled_deck: Vec::new(),
            reveals: Vec::new(),
            phase: HandPhase::Begun,
        }
    }

    pub fn player(&self, seat: u16) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn player_mut(&mut self, seat: u16) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.seat == seat)
    }

    /// Route a received commitment by wire seat index. Seats outside the
    /// roster are ignored; participants may publish metadata for seats the
    /// roster does not carry.
    pub fn record_commitment(&mut self, seat: SeatIndex, hash: Hash256) {
        match Party::from_seat(seat) {
            Some(Party::Operator) => self.operator.hash = hash,
            Some(Party::Player(seat)) => {
                if let Some(player) = self.player_mut(seat) {
                    player.slot.hash = hash;
                }
            }
            None => {}
        }
    }

    /// Route a revealed seed by wire seat index; unknown seats are ignored.
    pub fn record_seed(&mut self, seat: SeatIndex, seed: Seed256) {
        match Party::from_seat(seat) {
            Some(Party::Operator) => self.operator.seed = seed,
            Some(Party::Player(seat)) => {
                if let Some(player) = self.player_mut(seat) {
                    player.slot.seed = seed;
                }
            }
            None => {}
        }
    }

    /// The local party's slot as peers currently see it.
    pub fn self_slot(&self) -> Option<&PartySlot> {
        match self.self_party {
            Party::Operator => Some(&self.operator),
            Party::Player(seat) => self.player(seat).map(|p| &p.slot),
        }
    }

    /// All slots, operator first, players in seat order.
    pub fn slots(&self) -> impl Iterator<Item = &PartySlot> {
        std::iter::once(&self.operator).chain(self.players.iter().map(|p| &p.slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand() -> HandState {
        let players = vec![
            PlayerState {
                seat: 3,
                nickname: "carol".into(),
                slot: PartySlot::default(),
            },
            PlayerState {
                seat: 0,
                nickname: "alice".into(),
                slot: PartySlot::default(),
            },
        ];
        HandState::new(7, Party::Player(0), vec![Hash256::new([1; 32])], players)
    }

    #[test]
    fn roster_is_sorted_by_seat() {
        let state = hand();
        let seats: Vec<u16> = state.players.iter().map(|p| p.seat).collect();
        assert_eq!(seats, vec![0, 3]);
    }

    #[test]
    fn routing_honors_the_operator_sentinel() {
        let mut state = hand();
        let hash = Hash256::new([9; 32]);
        state.record_commitment(-1, hash);
        assert_eq!(state.operator.hash, hash);

        state.record_commitment(3, hash);
        assert_eq!(state.player(3).unwrap().slot.hash, hash);
    }

    #[test]
    fn unknown_seats_are_ignored() {
        let mut state = hand();
        state.record_commitment(17, Hash256::new([9; 32]));
        state.record_seed(-5, Seed256::new([9; 32]));
        assert!(state.slots().all(|slot| *slot == PartySlot::default()));
    }

    #[test]
    fn self_slot_follows_the_local_party() {
        let mut state = hand();
        let seed = Seed256::new([5; 32]);
        state.record_seed(0, seed);
        assert_eq!(state.self_slot().unwrap().seed, seed);

        state.self_party = Party::Operator;
        assert_eq!(state.self_slot().unwrap().seed, Seed256::zero());
    }
}
