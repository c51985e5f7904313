//! In-memory store of active hands

use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::HandId;
use crate::session::error::SessionError;
use crate::session::hand::HandState;

const LOG_TARGET: &str = "verideck::session::store";

/// Maps hand id to hand state. Entries lock independently, so operations on
/// distinct hands do not contend. No ordering, no eviction, no persistence.
#[derive(Default)]
pub struct HandStore {
    hands: DashMap<HandId, HandState>,
}

impl HandStore {
    pub fn new() -> Self {
        Self {
            hands: DashMap::new(),
        }
    }

    /// Insert a fresh hand; fails if the id is already present.
    pub fn create(
        &self,
        state: HandState,
    ) -> Result<RefMut<'_, HandId, HandState>, SessionError> {
        let hand_id = state.hand_id;
        match self.hands.entry(hand_id) {
            Entry::Occupied(_) => Err(SessionError::DuplicateHand(hand_id)),
            Entry::Vacant(entry) => {
                debug!(target: LOG_TARGET, hand_id, "hand inserted");
                Ok(entry.insert(state))
            }
        }
    }

    /// Locked mutable access to a hand; *unknown-hand* if absent.
    pub fn lookup(
        &self,
        hand_id: HandId,
    ) -> Result<RefMut<'_, HandId, HandState>, SessionError> {
        self.hands
            .get_mut(&hand_id)
            .ok_or(SessionError::UnknownHand(hand_id))
    }

    /// Idempotent removal; returns whether the hand existed.
    pub fn remove(&self, hand_id: HandId) -> bool {
        let removed = self.hands.remove(&hand_id).is_some();
        if removed {
            debug!(target: LOG_TARGET, hand_id, "hand removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hash256, Party};

    fn state(hand_id: HandId) -> HandState {
        HandState::new(
            hand_id,
            Party::Operator,
            vec![Hash256::new([1; 32])],
            Vec::new(),
        )
    }

    #[test]
    fn create_rejects_duplicate_ids() {
        let store = HandStore::new();
        store.create(state(1)).unwrap();
        assert!(matches!(
            store.create(state(1)),
            Err(SessionError::DuplicateHand(1))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookup_misses_report_unknown_hand() {
        let store = HandStore::new();
        assert!(matches!(
            store.lookup(9),
            Err(SessionError::UnknownHand(9))
        ));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = HandStore::new();
        store.create(state(2)).unwrap();
        assert!(store.remove(2));
        assert!(!store.remove(2));
        assert!(store.is_empty());
    }
}
