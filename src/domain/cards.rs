//! Card byte encoding and salted card-hash verification

use crate::commitment::shake256_32;
use crate::domain::{CardHash, CardPlain, Hash256};

const RANKS: &[u8; 13] = b"23456789TJQKA";
const SUITS: &[u8; 4] = b"shdc";

impl CardPlain {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 52;

    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }

    /// Two-ASCII-byte rank-and-suit text, e.g. `1` → `2s`, `52` → `Ac`.
    /// `None` outside the card byte domain.
    pub fn text(&self) -> Option<[u8; 2]> {
        if !self.is_valid() {
            return None;
        }
        let c = usize::from(self.0);
        let s = (c - 1) % 4;
        let r = (c - 1 - s) / 4;
        Some([RANKS[r], SUITS[s]])
    }
}

/// Hash preimage for a salted card: `salt ‖ 0x00 ‖ rankChar ‖ suitChar`.
/// Exactly one NUL separator and exactly two ASCII bytes of card text.
pub fn card_preimage(salt: &[u8], card: CardPlain) -> Option<Vec<u8>> {
    let text = card.text()?;
    let mut preimage = Vec::with_capacity(salt.len() + 3);
    preimage.extend_from_slice(salt);
    preimage.push(0);
    preimage.extend_from_slice(&text);
    Some(preimage)
}

/// Commitment to a salted card, as published in the hashed deck.
pub fn card_hash(salt: &[u8], card: CardPlain) -> Option<CardHash> {
    card_preimage(salt, card).map(|preimage| Hash256::new(shake256_32(&preimage)))
}

/// Check a revealed `(salt, card)` pair against the hashed-deck entry at its
/// claimed position. Out-of-domain card bytes never verify.
pub fn check_card(expected: &CardHash, salt: &[u8], card: CardPlain) -> bool {
    match card_hash(salt, card) {
        Some(hash) => hash == *expected,
        None => false,
    }
}
