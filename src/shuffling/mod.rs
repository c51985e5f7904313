//! Deterministic deck permutation driven by the combined seed

pub mod knuth;
pub mod sfmt;

pub use knuth::{fisher_yates, uniform_index};
pub use sfmt::Sfmt;

use crate::domain::{CardHash, Seed256};

/// Shuffle the hashed deck with the combined seed. Pure: the input deck is
/// untouched, repeated calls with the same inputs return bit-identical
/// results. An empty deck shuffles to an empty deck.
pub fn shuffle_deck(deck: &[CardHash], seed: &Seed256) -> Vec<CardHash> {
    let mut shuffled = deck.to_vec();
    let mut rng = Sfmt::from_seed(seed);
    fisher_yates(&mut shuffled, &mut rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Hash256;

    fn deck(n: u8) -> Vec<CardHash> {
        (0..n).map(|i| Hash256::new([i; 32])).collect()
    }

    #[test]
    fn shuffled_deck_is_a_permutation_of_the_input() {
        let input = deck(52);
        let shuffled = shuffle_deck(&input, &Seed256::new([0x44; 32]));

        let mut lhs: Vec<[u8; 32]> = input.iter().map(|h| h.into_bytes()).collect();
        let mut rhs: Vec<[u8; 32]> = shuffled.iter().map(|h| h.into_bytes()).collect();
        lhs.sort_unstable();
        rhs.sort_unstable();
        assert_eq!(lhs, rhs);
        assert_ne!(input, shuffled);
    }

    #[test]
    fn shuffle_is_reproducible() {
        let input = deck(52);
        let seed = Seed256::new([0x45; 32]);
        assert_eq!(shuffle_deck(&input, &seed), shuffle_deck(&input, &seed));
    }

    #[test]
    fn different_seeds_give_different_orders() {
        let input = deck(52);
        let a = shuffle_deck(&input, &Seed256::new([0x46; 32]));
        let b = shuffle_deck(&input, &Seed256::new([0x47; 32]));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_deck_shuffles_to_empty() {
        assert!(shuffle_deck(&[], &Seed256::new([0x48; 32])).is_empty());
    }

    #[test]
    fn singleton_deck_shuffles_to_itself() {
        let input = deck(1);
        assert_eq!(shuffle_deck(&input, &Seed256::new([0x49; 32])), input);
    }
}
