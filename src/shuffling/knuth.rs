//! Fisher–Yates shuffle driven by an unbiased 32-bit word stream

use rand::RngCore;

/// Draw a uniform index in `[0, upper]` by rejection sampling. Words at or
/// above `2^32 − (2^32 mod (upper + 1))` are discarded, so the reduction
/// carries no modulo bias.
pub fn uniform_index<R: RngCore>(rng: &mut R, upper: u32) -> u32 {
    let span = u64::from(upper) + 1;
    let bound = (1u64 << 32) - ((1u64 << 32) % span);
    loop {
        let word = u64::from(rng.next_u32());
        if word < bound {
            return (word % span) as u32;
        }
    }
}

/// In-place Knuth shuffle: `i` runs from the top down to 1, each step swaps
/// with a uniform index in the inclusive range `[0, i]`. Both the ordering
/// and the draw are protocol-fixed; implementations that disagree here
/// produce different decks and fail cross-verification.
pub fn fisher_yates<T, R: RngCore>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = uniform_index(rng, i as u32);
        items.swap(i, j as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Seed256;
    use crate::shuffling::sfmt::Sfmt;

    #[test]
    fn uniform_index_stays_in_range() {
        let mut rng = Sfmt::from_seed(&Seed256::new([0x33; 32]));
        for upper in [0u32, 1, 2, 51, 52, 1000] {
            for _ in 0..200 {
                assert!(uniform_index(&mut rng, upper) <= upper);
            }
        }
    }

    #[test]
    fn uniform_index_with_zero_upper_is_zero() {
        let mut rng = Sfmt::from_seed(&Seed256::new([0x34; 32]));
        for _ in 0..10 {
            assert_eq!(uniform_index(&mut rng, 0), 0);
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..52).collect();
        let mut rng = Sfmt::from_seed(&Seed256::new([0x35; 32]));
        fisher_yates(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<u32>>());
    }

    #[test]
    fn shuffle_is_deterministic() {
        let seed = Seed256::new([0x36; 32]);
        let mut a: Vec<u32> = (0..52).collect();
        let mut b: Vec<u32> = (0..52).collect();
        fisher_yates(&mut a, &mut Sfmt::from_seed(&seed));
        fisher_yates(&mut b, &mut Sfmt::from_seed(&seed));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_and_singleton_are_untouched() {
        let mut rng = Sfmt::from_seed(&Seed256::new([0x37; 32]));
        let mut empty: Vec<u32> = Vec::new();
        fisher_yates(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![7u32];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }
}
