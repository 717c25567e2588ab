use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    pub train: Vec<T>,
    pub validation: Vec<T>,
}

/// Seeded when `seed` is given, otherwise from OS entropy.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `floor(fraction * len)`, clamped to `len`.
pub fn split_index(len: usize, train_fraction: f64) -> usize {
    ((train_fraction * len as f64).floor() as usize).min(len)
}

pub fn shuffle_and_split<T, R: Rng + ?Sized>(mut items: Vec<T>, train_fraction: f64, rng: &mut R) -> Split<T> {
    items.shuffle(rng);
    let validation = items.split_off(split_index(items.len(), train_fraction));
    Split {
        train: items,
        validation,
    }
}
