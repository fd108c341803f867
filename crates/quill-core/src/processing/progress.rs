//! Progress increments applied on every tick.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Smallest random increment, in percent.
pub const MIN_INCREMENT: u8 = 8;
/// Largest random increment, in percent.
pub const MAX_INCREMENT: u8 = 25;

/// Produces the percentage added to the progress bar per tick.
pub trait ProgressSource: Send {
    fn next_increment(&mut self) -> u8;
}

/// Always the same increment.
#[derive(Debug, Clone, Copy)]
pub struct FixedProgress(pub u8);

impl ProgressSource for FixedProgress {
    fn next_increment(&mut self) -> u8 {
        self.0
    }
}

/// Random increments between [`MIN_INCREMENT`] and [`MAX_INCREMENT`].
#[derive(Debug, Clone)]
pub struct RandomProgress {
    rng: StdRng,
}

impl RandomProgress {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ProgressSource for RandomProgress {
    fn next_increment(&mut self) -> u8 {
        self.rng.gen_range(MIN_INCREMENT..=MAX_INCREMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_progress_in_range() {
        let mut progress = RandomProgress::seeded(7);
        for _ in 0..200 {
            let step = progress.next_increment();
            assert!((MIN_INCREMENT..=MAX_INCREMENT).contains(&step));
        }
    }

    #[test]
    fn test_seeded_progress_is_reproducible() {
        let mut a = RandomProgress::seeded(42);
        let mut b = RandomProgress::seeded(42);
        let left: Vec<u8> = (0..10).map(|_| a.next_increment()).collect();
        let right: Vec<u8> = (0..10).map(|_| b.next_increment()).collect();
        assert_eq!(left, right);
    }
}
