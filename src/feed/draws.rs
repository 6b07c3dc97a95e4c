use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Side;

/// Source of the random outcomes that drive the simulation
pub trait Draws: Send {
    /// Returns true with probability `p`
    fn chance(&mut self, p: f64) -> bool;

    /// Fair coin between the two sides
    fn coin(&mut self) -> Side;
}

/// `Draws` backed by a `rand` generator
pub struct RandomDraws<R = StdRng> {
    rng: R,
}

impl<R: Rng + Send> RandomDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDraws<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence of outcomes
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> Draws for RandomDraws<R> {
    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn coin(&mut self) -> Side {
        if self.rng.gen_bool(0.5) {
            Side::Home
        } else {
            Side::Away
        }
    }
}

impl<D: Draws + ?Sized> Draws for Box<D> {
    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }

    fn coin(&mut self) -> Side {
        (**self).coin()
    }
}
