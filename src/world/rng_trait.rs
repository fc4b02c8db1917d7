//! RNG trait abstraction for the survival rolls
//!
//! Lets callers pass any `rand::Rng` (a seeded `Xoshiro256StarStar` in the
//! game, fixed streams in tests).

/// Random number generator trait for world simulation
pub trait WorldRng {
    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }
}

impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }
}

/// Rng that always yields the same value; used to force or suppress rolls
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(pub f32);

impl WorldRng for FixedRng {
    fn gen_f32(&mut self) -> f32 {
        self.0
    }
}
