//! RNG trait abstraction for grid simulation
//!
//! Lets the grid run on an entropy-seeded generator in the host, a fixed
//! seed for reproducible runs, or a scripted sequence in tests.

/// Random number generator trait for grid simulation
pub trait WorldRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Uniform integer in `0..upper` (0 when `upper` is 0)
    fn gen_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        ((self.gen_f32() * upper as f32) as u32).min(upper - 1)
    }

    /// -1 or 1 with equal probability
    fn gen_direction(&mut self) -> i32 {
        if self.gen_bool() { -1 } else { 1 }
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        rand::Rng::gen_range(self, 0..upper)
    }
}
