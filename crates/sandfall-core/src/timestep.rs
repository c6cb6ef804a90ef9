//! Fixed-timestep clock for driving `Grid::step` from a variable frame rate

/// Accumulates frame time and hands out whole simulation ticks
///
/// Catch-up is capped at `max_steps_per_frame`, and leftover time beyond two
/// ticks is dropped so a slow frame can't snowball.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    tick: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl FixedTimestep {
    pub const DEFAULT_TICK_RATE: f32 = 60.0;
    pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 2;

    /// Clock ticking `tick_rate` times per second
    pub fn new(tick_rate: f32, max_steps_per_frame: u32) -> Self {
        let tick_rate = if tick_rate > 0.0 && tick_rate.is_finite() {
            tick_rate
        } else {
            log::warn!(
                "Invalid tick rate {}, falling back to {}",
                tick_rate,
                Self::DEFAULT_TICK_RATE
            );
            Self::DEFAULT_TICK_RATE
        };
        Self {
            tick: 1.0 / tick_rate,
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
        }
    }

    /// Seconds per tick
    pub fn tick(&self) -> f32 {
        self.tick
    }

    /// Add `dt` seconds of frame time and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.tick && steps < self.max_steps_per_frame {
            self.accumulator -= self.tick;
            steps += 1;
        }

        // Clamp accumulator to prevent runaway
        if self.accumulator > self.tick * 2.0 {
            self.accumulator = self.tick;
        }

        steps
    }

    /// Fraction of a tick left in the accumulator
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TICK_RATE, Self::DEFAULT_MAX_STEPS_PER_FRAME)
    }
}
