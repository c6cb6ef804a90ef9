//! Fixed-cadence main loop
//!
//! Frame time is fed into a [`FixedTimestep`]; each frame runs however many
//! ticks the clock hands out. Population statistics are logged every
//! `report_interval` ticks.

use std::time::Duration;

use sandfall_core::{FixedTimestep, Grid, StepStats, WorldRng};
use web_time::Instant;

use crate::config::SimulationConfig;

/// How frame time is measured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep between frames and measure wall-clock time
    Realtime,
    /// Every frame is exactly one tick long; runs as fast as possible
    Unpaced,
}

pub struct Runner {
    timestep: FixedTimestep,
    pacing: Pacing,
    report_interval: u64,
    /// Events since the last report
    window: StepStats,
    total: StepStats,
}

impl Runner {
    pub fn new(config: &SimulationConfig, pacing: Pacing) -> Self {
        Self {
            timestep: FixedTimestep::new(config.tick_rate, config.max_steps_per_frame),
            pacing,
            report_interval: config.report_interval,
            window: StepStats::default(),
            total: StepStats::default(),
        }
    }

    /// Everything recorded so far, including the unreported tail
    pub fn total(&self) -> StepStats {
        let mut total = self.total;
        absorb(&mut total, &self.window);
        total
    }

    /// Run `ticks` simulation ticks; returns the number actually stepped
    pub fn run<R: WorldRng>(&mut self, grid: &mut Grid<R>, ticks: u64) -> u64 {
        log::info!(
            "Running {} ticks at {:.0} Hz ({:?})",
            ticks,
            1.0 / self.timestep.tick(),
            self.pacing
        );

        let started = Instant::now();
        let mut last_frame = started;
        let mut stepped = 0;

        while stepped < ticks {
            let dt = match self.pacing {
                Pacing::Realtime => {
                    std::thread::sleep(Duration::from_secs_f32(self.timestep.tick()));
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;
                    dt
                }
                Pacing::Unpaced => self.timestep.tick(),
            };

            let steps = self.timestep.advance(dt);
            for _ in 0..steps {
                if stepped == ticks {
                    break;
                }
                grid.step_with_stats(&mut self.window);
                stepped += 1;

                if self.report_interval > 0 && grid.frame_count() % self.report_interval == 0 {
                    self.report(grid);
                }
            }
        }

        log::info!(
            "Finished {} ticks in {:.2}s",
            stepped,
            started.elapsed().as_secs_f32()
        );
        stepped
    }

    fn report<R: WorldRng>(&mut self, grid: &Grid<R>) {
        let w = &self.window;
        log::info!(
            "tick {} | {} particles | moved {} reactions {} expired {} spawned {} deaths {}",
            grid.frame_count(),
            grid.particle_count(),
            w.cells_moved,
            w.reactions,
            w.expired,
            w.spawned,
            w.deaths
        );

        if log::log_enabled!(log::Level::Debug) {
            let mut counts: Vec<_> = grid.material_counts().into_iter().collect();
            counts.sort_unstable();
            for (material_id, count) in counts {
                let name = grid
                    .materials()
                    .get(material_id)
                    .map_or("unknown", |def| def.name.as_str());
                log::debug!("  {:<8} {}", name, count);
            }
        }

        absorb(&mut self.total, &self.window);
        self.window.reset();
    }
}

fn absorb(total: &mut StepStats, window: &StepStats) {
    total.cells_moved += window.cells_moved;
    total.reactions += window.reactions;
    total.expired += window.expired;
    total.spawned += window.spawned;
    total.deaths += window.deaths;
}
