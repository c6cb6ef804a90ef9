//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// The grid reports events as they happen; hosts decide whether to count,
/// log or ignore them.
pub trait SimStats {
    /// Record that a cell was relocated during simulation
    fn record_cell_moved(&mut self);

    /// Record that a reaction transformed one or more cells
    fn record_reaction(&mut self);

    /// Record that a cell ran out of lifetime
    fn record_expired(&mut self);

    /// Record that a cell was created by the simulation itself (smoke, plant growth)
    fn record_spawned(&mut self);

    /// Record that a creature died or was eaten
    fn record_death(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_cell_moved(&mut self) {}
    fn record_reaction(&mut self) {}
    fn record_expired(&mut self) {}
    fn record_spawned(&mut self) {}
    fn record_death(&mut self) {}
}

/// Plain counters, reset by the host between reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub cells_moved: u64,
    pub reactions: u64,
    pub expired: u64,
    pub spawned: u64,
    pub deaths: u64,
}

impl StepStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for StepStats {
    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_expired(&mut self) {
        self.expired += 1;
    }

    fn record_spawned(&mut self) {
        self.spawned += 1;
    }

    fn record_death(&mut self) {
        self.deaths += 1;
    }
}
