//! Grid storage, stepping, movement rules and reactions

mod ca_update;
pub(crate) mod cells;
mod error;
#[allow(clippy::module_inception)]
mod grid;
mod reactions;
mod rng_trait;
pub(crate) mod spawn;
mod stats;
mod view;

pub(crate) use ca_update::CellularAutomataUpdater;
pub use error::GridError;
pub use grid::Grid;
pub(crate) use reactions::ReactionSystem;
pub use rng_trait::WorldRng;
pub use stats::{NoopStats, SimStats, StepStats};
pub use view::{GridView, ORTHOGONAL, SURROUNDING};
