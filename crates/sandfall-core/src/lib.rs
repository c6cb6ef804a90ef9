//! Falling-sand simulation core
//!
//! A fixed-size [`Grid`] of cells, advanced one tick at a time by
//! [`Grid::step`]: powders pile, liquids level, gases rise, fire spreads,
//! plants grow and critters wander. Hosts paint with a [`Brush`], pace ticks
//! with a [`FixedTimestep`] and render from a [`GridView`].

pub mod brush;
pub mod creature;
pub mod grid;
pub mod timestep;

pub use brush::{Brush, BrushStroke};
pub use grid::{
    Grid, GridError, GridView, NoopStats, ORTHOGONAL, SURROUNDING, SimStats, StepStats, WorldRng,
};
pub use timestep::FixedTimestep;

// Re-export the material table and cell types for hosts
pub use sandfall_simulation::{
    Behavior, Cell, CreatureParams, CreatureState, MaterialDef, MaterialId, MaterialType,
    Materials,
};
