//! Material table and cell data for Sandfall
//!
//! This crate provides the foundational data types for the simulation:
//! - Material definitions (MaterialId, MaterialDef, Materials)
//! - State classes and behavior classes (MaterialType, Behavior)
//! - Cell types (Cell, CreatureState)

mod cell;
mod materials;

pub use cell::{Cell, CreatureState};
pub use materials::{Behavior, CreatureParams, MaterialDef, MaterialId, MaterialType, Materials};
