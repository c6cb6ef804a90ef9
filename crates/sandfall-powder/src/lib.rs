//! # Sandfall Powder
//!
//! Headless host for the sandfall simulation: paints a named scenario onto a
//! grid sized from the configured display, runs it at a fixed tick rate while
//! logging population statistics, and can write a PNG snapshot of the result.

pub mod config;
pub mod runner;
pub mod scenario;
pub mod snapshot;

pub use config::PowderConfig;
pub use runner::{Pacing, Runner};
pub use scenario::Scenario;
