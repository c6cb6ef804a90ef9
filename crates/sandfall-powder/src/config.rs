//! Host configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sandfall.ron` file (if exists), or the file passed with `--config`
//! 3. Environment variables prefixed with `SANDFALL_`
//!
//! Example environment variable: `SANDFALL_DISPLAY__PIXEL_SIZE=2`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use sandfall_core::{Brush, FixedTimestep};
use serde::{Deserialize, Serialize};

/// Main host configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PowderConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub brush: BrushConfig,
}

/// Size of the virtual display the grid covers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Display width in screen pixels
    pub width: u32,
    /// Display height in screen pixels
    pub height: u32,
    /// Screen pixels per cell side
    pub pixel_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            pixel_size: 4,
        }
    }
}

/// Tick pacing and reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ticks per second
    pub tick_rate: f32,
    /// Catch-up limit when a frame runs long
    pub max_steps_per_frame: u32,
    /// Log population statistics every this many ticks (0 = never)
    pub report_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: FixedTimestep::DEFAULT_TICK_RATE,
            max_steps_per_frame: FixedTimestep::DEFAULT_MAX_STEPS_PER_FRAME,
            report_interval: 60,
        }
    }
}

/// Brush used when painting scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    pub radius: u32,
    /// Chance that each covered empty cell gets filled (0-1)
    pub fill_chance: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: Brush::DEFAULT_RADIUS,
            fill_chance: Brush::DEFAULT_FILL_CHANCE,
        }
    }
}

impl BrushConfig {
    /// Brush for `material_id` at the configured radius and fill chance
    pub fn brush(&self, material_id: u16) -> Brush {
        Brush::new(material_id, self.radius).with_fill_chance(self.fill_chance)
    }
}

impl PowderConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `sandfall.ron` file (if exists)
    /// 3. Environment variables prefixed with `SANDFALL_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("sandfall")
                    .format(config::FileFormat::Ron)
                    .required(false),
            );
        Self::finish(builder)
    }

    /// Like [`PowderConfig::load`], but the file layer must exist at `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::from(path)
                .format(config::FileFormat::Ron)
                .required(true),
        );
        Self::finish(builder)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    // Layer 1: Compiled defaults
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let display = DisplayConfig::default();
        let simulation = SimulationConfig::default();
        let brush = BrushConfig::default();

        Ok(Config::builder()
            .set_default("display.width", display.width as i64)?
            .set_default("display.height", display.height as i64)?
            .set_default("display.pixel_size", display.pixel_size as i64)?
            .set_default("simulation.tick_rate", simulation.tick_rate as f64)?
            .set_default(
                "simulation.max_steps_per_frame",
                simulation.max_steps_per_frame as i64,
            )?
            .set_default("simulation.report_interval", simulation.report_interval as i64)?
            .set_default("brush.radius", brush.radius as i64)?
            .set_default("brush.fill_chance", brush.fill_chance as f64)?)
    }

    // Layer 3: Environment variables (SANDFALL_DISPLAY__WIDTH, etc.)
    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .add_source(
                Environment::with_prefix("SANDFALL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PowderConfig::default();
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.pixel_size, 4);
        assert_eq!(config.simulation.tick_rate, 60.0);
        assert_eq!(config.simulation.max_steps_per_frame, 2);
        assert_eq!(config.brush.radius, 3);
        assert_eq!(config.brush.fill_chance, 0.7);
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = PowderConfig::load().expect("Failed to load config");
        assert_eq!(config.display.height, 600);
        assert_eq!(config.simulation.report_interval, 60);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("Failed to create temp file");
        write!(file, "(display: (width: 320, height: 200, pixel_size: 2))")
            .expect("Failed to write config");

        let config = PowderConfig::load_from(file.path()).expect("Failed to load config");
        assert_eq!(config.display.width, 320);
        assert_eq!(config.display.pixel_size, 2);
        // Untouched sections keep their defaults
        assert_eq!(config.brush.radius, 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(PowderConfig::load_from(Path::new("/nonexistent/sandfall.ron")).is_err());
    }

    #[test]
    fn test_brush_from_config() {
        let brush = BrushConfig {
            radius: 5,
            fill_chance: 2.0,
        }
        .brush(4);
        assert_eq!(brush.radius, 5);
        assert_eq!(brush.material, Some(4));
        assert_eq!(brush.fill_chance, 1.0);
    }
}
