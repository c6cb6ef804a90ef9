//! Named starting layouts painted onto an empty grid
//!
//! Positions are fractions of the grid size, so every scenario fits whatever
//! display the host is configured for.

use glam::IVec2;
use sandfall_core::{Grid, MaterialId};

use crate::config::BrushConfig;

/// A named layout the host can paint before running
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    paint: fn(&mut Grid, &BrushConfig),
}

impl Scenario {
    /// Paint this scenario onto `grid`; returns the number of cells placed
    pub fn paint(&self, grid: &mut Grid, brush: &BrushConfig) -> usize {
        let before = grid.particle_count();
        (self.paint)(grid, brush);
        let placed = grid.particle_count().saturating_sub(before);
        log::info!("Painted scenario '{}': {} cells", self.name, placed);
        placed
    }

    /// Look a scenario up by name (case-insensitive)
    pub fn find(name: &str) -> Option<&'static Scenario> {
        SCENARIOS
            .iter()
            .find(|scenario| scenario.name.eq_ignore_ascii_case(name))
    }

    pub fn all() -> &'static [Scenario] {
        SCENARIOS
    }
}

static SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "sandbox",
        description: "Sand poured next to a pool of water",
        paint: sandbox,
    },
    Scenario {
        name: "volcano",
        description: "Water streaming onto a lava basin",
        paint: volcano,
    },
    Scenario {
        name: "bonfire",
        description: "A woodpile soaked in oil, lit from below",
        paint: bonfire,
    },
    Scenario {
        name: "garden",
        description: "Plants along the bank of a pond",
        paint: garden,
    },
    Scenario {
        name: "pond",
        description: "Fish in a pond, frogs and ants on the shore, birds overhead",
        paint: pond,
    },
    Scenario {
        name: "burrow",
        description: "Worms in a sand bed with ants walking on top",
        paint: burrow,
    },
];

/// Print the scenario list for `--list-scenarios`
pub fn list_scenarios() {
    println!("Available scenarios:");
    for scenario in Scenario::all() {
        println!("  {:<10} {}", scenario.name, scenario.description);
    }
}

// ============================================================================
// Layout helpers
// ============================================================================

fn at(grid: &Grid, fx: f32, fy: f32) -> IVec2 {
    IVec2::new(
        (grid.width() as f32 * fx) as i32,
        (grid.height() as f32 * fy) as i32,
    )
}

/// Solid rectangle, corners inclusive
fn fill(grid: &mut Grid, from: IVec2, to: IVec2, material_id: u16) {
    for y in from.y.min(to.y)..=from.y.max(to.y) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            grid.create(x, y, material_id);
        }
    }
}

/// Stone floor `thickness` cells deep along the bottom edge
fn floor(grid: &mut Grid, thickness: i32) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    fill(grid, IVec2::new(0, h - thickness), IVec2::new(w - 1, h - 1), MaterialId::STONE);
}

/// Open-topped stone box; returns the inner (top-left, bottom-right) corners
fn basin(grid: &mut Grid, left: IVec2, right: IVec2) -> (IVec2, IVec2) {
    fill(grid, left, IVec2::new(left.x, right.y), MaterialId::STONE);
    fill(grid, IVec2::new(right.x, left.y), right, MaterialId::STONE);
    fill(grid, IVec2::new(left.x, right.y), right, MaterialId::STONE);
    (
        IVec2::new(left.x + 1, left.y),
        IVec2::new(right.x - 1, right.y - 1),
    )
}

/// Scatter single creatures along a row, every `spacing` cells
fn scatter(grid: &mut Grid, from: IVec2, to: IVec2, spacing: usize, material_id: u16) {
    for x in (from.x..=to.x).step_by(spacing.max(1)) {
        grid.create(x, from.y, material_id);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

fn sandbox(grid: &mut Grid, brush: &BrushConfig) {
    floor(grid, 3);

    let sand = brush.brush(MaterialId::SAND);
    sand.stroke(grid, at(grid, 0.25, 0.1), at(grid, 0.35, 0.45));
    sand.stroke(grid, at(grid, 0.35, 0.1), at(grid, 0.25, 0.45));

    let (top, bottom) = basin(grid, at(grid, 0.55, 0.6), at(grid, 0.9, 0.97));
    fill(grid, top, bottom, MaterialId::WATER);
}

fn volcano(grid: &mut Grid, brush: &BrushConfig) {
    floor(grid, 3);

    let (top, bottom) = basin(grid, at(grid, 0.1, 0.65), at(grid, 0.5, 0.97));
    fill(grid, top, bottom, MaterialId::LAVA);

    // Ledge that spills water down onto the lava
    fill(grid, at(grid, 0.45, 0.3), at(grid, 0.9, 0.32), MaterialId::STONE);
    let water = brush.brush(MaterialId::WATER);
    water.stroke(grid, at(grid, 0.6, 0.15), at(grid, 0.85, 0.25));
}

fn bonfire(grid: &mut Grid, brush: &BrushConfig) {
    floor(grid, 3);

    let base = at(grid, 0.5, 0.97);
    for row in 0..6 {
        let half = 12 - row * 2;
        let y = base.y - 1 - row * 2;
        fill(
            grid,
            IVec2::new(base.x - half, y),
            IVec2::new(base.x + half, y),
            MaterialId::WOOD,
        );
    }

    let oil = brush.brush(MaterialId::OIL);
    oil.stroke(grid, at(grid, 0.4, 0.55), at(grid, 0.6, 0.55));

    for dx in [-14, -13, 13, 14] {
        grid.create(base.x + dx, base.y - 1, MaterialId::FIRE);
    }
}

fn garden(grid: &mut Grid, _brush: &BrushConfig) {
    floor(grid, 3);

    let (top, bottom) = basin(grid, at(grid, 0.3, 0.8), at(grid, 0.7, 0.97));
    fill(grid, top, bottom, MaterialId::WATER);

    // Seeds on the rims, touching the water's edge
    for x in [top.x - 1, bottom.x + 1] {
        grid.remove(x, top.y);
        grid.create(x, top.y, MaterialId::PLANT);
    }
    // Lily pads
    let surface = top.y - 1;
    scatter(
        grid,
        IVec2::new(top.x, surface),
        IVec2::new(bottom.x, surface),
        6,
        MaterialId::PLANT,
    );
}

fn pond(grid: &mut Grid, brush: &BrushConfig) {
    floor(grid, 3);

    let (top, bottom) = basin(grid, at(grid, 0.25, 0.6), at(grid, 0.75, 0.97));
    scatter(
        grid,
        IVec2::new(top.x + 2, (top.y + bottom.y) / 2),
        IVec2::new(bottom.x - 2, (top.y + bottom.y) / 2),
        8,
        MaterialId::FISH,
    );
    fill(grid, top, bottom, MaterialId::WATER);

    let shore = grid.height() as i32 - 4;
    scatter(grid, IVec2::new(2, shore), IVec2::new(top.x - 3, shore), 7, MaterialId::FROG);
    scatter(
        grid,
        IVec2::new(bottom.x + 3, shore),
        IVec2::new(grid.width() as i32 - 3, shore),
        5,
        MaterialId::ANT,
    );

    let sky = at(grid, 0.0, 0.15);
    scatter(grid, IVec2::new(4, sky.y), IVec2::new(grid.width() as i32 - 4, sky.y), 20, MaterialId::BIRD);

    // Reeds along the bank
    let plant = brush.brush(MaterialId::PLANT);
    plant.stamp(grid, IVec2::new(top.x - 2, top.y - 2));
}

fn burrow(grid: &mut Grid, brush: &BrushConfig) {
    floor(grid, 3);

    let bed_top = at(grid, 0.0, 0.5).y;
    let bed_bottom = grid.height() as i32 - 4;
    let width = grid.width() as i32;
    for row in [bed_top + 4, (bed_top + bed_bottom) / 2, bed_bottom - 3] {
        scatter(grid, IVec2::new(5, row), IVec2::new(width - 5, row), 15, MaterialId::WORM);
    }
    fill(grid, IVec2::new(0, bed_top), IVec2::new(width - 1, bed_bottom), MaterialId::SAND);

    scatter(grid, IVec2::new(3, bed_top - 1), IVec2::new(width - 3, bed_top - 1), 9, MaterialId::ANT);

    // Damp patch for the worms to avoid
    let water = brush.brush(MaterialId::WATER);
    water.stamp(grid, at(grid, 0.5, 0.3));
}
