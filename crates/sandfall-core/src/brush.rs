//! Painting materials onto the grid

use bresenham::Bresenham;
use glam::IVec2;
use sandfall_simulation::MaterialId;

use crate::grid::{Grid, WorldRng};

/// Circular stamp of a material, or an eraser
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub radius: u32,
    /// `None` erases
    pub material: Option<u16>,
    /// Chance that each covered empty cell gets filled
    pub fill_chance: f32,
}

impl Brush {
    pub const DEFAULT_RADIUS: u32 = 3;
    pub const DEFAULT_FILL_CHANCE: f32 = 0.7;

    pub fn new(material_id: u16, radius: u32) -> Self {
        Self {
            radius,
            material: Some(material_id),
            fill_chance: Self::DEFAULT_FILL_CHANCE,
        }
    }

    pub fn eraser(radius: u32) -> Self {
        Self {
            radius,
            material: None,
            fill_chance: Self::DEFAULT_FILL_CHANCE,
        }
    }

    pub fn with_fill_chance(self, fill_chance: f32) -> Self {
        Self {
            fill_chance: fill_chance.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.material.is_none()
    }

    /// Apply the brush once at `center`; returns the number of cells changed
    pub fn stamp<R: WorldRng>(&self, grid: &mut Grid<R>, center: IVec2) -> usize {
        let r = self.radius as i32;
        let mut changed = 0;

        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (center.x + dx, center.y + dy);
                match self.material {
                    None => {
                        if grid.remove(x, y).is_some() {
                            changed += 1;
                        }
                    }
                    Some(material_id) => {
                        if grid.in_bounds(x, y)
                            && grid.get(x, y).is_none()
                            && grid.rng_mut().check_probability(self.fill_chance)
                            && grid.create(x, y, material_id)
                        {
                            changed += 1;
                        }
                    }
                }
            }
        }

        changed
    }

    /// Stamp every cell of the line from `from` to `to`, both ends included
    pub fn stroke<R: WorldRng>(&self, grid: &mut Grid<R>, from: IVec2, to: IVec2) -> usize {
        let start = (from.x as isize, from.y as isize);
        let end = (to.x as isize, to.y as isize);

        let mut changed = 0;
        for (x, y) in Bresenham::new(start, end) {
            changed += self.stamp(grid, IVec2::new(x as i32, y as i32));
        }
        // Bresenham excludes the end point
        changed + self.stamp(grid, to)
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(MaterialId::SAND, Self::DEFAULT_RADIUS)
    }
}

/// Pointer state between press and release, so drags leave unbroken lines
#[derive(Clone, Copy, Debug, Default)]
pub struct BrushStroke {
    last: Option<IVec2>,
}

impl BrushStroke {
    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Pointer went down at `pos`
    pub fn press<R: WorldRng>(&mut self, brush: &Brush, grid: &mut Grid<R>, pos: IVec2) -> usize {
        self.last = Some(pos);
        brush.stamp(grid, pos)
    }

    /// Pointer moved to `pos`; paints only while pressed
    pub fn drag<R: WorldRng>(&mut self, brush: &Brush, grid: &mut Grid<R>, pos: IVec2) -> usize {
        let Some(last) = self.last else {
            return 0;
        };
        self.last = Some(pos);
        brush.stroke(grid, last, pos)
    }

    pub fn release(&mut self) {
        self.last = None;
    }
}
