//! The simulation grid

use ahash::AHashMap;
use glam::IVec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sandfall_simulation::{Behavior, Cell, Materials};

use super::ca_update::CellularAutomataUpdater;
use super::cells::CellBuffer;
use super::reactions::ReactionSystem;
use super::{GridError, GridView, NoopStats, SimStats, WorldRng, spawn};
use crate::creature::{Ant, Bird, CreatureSystem, Fish, Frog, Worm};

/// Fixed-size 2D field of cells plus everything needed to advance it
pub struct Grid<R: WorldRng = Xoshiro256PlusPlus> {
    cells: CellBuffer,
    materials: Materials,
    pixel_size: u32,
    frame_count: u64,
    rng: R,
}

impl Grid {
    /// Grid with an entropy-seeded generator
    pub fn new(width: usize, height: usize) -> Self {
        Self::seeded(width, height, rand::random())
    }

    /// Grid whose runs are reproducible for a given seed
    pub fn seeded(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, Xoshiro256PlusPlus::seed_from_u64(seed))
    }
}

impl<R: WorldRng> Grid<R> {
    pub fn with_rng(width: usize, height: usize, rng: R) -> Self {
        Self {
            cells: CellBuffer::new(width, height),
            materials: Materials::new(),
            pixel_size: 1,
            frame_count: 0,
            rng,
        }
    }

    /// Grid covering a display of `pixel_width` x `pixel_height` screen pixels
    pub fn from_display_size(
        pixel_width: u32,
        pixel_height: u32,
        pixel_size: u32,
        rng: R,
    ) -> Result<Self, GridError> {
        if pixel_size == 0 {
            return Err(GridError::ZeroPixelSize);
        }
        let width = (pixel_width / pixel_size) as usize;
        let height = (pixel_height / pixel_size) as usize;
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid {
                width: pixel_width,
                height: pixel_height,
                pixel_size,
            });
        }

        let mut grid = Self::with_rng(width, height, rng);
        grid.pixel_size = pixel_size;
        log::debug!(
            "Grid {}x{} cells for a {}x{} display at {}px",
            width,
            height,
            pixel_width,
            pixel_height,
            pixel_size
        );
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Number of completed steps
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.cells.in_bounds(x, y)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cells.get(x, y)
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.cells.get_mut(x, y)
    }

    pub fn material_at(&self, x: i32, y: i32) -> Option<u16> {
        self.cells.material_at(x, y)
    }

    /// Overwrite a slot with a prepared cell; out of range is a no-op
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        self.cells.set(x, y, Some(cell));
    }

    /// Empty a slot; out of range is a no-op
    pub fn remove(&mut self, x: i32, y: i32) -> Option<Cell> {
        self.cells.take(x, y)
    }

    /// Place a fresh cell of `material_id` into an empty slot
    ///
    /// Returns false when out of bounds, occupied, or the material is
    /// unknown or not placeable.
    pub fn create(&mut self, x: i32, y: i32, material_id: u16) -> bool {
        spawn::place(
            &mut self.cells,
            x,
            y,
            material_id,
            &self.materials,
            &mut self.rng,
        )
    }

    /// Exchange two slots; false if either is out of range
    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        self.cells.swap(x1, y1, x2, y2)
    }

    /// Draw a palette color for a material
    pub fn color_for(&mut self, material_id: u16) -> [u8; 4] {
        spawn::roll_color(&self.materials, material_id, &mut self.rng)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        log::debug!("Grid cleared");
    }

    /// Reallocate for a new display size, keeping the overlapping region
    pub fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
        let width = (pixel_width / self.pixel_size) as usize;
        let height = (pixel_height / self.pixel_size) as usize;
        if width == self.width() && height == self.height() {
            return;
        }
        log::debug!(
            "Resizing grid {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        self.cells = self.cells.resized(width, height);
    }

    /// Map a display position to cell coordinates (may be out of bounds)
    pub fn to_cell(&self, pixel_x: f32, pixel_y: f32) -> IVec2 {
        let size = self.pixel_size as f32;
        IVec2::new(
            (pixel_x / size).floor() as i32,
            (pixel_y / size).floor() as i32,
        )
    }

    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, &self.materials)
    }

    /// Occupied cell count
    pub fn particle_count(&self) -> usize {
        self.cells.iter().count()
    }

    /// Occupied cell count per material
    pub fn material_counts(&self) -> AHashMap<u16, usize> {
        let mut counts = AHashMap::new();
        for (_, _, cell) in self.cells.iter() {
            *counts.entry(cell.material_id).or_insert(0) += 1;
        }
        counts
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) {
        self.step_with_stats(&mut NoopStats);
    }

    /// Advance by one tick, reporting events to `stats`
    pub fn step_with_stats(&mut self, stats: &mut dyn SimStats) {
        self.frame_count += 1;
        self.cells.reset_tick_flags();

        let width = self.width() as i32;
        let left_to_right = self.frame_count % 2 == 0;

        // Bottom to top so falling cells land before the row above moves
        for y in (0..self.height() as i32).rev() {
            for i in 0..width {
                let x = if left_to_right { i } else { width - 1 - i };
                self.update_cell(x, y, stats);
            }
        }
    }

    fn update_cell(&mut self, x: i32, y: i32, stats: &mut dyn SimStats) {
        let Some(cell) = self.cells.get_mut(x, y) else {
            return;
        };
        if cell.updated {
            return;
        }
        cell.updated = true;

        if let Some(lifetime) = cell.lifetime
            && lifetime > 0
        {
            cell.lifetime = Some(lifetime - 1);
            if lifetime == 1 {
                self.cells.take(x, y);
                stats.record_expired();
                return;
            }
        }

        ReactionSystem::resolve(&mut self.cells, x, y, &self.materials, stats, &mut self.rng);

        // Reactions may have changed what this cell is
        let Some(behavior) = self
            .cells
            .material_at(x, y)
            .and_then(|id| self.materials.get(id))
            .map(|def| def.behavior)
        else {
            return;
        };

        let cells = &mut self.cells;
        let materials = &self.materials;
        let rng = &mut self.rng;
        match behavior {
            Behavior::Static => {}
            Behavior::Fall => {
                CellularAutomataUpdater::update_powder(cells, x, y, materials, stats, rng)
            }
            Behavior::Liquid => {
                CellularAutomataUpdater::update_liquid(cells, x, y, materials, stats, rng)
            }
            Behavior::Gas => CellularAutomataUpdater::update_gas(cells, x, y, materials, stats, rng),
            Behavior::Fire => {
                CellularAutomataUpdater::update_fire(cells, x, y, materials, stats, rng)
            }
            Behavior::Plant => {
                CellularAutomataUpdater::update_plant(cells, x, y, materials, stats, rng)
            }
            Behavior::Ant => CreatureSystem::update(cells, x, y, &Ant, materials, stats, rng),
            Behavior::Fish => CreatureSystem::update(cells, x, y, &Fish, materials, stats, rng),
            Behavior::Bird => CreatureSystem::update(cells, x, y, &Bird, materials, stats, rng),
            Behavior::Frog => CreatureSystem::update(cells, x, y, &Frog, materials, stats, rng),
            Behavior::Worm => CreatureSystem::update(cells, x, y, &Worm, materials, stats, rng),
        }
    }
}
