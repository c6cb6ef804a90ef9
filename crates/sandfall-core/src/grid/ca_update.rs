//! Cellular automata update logic - material movement physics

use sandfall_simulation::{MaterialId, MaterialType, Materials};

use super::cells::CellBuffer;
use super::reactions::ReactionSystem;
use super::spawn;
use super::view::ORTHOGONAL;
use super::{SimStats, WorldRng};

const GAS_RISE_CHANCE: f32 = 0.8;
const GAS_DRIFT_CHANCE: f32 = 0.3;
const FIRE_RISE_CHANCE: f32 = 0.7;
const SMOKE_CHANCE: f32 = 0.1;
const PLANT_GROW_CHANCE: f32 = 0.3;
const PLANT_DRINK_CHANCE: f32 = 0.3;

/// Plant growth candidates, in preference order: up, left, right, up-left, up-right
const GROWTH_DIRECTIONS: [(i32, i32); 5] = [(0, -1), (-1, 0), (1, 0), (-1, -1), (1, -1)];

/// Cellular automata updater - handles material movement physics
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Update powder material (falls down, slides diagonally)
    pub fn update_powder<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let Some(id) = cells.material_at(x, y) else {
            return;
        };

        // Try to move down
        if Self::try_move(cells, x, y, x, y + 1, id, materials, stats) {
            return;
        }

        // Try diagonal (random side first)
        let dx = rng.gen_direction();
        if Self::try_move(cells, x, y, x + dx, y + 1, id, materials, stats) {
            return;
        }

        Self::try_move(cells, x, y, x - dx, y + 1, id, materials, stats);
    }

    /// Update liquid material (falls, slides, then spreads sideways)
    pub fn update_liquid<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let Some(id) = cells.material_at(x, y) else {
            return;
        };

        if Self::try_move(cells, x, y, x, y + 1, id, materials, stats) {
            return;
        }

        let dx = rng.gen_direction();
        if Self::try_move(cells, x, y, x + dx, y + 1, id, materials, stats) {
            return;
        }
        if Self::try_move(cells, x, y, x - dx, y + 1, id, materials, stats) {
            return;
        }

        let spread = 2 + rng.gen_below(2) as i32;
        for dir in [dx, -dx] {
            if Self::spread(cells, x, y, dir, spread, id, materials, stats) {
                return;
            }
        }
    }

    /// Move sideways into the first enterable cell within `distance`
    ///
    /// Occupied cells that can't be entered are skipped over; a solid or the
    /// edge of the grid ends the search.
    #[allow(clippy::too_many_arguments)]
    fn spread(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        dir: i32,
        distance: i32,
        id: u16,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> bool {
        for step in 1..=distance {
            let tx = x + dir * step;
            if Self::can_move_to(cells, tx, y, id, materials) {
                return Self::relocate(cells, x, y, tx, y, stats);
            }
            if !cells.in_bounds(tx, y) || Self::is_solid(cells, tx, y, materials) {
                return false;
            }
        }
        false
    }

    fn is_solid(cells: &CellBuffer, x: i32, y: i32, materials: &Materials) -> bool {
        cells
            .material_at(x, y)
            .and_then(|id| materials.get(id))
            .is_some_and(|def| def.material_type == MaterialType::Solid)
    }

    /// Update gas material (rises, drifts)
    pub fn update_gas<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let Some(id) = cells.material_at(x, y) else {
            return;
        };
        let dx = rng.gen_direction();

        if rng.check_probability(GAS_RISE_CHANCE)
            && Self::try_move_gas(cells, x, y, x, y - 1, id, materials, stats)
        {
            return;
        }

        if Self::try_move_gas(cells, x, y, x + dx, y - 1, id, materials, stats) {
            return;
        }

        if rng.check_probability(GAS_DRIFT_CHANCE) {
            Self::try_move_gas(cells, x, y, x + dx, y, id, materials, stats);
        }
    }

    /// Update fire (flickers, ignites neighbors, smokes, rises)
    pub fn update_fire<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let color = spawn::roll_color(materials, MaterialId::FIRE, rng);
        if let Some(cell) = cells.get_mut(x, y) {
            cell.color = color;
        }

        ReactionSystem::spread_fire(cells, x, y, materials, stats, rng);

        if rng.check_probability(SMOKE_CHANCE)
            && spawn::place(cells, x, y - 1, MaterialId::SMOKE, materials, rng)
        {
            stats.record_spawned();
        }

        let dx = rng.gen_direction();
        if rng.check_probability(FIRE_RISE_CHANCE)
            && Self::try_move_gas(cells, x, y, x, y - 1, MaterialId::FIRE, materials, stats)
        {
            return;
        }

        Self::try_move_gas(cells, x, y, x + dx, y - 1, MaterialId::FIRE, materials, stats);
    }

    /// Update plant (grows into free space while it has water)
    pub fn update_plant<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let has_water = ORTHOGONAL
            .iter()
            .any(|&(dx, dy)| cells.material_at(x + dx, y + dy) == Some(MaterialId::WATER));
        if !has_water {
            return;
        }

        let growth_rate = materials
            .get(MaterialId::PLANT)
            .map_or(0.0, |def| def.growth_rate);
        if !rng.check_probability(growth_rate) {
            return;
        }

        for (dx, dy) in GROWTH_DIRECTIONS {
            let (gx, gy) = (x + dx, y + dy);
            if !cells.is_empty_at(gx, gy) || !rng.check_probability(PLANT_GROW_CHANCE) {
                continue;
            }
            if spawn::place(cells, gx, gy, MaterialId::PLANT, materials, rng) {
                stats.record_spawned();
            }

            // Drink at most one adjacent water cell
            for (wx, wy) in ORTHOGONAL {
                if cells.material_at(x + wx, y + wy) == Some(MaterialId::WATER)
                    && rng.check_probability(PLANT_DRINK_CHANCE)
                {
                    cells.take(x + wx, y + wy);
                    break;
                }
            }
            return;
        }
    }

    /// Check if `id` can enter (x, y): empty, or displaceable by density
    ///
    /// A cell that already moved this tick can't be pushed again.
    pub fn can_move_to(cells: &CellBuffer, x: i32, y: i32, id: u16, materials: &Materials) -> bool {
        cells.in_bounds(x, y)
            && !cells.has_moved(x, y)
            && materials.can_displace(id, cells.material_at(x, y))
    }

    /// Check if a gas can enter (x, y): empty, or a denser gas it can rise through
    pub fn can_move_to_gas(
        cells: &CellBuffer,
        x: i32,
        y: i32,
        id: u16,
        materials: &Materials,
    ) -> bool {
        if !cells.in_bounds(x, y) {
            return false;
        }
        let Some(target) = cells.material_at(x, y) else {
            return true;
        };
        if cells.has_moved(x, y) {
            return false;
        }
        match (materials.get(id), materials.get(target)) {
            (Some(mover), Some(target)) => {
                target.material_type == MaterialType::Gas && mover.density < target.density
            }
            _ => false,
        }
    }

    /// Swap two slots, flag both occupants as moved and count the move
    pub(crate) fn relocate(
        cells: &mut CellBuffer,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        stats: &mut dyn SimStats,
    ) -> bool {
        if !cells.swap(from_x, from_y, to_x, to_y) {
            return false;
        }
        for (x, y) in [(from_x, from_y), (to_x, to_y)] {
            if let Some(cell) = cells.get_mut(x, y) {
                cell.moved = true;
            }
        }
        stats.record_cell_moved();
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn try_move(
        cells: &mut CellBuffer,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        id: u16,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> bool {
        Self::can_move_to(cells, to_x, to_y, id, materials)
            && Self::relocate(cells, from_x, from_y, to_x, to_y, stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn try_move_gas(
        cells: &mut CellBuffer,
        from_x: i32,
        from_y: i32,
        to_x: i32,
        to_y: i32,
        id: u16,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> bool {
        Self::can_move_to_gas(cells, to_x, to_y, id, materials)
            && Self::relocate(cells, from_x, from_y, to_x, to_y, stats)
    }
}
