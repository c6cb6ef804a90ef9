//! Creating and transmuting cells

use sandfall_simulation::{Cell, Materials};

use super::WorldRng;
use super::cells::CellBuffer;

/// Shown for materials without a palette
const MISSING_COLOR: [u8; 4] = [255, 0, 255, 255];

pub(crate) fn roll_color<R: WorldRng>(materials: &Materials, id: u16, rng: &mut R) -> [u8; 4] {
    materials
        .color_for(id, rng.gen_f32())
        .unwrap_or(MISSING_COLOR)
}

/// Fresh cell of a placeable material; creatures get a random facing
pub(crate) fn spawn<R: WorldRng>(materials: &Materials, id: u16, rng: &mut R) -> Option<Cell> {
    let def = materials.get(id).filter(|def| def.is_placeable())?;
    let color = roll_color(materials, id, rng);
    let direction = if def.creature.is_some() {
        rng.gen_direction()
    } else {
        1
    };
    Some(Cell::new(def, color, direction))
}

/// Put a new cell into an empty in-bounds slot
pub(crate) fn place<R: WorldRng>(
    cells: &mut CellBuffer,
    x: i32,
    y: i32,
    id: u16,
    materials: &Materials,
    rng: &mut R,
) -> bool {
    if !cells.is_empty_at(x, y) {
        return false;
    }
    match spawn(materials, id, rng) {
        Some(cell) => {
            cells.set(x, y, Some(cell));
            true
        }
        None => false,
    }
}

/// Turn the cell at (x, y) into `id` with that material's default lifetime
///
/// The `updated` flag is left alone: a product in a slot the scan hasn't
/// reached yet still acts this tick.
pub(crate) fn transmute<R: WorldRng>(
    cells: &mut CellBuffer,
    x: i32,
    y: i32,
    id: u16,
    materials: &Materials,
    rng: &mut R,
) -> bool {
    let Some(def) = materials.get(id) else {
        return false;
    };
    let color = roll_color(materials, id, rng);
    match cells.get_mut(x, y) {
        Some(cell) => {
            cell.transmute(def, color, def.lifetime);
            true
        }
        None => false,
    }
}
