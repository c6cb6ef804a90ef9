//! Critters living on the grid
//!
//! Every species runs through the same pipeline each tick:
//! cooldown, metabolism, landing (fall damage), gravity, then a discrete
//! action chosen by the species' [`CreatureController`]. Species only decide;
//! moving, eating and dying are carried out here.

mod ant;
mod bird;
mod fish;
mod frog;
mod worm;

pub use ant::Ant;
pub use bird::Bird;
pub use fish::Fish;
pub use frog::Frog;
pub use worm::Worm;

use sandfall_simulation::{CreatureParams, CreatureState, MaterialId, Materials};

use crate::grid::cells::CellBuffer;
use crate::grid::{CellularAutomataUpdater, GridView, SimStats, WorldRng, spawn};

/// Radius of the blood splatter left by a dead creature
pub const SPLATTER_RADIUS: i32 = 2;
const SPLATTER_CHANCE: f32 = 0.4;

/// How gravity treats a creature this tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gravity {
    /// Falls whenever unsupported
    Full,
    /// Falls with the given probability per tick
    Light(f32),
    /// Held up (swimming, flying, clinging to sand)
    None,
}

/// A discrete decision, relative to the creature's position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Idle,
    /// Flip facing
    Turn,
    /// Step into an open cell
    Move { dx: i32, dy: i32 },
    /// Trade places with a medium (water for fish, sand for worms)
    Swap { dx: i32, dy: i32 },
    /// Remove the prey cell at the offset
    Eat { dx: i32, dy: i32 },
    /// Jump to an open cell along a path the controller already checked
    Leap { dx: i32, dy: i32 },
}

/// What a controller can see: the grid, relative to the creature
#[derive(Clone, Copy)]
pub struct CreatureView<'a> {
    grid: GridView<'a>,
    x: i32,
    y: i32,
}

impl<'a> CreatureView<'a> {
    pub fn new(grid: GridView<'a>, x: i32, y: i32) -> Self {
        Self { grid, x, y }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn material_at(&self, dx: i32, dy: i32) -> Option<u16> {
        self.grid.material_at(self.x + dx, self.y + dy)
    }

    pub fn is(&self, dx: i32, dy: i32, material_id: u16) -> bool {
        self.material_at(dx, dy) == Some(material_id)
    }

    /// Passable: in bounds and empty or gas
    pub fn is_open(&self, dx: i32, dy: i32) -> bool {
        self.grid.is_open(self.x + dx, self.y + dy)
    }

    /// Standing on something (the cell below is not open)
    pub fn is_supported(&self) -> bool {
        !self.is_open(0, 1)
    }

    pub fn any_neighbor(&self, offsets: &[(i32, i32)], material_id: u16) -> bool {
        self.grid.any_neighbor(self.x, self.y, offsets, material_id)
    }
}

/// Species-specific decisions
pub trait CreatureController {
    /// Gravity policy for this tick
    fn gravity(&self, _view: &CreatureView<'_>, _state: &CreatureState) -> Gravity {
        Gravity::Full
    }

    /// Health upkeep; runs every tick before anything else
    fn metabolize(
        &self,
        _view: &CreatureView<'_>,
        _state: &mut CreatureState,
        _params: &CreatureParams,
    ) {
    }

    /// Choose the next action; only called when the cooldown has run out
    fn decide<R: WorldRng>(
        &self,
        view: &CreatureView<'_>,
        state: &mut CreatureState,
        params: &CreatureParams,
        rng: &mut R,
    ) -> Action;
}

/// Runs the shared creature pipeline
pub(crate) struct CreatureSystem;

impl CreatureSystem {
    pub fn update<C: CreatureController, R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        controller: &C,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let Some(cell) = cells.get(x, y).copied() else {
            return;
        };
        let Some(mut state) = cell.creature else {
            return;
        };
        let Some(params) = materials.get(cell.material_id).and_then(|def| def.creature) else {
            return;
        };
        let mut fall_distance = cell.fall_distance;

        state.action_cooldown = state.action_cooldown.saturating_sub(1);

        let view = CreatureView::new(GridView::new(cells, materials), x, y);
        controller.metabolize(&view, &mut state, &params);
        if state.health <= 0.0 {
            Self::kill(cells, x, y, materials, stats, rng);
            return;
        }

        let supported = view.is_supported();
        let gravity = controller.gravity(&view, &state);
        if gravity == Gravity::None {
            // Suspended creatures aren't falling
            fall_distance = 0;
        } else if supported && fall_distance > 0 {
            if fall_distance >= params.fall_damage_threshold {
                log::debug!("creature at ({}, {}) died after falling {} cells", x, y, fall_distance);
                Self::kill(cells, x, y, materials, stats, rng);
                return;
            }
            fall_distance = 0;
        }

        if !supported {
            let falls = match gravity {
                Gravity::Full => true,
                Gravity::Light(chance) => rng.check_probability(chance),
                Gravity::None => false,
            };
            if falls {
                if cells.has_moved(x, y + 1) {
                    // Held up for a tick by gas that already moved
                    Self::store(cells, x, y, state, fall_distance);
                } else {
                    Self::store(cells, x, y, state, fall_distance + 1);
                    CellularAutomataUpdater::relocate(cells, x, y, x, y + 1, stats);
                }
                return;
            }
        }

        if state.action_cooldown > 0 {
            Self::store(cells, x, y, state, fall_distance);
            return;
        }

        let action = controller.decide(&view, &mut state, &params, rng);
        Self::store(cells, x, y, state, fall_distance);

        if let Some((cx, cy)) = Self::execute(cells, x, y, action, materials, stats)
            && let Some(state) = cells.get_mut(cx, cy).and_then(|cell| cell.creature.as_mut())
        {
            state.action_cooldown = params.action_cooldown;
        }
    }

    /// Carry out an action; returns where the creature ended up if it acted
    fn execute(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        action: Action,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> Option<(i32, i32)> {
        match action {
            Action::Idle => None,
            Action::Turn => {
                let state = cells.get_mut(x, y)?.creature.as_mut()?;
                state.turn();
                Some((x, y))
            }
            Action::Move { dx, dy } | Action::Leap { dx, dy } => {
                let (tx, ty) = (x + dx, y + dy);
                let open =
                    GridView::new(cells, materials).is_open(tx, ty) && !cells.has_moved(tx, ty);
                (open && CellularAutomataUpdater::relocate(cells, x, y, tx, ty, stats))
                    .then_some((tx, ty))
            }
            Action::Swap { dx, dy } => {
                let (tx, ty) = (x + dx, y + dy);
                (!cells.has_moved(tx, ty)
                    && CellularAutomataUpdater::relocate(cells, x, y, tx, ty, stats))
                .then_some((tx, ty))
            }
            Action::Eat { dx, dy } => {
                let prey = cells.take(x + dx, y + dy)?;
                log::debug!(
                    "material {} at ({}, {}) eaten",
                    prey.material_id,
                    x + dx,
                    y + dy
                );
                stats.record_death();
                Some((x, y))
            }
        }
    }

    fn store(cells: &mut CellBuffer, x: i32, y: i32, state: CreatureState, fall_distance: u32) {
        if let Some(cell) = cells.get_mut(x, y) {
            cell.creature = Some(state);
            cell.fall_distance = fall_distance;
        }
    }

    /// Remove the creature and splatter blood around where it died
    pub fn kill<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        if cells.take(x, y).is_none() {
            return;
        }
        stats.record_death();
        spawn::place(cells, x, y, MaterialId::BLOOD, materials, rng);

        let r = SPLATTER_RADIUS;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx, dy) == (0, 0) || dx * dx + dy * dy > r * r {
                    continue;
                }
                if cells.is_empty_at(x + dx, y + dy) && rng.check_probability(SPLATTER_CHANCE) {
                    spawn::place(cells, x + dx, y + dy, MaterialId::BLOOD, materials, rng);
                }
            }
        }
    }
}
