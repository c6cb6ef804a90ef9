//! Cell types
//!
//! One `Cell` per occupied grid slot; empty slots hold no cell at all.

use serde::{Deserialize, Serialize};

use crate::{CreatureParams, MaterialDef};

/// Mutable per-creature state
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureState {
    /// Capped at the species' `max_health`; the creature dies at 0
    pub health: f32,
    /// Facing, -1 (left) or 1 (right)
    pub direction: i32,
    /// Ticks left before the next discrete action
    pub action_cooldown: u32,
    /// Birds only: last decision was to flap, which suspends gravity
    pub flying: bool,
}

impl CreatureState {
    pub fn new(params: &CreatureParams, direction: i32) -> Self {
        Self {
            health: params.max_health,
            direction: if direction < 0 { -1 } else { 1 },
            action_cooldown: 0,
            flying: false,
        }
    }

    /// Flip the facing direction
    pub fn turn(&mut self) {
        self.direction = -self.direction;
    }
}

/// A single particle on the grid
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Material ID (can change at runtime, e.g. wood -> fire)
    pub material_id: u16,
    /// Display color picked from the material's palette
    pub color: [u8; 4],
    /// Already processed this tick
    pub updated: bool,
    /// Already relocated this tick, by its own rule or by being displaced
    pub moved: bool,
    /// Remaining ticks (None = infinite)
    pub lifetime: Option<u32>,
    /// Consecutive ticks spent in free-fall (creatures)
    pub fall_distance: u32,
    /// Present for creature materials only
    pub creature: Option<CreatureState>,
}

impl Cell {
    /// Fresh cell with the material's default lifetime and creature state
    pub fn new(material: &MaterialDef, color: [u8; 4], direction: i32) -> Self {
        Self {
            material_id: material.id,
            color,
            updated: false,
            moved: false,
            lifetime: material.lifetime,
            fall_distance: 0,
            creature: material
                .creature
                .as_ref()
                .map(|params| CreatureState::new(params, direction)),
        }
    }

    /// Turn this cell into another material in place
    ///
    /// The `updated` flag is kept so a transmuted cell is not processed a
    /// second time in the same tick. Creature state survives only if the new
    /// material is a creature too.
    pub fn transmute(&mut self, material: &MaterialDef, color: [u8; 4], lifetime: Option<u32>) {
        self.material_id = material.id;
        self.color = color;
        self.lifetime = lifetime;
        self.fall_distance = 0;
        self.creature = match (&material.creature, self.creature) {
            (Some(_), Some(state)) => Some(state),
            (Some(params), None) => Some(CreatureState::new(params, 1)),
            (None, _) => None,
        };
    }

    pub fn is_creature(&self) -> bool {
        self.creature.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaterialId, Materials};

    #[test]
    fn test_new_cell_uses_default_lifetime() {
        let materials = Materials::new();
        let steam = materials.get(MaterialId::STEAM).unwrap();
        let cell = Cell::new(steam, [0; 4], 1);
        assert_eq!(cell.lifetime, Some(120));
        assert!(!cell.updated);
        assert!(!cell.moved);
        assert!(!cell.is_creature());

        let stone = materials.get(MaterialId::STONE).unwrap();
        assert_eq!(Cell::new(stone, [0; 4], 1).lifetime, None);
    }

    #[test]
    fn test_new_creature_cell() {
        let materials = Materials::new();
        let ant = materials.get(MaterialId::ANT).unwrap();
        let cell = Cell::new(ant, [0; 4], -7);

        let state = cell.creature.unwrap();
        assert_eq!(state.health, ant.creature.unwrap().max_health);
        assert_eq!(state.direction, -1);
        assert_eq!(state.action_cooldown, 0);
        assert_eq!(cell.fall_distance, 0);
    }

    #[test]
    fn test_transmute_keeps_updated_and_drops_creature() {
        let materials = Materials::new();
        let mut cell = Cell::new(materials.get(MaterialId::FROG).unwrap(), [0; 4], 1);
        cell.updated = true;
        cell.fall_distance = 3;

        let fire = materials.get(MaterialId::FIRE).unwrap();
        cell.transmute(fire, [1, 2, 3, 255], Some(75));

        assert_eq!(cell.material_id, MaterialId::FIRE);
        assert_eq!(cell.color, [1, 2, 3, 255]);
        assert_eq!(cell.lifetime, Some(75));
        assert!(cell.updated);
        assert!(cell.creature.is_none());
        assert_eq!(cell.fall_distance, 0);
    }

    #[test]
    fn test_turn_flips_direction() {
        let materials = Materials::new();
        let params = materials.get(MaterialId::ANT).unwrap().creature.unwrap();
        let mut state = CreatureState::new(&params, 1);
        state.turn();
        assert_eq!(state.direction, -1);
        state.turn();
        assert_eq!(state.direction, 1);
    }
}
