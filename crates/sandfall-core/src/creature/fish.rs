use sandfall_simulation::{CreatureParams, CreatureState, MaterialId};

use super::{Action, CreatureController, CreatureView, Gravity};
use crate::grid::{SURROUNDING, WorldRng};

/// Health lost per tick out of water
const SUFFOCATION_RATE: f32 = 0.02;
/// Health regained per tick in water
const RECOVERY_RATE: f32 = 0.01;

/// Swim candidates relative to facing: forward, forward-up, forward-down, up, down
const SWIM_MOVES: [(i32, i32, u32); 5] = [(1, 0, 4), (1, -1, 2), (1, 1, 2), (0, -1, 1), (0, 1, 1)];

/// Swims through water, suffocates on land
pub struct Fish;

fn in_water(view: &CreatureView<'_>) -> bool {
    view.any_neighbor(&SURROUNDING, MaterialId::WATER)
}

impl CreatureController for Fish {
    fn gravity(&self, view: &CreatureView<'_>, _state: &CreatureState) -> Gravity {
        if in_water(view) {
            Gravity::None
        } else {
            Gravity::Full
        }
    }

    fn metabolize(&self, view: &CreatureView<'_>, state: &mut CreatureState, params: &CreatureParams) {
        if in_water(view) {
            state.health = (state.health + RECOVERY_RATE).min(params.max_health);
        } else {
            state.health -= SUFFOCATION_RATE;
        }
    }

    fn decide<R: WorldRng>(
        &self,
        view: &CreatureView<'_>,
        state: &mut CreatureState,
        params: &CreatureParams,
        rng: &mut R,
    ) -> Action {
        // Flopping on land
        if !in_water(view) {
            return Action::Idle;
        }
        if rng.check_probability(params.turn_chance) {
            return Action::Turn;
        }

        let total: u32 = SWIM_MOVES.iter().map(|&(_, _, weight)| weight).sum();
        let mut roll = rng.gen_below(total);
        let mut choice = SWIM_MOVES[0];
        for candidate in SWIM_MOVES {
            if roll < candidate.2 {
                choice = candidate;
                break;
            }
            roll -= candidate.2;
        }

        let (dx, dy) = (choice.0 * state.direction, choice.1);
        if view.is(dx, dy, MaterialId::WATER) {
            Action::Swap { dx, dy }
        } else if dx != 0 {
            Action::Turn
        } else {
            Action::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    /// Replays rolls in order, then repeats the last one
    struct ScriptedRng(Vec<f32>, usize);

    impl WorldRng for ScriptedRng {
        fn gen_bool(&mut self) -> bool {
            false
        }

        fn gen_f32(&mut self) -> f32 {
            let roll = self.0[self.1.min(self.0.len() - 1)];
            self.1 += 1;
            roll
        }
    }

    fn pond(width: usize, height: usize) -> Grid<ScriptedRng> {
        let mut grid = Grid::with_rng(width, height, ScriptedRng(vec![0.99], 0));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                grid.create(x, y, MaterialId::WATER);
            }
        }
        grid
    }

    fn fish_state(grid: &Grid<ScriptedRng>, x: i32, y: i32) -> (CreatureState, CreatureParams) {
        let params = grid.materials().get(MaterialId::FISH).unwrap().creature.unwrap();
        (grid.get(x, y).unwrap().creature.unwrap(), params)
    }

    #[test]
    fn test_swims_forward_through_water() {
        let mut grid = pond(5, 5);
        grid.remove(2, 2);
        grid.create(2, 2, MaterialId::FISH);
        let (mut state, params) = fish_state(&grid, 2, 2);
        state.direction = 1;

        // No turn, weighted roll lands on "forward"
        let mut rng = ScriptedRng(vec![0.99, 0.0], 0);
        let view = CreatureView::new(grid.view(), 2, 2);
        assert_eq!(Fish.decide(&view, &mut state, &params, &mut rng), Action::Swap { dx: 1, dy: 0 });
        assert_eq!(Fish.gravity(&view, &state), Gravity::None);
    }

    #[test]
    fn test_turns_at_the_bank() {
        let mut grid = pond(3, 3);
        grid.remove(2, 1);
        grid.create(2, 1, MaterialId::FISH);
        let (mut state, params) = fish_state(&grid, 2, 1);
        state.direction = 1;

        let mut rng = ScriptedRng(vec![0.99, 0.0], 0);
        let view = CreatureView::new(grid.view(), 2, 1);
        assert_eq!(Fish.decide(&view, &mut state, &params, &mut rng), Action::Turn);
    }

    #[test]
    fn test_suffocates_out_of_water() {
        let mut grid = Grid::with_rng(3, 3, ScriptedRng(vec![0.5], 0));
        grid.create(1, 1, MaterialId::FISH);
        let (mut state, params) = fish_state(&grid, 1, 1);

        let view = CreatureView::new(grid.view(), 1, 1);
        Fish.metabolize(&view, &mut state, &params);
        assert!((state.health - (params.max_health - SUFFOCATION_RATE)).abs() < 1e-6);
        assert_eq!(Fish.gravity(&view, &state), Gravity::Full);
        assert_eq!(
            Fish.decide(&view, &mut state, &params, &mut ScriptedRng(vec![0.0], 0)),
            Action::Idle
        );
    }

    #[test]
    fn test_recovers_in_water_up_to_max() {
        let mut grid = pond(3, 3);
        grid.remove(1, 1);
        grid.create(1, 1, MaterialId::FISH);
        let (mut state, params) = fish_state(&grid, 1, 1);
        state.health = params.max_health - 0.005;

        let view = CreatureView::new(grid.view(), 1, 1);
        Fish.metabolize(&view, &mut state, &params);
        assert_eq!(state.health, params.max_health);
    }
}
