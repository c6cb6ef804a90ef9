use sandfall_simulation::{CreatureParams, CreatureState, MaterialId};

use super::{Action, CreatureController, CreatureView};
use crate::grid::WorldRng;

/// How far a frog's tongue reaches
const PREY_RADIUS: i32 = 3;
const HOP_CHANCE: f32 = 0.1;
const MIN_HOP_HEIGHT: i32 = 2;
const MIN_HOP_DISTANCE: i32 = 1;
/// Number of distinct hop heights / distances (2-4 up, 1-3 across)
const HOP_VARIANTS: u32 = 3;

/// Sits around, eats ants within reach, hops
pub struct Frog;

impl Frog {
    /// First ant within reach, scanning rows top to bottom
    fn find_prey(view: &CreatureView<'_>) -> Option<(i32, i32)> {
        for dy in -PREY_RADIUS..=PREY_RADIUS {
            for dx in -PREY_RADIUS..=PREY_RADIUS {
                if (dx, dy) == (0, 0) || dx * dx + dy * dy > PREY_RADIUS * PREY_RADIUS {
                    continue;
                }
                if view.is(dx, dy, MaterialId::ANT) {
                    return Some((dx, dy));
                }
            }
        }
        None
    }

    /// Straight up `height` cells, then `distance` cells across at the apex
    fn hop_path_clear(view: &CreatureView<'_>, direction: i32, height: i32, distance: i32) -> bool {
        (1..=height).all(|h| view.is_open(0, -h))
            && (1..=distance).all(|s| view.is_open(direction * s, -height))
    }
}

impl CreatureController for Frog {
    fn decide<R: WorldRng>(
        &self,
        view: &CreatureView<'_>,
        state: &mut CreatureState,
        params: &CreatureParams,
        rng: &mut R,
    ) -> Action {
        if let Some((dx, dy)) = Self::find_prey(view) {
            if dx != 0 {
                state.direction = dx.signum();
            }
            return Action::Eat { dx, dy };
        }

        if !view.is_supported() {
            return Action::Idle;
        }
        if rng.check_probability(params.turn_chance) {
            return Action::Turn;
        }
        if !rng.check_probability(HOP_CHANCE) {
            return Action::Idle;
        }

        let height = MIN_HOP_HEIGHT + rng.gen_below(HOP_VARIANTS) as i32;
        let distance = MIN_HOP_DISTANCE + rng.gen_below(HOP_VARIANTS) as i32;
        let d = state.direction;
        if Self::hop_path_clear(view, d, height, distance) {
            Action::Leap {
                dx: d * distance,
                dy: -height,
            }
        } else {
            Action::Turn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

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

    fn grounded_frog(width: usize, height: usize, x: i32, y: i32) -> Grid<ScriptedRng> {
        let mut grid = Grid::with_rng(width, height, ScriptedRng(vec![0.5], 0));
        for fx in 0..width as i32 {
            grid.create(fx, y + 1, MaterialId::STONE);
        }
        grid.create(x, y, MaterialId::FROG);
        grid
    }

    fn decide(grid: &Grid<ScriptedRng>, x: i32, y: i32, rolls: Vec<f32>) -> (Action, CreatureState) {
        let params = grid.materials().get(MaterialId::FROG).unwrap().creature.unwrap();
        let mut state = grid.get(x, y).unwrap().creature.unwrap();
        state.direction = 1;
        let view = CreatureView::new(grid.view(), x, y);
        let action = Frog.decide(&view, &mut state, &params, &mut ScriptedRng(rolls, 0));
        (action, state)
    }

    #[test]
    fn test_eats_ant_and_faces_it() {
        let mut grid = grounded_frog(8, 6, 4, 4);
        grid.create(2, 3, MaterialId::ANT);

        let (action, state) = decide(&grid, 4, 4, vec![0.99]);
        assert_eq!(action, Action::Eat { dx: -2, dy: -1 });
        assert_eq!(state.direction, -1);
    }

    #[test]
    fn test_ignores_ants_out_of_reach() {
        let mut grid = grounded_frog(10, 6, 1, 4);
        grid.create(6, 4, MaterialId::ANT);

        let (action, _) = decide(&grid, 1, 4, vec![0.99]);
        assert_eq!(action, Action::Idle);
    }

    #[test]
    fn test_hops_when_path_is_clear() {
        let grid = grounded_frog(10, 8, 2, 6);

        // no turn, hop, height 2 + 2, distance 1 + 1
        let (action, _) = decide(&grid, 2, 6, vec![0.5, 0.0, 0.9, 0.5]);
        assert_eq!(action, Action::Leap { dx: 2, dy: -4 });
    }

    #[test]
    fn test_blocked_hop_turns_around() {
        let mut grid = grounded_frog(10, 8, 2, 6);
        grid.create(2, 3, MaterialId::STONE);

        let (action, _) = decide(&grid, 2, 6, vec![0.5, 0.0, 0.9, 0.5]);
        assert_eq!(action, Action::Turn);
    }

    #[test]
    fn test_no_hop_in_mid_air() {
        let mut grid = Grid::with_rng(5, 5, ScriptedRng(vec![0.5], 0));
        grid.create(2, 1, MaterialId::FROG);

        let (action, _) = decide(&grid, 2, 1, vec![0.0]);
        assert_eq!(action, Action::Idle);
    }
}
