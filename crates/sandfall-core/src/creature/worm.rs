use sandfall_simulation::{CreatureParams, CreatureState, MaterialId};

use super::{Action, CreatureController, CreatureView, Gravity};
use crate::grid::{ORTHOGONAL, WorldRng};

/// Burrow candidates relative to facing: forward, forward-down, down, forward-up
const BURROW_MOVES: [(i32, i32); 4] = [(1, 0), (1, 1), (0, 1), (1, -1)];

/// Tunnels through sand, crawls when it can't
pub struct Worm;

impl CreatureController for Worm {
    fn gravity(&self, view: &CreatureView<'_>, _state: &CreatureState) -> Gravity {
        if view.any_neighbor(&ORTHOGONAL, MaterialId::SAND) {
            Gravity::None
        } else {
            Gravity::Full
        }
    }

    fn decide<R: WorldRng>(
        &self,
        view: &CreatureView<'_>,
        state: &mut CreatureState,
        params: &CreatureParams,
        rng: &mut R,
    ) -> Action {
        let d = state.direction;
        let (mx, my) = BURROW_MOVES[rng.gen_below(BURROW_MOVES.len() as u32) as usize];
        let (dx, dy) = (mx * d, my);
        if view.is(dx, dy, MaterialId::SAND) {
            return Action::Swap { dx, dy };
        }

        if view.is_open(d, 0) {
            return Action::Move { dx: d, dy: 0 };
        }
        if rng.check_probability(params.turn_chance) {
            return Action::Turn;
        }
        Action::Idle
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

    fn sandbox(width: usize, height: usize) -> Grid<ScriptedRng> {
        let mut grid = Grid::with_rng(width, height, ScriptedRng(vec![0.5], 0));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                grid.create(x, y, MaterialId::SAND);
            }
        }
        grid
    }

    fn decide(grid: &Grid<ScriptedRng>, x: i32, y: i32, rolls: Vec<f32>) -> Action {
        let params = grid.materials().get(MaterialId::WORM).unwrap().creature.unwrap();
        let mut state = grid.get(x, y).unwrap().creature.unwrap();
        state.direction = 1;
        let view = CreatureView::new(grid.view(), x, y);
        Worm.decide(&view, &mut state, &params, &mut ScriptedRng(rolls, 0))
    }

    #[test]
    fn test_burrows_through_sand() {
        let mut grid = sandbox(5, 5);
        grid.remove(2, 2);
        grid.create(2, 2, MaterialId::WORM);

        // 0.6 * 4 -> index 2, straight down
        assert_eq!(decide(&grid, 2, 2, vec![0.6]), Action::Swap { dx: 0, dy: 1 });

        let view = CreatureView::new(grid.view(), 2, 2);
        let state = grid.get(2, 2).unwrap().creature.unwrap();
        assert_eq!(Worm.gravity(&view, &state), Gravity::None);
    }

    #[test]
    fn test_crawls_forward_without_sand() {
        let mut grid = Grid::with_rng(5, 3, ScriptedRng(vec![0.5], 0));
        for x in 0..5 {
            grid.create(x, 2, MaterialId::STONE);
        }
        grid.create(1, 1, MaterialId::WORM);

        assert_eq!(decide(&grid, 1, 1, vec![0.0]), Action::Move { dx: 1, dy: 0 });

        let view = CreatureView::new(grid.view(), 1, 1);
        let state = grid.get(1, 1).unwrap().creature.unwrap();
        assert_eq!(Worm.gravity(&view, &state), Gravity::Full);
    }

    #[test]
    fn test_blocked_worm_sometimes_turns() {
        let mut grid = Grid::with_rng(2, 2, ScriptedRng(vec![0.5], 0));
        grid.create(0, 1, MaterialId::STONE);
        grid.create(1, 1, MaterialId::STONE);
        grid.create(1, 0, MaterialId::STONE);
        grid.create(0, 0, MaterialId::WORM);

        assert_eq!(decide(&grid, 0, 0, vec![0.0, 0.1]), Action::Turn);
        assert_eq!(decide(&grid, 0, 0, vec![0.0, 0.9]), Action::Idle);
    }
}
