use sandfall_simulation::{CreatureParams, CreatureState};

use super::{Action, CreatureController, CreatureView};
use crate::grid::WorldRng;

/// Walks along surfaces, steps down ledges, climbs single steps
pub struct Ant;

impl CreatureController for Ant {
    fn decide<R: WorldRng>(
        &self,
        view: &CreatureView<'_>,
        state: &mut CreatureState,
        params: &CreatureParams,
        rng: &mut R,
    ) -> Action {
        if rng.check_probability(params.turn_chance) {
            return Action::Turn;
        }

        let d = state.direction;
        if view.is_open(d, 0) {
            // Follow the ground down one step instead of walking off it
            if view.is_open(d, 1) && !view.is_open(d, 2) {
                return Action::Move { dx: d, dy: 1 };
            }
            return Action::Move { dx: d, dy: 0 };
        }

        if view.is_open(d, -1) && view.is_open(0, -1) {
            return Action::Move { dx: d, dy: -1 };
        }

        Action::Turn
    }
}
