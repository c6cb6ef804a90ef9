use sandfall_simulation::{CreatureParams, CreatureState};

use super::{Action, CreatureController, CreatureView, Gravity};
use crate::grid::WorldRng;

const FLAP_CHANCE: f32 = 0.8;
/// Chance per tick that a gliding bird drops a cell
const GLIDE_SINK_CHANCE: f32 = 0.5;

/// Flight moves relative to facing: up, forward-up, forward (forward-up twice as likely)
const FLIGHT_MOVES: [(i32, i32); 4] = [(0, -1), (1, -1), (1, -1), (1, 0)];

/// Flaps about, glides down when it stops flapping
pub struct Bird;

impl CreatureController for Bird {
    fn gravity(&self, _view: &CreatureView<'_>, state: &CreatureState) -> Gravity {
        if state.flying {
            Gravity::None
        } else {
            Gravity::Light(GLIDE_SINK_CHANCE)
        }
    }

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
        if rng.check_probability(FLAP_CHANCE) {
            state.flying = true;
            let (mx, my) = FLIGHT_MOVES[rng.gen_below(FLIGHT_MOVES.len() as u32) as usize];
            let (dx, dy) = (mx * d, my);
            if view.is_open(dx, dy) {
                return Action::Move { dx, dy };
            }
            if dx != 0 {
                return Action::Turn;
            }
            return Action::Idle;
        }

        state.flying = false;
        if view.is_open(d, 1) {
            Action::Move { dx: d, dy: 1 }
        } else {
            Action::Idle
        }
    }
}
