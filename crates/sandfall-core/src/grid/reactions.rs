//! Neighbor reactions and fire spread

use sandfall_simulation::{MaterialId, Materials};

use super::cells::CellBuffer;
use super::spawn;
use super::view::{ORTHOGONAL, SURROUNDING};
use super::{SimStats, WorldRng};

/// Chance per tick that fire boils an adjacent water cell
const BOIL_CHANCE: f32 = 0.1;
/// Chance per tick that lava lights an adjacent flammable cell
const LAVA_IGNITE_CHANCE: f32 = 0.2;
const LAVA_BURN_TIME_SPREAD: u32 = 40;

/// Handles contact reactions (water/lava/fire) and ignition
pub struct ReactionSystem;

impl ReactionSystem {
    /// Resolve reactions between the cell at (x, y) and its 4-neighborhood
    ///
    /// Neighbors are visited left, right, up, down. Water meeting lava takes
    /// precedence over everything else and ends resolution for this cell.
    pub fn resolve<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let Some(origin) = cells.material_at(x, y) else {
            return;
        };

        if let Some((water, lava)) = Self::find_quench(cells, x, y, origin) {
            Self::quench(cells, water, lava, materials, rng);
            stats.record_reaction();
            return;
        }

        for (dx, dy) in ORTHOGONAL {
            let (nx, ny) = (x + dx, y + dy);
            let Some(neighbor) = cells.material_at(nx, ny) else {
                continue;
            };

            match (origin, neighbor) {
                (MaterialId::WATER, MaterialId::FIRE) => {
                    cells.take(nx, ny);
                    spawn::place(cells, nx, ny, MaterialId::STEAM, materials, rng);
                    stats.record_reaction();
                }
                (MaterialId::FIRE, MaterialId::WATER) => {
                    if rng.check_probability(BOIL_CHANCE)
                        && spawn::transmute(cells, nx, ny, MaterialId::STEAM, materials, rng)
                    {
                        stats.record_reaction();
                    }
                }
                (MaterialId::LAVA, _) => {
                    let flammable = materials.get(neighbor).is_some_and(|def| def.flammable);
                    if flammable && rng.check_probability(LAVA_IGNITE_CHANCE) {
                        Self::ignite(cells, nx, ny, LAVA_BURN_TIME_SPREAD, materials, rng);
                        stats.record_reaction();
                    }
                }
                _ => {}
            }
        }
    }

    /// First water/lava pairing around (x, y), as (water, lava) positions
    fn find_quench(
        cells: &CellBuffer,
        x: i32,
        y: i32,
        origin: u16,
    ) -> Option<((i32, i32), (i32, i32))> {
        let partner = match origin {
            MaterialId::WATER => MaterialId::LAVA,
            MaterialId::LAVA => MaterialId::WATER,
            _ => return None,
        };
        let (nx, ny) = ORTHOGONAL
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .find(|&(nx, ny)| cells.material_at(nx, ny) == Some(partner))?;

        if origin == MaterialId::WATER {
            Some(((x, y), (nx, ny)))
        } else {
            Some(((nx, ny), (x, y)))
        }
    }

    /// Let a flame at (x, y) light its flammable 8-neighbors
    pub fn spread_fire<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        materials: &Materials,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        for (dx, dy) in SURROUNDING {
            let (nx, ny) = (x + dx, y + dy);
            let Some(def) = cells.material_at(nx, ny).and_then(|id| materials.get(id)) else {
                continue;
            };
            if def.flammable && rng.check_probability(def.ignition_chance) {
                Self::ignite(cells, nx, ny, def.burn_time_spread, materials, rng);
                stats.record_reaction();
            }
        }
    }

    /// Turn a cell into fire burning for the base lifetime plus `0..spread` ticks
    fn ignite<R: WorldRng>(
        cells: &mut CellBuffer,
        x: i32,
        y: i32,
        spread: u32,
        materials: &Materials,
        rng: &mut R,
    ) {
        let base = materials
            .get(MaterialId::FIRE)
            .and_then(|def| def.lifetime)
            .unwrap_or(0);
        if spawn::transmute(cells, x, y, MaterialId::FIRE, materials, rng)
            && let Some(cell) = cells.get_mut(x, y)
        {
            cell.lifetime = Some(base + rng.gen_below(spread));
        }
    }

    /// Water becomes steam, lava hardens into stone
    ///
    /// Both products sit out the rest of the tick.
    fn quench<R: WorldRng>(
        cells: &mut CellBuffer,
        water: (i32, i32),
        lava: (i32, i32),
        materials: &Materials,
        rng: &mut R,
    ) {
        for ((x, y), product) in [(water, MaterialId::STEAM), (lava, MaterialId::STONE)] {
            if spawn::transmute(cells, x, y, product, materials, rng)
                && let Some(cell) = cells.get_mut(x, y)
            {
                cell.updated = true;
            }
        }
        log::trace!(
            "lava at ({}, {}) quenched by water at ({}, {})",
            lava.0,
            lava.1,
            water.0,
            water.1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::StepStats;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    /// Always rolls the same value
    struct FixedRng(f32);

    impl WorldRng for FixedRng {
        fn gen_bool(&mut self) -> bool {
            self.0 < 0.5
        }

        fn gen_f32(&mut self) -> f32 {
            self.0
        }
    }

    fn setup(width: usize, height: usize, placed: &[(i32, i32, u16)]) -> (CellBuffer, Materials) {
        let materials = Materials::new();
        let mut cells = CellBuffer::new(width, height);
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        for &(x, y, id) in placed {
            assert!(spawn::place(&mut cells, x, y, id, &materials, &mut rng));
        }
        (cells, materials)
    }

    #[test]
    fn test_water_over_lava() {
        let (mut cells, materials) = setup(3, 3, &[(1, 1, MaterialId::WATER), (1, 2, MaterialId::LAVA)]);
        let mut stats = StepStats::default();

        ReactionSystem::resolve(&mut cells, 1, 1, &materials, &mut stats, &mut FixedRng(0.99));

        assert_eq!(cells.material_at(1, 1), Some(MaterialId::STEAM));
        assert_eq!(cells.get(1, 1).unwrap().lifetime, Some(120));
        assert_eq!(cells.material_at(1, 2), Some(MaterialId::STONE));
        assert_eq!(cells.get(1, 2).unwrap().lifetime, None);
        assert_eq!(stats.reactions, 1);
    }

    #[test]
    fn test_lava_next_to_water() {
        let (mut cells, materials) = setup(3, 1, &[(0, 0, MaterialId::WATER), (1, 0, MaterialId::LAVA)]);

        ReactionSystem::resolve(&mut cells, 1, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.99));

        assert_eq!(cells.material_at(0, 0), Some(MaterialId::STEAM));
        assert_eq!(cells.material_at(1, 0), Some(MaterialId::STONE));
    }

    #[test]
    fn test_quench_stops_resolution() {
        // Lava touches water on the left and wood on the right
        let (mut cells, materials) = setup(
            3,
            1,
            &[
                (0, 0, MaterialId::WATER),
                (1, 0, MaterialId::LAVA),
                (2, 0, MaterialId::WOOD),
            ],
        );

        ReactionSystem::resolve(&mut cells, 1, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.0));

        assert_eq!(cells.material_at(1, 0), Some(MaterialId::STONE));
        assert_eq!(cells.material_at(2, 0), Some(MaterialId::WOOD));
    }

    #[test]
    fn test_quench_wins_over_earlier_neighbor() {
        // Wood is visited before the water, but the quench still takes priority
        let (mut cells, materials) = setup(
            3,
            2,
            &[
                (0, 1, MaterialId::WOOD),
                (1, 1, MaterialId::LAVA),
                (1, 0, MaterialId::WATER),
            ],
        );

        ReactionSystem::resolve(&mut cells, 1, 1, &materials, &mut StepStats::default(), &mut FixedRng(0.0));

        assert_eq!(cells.material_at(0, 1), Some(MaterialId::WOOD));
        assert_eq!(cells.material_at(1, 1), Some(MaterialId::STONE));
        assert_eq!(cells.material_at(1, 0), Some(MaterialId::STEAM));
    }

    #[test]
    fn test_water_extinguishes_fire() {
        let (mut cells, materials) = setup(3, 1, &[(0, 0, MaterialId::FIRE), (1, 0, MaterialId::WATER)]);

        ReactionSystem::resolve(&mut cells, 1, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.99));

        assert_eq!(cells.material_at(0, 0), Some(MaterialId::STEAM));
        assert_eq!(cells.material_at(1, 0), Some(MaterialId::WATER));
    }

    #[test]
    fn test_fire_boils_water_sometimes() {
        let (mut cells, materials) = setup(2, 1, &[(0, 0, MaterialId::FIRE), (1, 0, MaterialId::WATER)]);

        ReactionSystem::resolve(&mut cells, 0, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.5));
        assert_eq!(cells.material_at(1, 0), Some(MaterialId::WATER));

        ReactionSystem::resolve(&mut cells, 0, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.05));
        assert_eq!(cells.material_at(1, 0), Some(MaterialId::STEAM));
    }

    #[test]
    fn test_lava_ignites_flammable() {
        let (mut cells, materials) = setup(
            3,
            1,
            &[
                (0, 0, MaterialId::OIL),
                (1, 0, MaterialId::LAVA),
                (2, 0, MaterialId::SAND),
            ],
        );

        ReactionSystem::resolve(&mut cells, 1, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.1));

        let fire = cells.get(0, 0).unwrap();
        assert_eq!(fire.material_id, MaterialId::FIRE);
        // 60 + floor(0.1 * 40)
        assert_eq!(fire.lifetime, Some(64));
        assert_eq!(cells.material_at(2, 0), Some(MaterialId::SAND));
    }

    #[test]
    fn test_spread_fire_uses_ignition_chance() {
        let (mut cells, materials) = setup(
            3,
            3,
            &[
                (1, 1, MaterialId::FIRE),
                (0, 0, MaterialId::WOOD),
                (2, 2, MaterialId::PLANT),
                (2, 0, MaterialId::STONE),
            ],
        );

        ReactionSystem::spread_fire(&mut cells, 1, 1, &materials, &mut StepStats::default(), &mut FixedRng(0.06));
        assert_eq!(cells.material_at(0, 0), Some(MaterialId::WOOD));

        let mut stats = StepStats::default();
        ReactionSystem::spread_fire(&mut cells, 1, 1, &materials, &mut stats, &mut FixedRng(0.01));
        assert_eq!(cells.material_at(0, 0), Some(MaterialId::FIRE));
        assert_eq!(cells.material_at(2, 2), Some(MaterialId::FIRE));
        assert_eq!(cells.material_at(2, 0), Some(MaterialId::STONE));
        assert_eq!(stats.reactions, 2);

        // 60 + floor(0.01 * 30)
        assert_eq!(cells.get(0, 0).unwrap().lifetime, Some(60));
    }

    #[test]
    fn test_ignited_cell_is_not_marked_updated() {
        let (mut cells, materials) = setup(2, 1, &[(0, 0, MaterialId::FIRE), (1, 0, MaterialId::WOOD)]);

        ReactionSystem::spread_fire(&mut cells, 0, 0, &materials, &mut StepStats::default(), &mut FixedRng(0.0));

        let cell = cells.get(1, 0).unwrap();
        assert_eq!(cell.material_id, MaterialId::FIRE);
        assert!(!cell.updated);
    }

    #[test]
    fn test_quench_products_are_marked_updated() {
        let (mut cells, materials) = setup(1, 2, &[(0, 0, MaterialId::WATER), (0, 1, MaterialId::LAVA)]);

        ReactionSystem::resolve(&mut cells, 0, 1, &materials, &mut StepStats::default(), &mut FixedRng(0.99));

        assert!(cells.get(0, 0).unwrap().updated);
        assert!(cells.get(0, 1).unwrap().updated);
    }
}
