//! Material definitions and registry

use serde::{Deserialize, Serialize};

/// Built-in material IDs
pub struct MaterialId;

impl MaterialId {
    /// Background / eraser. Registered so lookups succeed, never placeable.
    pub const EMPTY: u16 = 0;

    // Terrain and fluids
    pub const SAND: u16 = 1;
    pub const STONE: u16 = 2;
    pub const WOOD: u16 = 3;
    pub const WATER: u16 = 4;
    pub const OIL: u16 = 5;
    pub const LAVA: u16 = 6;
    pub const FIRE: u16 = 7;
    pub const STEAM: u16 = 8;
    pub const SMOKE: u16 = 9;
    pub const PLANT: u16 = 10;
    pub const BLOOD: u16 = 11;

    // Critters
    pub const ANT: u16 = 12;
    pub const FISH: u16 = 13;
    pub const BIRD: u16 = 14;
    pub const FROG: u16 = 15;
    pub const WORM: u16 = 16;
}

/// State class of a material
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Doesn't move and can't be displaced (stone, wood, plant)
    Solid,
    /// Falls, piles up (sand)
    Powder,
    /// Flows, seeks level (water, oil, lava)
    Liquid,
    /// Rises, disperses (steam, smoke, fire)
    Gas,
    /// Living cell driven by a creature controller
    Creature,
    /// Absence of material
    Empty,
}

/// Movement/interaction rule family a material follows
///
/// Exactly one per material; the grid dispatches on it every tick, so a cell
/// whose material changes (wood becoming fire) changes behavior too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Static,
    Fall,
    Liquid,
    Gas,
    Fire,
    Plant,
    Ant,
    Fish,
    Bird,
    Frog,
    Worm,
}

impl Behavior {
    /// True for the creature behaviors
    pub fn is_creature(self) -> bool {
        matches!(
            self,
            Behavior::Ant | Behavior::Fish | Behavior::Bird | Behavior::Frog | Behavior::Worm
        )
    }
}

/// Tunables shared by every creature species
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureParams {
    /// Health a freshly placed creature starts with (and the regeneration cap)
    pub max_health: f32,
    /// Landing after this many airborne ticks kills the creature
    pub fall_damage_threshold: u32,
    /// Ticks between two discrete actions
    pub action_cooldown: u32,
    /// Chance per decision to turn around unprompted
    pub turn_chance: f32,
}

/// Definition of a material's properties
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDef {
    pub id: u16,
    pub name: String,
    pub material_type: MaterialType,
    pub behavior: Behavior,

    /// Relative density - decides displacement and stratification
    pub density: f32,

    // Combustion
    pub flammable: bool,
    /// Chance per tick that an adjacent flame ignites this material
    pub ignition_chance: f32,
    /// Upper bound (exclusive) of random extra ticks a flame lit here burns
    pub burn_time_spread: u32,

    /// Default countdown in ticks (None = lives forever)
    pub lifetime: Option<u32>,

    /// Color variants (RGBA), one is picked per cell for visual jitter
    pub colors: Vec<[u8; 4]>,

    /// Chance per tick for a watered plant to try growing
    pub growth_rate: f32,

    /// Present for creature materials only
    pub creature: Option<CreatureParams>,
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            id: 0,
            name: "unknown".to_string(),
            material_type: MaterialType::Solid,
            behavior: Behavior::Static,
            density: 1.0,
            flammable: false,
            ignition_chance: 0.0,
            burn_time_spread: 0,
            lifetime: None,
            colors: vec![[255, 0, 255, 255]], // Magenta for missing materials
            growth_rate: 0.0,
            creature: None,
        }
    }
}

impl MaterialDef {
    /// Fire-spread defaults for flammable materials
    fn with_fire_spread(self) -> Self {
        Self {
            flammable: true,
            ignition_chance: 0.05,
            burn_time_spread: 30,
            ..self
        }
    }

    /// Whether cells of this material can be placed on the grid
    pub fn is_placeable(&self) -> bool {
        self.material_type != MaterialType::Empty
    }
}

/// Registry of all materials
pub struct Materials {
    materials: Vec<Option<MaterialDef>>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: Vec::new(),
        };
        materials.register_defaults();
        materials
    }

    fn register_defaults(&mut self) {
        self.register(MaterialDef {
            id: MaterialId::EMPTY,
            name: "empty".to_string(),
            material_type: MaterialType::Empty,
            density: 0.0,
            colors: vec![[26, 26, 46, 255]],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::SAND,
            name: "sand".to_string(),
            material_type: MaterialType::Powder,
            behavior: Behavior::Fall,
            density: 1.5,
            colors: vec![
                [230, 200, 110, 255],
                [212, 184, 94, 255],
                [201, 168, 78, 255],
                [223, 193, 106, 255],
                [232, 208, 120, 255],
            ],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::STONE,
            name: "stone".to_string(),
            density: 2.5,
            colors: vec![
                [122, 122, 140, 255],
                [106, 106, 124, 255],
                [138, 138, 156, 255],
                [90, 90, 108, 255],
                [144, 144, 160, 255],
            ],
            ..Default::default()
        });

        self.register(
            MaterialDef {
                id: MaterialId::WOOD,
                name: "wood".to_string(),
                density: 0.6,
                colors: vec![
                    [139, 107, 74, 255],
                    [123, 91, 58, 255],
                    [155, 123, 90, 255],
                    [107, 74, 42, 255],
                    [160, 128, 96, 255],
                ],
                ..Default::default()
            }
            .with_fire_spread(),
        );

        self.register(MaterialDef {
            id: MaterialId::WATER,
            name: "water".to_string(),
            material_type: MaterialType::Liquid,
            behavior: Behavior::Liquid,
            density: 1.0,
            colors: vec![
                [74, 158, 255, 255],
                [58, 142, 239, 255],
                [90, 174, 255, 255],
                [45, 125, 210, 255],
                [96, 180, 255, 255],
            ],
            ..Default::default()
        });

        self.register(
            MaterialDef {
                id: MaterialId::OIL,
                name: "oil".to_string(),
                material_type: MaterialType::Liquid,
                behavior: Behavior::Liquid,
                density: 0.8, // Floats on water
                colors: vec![
                    [74, 74, 58, 255],
                    [58, 58, 42, 255],
                    [90, 90, 74, 255],
                    [42, 42, 26, 255],
                    [96, 96, 80, 255],
                ],
                ..Default::default()
            }
            .with_fire_spread(),
        );

        self.register(MaterialDef {
            id: MaterialId::LAVA,
            name: "lava".to_string(),
            material_type: MaterialType::Liquid,
            behavior: Behavior::Liquid,
            density: 3.0,
            colors: vec![
                [255, 87, 34, 255],
                [255, 106, 0, 255],
                [255, 69, 0, 255],
                [230, 74, 25, 255],
                [255, 112, 67, 255],
            ],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::FIRE,
            name: "fire".to_string(),
            material_type: MaterialType::Gas,
            behavior: Behavior::Fire,
            density: 0.1,
            lifetime: Some(60),
            colors: vec![
                [255, 152, 0, 255],
                [255, 87, 34, 255],
                [255, 235, 59, 255],
                [245, 124, 0, 255],
                [255, 111, 0, 255],
            ],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::STEAM,
            name: "steam".to_string(),
            material_type: MaterialType::Gas,
            behavior: Behavior::Gas,
            density: 0.05,
            lifetime: Some(120),
            colors: vec![
                [184, 212, 232, 255],
                [200, 228, 248, 255],
                [168, 196, 216, 255],
                [216, 244, 255, 255],
                [144, 184, 212, 255],
            ],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::SMOKE,
            name: "smoke".to_string(),
            material_type: MaterialType::Gas,
            behavior: Behavior::Gas,
            density: 0.08,
            lifetime: Some(180),
            colors: vec![
                [90, 90, 90, 255],
                [74, 74, 74, 255],
                [106, 106, 106, 255],
                [58, 58, 58, 255],
                [112, 112, 112, 255],
            ],
            ..Default::default()
        });

        self.register(
            MaterialDef {
                id: MaterialId::PLANT,
                name: "plant".to_string(),
                behavior: Behavior::Plant,
                density: 0.4,
                growth_rate: 0.02,
                colors: vec![
                    [126, 213, 111, 255],
                    [110, 197, 95, 255],
                    [142, 229, 127, 255],
                    [94, 181, 79, 255],
                    [76, 175, 80, 255],
                ],
                ..Default::default()
            }
            .with_fire_spread(),
        );

        self.register(MaterialDef {
            id: MaterialId::BLOOD,
            name: "blood".to_string(),
            material_type: MaterialType::Liquid,
            behavior: Behavior::Liquid,
            density: 1.05,
            lifetime: Some(400),
            colors: vec![
                [138, 3, 3, 255],
                [160, 10, 10, 255],
                [120, 0, 0, 255],
                [178, 34, 34, 255],
            ],
            ..Default::default()
        });

        // ===== CRITTERS =====

        self.register(MaterialDef {
            id: MaterialId::ANT,
            name: "ant".to_string(),
            material_type: MaterialType::Creature,
            behavior: Behavior::Ant,
            density: 1.2,
            colors: vec![[40, 30, 30, 255], [60, 40, 35, 255], [30, 20, 20, 255]],
            creature: Some(CreatureParams {
                max_health: 10.0,
                fall_damage_threshold: 12,
                action_cooldown: 2,
                turn_chance: 0.02,
            }),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::FISH,
            name: "fish".to_string(),
            material_type: MaterialType::Creature,
            behavior: Behavior::Fish,
            density: 1.0,
            colors: vec![[255, 140, 0, 255], [255, 165, 60, 255], [240, 120, 20, 255]],
            creature: Some(CreatureParams {
                max_health: 1.0,
                fall_damage_threshold: 8,
                action_cooldown: 3,
                turn_chance: 0.05,
            }),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::BIRD,
            name: "bird".to_string(),
            material_type: MaterialType::Creature,
            behavior: Behavior::Bird,
            density: 0.5,
            colors: vec![[70, 90, 160, 255], [90, 110, 180, 255], [60, 70, 130, 255]],
            creature: Some(CreatureParams {
                max_health: 8.0,
                fall_damage_threshold: 10,
                action_cooldown: 1,
                turn_chance: 0.05,
            }),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::FROG,
            name: "frog".to_string(),
            material_type: MaterialType::Creature,
            behavior: Behavior::Frog,
            density: 1.1,
            colors: vec![[60, 160, 60, 255], [80, 180, 70, 255], [50, 140, 50, 255]],
            creature: Some(CreatureParams {
                max_health: 12.0,
                fall_damage_threshold: 10,
                action_cooldown: 4,
                turn_chance: 0.03,
            }),
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::WORM,
            name: "worm".to_string(),
            material_type: MaterialType::Creature,
            behavior: Behavior::Worm,
            density: 1.3,
            colors: vec![[220, 130, 140, 255], [200, 110, 120, 255], [235, 150, 160, 255]],
            creature: Some(CreatureParams {
                max_health: 6.0,
                fall_damage_threshold: 8,
                action_cooldown: 3,
                turn_chance: 0.3,
            }),
            ..Default::default()
        });
    }

    fn register(&mut self, material: MaterialDef) {
        let id = material.id as usize;

        // Ensure vec is large enough
        if self.materials.len() <= id {
            self.materials.resize(id + 1, None);
        }

        if self.materials[id].is_some() {
            log::warn!("Material id {} registered twice, replacing", id);
        }
        self.materials[id] = Some(material);
    }

    /// Get material definition by ID (None for unknown IDs)
    pub fn get(&self, id: u16) -> Option<&MaterialDef> {
        self.materials.get(id as usize).and_then(Option::as_ref)
    }

    /// Look a material up by its lowercase name
    pub fn find_by_name(&self, name: &str) -> Option<&MaterialDef> {
        self.iter().find(|def| def.name.eq_ignore_ascii_case(name))
    }

    /// Iterate over all registered materials in ID order
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter().flatten()
    }

    /// Whether material `a` may push into a cell holding `b`
    ///
    /// Empty targets are always enterable. Otherwise `a` must be strictly
    /// denser and `b` must not be solid; equal densities never displace.
    pub fn can_displace(&self, a: u16, b: Option<u16>) -> bool {
        let Some(b) = b else {
            return true;
        };
        match (self.get(a), self.get(b)) {
            (Some(mat_a), Some(mat_b)) => {
                mat_a.density > mat_b.density && mat_b.material_type != MaterialType::Solid
            }
            _ => false,
        }
    }

    /// Pick a color variant for a material from a roll in `[0, 1)`
    pub fn color_for(&self, id: u16, roll: f32) -> Option<[u8; 4]> {
        let colors = &self.get(id)?.colors;
        if colors.is_empty() {
            return None;
        }
        let index = ((roll.clamp(0.0, 1.0) * colors.len() as f32) as usize).min(colors.len() - 1);
        Some(colors[index])
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        let materials = Materials::new();
        assert_eq!(materials.get(MaterialId::SAND).unwrap().name, "sand");
        assert_eq!(
            materials.get(MaterialId::WORM).unwrap().behavior,
            Behavior::Worm
        );
        assert!(materials.get(999).is_none());
    }

    #[test]
    fn test_every_material_has_colors() {
        let materials = Materials::new();
        for def in materials.iter() {
            assert!(!def.colors.is_empty(), "{} has no palette", def.name);
        }
    }

    #[test]
    fn test_creature_params_match_behavior() {
        let materials = Materials::new();
        for def in materials.iter() {
            assert_eq!(
                def.creature.is_some(),
                def.behavior.is_creature(),
                "{} creature params disagree with behavior",
                def.name
            );
            assert_eq!(
                def.material_type == MaterialType::Creature,
                def.behavior.is_creature()
            );
        }
    }

    #[test]
    fn test_transient_materials_have_lifetime() {
        let materials = Materials::new();
        for id in [
            MaterialId::FIRE,
            MaterialId::STEAM,
            MaterialId::SMOKE,
            MaterialId::BLOOD,
        ] {
            assert!(materials.get(id).unwrap().lifetime.is_some());
        }
        assert!(materials.get(MaterialId::STONE).unwrap().lifetime.is_none());
    }

    #[test]
    fn test_empty_is_not_placeable() {
        let materials = Materials::new();
        assert!(!materials.get(MaterialId::EMPTY).unwrap().is_placeable());
        assert!(materials.get(MaterialId::SAND).unwrap().is_placeable());
    }

    #[test]
    fn test_can_displace_into_empty() {
        let materials = Materials::new();
        assert!(materials.can_displace(MaterialId::SMOKE, None));
        assert!(materials.can_displace(MaterialId::STONE, None));
    }

    #[test]
    fn test_can_displace_by_density() {
        let materials = Materials::new();
        // Sand sinks through water, water floats over sand
        assert!(materials.can_displace(MaterialId::SAND, Some(MaterialId::WATER)));
        assert!(!materials.can_displace(MaterialId::WATER, Some(MaterialId::SAND)));
        // Water sinks under oil
        assert!(materials.can_displace(MaterialId::WATER, Some(MaterialId::OIL)));
    }

    #[test]
    fn test_can_displace_never_into_solid() {
        let materials = Materials::new();
        // Lava is denser than wood but wood is solid
        assert!(!materials.can_displace(MaterialId::LAVA, Some(MaterialId::WOOD)));
        assert!(!materials.can_displace(MaterialId::SAND, Some(MaterialId::PLANT)));
    }

    #[test]
    fn test_can_displace_equal_density_never() {
        let materials = Materials::new();
        for def in materials.iter() {
            assert!(
                !materials.can_displace(def.id, Some(def.id)),
                "{} displaced itself",
                def.name
            );
            for other in materials.iter() {
                if other.density == def.density {
                    assert!(!materials.can_displace(def.id, Some(other.id)));
                }
            }
        }
    }

    #[test]
    fn test_can_displace_matches_definition() {
        let materials = Materials::new();
        for a in materials.iter() {
            for b in materials.iter() {
                let expected =
                    a.density > b.density && b.material_type != MaterialType::Solid;
                assert_eq!(materials.can_displace(a.id, Some(b.id)), expected);
            }
        }
    }

    #[test]
    fn test_can_displace_unknown_material() {
        let materials = Materials::new();
        assert!(!materials.can_displace(999, Some(MaterialId::WATER)));
        assert!(!materials.can_displace(MaterialId::LAVA, Some(999)));
    }

    #[test]
    fn test_color_for_covers_palette() {
        let materials = Materials::new();
        let palette = &materials.get(MaterialId::SAND).unwrap().colors;

        assert_eq!(materials.color_for(MaterialId::SAND, 0.0), Some(palette[0]));
        assert_eq!(
            materials.color_for(MaterialId::SAND, 0.9999),
            Some(palette[palette.len() - 1])
        );
        // Rolls outside [0, 1) are clamped rather than panicking
        assert_eq!(
            materials.color_for(MaterialId::SAND, 1.0),
            Some(palette[palette.len() - 1])
        );
        assert_eq!(materials.color_for(999, 0.5), None);
    }

    #[test]
    fn test_find_by_name() {
        let materials = Materials::new();
        assert_eq!(materials.find_by_name("Lava").unwrap().id, MaterialId::LAVA);
        assert!(materials.find_by_name("unobtainium").is_none());
    }
}
