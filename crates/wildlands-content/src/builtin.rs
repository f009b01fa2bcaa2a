//! Built-in default world.
//!
//! A small, coherent world used when no content directory is configured:
//! one safe town surrounded by combat regions of increasing difficulty.

use wildlands_world::{
    AreaId, Biome, Bounds, CombatStats, MobBehavior, MobDefinition, MobSpawnDescriptor,
    NpcDescriptor, ResourceDescriptor, Vec2, WorldArea,
};

#[allow(clippy::too_many_arguments)]
fn mob(
    type_id: &str,
    display_name: &str,
    level: u32,
    max_health: u32,
    stats: (u32, u32, u32, u32),
    behavior: MobBehavior,
    movement_speed: f32,
    respawn_delay_secs: f64,
) -> MobDefinition {
    MobDefinition {
        type_id: type_id.into(),
        display_name: display_name.into(),
        level,
        max_health,
        stats: CombatStats {
            attack: stats.0,
            strength: stats.1,
            defense: stats.2,
            ranged: stats.3,
        },
        behavior,
        movement_speed,
        respawn_delay_secs,
        xp_reward: None,
    }
}

fn aggressive(aggro_range: f32, chase_range: f32, ignore_above: Option<u32>) -> MobBehavior {
    MobBehavior {
        aggressive: true,
        aggro_range,
        chase_range,
        ignore_low_level_players: ignore_above.is_some(),
        level_threshold: ignore_above.unwrap_or(0),
    }
}

/// All built-in mob types.
pub fn builtin_mobs() -> Vec<MobDefinition> {
    vec![
        mob(
            "cow",
            "Cow",
            1,
            8,
            (0, 0, 1, 0),
            MobBehavior::default(),
            2.0,
            20.0,
        ),
        mob(
            "giant_rat",
            "Giant Rat",
            1,
            5,
            (1, 1, 1, 0),
            aggressive(6.0, 15.0, Some(5)),
            3.5,
            15.0,
        ),
        mob(
            "goblin",
            "Goblin",
            2,
            12,
            (2, 3, 1, 0),
            aggressive(8.0, 20.0, Some(10)),
            3.0,
            25.0,
        ),
        mob(
            "wolf",
            "Wolf",
            8,
            34,
            (8, 7, 5, 0),
            aggressive(10.0, 25.0, Some(20)),
            4.5,
            40.0,
        ),
        mob(
            "bandit",
            "Bandit",
            15,
            50,
            (14, 12, 10, 4),
            aggressive(9.0, 25.0, Some(30)),
            3.2,
            60.0,
        ),
        mob(
            "skeleton",
            "Skeleton",
            25,
            70,
            (22, 20, 18, 0),
            aggressive(10.0, 30.0, None),
            2.8,
            60.0,
        ),
        mob(
            "wraith",
            "Wraith",
            35,
            110,
            (30, 28, 25, 10),
            aggressive(14.0, 35.0, None),
            3.8,
            120.0,
        ),
    ]
}

fn spawn(mob_type: &str, x: f32, z: f32, spawn_radius: f32, max_count: u32) -> MobSpawnDescriptor {
    MobSpawnDescriptor {
        mob_type: mob_type.into(),
        position: Vec2::new(x, z),
        spawn_radius,
        max_count,
        respawn_delay_secs: None,
    }
}

fn npc(id: &str, name: &str, role: &str, x: f32, z: f32) -> NpcDescriptor {
    NpcDescriptor {
        id: id.into(),
        name: name.into(),
        role: role.into(),
        position: Vec2::new(x, z),
    }
}

fn resource(id: &str, kind: &str, x: f32, z: f32, respawn_secs: f64) -> ResourceDescriptor {
    ResourceDescriptor {
        id: id.into(),
        kind: kind.into(),
        position: Vec2::new(x, z),
        respawn_secs,
    }
}

fn ids(list: &[&str]) -> Vec<AreaId> {
    list.iter().map(|s| AreaId::from(*s)).collect()
}

/// All built-in world areas. Bounds are non-overlapping.
pub fn builtin_areas() -> Vec<WorldArea> {
    vec![
        WorldArea {
            id: AreaId::from("millbrook"),
            name: "Millbrook".into(),
            difficulty: 0,
            bounds: Bounds::new(-50.0, -50.0, 50.0, 50.0),
            biome: Biome::Town,
            npcs: vec![
                npc("millbrook-banker", "Edda the Banker", "banker", -10.0, 5.0),
                npc("millbrook-shop", "Harlan", "shopkeeper", 12.0, -4.0),
                npc("millbrook-guide", "Old Tomas", "guide", 0.0, 20.0),
            ],
            resources: vec![resource("millbrook-well", "well", 0.0, 0.0, 5.0)],
            mob_spawns: Vec::new(),
            connections: ids(&["river-meadow", "whispering-woods"]),
        },
        WorldArea {
            id: AreaId::from("river-meadow"),
            name: "River Meadow".into(),
            difficulty: 1,
            bounds: Bounds::new(50.0, -50.0, 200.0, 50.0),
            biome: Biome::Plains,
            npcs: vec![npc("meadow-farmer", "Farmer Bell", "quest", 70.0, 10.0)],
            resources: vec![
                resource("meadow-oak-1", "oak_tree", 90.0, -20.0, 30.0),
                resource("meadow-oak-2", "oak_tree", 110.0, 30.0, 30.0),
                resource("meadow-fish-1", "fishing_spot", 180.0, 0.0, 15.0),
            ],
            mob_spawns: vec![
                spawn("cow", 100.0, 10.0, 12.0, 4),
                spawn("giant_rat", 150.0, -25.0, 8.0, 3),
            ],
            connections: ids(&["millbrook", "whispering-woods", "bandit-camp"]),
        },
        WorldArea {
            id: AreaId::from("whispering-woods"),
            name: "Whispering Woods".into(),
            difficulty: 1,
            bounds: Bounds::new(-50.0, 50.0, 150.0, 250.0),
            biome: Biome::Forest,
            npcs: Vec::new(),
            resources: vec![
                resource("woods-willow-1", "willow_tree", 20.0, 120.0, 45.0),
                resource("woods-copper-1", "copper_rock", 100.0, 200.0, 60.0),
            ],
            mob_spawns: vec![
                spawn("goblin", 40.0, 110.0, 10.0, 3),
                spawn("goblin", 90.0, 160.0, 10.0, 3),
                spawn("wolf", 60.0, 220.0, 15.0, 2),
            ],
            connections: ids(&["millbrook", "river-meadow", "cursed-crypt"]),
        },
        WorldArea {
            id: AreaId::from("bandit-camp"),
            name: "Bandit Camp".into(),
            difficulty: 2,
            bounds: Bounds::new(150.0, 50.0, 350.0, 250.0),
            biome: Biome::Desert,
            npcs: Vec::new(),
            resources: vec![resource("camp-iron-1", "iron_rock", 300.0, 80.0, 90.0)],
            mob_spawns: vec![
                spawn("bandit", 250.0, 150.0, 12.0, 4),
                spawn("wolf", 200.0, 220.0, 10.0, 2),
            ],
            connections: ids(&["river-meadow"]),
        },
        WorldArea {
            id: AreaId::from("cursed-crypt"),
            name: "Cursed Crypt".into(),
            difficulty: 3,
            bounds: Bounds::new(-250.0, 50.0, -50.0, 250.0),
            biome: Biome::Crypt,
            npcs: Vec::new(),
            resources: Vec::new(),
            mob_spawns: vec![
                MobSpawnDescriptor {
                    respawn_delay_secs: Some(90.0),
                    ..spawn("skeleton", -150.0, 150.0, 14.0, 5)
                },
                spawn("wraith", -200.0, 220.0, 6.0, 1),
            ],
            connections: ids(&["whispering-woods"]),
        },
    ]
}
