//! Lantern Simulation Core
//!
//! Enemy AI для 2D stealth/horror прототипа на Bevy ECS 0.16.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = AI decisions (FSM, perception, таймеры)
//! - движок = physics raycasts, NavMesh pathfinding, rendering
//!
//! Движок общается с AI через capabilities (Navigator, SightRaycaster)
//! и события (AIStateChanged).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod error;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{
    AIConfig, AIPlugin, AIStateChanged, EnemyState, HeadlessNavigationPlugin, NavAgent,
    StateKind, StateMachine,
};
pub use components::*;
pub use error::AIConfigError;
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Seed по умолчанию для DeterministicRng
pub const DEFAULT_SEED: u64 = 42;

/// Частота simulation tick (FixedUpdate)
pub const TICK_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

        // Детерминистичный RNG (seed по умолчанию, если не задан явно)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.add_plugins(AIPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    app
}

/// Bundle врага: всё, что нужно AI для тика
///
/// Transform ставим в первый waypoint: Patrol не выставляет destination на
/// входе, агент ждёт на месте и идёт ко второму waypoint.
pub fn enemy_bundle(route: PatrolRoute, config: AIConfig) -> impl Bundle {
    let start = route.waypoint(0).unwrap_or(Vec3::ZERO);
    (
        Transform::from_translation(start),
        EnemyAgent::default(),
        route,
        config,
        NavAgent::default(),
        StateMachine::default(),
        SightCollider::default(),
    )
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
