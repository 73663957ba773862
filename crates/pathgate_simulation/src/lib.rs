//! Pathgate Simulation Core
//!
//! Click-to-move контроллер аватара с door interruption sequence (Bevy 0.16 ECS).
//!
//! HYBRID ARCHITECTURE:
//! - `controller` = engine-agnostic state machine + collaborator traits
//! - `systems` = Bevy wiring + headless stand-in'ы (steering, triggers, doors, picking)
//! - Движок (rendering/physics/navmesh) подставляет свои реализации traits

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod controller;
pub mod events;
pub mod logger;
pub mod systems;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{ConfigError, MovementConfig, DOOR_COOLDOWN_SECS};
pub use controller::{
    ClickOutcome, Collaborator, DoorSequence, MovementController, MovementError, ReentrantTrigger,
    SequencePhase, TriggerOutcome,
};
pub use events::*;
pub use systems::MovementControllerPlugin;

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let fixed_hz = app
            .world()
            .get_resource::<MovementConfig>()
            .map(|config| config.fixed_hz)
            .unwrap_or_else(|| MovementConfig::default().fixed_hz);

        app
            // Fixed timestep для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(fixed_hz))
            .add_plugins(MovementControllerPlugin);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
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
///
/// Время ручное (шаг 1/fixed_hz). Первый `app.update()` только запускает часы
/// и FixedUpdate не гоняет; каждый следующий = ровно один fixed tick.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();

    let fixed_hz = MovementConfig::default().fixed_hz;
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / fixed_hz,
        )))
        .insert_resource(Time::<Fixed>::from_hz(fixed_hz));

    app
}

/// Спавнит player-controlled аватара по параметрам из config
pub fn spawn_avatar(world: &mut World, position: Vec3, config: &MovementConfig) -> Entity {
    world
        .spawn((
            Player,
            avatar_components(
                position,
                config.move_speed,
                config.stopping_distance,
                config.door_cooldown_secs,
            ),
        ))
        .id()
}

/// Спавнит закрытую дверь с trigger volume
pub fn spawn_door(world: &mut World, position: Vec3, config: &MovementConfig) -> Entity {
    world
        .spawn((
            Transform::from_translation(position),
            SlidingDoor::new(config.door_wait_distance, config.door_animation_secs),
            TriggerVolume {
                half_extents: config.trigger_half_extents(),
            },
        ))
        .id()
}

/// Snapshot всех аватаров для сравнения детерминизма
pub fn avatar_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &Transform, &MovementController)>();
    let mut avatars: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    avatars.sort_by_key(|(entity, _, _)| entity.index());

    for (entity, transform, controller) in avatars {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        for component in transform.translation.to_array() {
            snapshot.extend_from_slice(&component.to_le_bytes());
        }
        snapshot.extend_from_slice(format!("{:?}", controller.state()).as_bytes());
    }

    snapshot
}
