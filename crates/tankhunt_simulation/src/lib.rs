//! TANKHUNT Simulation Core
//!
//! ECS-контроллер вражеского танка на Bevy 0.16 (strategic layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = решения (цель, steering, aiming handoff, состояние звука двигателя)
//! - Хост = исполнение (rigid body, аудио playback, рендер, стрельба)
//!
//! Tick model:
//! - Update (decision tick): targeting → steering → audio + aiming handoff
//! - FixedUpdate 60Hz (physics tick): движение по SteeringCommand

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod audio;
pub mod components;
pub mod error;
pub mod logger;
pub mod physics;
pub mod shooting;
pub mod spawn;

// Re-export базовых типов для удобства
pub use ai::{
    compute_steering, select_nearest, AIPlugin, AgentPose, CurrentTarget, SteeringCommand, TankSystems,
};
pub use audio::{
    AudioDevice, ClipId, EngineAudio, EngineAudioChannel, EngineAudioPlugin, EngineAudioSettings, EngineAudioState,
};
pub use components::*;
pub use error::TankSetupError;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};
pub use physics::{MotionActuator, PhysicsSteeringPolicy, TankMovementPlugin};
pub use shooting::{AimHandoff, AimingHandoffPlugin, AimingStatus};
pub use spawn::{enemy_tank_bundle, player_tank_bundle, spawn_enemy_tank, spawn_player_tank};

/// Частота physics tick (Hz)
pub const FIXED_HZ: f64 = 60.0;

/// Seed по умолчанию, если приложение не задало свой
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Не перетираем seed, выставленный create_headless_app
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .add_plugins((AIPlugin, EngineAudioPlugin, AimingHandoffPlugin, TankMovementPlugin));
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
/// Время шагает фиксированно (1/60 сек на update) — один physics tick
/// на каждый decision tick, результат не зависит от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / FIXED_HZ)));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сортируются по Entity index и сериализуются через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
