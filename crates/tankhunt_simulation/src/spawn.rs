//! Spawn helpers для танков
//!
//! Вся валидация конфигурации — здесь (fail fast). Tick-системы считают,
//! что компоненты уже корректны.

use bevy::prelude::*;

use crate::audio::{EngineAudio, EngineAudioChannel, EngineAudioSettings};
use crate::components::{EnemyTank, TankTag, TankTuning};
use crate::error::TankSetupError;

/// Bundle AI танка (валидированный)
///
/// Аудио канал стартует с idle клипом и `base_pitch`, без playback.
/// CurrentTarget, SteeringCommand, AimHandoff добавляются через Required Components.
pub fn enemy_tank_bundle(
    transform: Transform,
    tuning: TankTuning,
    audio: EngineAudioSettings,
) -> Result<impl Bundle, TankSetupError> {
    tuning.validate()?;

    let channel = EngineAudioChannel::new(audio.idle_clip.clone(), audio.base_pitch);
    let engine = EngineAudio::new(audio.idle_clip, audio.driving_clip, tuning.pitch_range, &channel)?;

    Ok((EnemyTank, TankTag::Enemy, transform, tuning, engine, channel))
}

/// Bundle танка игрока (цель для AI)
pub fn player_tank_bundle(transform: Transform) -> impl Bundle {
    (TankTag::Player, transform)
}

/// Spawn AI танка через Commands
pub fn spawn_enemy_tank(
    commands: &mut Commands,
    transform: Transform,
    tuning: TankTuning,
    audio: EngineAudioSettings,
) -> Result<Entity, TankSetupError> {
    let bundle = enemy_tank_bundle(transform, tuning, audio)?;
    let entity = commands.spawn(bundle).id();

    crate::log_info(&format!(
        "🛡️ Enemy tank {:?} spawned at {:?} (hunts {:?})",
        entity, transform.translation, tuning.target_tag
    ));

    Ok(entity)
}

/// Spawn танка игрока через Commands
pub fn spawn_player_tank(commands: &mut Commands, transform: Transform) -> Entity {
    commands.spawn(player_tank_bundle(transform)).id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{CurrentTarget, SteeringCommand};
    use crate::audio::{ClipId, EngineAudioState};
    use crate::shooting::AimHandoff;

    #[test]
    fn test_enemy_bundle_has_required_components() {
        let mut world = World::new();
        let bundle = enemy_tank_bundle(Transform::default(), TankTuning::default(), EngineAudioSettings::default())
            .expect("default settings are valid");
        let tank = world.spawn(bundle).id();

        assert!(world.get::<EnemyTank>(tank).is_some());
        assert_eq!(world.get::<TankTag>(tank), Some(&TankTag::Enemy));
        assert_eq!(world.get::<CurrentTarget>(tank), Some(&CurrentTarget(None)));
        assert_eq!(world.get::<SteeringCommand>(tank), Some(&SteeringCommand::IDLE));
        assert_eq!(world.get::<AimHandoff>(tank), Some(&AimHandoff::default()));

        let engine = world.get::<EngineAudio>(tank).expect("engine audio");
        assert_eq!(engine.state(), EngineAudioState::Idle);
        assert_eq!(engine.base_pitch(), 1.0);
    }

    #[test]
    fn test_enemy_bundle_rejects_invalid_tuning() {
        let tuning = TankTuning { speed: -1.0, ..default() };
        let result = enemy_tank_bundle(Transform::default(), tuning, EngineAudioSettings::default());
        assert!(matches!(result, Err(TankSetupError::InvalidTuning { name: "speed", .. })));
    }

    #[test]
    fn test_enemy_bundle_rejects_missing_clip() {
        let audio = EngineAudioSettings {
            driving_clip: ClipId::new(""),
            ..default()
        };
        let result = enemy_tank_bundle(Transform::default(), TankTuning::default(), audio);
        assert!(matches!(
            result,
            Err(TankSetupError::MissingClip {
                state: EngineAudioState::Driving
            })
        ));
    }

    /// Какие entity создала startup система
    #[derive(Resource)]
    struct SpawnedTanks {
        enemy: Entity,
        player: Entity,
    }

    fn spawn_duel(mut commands: Commands) {
        let enemy = spawn_enemy_tank(
            &mut commands,
            Transform::from_xyz(0.0, 0.0, 5.0),
            TankTuning::default(),
            EngineAudioSettings::default(),
        )
        .expect("default settings are valid");
        let player = spawn_player_tank(&mut commands, Transform::from_xyz(0.0, 0.0, -5.0));
        commands.insert_resource(SpawnedTanks { enemy, player });
    }

    #[test]
    fn test_spawn_through_commands() {
        let mut app = App::new();
        app.add_systems(Startup, spawn_duel);
        app.update();

        let world = app.world();
        let spawned = world.resource::<SpawnedTanks>();

        assert_eq!(world.get::<TankTag>(spawned.enemy), Some(&TankTag::Enemy));
        assert!(world.get::<EnemyTank>(spawned.enemy).is_some());
        assert_eq!(world.get::<CurrentTarget>(spawned.enemy), Some(&CurrentTarget(None)));
        assert_eq!(
            world.get::<Transform>(spawned.enemy).map(|t| t.translation),
            Some(Vec3::new(0.0, 0.0, 5.0))
        );

        assert_eq!(world.get::<TankTag>(spawned.player), Some(&TankTag::Player));
        assert!(world.get::<EnemyTank>(spawned.player).is_none());
    }

    #[test]
    fn test_spawn_through_commands_rejects_bad_tuning() {
        let mut app = App::new();
        app.add_systems(Startup, |mut commands: Commands| {
            let tuning = TankTuning {
                aiming_distance: f32::INFINITY,
                ..default()
            };
            let result = spawn_enemy_tank(&mut commands, Transform::default(), tuning, EngineAudioSettings::default());
            assert!(matches!(
                result,
                Err(TankSetupError::InvalidTuning {
                    name: "aiming_distance",
                    ..
                })
            ));
        });
        app.update();

        let mut tanks = app.world_mut().query::<&EnemyTank>();
        assert_eq!(tanks.iter(app.world()).count(), 0);
    }
}
