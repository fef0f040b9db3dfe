//! Kinematic движение танка по SteeringCommand
//!
//! Архитектура:
//! - MotionActuator — seam к телу (Transform в headless, rigid body у хоста)
//! - Translation вдоль forward: throttle × speed × dt
//! - Rotation вокруг up: turn × turn_speed × dt (градусы, + = вправо)
//!
//! Детерминизм: только FixedUpdate (60Hz), dt из Time<Fixed>

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ai::{compute_steering, AgentPose, CurrentTarget, SteeringCommand};
use crate::components::{EnemyTank, TankTuning};

/// Откуда physics tick берёт команду
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhysicsSteeringPolicy {
    /// Пересчитать steering по живой позе и перепроверенной цели
    ///
    /// FixedUpdate может отработать несколько раз за frame — команда
    /// decision tick к этому моменту уже устарела.
    ///
    /// `is_aiming` публикует (AimingStatus) только decision tick: если physics
    /// tick перевернул флаг в SteeringCommand, AimHandoff догонит его на
    /// следующем Update.
    #[default]
    Recompute,
    /// Применить команду последнего decision tick как есть
    ReuseDecision,
}

/// Тело, к которому применяются deltas
pub trait MotionActuator {
    fn apply_translation(&mut self, delta: Vec3);
    /// Поворот вокруг up оси, градусы (положительный = вправо)
    fn apply_rotation(&mut self, degrees_around_up: f32);
}

impl MotionActuator for Transform {
    fn apply_translation(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    fn apply_rotation(&mut self, degrees_around_up: f32) {
        // Bevy right-handed: поворот вправо = отрицательный угол вокруг +Y
        self.rotate_local_y(-degrees_around_up.to_radians());
    }
}

/// Один physics tick для одного тела
///
/// Translation считается по forward ДО поворота этого тика.
pub fn actuate<A: MotionActuator + ?Sized>(
    actuator: &mut A,
    forward: Vec3,
    command: &SteeringCommand,
    tuning: &TankTuning,
    delta: f32,
) {
    let movement = forward * command.throttle * tuning.speed * delta;
    actuator.apply_translation(movement);

    let turn = command.turn * tuning.turn_speed * delta;
    actuator.apply_rotation(turn);
}

/// Система: движение AI танков (FixedUpdate)
///
/// Позиции целей снимаются один раз в начале тика — порядок обхода танков
/// не влияет на результат.
pub fn drive_enemy_tanks(
    mut bodies: ParamSet<(
        Query<&Transform>,
        Query<(&mut Transform, &TankTuning, &CurrentTarget, &mut SteeringCommand), With<EnemyTank>>,
    )>,
    policy: Res<PhysicsSteeringPolicy>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    let target_positions: HashMap<Entity, Vec3> = match *policy {
        PhysicsSteeringPolicy::ReuseDecision => HashMap::new(),
        PhysicsSteeringPolicy::Recompute => {
            let wanted: Vec<Entity> = bodies.p1().iter().filter_map(|(_, _, target, _)| target.entity()).collect();
            let transforms = bodies.p0();
            wanted
                .into_iter()
                .filter_map(|entity| transforms.get(entity).ok().map(|transform| (entity, transform.translation)))
                .collect()
        }
    };

    for (mut transform, tuning, target, mut command) in bodies.p1().iter_mut() {
        if *policy == PhysicsSteeringPolicy::Recompute {
            // Despawned цель → None → танк встаёт
            let target_position = target.entity().and_then(|entity| target_positions.get(&entity).copied());
            let fresh = compute_steering(&AgentPose::from_transform(&transform), target_position, tuning.aiming_distance);
            if *command != fresh {
                *command = fresh;
            }
        }

        if command.is_stationary() {
            continue;
        }

        let forward = transform.forward().as_vec3();
        actuate(&mut *transform, forward, &command, tuning, delta);
    }
}

/// Plugin для движения танков
///
/// Регистрирует drive_enemy_tanks в FixedUpdate для детерминизма.
pub struct TankMovementPlugin;

impl Plugin for TankMovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsSteeringPolicy>()
            .add_systems(FixedUpdate, drive_enemy_tanks);
    }
}
