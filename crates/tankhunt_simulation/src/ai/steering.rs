//! Steering: turn + throttle к цели, переключение pursue ↔ aim по дистанции.
//!
//! Вся геометрия в горизонтальной плоскости (Y обнуляется), поэтому
//! разница высот не влияет ни на угол, ни на дистанцию.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::CurrentTarget;
use crate::components::{EnemyTank, TankTuning};
use crate::shooting::AimingStatus;

/// Допуск для "числового нуля" turn/throttle
pub const COMMAND_EPSILON: f32 = 1e-6;

/// Направления короче этого считаются нулевыми (цель в точке танка)
const DEGENERATE_DIRECTION_SQ: f32 = 1e-12;

/// Поза агента для steering расчётов
///
/// `right` — ортогонален `forward` в горизонтальной плоскости.
/// Положительный turn = поворот в сторону `right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
}

impl AgentPose {
    pub fn new(position: Vec3, forward: Vec3, right: Vec3) -> Self {
        Self {
            position,
            forward,
            right,
        }
    }

    /// Bevy convention: forward = -Z, right = +X (local)
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            forward: transform.forward().as_vec3(),
            right: transform.right().as_vec3(),
        }
    }
}

/// Команда движения на один tick
///
/// Инвариант (при наличии цели): `throttle == 1` ⇔ `!is_aiming`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct SteeringCommand {
    /// [-1, 1], знак = сторона поворота
    pub turn: f32,
    /// 0 (стоим) или 1 (едем вперёд)
    pub throttle: f32,
    /// В радиусе прицеливания — handoff для стрельбы
    pub is_aiming: bool,
}

impl SteeringCommand {
    /// Нет цели — стоим, не целимся
    pub const IDLE: Self = Self {
        turn: 0.0,
        throttle: 0.0,
        is_aiming: false,
    };

    /// turn и throttle оба (приблизительно) нулевые
    pub fn is_stationary(&self) -> bool {
        approximately_zero(self.turn) && approximately_zero(self.throttle)
    }
}

pub fn approximately_zero(value: f32) -> bool {
    value.abs() < COMMAND_EPSILON
}

/// Беззнаковый угол между векторами в градусах, [0, 180]
///
/// atan2(|a×b|, a·b) точнее acos около 0° и 180°.
/// Для нулевого вектора возвращает 0 (направления нет).
pub fn unsigned_angle_degrees(from: Vec3, to: Vec3) -> f32 {
    if from.length_squared() <= DEGENERATE_DIRECTION_SQ || to.length_squared() <= DEGENERATE_DIRECTION_SQ {
        return 0.0;
    }

    let cross = from.cross(to).length();
    let dot = from.dot(to);
    cross.atan2(dot).to_degrees().clamp(0.0, 180.0)
}

/// +1 если цель справа (или ровно на оси), -1 если слева
fn turn_sign(right: Vec3, direction: Vec3) -> f32 {
    if right.dot(direction) >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Steering к цели
///
/// 1. direction = target − position, Y = 0
/// 2. turn = sign(right·direction) × angle(forward, direction) / 180
/// 3. distance > aiming_distance → едем (throttle 1), иначе стоим и целимся
///
/// Граница `distance == aiming_distance` — уже aiming.
pub fn compute_steering(pose: &AgentPose, target: Option<Vec3>, aiming_distance: f32) -> SteeringCommand {
    let Some(target_position) = target else {
        return SteeringCommand::IDLE;
    };

    let mut direction = target_position - pose.position;
    direction.y = 0.0;

    let turn = if direction.length_squared() <= DEGENERATE_DIRECTION_SQ {
        // Цель в той же точке: угла нет, не поворачиваем
        0.0
    } else {
        let angle = unsigned_angle_degrees(pose.forward, direction);
        (turn_sign(pose.right, direction) * angle / 180.0).clamp(-1.0, 1.0)
    };

    // NaN позы не должны уйти в actuator
    let turn = if turn.is_finite() { turn } else { 0.0 };

    let distance = direction.length();
    if distance > aiming_distance {
        SteeringCommand {
            turn,
            throttle: 1.0,
            is_aiming: false,
        }
    } else {
        SteeringCommand {
            turn,
            throttle: 0.0,
            is_aiming: true,
        }
    }
}

/// Резолв weak reference цели в позицию (None если entity уже нет)
pub fn resolve_target_position(current: &CurrentTarget, targets: &Query<&Transform>) -> Option<Vec3> {
    current
        .entity()
        .and_then(|entity| targets.get(entity).ok())
        .map(|transform| transform.translation)
}

/// Система: decision tick steering
///
/// Пересчитывает SteeringCommand с нуля и публикует AimingStatus для
/// стрельбы (один event на танк за tick вместо общего флага).
pub fn update_steering_commands(
    mut tanks: Query<(Entity, &Transform, &TankTuning, &CurrentTarget, &mut SteeringCommand), With<EnemyTank>>,
    targets: Query<&Transform>,
    mut aiming_events: EventWriter<AimingStatus>,
) {
    for (entity, transform, tuning, current, mut command) in tanks.iter_mut() {
        let target_position = resolve_target_position(current, &targets);
        let target = target_position.and(current.entity());

        let new_command = compute_steering(&AgentPose::from_transform(transform), target_position, tuning.aiming_distance);

        if new_command.is_aiming != command.is_aiming {
            crate::log(&format!(
                "🔭 Tank {:?}: aiming {} (target {:?})",
                entity,
                if new_command.is_aiming { "ON" } else { "OFF" },
                target
            ));
        }

        if *command != new_command {
            *command = new_command;
        }

        aiming_events.write(AimingStatus {
            tank: entity,
            target,
            is_aiming: new_command.is_aiming,
        });
    }
}
