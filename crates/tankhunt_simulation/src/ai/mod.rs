//! AI decision-making module
//!
//! Decision tick для вражеских танков:
//! ближайшая цель → steering (turn, throttle) → aiming handoff.
//! Звук двигателя и физика читают результат (SteeringCommand).

use bevy::prelude::*;

pub mod steering;
pub mod targeting;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod steering_tests;

// Re-export основных типов
pub use steering::{
    approximately_zero, compute_steering, resolve_target_position, unsigned_angle_degrees, update_steering_commands,
    AgentPose, SteeringCommand, COMMAND_EPSILON,
};
pub use targeting::{select_nearest, select_nearest_targets, CurrentTarget};

/// Порядок decision tick (Update)
///
/// Consumers (звук, стрельба) ставятся `.after(TankSystems::Decision)`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TankSystems {
    /// targeting → steering
    Decision,
    /// Читатели SteeringCommand / AimingStatus
    Consumers,
}

/// AI Plugin
///
/// Регистрирует decision systems в Update.
/// Порядок выполнения:
/// 1. select_nearest_targets — поиск ближайшей цели (weak reference)
/// 2. update_steering_commands — SteeringCommand + AimingStatus event
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<crate::shooting::AimingStatus>()
            .configure_sets(Update, (TankSystems::Decision, TankSystems::Consumers).chain())
            .add_systems(
                Update,
                (targeting::select_nearest_targets, steering::update_steering_commands)
                    .chain() // Steering читает CurrentTarget этого же тика
                    .in_set(TankSystems::Decision),
            );
    }
}
