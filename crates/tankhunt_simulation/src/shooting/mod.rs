//! Shooting domain — только handoff "можно целиться"
//!
//! Содержит:
//! - AimingStatus (event от steering, один на танк за tick)
//! - AimHandoff (последний статус для хоста)
//!
//! Сама стрельба (turret, projectile) — у хоста.

use bevy::prelude::*;

pub mod components;

// Re-export all components and functions
pub use components::*;

/// Aiming handoff plugin (Update, после decision systems)
pub struct AimingHandoffPlugin;

impl Plugin for AimingHandoffPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AimingStatus>().add_systems(
            Update,
            components::receive_aiming_status.in_set(crate::ai::TankSystems::Consumers),
        );
    }
}
