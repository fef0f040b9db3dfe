//! Audio domain — звук двигателя танка
//!
//! Содержит:
//! - EngineAudio (Idle / Driving state machine)
//! - AudioDevice (seam к хост-аудио) + EngineAudioChannel (ECS регистр)

use bevy::prelude::*;

pub mod engine;


pub use engine::*;

/// Engine audio plugin
///
/// Работает в Update после decision systems: читает SteeringCommand этого тика.
pub struct EngineAudioPlugin;

impl Plugin for EngineAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            engine::update_engine_audio.in_set(crate::ai::TankSystems::Consumers),
        );
    }
}
