//! ECS Components для танков
//!
//! Организация по доменам:
//! - tank: tag, marker AI танка, tuning
//!
//! Компоненты AI (CurrentTarget, SteeringCommand), звука (EngineAudio,
//! EngineAudioChannel) и прицеливания (AimHandoff) живут в своих модулях
//! и реэкспортируются здесь для единообразия.

pub mod tank;

pub use tank::*;

pub use crate::ai::{CurrentTarget, SteeringCommand};
pub use crate::audio::{EngineAudio, EngineAudioChannel};
pub use crate::shooting::AimHandoff;
