//! Ошибки конфигурации танка (fail fast на спавне, не в tick-системах)

use thiserror::Error;

use crate::audio::EngineAudioState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TankSetupError {
    #[error("tuning parameter `{name}` must be {expected}, got {value}")]
    InvalidTuning {
        name: &'static str,
        expected: &'static str,
        value: f32,
    },

    #[error("engine audio clip for {state:?} state is not configured")]
    MissingClip { state: EngineAudioState },

    #[error("engine audio channel has no clip assigned")]
    NoActiveClip,
}
