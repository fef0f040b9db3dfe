//! Engine audio: Idle ↔ Driving state machine
//!
//! Архитектура:
//! - ECS решает КОГДА сменить звук (по SteeringCommand)
//! - EngineAudioChannel — регистр, который хост-аудио (Godot AudioStreamPlayer)
//!   зеркалит: clip, pitch, счётчик play()
//! - Переход только при смене intent → нет повторного play() (без заиканий)

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::SteeringCommand;
use crate::error::TankSetupError;
use crate::DeterministicRng;

/// Идентификатор аудио клипа (путь ресурса хоста)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Состояние звука двигателя
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum EngineAudioState {
    #[default]
    Idle,
    Driving,
}

/// Аудио выход, которым управляет state machine
///
/// Маленький регистр: читаем текущий clip/pitch, пишем новые и дёргаем play().
pub trait AudioDevice {
    fn current_clip(&self) -> Option<&ClipId>;
    fn pitch(&self) -> f32;
    fn set_clip(&mut self, clip: ClipId);
    fn set_pitch(&mut self, pitch: f32);
    fn play(&mut self);
}

/// Аудио канал двигателя танка (ECS сторона)
///
/// Хост читает Changed<EngineAudioChannel> и перезапускает playback,
/// когда растёт `playback_requests`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EngineAudioChannel {
    pub clip: Option<ClipId>,
    pub pitch: f32,
    /// Сколько раз был вызван play()
    pub playback_requests: u32,
}

impl EngineAudioChannel {
    /// Канал с предустановленным клипом (без playback)
    pub fn new(clip: ClipId, pitch: f32) -> Self {
        Self {
            clip: Some(clip),
            pitch,
            playback_requests: 0,
        }
    }
}

impl AudioDevice for EngineAudioChannel {
    fn current_clip(&self) -> Option<&ClipId> {
        self.clip.as_ref()
    }

    fn pitch(&self) -> f32 {
        self.pitch
    }

    fn set_clip(&mut self, clip: ClipId) {
        self.clip = Some(clip);
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn play(&mut self) {
        self.playback_requests = self.playback_requests.wrapping_add(1);
    }
}

/// Аудио настройки при спавне
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineAudioSettings {
    pub idle_clip: ClipId,
    pub driving_clip: ClipId,
    /// Начальный pitch канала (становится base pitch)
    pub base_pitch: f32,
}

impl Default for EngineAudioSettings {
    fn default() -> Self {
        Self {
            idle_clip: ClipId::new("res://audio/engine_idle.wav"),
            driving_clip: ClipId::new("res://audio/engine_driving.wav"),
            base_pitch: 1.0,
        }
    }
}

/// Результат перехода (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineAudioTransition {
    pub from: EngineAudioState,
    pub to: EngineAudioState,
    pub pitch: f32,
}

/// State machine звука двигателя
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EngineAudio {
    state: EngineAudioState,
    idle_clip: ClipId,
    driving_clip: ClipId,
    /// Pitch канала на момент создания
    base_pitch: f32,
    pitch_range: f32,
}

impl EngineAudio {
    /// Создать state machine поверх уже настроенного канала
    ///
    /// Base pitch берётся из канала. Начальное состояние — по текущему клипу:
    /// Driving только если канал уже играет driving клип (и он не совпадает с idle).
    pub fn new<D: AudioDevice + ?Sized>(
        idle_clip: ClipId,
        driving_clip: ClipId,
        pitch_range: f32,
        device: &D,
    ) -> Result<Self, TankSetupError> {
        if idle_clip.is_empty() {
            return Err(TankSetupError::MissingClip {
                state: EngineAudioState::Idle,
            });
        }
        if driving_clip.is_empty() {
            return Err(TankSetupError::MissingClip {
                state: EngineAudioState::Driving,
            });
        }
        crate::components::tank::ensure_non_negative("pitch_range", pitch_range)?;

        let base_pitch = device.pitch();
        if !base_pitch.is_finite() {
            return Err(TankSetupError::InvalidTuning {
                name: "base_pitch",
                expected: "finite",
                value: base_pitch,
            });
        }

        // gen_range паникует, если диапазон pitch не конечен
        let low = base_pitch - pitch_range;
        let high = base_pitch + pitch_range;
        if !(low.is_finite() && high.is_finite() && (high - low).is_finite()) {
            return Err(TankSetupError::InvalidTuning {
                name: "pitch_range",
                expected: "small enough that base_pitch ± pitch_range stays finite",
                value: pitch_range,
            });
        }

        let current = device.current_clip().ok_or(TankSetupError::NoActiveClip)?;
        let state = if *current == driving_clip && driving_clip != idle_clip {
            EngineAudioState::Driving
        } else {
            EngineAudioState::Idle
        };

        Ok(Self {
            state,
            idle_clip,
            driving_clip,
            base_pitch,
            pitch_range,
        })
    }

    pub fn state(&self) -> EngineAudioState {
        self.state
    }

    pub fn base_pitch(&self) -> f32 {
        self.base_pitch
    }

    pub fn pitch_range(&self) -> f32 {
        self.pitch_range
    }

    pub fn clip_for(&self, state: EngineAudioState) -> &ClipId {
        match state {
            EngineAudioState::Idle => &self.idle_clip,
            EngineAudioState::Driving => &self.driving_clip,
        }
    }

    /// Какое состояние соответствует команде
    pub fn desired_state(command: &SteeringCommand) -> EngineAudioState {
        if command.is_stationary() {
            EngineAudioState::Idle
        } else {
            EngineAudioState::Driving
        }
    }

    /// Один decision tick: переход если intent поменялся, иначе no-op
    pub fn update<D, R>(&mut self, command: &SteeringCommand, device: &mut D, rng: &mut R) -> Option<EngineAudioTransition>
    where
        D: AudioDevice + ?Sized,
        R: Rng,
    {
        let desired = Self::desired_state(command);
        if desired == self.state {
            return None;
        }

        let pitch = self.sample_pitch(rng);
        device.set_clip(self.clip_for(desired).clone());
        device.set_pitch(pitch);
        device.play();

        let from = std::mem::replace(&mut self.state, desired);
        Some(EngineAudioTransition { from, to: desired, pitch })
    }

    /// pitch ∈ [base − range, base + range]
    fn sample_pitch<R: Rng>(&self, rng: &mut R) -> f32 {
        let low = self.base_pitch - self.pitch_range;
        let high = self.base_pitch + self.pitch_range;
        rng.gen_range(low..=high)
    }
}

/// Система: engine audio по SteeringCommand текущего тика
pub fn update_engine_audio(
    mut tanks: Query<(Entity, &SteeringCommand, &mut EngineAudio, &mut EngineAudioChannel)>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (entity, command, mut engine, mut channel) in tanks.iter_mut() {
        if EngineAudio::desired_state(command) == engine.state() {
            continue;
        }

        if let Some(transition) = engine.update(command, &mut *channel, &mut rng.rng) {
            crate::log(&format!(
                "🔊 Tank {:?}: engine {:?} → {:?} (clip {}, pitch {:.3})",
                entity,
                transition.from,
                transition.to,
                engine.clip_for(transition.to).as_str(),
                transition.pitch
            ));
        }
    }
}
