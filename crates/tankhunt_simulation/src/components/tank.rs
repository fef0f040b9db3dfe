//! Tank компоненты: tag, marker вражеского танка, tuning

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{CurrentTarget, SteeringCommand};
use crate::error::TankSetupError;
use crate::shooting::AimHandoff;

/// Tag танка в сцене (по нему AI ищет кандидатов в цели)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub enum TankTag {
    /// Танк игрока — цель по умолчанию для AI
    Player,
    /// Вражеский (AI) танк
    Enemy,
}

/// Marker: танк под управлением AI
///
/// Required Components дают пустое состояние на спавне:
/// нет цели, нулевая команда, aiming выключен.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(CurrentTarget, SteeringCommand, AimHandoff)]
pub struct EnemyTank;

/// Параметры танка (immutable после спавна)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct TankTuning {
    /// Линейная скорость (units/sec)
    pub speed: f32,
    /// Скорость поворота (degrees/sec)
    pub turn_speed: f32,
    /// Дистанция, с которой танк останавливается и целится
    pub aiming_distance: f32,
    /// Разброс pitch звука двигателя (±)
    pub pitch_range: f32,
    /// Кого преследуем
    pub target_tag: TankTag,
}

impl Default for TankTuning {
    fn default() -> Self {
        Self {
            speed: 12.0,
            turn_speed: 180.0,
            aiming_distance: 20.0,
            pitch_range: 0.2,
            target_tag: TankTag::Player,
        }
    }
}

impl TankTuning {
    /// Проверка на спавне: tick-системы потом не валидируют ничего
    pub fn validate(&self) -> Result<(), TankSetupError> {
        ensure_positive("speed", self.speed)?;
        ensure_positive("turn_speed", self.turn_speed)?;
        ensure_non_negative("aiming_distance", self.aiming_distance)?;
        ensure_non_negative("pitch_range", self.pitch_range)?;
        Ok(())
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), TankSetupError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TankSetupError::InvalidTuning {
            name,
            expected: "finite and > 0",
            value,
        })
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), TankSetupError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TankSetupError::InvalidTuning {
            name,
            expected: "finite and >= 0",
            value,
        })
    }
}
