//! AI tunables (sight, patrol, attack, search).
//!
//! Defaults совпадают с прототипом. Грузится из TOML, каждая секция
//! опциональна (`#[serde(default)]`).

use bevy::prelude::*;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::AIConfigError;

/// Параметры AI агента
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    pub sight: SightConfig,
    pub patrol: PatrolConfig,
    pub attack: AttackConfig,
    pub search: SearchConfig,
}

/// Параметры зрения
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SightConfig {
    /// Дальность зрения (метры). Цель на дистанции >= distance не видна
    pub distance: f32,
    /// Половина угла обзора (градусы)
    pub field_of_view: f32,
    /// Высота глаз над pivot агента
    pub eye_height: f32,
}

impl Default for SightConfig {
    fn default() -> Self {
        Self {
            distance: 20.0,
            field_of_view: 80.0,
            eye_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Waypoint считается достигнутым при remaining distance < tolerance
    pub waypoint_tolerance: f32,
    /// Пауза на waypoint перед переходом к следующему (секунды)
    pub wait_time: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            waypoint_tolerance: 0.2,
            wait_time: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Сколько секунд без визуального контакта до перехода в Search
    pub lose_sight_timeout: f32,
    pub reroute_interval: RerouteInterval,
    pub reroute_radius: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            lose_sight_timeout: 8.0,
            reroute_interval: RerouteInterval { min: 3.0, max: 7.0 },
            reroute_radius: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Сколько секунд обыскиваем область до возврата в Patrol
    pub duration: f32,
    pub reroute_interval: RerouteInterval,
    pub reroute_radius: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            reroute_interval: RerouteInterval { min: 3.0, max: 5.0 },
            reroute_radius: 10.0,
        }
    }
}

/// Интервал между случайными перемещениями (секунды, uniform [min, max))
///
/// Тянется один раз на цикл перемещения и перетягивается после reroute,
/// поэтому паузы реально распределены по всему [min, max).
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RerouteInterval {
    pub min: f32,
    pub max: f32,
}

impl RerouteInterval {
    pub fn draw(&self, rng: &mut dyn RngCore) -> f32 {
        // gen_range паникует на пустом или не-finite диапазоне (NaN, inf)
        let finite = self.min.is_finite() && self.max.is_finite();
        if !finite || self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..self.max)
    }

    fn validate(&self, section: &'static str) -> Result<(), AIConfigError> {
        let finite = self.min.is_finite() && self.max.is_finite();
        if !finite || self.min < 0.0 || self.min > self.max {
            return Err(AIConfigError::InvalidInterval {
                section,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl AIConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, AIConfigError> {
        let config: AIConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AIConfigError> {
        let distance = self.sight.distance;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(AIConfigError::InvalidSightDistance(distance));
        }

        let fov = self.sight.field_of_view;
        if !(0.0..=180.0).contains(&fov) {
            return Err(AIConfigError::InvalidFieldOfView(fov));
        }

        self.attack.reroute_interval.validate("attack")?;
        self.search.reroute_interval.validate("search")?;
        Ok(())
    }
}
