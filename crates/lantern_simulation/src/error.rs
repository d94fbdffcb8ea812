//! Ошибки конфигурации AI
//!
//! Проверяются один раз при инициализации агента (validate_agents).
//! Runtime-сбои perception/navigation ошибками не являются: деградируем
//! до "не вижу" / "не двигаюсь".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AIConfigError {
    /// Patrol route без waypoints: patrol advance не определён
    #[error("patrol route has no waypoints")]
    EmptyPatrolRoute,

    #[error("sight distance must be positive and finite, got {0}")]
    InvalidSightDistance(f32),

    #[error("field of view must be within [0, 180] degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("{section} reroute interval is invalid: min {min}, max {max}")]
    InvalidInterval {
        section: &'static str,
        min: f32,
        max: f32,
    },

    #[error("failed to parse AI config: {0}")]
    Parse(#[from] toml::de::Error),
}
