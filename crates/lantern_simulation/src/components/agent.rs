//! Enemy agent компоненты: EnemyAgent, PatrolRoute, AIDisabled

use bevy::prelude::*;

use crate::error::AIConfigError;

/// Враг под управлением AI
///
/// Pose (Transform) принадлежит движку; здесь только то, что AI помнит сам.
///
/// Остальное AI добавляется через Required Components. Забытый маршрут
/// становится пустым и репортится validate_agents как EmptyPatrolRoute.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    PatrolRoute,
    crate::ai::AIConfig,
    crate::ai::NavAgent,
    crate::ai::StateMachine
)]
pub struct EnemyAgent {
    /// Отслеживаемая цель. None → perception всегда "не вижу"
    pub target: Option<Entity>,
    /// Последняя подтверждённая позиция цели.
    /// Пишут только Attack/Search пока видят цель, читает Search на входе.
    pub last_known_position: Vec3,
}

impl EnemyAgent {
    pub fn tracking(target: Entity) -> Self {
        Self {
            target: Some(target),
            ..default()
        }
    }
}

/// Маршрут патруля (read-only после authoring)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub waypoints: Vec<Vec3>,
}

impl PatrolRoute {
    pub fn new(waypoints: impl Into<Vec<Vec3>>) -> Self {
        Self {
            waypoints: waypoints.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Следующий индекс с wrap на 0 после последнего waypoint
    pub fn next_index(&self, index: usize) -> usize {
        if self.waypoints.is_empty() {
            return 0;
        }
        (index + 1) % self.waypoints.len()
    }

    pub fn waypoint(&self, index: usize) -> Option<Vec3> {
        if self.waypoints.is_empty() {
            return None;
        }
        self.waypoints.get(index % self.waypoints.len()).copied()
    }

    pub fn validate(&self) -> Result<(), AIConfigError> {
        if self.waypoints.is_empty() {
            return Err(AIConfigError::EmptyPatrolRoute);
        }
        Ok(())
    }
}

/// Marker: конфигурация агента невалидна, AI не тикает.
///
/// Вставляется validate_agents один раз, ошибка логируется один раз.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AIDisabled;
