//! Navigation capability
//!
//! Pathfinding делает движок (NavMesh). AI только ставит destination и читает
//! remaining distance через `Navigator`. `NavAgent`: ECS-сторона этого
//! контракта: AI пишет destination, bridge движка обновляет remaining_distance.
//!
//! Для headless режима есть `HeadlessNavigationPlugin`: прямолинейное
//! движение к destination без препятствий.

use bevy::prelude::*;

use crate::components::EnemyAgent;

/// Capability: навигация агента
pub trait Navigator {
    /// Запросить путь к точке. false: запрос отклонён (AI просто не двигается)
    fn set_destination(&mut self, point: Vec3) -> bool;

    /// Оставшаяся дистанция до текущего destination
    fn remaining_distance(&self) -> f32;

    /// Дистанция, на которой агент считает destination достигнутым
    fn stopping_distance(&self) -> f32;
}

/// Состояние навигации агента
///
/// - `destination` пишет AI (через Navigator)
/// - `remaining_distance` пишет engine bridge (или headless navigator)
/// - `path_pending` = true между set_destination и первым обновлением от движка
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    pub remaining_distance: f32,
    pub stopping_distance: f32,
    /// Скорость движения (m/s), используется движком / headless navigator
    pub speed: f32,
    pub path_pending: bool,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            // Без пути движок отдаёт 0 (как "уже на месте")
            remaining_distance: 0.0,
            stopping_distance: 0.5,
            speed: 2.0, // 2 m/s: базовая скорость ходьбы
            path_pending: false,
        }
    }
}

impl Navigator for NavAgent {
    fn set_destination(&mut self, point: Vec3) -> bool {
        if !point.is_finite() {
            return false;
        }
        self.destination = Some(point);
        self.path_pending = true;
        true
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }
}

/// Система: headless навигация (без NavMesh)
///
/// Двигает Transform агента к destination со скоростью NavAgent.speed
/// и обновляет remaining_distance. Работает в FixedUpdate после AI тика.
pub fn advance_nav_agents(
    mut agents: Query<(&mut Transform, &mut NavAgent), With<EnemyAgent>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut nav) in agents.iter_mut() {
        let Some(destination) = nav.destination else {
            nav.remaining_distance = 0.0;
            nav.path_pending = false;
            continue;
        };

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();
        let step = nav.speed * delta;

        if distance <= step {
            transform.translation = destination;
            nav.remaining_distance = 0.0;
        } else {
            transform.translation += to_destination / distance * step;
            nav.remaining_distance = distance - step;
        }
        nav.path_pending = false;
    }
}

/// Plugin для headless навигации
///
/// Подключается только без движка: в игре NavAgent обновляет engine bridge.
pub struct HeadlessNavigationPlugin;

impl Plugin for HeadlessNavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            advance_nav_agents.after(crate::ai::systems::ai_fsm_tick),
        );
    }
}
