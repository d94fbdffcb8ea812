//! Enemy AI: Patrol / Attack / Search FSM
//!
//! Архитектура:
//! - pure core (StateMachine, EnemyState, perception, AgentContext): без ECS
//! - ECS обвязка (systems, AIPlugin): собирает AgentContext из компонентов
//! - движок (или HeadlessNavigationPlugin) исполняет навигацию и ray tests

use bevy::prelude::*;

pub mod config;
pub mod context;
pub mod events;
pub mod navigation;
pub mod perception;
pub mod state_machine;
pub mod states;
pub mod systems;

#[cfg(test)]
mod test_support;


// Re-export основных типов
pub use config::{AIConfig, AttackConfig, PatrolConfig, RerouteInterval, SearchConfig, SightConfig};
pub use context::AgentContext;
pub use events::AIStateChanged;
pub use navigation::{HeadlessNavigationPlugin, NavAgent, Navigator};
pub use perception::{
    can_see_target, SightColliderSnapshot, SightRaycastOverride, SightRaycaster, TargetPose,
};
pub use state_machine::{StateLifecycle, StateMachine};
pub use states::{AttackState, EnemyState, PatrolState, SearchState, StateKind};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. locate_targets: назначить Player новым агентам без цели
/// 2. validate_agents: невалидный config → AIDisabled
/// 3. refresh_sight_colliders: snapshot коллайдеров для ray tests
/// 4. ai_fsm_tick: тик FSM + AIStateChanged события
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        // Seed по умолчанию, если RNG не вставили раньше (create_headless_app)
        if !app.world().contains_resource::<crate::DeterministicRng>() {
            app.insert_resource(crate::DeterministicRng::new(crate::DEFAULT_SEED));
        }

        app.init_resource::<SightColliderSnapshot>()
            .add_event::<AIStateChanged>()
            .add_systems(
                FixedUpdate,
                (
                    systems::locate_targets,
                    systems::validate_agents,
                    perception::refresh_sight_colliders,
                    systems::ai_fsm_tick,
                )
                    .chain(), // Последовательное выполнение для детерминизма
            );
    }
}
