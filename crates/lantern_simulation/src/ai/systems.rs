//! AI systems (FixedUpdate): target locator, validation, FSM tick.

use bevy::prelude::*;

use crate::ai::config::AIConfig;
use crate::ai::context::AgentContext;
use crate::ai::events::AIStateChanged;
use crate::ai::navigation::NavAgent;
use crate::ai::perception::{SightColliderSnapshot, SightRaycastOverride, SightRaycaster};
use crate::ai::state_machine::{StateLifecycle, StateMachine};
use crate::components::{AIDisabled, EnemyAgent, PatrolRoute, Player};
use crate::DeterministicRng;

/// Система: target locator
///
/// Новым агентам без явной цели назначаем первого Player.
/// Выполняется один раз на агента (Added), явно заданная цель не трогается.
pub fn locate_targets(
    mut agents: Query<(Entity, &mut EnemyAgent), Added<EnemyAgent>>,
    players: Query<Entity, With<Player>>,
) {
    for (entity, mut agent) in agents.iter_mut() {
        if agent.target.is_some() {
            continue;
        }

        match players.iter().next() {
            Some(player) => {
                agent.target = Some(player);
                crate::log(&format!("AI: {:?} tracking player {:?}", entity, player));
            }
            None => {
                crate::log_warning(&format!(
                    "AI: {:?} has no target (no Player entity), perception disabled",
                    entity
                ));
            }
        }
    }
}

/// Система: валидация конфигурации новых агентов
///
/// Ошибка логируется один раз, агент получает AIDisabled и больше не тикает.
pub fn validate_agents(
    mut commands: Commands,
    agents: Query<(Entity, &AIConfig, &PatrolRoute), Added<EnemyAgent>>,
) {
    for (entity, config, route) in agents.iter() {
        let result = config.validate().and_then(|_| route.validate());

        if let Err(error) = result {
            crate::log_error(&format!("AI: {:?} disabled, invalid configuration: {}", entity, error));
            commands.entity(entity).insert(AIDisabled);
        }
    }
}

/// Система: один тик FSM для каждого агента
///
/// Perception/navigation деградируют мягко: нет цели → "не вижу",
/// отказ навигации → "не двигаюсь". Тик никогда не прерывается.
pub fn ai_fsm_tick(
    mut agents: Query<
        (
            Entity,
            &mut Transform,
            &mut EnemyAgent,
            &mut StateMachine,
            &mut NavAgent,
            &PatrolRoute,
            &AIConfig,
        ),
        Without<AIDisabled>,
    >,
    targets: Query<&Transform, Without<EnemyAgent>>,
    colliders: Res<SightColliderSnapshot>,
    raycast_override: Option<Res<SightRaycastOverride>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut state_events: EventWriter<AIStateChanged>,
) {
    let delta = time.delta_secs();

    let raycaster: &dyn SightRaycaster = match raycast_override.as_deref() {
        Some(SightRaycastOverride(engine)) => &**engine,
        None => &*colliders,
    };

    for (entity, mut transform, mut agent, mut machine, mut nav, route, config) in agents.iter_mut() {
        let target_position = agent
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|target_transform| target_transform.translation);

        let mut ctx = AgentContext {
            entity,
            transform: &mut *transform,
            agent: &mut *agent,
            target_position,
            route,
            config,
            navigator: &mut *nav,
            raycaster,
            rng: &mut rng.rng,
            delta,
        };

        machine.tick(&mut ctx);

        for change in state_changes(entity, machine.drain_lifecycle()) {
            crate::log(&format!(
                "AI: {:?} {} → {}",
                entity,
                change.from.map(|kind| kind.to_string()).unwrap_or_else(|| "∅".into()),
                change.to
            ));
            state_events.write(change);
        }
    }
}

/// Lifecycle journal → AIStateChanged (Exited(a), Entered(b) → a → b)
pub fn state_changes(entity: Entity, lifecycle: Vec<StateLifecycle>) -> Vec<AIStateChanged> {
    let mut changes = Vec::new();
    let mut exited = None;

    for record in lifecycle {
        match record {
            StateLifecycle::Exited(kind) => exited = Some(kind),
            StateLifecycle::Entered(kind) => changes.push(AIStateChanged {
                entity,
                from: exited.take(),
                to: kind,
            }),
        }
    }

    changes
}
