//! Test doubles для pure core (без App)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::config::AIConfig;
use crate::ai::context::AgentContext;
use crate::ai::navigation::Navigator;
use crate::ai::perception::SightRaycaster;
use crate::components::{EnemyAgent, PatrolRoute};

/// Навигатор с ручным remaining distance; записывает все destinations
#[derive(Debug, Default)]
pub struct ScriptedNavigator {
    pub remaining: f32,
    pub stopping: f32,
    pub reject: bool,
    pub destinations: Vec<Vec3>,
}

impl Navigator for ScriptedNavigator {
    fn set_destination(&mut self, point: Vec3) -> bool {
        if self.reject {
            return false;
        }
        self.destinations.push(point);
        true
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping
    }
}

/// Raycaster, который всегда возвращает заранее заданный hit
#[derive(Debug, Default)]
pub struct ScriptedRaycaster {
    pub hit: Option<Entity>,
}

impl SightRaycaster for ScriptedRaycaster {
    fn raycast(
        &self,
        _origin: Vec3,
        _direction: Vec3,
        _max_distance: f32,
        _exclude: Option<Entity>,
    ) -> Option<Entity> {
        self.hit
    }
}

/// Агент в начале координат смотрит в -Z, цель в 5м впереди
pub struct Harness {
    pub entity: Entity,
    pub target: Entity,
    pub wall: Entity,
    pub transform: Transform,
    pub agent: EnemyAgent,
    pub target_position: Option<Vec3>,
    pub route: PatrolRoute,
    pub config: AIConfig,
    pub navigator: ScriptedNavigator,
    pub raycaster: ScriptedRaycaster,
    pub rng: ChaCha8Rng,
}

impl Harness {
    pub fn new() -> Self {
        let target = Entity::from_raw(2);
        Self {
            entity: Entity::from_raw(1),
            target,
            wall: Entity::from_raw(3),
            transform: Transform::default(),
            agent: EnemyAgent::tracking(target),
            target_position: Some(Vec3::new(0.0, 0.0, -5.0)),
            route: PatrolRoute::new(vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 10.0),
            ]),
            config: AIConfig::default(),
            navigator: ScriptedNavigator {
                stopping: 0.5,
                ..Default::default()
            },
            raycaster: ScriptedRaycaster::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
        }
    }

    /// Видимость цели: первый hit луча (цель или ничего)
    pub fn set_visible(&mut self, visible: bool) {
        self.raycaster.hit = visible.then_some(self.target);
    }

    pub fn ctx(&mut self, delta: f32) -> AgentContext<'_> {
        AgentContext {
            entity: self.entity,
            transform: &mut self.transform,
            agent: &mut self.agent,
            target_position: self.target_position,
            route: &self.route,
            config: &self.config,
            navigator: &mut self.navigator,
            raycaster: &self.raycaster,
            rng: &mut self.rng,
            delta,
        }
    }
}
