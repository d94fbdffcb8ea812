//! Agent context: всё, что state видит за один тик
//!
//! Собирается заново в каждом тике (ai_fsm_tick или тест) из компонентов
//! агента и capabilities. Зависимости передаются явно: никаких lookup'ов по
//! тегу внутри states.

use bevy::prelude::*;
use rand::RngCore;

use crate::ai::config::AIConfig;
use crate::ai::navigation::Navigator;
use crate::ai::perception::{can_see_target, SightRaycaster, TargetPose};
use crate::components::{EnemyAgent, PatrolRoute};

pub struct AgentContext<'a> {
    pub entity: Entity,
    /// Pose агента (принадлежит движку; AI только поворачивает к цели)
    pub transform: &'a mut Transform,
    pub agent: &'a mut EnemyAgent,
    /// Текущая позиция цели (None: цели нет или она despawned)
    pub target_position: Option<Vec3>,
    pub route: &'a PatrolRoute,
    pub config: &'a AIConfig,
    pub navigator: &'a mut dyn Navigator,
    pub raycaster: &'a dyn SightRaycaster,
    pub rng: &'a mut dyn RngCore,
    /// Длительность тика (секунды)
    pub delta: f32,
}

impl AgentContext<'_> {
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn target(&self) -> Option<TargetPose> {
        let entity = self.agent.target?;
        let position = self.target_position?;
        Some(TargetPose { entity, position })
    }

    pub fn can_see_target(&self) -> bool {
        can_see_target(
            Some(self.entity),
            &*self.transform,
            &self.config.sight,
            self.target(),
            self.raycaster,
        )
    }

    /// Запоминаем позицию цели (вызывать только когда цель видна)
    pub fn remember_target_position(&mut self) {
        if let Some(position) = self.target_position {
            self.agent.last_known_position = position;
        }
    }

    pub fn look_at_target(&mut self) {
        if let Some(position) = self.target_position {
            self.transform.look_at(position, Vec3::Y);
        }
    }

    /// Destination для навигации; отказ навигации не прерывает тик
    pub fn set_destination(&mut self, point: Vec3) {
        if !self.navigator.set_destination(point) {
            crate::log(&format!(
                "AI: {:?} navigation rejected destination {:?}",
                self.entity, point
            ));
        }
    }

    pub fn remaining_distance(&self) -> f32 {
        self.navigator.remaining_distance()
    }

    pub fn stopping_distance(&self) -> f32 {
        self.navigator.stopping_distance()
    }

    /// Случайная точка внутри сферы радиуса `radius` вокруг агента
    pub fn random_point_around(&mut self, radius: f32) -> Vec3 {
        self.position() + random_in_unit_sphere(&mut *self.rng) * radius
    }
}

/// Uniform точка внутри единичной сферы (rejection sampling)
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    use rand::Rng;

    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
