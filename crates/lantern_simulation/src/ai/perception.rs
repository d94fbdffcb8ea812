//! Perception: line-of-sight проверка агент → цель
//!
//! Порядок проверок (fail fast):
//! 1. цель не задана → не видим
//! 2. distance(agent, target) >= sight.distance → не видим
//! 3. угол между forward и направлением из глаз на цель > field_of_view → не видим
//! 4. raycast из глаз: видим только если первый hit это сама цель
//!
//! Без сглаживания/гистерезиса: пересчитывается заново каждый тик.
//!
//! Forward агента: `Transform::forward()` (в Bevy это -Z).

use bevy::prelude::*;

use crate::ai::config::SightConfig;
use crate::components::SightCollider;

/// Capability: occlusion ray test
pub trait SightRaycaster {
    /// Первый entity на луче `origin + direction * t`, `0 <= t <= max_distance`.
    /// `direction` нормализован. Коллайдер `exclude` (обычно сам наблюдатель) лучом не ловится.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<Entity>;
}

/// Цель, как её видит perception в данный тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPose {
    pub entity: Entity,
    pub position: Vec3,
}

/// Видит ли агент цель
///
/// `observer`: entity агента, его собственный коллайдер не закрывает обзор.
pub fn can_see_target(
    observer: Option<Entity>,
    agent: &Transform,
    sight: &SightConfig,
    target: Option<TargetPose>,
    raycaster: &dyn SightRaycaster,
) -> bool {
    let Some(target) = target else {
        return false;
    };

    let distance = agent.translation.distance(target.position);
    if distance >= sight.distance {
        return false;
    }

    let eye = agent.translation + Vec3::Y * sight.eye_height;
    let Some(direction) = (target.position - eye).try_normalize() else {
        return false;
    };

    // angle_between всегда в [0, 180], поэтому FOV: это просто верхняя граница
    let angle = direction.angle_between(*agent.forward()).to_degrees();
    if angle > sight.field_of_view {
        return false;
    }

    raycaster.raycast(eye, direction, sight.distance, observer) == Some(target.entity)
}

/// Snapshot сферических коллайдеров (headless physics stand-in)
///
/// Пересобирается каждый FixedUpdate тик системой `refresh_sight_colliders`.
#[derive(Resource, Debug, Clone, Default)]
pub struct SightColliderSnapshot {
    pub colliders: Vec<(Entity, Vec3, f32)>,
}

impl SightRaycaster for SightColliderSnapshot {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<Entity> {
        let mut nearest: Option<(Entity, f32)> = None;

        for &(entity, center, radius) in &self.colliders {
            if exclude == Some(entity) {
                continue;
            }

            let offset = origin - center;
            let c = offset.length_squared() - radius * radius;

            // Луч стартует внутри чужой сферы: hit сразу на t = 0
            let t = if c <= 0.0 {
                0.0
            } else {
                let b = offset.dot(direction);
                let discriminant = b * b - c;
                if discriminant < 0.0 {
                    continue;
                }

                let t = -b - discriminant.sqrt();
                if t < 0.0 || t > max_distance {
                    continue;
                }
                t
            };

            match nearest {
                Some((_, best)) if best <= t => {}
                _ => nearest = Some((entity, t)),
            }
        }

        nearest.map(|(entity, _)| entity)
    }
}

/// Engine-provided ray test (NavMesh/physics world движка)
///
/// Если ресурс есть, используется вместо SightColliderSnapshot.
#[derive(Resource)]
pub struct SightRaycastOverride(pub Box<dyn SightRaycaster + Send + Sync>);

/// Система: пересобрать SightColliderSnapshot
pub fn refresh_sight_colliders(
    colliders: Query<(Entity, &Transform, &SightCollider)>,
    mut snapshot: ResMut<SightColliderSnapshot>,
) {
    snapshot.colliders.clear();
    snapshot.colliders.extend(
        colliders
            .iter()
            .map(|(entity, transform, collider)| (entity, transform.translation, collider.radius)),
    );
    // Стабильный порядок для детерминизма (равные t → меньший index)
    snapshot.colliders.sort_by_key(|(entity, _, _)| entity.index());
}
