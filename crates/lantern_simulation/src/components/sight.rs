//! Sight collider: сфера для headless ray test

use bevy::prelude::*;

/// Сферический коллайдер, участвующий в проверке прямой видимости.
///
/// Стены (blockers) и сама цель должны иметь SightCollider, иначе луч
/// сквозь них проходит. Engine bridge со своей физикой может вместо этого
/// положить `SightRaycastOverride`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct SightCollider {
    pub radius: f32,
}

impl Default for SightCollider {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

impl SightCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}
