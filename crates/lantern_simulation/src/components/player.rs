//! Player marker component
//!
//! Цель, которую ищет target locator при инициализации агента.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// AI агенты без явно заданной цели получают первую entity с этим компонентом
/// (см. `locate_targets`). В single-player обычно ровно одна такая entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
