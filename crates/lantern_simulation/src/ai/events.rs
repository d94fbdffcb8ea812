//! AI Events: наружу для renderer / debug overlay

use bevy::prelude::*;

use crate::ai::states::StateKind;

/// Активное состояние агента сменилось
///
/// `from` = None только для первого входа (start в Patrol).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AIStateChanged {
    pub entity: Entity,
    pub from: Option<StateKind>,
    pub to: StateKind,
}
