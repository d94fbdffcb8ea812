//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - agent: враг под управлением AI (EnemyAgent, PatrolRoute, AIDisabled)
//! - player: player marker (цель для target locator)
//! - sight: коллайдеры для headless occlusion проверок (SightCollider)
//!
//! AI компоненты (StateMachine, AIConfig, NavAgent) живут в crate::ai.

pub mod agent;
pub mod player;
pub mod sight;

pub use agent::*;
pub use player::*;
pub use sight::*;
