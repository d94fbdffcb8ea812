//! StateMachine: владеет активным состоянием врага
//!
//! Инварианты:
//! - после `start`/`change_state` активно ровно одно состояние
//! - смена: exit старого → присвоение нового → enter нового, в этом порядке
//! - переход запрашивает только perform активного состояния
//!
//! Lifecycle journal (Exited/Entered) копится до `drain_lifecycle`;
//! ai_fsm_tick превращает его в AIStateChanged события.

use bevy::prelude::*;

use crate::ai::context::AgentContext;
use crate::ai::states::{EnemyState, StateKind};

/// Запись lifecycle журнала
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateLifecycle {
    Exited(StateKind),
    Entered(StateKind),
}

#[derive(Component, Debug, Clone, Default)]
pub struct StateMachine {
    active: Option<EnemyState>,
    lifecycle: Vec<StateLifecycle>,
    transitions: u64,
}

impl StateMachine {
    pub fn active(&self) -> Option<&EnemyState> {
        self.active.as_ref()
    }

    /// Текущее состояние (аналог inspector поля "current state")
    pub fn current_kind(&self) -> Option<StateKind> {
        self.active.as_ref().map(EnemyState::kind)
    }

    pub fn is_started(&self) -> bool {
        self.active.is_some()
    }

    /// Сколько раз выполнялся change_state
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Входим в начальное состояние (Patrol). Повторный вызов: no-op
    pub fn start(&mut self, ctx: &mut AgentContext) {
        if self.active.is_none() {
            self.change_state(EnemyState::patrol(), ctx);
        }
    }

    /// Сменить активное состояние: exit старого, enter нового.
    ///
    /// Без dedup: тот же state дважды подряд даёт exit → enter оба раза.
    pub fn change_state(&mut self, new_state: EnemyState, ctx: &mut AgentContext) {
        if let Some(mut old) = self.active.take() {
            old.exit(ctx);
            self.lifecycle.push(StateLifecycle::Exited(old.kind()));
        }

        let kind = new_state.kind();
        let active = self.active.insert(new_state);
        active.enter(ctx);
        self.lifecycle.push(StateLifecycle::Entered(kind));
        self.transitions += 1;
    }

    /// Один тик: стартуем при необходимости, perform, применяем запрошенный переход
    pub fn tick(&mut self, ctx: &mut AgentContext) {
        self.start(ctx);

        let Some(active) = self.active.as_mut() else {
            return;
        };

        if let Some(next) = active.perform(ctx) {
            self.change_state(next, ctx);
        }
    }

    /// Забрать накопленные lifecycle записи (в порядке вызова hooks)
    pub fn drain_lifecycle(&mut self) -> Vec<StateLifecycle> {
        std::mem::take(&mut self.lifecycle)
    }
}
