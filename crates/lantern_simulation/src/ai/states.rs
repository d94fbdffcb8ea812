//! Состояния врага: Patrol / Attack / Search
//!
//! Tagged union: каждый вариант несёт только свои таймеры, переходы без
//! heap allocation. Каждый state:
//! - `enter`: сброс таймеров, one-time side effects
//! - `perform`: логика тика; возвращает запрос на переход (или None)
//! - `exit`: cleanup (сейчас no-op у всех вариантов)
//!
//! Переход запрашивается только из собственного perform; применяет его
//! StateMachine.

use std::fmt;

use bevy::prelude::*;

use crate::ai::context::AgentContext;

/// Вид состояния (для логов, событий, debug overlay)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum StateKind {
    Patrol,
    Attack,
    Search,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Patrol => "Patrol",
            StateKind::Attack => "Attack",
            StateKind::Search => "Search",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnemyState {
    Patrol(PatrolState),
    Attack(AttackState),
    Search(SearchState),
}

impl EnemyState {
    pub fn patrol() -> Self {
        Self::Patrol(PatrolState::default())
    }

    pub fn attack() -> Self {
        Self::Attack(AttackState::default())
    }

    pub fn search() -> Self {
        Self::Search(SearchState::default())
    }

    pub fn kind(&self) -> StateKind {
        match self {
            EnemyState::Patrol(_) => StateKind::Patrol,
            EnemyState::Attack(_) => StateKind::Attack,
            EnemyState::Search(_) => StateKind::Search,
        }
    }

    pub(crate) fn enter(&mut self, ctx: &mut AgentContext) {
        match self {
            EnemyState::Patrol(state) => state.enter(ctx),
            EnemyState::Attack(state) => state.enter(ctx),
            EnemyState::Search(state) => state.enter(ctx),
        }
    }

    pub(crate) fn perform(&mut self, ctx: &mut AgentContext) -> Option<EnemyState> {
        match self {
            EnemyState::Patrol(state) => state.perform(ctx),
            EnemyState::Attack(state) => state.perform(ctx),
            EnemyState::Search(state) => state.perform(ctx),
        }
    }

    pub(crate) fn exit(&mut self, _ctx: &mut AgentContext) {
        // Ни один вариант пока не имеет exit side effects
    }
}

/// Patrol: обход waypoints по кругу с паузой на каждом
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatrolState {
    pub waypoint_index: usize,
    pub wait_timer: f32,
}

impl PatrolState {
    fn enter(&mut self, _ctx: &mut AgentContext) {
        // Destination не выставляем: агент стартует на первом waypoint,
        // ждёт wait_time и идёт к следующему
        self.wait_timer = 0.0;
    }

    fn perform(&mut self, ctx: &mut AgentContext) -> Option<EnemyState> {
        self.patrol_cycle(ctx);

        if ctx.can_see_target() {
            return Some(EnemyState::attack());
        }
        None
    }

    fn patrol_cycle(&mut self, ctx: &mut AgentContext) {
        let patrol = &ctx.config.patrol;
        if ctx.remaining_distance() >= patrol.waypoint_tolerance {
            return;
        }

        self.wait_timer += ctx.delta;
        if self.wait_timer <= patrol.wait_time {
            return;
        }

        self.waypoint_index = ctx.route.next_index(self.waypoint_index);
        self.wait_timer = 0.0;

        if let Some(waypoint) = ctx.route.waypoint(self.waypoint_index) {
            ctx.set_destination(waypoint);
        }
    }
}

/// Attack: цель видна, держим её в фокусе, периодически смещаемся
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackState {
    pub move_timer: f32,
    /// Время без визуального контакта
    pub attack_timer: f32,
    /// Накопитель для будущей стрельбы; сейчас только растёт пока цель видна
    pub shot_timer: f32,
    pub move_interval: f32,
}

impl AttackState {
    fn enter(&mut self, ctx: &mut AgentContext) {
        self.move_timer = 0.0;
        self.attack_timer = 0.0;
        self.shot_timer = 0.0;
        self.move_interval = ctx.config.attack.reroute_interval.draw(&mut *ctx.rng);
    }

    fn perform(&mut self, ctx: &mut AgentContext) -> Option<EnemyState> {
        if ctx.can_see_target() {
            self.attack_timer = 0.0;
            self.move_timer += ctx.delta;
            self.shot_timer += ctx.delta;
            ctx.look_at_target();

            if self.move_timer > self.move_interval {
                let destination = ctx.random_point_around(ctx.config.attack.reroute_radius);
                ctx.set_destination(destination);
                self.move_timer = 0.0;
                self.move_interval = ctx.config.attack.reroute_interval.draw(&mut *ctx.rng);
            }

            ctx.remember_target_position();
            return None;
        }

        self.attack_timer += ctx.delta;
        if self.attack_timer > ctx.config.attack.lose_sight_timeout {
            return Some(EnemyState::search());
        }
        None
    }
}

/// Search: идём к last known position и обыскиваем область
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub search_timer: f32,
    pub move_timer: f32,
    pub move_interval: f32,
}

impl SearchState {
    fn enter(&mut self, ctx: &mut AgentContext) {
        self.search_timer = 0.0;
        self.move_timer = 0.0;
        self.move_interval = ctx.config.search.reroute_interval.draw(&mut *ctx.rng);

        let last_known = ctx.agent.last_known_position;
        ctx.set_destination(last_known);
    }

    fn perform(&mut self, ctx: &mut AgentContext) -> Option<EnemyState> {
        // Визуальный контакт прерывает поиск сразу
        if ctx.can_see_target() {
            return Some(EnemyState::attack());
        }

        if ctx.remaining_distance() >= ctx.stopping_distance() {
            return None;
        }

        self.search_timer += ctx.delta;
        self.move_timer += ctx.delta;

        if self.move_timer > self.move_interval {
            let destination = ctx.random_point_around(ctx.config.search.reroute_radius);
            ctx.set_destination(destination);
            self.move_timer = 0.0;
            self.move_interval = ctx.config.search.reroute_interval.draw(&mut *ctx.rng);
        }

        if self.search_timer > ctx.config.search.duration {
            return Some(EnemyState::patrol());
        }
        None
    }
}
