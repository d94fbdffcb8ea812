//! Headless симуляция Lantern
//!
//! Один охранник патрулирует квадрат, игрок проходит мимо стены и
//! попадает в поле зрения. Печатает смены состояний AI.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use lantern_simulation::*;

/// Игрок идёт вдоль X с постоянной скоростью
fn walk_player(mut players: Query<&mut Transform, With<Player>>, time: Res<Time<Fixed>>) {
    for mut transform in players.iter_mut() {
        transform.translation.x += 1.5 * time.delta_secs();
    }
}

fn report_state_changes(mut events: EventReader<AIStateChanged>) {
    for event in events.read() {
        let from = event.from.map(|kind| kind.to_string()).unwrap_or_else(|| "-".into());
        log_info(&format!("{:?}: {} → {}", event.entity, from, event.to));
    }
}

fn main() {
    let seed = DEFAULT_SEED;
    println!("Starting Lantern headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessNavigationPlugin))
        // Один app.update() = один fixed tick, независимо от wall clock
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        )))
        .add_systems(FixedUpdate, walk_player.before(lantern_simulation::ai::systems::ai_fsm_tick))
        .add_systems(Update, report_state_changes);

    let route = PatrolRoute::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(8.0, 0.0, 0.0),
        Vec3::new(8.0, 0.0, -8.0),
        Vec3::new(0.0, 0.0, -8.0),
    ]);

    let world = app.world_mut();
    world.spawn((Player, Transform::from_xyz(-12.0, 0.0, -14.0), SightCollider::new(0.4)));
    world.spawn((Transform::from_xyz(4.0, 0.0, -11.0), SightCollider::new(1.5)));
    world.spawn(enemy_bundle(route, AIConfig::default()));

    // 1200 тиков = 20 секунд при 60Hz
    for tick in 0..1200 {
        app.update();

        if tick % 300 == 0 {
            let mut query = app.world_mut().query::<(Entity, &StateMachine, &Transform)>();
            for (entity, machine, transform) in query.iter(app.world()) {
                let state = machine
                    .current_kind()
                    .map(|kind| kind.to_string())
                    .unwrap_or_else(|| "-".into());
                println!("Tick {}: {:?} {} at {:?}", tick, entity, state, transform.translation);
            }
        }
    }

    println!("Simulation complete!");
}
