//! Headless симуляция TANKHUNT
//!
//! Один AI танк против двух танков игрока: подъезд, прицеливание, звук двигателя.

use bevy::prelude::*;
use tankhunt_simulation::{
    create_headless_app, log_error, log_info, spawn_enemy_tank, spawn_player_tank, AimHandoff, EngineAudio,
    EngineAudioSettings, EnemyTank, SimulationPlugin, SteeringCommand, TankTuning,
};

/// Startup: сцена демо
fn spawn_scenario(mut commands: Commands) {
    if let Err(err) = spawn_enemy_tank(
        &mut commands,
        Transform::from_xyz(0.0, 0.0, 0.0),
        TankTuning::default(),
        EngineAudioSettings::default(),
    ) {
        log_error(&format!("Enemy tank setup failed: {}", err));
    }

    spawn_player_tank(&mut commands, Transform::from_xyz(45.0, 0.0, -30.0));
    spawn_player_tank(&mut commands, Transform::from_xyz(-60.0, 0.0, 40.0));
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin).add_systems(Startup, spawn_scenario);

    log_info(&format!("Starting TANKHUNT headless simulation (seed: {})", seed));

    let mut enemies = app
        .world_mut()
        .query_filtered::<(Entity, &Transform, &SteeringCommand, &EngineAudio, &AimHandoff), With<EnemyTank>>();

    // 10 секунд симуляции при 60Hz
    for tick in 0..600 {
        app.update();

        if tick % 60 != 0 {
            continue;
        }

        let world = app.world();
        if enemies.iter(world).next().is_none() {
            log_error("No enemy tanks in the scene, stopping");
            std::process::exit(1);
        }

        for (entity, transform, command, engine, aim) in enemies.iter(world) {
            log_info(&format!(
                "Tick {}: tank {:?} pos {:.2?} turn {:.3} throttle {} aiming {} engine {:?}",
                tick,
                entity,
                transform.translation,
                command.turn,
                command.throttle,
                aim.is_aiming,
                engine.state()
            ));
        }
    }

    log_info("Simulation complete!");
}
