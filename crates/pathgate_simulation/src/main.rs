//! Headless симуляция Pathgate
//!
//! Аватар ходит по случайным кликам (seeded), по пути через дверь.

use bevy::prelude::*;
use rand::Rng;
use pathgate_simulation::logger;
use pathgate_simulation::*;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    // Debug (каждый клик и переход sequence) слишком шумный для 3000 тиков
    logger::set_log_level(logger::LogLevel::Info);
    logger::log_info(&format!("Starting Pathgate headless simulation (seed: {})", seed));

    let config = app.world().resource::<MovementConfig>().clone();
    let avatar = spawn_avatar(app.world_mut(), Vec3::ZERO, &config);
    spawn_door(app.world_mut(), Vec3::new(2.0, 0.0, 2.0), &config);

    let camera = *app.world().resource::<TopDownCamera>();
    app.world_mut().send_event(PrimaryActionEvent {
        screen_position: camera.world_to_viewport(Vec3::new(5.0, 0.0, 5.0)),
    });

    // 3000 тиков = 50 секунд при 60Hz
    for tick in 0..3000 {
        app.update();

        let Some(controller) = app.world().get::<MovementController>(avatar) else {
            break;
        };

        if controller.has_control() && !controller.is_moving() {
            let target = {
                let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
                Vec3::new(rng.rng.gen_range(-8.0..8.0), 0.0, rng.rng.gen_range(-8.0..8.0))
            };
            app.world_mut().send_event(PrimaryActionEvent {
                screen_position: camera.world_to_viewport(target),
            });
        }

        if tick % 300 == 0 {
            if let Some(position) = app.world().get::<Transform>(avatar).map(|t| t.translation) {
                logger::log_info(&format!("Tick {}: avatar at {:?}", tick, position));
            }
        }
    }

    logger::log_info("Simulation complete!");
}
