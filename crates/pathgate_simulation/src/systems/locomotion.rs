//! Locomotion systems: steering stand-in + tick контроллеров

use bevy::prelude::*;

use super::adapters::{DoorLookup, DoorQuery, NavAgentHandle};
use crate::components::{NavAgent, RunningAnimation};
use crate::controller::{AvatarBody, MovementController};
use crate::logger;

/// Система: двигает агентов по прямой к destination
///
/// Headless замена navmesh locomotion. Останавливается внутри stopping distance
/// и пока `is_stopped`.
pub fn steer_nav_agents(mut agents: Query<(&NavAgent, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (agent, mut transform) in agents.iter_mut() {
        if agent.is_stopped || agent.has_arrived(transform.translation) {
            continue;
        }

        let to_goal = agent.destination - transform.translation;
        let distance = to_goal.length();
        let step = agent.speed * delta;

        if step >= distance {
            transform.translation = agent.destination;
        } else {
            transform.translation += to_goal / distance * step;
        }
    }
}

/// Система: tick всех MovementController (door sequencer → monitor → cooldown)
///
/// Запускается ПОСЛЕ handle_door_triggers, чтобы monitor в этом же кадре
/// видел только что выданный wait goal.
pub fn tick_movement_controllers(
    mut avatars: Query<(
        Entity,
        &mut MovementController,
        &mut NavAgent,
        &Transform,
        &mut RunningAnimation,
    )>,
    mut doors: DoorQuery,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut controller, mut agent, transform, mut running) in avatars.iter_mut() {
        let mut nav = NavAgentHandle {
            agent: &mut *agent,
            position: transform.translation,
        };
        let mut body = AvatarBody::new(&mut nav, &mut *running);
        let mut lookup = DoorLookup { doors: &mut doors };

        if let Err(error) = controller.tick(delta, &mut body, &mut lookup) {
            logger::log_error(&format!("Avatar {:?}: {}", entity, error));
        }
    }
}
