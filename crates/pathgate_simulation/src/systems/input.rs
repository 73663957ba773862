//! Pointer input system (click-to-move)

use bevy::prelude::*;

use super::adapters::NavAgentHandle;
use crate::components::{GroundPlane, NavAgent, Player, RunningAnimation, TopDownCamera};
use crate::controller::{AvatarBody, ClickOutcome, MovementController};
use crate::events::PrimaryActionEvent;
use crate::logger;

/// Система: PrimaryActionEvent → camera ray → ground hit → новый goal
///
/// # Архитектура
/// - Читает: PrimaryActionEvent (screen-space позиция)
/// - Пишет: NavAgent.destination + RunningAnimation через MovementController
/// - Query: With<Player> (скриптовые аватары кликов не получают)
///
/// Пока идёт door sequence клики отбрасываются (не буферизуются).
pub fn handle_primary_actions(
    mut events: EventReader<PrimaryActionEvent>,
    camera: Res<TopDownCamera>,
    ground: Res<GroundPlane>,
    mut players: Query<
        (Entity, &mut MovementController, &mut NavAgent, &Transform, &mut RunningAnimation),
        With<Player>,
    >,
) {
    for event in events.read() {
        for (entity, mut controller, mut agent, transform, mut running) in players.iter_mut() {
            let mut nav = NavAgentHandle {
                agent: &mut *agent,
                position: transform.translation,
            };
            let mut body = AvatarBody::new(&mut nav, &mut *running);

            let outcome =
                controller.handle_primary_action(event.screen_position, &*camera, &*ground, &mut body);

            match outcome {
                ClickOutcome::GoalSet(goal) => {
                    logger::log(&format!("Avatar {:?}: moving to {:?}", entity, goal));
                }
                ClickOutcome::NoGeometryHit | ClickOutcome::ControlWithheld => {}
            }
        }
    }
}
