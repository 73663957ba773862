//! Door trigger systems: detection stand-in, dispatch в контроллер, cancel

use bevy::prelude::*;

use super::adapters::{DoorLookup, DoorQuery, NavAgentHandle};
use crate::components::{DoorContacts, NavAgent, RunningAnimation, TriggerVolume};
use crate::controller::{AvatarBody, Collaborator, MovementController, MovementError, TriggerOutcome};
use crate::events::{CancelDoorInteraction, DoorTriggerEntered};
use crate::logger;

/// Система: AABB trigger detection (headless замена physics trigger callbacks)
///
/// Event только на переходе outside → inside; пока аватар внутри — тишина.
pub fn detect_door_triggers(
    mut avatars: Query<(Entity, &Transform, &mut DoorContacts), With<MovementController>>,
    volumes: Query<(Entity, &Transform, &TriggerVolume)>,
    mut entered: EventWriter<DoorTriggerEntered>,
) {
    for (avatar, transform, mut contacts) in avatars.iter_mut() {
        let position = transform.translation;
        let inside: Vec<Entity> = volumes
            .iter()
            .filter(|(_, volume_transform, volume)| volume.contains(volume_transform.translation, position))
            .map(|(door, _, _)| door)
            .collect();

        for &door in &inside {
            if !contacts.inside.contains(&door) {
                entered.write(DoorTriggerEntered { avatar, door });
            }
        }

        contacts.inside = inside;
    }
}

/// Система: DoorTriggerEntered → MovementController::on_door_trigger_entered
///
/// Повторные trigger'ы (cooldown / контроль отобран) молча игнорируются,
/// отсутствующие collaborators логируются как ошибка.
pub fn handle_door_triggers(
    mut events: EventReader<DoorTriggerEntered>,
    mut avatars: Query<(&mut MovementController, &mut NavAgent, &Transform, &mut RunningAnimation)>,
    mut doors: DoorQuery,
) {
    for event in events.read() {
        let Ok((mut controller, mut agent, transform, mut running)) = avatars.get_mut(event.avatar) else {
            let error = MovementError::MissingCollaborator(Collaborator::Navigation(event.avatar));
            logger::log_error(&format!("Door trigger {:?} dropped: {}", event.door, error));
            continue;
        };

        let mut nav = NavAgentHandle {
            agent: &mut *agent,
            position: transform.translation,
        };
        let mut body = AvatarBody::new(&mut nav, &mut *running);
        let lookup = DoorLookup { doors: &mut doors };

        match controller.on_door_trigger_entered(event.door, &mut body, &lookup) {
            Ok(TriggerOutcome::SequenceStarted { .. }) => {}
            Ok(TriggerOutcome::Ignored(reason)) => {
                logger::log(&format!(
                    "Avatar {:?}: door {:?} trigger ignored ({:?})",
                    event.avatar, event.door, reason
                ));
            }
            Err(error) => {
                logger::log_error(&format!("Avatar {:?}: {}", event.avatar, error));
            }
        }
    }
}

/// Система: CancelDoorInteraction → MovementController::cancel_door_sequence
pub fn handle_cancel_requests(
    mut events: EventReader<CancelDoorInteraction>,
    mut avatars: Query<(&mut MovementController, &mut NavAgent, &Transform, &mut RunningAnimation)>,
) {
    for event in events.read() {
        let Ok((mut controller, mut agent, transform, mut running)) = avatars.get_mut(event.avatar) else {
            logger::log_warning(&format!("Cancel for unknown avatar {:?}", event.avatar));
            continue;
        };

        let mut nav = NavAgentHandle {
            agent: &mut *agent,
            position: transform.translation,
        };
        let mut body = AvatarBody::new(&mut nav, &mut *running);

        if !controller.cancel_door_sequence(&mut body) {
            logger::log(&format!("Avatar {:?}: nothing to cancel", event.avatar));
        }
    }
}
