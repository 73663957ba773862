//! MovementController — click-to-move + door interruption state machine
//!
//! Три подсистемы внутри одного компонента:
//! - input translator: click → ray → goal (только пока `has_control`)
//! - locomotion monitor: каждый tick сравнивает позицию с goal
//! - door sequencer: MovingToWait → WaitingForDoor → Resuming → (goal восстановлен)
//!
//! Порядок внутри кадра (см. `MovementControllerPlugin`):
//! click → door trigger → `tick` (sequencer → monitor → cooldown)

use bevy::prelude::*;

use super::collaborators::{AvatarBody, DoorRegistry, SceneRaycast, ViewCamera};
use super::outcome::{ClickOutcome, Collaborator, MovementError, ReentrantTrigger, TriggerOutcome};
use super::state::{AvatarState, DoorSequence, SequencePhase};
use crate::config::DOOR_COOLDOWN_SECS;
use crate::logger;

/// Per-avatar контроллер движения
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MovementController {
    state: AvatarState,
    /// Окно cooldown'а (секунды)
    cooldown_window: f32,
}

impl MovementController {
    /// `initial_goal` — обычно spawn позиция (аватар стоит на месте)
    pub fn new(initial_goal: Vec3) -> Self {
        Self {
            state: AvatarState::new(initial_goal),
            cooldown_window: DOOR_COOLDOWN_SECS,
        }
    }

    pub fn with_cooldown(mut self, window: f32) -> Self {
        self.cooldown_window = window;
        self
    }

    pub fn state(&self) -> &AvatarState {
        &self.state
    }

    pub fn has_control(&self) -> bool {
        self.state.has_control
    }

    pub fn current_goal(&self) -> Vec3 {
        self.state.current_goal
    }

    pub fn is_moving(&self) -> bool {
        self.state.is_moving
    }

    pub fn is_cooldown_active(&self) -> bool {
        self.state.cooldown.is_active()
    }

    pub fn pending_sequence(&self) -> Option<&DoorSequence> {
        self.state.pending_sequence.as_ref()
    }

    /// Primary pointer action (LMB click)
    pub fn handle_primary_action(
        &mut self,
        screen_position: Vec2,
        camera: &dyn ViewCamera,
        scene: &dyn SceneRaycast,
        body: &mut AvatarBody,
    ) -> ClickOutcome {
        if !self.state.has_control {
            return ClickOutcome::ControlWithheld;
        }

        let Some(hit) = camera
            .viewport_to_ray(screen_position)
            .and_then(|ray| scene.cast(ray))
        else {
            return ClickOutcome::NoGeometryHit;
        };

        self.issue_goal(hit, body);
        ClickOutcome::GoalSet(hit)
    }

    /// Аватар вошёл в trigger volume двери
    ///
    /// Все эффекты атомарны: если дверь не резолвится — состояние не меняется.
    pub fn on_door_trigger_entered(
        &mut self,
        door: Entity,
        body: &mut AvatarBody,
        doors: &dyn DoorRegistry,
    ) -> Result<TriggerOutcome, MovementError> {
        if self.state.cooldown.is_active() {
            return Ok(TriggerOutcome::Ignored(ReentrantTrigger::CooldownActive));
        }
        if !self.state.has_control || self.state.pending_sequence.is_some() {
            return Ok(TriggerOutcome::Ignored(ReentrantTrigger::ControlWithheld));
        }

        let from = body.agent.position();
        let missing = MovementError::MissingCollaborator(Collaborator::Door(door));
        let wait_goal = doors.wait_position(door, from).ok_or_else(|| missing.clone())?;
        let open_delay = doors.animation_duration(door).ok_or(missing)?;

        if !wait_goal.is_finite() {
            return Err(MovementError::InvalidCollaboratorData {
                collaborator: Collaborator::Door(door),
                detail: format!("wait position {:?} is not finite", wait_goal),
            });
        }
        if !open_delay.is_finite() {
            return Err(MovementError::InvalidCollaboratorData {
                collaborator: Collaborator::Door(door),
                detail: format!("animation duration {} is not finite", open_delay),
            });
        }
        let open_delay = open_delay.max(0.0);

        let agent_destination = body.agent.destination();
        if agent_destination.distance(self.state.current_goal) > body.agent.stopping_distance() {
            logger::log_warning(&format!(
                "Door {:?}: agent destination {:?} diverged from goal {:?}, resuming to goal",
                door, agent_destination, self.state.current_goal
            ));
        }

        self.state.cooldown.start();
        self.state.has_control = false;
        self.state.pending_sequence = Some(DoorSequence {
            door,
            final_goal: self.state.current_goal,
            wait_goal,
            open_delay,
            phase: SequencePhase::MovingToWait,
        });
        self.issue_goal(wait_goal, body);

        logger::log_info(&format!(
            "Door {:?}: sequence started (wait at {:?}, delay {:.2}s, resume to {:?})",
            door, wait_goal, open_delay, self.state.current_goal
        ));
        if let Some(sequence) = &self.state.pending_sequence {
            logger::log(&format!("Door {:?}: final goal {:?} saved", door, sequence.final_goal));
        }

        Ok(TriggerOutcome::SequenceStarted { wait_goal, open_delay })
    }

    /// Один tick: door sequencer → locomotion monitor → cooldown
    ///
    /// Ошибка возвращается если дверь исчезла посреди sequence; в этом случае
    /// sequence уже прервана и контроль возвращён.
    pub fn tick(
        &mut self,
        delta: f32,
        body: &mut AvatarBody,
        doors: &mut dyn DoorRegistry,
    ) -> Result<(), MovementError> {
        let sequence_result = self.advance_sequence(delta, body, doors);

        // Monitor goal-agnostic: работает и для click goal, и для wait goal
        if self.state.is_moving && !body.is_away_from(self.state.current_goal) {
            self.state.is_moving = false;
            body.animation.set_running(false);
        }

        if self.state.cooldown.advance(delta, self.cooldown_window) {
            logger::log("Door cooldown expired");
        }

        sequence_result
    }

    /// Прервать активную door sequence (в любой фазе)
    ///
    /// Возвращает true если sequence была. Cooldown перезапускается, чтобы
    /// аватар не влетел в тот же trigger сразу же.
    pub fn cancel_door_sequence(&mut self, body: &mut AvatarBody) -> bool {
        let Some(sequence) = self.state.pending_sequence.take() else {
            return false;
        };

        logger::log_info(&format!(
            "Door {:?}: sequence cancelled in {:?}",
            sequence.door, sequence.phase
        ));
        self.finish_sequence(sequence, body);
        self.state.cooldown.start();
        true
    }

    fn advance_sequence(
        &mut self,
        delta: f32,
        body: &mut AvatarBody,
        doors: &mut dyn DoorRegistry,
    ) -> Result<(), MovementError> {
        let Some(mut sequence) = self.state.pending_sequence.take() else {
            return Ok(());
        };

        loop {
            let phase = sequence.phase;
            let next_phase = match phase {
                SequencePhase::MovingToWait => {
                    if body.is_away_from(self.state.current_goal) {
                        // Ещё идём — poll на следующем tick
                        break;
                    }

                    if doors.open(sequence.door).is_none() {
                        let door = sequence.door;
                        logger::log_error(&format!(
                            "Door {:?} vanished before open, aborting sequence",
                            door
                        ));
                        self.finish_sequence(sequence, body);
                        self.state.cooldown.start();
                        return Err(MovementError::MissingCollaborator(Collaborator::Door(door)));
                    }

                    logger::log(&format!("Door {:?}: arrived at wait goal, opening", sequence.door));
                    // Ожидание начинается со следующего tick'а
                    sequence.phase = SequencePhase::WaitingForDoor { remaining: sequence.open_delay };
                    break;
                }

                SequencePhase::WaitingForDoor { remaining } => {
                    let remaining = remaining - delta;
                    if remaining > 0.0 {
                        sequence.phase = SequencePhase::WaitingForDoor { remaining };
                        break;
                    }
                    SequencePhase::Resuming
                }

                SequencePhase::Resuming => {
                    logger::log_info(&format!(
                        "Door {:?}: sequence finished, resuming to {:?}",
                        sequence.door, sequence.final_goal
                    ));
                    self.finish_sequence(sequence, body);
                    return Ok(());
                }
            };

            sequence.phase = next_phase;
        }

        self.state.pending_sequence = Some(sequence);
        Ok(())
    }

    /// Восстановить final goal и вернуть контроль (ровно один раз на sequence)
    fn finish_sequence(&mut self, sequence: DoorSequence, body: &mut AvatarBody) {
        self.issue_goal(sequence.final_goal, body);
        body.agent.set_stopped(false);
        self.state.has_control = true;
    }

    fn issue_goal(&mut self, goal: Vec3, body: &mut AvatarBody) {
        self.state.current_goal = goal;
        self.state.is_moving = true;
        body.animation.set_running(true);
        body.agent.set_destination(goal);
    }
}
