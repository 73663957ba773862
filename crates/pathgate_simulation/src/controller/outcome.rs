//! Результаты операций контроллера и ошибки

use bevy::prelude::*;
use thiserror::Error;

/// Какой collaborator отсутствует/сломан
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Door(Entity),
    Navigation(Entity),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MovementError {
    #[error("collaborator missing: {0:?}")]
    MissingCollaborator(Collaborator),

    #[error("collaborator {collaborator:?} returned invalid data: {detail}")]
    InvalidCollaboratorData {
        collaborator: Collaborator,
        detail: String,
    },
}

/// Результат primary action (click)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Попали в геометрию, goal выдан агенту
    GoalSet(Vec3),
    /// Луч никуда не попал (нормальная ситуация)
    NoGeometryHit,
    /// Контроль отобран door sequence
    ControlWithheld,
}

/// Почему повторный trigger проигнорирован (никогда не ставится в очередь)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReentrantTrigger {
    CooldownActive,
    ControlWithheld,
}

/// Результат входа в door trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerOutcome {
    SequenceStarted { wait_goal: Vec3, open_delay: f32 },
    Ignored(ReentrantTrigger),
}
