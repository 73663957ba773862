//! Events на границе с движком
//!
//! Движок (или headless stand-in'ы) пишет PrimaryActionEvent / DoorTriggerEntered,
//! контроллер их потребляет. Trigger идентифицируется типом события, не тегом.

use bevy::prelude::*;

/// Event: primary pointer action (LMB just_pressed)
///
/// Генерируется:
/// - input polling хоста (screen-space позиция курсора)
/// - тесты / headless demo
///
/// Обрабатывается:
/// - handle_primary_actions: camera ray → ground hit → goal (только With<Player>)
#[derive(Event, Debug, Clone, Copy)]
pub struct PrimaryActionEvent {
    /// Пиксели, (0, 0) — левый верхний угол viewport'а
    pub screen_position: Vec2,
}

/// Event: аватар вошёл в trigger volume двери
///
/// Генерируется detect_door_triggers на переходе outside → inside.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorTriggerEntered {
    pub avatar: Entity,
    pub door: Entity,
}

/// Event: прервать активную door sequence аватара
#[derive(Event, Debug, Clone, Copy)]
pub struct CancelDoorInteraction {
    pub avatar: Entity,
}

/// Event: анимация открытия двери завершилась
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorOpened {
    pub door: Entity,
}
