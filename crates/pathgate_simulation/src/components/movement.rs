//! Movement компоненты: navmesh agent stand-in, running сигнал, trigger contacts

use bevy::prelude::*;

use crate::controller::{AnimationSignal, MovementController};

/// Headless stand-in для navmesh agent
///
/// Архитектура:
/// - MovementController пишет destination / is_stopped (через `NavAgentHandle`)
/// - `steer_nav_agents` двигает Transform по прямой к destination
/// - Path planning сознательно отсутствует (это работа движка)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Vec3,
    /// Радиус "прибыл" (метры)
    pub stopping_distance: f32,
    /// Скорость (м/с)
    pub speed: f32,
    /// Агент стоит, даже если destination далеко
    pub is_stopped: bool,
}

impl NavAgent {
    pub fn new(position: Vec3, speed: f32, stopping_distance: f32) -> Self {
        Self {
            destination: position,
            stopping_distance,
            speed,
            is_stopped: false,
        }
    }

    pub fn has_arrived(&self, position: Vec3) -> bool {
        self.destination.distance(position) <= self.stopping_distance
    }
}

/// Outward animation сигнал "isRunning"
///
/// Читается animation playback collaborator'ом (в headless режиме — только тесты и логи).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct RunningAnimation {
    pub running: bool,
}

impl AnimationSignal for RunningAnimation {
    fn set_running(&mut self, running: bool) {
        self.running = running;
    }
}

/// Двери, в trigger volume которых аватар находился на прошлом tick'е
///
/// Нужен чтобы `DoorTriggerEntered` отправлялся только на переходе outside → inside.
#[derive(Component, Debug, Clone, Default)]
pub struct DoorContacts {
    pub inside: Vec<Entity>,
}

/// Bundle-less spawn: контроллер тянет за собой сигнал и contacts
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(RunningAnimation, DoorContacts)]
pub struct Avatar;

/// Полный набор компонентов аватара (Transform включён, Player — нет)
pub fn avatar_components(position: Vec3, speed: f32, stopping_distance: f32, cooldown: f32) -> impl Bundle {
    (
        Avatar,
        MovementController::new(position).with_cooldown(cooldown),
        NavAgent::new(position, speed, stopping_distance),
        Transform::from_translation(position),
    )
}
