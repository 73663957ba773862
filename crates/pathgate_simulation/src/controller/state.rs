//! Состояние аватара и door sequence

use bevy::prelude::*;

/// Фаза door interruption (вместо coroutine — явный tagged variant)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencePhase {
    /// Идём к wait goal, poll каждый tick
    MovingToWait,
    /// Дверь открывается, ждём `remaining` секунд
    WaitingForDoor { remaining: f32 },
    /// Восстанавливаем final goal (transient, завершается в тот же tick)
    Resuming,
}

/// Одна активная door interruption
#[derive(Debug, Clone, PartialEq)]
pub struct DoorSequence {
    /// Non-owning handle двери
    pub door: Entity,
    /// Goal на момент входа в trigger — восстанавливается один-в-один
    pub final_goal: Vec3,
    pub wait_goal: Vec3,
    pub open_delay: f32,
    pub phase: SequencePhase,
}

/// Cooldown повторного trigger'а
///
/// `None` = неактивен, `Some(elapsed)` = сколько секунд прошло с запуска.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoorCooldown {
    elapsed: Option<f32>,
}

impl DoorCooldown {
    pub fn start(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed.unwrap_or(0.0)
    }

    /// Накопить delta; возвращает true в tick когда окно истекло
    pub fn advance(&mut self, delta: f32, window: f32) -> bool {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return false;
        };

        *elapsed += delta;
        if *elapsed >= window {
            self.elapsed = None;
            return true;
        }
        false
    }
}

/// Состояние, которым владеет и которое меняет только MovementController
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarState {
    pub has_control: bool,
    pub current_goal: Vec3,
    pub is_moving: bool,
    pub cooldown: DoorCooldown,
    pub pending_sequence: Option<DoorSequence>,
}

impl AvatarState {
    pub fn new(initial_goal: Vec3) -> Self {
        Self {
            has_control: true,
            current_goal: initial_goal,
            is_moving: false,
            cooldown: DoorCooldown::default(),
            pending_sequence: None,
        }
    }
}
