//! Door компоненты: trigger volume + headless sliding door

use bevy::prelude::*;

/// Axis-aligned trigger volume вокруг Transform entity
///
/// Non-solid: ничего не блокирует, только генерирует `DoorTriggerEntered`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TriggerVolume {
    pub half_extents: Vec3,
}

impl Default for TriggerVolume {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(0.75, 1.0, 0.75),
        }
    }
}

impl TriggerVolume {
    pub fn contains(&self, center: Vec3, point: Vec3) -> bool {
        let offset = (point - center).abs();
        offset.cmple(self.half_extents).all()
    }
}

/// Состояние анимации двери
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum DoorState {
    Closed,
    Opening { elapsed: f32 },
    Open,
}

/// Headless door collaborator
///
/// Контроллер видит дверь только через `DoorRegistry`:
/// wait position, длительность анимации, open().
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(TriggerVolume)]
pub struct SlidingDoor {
    /// Расстояние от центра двери до точки ожидания (со стороны подхода)
    pub wait_distance: f32,
    /// Длительность анимации открытия (секунды)
    pub animation_duration: f32,
    pub state: DoorState,
}

impl SlidingDoor {
    pub fn new(wait_distance: f32, animation_duration: f32) -> Self {
        Self {
            wait_distance,
            animation_duration,
            state: DoorState::Closed,
        }
    }

    /// Точка ожидания: на стороне `from`, в `wait_distance` от центра, на высоте аватара
    pub fn wait_position(&self, door_position: Vec3, from: Vec3) -> Vec3 {
        let approach = Vec3::new(from.x - door_position.x, 0.0, from.z - door_position.z);
        let direction = approach.normalize_or(Vec3::Z);
        let wait = door_position + direction * self.wait_distance;
        Vec3::new(wait.x, from.y, wait.z)
    }

    /// Fire-and-forget: повторный open уже открытой двери ничего не делает
    pub fn open(&mut self) {
        if self.state == DoorState::Closed {
            self.state = DoorState::Opening { elapsed: 0.0 };
        }
    }

    /// Продвинуть анимацию; true в tick когда дверь полностью открылась
    pub fn advance(&mut self, delta: f32) -> bool {
        let DoorState::Opening { elapsed } = self.state else {
            return false;
        };

        let elapsed = elapsed + delta;
        if elapsed >= self.animation_duration {
            self.state = DoorState::Open;
            true
        } else {
            self.state = DoorState::Opening { elapsed };
            false
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }
}
