//! Collaborator interfaces, которые контроллер потребляет/экспонирует
//!
//! Контроллер НЕ владеет ни агентом, ни дверями: они передаются по `&mut`
//! на каждый вызов (ECS adapters в `systems::adapters`, fakes в тестах).

use bevy::math::Ray3d;
use bevy::prelude::*;

/// Navigation/locomotion collaborator (navmesh agent)
pub trait NavigationAgent {
    fn set_destination(&mut self, destination: Vec3);
    /// Только для сверки: goal, который восстанавливает door sequence, берётся из
    /// `current_goal` контроллера (агент может быть перенаправлен хостом в обход него)
    fn destination(&self) -> Vec3;
    /// Радиус вокруг destination, внутри которого агент считается прибывшим
    fn stopping_distance(&self) -> f32;
    /// Текущая позиция аватара
    fn position(&self) -> Vec3;
    fn set_stopped(&mut self, stopped: bool);
}

/// Outward "running" сигнал для animation playback
pub trait AnimationSignal {
    fn set_running(&mut self, running: bool);
}

/// Door collaborator, адресуемый по handle (Entity)
///
/// `None` из любого метода = двери с таким handle нет (despawned / не дверь).
pub trait DoorRegistry {
    /// Точка ожидания для аватара, подходящего из `from`
    fn wait_position(&self, door: Entity, from: Vec3) -> Option<Vec3>;
    /// Длительность анимации открытия (секунды), читается один раз на trigger
    fn animation_duration(&self, door: Entity) -> Option<f32>;
    /// Fire-and-forget: запустить анимацию открытия
    fn open(&mut self, door: Entity) -> Option<()>;
}

/// Camera collaborator: screen-space → world ray
pub trait ViewCamera {
    fn viewport_to_ray(&self, screen_position: Vec2) -> Option<Ray3d>;
}

/// Scene geometry collaborator: ray → ближайшая точка попадания
pub trait SceneRaycast {
    fn cast(&self, ray: Ray3d) -> Option<Vec3>;
}

/// Тело аватара на время одного вызова: агент + animation сигнал
pub struct AvatarBody<'a> {
    pub agent: &'a mut dyn NavigationAgent,
    pub animation: &'a mut dyn AnimationSignal,
}

impl<'a> AvatarBody<'a> {
    pub fn new(agent: &'a mut dyn NavigationAgent, animation: &'a mut dyn AnimationSignal) -> Self {
        Self { agent, animation }
    }

    /// distance(goal, position) > stopping distance
    pub fn is_away_from(&self, goal: Vec3) -> bool {
        goal.distance(self.agent.position()) > self.agent.stopping_distance()
    }
}
