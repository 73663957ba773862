//! ECS adapters: Bevy данные → collaborator traits контроллера

use bevy::prelude::*;

use crate::components::{NavAgent, SlidingDoor};
use crate::controller::{DoorRegistry, NavigationAgent};

/// NavAgent + позиция аватара на время одного вызова контроллера
pub struct NavAgentHandle<'a> {
    pub agent: &'a mut NavAgent,
    pub position: Vec3,
}

impl NavigationAgent for NavAgentHandle<'_> {
    fn set_destination(&mut self, destination: Vec3) {
        self.agent.destination = destination;
    }

    fn destination(&self) -> Vec3 {
        self.agent.destination
    }

    fn stopping_distance(&self) -> f32 {
        self.agent.stopping_distance
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.agent.is_stopped = stopped;
    }
}

/// Query дверей, который ищет дверь по Entity handle
pub type DoorQuery<'w, 's> = Query<'w, 's, (&'static Transform, &'static mut SlidingDoor)>;

pub struct DoorLookup<'a, 'w, 's> {
    pub doors: &'a mut DoorQuery<'w, 's>,
}

impl DoorRegistry for DoorLookup<'_, '_, '_> {
    fn wait_position(&self, door: Entity, from: Vec3) -> Option<Vec3> {
        let (transform, door) = self.doors.get(door).ok()?;
        Some(door.wait_position(transform.translation, from))
    }

    fn animation_duration(&self, door: Entity) -> Option<f32> {
        let (_, door) = self.doors.get(door).ok()?;
        Some(door.animation_duration)
    }

    fn open(&mut self, door: Entity) -> Option<()> {
        let (_, mut door) = self.doors.get_mut(door).ok()?;
        door.open();
        Some(())
    }
}
