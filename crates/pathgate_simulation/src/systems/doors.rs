//! Door animation system

use bevy::prelude::*;

use crate::components::SlidingDoor;
use crate::events::DoorOpened;
use crate::logger;

/// Система: продвигает анимацию открытия дверей
///
/// Контроллер не ждёт этого события (он ждёт `animation_duration` сам),
/// DoorOpened — для остального мира.
pub fn animate_doors(
    mut doors: Query<(Entity, &mut SlidingDoor)>,
    mut opened: EventWriter<DoorOpened>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut door) in doors.iter_mut() {
        if door.advance(delta) {
            logger::log(&format!("Door {:?} fully open", entity));
            opened.write(DoorOpened { door: entity });
        }
    }
}
