//! Bevy wiring контроллера движения
//!
//! Порядок выполнения (FixedUpdate, .chain()):
//! 1. steer_nav_agents — locomotion stand-in двигает аватаров
//! 2. detect_door_triggers — вход в trigger volume → DoorTriggerEntered
//! 3. handle_primary_actions — click → goal (только пока есть контроль)
//! 4. handle_door_triggers — старт door sequence (эффекты ДО monitor'а)
//! 5. handle_cancel_requests — внешнее прерывание sequence
//! 6. tick_movement_controllers — sequencer → monitor → cooldown
//! 7. animate_doors — анимация открытия дверей

use bevy::prelude::*;

pub mod adapters;
pub mod doors;
pub mod input;
pub mod locomotion;
pub mod triggers;

pub use adapters::*;
pub use doors::*;
pub use input::*;
pub use locomotion::*;
pub use triggers::*;

use crate::components::{GroundPlane, TopDownCamera};
use crate::config::MovementConfig;
use crate::events::{CancelDoorInteraction, DoorOpened, DoorTriggerEntered, PrimaryActionEvent};

/// Movement controller plugin
///
/// Регистрирует events, resources по умолчанию и систему в FixedUpdate.
/// Уже вставленные resources (MovementConfig, TopDownCamera, GroundPlane) не перезаписываются.
pub struct MovementControllerPlugin;

impl Plugin for MovementControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PrimaryActionEvent>()
            .add_event::<DoorTriggerEntered>()
            .add_event::<CancelDoorInteraction>()
            .add_event::<DoorOpened>()
            .init_resource::<MovementConfig>()
            .init_resource::<TopDownCamera>()
            .init_resource::<GroundPlane>()
            .add_systems(
                FixedUpdate,
                (
                    steer_nav_agents,
                    detect_door_triggers,
                    handle_primary_actions,
                    handle_door_triggers,
                    handle_cancel_requests,
                    tick_movement_controllers,
                    animate_doors,
                )
                    .chain(), // Последовательное выполнение: порядок = семантика кадра
            );
    }
}
