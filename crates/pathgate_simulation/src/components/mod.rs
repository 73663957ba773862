//! ECS Components для аватара, дверей и pointer picking
//!
//! Организация по доменам:
//! - movement: navmesh agent stand-in, running сигнал, trigger contacts (NavAgent, RunningAnimation)
//! - door: trigger volume + sliding door (TriggerVolume, SlidingDoor, DoorState)
//! - player: player control marker (Player)
//! - camera: top-down camera + ground plane (TopDownCamera, GroundPlane)

pub mod camera;
pub mod door;
pub mod movement;
pub mod player;

// Re-exports для удобного импорта
pub use camera::*;
pub use door::*;
pub use movement::*;
pub use player::*;
