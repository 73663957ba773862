//! Movement controller domain
//!
//! Engine-agnostic ядро: state machine + collaborator traits.
//! Bevy wiring (components, systems, adapters) живёт в `systems`.

pub mod collaborators;
pub mod movement_controller;
pub mod outcome;
pub mod state;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod movement_controller_tests;

pub use collaborators::*;
pub use movement_controller::MovementController;
pub use outcome::*;
pub use state::*;
