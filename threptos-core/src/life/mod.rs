//! Pet lifecycle
//!
//! The phase state machine, the pet's statistics, and the menu cursor.
//! Everything here advances on the fixed lifecycle tick or on explicit
//! care operations - never on render or input cadence.

pub mod machine;
pub mod menu;
pub mod pet;

pub use machine::{Lifecycle, Phase, PhaseChange, DEATH_TICKS, EGG_HATCH_TICKS};
pub use menu::MenuState;
pub use pet::{CareAction, EvolutionStage, PetStats, STAT_MAX};
