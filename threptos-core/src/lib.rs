//! Board-agnostic core logic for the Threptos virtual pet device
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (display sink, asset source, entropy)
//! - Dirty-rectangle frame compositor
//! - Debounced button input and screen sleep policy
//! - Pet lifecycle state machine
//! - Per-cycle orchestration

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod game;
pub mod gfx;
pub mod input;
pub mod life;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;
