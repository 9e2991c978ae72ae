//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in threptos-core for the device's hardware:
//!
//! - SSD1351 RGB565 OLED panel (the display sink)
//!
//! Drivers are generic over embedded-hal 1.0 traits so they stay
//! board-agnostic and host-testable.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
