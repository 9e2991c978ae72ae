//! Display panel drivers

pub mod ssd1351;

pub use ssd1351::{DriverError, Ssd1351};
