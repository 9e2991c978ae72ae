//! Hardware abstraction traits
//!
//! Seams between the board-agnostic core and its hardware collaborators:
//! the panel, the asset store, and an entropy source.

pub mod assets;
pub mod display;
pub mod entropy;

pub use assets::{AssetError, AssetId, AssetSource};
pub use display::DisplaySink;
pub use entropy::Entropy;
