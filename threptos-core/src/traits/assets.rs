//! Asset source trait
//!
//! Assets are opaque fixed-size RGB565 buffers; the firmware serves them
//! straight out of flash. The core validates exact byte lengths, so a
//! mis-converted asset fails at startup instead of scrambling the frame.

/// The four assets the compositor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetId {
    /// Full-frame background art.
    Background,
    /// Full-frame menu art with colorkey transparency.
    MenuOverlay,
    /// Pet animation sheet.
    PetAtlas,
    /// Egg animation sheet.
    EggAtlas,
}

/// Startup-fatal asset problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// No data for this identifier.
    NotFound(AssetId),
    /// Data length does not match the declared pixel grid.
    SizeMismatch(AssetId),
}

/// Provider of raw asset bytes.
pub trait AssetSource {
    /// Borrow the raw bytes of `id`.
    fn fetch(&self, id: AssetId) -> Result<&[u8], AssetError>;
}
