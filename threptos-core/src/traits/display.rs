//! Display sink trait
//!
//! The compositor's only way out: push a rectangle of raw RGB565 bytes,
//! and switch the panel's power state. Pushes are bounded synchronous
//! calls; the compositor never holds a patch across cycles.

use crate::gfx::buffer::Rect;

/// Sink for composited pixel patches.
pub trait DisplaySink {
    type Error;

    /// Push `pixels` (big-endian RGB565, row-major, no padding) into the
    /// inclusive rectangle `rect`. `pixels.len()` equals `rect.byte_len()`.
    fn push_block(&mut self, rect: Rect, pixels: &[u8]) -> Result<(), Self::Error>;

    /// Wake the panel.
    fn power_on(&mut self) -> Result<(), Self::Error>;

    /// Put the panel to sleep. Pixel RAM is retained.
    fn power_off(&mut self) -> Result<(), Self::Error>;
}
