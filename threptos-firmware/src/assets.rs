//! Flash-resident assets
//!
//! Raw RGB565 buffers embedded at compile time. The art pipeline
//! (image -> big-endian RGB565 .raw) runs on the host; the core validates
//! every buffer's exact byte length at startup.

use threptos_core::traits::{AssetError, AssetId, AssetSource};

static BACKGROUND: &[u8] = include_bytes!("../assets/meadow-bg.raw");
static MENU_OVERLAY: &[u8] = include_bytes!("../assets/menu-overlay.raw");
static PET_SHEET: &[u8] = include_bytes!("../assets/pet-sheet.raw");
static EGG_SHEET: &[u8] = include_bytes!("../assets/egg-sheet.raw");

/// Serves the embedded asset slices.
pub struct FlashAssets;

/// The one asset source instance.
pub static FLASH: FlashAssets = FlashAssets;

impl AssetSource for FlashAssets {
    fn fetch(&self, id: AssetId) -> Result<&[u8], AssetError> {
        Ok(match id {
            AssetId::Background => BACKGROUND,
            AssetId::MenuOverlay => MENU_OVERLAY,
            AssetId::PetAtlas => PET_SHEET,
            AssetId::EggAtlas => EGG_SHEET,
        })
    }
}
