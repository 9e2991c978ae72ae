//! Device configuration
//!
//! One immutable [`DeviceConfig`] value is constructed at startup and
//! passed by reference into each component constructor; there are no
//! ambient globals. The capacity constants exist so static pixel buffers
//! can be sized at compile time.

use crate::gfx::buffer::{Point, Rect, BPP};

/// Panel width in pixels.
pub const FRAME_WIDTH: usize = 128;

/// Panel height in pixels.
pub const FRAME_HEIGHT: usize = 128;

/// Byte length of a full-frame RGB565 buffer.
pub const FRAME_BYTES: usize = FRAME_WIDTH * FRAME_HEIGHT * BPP;

/// Byte length of the scratch buffer backing region patches. Sized to the
/// largest patch, the scaled sprite window (64x64).
pub const SCRATCH_BYTES: usize = 64 * 64 * BPP;

/// Number of menu entries.
pub const MENU_ENTRY_COUNT: usize = 10;

/// Raw sprite sheet geometry: a grid of equally sized cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AtlasGeometry {
    pub sheet_w: u16,
    pub sheet_h: u16,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl AtlasGeometry {
    /// Expected byte length of the raw sheet asset.
    pub const fn byte_len(&self) -> usize {
        self.sheet_w as usize * self.sheet_h as usize * BPP
    }
}

/// Where and how large the animated sprite is drawn on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpriteWindow {
    /// Top-left corner of the on-screen window.
    pub origin: Point,
    /// Source cell dimensions.
    pub cell_w: u16,
    pub cell_h: u16,
    /// Integer upscale factor: each source pixel becomes a scale x scale block.
    pub scale: u16,
}

impl SpriteWindow {
    pub const fn display_w(&self) -> u16 {
        self.cell_w * self.scale
    }

    pub const fn display_h(&self) -> u16 {
        self.cell_h * self.scale
    }

    /// The fixed on-screen rectangle the sprite occupies.
    pub const fn rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.display_w() - 1,
            self.origin.y + self.display_h() - 1,
        )
    }
}

/// Wall-clock pacing, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Screen sleeps after this much inactivity.
    pub screen_timeout_ms: u32,
    /// Lifecycle tick period (stat decay, hatch/death countdowns).
    pub game_tick_ms: u32,
    /// Orchestrator frame period.
    pub frame_delay_ms: u32,
    /// Sprite/egg animation frame period.
    pub sprite_frame_delay_ms: u32,
    /// Minimum spacing between accepted presses of one button.
    pub debounce_ms: u32,
}

/// Complete device configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub width: u16,
    pub height: u16,
    pub timing: Timing,
    /// Menu entry rectangles, index = logical entry id. Five in the top
    /// bar, five in the bottom bar; positions are fixed for the device's
    /// lifetime.
    pub menu: [Rect; MENU_ENTRY_COUNT],
    pub window: SpriteWindow,
    pub pet_sheet: AtlasGeometry,
    pub egg_sheet: AtlasGeometry,
}

impl DeviceConfig {
    /// Configuration of the 128x128 SSD1351 handheld.
    pub const DEFAULT: Self = Self {
        width: FRAME_WIDTH as u16,
        height: FRAME_HEIGHT as u16,
        timing: Timing {
            screen_timeout_ms: 20_000,
            game_tick_ms: 600,
            frame_delay_ms: 80,
            sprite_frame_delay_ms: 333,
            debounce_ms: 100,
        },
        menu: [
            Rect::new(1, 1, 24, 14),
            Rect::new(27, 1, 50, 14),
            Rect::new(52, 1, 75, 14),
            Rect::new(77, 1, 100, 14),
            Rect::new(103, 1, 126, 14),
            Rect::new(1, 113, 24, 126),
            Rect::new(27, 113, 50, 126),
            Rect::new(52, 113, 75, 126),
            Rect::new(77, 113, 100, 126),
            Rect::new(103, 113, 126, 126),
        ],
        window: SpriteWindow {
            // 32x32 cell scaled 2x = 64x64, centered on the panel
            origin: Point::new(32, 32),
            cell_w: 32,
            cell_h: 32,
            scale: 2,
        },
        pet_sheet: AtlasGeometry {
            sheet_w: 320,
            sheet_h: 96,
            cell_w: 32,
            cell_h: 32,
        },
        egg_sheet: AtlasGeometry {
            sheet_w: 128,
            sheet_h: 160,
            cell_w: 32,
            cell_h: 32,
        },
    };

    /// Expected byte length of a full-frame asset (background, overlay).
    pub const fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * BPP
    }
}
