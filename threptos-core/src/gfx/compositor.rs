//! Dirty-rectangle frame compositor
//!
//! Owns the canonical base frame (background with the menu art composited
//! in once at load time) and patches only the regions that change:
//!
//! - the menu highlight, by restoring one rectangle verbatim from the base
//!   frame and inverting another
//! - the sprite window, by copying the base pixels underneath into scratch
//!   and blitting the current atlas cell over them with integer upscaling
//!
//! Every operation ends with the pushed pixels on the panel and
//! [`RenderState`] matching what is visible; nothing is half-applied.

use crate::config::DeviceConfig;
use crate::gfx::atlas::{EggVariant, PetAnim, SpriteAtlas};
use crate::gfx::buffer::{composite_colorkey, copy_region, invert_region, write_px, Rect, COLORKEY};
use crate::traits::{AssetError, AssetId, AssetSource, DisplaySink};

/// Validated, decoded assets: the frozen base frame plus the two sheets.
#[derive(Debug)]
pub struct Assets<'a> {
    base: &'a [u8],
    pet: SpriteAtlas<'a>,
    egg: SpriteAtlas<'a>,
}

impl<'a> Assets<'a> {
    /// Fetch and validate all assets, compositing the menu overlay onto
    /// the background in `base_storage` (which must be a full-frame
    /// buffer). Any length mismatch aborts startup.
    pub fn load<S: AssetSource>(
        cfg: &DeviceConfig,
        source: &'a S,
        base_storage: &'a mut [u8],
    ) -> Result<Self, AssetError> {
        assert_eq!(base_storage.len(), cfg.frame_bytes());

        let background = source.fetch(AssetId::Background)?;
        if background.len() != cfg.frame_bytes() {
            return Err(AssetError::SizeMismatch(AssetId::Background));
        }
        base_storage.copy_from_slice(background);

        let overlay = source.fetch(AssetId::MenuOverlay)?;
        if overlay.len() != cfg.frame_bytes() {
            return Err(AssetError::SizeMismatch(AssetId::MenuOverlay));
        }
        composite_colorkey(base_storage, overlay);

        let pet = SpriteAtlas::new(AssetId::PetAtlas, source.fetch(AssetId::PetAtlas)?, cfg.pet_sheet)?;
        let egg = SpriteAtlas::new(AssetId::EggAtlas, source.fetch(AssetId::EggAtlas)?, cfg.egg_sheet)?;

        Ok(Self {
            base: base_storage,
            pet,
            egg,
        })
    }
}

/// What the sprite window currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayedSprite {
    #[default]
    None,
    Pet {
        anim: PetAnim,
        frame: u8,
    },
    Egg {
        variant: EggVariant,
        frame: u8,
    },
}

/// The renderer's belief about what is on the panel. Updated only after a
/// successful push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderState {
    pub menu_selection: Option<u8>,
    pub sprite: DisplayedSprite,
}

/// The compositing engine.
pub struct Compositor<'a> {
    cfg: &'a DeviceConfig,
    assets: Assets<'a>,
    scratch: &'a mut [u8],
    state: RenderState,
}

impl<'a> Compositor<'a> {
    /// `scratch` must hold the largest patch, the scaled sprite window.
    pub fn new(cfg: &'a DeviceConfig, assets: Assets<'a>, scratch: &'a mut [u8]) -> Self {
        assert!(scratch.len() >= cfg.window.rect().byte_len());
        Self {
            cfg,
            assets,
            scratch,
            state: RenderState::default(),
        }
    }

    pub fn render_state(&self) -> RenderState {
        self.state
    }

    /// Push the full base frame and establish the initial sprite state.
    pub fn render_initial<S: DisplaySink>(
        &mut self,
        sink: &mut S,
        sprite: DisplayedSprite,
    ) -> Result<(), S::Error> {
        let full = Rect::new(0, 0, self.cfg.width - 1, self.cfg.height - 1);
        sink.push_block(full, self.assets.base)?;
        self.state = RenderState::default();
        self.update_sprite(sink, sprite)
    }

    /// Move the inverted menu highlight to `target`. Only the rectangles
    /// that actually change are touched: the old selection is restored
    /// verbatim from the base frame, the new one is bitwise-inverted.
    pub fn update_menu_selection<S: DisplaySink>(
        &mut self,
        sink: &mut S,
        target: Option<u8>,
    ) -> Result<(), S::Error> {
        if target == self.state.menu_selection {
            return Ok(());
        }
        if let Some(old) = self.state.menu_selection {
            self.push_menu_rect(sink, old, false)?;
        }
        if let Some(new) = target {
            self.push_menu_rect(sink, new, true)?;
        }
        self.state.menu_selection = target;
        Ok(())
    }

    /// Bring the sprite window to `target`: blit a pet or egg cell, or
    /// restore the base pixels when no sprite should show. A no-op when
    /// `target` is already displayed.
    pub fn update_sprite<S: DisplaySink>(
        &mut self,
        sink: &mut S,
        target: DisplayedSprite,
    ) -> Result<(), S::Error> {
        if target == self.state.sprite {
            return Ok(());
        }
        let rect = self.cfg.window.rect().clamped(self.cfg.width, self.cfg.height);
        let len = rect.byte_len();
        copy_region(self.assets.base, self.cfg.width, rect, &mut self.scratch[..len]);

        match target {
            DisplayedSprite::None => {}
            DisplayedSprite::Pet { anim, frame } => {
                assert!(frame < anim.frame_count(), "pet frame out of range");
                blit_scaled(
                    &mut self.scratch[..len],
                    &self.cfg.window,
                    &self.assets.pet,
                    anim.row(),
                    frame as u16,
                );
            }
            DisplayedSprite::Egg { variant, frame } => {
                assert!(frame < crate::gfx::atlas::EGG_FRAME_COUNT, "egg frame out of range");
                let (row, col) = variant.cell(frame);
                blit_scaled(&mut self.scratch[..len], &self.cfg.window, &self.assets.egg, row, col);
            }
        }

        sink.push_block(rect, &self.scratch[..len])?;
        self.state.sprite = target;
        Ok(())
    }

    fn push_menu_rect<S: DisplaySink>(
        &mut self,
        sink: &mut S,
        entry: u8,
        inverted: bool,
    ) -> Result<(), S::Error> {
        let rect = self.cfg.menu[entry as usize].clamped(self.cfg.width, self.cfg.height);
        let len = rect.byte_len();
        copy_region(self.assets.base, self.cfg.width, rect, &mut self.scratch[..len]);
        if inverted {
            invert_region(&mut self.scratch[..len]);
        }
        sink.push_block(rect, &self.scratch[..len])
    }
}

/// Blit one atlas cell into a packed region buffer, upscaling each source
/// pixel into a `scale` x `scale` block and skipping colorkey pixels so
/// the base pixels underneath stay visible.
fn blit_scaled(
    region: &mut [u8],
    window: &crate::config::SpriteWindow,
    atlas: &SpriteAtlas<'_>,
    row: u16,
    col: u16,
) {
    let region_w = window.display_w() as usize;
    let scale = window.scale as usize;
    for sy in 0..atlas.cell_height() {
        for sx in 0..atlas.cell_width() {
            let color = atlas.cell_px(row, col, sx, sy);
            if color == COLORKEY {
                continue;
            }
            let dst_x = sx as usize * scale;
            let dst_y = sy as usize * scale;
            for by in 0..scale {
                let row_start = (dst_y + by) * region_w;
                for bx in 0..scale {
                    write_px(region, row_start + dst_x + bx, color);
                }
            }
        }
    }
}
