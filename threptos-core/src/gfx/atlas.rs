//! Sprite sheet addressing
//!
//! Sheets are raw RGB565 buffers organized as a fixed grid of equally
//! sized cells. The pet sheet is addressed by `(animation row, frame)`,
//! the egg sheet by `(color, size, frame)` where a color row holds two
//! two-frame animations side by side (small in columns 0-1, big in 2-3).

use crate::config::AtlasGeometry;
use crate::gfx::buffer::{read_px, BPP};
use crate::traits::{AssetError, AssetId, Entropy};

/// Pet animation rows with their per-row frame counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PetAnim {
    Walk,
    #[default]
    IdleTrot,
    ChinScratch,
}

impl PetAnim {
    pub const fn row(self) -> u16 {
        match self {
            PetAnim::Walk => 0,
            PetAnim::IdleTrot => 1,
            PetAnim::ChinScratch => 2,
        }
    }

    pub const fn frame_count(self) -> u8 {
        match self {
            PetAnim::Walk => 10,
            PetAnim::IdleTrot => 8,
            PetAnim::ChinScratch => 8,
        }
    }
}

/// Egg shell colors, one sheet row each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EggColor {
    Green,
    Red,
    Blue,
    Yellow,
    Pink,
}

impl EggColor {
    pub const COUNT: u32 = 5;

    const fn row(self) -> u16 {
        match self {
            EggColor::Green => 0,
            EggColor::Red => 1,
            EggColor::Blue => 2,
            EggColor::Yellow => 3,
            EggColor::Pink => 4,
        }
    }

    const fn from_index(index: u32) -> Self {
        match index {
            0 => EggColor::Green,
            1 => EggColor::Red,
            2 => EggColor::Blue,
            3 => EggColor::Yellow,
            _ => EggColor::Pink,
        }
    }
}

/// Egg sizes, a two-column block each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EggSize {
    Small,
    Big,
}

impl EggSize {
    pub const COUNT: u32 = 2;

    const fn column_base(self) -> u16 {
        match self {
            EggSize::Small => 0,
            EggSize::Big => 2,
        }
    }
}

/// Frames per egg animation.
pub const EGG_FRAME_COUNT: u8 = 2;

/// One laid egg: shell color and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EggVariant {
    pub color: EggColor,
    pub size: EggSize,
}

impl EggVariant {
    /// Pick a uniformly random variant.
    pub fn pick(entropy: &mut impl Entropy) -> Self {
        let raw = entropy.next_u32();
        let color = EggColor::from_index(raw % EggColor::COUNT);
        let size = if (raw >> 8) % EggSize::COUNT == 0 {
            EggSize::Small
        } else {
            EggSize::Big
        };
        Self { color, size }
    }

    /// Sheet cell for animation frame 0 or 1 of this variant.
    pub const fn cell(self, frame: u8) -> (u16, u16) {
        (self.color.row(), self.size.column_base() + frame as u16)
    }
}

/// A borrowed sprite sheet with fixed cell geometry.
#[derive(Debug)]
pub struct SpriteAtlas<'a> {
    data: &'a [u8],
    geom: AtlasGeometry,
}

impl<'a> SpriteAtlas<'a> {
    /// Wrap a raw sheet buffer, validating its exact byte length.
    pub fn new(id: AssetId, data: &'a [u8], geom: AtlasGeometry) -> Result<Self, AssetError> {
        if data.len() != geom.byte_len() {
            return Err(AssetError::SizeMismatch(id));
        }
        Ok(Self { data, geom })
    }

    pub const fn cell_width(&self) -> u16 {
        self.geom.cell_w
    }

    pub const fn cell_height(&self) -> u16 {
        self.geom.cell_h
    }

    /// Read one cell pixel. `row`/`col` address the cell grid, `sx`/`sy`
    /// the pixel within the cell. An out-of-range cell is a programmer
    /// error, not a runtime condition.
    pub fn cell_px(&self, row: u16, col: u16, sx: u16, sy: u16) -> u16 {
        assert!(
            (col + 1) * self.geom.cell_w <= self.geom.sheet_w
                && (row + 1) * self.geom.cell_h <= self.geom.sheet_h,
            "atlas cell out of range"
        );
        let x = (col * self.geom.cell_w + sx) as usize;
        let y = (row * self.geom.cell_h + sy) as usize;
        let idx = y * self.geom.sheet_w as usize + x;
        debug_assert!(idx * BPP < self.data.len());
        read_px(self.data, idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::buffer::write_px;

    fn geom() -> AtlasGeometry {
        AtlasGeometry {
            sheet_w: 4,
            sheet_h: 4,
            cell_w: 2,
            cell_h: 2,
        }
    }

    fn sheet() -> [u8; 4 * 4 * BPP] {
        // pixel value = linear index within the 4x4 sheet
        let mut buf = [0u8; 4 * 4 * BPP];
        for idx in 0..16 {
            write_px(&mut buf, idx, idx as u16);
        }
        buf
    }

    #[test]
    fn test_atlas_rejects_bad_size() {
        let buf = [0u8; 10];
        assert_eq!(
            SpriteAtlas::new(AssetId::PetAtlas, &buf, geom()).unwrap_err(),
            AssetError::SizeMismatch(AssetId::PetAtlas)
        );
    }

    #[test]
    fn test_cell_addressing() {
        let buf = sheet();
        let atlas = SpriteAtlas::new(AssetId::PetAtlas, &buf, geom()).unwrap();
        // Cell (1, 1) starts at sheet pixel (2, 2) = index 10
        assert_eq!(atlas.cell_px(1, 1, 0, 0), 10);
        assert_eq!(atlas.cell_px(1, 1, 1, 0), 11);
        assert_eq!(atlas.cell_px(1, 1, 0, 1), 14);
        assert_eq!(atlas.cell_px(0, 0, 1, 1), 5);
    }

    #[test]
    #[should_panic(expected = "atlas cell out of range")]
    fn test_out_of_range_cell_panics() {
        let buf = sheet();
        let atlas = SpriteAtlas::new(AssetId::PetAtlas, &buf, geom()).unwrap();
        atlas.cell_px(2, 0, 0, 0);
    }

    #[test]
    fn test_pet_anim_frame_counts() {
        assert_eq!(PetAnim::Walk.frame_count(), 10);
        assert_eq!(PetAnim::IdleTrot.frame_count(), 8);
        assert_eq!(PetAnim::ChinScratch.frame_count(), 8);
    }

    #[test]
    fn test_egg_cell_layout() {
        // Small eggs sit in columns 0-1, big eggs in 2-3, row = color
        let small = EggVariant {
            color: EggColor::Blue,
            size: EggSize::Small,
        };
        assert_eq!(small.cell(0), (2, 0));
        assert_eq!(small.cell(1), (2, 1));

        let big = EggVariant {
            color: EggColor::Pink,
            size: EggSize::Big,
        };
        assert_eq!(big.cell(0), (4, 2));
        assert_eq!(big.cell(1), (4, 3));
    }

    #[test]
    fn test_egg_pick_covers_all_variants() {
        struct Seq(u32);
        impl Entropy for Seq {
            fn next_u32(&mut self) -> u32 {
                let v = self.0;
                self.0 = self.0.wrapping_add(1 | 1 << 8);
                v
            }
        }
        let mut seen = [false; 10];
        let mut entropy = Seq(0);
        for _ in 0..100 {
            let v = EggVariant::pick(&mut entropy);
            let (row, col) = v.cell(0);
            seen[(row * 2 + col / 2) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
