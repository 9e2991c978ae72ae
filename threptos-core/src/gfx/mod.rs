//! Frame compositing with dirty-rectangle updates
//!
//! The compositor keeps one pre-composited base frame (background + menu
//! art) and patches only the screen regions that changed: the animated
//! sprite window and the inverted menu highlight. Nothing here talks to
//! hardware directly; pixels leave through the [`DisplaySink`] trait.
//!
//! [`DisplaySink`]: crate::traits::DisplaySink

pub mod atlas;
pub mod buffer;
pub mod compositor;

pub use atlas::{EggColor, EggSize, EggVariant, PetAnim, SpriteAtlas, EGG_FRAME_COUNT};
pub use buffer::{rgb565, Point, Rect, BPP, COLORKEY};
pub use compositor::{Assets, Compositor, DisplayedSprite, RenderState};
