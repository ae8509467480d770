// render/ - Goo compositing backends
//
// The scene builds one `FrameView` per tick (bar outlines, droplet sprites,
// title state) and hands it to whichever backend the capability probe
// selected. Both backends draw the same layers in the same order:
//
//   goo:   top bar, bottom bar, droplets, title mask -> blur -> threshold -> tint
//   crisp: top bar in brand red, title mask in white

mod accelerated;
mod fallback;
mod goo;
mod raster;

pub use accelerated::{AcceleratedRenderer, PixelSurface};
pub use fallback::{DomDroplet, DomFrame, DomTitle, FallbackRenderer, GooFilter, svg_filter_markup};
pub use goo::{alpha_remap, box_radius};

use serde::Serialize;

use crate::error::{SceneError, SceneResult};
use crate::quality::QualitySettings;
use crate::world::{Point, Rect, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Loading,
    Accelerated,
    Fallback,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Loading => "loading",
            RenderMode::Accelerated => "accelerated",
            RenderMode::Fallback => "fallback",
        }
    }
}

/// A droplet ready to draw: centre, unscaled box, squash factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropletSprite {
    pub x: f32,
    pub y: f32,
    pub base_width: f32,
    pub base_height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: f32,
}

impl DropletSprite {
    #[inline]
    pub fn width(&self) -> f32 {
        self.base_width * self.scale_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.base_height * self.scale_y
    }
}

/// Title fade-and-grow state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TitleIntro {
    pub alpha: f32,
    pub scale: f32,
}

impl TitleIntro {
    pub const SHOWN: TitleIntro = TitleIntro { alpha: 1.0, scale: 1.0 };
}

/// 8-bit coverage of the rendered title, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMask {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl TitleMask {
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> SceneResult<Self> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(SceneError::InvalidTitleMask {
                width,
                height,
                expected,
                got: alpha.len(),
            });
        }
        Ok(Self { width, height, alpha })
    }
}

pub struct FrameView<'a> {
    pub viewport: Viewport,
    pub top_bar: &'a [Point],
    pub bottom_bar: &'a [Point],
    pub droplets: &'a [DropletSprite],
    pub title: TitleIntro,
    pub title_rect: Rect,
    pub title_mask: Option<&'a TitleMask>,
}

/// What the host reads back after a render.
pub enum RenderOutput<'a> {
    Pixels(&'a PixelSurface),
    Dom(&'a DomFrame),
    Empty,
}

pub trait Renderer {
    fn mode(&self) -> RenderMode;

    fn resize(&mut self, viewport: Viewport);

    /// Swap blur and outline detail for a new quality tier.
    fn apply_quality(&mut self, settings: QualitySettings);

    fn render(&mut self, frame: &FrameView<'_>);

    fn output(&self) -> RenderOutput<'_>;

    /// Free buffers. Rendering after release draws nothing.
    fn release(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_mask_size_checked() {
        assert!(TitleMask::new(4, 2, vec![0; 8]).is_ok());
        let err = TitleMask::new(4, 2, vec![0; 7]).unwrap_err();
        assert!(matches!(err, SceneError::InvalidTitleMask { expected: 8, got: 7, .. }));
    }

    #[test]
    fn test_sprite_box() {
        let s = DropletSprite {
            x: 0.0,
            y: 0.0,
            base_width: 50.0,
            base_height: 60.0,
            scale_x: 1.2,
            scale_y: 0.5,
            alpha: 1.0,
        };
        assert!((s.width() - 60.0).abs() < 1e-4);
        assert_eq!(s.height(), 30.0);
    }
}
