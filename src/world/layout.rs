// layout.rs - Viewport and title geometry
//
// Collision surfaces are derived from this every tick, so a resize only has
// to replace the layout; droplet state is left alone.

use serde::{Deserialize, Serialize};

use crate::config::Tuning;
use crate::error::{SceneError, SceneResult};

// Title is two lines ("MURHA-" / "KAVERIT"); the longer has 7 glyphs.
const TITLE_LINES: f32 = 2.0;
const TITLE_LINE_GLYPHS: f32 = 7.0;
const LINE_HEIGHT_RATIO: f32 = 0.8;
const FONT_VW_RATIO: f32 = 0.3;
const FONT_MIN: f32 = 48.0;
const FONT_MAX: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub viewport: Viewport,
    pub bar_height: f32,
    pub font_size: f32,
    pub title: Rect,
    title_measured: bool,
}

impl SceneLayout {
    /// Layout with an estimated title box, centred below the top bar.
    pub fn new(viewport: Viewport, tuning: &Tuning) -> Self {
        let font_size = font_size_for_width(viewport.w());
        Self {
            viewport,
            bar_height: tuning.bar_height,
            font_size,
            title: estimate_title(viewport, font_size, tuning),
            title_measured: false,
        }
    }

    /// Keep a host-measured title box across resizes until the host sends
    /// a new one.
    pub fn resized(&self, viewport: Viewport, tuning: &Tuning) -> Self {
        let mut next = Self::new(viewport, tuning);
        if self.title_measured {
            next.title = self.title;
            next.title_measured = true;
        }
        next
    }

    pub fn set_title(&mut self, title: Rect) {
        self.title = title;
        self.title_measured = true;
    }

    #[inline]
    pub fn top_bar_bottom(&self) -> f32 {
        self.bar_height
    }

    #[inline]
    pub fn puddle_surface(&self) -> f32 {
        self.viewport.h() - self.bar_height
    }

    /// Range (percent of width) that recycled droplets are placed in: inside
    /// the title, clear of the first glyph edge and the last glyph.
    pub fn recycle_offset_range(&self, tuning: &Tuning) -> (f32, f32) {
        let w = self.viewport.w();
        let lo = self.title.x + self.title.width * tuning.text_edge_margin;
        let hi = self.title.right() - self.font_size * tuning.glyph_width_ratio;
        let to_pct = |px: f32| (px / w * 100.0).clamp(0.0, 100.0);
        (to_pct(lo), to_pct(hi))
    }
}

pub fn font_size_for_width(width: f32) -> f32 {
    (width * FONT_VW_RATIO).clamp(FONT_MIN, FONT_MAX)
}

fn estimate_title(viewport: Viewport, font_size: f32, tuning: &Tuning) -> Rect {
    let width = (TITLE_LINE_GLYPHS * tuning.glyph_width_ratio * font_size).min(viewport.w());
    let height = TITLE_LINES * LINE_HEIGHT_RATIO * font_size;
    // Visual centre sits half a bar below the viewport centre.
    let cx = viewport.w() * 0.5;
    let cy = viewport.h() * 0.5 + tuning.bar_height * 0.5;
    Rect {
        x: cx - width * 0.5,
        y: cy - height * 0.5,
        width,
        height,
    }
}
