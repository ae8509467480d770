// zone.rs - Fluid zones and friction curves
//
// Three bands slow a falling droplet: the top bar it emerges from, the
// title text, and the puddle at the bottom. Depth through a band selects a
// per-frame velocity multiplier.

use serde::{Deserialize, Serialize};

use crate::world::SceneLayout;

/// Velocity multiplier by depth: `entry` until `entry_end`, `middle` until
/// `exit_start`, then linear from `middle` to `exit` at full depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrictionCurve {
    pub entry: f32,
    pub entry_end: f32,
    pub middle: f32,
    pub exit: f32,
    pub exit_start: f32,
}

impl Default for FrictionCurve {
    fn default() -> Self {
        Self {
            entry: 0.5,
            entry_end: 0.1,
            middle: 1.02,
            exit: 0.5,
            exit_start: 0.9,
        }
    }
}

impl FrictionCurve {
    pub fn factor(&self, progress: f32) -> f32 {
        if progress < self.entry_end {
            self.entry
        } else if progress < self.exit_start {
            self.middle
        } else {
            self.middle + (self.exit - self.middle) * self.exit_progress(progress)
        }
    }

    /// 0 at `exit_start`, 1 at full depth.
    #[inline]
    pub fn exit_progress(&self, progress: f32) -> f32 {
        if self.exit_start >= 1.0 {
            return 1.0;
        }
        ((progress - self.exit_start) / (1.0 - self.exit_start)).clamp(0.0, 1.0)
    }
}

/// Vertical band `[top, bottom]` in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidZone {
    pub top: f32,
    pub bottom: f32,
}

impl FluidZone {
    /// Any overlap between the droplet span and the band.
    #[inline]
    pub fn overlaps(&self, droplet_top: f32, droplet_bottom: f32) -> bool {
        droplet_bottom >= self.top && droplet_top <= self.bottom
    }

    /// Depth of the droplet's bottom edge through the band, 0..1.
    #[inline]
    pub fn progress(&self, droplet_bottom: f32) -> f32 {
        let span = self.bottom - self.top;
        if span <= 0.0 {
            return 1.0;
        }
        ((droplet_bottom - self.top) / span).clamp(0.0, 1.0)
    }
}

/// Collision surfaces for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zones {
    pub width: f32,
    pub top_bar: FluidZone,
    pub text_top: f32,
    pub text_bottom: f32,
    pub puddle: FluidZone,
}

impl Zones {
    pub fn from_layout(layout: &SceneLayout) -> Self {
        Self {
            width: layout.viewport.w(),
            top_bar: FluidZone {
                top: 0.0,
                bottom: layout.top_bar_bottom(),
            },
            text_top: layout.title.y,
            text_bottom: layout.title.bottom(),
            puddle: FluidZone {
                top: layout.puddle_surface(),
                bottom: layout.viewport.h(),
            },
        }
    }

    /// The text band for a droplet of this height. A droplet only counts as
    /// inside the text while its top can still leave through the bottom,
    /// so the band is shortened by its height; `None` when that empties it.
    pub fn text(&self, droplet_height: f32) -> Option<FluidZone> {
        let bottom = self.text_bottom - droplet_height;
        (bottom > self.text_top).then_some(FluidZone {
            top: self.text_top,
            bottom,
        })
    }
}
