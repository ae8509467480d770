// bar.rs - Top and bottom bars
//
// The top bar bleeds down once on load. The bottom bar is the puddle: it
// stays empty until the first droplet merges, then rises a step per merge
// up to its final height. Heights only ever ease toward their target.

use std::f32::consts::PI;

use crate::config::{BottomBarTuning, RippleTuning, TopBarTuning, Tuning};
use crate::world::{Point, Wave, apply_tilt, edge_with_ripples, organic_edge};

use super::frame_lerp;
use super::ripple::{Ripple, RippleList};

/// Heights below this are not drawn.
const MIN_VISIBLE_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Top,
    Bottom,
}

#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

#[derive(Debug, Clone)]
pub struct BarState {
    pub kind: BarKind,
    pub current_height: f32,
    pub target_height: f32,
    pub elapsed: f32,
    pub anim_time: f32,
    pub visual: RippleList,
    pub growth: RippleList,
    pub merged_count: u32,
}

impl BarState {
    pub fn new(kind: BarKind, tuning: &Tuning) -> Self {
        let target_height = match kind {
            BarKind::Top => tuning.top_bar.final_height,
            BarKind::Bottom => tuning.bottom_bar.first_height,
        };
        Self {
            kind,
            current_height: 0.0,
            target_height,
            elapsed: 0.0,
            anim_time: 0.0,
            visual: RippleList::new(tuning.ripples.cap),
            growth: RippleList::new(tuning.ripples.cap),
            merged_count: 0,
        }
    }

    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.elapsed += dt;
        self.anim_time += dt;
        let frames = dt * 60.0;

        match self.kind {
            BarKind::Top => self.update_top(&tuning.top_bar, frames),
            BarKind::Bottom => self.update_bottom(&tuning.bottom_bar, frames),
        }

        self.visual.update(dt, tuning.ripples.min_amplitude);
        self.growth.update(dt, tuning.ripples.min_amplitude);
    }

    fn update_top(&mut self, t: &TopBarTuning, frames: f32) {
        let eased = ease_in_out_sine(self.grow_progress(t));
        self.target_height = t.final_height * eased;
        self.current_height = frame_lerp(self.current_height, self.target_height, t.lerp, frames);
    }

    fn update_bottom(&mut self, t: &BottomBarTuning, frames: f32) {
        let growth = self.merged_count as f32 * t.growth_per_droplet;
        self.target_height = growth.min(t.final_height).max(t.first_height);
        if self.merged_count > 0 {
            let target = self.target_height;
            self.current_height = frame_lerp(self.current_height, target, t.lerp, frames);
        }
    }

    /// Top bar intro progress, 0..1.
    pub fn grow_progress(&self, t: &TopBarTuning) -> f32 {
        (self.elapsed / t.duration).min(1.0)
    }

    /// A droplet merged at `x`; `strength` is its scale.
    pub fn on_merge(&mut self, x: f32, strength: f32, tuning: &RippleTuning) {
        if self.kind != BarKind::Bottom {
            return;
        }
        self.visual.push(Ripple::visual(x, strength, tuning));
        self.growth.push(Ripple::growth(x, strength, tuning));
        self.merged_count += 1;
    }

    /// Jump to the resting state, for reduced motion.
    pub fn settle(&mut self, tuning: &Tuning) {
        let final_height = match self.kind {
            BarKind::Top => tuning.top_bar.final_height,
            BarKind::Bottom => tuning.bottom_bar.final_height,
        };
        self.current_height = final_height;
        self.target_height = final_height;
        self.elapsed = tuning.top_bar.duration;
        self.visual.clear();
        self.growth.clear();
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(self.kind, tuning);
    }

    /// Closed outline in screen coordinates. Empty while the bar is too
    /// thin to see.
    ///
    /// `edge_scale` shrinks wave amplitude and tilt on small devices.
    pub fn outline(
        &self,
        width: f32,
        height: f32,
        tuning: &Tuning,
        edge_scale: f32,
    ) -> Vec<Point> {
        if self.current_height < MIN_VISIBLE_HEIGHT {
            return Vec::new();
        }
        let overhang = tuning.bar_overhang;
        let span = width + overhang * 2.0;

        let (anchor_y, mut edge) = match self.kind {
            BarKind::Top => {
                let t = &tuning.top_bar;
                let calm = 1.0 - self.grow_progress(t) * t.dampening;
                let amplitude = t.wave_amplitude * edge_scale * calm;
                let wave = Wave {
                    amplitude,
                    frequency: t.wave_frequency,
                    roughness: t.roughness,
                };
                let mut edge =
                    organic_edge(span, self.current_height, wave, self.anim_time, t.segments);
                apply_tilt(&mut edge, t.tilt * edge_scale, span);
                for p in &mut edge {
                    p.x -= overhang;
                }
                (0.0, edge)
            }
            BarKind::Bottom => {
                let t = &tuning.bottom_bar;
                let wave = Wave {
                    amplitude: t.wave_amplitude * edge_scale,
                    frequency: t.wave_frequency,
                    roughness: t.roughness,
                };
                let edge = edge_with_ripples(
                    span,
                    height - self.current_height,
                    wave,
                    self.anim_time,
                    t.segments,
                    overhang,
                    self.growth.iter().chain(self.visual.iter()),
                );
                (height, edge)
            }
        };

        // Straight side along the viewport edge, then the organic edge back.
        let mut outline = Vec::with_capacity(edge.len() + 2);
        outline.push(Point::new(-overhang, anchor_y));
        outline.push(Point::new(width + overhang, anchor_y));
        edge.reverse();
        outline.extend(edge);
        outline
    }
}
