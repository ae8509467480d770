// ripple.rs - Impact ripples on the puddle surface
//
// Visual ripples wobble and die within a second. Growth ripples do not
// wobble; they hold a slowly sinking mound where droplets landed so the
// puddle rises unevenly.

use std::collections::VecDeque;

use crate::config::RippleTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RippleKind {
    Visual,
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub x: f32,
    pub amplitude: f32,
    pub phase: f32, // seconds since impact; visual only
    pub decay: f32, // amplitude multiplier per 1/60 s frame
    pub radius: f32,
    pub kind: RippleKind,
}

impl Ripple {
    pub fn visual(x: f32, strength: f32, tuning: &RippleTuning) -> Self {
        Self {
            x,
            amplitude: tuning.visual_amplitude * strength,
            phase: 0.0,
            decay: tuning.visual_decay,
            radius: tuning.visual_radius,
            kind: RippleKind::Visual,
        }
    }

    pub fn growth(x: f32, strength: f32, tuning: &RippleTuning) -> Self {
        Self {
            x,
            amplitude: tuning.growth_amplitude * strength,
            phase: 0.0,
            decay: tuning.growth_decay,
            radius: tuning.growth_radius,
            kind: RippleKind::Growth,
        }
    }
}

/// Bounded FIFO of ripples; the oldest is evicted on overflow.
#[derive(Debug, Clone)]
pub struct RippleList {
    items: VecDeque<Ripple>,
    cap: usize,
}

impl RippleList {
    pub fn new(cap: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(cap),
            cap: cap.max(1),
        }
    }

    pub fn push(&mut self, ripple: Ripple) {
        if self.items.len() == self.cap {
            self.items.pop_front();
        }
        self.items.push_back(ripple);
    }

    /// Advance by `dt` seconds and drop ripples that decayed below
    /// `min_amplitude`. Decay rates are per 1/60 s frame.
    pub fn update(&mut self, dt: f32, min_amplitude: f32) {
        let frames = dt * 60.0;
        for r in &mut self.items {
            if r.kind == RippleKind::Visual {
                r.phase += dt;
            }
            r.amplitude *= r.decay.powf(frames);
        }
        self.items.retain(|r| r.amplitude >= min_amplitude);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ripple> + Clone {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
