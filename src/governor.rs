// governor.rs - Frame-rate driven quality downgrades
//
// Samples fps every tick, keeps a trailing window, and every CHECK_INTERVAL
// seconds of scene time compares the window average against per-tier
// floors. Downgrades only, one step per check.

use std::collections::VecDeque;

use crate::quality::QualityTier;

const HISTORY_LEN: usize = 60;
const CHECK_INTERVAL: f32 = 2.0;
const HIGH_TIER_FLOOR: f32 = 30.0;
const MEDIUM_TIER_FLOOR: f32 = 20.0;
const IDLE_FPS: f32 = 60.0;

/// Average fps below which `tier` steps down. Low has nowhere to go.
fn floor(tier: QualityTier) -> f32 {
    match tier {
        QualityTier::High => HIGH_TIER_FLOOR,
        QualityTier::Medium => MEDIUM_TIER_FLOOR,
        QualityTier::Low => 0.0,
    }
}

pub struct FpsGovernor {
    tier: QualityTier,
    history: VecDeque<f32>,
    current_fps: f32,
    elapsed: f32,
    last_check: f32,
    auto_adjust: bool,
}

impl FpsGovernor {
    pub fn new(tier: QualityTier) -> Self {
        Self {
            tier,
            history: VecDeque::with_capacity(HISTORY_LEN),
            current_fps: IDLE_FPS,
            elapsed: 0.0,
            last_check: 0.0,
            auto_adjust: true,
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    pub fn set_auto_adjust(&mut self, enabled: bool) {
        self.auto_adjust = enabled;
    }

    /// Record one frame. Returns the new tier when this sample triggered a
    /// downgrade.
    pub fn sample(&mut self, dt: f32) -> Option<QualityTier> {
        if dt <= 0.0 || !dt.is_finite() {
            return None;
        }
        self.elapsed += dt;
        self.current_fps = 1.0 / dt;

        self.history.push_back(self.current_fps);
        if self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }

        if !self.auto_adjust || self.elapsed - self.last_check < CHECK_INTERVAL {
            return None;
        }
        self.last_check = self.elapsed;

        let avg = self.average_fps();
        if avg >= floor(self.tier) {
            return None;
        }
        let next = self.tier.downgraded()?;

        log::warn!(
            "low frame rate ({avg:.1} fps), quality {} -> {}",
            self.tier.as_str(),
            next.as_str()
        );
        self.tier = next;
        self.history.clear();
        Some(next)
    }

    pub fn current_fps(&self) -> f32 {
        self.current_fps
    }

    pub fn average_fps(&self) -> f32 {
        if self.history.is_empty() {
            return IDLE_FPS;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }
}
