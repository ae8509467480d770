// quality.rs - Rendering cost tiers
//
// A tier bundles the knobs that dominate frame cost: blur radius and pass
// count, droplet outline detail, and how many droplet slots may run at once.

use serde::{Deserialize, Serialize};

use crate::config::DeviceHints;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitySettings {
    pub blur_strength: f32,
    pub blur_quality: u32,     // blur passes
    pub droplet_detail: usize, // outline points per bezier segment
    pub droplet_budget: usize, // max simultaneously active droplet slots
}

impl QualityTier {
    pub fn settings(self) -> QualitySettings {
        match self {
            QualityTier::Low => QualitySettings {
                blur_strength: 6.0,
                blur_quality: 2,
                droplet_detail: 4,
                droplet_budget: 4,
            },
            QualityTier::Medium => QualitySettings {
                blur_strength: 8.0,
                blur_quality: 3,
                droplet_detail: 6,
                droplet_budget: 6,
            },
            QualityTier::High => QualitySettings {
                blur_strength: 10.0,
                blur_quality: 4,
                droplet_detail: 8,
                droplet_budget: 7,
            },
        }
    }

    /// One step cheaper, or `None` at the bottom.
    pub fn downgraded(self) -> Option<QualityTier> {
        match self {
            QualityTier::High => Some(QualityTier::Medium),
            QualityTier::Medium => Some(QualityTier::Low),
            QualityTier::Low => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }

    /// Initial tier from coarse device hints.
    pub fn detect(device: &DeviceHints) -> QualityTier {
        let low_end = device.is_mobile
            && device.hardware_concurrency <= 4
            && device.device_pixel_ratio <= 2.0;
        if low_end {
            QualityTier::Low
        } else if device.is_mobile {
            QualityTier::Medium
        } else {
            QualityTier::High
        }
    }
}
