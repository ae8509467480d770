// seed.rs - Droplet seed batches
//
// A seed fixes where a droplet falls (percent of viewport width), how big it
// is, and how long it waits before emerging from the top bar. Batches are
// regenerated at loop boundaries, so counts and spacing vary per loop.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Tuning;

const MAX_PLACEMENT_ATTEMPTS: usize = 200;
const COUNT_JITTER: (f32, f32) = (0.7, 1.3);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropletSeed {
    pub offset: f32, // percent of viewport width
    pub scale: f32,
    pub delay: f32, // seconds
    pub phase: f32, // 0..1 position in the loop at start
}

/// Where a fresh batch starts in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhasePolicy {
    /// Every droplet starts from the top of its loop.
    #[default]
    Zero,
    /// Droplets start at random points of their loop.
    Randomized,
}

/// Uniform sample in `lo..hi`. A degenerate range yields `lo`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    lo + rng.random::<f32>() * (hi - lo)
}

/// Produce a spaced, sorted batch of roughly `count` seeds.
///
/// Never fails: if placement runs out of attempts the batch is just shorter.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    scale_multiplier: f32,
    min_scale: f32,
    max_scale: f32,
    tuning: &Tuning,
    policy: PhasePolicy,
) -> Vec<DropletSeed> {
    let jitter = uniform(rng, COUNT_JITTER.0, COUNT_JITTER.1);
    let target = ((count as f32 * jitter).round() as usize).max(1);

    let mut offsets: Vec<f32> = Vec::with_capacity(target);
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        if offsets.len() == target {
            break;
        }
        let candidate = uniform(rng, tuning.seed_min_offset, tuning.seed_max_offset);
        if offsets
            .iter()
            .all(|&o| (o - candidate).abs() >= tuning.seed_min_spacing)
        {
            offsets.push(candidate);
        }
    }
    if offsets.len() < target {
        log::debug!("seed placement gave up at {}/{target}", offsets.len());
    }
    offsets.sort_by(f32::total_cmp);

    offsets
        .into_iter()
        .map(|offset| DropletSeed {
            offset,
            scale: uniform(rng, min_scale, max_scale) * scale_multiplier,
            delay: uniform(rng, 0.0, tuning.max_delay),
            phase: match policy {
                PhasePolicy::Zero => 0.0,
                PhasePolicy::Randomized => rng.random::<f32>(),
            },
        })
        .collect()
}

// ============================================================================
// Responsive sizing
// ============================================================================

pub fn droplet_count_for_width(width: f32) -> usize {
    if width <= 480.0 {
        3
    } else if width <= 768.0 {
        4
    } else if width <= 1024.0 {
        5
    } else {
        7
    }
}

pub fn scale_multiplier_for_width(width: f32) -> f32 {
    if width <= 480.0 {
        0.6
    } else if width <= 768.0 {
        0.75
    } else if width <= 1024.0 {
        0.9
    } else {
        1.0
    }
}

/// Width class the seed batch was generated for. A change across resizes
/// means the batch no longer fits the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub droplet_count: usize,
    pub scale_multiplier: f32,
}

impl Breakpoint {
    pub fn for_width(width: f32) -> Self {
        Self {
            droplet_count: droplet_count_for_width(width),
            scale_multiplier: scale_multiplier_for_width(width),
        }
    }
}
