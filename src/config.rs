// config.rs - Tuning values and scene options
//
// Every tunable number lives in `Tuning`, passed into the simulator and
// renderers at construction. Nothing here is global, so two scenes (or two
// tests) can run side by side with different values.
//
// All structs deserialize with defaults so the page can pass a partial JS
// object through serde-wasm-bindgen.

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::quality::QualityTier;
use crate::seed::PhasePolicy;
use crate::sim::FrictionCurve;

/// Physics, layout and compositing constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    // Layout
    pub bar_height: f32,
    pub bar_overhang: f32, // bars extend past both viewport edges so blur never eats their ends
    pub droplet_base_width: f32,
    pub droplet_base_height: f32,

    // Droplet size and timing
    pub min_scale: f32,
    pub max_scale: f32,
    pub max_delay: f32,

    // Seed placement (percent of width)
    pub seed_min_offset: f32,
    pub seed_max_offset: f32,
    pub seed_min_spacing: f32,

    // Motion, in pixels per reference frame (1/60 s)
    pub gravity: f32,
    pub max_velocity: f32,
    pub min_velocity: f32,

    // Spawn
    pub spawn_duration: f32,
    pub spawn_lift: f32,
    pub spawn_travel: f32,
    pub spawn_velocity: f32,
    pub spawn_exit_progress: f32,

    // Fluid zones
    pub standard_friction: FrictionCurve,
    pub puddle_friction: FrictionCurve,

    // Squash and stretch
    pub freefall_stretch: f32,
    pub exit_stretch: f32,
    pub entry_squash: f32,
    pub text_wobble: f32,
    pub scale_lerp: f32,

    // Merge
    pub merge_depth: f32,
    pub merge_fade_depth: f32,
    pub merge_velocity_scale: f32,
    pub merge_spread: f32,
    pub merge_alpha_epsilon: f32,

    // Recycle placement inside the title
    pub text_edge_margin: f32,
    pub glyph_width_ratio: f32,

    pub mobile: MobileScaling,
    pub top_bar: TopBarTuning,
    pub bottom_bar: BottomBarTuning,
    pub ripples: RippleTuning,
    pub goo: GooTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bar_height: 62.0,
            bar_overhang: 20.0,
            droplet_base_width: 59.0,
            droplet_base_height: 62.0,

            min_scale: 0.7,
            max_scale: 1.0,
            max_delay: 1.25,

            seed_min_offset: 5.0,
            seed_max_offset: 95.0,
            seed_min_spacing: 6.0,

            gravity: 0.8,
            max_velocity: 12.0,
            min_velocity: 1.0,

            spawn_duration: 0.5,
            spawn_lift: 10.0,
            spawn_travel: 50.0,
            spawn_velocity: 2.0,
            spawn_exit_progress: 0.9,

            standard_friction: FrictionCurve {
                entry: 0.5,
                entry_end: 0.1,
                middle: 1.02,
                exit: 0.5,
                exit_start: 0.9,
            },
            puddle_friction: FrictionCurve {
                entry: 0.3,
                entry_end: 0.15,
                middle: 0.85,
                exit: 0.7,
                exit_start: 0.6,
            },

            freefall_stretch: 1.3,
            exit_stretch: 1.2,
            entry_squash: 0.7,
            text_wobble: 0.1,
            scale_lerp: 0.15,

            merge_depth: 40.0,
            merge_fade_depth: 40.0,
            merge_velocity_scale: 0.7,
            merge_spread: 0.3,
            merge_alpha_epsilon: 0.05,

            text_edge_margin: 0.05,
            glyph_width_ratio: 0.6,

            mobile: MobileScaling::default(),
            top_bar: TopBarTuning::default(),
            bottom_bar: BottomBarTuning::default(),
            ripples: RippleTuning::default(),
            goo: GooTuning::default(),
        }
    }
}

/// Multipliers applied on small or slow devices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileScaling {
    pub droplet_scale: f32,
    pub width: f32,
    pub height: f32,
    pub physics: f32,
    pub gravity: f32,
    pub spawn_velocity: f32,
    pub fluid_velocity: f32,
    pub merge_velocity_scale: f32, // replaces Tuning::merge_velocity_scale
    pub edge_amplitude: f32,
}

impl Default for MobileScaling {
    fn default() -> Self {
        Self {
            droplet_scale: 0.5,
            width: 0.7,
            height: 1.0,
            physics: 0.5,
            gravity: 0.5,
            spawn_velocity: 0.1,
            fluid_velocity: 0.3,
            merge_velocity_scale: 0.1,
            edge_amplitude: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopBarTuning {
    pub duration: f32,
    pub final_height: f32,
    pub wave_frequency: f32,
    pub wave_amplitude: f32,
    pub dampening: f32,
    pub tilt: f32, // left edge hangs this much lower than the right
    pub roughness: f32,
    pub lerp: f32,
    pub segments: usize,
}

impl Default for TopBarTuning {
    fn default() -> Self {
        Self {
            duration: 1.0,
            final_height: 62.0,
            wave_frequency: 0.05,
            wave_amplitude: 8.0,
            dampening: 0.1,
            tilt: 50.0,
            roughness: 2.0,
            lerp: 0.15,
            segments: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BottomBarTuning {
    pub first_height: f32,
    pub final_height: f32,
    pub growth_per_droplet: f32,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub roughness: f32,
    pub lerp: f32,
    pub segments: usize,
}

impl Default for BottomBarTuning {
    fn default() -> Self {
        Self {
            first_height: 20.0,
            final_height: 62.0,
            growth_per_droplet: 4.0,
            wave_amplitude: 5.0,
            wave_frequency: 0.03,
            roughness: 1.0,
            lerp: 0.08,
            segments: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleTuning {
    pub cap: usize,
    pub min_amplitude: f32,
    pub visual_amplitude: f32,
    pub visual_decay: f32,
    pub visual_radius: f32,
    pub growth_amplitude: f32,
    pub growth_decay: f32,
    pub growth_radius: f32,
}

impl Default for RippleTuning {
    fn default() -> Self {
        Self {
            cap: 5,
            min_amplitude: 0.1,
            visual_amplitude: 5.0,
            visual_decay: 0.95,
            visual_radius: 80.0,
            growth_amplitude: 6.0,
            growth_decay: 0.998,
            growth_radius: 220.0,
        }
    }
}

/// Alpha remap `clamp(a * alpha_multiply - alpha_offset, 0, 1)` and the
/// per-channel tint applied to the white silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GooTuning {
    pub alpha_multiply: f32,
    pub alpha_offset: f32,
    pub tint: [f32; 3],
}

impl Default for GooTuning {
    fn default() -> Self {
        Self {
            alpha_multiply: 20.0,
            alpha_offset: 8.0,
            tint: [0.533, 0.031, 0.031], // #880808
        }
    }
}

/// Per-device physics multipliers, resolved once from `Tuning` and the
/// mobile flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceScale {
    pub gravity: f32,
    pub spawn_velocity: f32,
    pub fluid_gravity: f32,
    pub merge_velocity_scale: f32,
    pub width: f32,
    pub height: f32,
    pub physics_size: f32,
    pub min_scale: f32,
    pub edge_amplitude: f32,
}

impl Tuning {
    pub fn device_scale(&self, is_mobile: bool) -> DeviceScale {
        if !is_mobile {
            return DeviceScale {
                gravity: 1.0,
                spawn_velocity: 1.0,
                fluid_gravity: 1.0,
                merge_velocity_scale: self.merge_velocity_scale,
                width: 1.0,
                height: 1.0,
                physics_size: 1.0,
                min_scale: 1.0,
                edge_amplitude: 1.0,
            };
        }
        let m = &self.mobile;
        DeviceScale {
            gravity: m.gravity,
            spawn_velocity: m.spawn_velocity,
            fluid_gravity: m.fluid_velocity,
            merge_velocity_scale: m.merge_velocity_scale,
            width: m.width,
            height: m.height,
            physics_size: m.physics,
            min_scale: m.droplet_scale,
            edge_amplitude: m.edge_amplitude,
        }
    }

    /// Reject values that would make the simulation misbehave.
    pub fn validate(&self) -> SceneResult<()> {
        let positive = [
            ("barHeight", self.bar_height),
            ("dropletBaseWidth", self.droplet_base_width),
            ("dropletBaseHeight", self.droplet_base_height),
            ("maxVelocity", self.max_velocity),
            ("spawnDuration", self.spawn_duration),
            ("mergeFadeDepth", self.merge_fade_depth),
            ("scaleLerp", self.scale_lerp),
            ("topBar.duration", self.top_bar.duration),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                let msg = format!("{name} must be positive, got {value}");
                return Err(SceneError::InvalidTuning(msg));
            }
        }

        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(SceneError::InvalidTuning(format!(
                "scale range {}..{} is empty",
                self.min_scale, self.max_scale
            )));
        }
        if self.seed_min_offset > self.seed_max_offset {
            return Err(SceneError::InvalidTuning(format!(
                "seed offset range {}..{} is inverted",
                self.seed_min_offset, self.seed_max_offset
            )));
        }
        if self.min_velocity < 0.0 || self.min_velocity > self.max_velocity {
            return Err(SceneError::InvalidTuning(format!(
                "minVelocity {} must lie in 0..={}",
                self.min_velocity, self.max_velocity
            )));
        }
        if self.scale_lerp > 1.0 || self.top_bar.lerp > 1.0 || self.bottom_bar.lerp > 1.0 {
            return Err(SceneError::InvalidTuning("lerp speeds above 1 overshoot".into()));
        }
        if self.ripples.cap == 0 {
            return Err(SceneError::InvalidTuning("ripple cap must be at least 1".into()));
        }
        if self.top_bar.segments == 0 || self.bottom_bar.segments == 0 {
            return Err(SceneError::InvalidTuning("edge segments must be at least 1".into()));
        }
        Ok(())
    }
}

/// Coarse capability hints reported by the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceHints {
    pub is_mobile: bool,
    pub hardware_concurrency: u32,
    pub device_pixel_ratio: f32,
}

impl Default for DeviceHints {
    fn default() -> Self {
        Self {
            is_mobile: false,
            hardware_concurrency: 4,
            device_pixel_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneOptions {
    pub tuning: Tuning,
    pub quality_override: Option<QualityTier>,
    pub device: DeviceHints,
    pub phase_policy: PhasePolicy,
    /// Fixed droplet count; derived from the viewport width when absent.
    pub droplet_count: Option<usize>,
    pub auto_adjust: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            quality_override: None,
            device: DeviceHints::default(),
            phase_policy: PhasePolicy::Zero,
            droplet_count: None,
            auto_adjust: true,
        }
    }
}
