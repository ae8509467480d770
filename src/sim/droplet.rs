// droplet.rs - Per-droplet phase machine
//
// Spawn -> Freefall -> (InTopBar | InTextZone | InBottomBar) -> ... -> Merge
//
// Velocities are pixels per reference frame (1/60 s). Everything scales
// with `frames = dt * 60`: gravity and position linearly, friction and
// squash lerps as powers. Merge decay alone is per tick.

use rand::Rng;

use crate::config::{DeviceScale, Tuning};
use crate::seed::{DropletSeed, uniform};

use super::frame_lerp;
use super::zone::{FluidZone, Zones};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawn,
    Freefall,
    InTopBar,
    InTextZone,
    InBottomBar,
    Merge,
}

impl Phase {
    /// Position in the fall order, for checking that phases never go
    /// backwards within one loop.
    pub fn rank(self) -> u8 {
        match self {
            Phase::Spawn => 0,
            Phase::Freefall | Phase::InTopBar | Phase::InTextZone => 1,
            Phase::InBottomBar => 2,
            Phase::Merge => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropletState {
    pub y: f32, // centre, screen px
    pub velocity: f32,
    pub offset: f32, // percent of viewport width
    pub scale: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub grow: f32, // uniform size factor while emerging
    pub alpha: f32,
    pub elapsed: f32,
    pub delay: f32,
    pub phase: Phase,
    pub merge_origin: f32, // bottom edge when Merge began
    pub dormant: bool,
}

/// What one step did, beyond moving the droplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Waiting,
    Merged,
}

impl Default for DropletState {
    fn default() -> Self {
        Self {
            y: 0.0,
            velocity: 0.0,
            offset: 50.0,
            scale: 1.0,
            x_scale: 1.0,
            y_scale: 1.0,
            grow: 0.5,
            alpha: 0.0,
            elapsed: 0.0,
            delay: 0.0,
            phase: Phase::Spawn,
            merge_origin: 0.0,
            dormant: true,
        }
    }
}

impl DropletState {
    pub fn from_seed(seed: &DropletSeed) -> Self {
        Self {
            offset: seed.offset,
            scale: seed.scale,
            delay: seed.delay,
            dormant: false,
            ..Self::default()
        }
    }

    /// Collision height in pixels.
    #[inline]
    pub fn physics_height(&self, tuning: &Tuning, device: &DeviceScale) -> f32 {
        tuning.droplet_base_height * device.height * self.scale * device.physics_size
    }

    /// Reset for another loop from `seed`, keeping the slot.
    pub fn restart(&mut self, seed: &DropletSeed) {
        *self = Self::from_seed(seed);
    }

    /// Reset for another loop at a random spot inside `offset_range`, sized
    /// like a fresh seed at the current breakpoint.
    pub fn recycle<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        offset_range: (f32, f32),
        scale_multiplier: f32,
        tuning: &Tuning,
        device: &DeviceScale,
    ) {
        let min_scale = tuning.min_scale * device.min_scale;
        let seed = DropletSeed {
            offset: uniform(rng, offset_range.0, offset_range.1),
            scale: uniform(rng, min_scale, tuning.max_scale) * scale_multiplier,
            delay: uniform(rng, 0.0, tuning.max_delay),
            phase: 0.0,
        };
        self.restart(&seed);
    }

    pub fn is_visible(&self) -> bool {
        !self.dormant && self.alpha > 0.0
    }

    /// Advance one tick.
    pub fn step(
        &mut self,
        dt: f32,
        zones: &Zones,
        tuning: &Tuning,
        device: &DeviceScale,
    ) -> StepOutcome {
        if self.dormant {
            return StepOutcome::Waiting;
        }

        self.elapsed += dt;
        let local = self.elapsed - self.delay;
        if local < 0.0 {
            self.alpha = 0.0;
            return StepOutcome::Waiting;
        }

        let frames = dt * 60.0;
        let height = self.physics_height(tuning, device);
        let half = height * 0.5;

        if self.phase == Phase::Spawn {
            self.spawn(local, frames, zones, tuning, device, half);
            if self.phase == Phase::Spawn {
                return StepOutcome::Moved;
            }
        }

        let top = self.y - half;
        let bottom = self.y + half;
        let text = zones.text(height);
        self.transition(top, bottom, zones, text, tuning);

        match self.phase {
            Phase::Spawn => {}
            Phase::Freefall => {
                let g = tuning.gravity * device.gravity * frames;
                self.velocity = (self.velocity + g).min(tuning.max_velocity);
                self.x_scale = 1.0;
                self.grow = 1.0;
                let stretch = tuning.freefall_stretch;
                self.y_scale = frame_lerp(self.y_scale, stretch, tuning.scale_lerp, frames);
                self.alpha = 1.0;
            }
            Phase::InTopBar | Phase::InTextZone | Phase::InBottomBar => {
                let (zone, curve) = match self.phase {
                    Phase::InTopBar => (zones.top_bar, tuning.standard_friction),
                    Phase::InBottomBar => (zones.puddle, tuning.puddle_friction),
                    // transition() leaves the text zone when the band is empty
                    _ => (text.unwrap_or(zones.top_bar), tuning.standard_friction),
                };
                let p = zone.progress(bottom);

                let g = tuning.gravity * device.fluid_gravity * frames;
                let friction = curve.factor(p).powf(frames);
                self.velocity = (self.velocity * friction + g).min(tuning.max_velocity);

                let target = if p < curve.entry_end {
                    tuning.entry_squash
                } else if p >= curve.exit_start {
                    1.0 + (tuning.exit_stretch - 1.0) * curve.exit_progress(p)
                } else if self.phase == Phase::InTextZone {
                    1.0 + (p * std::f32::consts::PI).sin() * tuning.text_wobble
                } else {
                    1.0
                };
                self.x_scale = 1.0;
                self.grow = 1.0;
                self.y_scale = frame_lerp(self.y_scale, target, tuning.scale_lerp, frames);
                self.alpha = 1.0;
            }
            Phase::Merge => {
                // per tick, not per frame
                let decayed = self.velocity * device.merge_velocity_scale;
                self.velocity = decayed.max(tuning.min_velocity);
                let p = ((bottom - self.merge_origin) / tuning.merge_fade_depth).clamp(0.0, 1.0);
                self.alpha = 1.0 - p;
                self.x_scale = 1.0 + p * tuning.merge_spread;
                self.y_scale = frame_lerp(
                    self.y_scale,
                    1.0 - p * tuning.merge_spread,
                    tuning.scale_lerp,
                    frames,
                );
            }
        }

        self.y += self.velocity * frames;

        if self.phase == Phase::Merge && self.alpha <= tuning.merge_alpha_epsilon {
            return StepOutcome::Merged;
        }
        StepOutcome::Moved
    }

    fn spawn(
        &mut self,
        local: f32,
        frames: f32,
        zones: &Zones,
        tuning: &Tuning,
        device: &DeviceScale,
        half: f32,
    ) {
        let p = (local / tuning.spawn_duration).min(1.0);
        self.y = zones.top_bar.bottom - half - tuning.spawn_lift + p * tuning.spawn_travel;
        self.velocity = p * tuning.spawn_velocity * device.spawn_velocity;

        let target = tuning.entry_squash + (1.0 - tuning.entry_squash) * p;
        self.y_scale = frame_lerp(self.y_scale, target, tuning.scale_lerp, frames);
        self.x_scale = 1.0;
        self.grow = p.max(0.5);
        self.alpha = 1.0;

        if p >= tuning.spawn_exit_progress {
            self.phase = Phase::Freefall;
        }
    }

    fn transition(
        &mut self,
        top: f32,
        bottom: f32,
        zones: &Zones,
        text: Option<FluidZone>,
        tuning: &Tuning,
    ) {
        let in_top = zones.top_bar.overlaps(top, bottom);
        let in_text = text.is_some_and(|z| z.overlaps(top, bottom));
        let in_puddle = zones.puddle.overlaps(top, bottom);
        let before = self.phase.rank();

        self.phase = match self.phase {
            Phase::Freefall if in_puddle => Phase::InBottomBar,
            Phase::Freefall if in_text => Phase::InTextZone,
            Phase::Freefall if in_top => Phase::InTopBar,
            Phase::InTopBar if !in_top && top > zones.top_bar.bottom => Phase::Freefall,
            Phase::InTextZone => match text {
                Some(z) if !in_text && top > z.bottom => Phase::Freefall,
                Some(_) => Phase::InTextZone,
                None => Phase::Freefall,
            },
            Phase::InBottomBar if bottom > zones.puddle.top + tuning.merge_depth => {
                self.merge_origin = bottom;
                Phase::Merge
            }
            phase => phase,
        };
        debug_assert!(self.phase.rank() >= before, "{:?} went backwards", self.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Rect, SceneLayout, Viewport};

    const DT: f32 = 0.125;

    fn zones() -> Zones {
        let tuning = Tuning::default();
        let mut layout = SceneLayout::new(Viewport::new(1024, 800).unwrap(), &tuning);
        layout.set_title(Rect {
            x: 112.0,
            y: 320.0,
            width: 800.0,
            height: 240.0,
        });
        Zones::from_layout(&layout)
    }

    fn seed(delay: f32) -> DropletSeed {
        DropletSeed {
            offset: 50.0,
            scale: 1.0,
            delay,
            phase: 0.0,
        }
    }

    #[test]
    fn test_hidden_until_delay_then_visible() {
        let tuning = Tuning::default();
        let device = tuning.device_scale(false);
        let zones = zones();
        let mut d = DropletState::from_seed(&seed(0.25));

        // elapsed 0.125 < delay
        assert_eq!(d.step(DT, &zones, &tuning, &device), StepOutcome::Waiting);
        assert_eq!(d.alpha, 0.0);
        assert!(!d.is_visible());

        // elapsed == delay exactly
        assert_eq!(d.step(DT, &zones, &tuning, &device), StepOutcome::Moved);
        assert_eq!(d.phase, Phase::Spawn);
        assert_eq!(d.alpha, 1.0);
        assert!(d.is_visible());
    }

    #[test]
    fn test_phases_run_in_order_and_merge() {
        let tuning = Tuning::default();
        let device = tuning.device_scale(false);
        let zones = zones();
        let mut d = DropletState::from_seed(&seed(0.0));

        let mut seen = vec![d.phase];
        let mut merged = false;
        for _ in 0..2000 {
            let before = d.phase.rank();
            let outcome = d.step(1.0 / 60.0, &zones, &tuning, &device);
            assert!(d.phase.rank() >= before, "{:?} went backwards", d.phase);
            if seen.last() != Some(&d.phase) {
                seen.push(d.phase);
            }
            if outcome == StepOutcome::Merged {
                merged = true;
                break;
            }
        }
        assert!(merged, "never merged, phases {seen:?}");
        assert_eq!(seen.first(), Some(&Phase::Spawn));
        assert!(seen.contains(&Phase::Freefall));
        assert!(seen.contains(&Phase::InTextZone));
        assert_eq!(&seen[seen.len() - 2..], &[Phase::InBottomBar, Phase::Merge]);
    }

    #[test]
    fn test_velocity_stays_bounded() {
        let tuning = Tuning::default();
        for mobile in [false, true] {
            let device = tuning.device_scale(mobile);
            let zones = zones();
            let mut d = DropletState::from_seed(&seed(0.1));
            for _ in 0..3000 {
                if d.step(1.0 / 60.0, &zones, &tuning, &device) == StepOutcome::Merged {
                    break;
                }
                let v = d.velocity;
                assert!(v >= 0.0 && v <= tuning.max_velocity, "v = {v}");
            }
        }
    }

    #[test]
    fn test_merge_velocity_decays_to_floor() {
        let tuning = Tuning {
            merge_fade_depth: 1.0e6,
            ..Tuning::default()
        };
        let device = tuning.device_scale(false);
        let zones = zones();
        let mut d = DropletState::from_seed(&seed(0.0));
        d.phase = Phase::Merge;
        d.elapsed = 10.0;
        d.y = zones.puddle.top + 50.0;
        d.merge_origin = d.y;
        d.velocity = 8.0;

        let mut prev = d.velocity;
        for _ in 0..12 {
            d.step(DT, &zones, &tuning, &device);
            assert_eq!(d.velocity, (prev * 0.7).max(1.0));
            prev = d.velocity;
        }
        assert_eq!(d.velocity, 1.0);
        assert_eq!(d.phase, Phase::Merge);
    }

    #[test]
    fn test_merge_fades_from_merge_point() {
        let tuning = Tuning::default();
        let device = tuning.device_scale(false);
        let zones = zones();
        let mut d = DropletState::from_seed(&seed(0.0));
        d.phase = Phase::InBottomBar;
        d.elapsed = 10.0;
        d.velocity = 2.0;
        let half = d.physics_height(&tuning, &device) * 0.5;
        // bottom edge just past the merge depth
        d.y = zones.puddle.top + tuning.merge_depth + 1.0 - half;

        d.step(DT, &zones, &tuning, &device);
        assert_eq!(d.phase, Phase::Merge);
        assert_eq!(d.alpha, 1.0);

        let outcome = d.step(DT, &zones, &tuning, &device);
        assert_eq!(outcome, StepOutcome::Moved);
        assert!(d.alpha < 1.0 && d.alpha > 0.0);
        assert!(d.x_scale > 1.0);
    }

    #[test]
    fn test_recycle_lands_in_range() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let tuning = Tuning::default();
        let device = tuning.device_scale(true);
        let mut rng = StdRng::seed_from_u64(5);
        let mut d = DropletState::from_seed(&seed(0.0));
        for _ in 0..50 {
            d.recycle(&mut rng, (20.0, 70.0), 1.0, &tuning, &device);
            assert!((20.0..=70.0).contains(&d.offset));
            assert!(d.scale >= 0.35 && d.scale <= 1.0);
            assert!(d.delay <= 1.25);
            assert_eq!(d.phase, Phase::Spawn);
            assert_eq!(d.alpha, 0.0);
            assert_eq!(d.velocity, 0.0);
        }
    }

    #[test]
    fn test_recycle_applies_breakpoint_multiplier() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let tuning = Tuning::default();
        let device = tuning.device_scale(false);
        let mut rng = StdRng::seed_from_u64(9);
        let mut d = DropletState::from_seed(&seed(0.0));
        for _ in 0..50 {
            d.recycle(&mut rng, (5.0, 95.0), 0.6, &tuning, &device);
            assert!(d.scale <= 0.6 + 1e-6, "scale {}", d.scale);
            assert!(d.scale >= 0.7 * 0.6 - 1e-6, "scale {}", d.scale);
        }
    }

    /// Seconds from release to the merge step at a fixed tick length.
    fn fall_time(dt: f32) -> f32 {
        let tuning = Tuning::default();
        let device = tuning.device_scale(false);
        let zones = zones();
        let mut d = DropletState::from_seed(&seed(0.0));
        for _ in 0..20_000 {
            if d.step(dt, &zones, &tuning, &device) == StepOutcome::Merged {
                return d.elapsed;
            }
        }
        panic!("never merged at dt {dt}");
    }

    #[test]
    fn test_fall_time_independent_of_frame_rate() {
        let reference = fall_time(1.0 / 60.0);
        for hz in [30.0, 120.0] {
            let t = fall_time(1.0 / hz);
            let drift = (t - reference).abs() / reference;
            assert!(drift < 0.15, "{hz} Hz took {t}s vs {reference}s at 60 Hz");
        }
    }

    #[test]
    fn test_squash_converges_alike_at_any_frame_rate() {
        // one second of lerping toward a fixed target
        let at = |hz: f32| {
            let mut v = 1.0;
            for _ in 0..hz as usize {
                v = frame_lerp(v, 0.5, 0.15, 60.0 / hz);
            }
            v
        };
        let reference = at(60.0);
        assert!((at(30.0) - reference).abs() < 1e-4);
        assert!((at(120.0) - reference).abs() < 1e-4);
    }

    #[test]
    fn test_dormant_slot_never_moves() {
        let tuning = Tuning::default();
        let device = tuning.device_scale(false);
        let mut d = DropletState::default();
        let before = d;
        assert_eq!(d.step(DT, &zones(), &tuning, &device), StepOutcome::Waiting);
        assert_eq!(d, before);
    }
}
