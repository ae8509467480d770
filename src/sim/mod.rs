// sim/ - Droplet and bar simulation
//
// A fixed arena of droplet slots recycled in place, plus the two bars.
// Slots beyond the current batch, or beyond the quality budget, sit dormant.

mod bar;
mod droplet;
mod ripple;
mod zone;

pub use bar::{BarKind, BarState, ease_in_out_sine};
pub use droplet::{DropletState, Phase, StepOutcome};
pub use ripple::{Ripple, RippleKind, RippleList};
pub use zone::{FluidZone, FrictionCurve, Zones};

use rand::rngs::StdRng;

use crate::config::{DeviceScale, Tuning};
use crate::seed::{DropletSeed, PhasePolicy};
use crate::world::SceneLayout;

pub const MAX_DROPLETS: usize = 16;

/// `lerp(current, target, speed)` applied once per reference frame (1/60 s),
/// compounded over `frames` of them.
#[inline]
pub(crate) fn frame_lerp(current: f32, target: f32, speed: f32, frames: f32) -> f32 {
    let k = 1.0 - (1.0 - speed).powf(frames);
    current + (target - current) * k
}

// Warm-start for randomized phases: how long a loop roughly takes, and the
// sub-step used to fast-forward into it.
const LOOP_ESTIMATE_SECS: f32 = 3.0;
const WARM_STEP: f32 = 1.0 / 60.0;

/// A droplet reached the bottom of its loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub x: f32,
    pub scale: f32,
}

#[derive(Debug, Default)]
pub struct StepReport {
    pub merges: Vec<MergeEvent>,
    /// Slot 0 recycled; the batch finished a loop.
    pub loop_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Seed(DropletSeed),
    Retire,
}

pub struct Simulator {
    slots: [DropletState; MAX_DROPLETS],
    pending: [Option<Pending>; MAX_DROPLETS],
    count: usize,     // slots in play, including retirees finishing their fall
    batch_len: usize, // slots the current seed batch asked for
    active_limit: usize,
    scale_multiplier: f32,
    tuning: Tuning,
    device: DeviceScale,
    rng: StdRng,
}

impl Simulator {
    pub fn new(tuning: Tuning, device: DeviceScale, rng: StdRng) -> Self {
        Self {
            slots: [DropletState::default(); MAX_DROPLETS],
            pending: [None; MAX_DROPLETS],
            count: 0,
            batch_len: 0,
            active_limit: MAX_DROPLETS,
            scale_multiplier: 1.0,
            tuning,
            device,
            rng,
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active_limit(&self) -> usize {
        self.active_limit
    }

    /// Breakpoint size factor for droplets placed at recycle.
    pub fn set_scale_multiplier(&mut self, multiplier: f32) {
        self.scale_multiplier = multiplier;
    }

    /// Start a batch from scratch: every slot restarts now.
    pub fn seed(&mut self, seeds: &[DropletSeed], layout: &SceneLayout, policy: PhasePolicy) {
        self.count = seeds.len().min(MAX_DROPLETS);
        self.batch_len = self.count;
        self.pending = [None; MAX_DROPLETS];
        for (i, slot) in self.slots.iter_mut().enumerate() {
            *slot = match seeds.get(i) {
                Some(seed) if i < self.active_limit => DropletState::from_seed(seed),
                Some(seed) => {
                    self.pending[i] = Some(Pending::Seed(*seed));
                    DropletState::default()
                }
                None => DropletState::default(),
            };
        }
        if policy == PhasePolicy::Randomized {
            self.warm_start(seeds, layout);
        }
    }

    /// Hand a new batch to running slots. Each running slot picks its seed up
    /// at its next recycle; idle slots start immediately.
    pub fn update_seeds(&mut self, seeds: &[DropletSeed]) {
        let n = seeds.len().min(MAX_DROPLETS);
        for i in 0..MAX_DROPLETS {
            let running = i < self.count && !self.slots[i].dormant;
            self.pending[i] = match seeds.get(i) {
                Some(seed) if running || i >= self.active_limit => Some(Pending::Seed(*seed)),
                Some(seed) => {
                    self.slots[i] = DropletState::from_seed(seed);
                    None
                }
                None if running => Some(Pending::Retire),
                None => None,
            };
        }
        self.count = self.count.max(n);
        self.batch_len = n;
        log::debug!("queued {n} seeds");
    }

    /// Cap simultaneously running slots. Slots above the cap finish their
    /// current fall and then go dormant; raising the cap wakes them.
    pub fn set_active_limit(&mut self, limit: usize, layout: &SceneLayout) {
        let limit = limit.clamp(1, MAX_DROPLETS);
        if limit > self.active_limit {
            let range = layout.recycle_offset_range(&self.tuning);
            for i in self.active_limit..limit.min(self.batch_len) {
                if self.slots[i].dormant && self.pending[i] != Some(Pending::Retire) {
                    self.replace(i, range);
                }
            }
        }
        self.active_limit = limit;
    }

    pub fn advance(&mut self, dt: f32, layout: &SceneLayout) -> StepReport {
        let zones = Zones::from_layout(layout);
        let mut report = StepReport::default();

        for i in 0..self.count {
            let outcome = self.slots[i].step(dt, &zones, &self.tuning, &self.device);
            if outcome != StepOutcome::Merged {
                continue;
            }
            let merged = self.slots[i];
            report.merges.push(MergeEvent {
                x: merged.offset / 100.0 * zones.width,
                scale: merged.scale,
            });
            if i == 0 {
                report.loop_completed = true;
            }
            self.recycle_slot(i, layout);
        }

        // Retirees that finished their fall leave the batch.
        while self.count > self.batch_len && self.slots[self.count - 1].dormant {
            self.count -= 1;
        }
        report
    }

    fn recycle_slot(&mut self, i: usize, layout: &SceneLayout) {
        let slot = &mut self.slots[i];
        if i >= self.active_limit && self.pending[i] != Some(Pending::Retire) {
            // Over budget: park, keeping any queued seed for when it wakes.
            slot.dormant = true;
            slot.alpha = 0.0;
            return;
        }
        if self.pending[i] == Some(Pending::Retire) {
            self.pending[i] = None;
            *slot = DropletState::default();
            return;
        }
        self.replace(i, layout.recycle_offset_range(&self.tuning));
    }

    /// Start slot `i` on its next loop inside `range`, from its queued seed
    /// if it has one.
    fn replace(&mut self, i: usize, range: (f32, f32)) {
        match self.pending[i].take() {
            Some(Pending::Seed(seed)) => {
                let seed = DropletSeed {
                    offset: self.fit_offset(seed.offset, range),
                    ..seed
                };
                self.slots[i].restart(&seed);
            }
            _ => self.slots[i].recycle(
                &mut self.rng,
                range,
                self.scale_multiplier,
                &self.tuning,
                &self.device,
            ),
        }
    }

    /// Map a batch offset from the seed band onto `range`, keeping its
    /// relative position.
    fn fit_offset(&self, offset: f32, range: (f32, f32)) -> f32 {
        let (lo, hi) = (self.tuning.seed_min_offset, self.tuning.seed_max_offset);
        let t = if hi > lo {
            ((offset - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        range.0 + t * (range.1 - range.0)
    }

    fn warm_start(&mut self, seeds: &[DropletSeed], layout: &SceneLayout) {
        let zones = Zones::from_layout(layout);
        let range = layout.recycle_offset_range(&self.tuning);
        let running = self.count.min(self.active_limit);
        for (i, seed) in seeds.iter().enumerate().take(running) {
            let steps = (seed.phase.clamp(0.0, 1.0) * LOOP_ESTIMATE_SECS / WARM_STEP) as usize;
            for _ in 0..steps {
                let outcome = self.slots[i].step(WARM_STEP, &zones, &self.tuning, &self.device);
                if outcome == StepOutcome::Merged {
                    self.replace(i, range);
                }
            }
        }
    }

    /// Running, visible droplets.
    pub fn droplets(&self) -> impl Iterator<Item = &DropletState> {
        self.slots[..self.count].iter().filter(|d| d.is_visible())
    }

    pub fn slot(&self, i: usize) -> Option<&DropletState> {
        self.slots.get(i)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn device(&self) -> &DeviceScale {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::generate;
    use crate::world::Viewport;
    use rand::SeedableRng;

    fn layout() -> SceneLayout {
        SceneLayout::new(Viewport::new(1280, 800).unwrap(), &Tuning::default())
    }

    fn sim(seed: u64) -> Simulator {
        let tuning = Tuning::default();
        Simulator::new(tuning, tuning.device_scale(false), StdRng::seed_from_u64(seed))
    }

    fn seeds(n: usize, delay: f32) -> Vec<DropletSeed> {
        (0..n)
            .map(|i| DropletSeed {
                offset: 20.0 + i as f32 * 8.0,
                scale: 0.8,
                delay,
                phase: 0.0,
            })
            .collect()
    }

    fn run_until_loop(sim: &mut Simulator, layout: &SceneLayout) -> Vec<MergeEvent> {
        let mut merges = Vec::new();
        for _ in 0..5000 {
            let report = sim.advance(1.0 / 60.0, layout);
            merges.extend(report.merges);
            if report.loop_completed {
                return merges;
            }
        }
        panic!("no loop completed");
    }

    #[test]
    fn test_batch_loops_and_reports_merges() {
        let layout = layout();
        let mut sim = sim(1);
        sim.seed(&seeds(4, 0.0), &layout, PhasePolicy::Zero);
        assert_eq!(sim.count(), 4);

        let merges = run_until_loop(&mut sim, &layout);
        // Identical timing, so the whole batch lands on the same tick.
        assert_eq!(merges.len(), 4);
        assert!((merges[0].x - 256.0).abs() < 1e-3);
        assert_eq!(merges[0].scale, 0.8);

        // Slot 0 was recycled inside the title range.
        let (lo, hi) = layout.recycle_offset_range(&Tuning::default());
        let slot = sim.slot(0).unwrap();
        assert!(slot.offset >= lo && slot.offset <= hi);
        assert_eq!(slot.phase, Phase::Spawn);
    }

    #[test]
    fn test_delayed_batch_is_invisible() {
        let layout = layout();
        let mut sim = sim(2);
        sim.seed(&seeds(3, 1.0), &layout, PhasePolicy::Zero);
        sim.advance(0.5, &layout);
        assert_eq!(sim.droplets().count(), 0);
        sim.advance(0.5, &layout);
        assert_eq!(sim.droplets().count(), 3);
    }

    #[test]
    fn test_pending_seeds_apply_at_recycle() {
        let layout = layout();
        let mut sim = sim(3);
        sim.seed(&seeds(2, 0.0), &layout, PhasePolicy::Zero);
        sim.advance(1.0 / 60.0, &layout);

        let next = vec![
            DropletSeed {
                offset: 77.0,
                scale: 0.9,
                delay: 0.5,
                phase: 0.0,
            },
            DropletSeed {
                offset: 33.0,
                scale: 0.9,
                delay: 0.5,
                phase: 0.0,
            },
            DropletSeed {
                offset: 55.0,
                scale: 0.9,
                delay: 0.0,
                phase: 0.0,
            },
        ];
        sim.update_seeds(&next);

        // Running slots keep falling; the fresh slot starts now.
        assert_eq!(sim.slot(0).unwrap().offset, 20.0);
        assert_eq!(sim.slot(2).unwrap().offset, 55.0);
        assert!(!sim.slot(2).unwrap().dormant);
        assert_eq!(sim.count(), 3);

        run_until_loop(&mut sim, &layout);
        // 77% of the 5..95 band, carried into the title range
        let (lo, hi) = layout.recycle_offset_range(&Tuning::default());
        let slot = sim.slot(0).unwrap();
        assert!((slot.offset - (lo + 0.8 * (hi - lo))).abs() < 1e-3);
        assert_eq!(slot.delay, 0.5);
    }

    #[test]
    fn test_every_recycle_lands_inside_title() {
        let tuning = Tuning::default();
        let layout = SceneLayout::new(Viewport::new(1920, 1080).unwrap(), &tuning);
        let (lo, hi) = layout.recycle_offset_range(&tuning);
        let mut rng = StdRng::seed_from_u64(21);
        let mut sim = sim(7);
        let batch = generate(&mut rng, 10, 1.0, 0.7, 1.0, &tuning, PhasePolicy::Zero);
        sim.seed(&batch, &layout, PhasePolicy::Zero);

        let mut loops = 0;
        let mut recycles = 0;
        let mut before: Vec<Phase> = (0..MAX_DROPLETS)
            .map(|i| sim.slot(i).unwrap().phase)
            .collect();
        for _ in 0..20_000 {
            let report = sim.advance(1.0 / 60.0, &layout);
            for (i, prev) in before.iter_mut().enumerate() {
                let slot = sim.slot(i).unwrap();
                if *prev == Phase::Merge && slot.phase == Phase::Spawn && !slot.dormant {
                    recycles += 1;
                    assert!(
                        slot.offset >= lo - 1e-3 && slot.offset <= hi + 1e-3,
                        "slot {i} recycled to {} outside {lo}..{hi}",
                        slot.offset
                    );
                }
                *prev = slot.phase;
            }
            if report.loop_completed {
                loops += 1;
                if loops == 4 {
                    break;
                }
                let next = generate(&mut rng, 10, 1.0, 0.7, 1.0, &tuning, PhasePolicy::Zero);
                sim.update_seeds(&next);
            }
        }
        assert_eq!(loops, 4);
        assert!(recycles > 10, "only {recycles} recycles");
    }

    #[test]
    fn test_recycle_uses_scale_multiplier() {
        let layout = layout();
        let mut sim = sim(8);
        sim.set_scale_multiplier(0.5);
        sim.seed(&seeds(3, 0.0), &layout, PhasePolicy::Zero);
        run_until_loop(&mut sim, &layout);
        // no queued seeds, so every slot drew a fresh size
        for i in 0..3 {
            let scale = sim.slot(i).unwrap().scale;
            assert!(scale <= 0.5 + 1e-6 && scale >= 0.35 - 1e-6, "scale {scale}");
        }
    }

    #[test]
    fn test_frame_lerp_matches_plain_lerp_at_one_frame() {
        assert!((frame_lerp(1.0, 0.0, 0.15, 1.0) - 0.85).abs() < 1e-6);
        assert_eq!(frame_lerp(1.0, 0.0, 0.15, 0.0), 1.0);
        assert!((frame_lerp(1.0, 0.0, 0.15, 2.0) - 0.85 * 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_shorter_batch_retires_extra_slots() {
        let layout = layout();
        let mut sim = sim(4);
        sim.seed(&seeds(5, 0.0), &layout, PhasePolicy::Zero);
        sim.update_seeds(&seeds(2, 0.0));
        for _ in 0..5000 {
            sim.advance(1.0 / 60.0, &layout);
            if sim.count() == 2 {
                break;
            }
        }
        assert_eq!(sim.count(), 2);
        assert!(sim.slot(4).unwrap().dormant);
    }

    #[test]
    fn test_active_limit_parks_and_wakes_slots() {
        let layout = layout();
        let mut sim = sim(5);
        sim.seed(&seeds(7, 0.0), &layout, PhasePolicy::Zero);
        sim.set_active_limit(4, &layout);

        for _ in 0..5000 {
            sim.advance(1.0 / 60.0, &layout);
            if (4..7).all(|i| sim.slot(i).unwrap().dormant) {
                break;
            }
        }
        assert!((4..7).all(|i| sim.slot(i).unwrap().dormant));
        assert!(sim.droplets().count() <= 4);
        assert_eq!(sim.count(), 7);

        sim.set_active_limit(7, &layout);
        assert!((4..7).all(|i| !sim.slot(i).unwrap().dormant));
    }

    #[test]
    fn test_randomized_phase_warm_starts() {
        let layout = layout();
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut batch = generate(&mut rng, 5, 1.0, 0.7, 1.0, &tuning, PhasePolicy::Randomized);
        for s in &mut batch {
            s.phase = 0.25;
            s.delay = 0.0;
        }
        let mut sim = sim(6);
        sim.seed(&batch, &layout, PhasePolicy::Randomized);
        // 0.75 s in, everyone has left the top bar's spawn.
        assert!(sim.droplets().all(|d| d.phase != Phase::Spawn));
        assert_eq!(sim.droplets().count(), batch.len());
    }
}
