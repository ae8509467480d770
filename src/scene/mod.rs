// scene/ - Frame loop and lifecycle
//
// `Scene` owns everything that changes between frames: the droplet arena,
// both bars, the quality governor, the title intro and the renderer. The
// page drives it from requestAnimationFrame:
//
//   frame(dt) -> advance(dt) -> render()
//
// and keeps scheduling frames for as long as `frame` returns true.

mod probe;

pub use probe::{Capabilities, CapabilityProbe, ProbeTicket};

use probe::ProbeGate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{DeviceScale, SceneOptions, Tuning};
use crate::error::{SceneError, SceneResult};
use crate::governor::FpsGovernor;
use crate::quality::{QualitySettings, QualityTier};
use crate::render::{
    AcceleratedRenderer, DropletSprite, FallbackRenderer, FrameView, RenderMode, RenderOutput,
    Renderer, TitleIntro, TitleMask, svg_filter_markup,
};
use crate::seed::{self, Breakpoint, DropletSeed, PhasePolicy};
use crate::sim::{BarKind, BarState, DropletState, Simulator};
use crate::world::{Point, Rect, SceneLayout, Viewport};

const MAX_DT: f32 = 0.1;
const REFERENCE_DT: f32 = 1.0 / 60.0;

const TITLE_INTRO_SECS: f32 = 1.2;
const TITLE_START_SCALE: f32 = 0.88;

#[inline]
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub struct Scene {
    options: SceneOptions,
    tuning: Tuning,
    device: DeviceScale,
    layout: SceneLayout,
    breakpoint: Breakpoint,

    sim: Simulator,
    top_bar: BarState,
    bottom_bar: BarState,
    governor: FpsGovernor,

    renderer: Option<Box<dyn Renderer>>,
    probe: ProbeGate,
    title_mask: Option<TitleMask>,
    on_loop: Option<Box<dyn FnMut()>>,

    elapsed: f32,
    title_elapsed: f32,
    running: bool,
    visible: bool,
    reduced_motion: bool,
    cap_next_dt: bool,
    destroyed: bool,

    // per-frame scratch
    top_outline: Vec<Point>,
    bottom_outline: Vec<Point>,
    sprites: Vec<DropletSprite>,
}

impl Scene {
    pub fn new(viewport: Viewport, options: SceneOptions) -> SceneResult<Self> {
        Self::with_rng(viewport, options, StdRng::from_os_rng())
    }

    pub fn with_rng(viewport: Viewport, options: SceneOptions, rng: StdRng) -> SceneResult<Self> {
        let tuning = options.tuning;
        tuning.validate()?;

        let device = tuning.device_scale(options.device.is_mobile);
        let layout = SceneLayout::new(viewport, &tuning);
        let tier = options
            .quality_override
            .unwrap_or_else(|| QualityTier::detect(&options.device));
        let mut governor = FpsGovernor::new(tier);
        governor.set_auto_adjust(options.auto_adjust);

        let mut scene = Self {
            tuning,
            device,
            layout,
            breakpoint: Breakpoint::for_width(viewport.w()),
            sim: Simulator::new(tuning, device, rng),
            top_bar: BarState::new(BarKind::Top, &tuning),
            bottom_bar: BarState::new(BarKind::Bottom, &tuning),
            governor,
            renderer: None,
            probe: ProbeGate::default(),
            title_mask: None,
            on_loop: None,
            elapsed: 0.0,
            title_elapsed: 0.0,
            running: false,
            visible: true,
            reduced_motion: false,
            cap_next_dt: true,
            destroyed: false,
            top_outline: Vec::new(),
            bottom_outline: Vec::new(),
            sprites: Vec::new(),
            options,
        };

        scene.sim.set_scale_multiplier(scene.breakpoint.scale_multiplier);
        scene.sim.set_active_limit(tier.settings().droplet_budget, &scene.layout);
        let batch = scene.next_batch(scene.options.phase_policy);
        scene.sim.seed(&batch, &scene.layout, scene.options.phase_policy);
        log::info!(
            "scene {}x{}: {} droplets, quality {}",
            viewport.width,
            viewport.height,
            batch.len(),
            tier.as_str()
        );
        Ok(scene)
    }

    fn next_batch(&mut self, policy: PhasePolicy) -> Vec<DropletSeed> {
        let count = self.options.droplet_count.unwrap_or(self.breakpoint.droplet_count);
        let min_scale = self.tuning.min_scale * self.device.min_scale;
        seed::generate(
            self.sim.rng(),
            count,
            self.breakpoint.scale_multiplier,
            min_scale,
            self.tuning.max_scale,
            &self.tuning,
            policy,
        )
    }

    fn ensure_alive(&self) -> SceneResult<()> {
        if self.destroyed {
            Err(SceneError::Destroyed)
        } else {
            Ok(())
        }
    }

    // ========================================================================
    // Capability probe
    // ========================================================================

    /// Probe synchronously and pick the renderer.
    pub fn mount(&mut self, probe: &dyn CapabilityProbe) -> SceneResult<RenderMode> {
        self.ensure_alive()?;
        let ticket = self.probe.begin();
        self.finish_probe(ticket, probe.probe());
        Ok(self.mode())
    }

    /// Start an async probe. Pass the ticket back to `finish_probe`.
    pub fn begin_probe(&mut self) -> SceneResult<ProbeTicket> {
        self.ensure_alive()?;
        Ok(self.probe.begin())
    }

    /// Returns false when the ticket is stale or the scene is gone; the
    /// result is then ignored.
    pub fn finish_probe(&mut self, ticket: ProbeTicket, caps: Capabilities) -> bool {
        if self.destroyed || !self.probe.accept(ticket) {
            log::debug!("ignoring stale probe #{}", ticket.generation());
            return false;
        }

        let settings = self.governor.tier().settings();
        let viewport = self.layout.viewport;
        let renderer: Box<dyn Renderer> = if caps.accelerated_context {
            Box::new(AcceleratedRenderer::new(viewport, settings, self.tuning.goo))
        } else {
            log::warn!("no accelerated context, using DOM fallback");
            Box::new(FallbackRenderer::new(
                viewport,
                settings,
                self.tuning.goo,
                caps.blur_filter_reliable,
            ))
        };
        log::info!("render mode: {}", renderer.mode().as_str());
        self.renderer = Some(renderer);

        if self.reduced_motion {
            self.render();
        }
        true
    }

    pub fn mode(&self) -> RenderMode {
        self.renderer.as_ref().map_or(RenderMode::Loading, |r| r.mode())
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// One animation frame. Returns whether the page should schedule another.
    pub fn frame(&mut self, dt: f32) -> bool {
        if self.destroyed || !self.running || !self.visible || self.reduced_motion {
            return false;
        }
        let mut dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };
        if self.cap_next_dt {
            dt = dt.min(REFERENCE_DT);
            self.cap_next_dt = false;
        }

        self.advance(dt);
        self.render();

        // Takes effect from the next tick.
        if let Some(tier) = self.governor.sample(dt) {
            self.apply_quality(tier.settings());
        }
        true
    }

    fn apply_quality(&mut self, settings: QualitySettings) {
        if let Some(r) = self.renderer.as_mut() {
            r.apply_quality(settings);
        }
        self.sim.set_active_limit(settings.droplet_budget, &self.layout);
    }

    /// Step the simulation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        self.elapsed += dt;
        self.title_elapsed += dt;

        self.top_bar.update(dt, &self.tuning);
        self.bottom_bar.update(dt, &self.tuning);

        let report = self.sim.advance(dt, &self.layout);
        for merge in &report.merges {
            self.bottom_bar.on_merge(merge.x, merge.scale, &self.tuning.ripples);
        }

        if report.loop_completed {
            self.reseed();
            if let Some(on_loop) = self.on_loop.as_mut() {
                on_loop();
            }
        }
    }

    fn reseed(&mut self) {
        // Slots pick these up one by one at their own recycle, which already
        // keeps them out of step, so reseeds always start at phase zero.
        let batch = self.next_batch(PhasePolicy::Zero);
        log::debug!("loop complete, reseeding {} droplets", batch.len());
        self.sim.update_seeds(&batch);
    }

    pub fn title_intro(&self) -> TitleIntro {
        if self.reduced_motion {
            return TitleIntro::SHOWN;
        }
        let eased = ease_out_cubic((self.title_elapsed / TITLE_INTRO_SECS).min(1.0));
        TitleIntro {
            alpha: eased,
            scale: TITLE_START_SCALE + (1.0 - TITLE_START_SCALE) * eased,
        }
    }

    fn sprite(&self, d: &DropletState) -> DropletSprite {
        let size = d.scale * d.grow;
        DropletSprite {
            x: d.offset / 100.0 * self.layout.viewport.w(),
            y: d.y,
            base_width: self.tuning.droplet_base_width * self.device.width * size,
            base_height: self.tuning.droplet_base_height * self.device.height * size,
            scale_x: d.x_scale,
            scale_y: d.y_scale,
            alpha: d.alpha,
        }
    }

    /// Draw the current state with the selected renderer. No-op while the
    /// probe is still in flight.
    pub fn render(&mut self) {
        if self.destroyed || self.renderer.is_none() {
            return;
        }
        let (w, h) = (self.layout.viewport.w(), self.layout.viewport.h());
        let edge_scale = self.device.edge_amplitude;
        self.top_outline = self.top_bar.outline(w, h, &self.tuning, edge_scale);
        self.bottom_outline = self.bottom_bar.outline(w, h, &self.tuning, edge_scale);

        let mut sprites = std::mem::take(&mut self.sprites);
        sprites.clear();
        if !self.reduced_motion {
            sprites.extend(self.sim.droplets().map(|d| self.sprite(d)));
        }

        let view = FrameView {
            viewport: self.layout.viewport,
            top_bar: &self.top_outline,
            bottom_bar: &self.bottom_outline,
            droplets: &sprites,
            title: self.title_intro(),
            title_rect: self.layout.title,
            title_mask: self.title_mask.as_ref(),
        };
        if let Some(r) = self.renderer.as_mut() {
            r.render(&view);
        }
        self.sprites = sprites;
    }

    pub fn output(&self) -> RenderOutput<'_> {
        match self.renderer.as_ref() {
            Some(r) => r.output(),
            None => RenderOutput::Empty,
        }
    }

    // ========================================================================
    // Host inputs
    // ========================================================================

    /// New viewport size. Geometry is rebuilt and redrawn now; droplets keep
    /// their state, and a breakpoint change takes effect at the next reseed.
    pub fn resize(&mut self, viewport: Viewport) -> SceneResult<()> {
        self.ensure_alive()?;
        self.layout = self.layout.resized(viewport, &self.tuning);

        let breakpoint = Breakpoint::for_width(viewport.w());
        if breakpoint != self.breakpoint {
            log::debug!(
                "breakpoint now {} droplets, reseeding at next loop",
                breakpoint.droplet_count
            );
            self.breakpoint = breakpoint;
            self.sim.set_scale_multiplier(breakpoint.scale_multiplier);
        }

        if let Some(r) = self.renderer.as_mut() {
            r.resize(viewport);
        }
        self.render();
        Ok(())
    }

    /// Offscreen scenes stop advancing. Coming back does not replay the
    /// time spent away.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.cap_next_dt = true;
        }
        self.visible = visible;
    }

    /// Reduced motion swaps the animation for one settled frame.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if reduced == self.reduced_motion {
            return;
        }
        self.reduced_motion = reduced;
        if reduced {
            self.top_bar.settle(&self.tuning);
            self.bottom_bar.settle(&self.tuning);
            self.render();
        } else {
            self.cap_next_dt = true;
        }
    }

    pub fn set_on_loop(&mut self, on_loop: Box<dyn FnMut()>) -> SceneResult<()> {
        self.ensure_alive()?;
        self.on_loop = Some(on_loop);
        Ok(())
    }

    /// Seeds for the next loop, applied per slot as each recycles.
    pub fn update_seeds(&mut self, seeds: &[DropletSeed]) -> SceneResult<()> {
        self.ensure_alive()?;
        self.sim.update_seeds(seeds);
        Ok(())
    }

    pub fn set_title_bounds(&mut self, title: Rect) -> SceneResult<()> {
        self.ensure_alive()?;
        self.layout.set_title(title);
        Ok(())
    }

    pub fn set_title_mask(&mut self, mask: TitleMask) -> SceneResult<()> {
        self.ensure_alive()?;
        self.title_mask = Some(mask);
        Ok(())
    }

    pub fn set_auto_adjust(&mut self, enabled: bool) {
        self.governor.set_auto_adjust(enabled);
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn start(&mut self) -> SceneResult<()> {
        self.ensure_alive()?;
        if !self.running {
            self.running = true;
            self.cap_next_dt = true;
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) -> SceneResult<()> {
        self.start()
    }

    /// Release the surface and callbacks. Everything after this is a no-op
    /// or `SceneError::Destroyed`.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.running = false;
        self.probe.invalidate();
        self.on_loop = None;
        if let Some(r) = self.renderer.as_mut() {
            r.release();
        }
        self.title_mask = None;
        log::debug!("scene destroyed");
    }

    // ========================================================================
    // Readouts
    // ========================================================================

    pub fn is_running(&self) -> bool {
        self.running && self.visible && !self.destroyed
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn top_bar(&self) -> &BarState {
        &self.top_bar
    }

    pub fn bottom_bar(&self) -> &BarState {
        &self.bottom_bar
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    pub fn quality_tier(&self) -> QualityTier {
        self.governor.tier()
    }

    pub fn current_fps(&self) -> f32 {
        self.governor.current_fps()
    }

    pub fn average_fps(&self) -> f32 {
        self.governor.average_fps()
    }

    pub fn filter_markup(&self, id: &str) -> String {
        svg_filter_markup(id, &self.governor.tier().settings(), &self.tuning.goo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DomFrame, GooFilter};
    use crate::sim::{MAX_DROPLETS, Phase};
    use std::cell::Cell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn accelerated() -> Capabilities {
        Capabilities {
            accelerated_context: true,
            blur_filter_reliable: true,
        }
    }

    fn dom(blur_filter_reliable: bool) -> impl Fn() -> Capabilities {
        move || Capabilities {
            accelerated_context: false,
            blur_filter_reliable,
        }
    }

    fn options(tier: QualityTier) -> SceneOptions {
        SceneOptions {
            quality_override: Some(tier),
            ..SceneOptions::default()
        }
    }

    fn scene(w: u32, h: u32, opts: SceneOptions) -> Scene {
        Scene::with_rng(Viewport::new(w, h).unwrap(), opts, StdRng::seed_from_u64(11)).unwrap()
    }

    fn dom_frame(scene: &Scene) -> &DomFrame {
        match scene.output() {
            RenderOutput::Dom(frame) => frame,
            _ => panic!("expected a DOM frame"),
        }
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let mut opts = SceneOptions::default();
        opts.tuning.max_velocity = -1.0;
        let err = Scene::with_rng(Viewport::new(800, 600).unwrap(), opts, StdRng::seed_from_u64(0));
        assert!(matches!(err, Err(SceneError::InvalidTuning(_))));
    }

    #[test]
    fn test_probe_selects_backend() {
        let mut s = scene(160, 120, options(QualityTier::Low));
        assert_eq!(s.mode(), RenderMode::Loading);
        assert!(matches!(s.output(), RenderOutput::Empty));
        assert_eq!(s.mount(&accelerated).unwrap(), RenderMode::Accelerated);

        let mut s = scene(160, 120, options(QualityTier::Low));
        assert_eq!(s.mount(&dom(false)).unwrap(), RenderMode::Fallback);
        s.render();
        assert!(matches!(dom_frame(&s).filter, GooFilter::Approximate { .. }));
    }

    #[test]
    fn test_stale_probe_ignored() {
        let mut s = scene(160, 120, options(QualityTier::Low));
        let first = s.begin_probe().unwrap();
        let second = s.begin_probe().unwrap();
        assert!(!s.finish_probe(first, accelerated()));
        assert_eq!(s.mode(), RenderMode::Loading);
        assert!(s.finish_probe(second, dom(true)()));
        assert_eq!(s.mode(), RenderMode::Fallback);
    }

    #[test]
    fn test_probe_after_destroy_is_dropped() {
        let mut s = scene(160, 120, options(QualityTier::Low));
        let ticket = s.begin_probe().unwrap();
        s.destroy();
        assert!(!s.finish_probe(ticket, accelerated()));
        assert_eq!(s.mode(), RenderMode::Loading);
        assert!(matches!(s.begin_probe(), Err(SceneError::Destroyed)));
    }

    #[test]
    fn test_frame_needs_start_and_visibility() {
        let mut s = scene(1280, 800, options(QualityTier::Medium));
        assert!(!s.frame(DT));
        assert_eq!(s.elapsed(), 0.0);

        s.start().unwrap();
        assert!(s.frame(DT));
        s.set_visible(false);
        assert!(!s.frame(DT));
        s.pause();
        s.set_visible(true);
        assert!(!s.frame(DT));
        s.resume().unwrap();
        assert!(s.frame(DT));
        assert!((s.elapsed() - 2.0 * DT).abs() < 1e-6);
    }

    #[test]
    fn test_no_catch_up_after_resume() {
        let mut s = scene(1280, 800, options(QualityTier::Medium));
        s.start().unwrap();
        s.frame(5.0);
        assert!((s.elapsed() - DT).abs() < 1e-6);
        s.frame(5.0);
        assert!((s.elapsed() - DT - MAX_DT).abs() < 1e-5);

        s.pause();
        s.resume().unwrap();
        let before = s.elapsed();
        s.frame(30.0);
        assert!((s.elapsed() - before - DT).abs() < 1e-6);
    }

    #[test]
    fn test_title_intro_eases_in() {
        let mut s = scene(1280, 800, options(QualityTier::Medium));
        assert_eq!(s.title_intro().alpha, 0.0);
        assert!((s.title_intro().scale - 0.88).abs() < 1e-6);
        s.advance(0.6);
        let mid = s.title_intro();
        assert!((mid.alpha - 0.875).abs() < 1e-5);
        s.advance(0.6);
        s.advance(0.5);
        assert_eq!(s.title_intro(), TitleIntro::SHOWN);
    }

    #[test]
    fn test_reduced_motion_draws_one_settled_frame() {
        let mut s = scene(1280, 800, options(QualityTier::Medium));
        s.mount(&dom(true)).unwrap();
        s.start().unwrap();
        for _ in 0..90 {
            s.frame(DT);
        }
        s.set_reduced_motion(true);
        assert!(!s.frame(DT));
        assert_eq!(s.top_bar().current_height, 62.0);
        assert_eq!(s.bottom_bar().current_height, s.bottom_bar().target_height);

        let frame = dom_frame(&s);
        assert!(frame.droplets.is_empty());
        assert_eq!(frame.title.opacity, 1.0);
        assert!(frame.top_bar.starts_with('M'));
    }

    #[test]
    fn test_loop_reseeds_and_notifies() {
        let loops = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&loops);
        let mut s = scene(1280, 800, options(QualityTier::High));
        s.set_on_loop(Box::new(move || counter.set(counter.get() + 1))).unwrap();
        s.start().unwrap();
        for _ in 0..60 * 20 {
            s.frame(DT);
            if loops.get() > 0 {
                break;
            }
        }
        assert_eq!(loops.get(), 1);
        assert!(s.bottom_bar().merged_count >= 1);
        assert!(s.simulator().count() >= 1);
    }

    #[test]
    fn test_recycles_stay_inside_title_across_reseeds() {
        let loops = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&loops);
        let mut s = scene(1920, 1080, options(QualityTier::High));
        s.set_on_loop(Box::new(move || counter.set(counter.get() + 1))).unwrap();
        s.start().unwrap();
        let (lo, hi) = s.layout().recycle_offset_range(&Tuning::default());

        let phase = |s: &Scene, i: usize| s.simulator().slot(i).map(|d| d.phase);
        let mut before: Vec<_> = (0..MAX_DROPLETS).map(|i| phase(&s, i)).collect();
        let mut recycles = 0;
        for _ in 0..60 * 60 {
            s.frame(DT);
            for (i, prev) in before.iter_mut().enumerate() {
                let Some(d) = s.simulator().slot(i) else { continue };
                if *prev == Some(Phase::Merge) && d.phase == Phase::Spawn && !d.dormant {
                    recycles += 1;
                    assert!(
                        d.offset >= lo - 1e-3 && d.offset <= hi + 1e-3,
                        "slot {i} at {} outside {lo}..{hi}",
                        d.offset
                    );
                }
                *prev = Some(d.phase);
            }
        }
        assert!(loops.get() >= 3, "only {} loops", loops.get());
        assert!(recycles > 20, "only {recycles} recycles");
    }

    #[test]
    fn test_governor_downgrade_applies_live() {
        let mut s = scene(1280, 800, options(QualityTier::High));
        s.mount(&dom(true)).unwrap();
        s.start().unwrap();
        for _ in 0..(25.0 * 2.5) as usize {
            s.frame(1.0 / 25.0);
        }
        assert_eq!(s.quality_tier(), QualityTier::Medium);
        assert!(s.average_fps() > 20.0);
        assert!(matches!(
            dom_frame(&s).filter,
            GooFilter::Svg { std_deviation, .. } if std_deviation == 8.0
        ));
        assert!(s.filter_markup("goo").contains(r#"stdDeviation="8""#));
    }

    #[test]
    fn test_frozen_tier_never_downgrades() {
        let mut opts = options(QualityTier::High);
        opts.auto_adjust = false;
        let mut s = scene(1280, 800, opts);
        s.start().unwrap();
        for _ in 0..150 {
            s.frame(1.0 / 10.0);
        }
        assert_eq!(s.quality_tier(), QualityTier::High);
    }

    #[test]
    fn test_resize_redraws_immediately() {
        let mut s = scene(160, 120, options(QualityTier::Low));
        s.mount(&accelerated).unwrap();
        s.resize(Viewport::new(200, 100).unwrap()).unwrap();
        match s.output() {
            RenderOutput::Pixels(surface) => {
                assert_eq!(surface.width(), 200);
                assert_eq!(surface.height(), 100);
            }
            _ => panic!("expected pixels"),
        }
        assert_eq!(s.layout().viewport.width, 200);
    }

    #[test]
    fn test_title_inputs() {
        let mut s = scene(160, 120, options(QualityTier::Low));
        let rect = Rect {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 40.0,
        };
        s.set_title_bounds(rect).unwrap();
        assert_eq!(s.layout().title, rect);
        s.set_title_mask(TitleMask::new(160, 120, vec![0; 160 * 120]).unwrap())
            .unwrap();

        s.mount(&accelerated).unwrap();
        s.render();
        assert!(matches!(s.output(), RenderOutput::Pixels(_)));
    }

    #[test]
    fn test_destroy_releases_everything() {
        let mut s = scene(160, 120, options(QualityTier::Low));
        s.mount(&accelerated).unwrap();
        s.start().unwrap();
        s.destroy();
        assert!(s.is_destroyed());
        assert!(!s.frame(DT));
        assert!(matches!(s.output(), RenderOutput::Empty));
        assert!(matches!(s.update_seeds(&[]), Err(SceneError::Destroyed)));
        assert!(matches!(s.start(), Err(SceneError::Destroyed)));
        assert!(matches!(
            s.resize(Viewport::new(10, 10).unwrap()),
            Err(SceneError::Destroyed)
        ));
    }
}
