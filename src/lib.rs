use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod governor;
pub mod quality;
pub mod render;
pub mod scene;
pub mod seed;
pub mod sim;
pub mod world;

use rand::SeedableRng;
use rand::rngs::StdRng;

use config::{SceneOptions, Tuning};
use render::{RenderOutput, TitleMask};
use scene::{Capabilities, CapabilityProbe, ProbeTicket, Scene};
use seed::{DropletSeed, PhasePolicy};
use world::{Rect, Viewport};

// ============================================================================
// GOO DROPLETS - Blood-red droplets bleeding from a bar, through the title,
// into a growing puddle
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Probe backed by a page callback returning
/// `{ acceleratedContext, blurFilterReliable }`.
struct JsProbe<'a>(&'a js_sys::Function);

impl CapabilityProbe for JsProbe<'_> {
    fn probe(&self) -> Capabilities {
        let result = self
            .0
            .call0(&JsValue::NULL)
            .map_err(|e| format!("{e:?}"))
            .and_then(|v| serde_wasm_bindgen::from_value(v).map_err(|e| e.to_string()));
        match result {
            Ok(caps) => caps,
            Err(e) => {
                log::warn!("capability probe failed: {e}");
                Capabilities::default()
            }
        }
    }
}

fn from_js_or_default<T>(value: JsValue) -> Result<T, JsValue>
where
    T: serde::de::DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

#[wasm_bindgen]
pub struct DropletScene {
    scene: Scene,
}

#[wasm_bindgen]
impl DropletScene {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, options: JsValue) -> Result<DropletScene, JsValue> {
        let options: SceneOptions = from_js_or_default(options)?;
        let scene = Scene::new(Viewport::new(width, height)?, options)?;
        Ok(Self { scene })
    }

    /// Probe synchronously and pick a renderer. Returns the mode name.
    pub fn mount(&mut self, probe: &js_sys::Function) -> Result<String, JsValue> {
        let mode = self.scene.mount(&JsProbe(probe))?;
        Ok(mode.as_str().to_string())
    }

    pub fn begin_probe(&mut self) -> Result<u32, JsValue> {
        Ok(self.scene.begin_probe()?.generation())
    }

    pub fn finish_probe(&mut self, ticket: u32, accelerated: bool, blur_reliable: bool) -> bool {
        let caps = Capabilities {
            accelerated_context: accelerated,
            blur_filter_reliable: blur_reliable,
        };
        self.scene.finish_probe(ProbeTicket::from_generation(ticket), caps)
    }

    /// Advance and draw one frame. False means stop scheduling frames.
    pub fn frame(&mut self, dt: f32) -> bool {
        self.scene.frame(dt)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        Ok(self.scene.resize(Viewport::new(width, height)?)?)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.scene.set_visible(visible);
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.scene.set_reduced_motion(reduced);
    }

    pub fn set_auto_adjust(&mut self, enabled: bool) {
        self.scene.set_auto_adjust(enabled);
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        Ok(self.scene.start()?)
    }

    pub fn pause(&mut self) {
        self.scene.pause();
    }

    pub fn resume(&mut self) -> Result<(), JsValue> {
        Ok(self.scene.resume()?)
    }

    pub fn destroy(&mut self) {
        self.scene.destroy();
    }

    /// Called each time the batch completes a loop, which is when fresh
    /// seeds take effect.
    pub fn set_on_loop(&mut self, callback: js_sys::Function) -> Result<(), JsValue> {
        let on_loop = move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                log::warn!("loop callback threw: {e:?}");
            }
        };
        Ok(self.scene.set_on_loop(Box::new(on_loop))?)
    }

    pub fn update_seeds(&mut self, seeds: JsValue) -> Result<(), JsValue> {
        let seeds: Vec<DropletSeed> = serde_wasm_bindgen::from_value(seeds)?;
        Ok(self.scene.update_seeds(&seeds)?)
    }

    pub fn set_title_bounds(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), JsValue> {
        Ok(self.scene.set_title_bounds(Rect { x, y, width, height })?)
    }

    /// Title coverage in viewport pixels, one byte per pixel.
    pub fn set_title_mask(
        &mut self,
        width: u32,
        height: u32,
        alpha: Vec<u8>,
    ) -> Result<(), JsValue> {
        let mask = TitleMask::new(width, height, alpha)?;
        Ok(self.scene.set_title_mask(mask)?)
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn output_ptr(&self) -> *const u8 {
        match self.scene.output() {
            RenderOutput::Pixels(surface) => surface.ptr(),
            _ => std::ptr::null(),
        }
    }

    pub fn output_len(&self) -> usize {
        match self.scene.output() {
            RenderOutput::Pixels(surface) => surface.len(),
            _ => 0,
        }
    }

    pub fn output_width(&self) -> u32 {
        match self.scene.output() {
            RenderOutput::Pixels(surface) => surface.width(),
            _ => 0,
        }
    }

    pub fn output_height(&self) -> u32 {
        match self.scene.output() {
            RenderOutput::Pixels(surface) => surface.height(),
            _ => 0,
        }
    }

    /// The DOM renderer's frame, or null in other modes.
    pub fn dom_frame(&self) -> Result<JsValue, JsValue> {
        match self.scene.output() {
            RenderOutput::Dom(frame) => Ok(serde_wasm_bindgen::to_value(frame)?),
            _ => Ok(JsValue::NULL),
        }
    }

    pub fn svg_filter_markup(&self, id: &str) -> String {
        self.scene.filter_markup(id)
    }

    pub fn mode(&self) -> String {
        self.scene.mode().as_str().to_string()
    }

    pub fn quality_tier(&self) -> String {
        self.scene.quality_tier().as_str().to_string()
    }

    pub fn current_fps(&self) -> f32 {
        self.scene.current_fps()
    }

    pub fn average_fps(&self) -> f32 {
        self.scene.average_fps()
    }
}

/// A fresh seed batch, for pages that manage seeds themselves.
#[wasm_bindgen]
pub fn generate_seeds(count: usize, width: f32, randomize_phase: bool) -> Result<JsValue, JsValue> {
    let tuning = Tuning::default();
    let breakpoint = seed::Breakpoint::for_width(width);
    let policy = if randomize_phase {
        PhasePolicy::Randomized
    } else {
        PhasePolicy::Zero
    };
    let mut rng = StdRng::from_os_rng();
    let seeds = seed::generate(
        &mut rng,
        count,
        breakpoint.scale_multiplier,
        tuning.min_scale,
        tuning.max_scale,
        &tuning,
        policy,
    );
    Ok(serde_wasm_bindgen::to_value(&seeds)?)
}
