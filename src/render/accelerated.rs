// accelerated.rs - Pixel-buffer goo renderer
//
// Composites into an RGBA8 buffer that the page blits with putImageData.
// The host reads the buffer in place through ptr/len.

use crate::config::GooTuning;
use crate::quality::QualitySettings;
use crate::world::{DropletShape, Point, Viewport};

use super::goo::{blend_over, box_blur, box_radius, shade, tint_rgb};
use super::raster::{fill_coverage, sample_mask, scan_polygon};
use super::{FrameView, RenderMode, RenderOutput, Renderer};

const WHITE: [u8; 3] = [255, 255, 255];

/// Straight-alpha RGBA8 output buffer.
pub struct PixelSurface {
    out: Vec<u8>,
    w: u32,
    h: u32,
}

impl PixelSurface {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            out: vec![0; w as usize * h as usize * 4],
            w,
            h,
        }
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.out.clear();
        self.out.resize(w as usize * h as usize * 4, 0);
    }

    pub fn clear(&mut self) {
        self.out.fill(0);
    }

    pub fn release(&mut self) {
        self.out = Vec::new();
        self.w = 0;
        self.h = 0;
    }

    pub fn ptr(&self) -> *const u8 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn bytes(&self) -> &[u8] {
        &self.out
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let i = (y as usize * self.w as usize + x as usize) * 4;
        Some([self.out[i], self.out[i + 1], self.out[i + 2], self.out[i + 3]])
    }
}

pub struct AcceleratedRenderer {
    surface: PixelSurface,
    layer: Vec<f32>,
    scratch: Vec<f32>,
    points: Vec<Point>,
    shape: DropletShape,
    settings: QualitySettings,
    goo: GooTuning,
}

impl AcceleratedRenderer {
    pub fn new(viewport: Viewport, settings: QualitySettings, goo: GooTuning) -> Self {
        let len = viewport.width as usize * viewport.height as usize;
        Self {
            surface: PixelSurface::new(viewport.width, viewport.height),
            layer: vec![0.0; len],
            scratch: vec![0.0; len],
            points: Vec::with_capacity(64),
            shape: DropletShape::new(settings.droplet_detail),
            settings,
            goo,
        }
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    fn draw_goo_layer(&mut self, frame: &FrameView<'_>) {
        let (w, h) = (self.surface.width() as usize, self.surface.height() as usize);
        self.layer.fill(0.0);

        fill_coverage(&mut self.layer, w, h, frame.top_bar, 1.0);
        fill_coverage(&mut self.layer, w, h, frame.bottom_bar, 1.0);

        for d in frame.droplets {
            self.shape.place_into(&mut self.points, d.x, d.y, d.width(), d.height());
            fill_coverage(&mut self.layer, w, h, &self.points, d.alpha);
        }

        if let Some(mask) = frame.title_mask {
            let (cx, cy) = frame.title_rect.center();
            for y in 0..h {
                for x in 0..w {
                    let m = sample_mask(mask, x, y, frame.title.scale, cx, cy) * frame.title.alpha;
                    if m > 0.0 {
                        let a = &mut self.layer[y * w + x];
                        *a += m * (1.0 - *a);
                    }
                }
            }
        }
    }

    fn draw_crisp_overlay(&mut self, frame: &FrameView<'_>) {
        let w = self.surface.width() as usize;
        let h = self.surface.height() as usize;
        let brand = tint_rgb(&self.goo);
        let rgba = &mut self.surface.out;

        scan_polygon(frame.top_bar, w, h, |y, x0, x1| {
            for px in rgba[(y * w + x0) * 4..(y * w + x1) * 4].chunks_exact_mut(4) {
                blend_over(px, brand, 1.0);
            }
        });

        if let Some(mask) = frame.title_mask {
            let (cx, cy) = frame.title_rect.center();
            for y in 0..h {
                for x in 0..w {
                    let m = sample_mask(mask, x, y, frame.title.scale, cx, cy) * frame.title.alpha;
                    let i = (y * w + x) * 4;
                    blend_over(&mut rgba[i..i + 4], WHITE, m);
                }
            }
        }
    }
}

impl Renderer for AcceleratedRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Accelerated
    }

    fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport.width, viewport.height);
        let len = viewport.width as usize * viewport.height as usize;
        self.layer.clear();
        self.layer.resize(len, 0.0);
        self.scratch.clear();
        self.scratch.resize(len, 0.0);
    }

    fn apply_quality(&mut self, settings: QualitySettings) {
        self.settings = settings;
        self.shape.set_detail(settings.droplet_detail);
    }

    fn render(&mut self, frame: &FrameView<'_>) {
        if self.surface.is_empty() {
            return;
        }
        self.draw_goo_layer(frame);

        let (w, h) = (self.surface.width() as usize, self.surface.height() as usize);
        let radius = box_radius(self.settings.blur_strength, self.settings.blur_quality);
        box_blur(&mut self.layer, &mut self.scratch, w, h, radius, self.settings.blur_quality);
        shade(&self.layer, &mut self.surface.out, &self.goo);

        self.draw_crisp_overlay(frame);
    }

    fn output(&self) -> RenderOutput<'_> {
        if self.surface.is_empty() {
            RenderOutput::Empty
        } else {
            RenderOutput::Pixels(&self.surface)
        }
    }

    fn release(&mut self) {
        self.surface.release();
        self.layer = Vec::new();
        self.scratch = Vec::new();
    }
}
