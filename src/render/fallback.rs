// fallback.rs - DOM/SVG goo renderer
//
// No pixels here. Each frame becomes a `DomFrame` the page applies to an
// inline SVG (bars, droplet <use> boxes) wrapped in a goo filter. When the
// host reports that blur filters misrender, the filter degrades to a CSS
// approximation without blur.

use std::fmt::Write;

use serde::Serialize;

use crate::config::GooTuning;
use crate::quality::QualitySettings;
use crate::world::{DROPLET_PATH, Point, Viewport};

use super::{FrameView, RenderMode, RenderOutput, Renderer};

pub const APPROXIMATE_CSS: &str = concat!(
    "saturate(260%) brightness(0.92) ",
    "drop-shadow(0 2px 6px rgba(68, 0, 0, 0.55)) ",
    "drop-shadow(0 0 14px rgba(136, 8, 8, 0.5))",
);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GooFilter {
    #[serde(rename_all = "camelCase")]
    Svg {
        std_deviation: f32,
        alpha_matrix: String,
        tint_matrix: String,
    },
    Approximate { css: String },
}

impl GooFilter {
    pub fn svg(settings: &QualitySettings, goo: &GooTuning) -> Self {
        GooFilter::Svg {
            std_deviation: settings.blur_strength,
            alpha_matrix: alpha_matrix(goo),
            tint_matrix: tint_matrix(goo),
        }
    }

    pub fn approximate() -> Self {
        GooFilter::Approximate {
            css: APPROXIMATE_CSS.to_string(),
        }
    }
}

/// feColorMatrix values that keep rgb and crush alpha to `a*mul - off`.
pub fn alpha_matrix(goo: &GooTuning) -> String {
    format!(
        "1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 {} {}",
        goo.alpha_multiply, -goo.alpha_offset
    )
}

pub fn tint_matrix(goo: &GooTuning) -> String {
    let [r, g, b] = goo.tint;
    format!("{r} 0 0 0 0  0 {g} 0 0 0  0 0 {b} 0 0  0 0 0 1 0")
}

/// `<filter>` element for the goo pass, referenced as `url(#id)`.
pub fn svg_filter_markup(id: &str, settings: &QualitySettings, goo: &GooTuning) -> String {
    format!(
        concat!(
            r#"<filter id="{id}" x="-20%" y="-20%" width="140%" height="140%" "#,
            r#"color-interpolation-filters="sRGB">"#,
            r#"<feGaussianBlur in="SourceGraphic" stdDeviation="{std}" result="blur"/>"#,
            r#"<feColorMatrix in="blur" mode="matrix" values="{alpha}" result="goo"/>"#,
            r#"<feColorMatrix in="goo" mode="matrix" values="{tint}"/>"#,
            "</filter>"
        ),
        id = id,
        std = settings.blur_strength,
        alpha = alpha_matrix(goo),
        tint = tint_matrix(goo),
    )
}

/// Closed SVG path through `points`, or empty when there is nothing to draw.
pub fn path_data(points: &[Point]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{:.1},{:.1} ", p.x, p.y);
    }
    if !d.is_empty() {
        d.push('Z');
    }
    d
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomDroplet {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub transform: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomTitle {
    pub opacity: f32,
    pub transform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomFrame {
    pub width: u32,
    pub height: u32,
    pub top_bar: String,
    pub bottom_bar: String,
    pub droplet_path: &'static str,
    pub droplets: Vec<DomDroplet>,
    pub title: DomTitle,
    pub filter: GooFilter,
}

impl DomFrame {
    fn empty(viewport: Viewport, filter: GooFilter) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            top_bar: String::new(),
            bottom_bar: String::new(),
            droplet_path: DROPLET_PATH,
            droplets: Vec::new(),
            title: DomTitle {
                opacity: 0.0,
                transform: String::new(),
            },
            filter,
        }
    }
}

pub struct FallbackRenderer {
    frame: DomFrame,
    goo: GooTuning,
    blur_reliable: bool,
    released: bool,
}

impl FallbackRenderer {
    pub fn new(
        viewport: Viewport,
        settings: QualitySettings,
        goo: GooTuning,
        blur_reliable: bool,
    ) -> Self {
        let filter = Self::pick_filter(&settings, &goo, blur_reliable);
        Self {
            frame: DomFrame::empty(viewport, filter),
            goo,
            blur_reliable,
            released: false,
        }
    }

    fn pick_filter(
        settings: &QualitySettings,
        goo: &GooTuning,
        blur_reliable: bool,
    ) -> GooFilter {
        if blur_reliable {
            GooFilter::svg(settings, goo)
        } else {
            GooFilter::approximate()
        }
    }

    pub fn frame(&self) -> &DomFrame {
        &self.frame
    }
}

impl Renderer for FallbackRenderer {
    fn mode(&self) -> RenderMode {
        RenderMode::Fallback
    }

    fn resize(&mut self, viewport: Viewport) {
        self.frame.width = viewport.width;
        self.frame.height = viewport.height;
    }

    fn apply_quality(&mut self, settings: QualitySettings) {
        self.frame.filter = Self::pick_filter(&settings, &self.goo, self.blur_reliable);
    }

    fn render(&mut self, view: &FrameView<'_>) {
        if self.released {
            return;
        }
        let f = &mut self.frame;
        f.width = view.viewport.width;
        f.height = view.viewport.height;
        f.top_bar = path_data(view.top_bar);
        f.bottom_bar = path_data(view.bottom_bar);

        f.droplets.clear();
        f.droplets.extend(view.droplets.iter().map(|d| DomDroplet {
            left: d.x - d.base_width * 0.5,
            top: d.y - d.base_height * 0.5,
            width: d.base_width,
            height: d.base_height,
            transform: format!("scale({:.3}, {:.3})", d.scale_x, d.scale_y),
            opacity: d.alpha,
        }));

        f.title.opacity = view.title.alpha;
        f.title.transform = format!("scale({:.3})", view.title.scale);
    }

    fn output(&self) -> RenderOutput<'_> {
        if self.released {
            RenderOutput::Empty
        } else {
            RenderOutput::Dom(&self.frame)
        }
    }

    fn release(&mut self) {
        self.released = true;
        self.frame.droplets = Vec::new();
        self.frame.top_bar.clear();
        self.frame.bottom_bar.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityTier;
    use crate::render::{DropletSprite, TitleIntro};
    use crate::world::Rect;

    fn vp() -> Viewport {
        Viewport::new(320, 240).unwrap()
    }

    fn renderer(tier: QualityTier, blur_reliable: bool) -> FallbackRenderer {
        FallbackRenderer::new(vp(), tier.settings(), GooTuning::default(), blur_reliable)
    }

    #[test]
    fn test_goo_matrices() {
        let goo = GooTuning::default();
        assert_eq!(alpha_matrix(&goo), "1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 20 -8");
        assert_eq!(tint_matrix(&goo), "0.533 0 0 0 0  0 0.031 0 0 0  0 0 0.031 0 0  0 0 0 1 0");
    }

    #[test]
    fn test_filter_markup() {
        let markup = svg_filter_markup("goo", &QualityTier::High.settings(), &GooTuning::default());
        assert!(markup.starts_with(r#"<filter id="goo""#));
        assert!(markup.contains(r#"color-interpolation-filters="sRGB""#));
        assert!(markup.contains(r#"<feGaussianBlur in="SourceGraphic" stdDeviation="10""#));
        assert!(markup.contains("0 0 0 20 -8"));
        assert!(markup.ends_with("</filter>"));
    }

    #[test]
    fn test_broken_blur_uses_css_approximation() {
        let r = renderer(QualityTier::Medium, false);
        let json = serde_json::to_value(&r.frame().filter).unwrap();
        assert_eq!(json["kind"], "approximate");
        assert_eq!(json["css"], APPROXIMATE_CSS);

        let r = renderer(QualityTier::Medium, true);
        let json = serde_json::to_value(&r.frame().filter).unwrap();
        assert_eq!(json["kind"], "svg");
        assert_eq!(json["stdDeviation"], 8.0);
    }

    #[test]
    fn test_quality_change_updates_filter() {
        let mut r = renderer(QualityTier::High, true);
        r.apply_quality(QualityTier::Low.settings());
        let filter = &r.frame().filter;
        assert!(matches!(filter, GooFilter::Svg { std_deviation, .. } if *std_deviation == 6.0));
    }

    #[test]
    fn test_frame_serializes_for_the_page() {
        let mut r = renderer(QualityTier::High, true);
        let top = [Point::new(-20.0, 0.0), Point::new(340.0, 0.0), Point::new(340.0, 12.5)];
        let drops = [DropletSprite {
            x: 100.0,
            y: 50.0,
            base_width: 40.0,
            base_height: 42.0,
            scale_x: 1.0,
            scale_y: 1.25,
            alpha: 0.5,
        }];
        r.render(&FrameView {
            viewport: vp(),
            top_bar: &top,
            bottom_bar: &[],
            droplets: &drops,
            title: TitleIntro { alpha: 0.5, scale: 0.94 },
            title_rect: Rect::default(),
            title_mask: None,
        });

        let json = serde_json::to_value(r.frame()).unwrap();
        assert_eq!(json["topBar"], "M-20.0,0.0 L340.0,0.0 L340.0,12.5 Z");
        assert_eq!(json["bottomBar"], "");
        assert_eq!(json["dropletPath"], DROPLET_PATH);
        assert_eq!(json["droplets"][0]["left"], 80.0);
        assert_eq!(json["droplets"][0]["top"], 29.0);
        assert_eq!(json["droplets"][0]["transform"], "scale(1.000, 1.250)");
        assert_eq!(json["droplets"][0]["opacity"], 0.5);
        assert_eq!(json["title"]["transform"], "scale(0.940)");
    }

    #[test]
    fn test_release_empties_output() {
        let mut r = renderer(QualityTier::Low, true);
        assert!(matches!(r.output(), RenderOutput::Dom(_)));
        r.release();
        assert!(matches!(r.output(), RenderOutput::Empty));
    }
}
