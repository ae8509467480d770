// shape.rs - Droplet silhouette
//
// The brand droplet is a 59x62 outline of six cubic segments: a pointed
// tip, two shoulders, and a round belly. Flattened to a unit polygon
// centred on the origin, then scaled per droplet.

use super::edge::Point;

/// SVG path data for the DOM renderer, viewBox `0 0 59 62`.
pub const DROPLET_PATH: &str = concat!(
    "m28.443,3.6945c2.45,11.902,6.93,17.65,12.688,25.359,1.9918,2.667,3.2188,5.8992,",
    "3.2188,9.4844,0,8.7667-7.1395,15.875-15.906,15.875-8.7667,0-15.844-7.1083-15.844-15.875,",
    "0-3.5378,1.0945-6.9015,3.125-9.4844,6.009-7.645,10.407-13.424,12.718-25.36z",
);

pub const VIEWBOX: (f32, f32) = (59.0, 62.0);

const START: Point = Point::new(28.443, 3.6945);

// (control 1, control 2, end), absolute viewBox coordinates
const CURVES: [[Point; 3]; 6] = [
    [Point::new(30.893, 15.5965), Point::new(35.373, 21.3445), Point::new(41.131, 29.0535)],
    [Point::new(43.1228, 31.7205), Point::new(44.3498, 34.9527), Point::new(44.3498, 38.5379)],
    [Point::new(44.3498, 47.3046), Point::new(37.2103, 54.4129), Point::new(28.4438, 54.4129)],
    [Point::new(19.6771, 54.4129), Point::new(12.5998, 47.3046), Point::new(12.5998, 38.5379)],
    [Point::new(12.5998, 35.0001), Point::new(13.6943, 31.6364), Point::new(15.7248, 29.0535)],
    [Point::new(21.7338, 21.4085), Point::new(26.1318, 15.6295), Point::new(28.4428, 3.6935)],
];

#[inline]
fn cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Unit-box outline (x and y in -0.5..0.5) with `detail` points per curve.
pub fn unit_outline(detail: usize) -> Vec<Point> {
    let detail = detail.max(1);
    let (vw, vh) = VIEWBOX;
    let normalise = |p: Point| Point::new((p.x - vw * 0.5) / vw, (p.y - vh * 0.5) / vh);

    let mut points = Vec::with_capacity(CURVES.len() * detail);
    let mut from = START;
    for [c1, c2, to] in CURVES {
        for i in 0..detail {
            let t = i as f32 / detail as f32;
            points.push(normalise(cubic(from, c1, c2, to, t)));
        }
        from = to;
    }
    points
}

/// Cached unit outline, rebuilt only when the detail level changes.
#[derive(Debug, Clone)]
pub struct DropletShape {
    detail: usize,
    unit: Vec<Point>,
}

impl DropletShape {
    pub fn new(detail: usize) -> Self {
        Self {
            detail,
            unit: unit_outline(detail),
        }
    }

    pub fn set_detail(&mut self, detail: usize) {
        if detail != self.detail {
            *self = Self::new(detail);
        }
    }

    pub fn detail(&self) -> usize {
        self.detail
    }

    /// Outline scaled to a `width` x `height` box centred on `(cx, cy)`.
    pub fn place_into(&self, out: &mut Vec<Point>, cx: f32, cy: f32, width: f32, height: f32) {
        out.clear();
        out.extend(
            self.unit
                .iter()
                .map(|p| Point::new(cx + p.x * width, cy + p.y * height)),
        );
    }
}
