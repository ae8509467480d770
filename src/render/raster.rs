// raster.rs - Scanline polygon fill and mask sampling
//
// No anti-aliasing: the goo blur softens every edge anyway, and the crisp
// overlay only draws the top bar.

use crate::world::Point;

use super::TitleMask;

/// Even-odd scanline fill sampled at pixel centres. Calls `span(y, x0, x1)`
/// for each covered half-open run.
pub fn scan_polygon(
    points: &[Point],
    width: usize,
    height: usize,
    mut span: impl FnMut(usize, usize, usize),
) {
    if points.len() < 3 || width == 0 || height == 0 {
        return;
    }

    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    for p in points {
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }
    let y0 = (min_y - 0.5).ceil().max(0.0) as usize;
    let y1 = ((max_y - 0.5).ceil().max(0.0) as usize).min(height);

    let mut crossings: Vec<f32> = Vec::with_capacity(8);
    for y in y0..y1 {
        let yc = y as f32 + 0.5;
        crossings.clear();

        let mut a = points[points.len() - 1];
        for &b in points {
            if (a.y <= yc) != (b.y <= yc) {
                crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
            }
            a = b;
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = (pair[0] - 0.5).ceil().clamp(0.0, width as f32) as usize;
            let x1 = (pair[1] - 0.5).ceil().clamp(0.0, width as f32) as usize;
            if x1 > x0 {
                span(y, x0, x1);
            }
        }
    }
}

/// Union `alpha` coverage of the polygon into a coverage layer.
pub fn fill_coverage(layer: &mut [f32], width: usize, height: usize, points: &[Point], alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    scan_polygon(points, width, height, |y, x0, x1| {
        for a in &mut layer[y * width + x0..y * width + x1] {
            *a += alpha * (1.0 - *a);
        }
    });
}

/// Mask coverage at destination pixel `(x, y)` with the mask scaled by
/// `scale` around `(cx, cy)`. Nearest sample; 0 outside the mask.
#[inline]
pub fn sample_mask(mask: &TitleMask, x: usize, y: usize, scale: f32, cx: f32, cy: f32) -> f32 {
    let sx = (x as f32 + 0.5 - cx) / scale + cx;
    let sy = (y as f32 + 0.5 - cy) / scale + cy;
    if sx < 0.0 || sy < 0.0 {
        return 0.0;
    }
    let (mx, my) = (sx as usize, sy as usize);
    if mx >= mask.width as usize || my >= mask.height as usize {
        return 0.0;
    }
    mask.alpha[my * mask.width as usize + mx] as f32 / 255.0
}
