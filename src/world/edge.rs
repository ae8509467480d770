// edge.rs - Organic bar boundaries
//
// Pure functions: same inputs, same points. Layered sines give the slow
// wobble; a stable pseudo-noise term adds grain. Ripples are applied in a
// second pass in screen coordinates.

use std::f32::consts::PI;

use serde::Serialize;

use crate::sim::{Ripple, RippleKind};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Wave shape of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    pub frequency: f32,
    pub roughness: f32,
}

/// `segments + 1` samples from `x = 0` to `x = width`.
pub fn organic_edge(
    width: f32,
    baseline: f32,
    wave: Wave,
    time: f32,
    segments: usize,
) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments + 1);
    organic_edge_into(&mut points, width, baseline, wave, time, segments);
    points
}

/// Same as [`organic_edge`], reusing `out`.
pub fn organic_edge_into(
    out: &mut Vec<Point>,
    width: f32,
    baseline: f32,
    wave: Wave,
    time: f32,
    segments: usize,
) {
    out.clear();
    let segments = segments.max(1);
    let step = width / segments as f32;
    let Wave {
        amplitude: a,
        frequency: f,
        roughness,
    } = wave;

    for i in 0..=segments {
        let x = i as f32 * step;
        let primary = (x * f + time).sin() * a;
        let secondary = (x * f * 2.3 + time * 1.7).sin() * a * 0.3;
        let detail = (x * f * 5.1 - time * 0.8).sin() * a * 0.15;

        let s = x * 0.01 + time * 0.1;
        let grain = (s * 13.37).sin() * (s * 7.11).cos() * roughness;

        out.push(Point::new(x, baseline + primary + secondary + detail + grain));
    }
}

/// Offset every point by the ripples within reach.
///
/// Growth ripples raise a cosine mound (y decreases, bars grow upward);
/// visual ripples add a sine wobble with quadratic falloff.
pub fn apply_ripples<'a>(
    points: &mut [Point],
    ripples: impl IntoIterator<Item = &'a Ripple> + Clone,
) {
    for p in points.iter_mut() {
        let mut dy = 0.0;
        for r in ripples.clone() {
            let d = (p.x - r.x).abs();
            if d >= r.radius {
                continue;
            }
            match r.kind {
                RippleKind::Growth => {
                    let falloff = (1.0 + (d / r.radius * PI).cos()) * 0.5;
                    dy -= falloff * r.amplitude;
                }
                RippleKind::Visual => {
                    let falloff = (1.0 - d / r.radius).powi(2);
                    dy += (r.phase * 2.0 * PI).sin() * falloff * r.amplitude;
                }
            }
        }
        p.y += dy;
    }
}

/// Organic edge over `width`, shifted left by `x_shift`, then rippled.
pub fn edge_with_ripples<'a>(
    width: f32,
    baseline: f32,
    wave: Wave,
    time: f32,
    segments: usize,
    x_shift: f32,
    ripples: impl IntoIterator<Item = &'a Ripple> + Clone,
) -> Vec<Point> {
    let mut points = organic_edge(width, baseline, wave, time, segments);
    for p in &mut points {
        p.x -= x_shift;
    }
    apply_ripples(&mut points, ripples);
    points
}

/// Lower the left end by `tilt`, fading to zero at the right end.
pub fn apply_tilt(points: &mut [Point], tilt: f32, width: f32) {
    if width <= 0.0 {
        return;
    }
    for p in points {
        p.y += tilt * (1.0 - p.x / width);
    }
}
