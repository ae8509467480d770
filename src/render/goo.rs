// goo.rs - Blur, alpha threshold, tint
//
// The goo look: blur the white silhouette so nearby shapes bleed together,
// then crush the soft alpha back to a hard edge with `a * mul - off`. Where
// two blurred shapes overlap their alpha sums past the threshold and they
// read as one blob.

use crate::config::GooTuning;

/// Box radius for `passes` box blurs approximating a Gaussian of sigma
/// `strength`. Never below 1.
pub fn box_radius(strength: f32, passes: u32) -> usize {
    let n = passes.max(1) as f32;
    let ideal = (12.0 * strength * strength / n + 1.0).sqrt();
    ((0.5 * ideal - 0.5).floor() as usize).max(1)
}

/// In-place separable box blur, clamp-to-edge, `passes` times.
pub fn box_blur(
    layer: &mut [f32],
    scratch: &mut Vec<f32>,
    width: usize,
    height: usize,
    radius: usize,
    passes: u32,
) {
    if width == 0 || height == 0 || radius == 0 {
        return;
    }
    scratch.resize(layer.len(), 0.0);
    for _ in 0..passes {
        blur_line(layer, scratch, height, width, 1, width, radius);
        blur_line(scratch, layer, width, height, width, 1, radius);
    }
}

// Blur `lines` lines of `len` samples each. `step` walks along a line,
// `line_step` from one line to the next.
fn blur_line(
    src: &[f32],
    dst: &mut [f32],
    lines: usize,
    len: usize,
    step: usize,
    line_step: usize,
    radius: usize,
) {
    let r = radius as isize;
    let last = len as isize - 1;
    let norm = 1.0 / (2 * radius + 1) as f32;

    for line in 0..lines {
        let base = line * line_step;
        let at = |i: isize| src[base + i.clamp(0, last) as usize * step];

        let mut sum: f32 = (-r..=r).map(at).sum();
        for i in 0..len as isize {
            dst[base + i as usize * step] = sum * norm;
            sum += at(i + r + 1) - at(i - r);
        }
    }
}

#[inline]
pub fn alpha_remap(a: f32, goo: &GooTuning) -> f32 {
    (a * goo.alpha_multiply - goo.alpha_offset).clamp(0.0, 1.0)
}

/// Straight-alpha RGBA for the thresholded, tinted layer.
pub fn shade(layer: &[f32], rgba: &mut [u8], goo: &GooTuning) {
    let color = tint_rgb(goo);
    for (a, px) in layer.iter().zip(rgba.chunks_exact_mut(4)) {
        let alpha = alpha_remap(*a, goo);
        if alpha <= 0.0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
        } else {
            px.copy_from_slice(&[color[0], color[1], color[2], to_byte(alpha)]);
        }
    }
}

/// White recoloured by the tint, as bytes.
pub fn tint_rgb(goo: &GooTuning) -> [u8; 3] {
    [to_byte(goo.tint[0]), to_byte(goo.tint[1]), to_byte(goo.tint[2])]
}

#[inline]
pub fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Source-over a flat colour onto a straight-alpha pixel.
#[inline]
pub fn blend_over(px: &mut [u8], rgb: [u8; 3], alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let da = px[3] as f32 / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    for c in 0..3 {
        let s = rgb[c] as f32;
        let d = px[c] as f32;
        px[c] = ((s * alpha + d * da * (1.0 - alpha)) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    px[3] = to_byte(out_a);
}
