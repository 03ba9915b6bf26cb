//! Pixel implementations of the catalog filters.
//!
//! All functions take an already validated RGB photo and return a new photo
//! of the same dimensions. Geometric filters use inverse mapping: for every
//! output pixel they compute where to sample the source, then sample it
//! bilinearly with edge clamping.

use image::imageops;

use crate::codec::Photo;

/// Smootherstep interpolation, `6t^5 - 15t^4 + 10t^3` with `t` clamped to 0-1.
#[inline]
fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Sample `src` at a fractional coordinate, clamping to the image edges.
fn sample_bilinear(src: &Photo, x: f32, y: f32) -> [u8; 3] {
    let max_x = (src.width - 1) as f32;
    let max_y = (src.height - 1) as f32;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(src.width - 1);
    let y1 = (y0 + 1).min(src.height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
        let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
        out[c] = to_u8(top * (1.0 - fy) + bottom * fy);
    }
    out
}

/// Build an output photo by computing each pixel from its coordinate.
fn map_pixels<F>(src: &Photo, mut f: F) -> Photo
where
    F: FnMut(u32, u32) -> [u8; 3],
{
    let mut pixels = Vec::with_capacity(src.pixels.len());
    for y in 0..src.height {
        for x in 0..src.width {
            pixels.extend_from_slice(&f(x, y));
        }
    }
    Photo::new(src.width, src.height, pixels)
}

/// Blend toward a sepia tone by `intensity` (0 = original, 1 = full sepia).
pub fn sepia_tone(src: &Photo, intensity: f32) -> Photo {
    let amount = intensity.clamp(0.0, 1.0);
    let mut out = src.clone();

    for chunk in out.pixels.chunks_exact_mut(3) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;

        let sr = 0.393 * r + 0.769 * g + 0.189 * b;
        let sg = 0.349 * r + 0.686 * g + 0.168 * b;
        let sb = 0.272 * r + 0.534 * g + 0.131 * b;

        chunk[0] = to_u8(r + (sr - r) * amount);
        chunk[1] = to_u8(g + (sg - g) * amount);
        chunk[2] = to_u8(b + (sb - b) * amount);
    }
    out
}

/// Gaussian blur with standard deviation `radius` pixels.
pub fn gaussian_blur(src: &Photo, radius: f32) -> Photo {
    if radius <= 0.0 {
        return src.clone();
    }
    match src.to_rgb_image() {
        Some(img) => Photo::from_rgb_image(imageops::blur(&img, radius)),
        None => src.clone(),
    }
}

/// Replace the image with square blocks of side `scale`, sampled at each
/// block's center. The block grid is anchored so a block corner sits on
/// `center`.
pub fn pixellate(src: &Photo, center: (f32, f32), scale: f32) -> Photo {
    let block = scale.round();
    if block <= 1.0 {
        return src.clone();
    }
    let (cx, cy) = center;
    let max_x = (src.width - 1) as f32;
    let max_y = (src.height - 1) as f32;

    map_pixels(src, |x, y| {
        let bx = ((x as f32 - cx) / block).floor();
        let by = ((y as f32 - cy) / block).floor();
        let sx = (cx + (bx + 0.5) * block).clamp(0.0, max_x);
        let sy = (cy + (by + 0.5) * block).clamp(0.0, max_y);
        src.pixel(sx as u32, sy as u32)
    })
}

/// Bulge the image around `center` within `radius`. Positive `scale`
/// magnifies, negative pinches, zero leaves the image unchanged.
pub fn bump_distortion(src: &Photo, center: (f32, f32), radius: f32, scale: f32) -> Photo {
    if radius <= 0.0 || scale == 0.0 {
        return src.clone();
    }
    let (cx, cy) = center;

    map_pixels(src, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist >= radius {
            return src.pixel(x, y);
        }
        let t = 1.0 - dist / radius;
        let k = (1.0 - scale * t * t).max(0.0);
        sample_bilinear(src, cx + dx * k, cy + dy * k)
    })
}

/// Swirl the image around `center` within `radius` by up to `angle` radians.
pub fn twirl_distortion(src: &Photo, center: (f32, f32), radius: f32, angle: f32) -> Photo {
    if radius <= 0.0 || angle == 0.0 {
        return src.clone();
    }
    let (cx, cy) = center;

    map_pixels(src, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist >= radius {
            return src.pixel(x, y);
        }
        let t = 1.0 - dist / radius;
        let theta = angle * t * t;
        let (sin, cos) = theta.sin_cos();
        sample_bilinear(src, cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
    })
}

/// Sharpen by adding `intensity` times the difference from a blurred copy.
pub fn unsharp_mask(src: &Photo, radius: f32, intensity: f32) -> Photo {
    if radius <= 0.0 || intensity == 0.0 {
        return src.clone();
    }
    let blurred = gaussian_blur(src, radius);
    let mut out = src.clone();

    for (o, b) in out.pixels.iter_mut().zip(blurred.pixels.iter()) {
        let s = *o as f32;
        *o = to_u8(s + intensity * (s - *b as f32));
    }
    out
}

/// Darken pixels away from `center`.
///
/// Full brightness inside `radius * (1 - falloff)`, darkened by `intensity`
/// beyond `radius * (1 + falloff)`, with a smootherstep ramp between.
pub fn vignette(
    src: &Photo,
    center: (f32, f32),
    radius: f32,
    intensity: f32,
    falloff: f32,
) -> Photo {
    if intensity == 0.0 {
        return src.clone();
    }
    let (cx, cy) = center;
    let falloff = falloff.clamp(0.0, 1.0);
    let inner = radius.max(0.0) * (1.0 - falloff);
    let outer = radius.max(0.0) * (1.0 + falloff);

    let mut out = src.clone();
    for (i, chunk) in out.pixels.chunks_exact_mut(3).enumerate() {
        let x = (i % src.width as usize) as f32;
        let y = (i / src.width as usize) as f32;
        let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();

        let t = if outer > inner {
            (dist - inner) / (outer - inner)
        } else if dist >= outer {
            1.0
        } else {
            0.0
        };
        let factor = (1.0 - intensity * smootherstep(t)).max(0.0);

        for c in chunk.iter_mut() {
            *c = to_u8(*c as f32 * factor);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gradient test image where each pixel is unique within a row.
    fn gradient(width: u32, height: u32) -> Photo {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width.max(1)) as u8);
                pixels.push((y * 255 / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        Photo::new(width, height, pixels)
    }

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let src = gradient(8, 8);
        assert_eq!(sepia_tone(&src, 0.0), src);
    }

    #[test]
    fn test_sepia_full_intensity() {
        let src = Photo::filled(1, 1, [100, 100, 100]);
        let out = sepia_tone(&src, 1.0);
        // 0.393*100 + 0.769*100 + 0.189*100 = 135.1
        assert_eq!(out.pixel(0, 0), [135, 120, 94]);
    }

    #[test]
    fn test_sepia_clamps_to_white() {
        let src = Photo::filled(1, 1, [255, 255, 255]);
        let out = sepia_tone(&src, 1.0);
        assert_eq!(out.pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_blur_zero_radius_is_identity() {
        let src = gradient(10, 10);
        assert_eq!(gaussian_blur(&src, 0.0), src);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let src = Photo::filled(12, 12, [90, 90, 90]);
        let out = gaussian_blur(&src, 3.0);
        assert_eq!(out.width, 12);
        for v in out.pixels {
            assert!((v as i32 - 90).abs() <= 1);
        }
    }

    #[test]
    fn test_blur_smooths_edge() {
        let mut src = Photo::filled(20, 1, [0, 0, 0]);
        for x in 10..20 {
            let idx = x * 3;
            src.pixels[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
        }
        let out = gaussian_blur(&src, 2.0);
        let left_of_edge = out.pixel(9, 0)[0];
        assert!(left_of_edge > 0 && left_of_edge < 255);
    }

    #[test]
    fn test_pixellate_blocks_are_uniform() {
        let src = gradient(16, 16);
        let out = pixellate(&src, (0.0, 0.0), 4.0);

        for by in 0..4 {
            for bx in 0..4 {
                let first = out.pixel(bx * 4, by * 4);
                for y in 0..4 {
                    for x in 0..4 {
                        assert_eq!(out.pixel(bx * 4 + x, by * 4 + y), first);
                    }
                }
            }
        }
        // Sampled at the block center
        assert_eq!(out.pixel(0, 0), src.pixel(2, 2));
    }

    #[test]
    fn test_pixellate_small_scale_is_identity() {
        let src = gradient(5, 5);
        assert_eq!(pixellate(&src, (2.5, 2.5), 1.0), src);
        assert_eq!(pixellate(&src, (2.5, 2.5), 0.0), src);
    }

    #[test]
    fn test_bump_outside_radius_untouched() {
        let src = gradient(20, 20);
        let out = bump_distortion(&src, (10.0, 10.0), 5.0, 0.8);
        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
        assert_eq!(out.pixel(19, 19), src.pixel(19, 19));
        assert_ne!(out, src);
    }

    #[test]
    fn test_bump_zero_scale_is_identity() {
        let src = gradient(10, 10);
        assert_eq!(bump_distortion(&src, (5.0, 5.0), 4.0, 0.0), src);
    }

    #[test]
    fn test_twirl_keeps_center_pixel() {
        let src = gradient(21, 21);
        let out = twirl_distortion(&src, (10.0, 10.0), 8.0, std::f32::consts::PI);
        assert_eq!(out.pixel(10, 10), src.pixel(10, 10));
        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
        assert_ne!(out, src);
    }

    #[test]
    fn test_unsharp_uniform_image_unchanged() {
        let src = Photo::filled(10, 10, [60, 120, 180]);
        let out = unsharp_mask(&src, 2.0, 1.0);
        for (a, b) in out.pixels.iter().zip(src.pixels.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_unsharp_increases_edge_contrast() {
        let mut src = Photo::filled(20, 1, [100, 100, 100]);
        for x in 10..20 {
            let idx = x * 3;
            src.pixels[idx..idx + 3].copy_from_slice(&[200, 200, 200]);
        }
        let out = unsharp_mask(&src, 2.0, 1.0);
        assert!(out.pixel(9, 0)[0] < 100);
        assert!(out.pixel(10, 0)[0] > 200);
    }

    #[test]
    fn test_vignette_darkens_corners_only() {
        let src = Photo::filled(41, 41, [200, 200, 200]);
        let out = vignette(&src, (20.0, 20.0), 10.0, 1.0, 0.5);

        assert_eq!(out.pixel(20, 20), [200, 200, 200]);
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_vignette_zero_intensity_is_identity() {
        let src = gradient(9, 9);
        assert_eq!(vignette(&src, (4.0, 4.0), 3.0, 0.0, 0.5), src);
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let src = Photo::new(2, 1, vec![0, 0, 0, 100, 200, 50]);
        assert_eq!(sample_bilinear(&src, 0.5, 0.0), [50, 100, 25]);
        // Clamped outside the image
        assert_eq!(sample_bilinear(&src, -3.0, 9.0), [0, 0, 0]);
    }

    #[test]
    fn test_smootherstep_boundaries() {
        assert!((smootherstep(0.0) - 0.0).abs() < f32::EPSILON);
        assert!((smootherstep(1.0) - 1.0).abs() < f32::EPSILON);
        assert!((smootherstep(0.5) - 0.5).abs() < f32::EPSILON);
    }
}
