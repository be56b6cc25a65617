//! Alpha helpers shared by both watermark kinds.

use image::{Rgba, RgbaImage};

/// Multiply every pixel's alpha by `opacity`, clamped to [0, 1].
///
/// Applies to the whole layer, not just the visible shape: any non-zero
/// alpha (including resampling fringes) is scaled the same way.
pub fn scale_alpha(layer: &mut RgbaImage, opacity: f32) {
    let factor = opacity.clamp(0.0, 1.0);
    for pixel in layer.pixels_mut() {
        pixel[3] = (f32::from(pixel[3]) * factor).round() as u8;
    }
}

/// Blend `overlay` onto `base` using the overlay's own alpha as the mask.
///
/// Every channel, alpha included, becomes `overlay * a + base * (1 - a)`
/// where `a` is the overlay alpha. Both images must be the same size.
pub fn composite_masked(overlay: &RgbaImage, base: &RgbaImage) -> RgbaImage {
    debug_assert_eq!(overlay.dimensions(), base.dimensions());

    let mut out = base.clone();
    for (dst, src) in out.pixels_mut().zip(overlay.pixels()) {
        *dst = blend(*dst, *src);
    }
    out
}

fn blend(base: Rgba<u8>, overlay: Rgba<u8>) -> Rgba<u8> {
    let a = u32::from(overlay[3]);
    if a == 0 {
        return base;
    }
    if a == 255 {
        return overlay;
    }
    let mix = |o: u8, b: u8| -> u8 {
        ((u32::from(o) * a + u32::from(b) * (255 - a) + 127) / 255) as u8
    };
    Rgba([
        mix(overlay[0], base[0]),
        mix(overlay[1], base[1]),
        mix(overlay[2], base[2]),
        mix(overlay[3], base[3]),
    ])
}

/// Mean alpha over the whole layer, 0.0 to 255.0.
#[cfg(test)]
pub(crate) fn mean_alpha(layer: &RgbaImage) -> f64 {
    let count = u64::from(layer.width()) * u64::from(layer.height());
    if count == 0 {
        return 0.0;
    }
    let total: u64 = layer.pixels().map(|p| u64::from(p[3])).sum();
    total as f64 / count as f64
}
