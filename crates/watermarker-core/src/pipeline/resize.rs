//! Fit an image onto a fixed-size transparent canvas.
//!
//! The fit policy has three branches and is kept exactly as the tool has
//! always behaved:
//!
//! | image vs. target                 | result                                  |
//! |----------------------------------|-----------------------------------------|
//! | at least as large on both axes   | stretched to the target (may distort)   |
//! | wider only                       | width scaled to target, aspect kept     |
//! | taller only                      | height scaled to target, aspect kept    |
//! | anything else (fits)             | unscaled                                |
//!
//! The result is always centered on a canvas of exactly the target size.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::config::Resolution;

/// Resampling filter for every downscale.
const FILTER: FilterType = FilterType::CatmullRom;

// TODO: the stretch branch distorts photos that are larger on both axes;
// a uniform fit would be `min(tw/iw, th/ih)`, but outputs would change.
/// Size the image will have on the canvas, before centering.
///
/// Proportional branches truncate toward zero.
pub fn fit_dimensions(image_w: u32, image_h: u32, target: Resolution) -> (u32, u32) {
    let (tw, th) = (target.width, target.height);

    if tw <= image_w && th <= image_h {
        (tw, th)
    } else if tw < image_w && th > image_h {
        let h = u64::from(image_h) * u64::from(tw) / u64::from(image_w);
        (tw, h as u32)
    } else if tw > image_w && th < image_h {
        let w = u64::from(image_w) * u64::from(th) / u64::from(image_h);
        (w as u32, th)
    } else {
        (image_w, image_h)
    }
}

/// Resize `image` per the fit policy and center it on a transparent canvas.
pub fn resize(image: &DynamicImage, target: Resolution) -> RgbaImage {
    let (iw, ih) = image.dimensions();
    let (w, h) = fit_dimensions(iw, ih, target);

    let source = image.to_rgba8();
    let scaled = if (w, h) == (iw, ih) {
        source
    } else {
        imageops::resize(&source, w.max(1), h.max(1), FILTER)
    };

    let mut canvas = RgbaImage::new(target.width, target.height);
    let x = (target.width - scaled.width()) / 2;
    let y = (target.height - scaled.height()) / 2;
    imageops::replace(&mut canvas, &scaled, i64::from(x), i64::from(y));

    tracing::trace!(
        "resize {}x{} -> {}x{} on {} canvas at ({}, {})",
        iw,
        ih,
        scaled.width(),
        scaled.height(),
        target,
        x,
        y
    );
    canvas
}
