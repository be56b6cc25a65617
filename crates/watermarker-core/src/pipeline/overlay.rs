//! Image watermark compositor.
//!
//! Pastes a logo flush into the bottom-right corner of each photo at reduced
//! opacity.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use super::composite::{composite_masked, scale_alpha};

/// Applies one decoded watermark image to many photos.
pub struct ImageWatermark {
    /// Watermark with opacity already folded into its alpha channel
    faded: RgbaImage,
}

impl ImageWatermark {
    /// Prepare the watermark once: convert to RGBA and scale its alpha.
    pub fn new(watermark: &DynamicImage, opacity: f32) -> Self {
        let mut faded = watermark.to_rgba8();
        scale_alpha(&mut faded, opacity);
        Self { faded }
    }

    /// Dimensions of the prepared watermark.
    pub fn dimensions(&self) -> (u32, u32) {
        self.faded.dimensions()
    }

    /// Blend the watermark over `image`.
    pub fn apply(&self, image: &DynamicImage) -> RgbaImage {
        let base = image.to_rgba8();
        let (width, height) = base.dimensions();

        let fitted;
        let watermark = if self.faded.width() > width || self.faded.height() > height {
            fitted = imageops::resize(&self.faded, width, height, FilterType::CatmullRom);
            &fitted
        } else {
            &self.faded
        };

        let (x, y) = watermark_position((width, height), watermark.dimensions());
        let mut layer = RgbaImage::new(width, height);
        imageops::replace(&mut layer, watermark, i64::from(x), i64::from(y));

        composite_masked(&layer, &base)
    }
}

/// Top-left corner that puts the watermark flush to the bottom-right.
///
/// Callers shrink oversized watermarks first; the position saturates at 0.
pub fn watermark_position(image: (u32, u32), watermark: (u32, u32)) -> (u32, u32) {
    (
        image.0.saturating_sub(watermark.0),
        image.1.saturating_sub(watermark.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(color)))
    }

    #[test]
    fn test_position_bottom_right() {
        assert_eq!(watermark_position((100, 100), (20, 20)), (80, 80));
        assert_eq!(watermark_position((640, 480), (100, 50)), (540, 430));
        assert_eq!(watermark_position((10, 10), (10, 10)), (0, 0));
    }

    #[test]
    fn test_watermark_lands_at_80_80() {
        let photo = solid(100, 100, [0, 0, 0, 255]);
        let stamp = ImageWatermark::new(&solid(20, 20, [255, 255, 255, 255]), 1.0);
        let out = stamp.apply(&photo);

        assert_eq!(out.get_pixel(79, 79), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(80, 80), &Rgba([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(99, 99), &Rgba([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(80, 79), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_opacity_scales_existing_alpha() {
        let stamp = ImageWatermark::new(&solid(4, 4, [255, 0, 0, 200]), 0.5);
        let out = stamp.apply(&solid(4, 4, [0, 0, 0, 255]));
        // alpha 100 of 255 red over black
        assert_eq!(out.get_pixel(0, 0)[0], 100);
        assert_eq!(out.get_pixel(0, 0)[1], 0);
    }

    #[test]
    fn test_opaque_rgb_watermark_gets_alpha() {
        let logo = DynamicImage::new_rgb8(5, 5);
        let stamp = ImageWatermark::new(&logo, 0.25);
        assert_eq!(stamp.faded.get_pixel(0, 0)[3], 64);
    }

    #[test]
    fn test_oversized_watermark_is_shrunk_to_image() {
        let photo = solid(30, 20, [0, 0, 0, 255]);
        let stamp = ImageWatermark::new(&solid(60, 10, [255, 255, 255, 255]), 1.0);
        let out = stamp.apply(&photo);

        assert_eq!(out.dimensions(), (30, 20));
        // Resized to cover the whole photo
        assert_eq!(out.get_pixel(0, 0)[0], 255);
        assert_eq!(out.get_pixel(29, 19)[0], 255);
    }

    #[test]
    fn test_zero_opacity_leaves_photo_untouched() {
        let photo = solid(50, 50, [12, 34, 56, 255]);
        let stamp = ImageWatermark::new(&solid(10, 10, [255, 255, 255, 255]), 0.0);
        assert_eq!(stamp.apply(&photo), photo.to_rgba8());
    }
}
