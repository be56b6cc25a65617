//! Text watermark rendering.
//!
//! Renders a string in white into a transparent layer the size of the photo,
//! rotates the layer, fades it by the configured opacity and blends it over the
//! photo. The font size is grown until the text roughly spans the photo.
//!
//! # Example
//!
//! ```ignore
//! use watermarker_core::pipeline::TextWatermark;
//!
//! let font = watermarker_core::pipeline::font::load_watermark_font(None)?;
//! let stamp = TextWatermark::new(font, "proof", 25.0, 0.25);
//! let marked = stamp.apply(&photo);
//! ```

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use super::composite::{composite_masked, scale_alpha};

/// First font size tried.
const START_FONT_SIZE: f32 = 2.0;

/// Growth per iteration.
const FONT_SIZE_STEP: f32 = 2.0;

/// Renders and applies a text watermark with one font for the whole run.
pub struct TextWatermark {
    font: FontVec,
    text: String,
    angle: f32,
    opacity: f32,
}

impl TextWatermark {
    pub fn new(font: FontVec, text: impl Into<String>, angle: f32, opacity: f32) -> Self {
        Self {
            font,
            text: text.into(),
            angle,
            opacity,
        }
    }

    /// The overlay alone, sized `width` x `height`.
    pub fn overlay(&self, width: u32, height: u32) -> RgbaImage {
        render_overlay(&self.font, &self.text, width, height, self.angle, self.opacity)
    }

    /// Blend the watermark over `image`.
    pub fn apply(&self, image: &DynamicImage) -> RgbaImage {
        let base = image.to_rgba8();
        let overlay = self.overlay(base.width(), base.height());
        composite_masked(&overlay, &base)
    }
}

/// Width and height of `text` at `font_size` pixels.
///
/// Width is the sum of advances plus kerning; height is the font's line
/// height at that scale.
pub fn measure_text<F: Font>(font: &F, text: &str, font_size: f32) -> (u32, u32) {
    let scaled = font.as_scaled(PxScale::from(font_size));

    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    (width.max(0.0).ceil() as u32, scaled.height().max(0.0).ceil() as u32)
}

/// Grow the font from 2px in 2px steps until `width + height` reaches
/// `image_width`.
///
/// The last step may overshoot the threshold. Sizes stop growing at
/// `image_width + 2` so a measure that never grows still terminates.
pub fn fit_font_size<M>(image_width: u32, mut measure: M) -> (f32, (u32, u32))
where
    M: FnMut(f32) -> (u32, u32),
{
    let max_size = image_width as f32 + START_FONT_SIZE;
    let mut size = START_FONT_SIZE;
    let mut dims = measure(size);
    while dims.0 + dims.1 < image_width && size < max_size {
        size += FONT_SIZE_STEP;
        dims = measure(size);
    }
    (size, dims)
}

/// Render the rotated, faded text layer for a `width` x `height` photo.
pub fn render_overlay<F: Font>(
    font: &F,
    text: &str,
    width: u32,
    height: u32,
    angle: f32,
    opacity: f32,
) -> RgbaImage {
    let (size, (text_w, text_h)) = fit_font_size(width, |s| measure_text(font, text, s));

    let mut layer = RgbaImage::new(width, height);
    let origin_x = (width as f32 - text_w as f32) / 2.0;
    let origin_y = (height as f32 - text_h as f32) / 2.0;
    draw_text(&mut layer, font, text, size, origin_x, origin_y);

    // Positive angles turn counter-clockwise; imageproc turns clockwise.
    let mut layer = rotate_about_center(
        &layer,
        -angle.to_radians(),
        Interpolation::Bicubic,
        Rgba([0, 0, 0, 0]),
    );
    scale_alpha(&mut layer, opacity);

    tracing::trace!(
        "text overlay {}x{}: font {}px, text {}x{}",
        width,
        height,
        size,
        text_w,
        text_h
    );
    layer
}

/// Rasterize `text` in white with its top-left line box corner at
/// (`origin_x`, `origin_y`). Pixels outside the layer are clipped.
fn draw_text<F: Font>(
    layer: &mut RgbaImage,
    font: &F,
    text: &str,
    font_size: f32,
    origin_x: f32,
    origin_y: f32,
) {
    let scale = PxScale::from(font_size);
    let scaled = font.as_scaled(scale);
    let baseline_y = origin_y + scaled.ascent();
    let (layer_w, layer_h) = (layer.width() as i32, layer.height() as i32);

    let mut cursor_x = origin_x;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x < 0 || y < 0 || x >= layer_w || y >= layer_h {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = layer.get_pixel_mut(x as u32, y as u32);
                if alpha > pixel[3] {
                    *pixel = Rgba([255, 255, 255, alpha]);
                }
            });
        }

        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }
}
