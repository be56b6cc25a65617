//! Thin adapter over the `image` crate: content-sniffed decoding and
//! format-aware saving, with errors tagged by stage and path.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult, Stage};

/// Open and decode an image, detecting the format from its bytes.
///
/// The text pass writes JPEG data under the source file name, so the
/// extension cannot be trusted on later passes.
pub fn load(path: &Path, stage: Stage) -> PipelineResult<DynamicImage> {
    let decode_err = |message: String| PipelineError::Decode {
        stage,
        path: path.to_path_buf(),
        message,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| decode_err(format!("Cannot open file: {e}")))?
        .with_guessed_format()
        .map_err(|e| decode_err(format!("Cannot detect image format: {e}")))?;
    if reader.format().is_none() {
        return Err(decode_err("Unrecognized image format".to_string()));
    }
    reader.decode().map_err(|e| decode_err(e.to_string()))
}

/// Encode as JPEG regardless of the file name. Alpha is dropped.
pub fn save_jpeg(image: &DynamicImage, path: &Path, stage: Stage) -> PipelineResult<()> {
    write_format(image, path, ImageFormat::Jpeg, stage)
}

/// Encode in the format the file extension names (`.png` or `.jpg`).
pub fn save_preserving_extension(
    image: &DynamicImage,
    path: &Path,
    stage: Stage,
) -> PipelineResult<()> {
    let format = format_for_extension(path).ok_or_else(|| PipelineError::Encode {
        stage,
        path: path.to_path_buf(),
        message: "No encoder for this file extension".to_string(),
    })?;
    write_format(image, path, format, stage)
}

/// Map a supported extension to its encoder.
pub fn format_for_extension(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some(ImageFormat::Png),
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        _ => None,
    }
}

fn write_format(
    image: &DynamicImage,
    path: &Path,
    format: ImageFormat,
    stage: Stage,
) -> PipelineResult<()> {
    let encode_err = |message: String| PipelineError::Encode {
        stage,
        path: path.to_path_buf(),
        message,
    };

    // The JPEG encoder rejects alpha; flatten by discarding it.
    let flattened;
    let image = if format == ImageFormat::Jpeg && image.color().has_alpha() {
        flattened = DynamicImage::ImageRgb8(image.to_rgb8());
        &flattened
    } else {
        image
    };

    let file = File::create(path).map_err(|e| encode_err(format!("Cannot create file: {e}")))?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, format)
        .map_err(|e| encode_err(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[test]
    fn test_format_for_extension() {
        assert_eq!(format_for_extension(Path::new("a.PNG")), Some(ImageFormat::Png));
        assert_eq!(format_for_extension(Path::new("a.jpg")), Some(ImageFormat::Jpeg));
        assert_eq!(format_for_extension(Path::new("a.gif")), None);
        assert_eq!(format_for_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_jpeg_under_png_name_is_sniffed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("really_jpeg.png");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([10, 20, 30, 0])));

        save_jpeg(&img, &path, Stage::TextWatermark).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = load(&path, Stage::ImageWatermark).unwrap();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 77])));

        save_preserving_extension(&img, &path, Stage::ImageWatermark).unwrap();
        let decoded = load(&path, Stage::ImageWatermark).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0)[3], 77);
    }

    #[test]
    fn test_load_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load(&path, Stage::Resize).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Decode {
                stage: Stage::Resize,
                ..
            }
        ));
    }

    #[test]
    fn test_save_unknown_extension_errors() {
        let dir = tempfile::tempdir().unwrap();
        let img = DynamicImage::new_rgb8(2, 2);
        let err = save_preserving_extension(&img, &dir.path().join("x.bmp"), Stage::ImageWatermark)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Encode { .. }));
    }
}
