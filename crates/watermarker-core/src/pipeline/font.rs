//! TrueType font resolution for the text watermark.
//!
//! The watermark always uses Verdana from the platform's font folder unless a
//! path is configured. There is no fallback font: a missing font stops the run
//! before any image is touched.

use ab_glyph::FontVec;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// File name of the watermark font.
pub const FONT_FILE: &str = "Verdana.ttf";

/// Where the platform keeps [`FONT_FILE`], most likely first.
pub fn system_font_candidates() -> Vec<PathBuf> {
    if cfg!(target_os = "linux") {
        vec![PathBuf::from("/usr/share/fonts/truetype/msttcorefonts").join(FONT_FILE)]
    } else if cfg!(target_os = "macos") {
        vec![
            PathBuf::from("/Library/Fonts").join(FONT_FILE),
            PathBuf::from("/System/Library/Fonts/Supplemental").join(FONT_FILE),
        ]
    } else if cfg!(target_os = "windows") {
        vec![PathBuf::from(r"C:\Windows\Fonts\verdana.ttf")]
    } else {
        vec![PathBuf::from(FONT_FILE)]
    }
}

/// Resolve the font path: the configured one, else the first existing
/// system candidate.
pub fn resolve_font_path(configured: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let candidates = match configured {
        Some(path) => vec![path.to_path_buf()],
        None => system_font_candidates(),
    };

    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    Err(ConfigError::FontNotFound { candidates })
}

/// Read and parse a TrueType/OpenType font file.
pub fn load_font(path: &Path) -> Result<FontVec, ConfigError> {
    let bytes = std::fs::read(path).map_err(|e| ConfigError::FontInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    FontVec::try_from_vec(bytes).map_err(|e| ConfigError::FontInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve and load in one step.
pub fn load_watermark_font(configured: Option<&Path>) -> Result<FontVec, ConfigError> {
    let path = resolve_font_path(configured)?;
    tracing::debug!("Using watermark font {:?}", path);
    load_font(&path)
}

/// Locate some TrueType font on this machine, for tests that need real glyphs.
#[cfg(test)]
pub(crate) fn find_any_test_font_path() -> Option<PathBuf> {
    let mut candidates = system_font_candidates();
    candidates.extend(
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            r"C:\Windows\Fonts\arial.ttf",
        ]
        .iter()
        .map(PathBuf::from),
    );
    candidates
        .into_iter()
        .find(|p| p.is_file() && load_font(p).is_ok())
}

#[cfg(test)]
pub(crate) fn find_any_test_font() -> Option<FontVec> {
    find_any_test_font_path().and_then(|p| load_font(&p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_name_the_font() {
        let candidates = system_font_candidates();
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|p| p
            .file_name()
            .map(|n| n.to_string_lossy().eq_ignore_ascii_case(FONT_FILE))
            .unwrap_or(false)));
    }

    #[test]
    fn test_configured_missing_font_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Nope.ttf");
        let err = resolve_font_path(Some(&missing)).unwrap_err();
        match err {
            ConfigError::FontNotFound { candidates } => assert_eq!(candidates, vec![missing]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_configured_font_wins_over_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("Custom.ttf");
        std::fs::write(&font, b"placeholder").unwrap();
        assert_eq!(resolve_font_path(Some(&font)).unwrap(), font);
    }

    #[test]
    fn test_garbage_font_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("Broken.ttf");
        std::fs::write(&font, b"not a font at all").unwrap();
        let err = load_watermark_font(Some(&font)).unwrap_err();
        assert!(matches!(err, ConfigError::FontInvalid { .. }));
    }
}
