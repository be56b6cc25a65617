//! File discovery for finding images in a folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::PipelineError;

/// Extensions every pass accepts, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["png", "jpg"];

/// Discovers image files directly inside a folder.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDiscovery;

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl DiscoveredFile {
    /// Final path component, used to name the output file.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// List supported files in `dir`, without descending into subfolders.
    ///
    /// Sorted by path so every pass visits files in the same order.
    pub fn discover(&self, dir: &Path) -> Result<Vec<DiscoveredFile>, PipelineError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| PipelineError::Discovery {
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;
            let entry_path = entry.path();
            if !entry.file_type().is_file() || !Self::is_supported(entry_path) {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(DiscoveredFile {
                path: entry_path.to_path_buf(),
                size,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Check if a file has a supported extension.
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                SUPPORTED_EXTENSIONS.iter().any(|fmt| *fmt == ext_lower)
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(FileDiscovery::is_supported(Path::new("test.jpg")));
        assert!(FileDiscovery::is_supported(Path::new("test.JPG")));
        assert!(FileDiscovery::is_supported(Path::new("test.png")));
        assert!(FileDiscovery::is_supported(Path::new("test.Png")));
        assert!(!FileDiscovery::is_supported(Path::new("test.jpeg")));
        assert!(!FileDiscovery::is_supported(Path::new("test.webp")));
        assert!(!FileDiscovery::is_supported(Path::new("test.txt")));
        assert!(!FileDiscovery::is_supported(Path::new("jpg")));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "notes.txt", "c.jpeg"] {
            std::fs::write(dir.path().join(name), b"data").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("deep.png"), b"data").unwrap();

        let files = FileDiscovery::new().discover(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);
        assert_eq!(FileDiscovery::total_size(&files), 8);
    }

    #[test]
    fn test_discover_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDiscovery::new()
            .discover(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Discovery { .. }));
    }

    #[test]
    fn test_total_size() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.jpg"),
                size: 100,
            },
            DiscoveredFile {
                path: PathBuf::from("b.jpg"),
                size: 200,
            },
        ];

        assert_eq!(FileDiscovery::total_size(&files), 300);
    }
}
