//! Command-line flags for a batch run.

use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use watermarker_core::config::{expand_path, DEFAULT_ANGLE, DEFAULT_OPACITY};
use watermarker_core::{BatchConfig, LoggingConfig, Resolution};

/// Flags describing one batch; `--config` replaces all of them.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Folder with the source photos
    #[arg(default_value = ".")]
    pub inputfolder: PathBuf,

    /// Folder the results are written to
    #[arg(default_value = ".")]
    pub outfolder: PathBuf,

    /// Resize onto a WIDTH x HEIGHT canvas
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub resolution: Option<Vec<u32>>,

    /// Watermark opacity, 0.0 to 1.0
    #[arg(short, long, default_value_t = DEFAULT_OPACITY)]
    pub opacity: f32,

    /// Text watermark rotation in degrees, counter-clockwise
    #[arg(short, long, default_value_t = DEFAULT_ANGLE, allow_negative_numbers = true)]
    pub angle: f32,

    /// Stamp this text across every image
    #[arg(short, long)]
    pub text: Option<String>,

    /// Stamp this image into the bottom-right corner
    #[arg(short, long)]
    pub imagewatermark: Option<PathBuf>,

    /// Font file for the text watermark (defaults to the system Verdana)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Read every setting from a TOML config file instead
    #[arg(
        short,
        long,
        conflicts_with_all = [
            "inputfolder",
            "outfolder",
            "resolution",
            "opacity",
            "angle",
            "text",
            "imagewatermark",
            "font",
        ]
    )]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// Build the run configuration plus any `[logging]` table from the file.
    pub fn load(&self) -> anyhow::Result<(BatchConfig, LoggingConfig)> {
        match &self.config {
            Some(path) => {
                let path = expand(path);
                BatchConfig::load_from(&path)
                    .with_context(|| format!("Failed to load config file {}", path.display()))
            }
            None => Ok((self.to_config(), LoggingConfig::default())),
        }
    }

    /// Translate the flags; an empty `--text` counts as no text.
    pub fn to_config(&self) -> BatchConfig {
        BatchConfig {
            input_dir: expand(&self.inputfolder),
            output_dir: expand(&self.outfolder),
            resolution: self
                .resolution
                .as_deref()
                .and_then(|dims| match dims {
                    [width, height] => Some(Resolution::new(*width, *height)),
                    _ => None,
                }),
            text: self.text.clone().filter(|t| !t.is_empty()),
            image_watermark: self.imagewatermark.as_deref().map(expand),
            opacity: self.opacity,
            angle: self.angle,
            font: self.font.as_deref().map(expand),
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    expand_path(&path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        run: RunArgs,
    }

    fn parse(args: &[&str]) -> Result<RunArgs, clap::Error> {
        let mut argv = vec!["watermarker"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).map(|cli| cli.run)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap().to_config();
        assert_eq!(config, BatchConfig::default());
        assert!(!config.has_work());
    }

    #[test]
    fn test_all_flags() {
        let config = parse(&[
            "photos", "out", "-r", "900", "600", "-o", "0.8", "-a", "10", "-t", "proof", "-i",
            "logo.png", "--font", "Custom.ttf",
        ])
        .unwrap()
        .to_config();

        assert_eq!(config.input_dir, PathBuf::from("photos"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.resolution, Some(Resolution::new(900, 600)));
        assert_eq!(config.opacity, 0.8);
        assert_eq!(config.angle, 10.0);
        assert_eq!(config.text.as_deref(), Some("proof"));
        assert_eq!(config.image_watermark, Some(PathBuf::from("logo.png")));
        assert_eq!(config.font, Some(PathBuf::from("Custom.ttf")));
    }

    #[test]
    fn test_negative_angle() {
        let args = parse(&["-t", "x", "-a", "-15"]).unwrap();
        assert_eq!(args.angle, -15.0);
    }

    #[test]
    fn test_resolution_needs_two_values() {
        assert!(parse(&["-r", "900"]).is_err());
    }

    #[test]
    fn test_resolution_rejects_zero() {
        assert!(parse(&["-r", "0", "600"]).is_err());
    }

    #[test]
    fn test_empty_text_disables_pass() {
        let config = parse(&["-t", ""]).unwrap().to_config();
        assert_eq!(config.text, None);
    }

    #[test]
    fn test_config_conflicts_with_stage_flags() {
        assert!(parse(&["-c", "wm.toml", "-t", "proof"]).is_err());
        assert!(parse(&["-c", "wm.toml", "photos"]).is_err());
        assert!(parse(&["-c", "wm.toml"]).is_ok());
    }

    #[test]
    fn test_load_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wm.toml");
        std::fs::write(
            &path,
            r#"
[WATERMARKER]
inputfolder = "in"
outfolder = "out"
resolution = "640,480"
opacity = 0.5
angle = 0
text = ""
imagewatermark = ""

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let args = parse(&["-c", path.to_str().unwrap()]).unwrap();
        let (config, logging) = args.load().unwrap();
        assert_eq!(config.resolution, Some(Resolution::new(640, 480)));
        assert_eq!(config.opacity, 0.5);
        assert_eq!(config.text, None);
        assert_eq!(logging.level, "debug");
    }

    #[test]
    fn test_load_missing_config_file_names_path() {
        let args = parse(&["-c", "/definitely/not/here.toml"]).unwrap();
        let err = args.load().unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }
}
