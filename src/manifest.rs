//! Project manifest (bricks.yaml) parsing.
//!
//! The manifest holds default conversion settings so they need not be
//! repeated on every `brickify build`. Command line flags override it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BrickError, Result};
use crate::quantize::{ColourMetric, DitherMethod};
use crate::render::MAX_SCALE;

/// Default manifest file name.
pub const MANIFEST_FILENAME: &str = "bricks.yaml";

/// Project manifest loaded from bricks.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Mosaic width in cells (studs).
    pub width: u32,

    /// Builtin catalog name or path to a catalog file.
    pub catalog: String,

    /// Dithering applied while quantizing.
    pub dither: DitherMethod,

    /// Colour distance used while quantizing.
    pub metric: ColourMetric,

    /// Pixels per cell in the rendered preview.
    pub scale: u32,

    /// Draw an outline around every piece in the preview.
    pub outline: bool,

    /// Output directory for previews and parts lists.
    pub output: PathBuf,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            width: 48,
            catalog: "all".to_string(),
            dither: DitherMethod::default(),
            metric: ColourMetric::default(),
            scale: 16,
            outline: true,
            output: PathBuf::from("dist"),
        }
    }
}

impl Manifest {
    /// Load manifest from a bricks.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BrickError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load the manifest if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: Self = serde_yaml::from_str(content).map_err(|e| BrickError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })?;

        if manifest.width == 0 {
            return Err(BrickError::Parse {
                message: "Manifest width must be at least 1".to_string(),
                help: None,
            });
        }

        if manifest.scale == 0 || manifest.scale > MAX_SCALE {
            return Err(BrickError::Parse {
                message: format!(
                    "Manifest scale must be between 1 and {}, got {}",
                    MAX_SCALE, manifest.scale
                ),
                help: None,
            });
        }

        Ok(manifest)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| BrickError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }
}
