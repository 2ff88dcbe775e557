//! PNG output for rendered panels.

use std::path::Path;

use image::RgbaImage;

use crate::error::{BrickError, Result};

/// Write a rendered image to a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| BrickError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}
