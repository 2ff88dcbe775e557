//! Panel renderer - draws placed pieces as filled rectangles.

use image::{Rgba, RgbaImage};

use crate::error::{BrickError, Result};
use crate::mosaic::Panel;
use crate::types::Colour;

/// Largest accepted pixels-per-cell scale.
pub const MAX_SCALE: u32 = 256;

/// Render a panel at `scale` pixels per cell.
///
/// The background is white. With `outline`, each piece gets a one pixel
/// black ring and a one pixel white ring inside it before the piece colour
/// fills the rest. A scale of 0 is treated as 1.
///
/// Fails when the image would not fit in memory addressable by `u32`
/// pixel coordinates.
pub fn render_panel(panel: &Panel, scale: u32, outline: bool) -> Result<RgbaImage> {
    let scale = scale.max(1);
    let (width, height) = panel.size();
    let (img_width, img_height) = image_size(width, height, scale)?;

    let mut img = RgbaImage::from_pixel(img_width, img_height, Rgba(Colour::WHITE.to_rgba()));

    // Placements lie inside the panel, so these products are bounded by
    // the image size checked above.
    for placement in panel.placements() {
        let shape = placement.piece.shape;
        let mut rect = Rect {
            x0: placement.anchor.x * scale,
            y0: placement.anchor.y * scale,
            x1: (placement.anchor.x + shape.width) * scale,
            y1: (placement.anchor.y + shape.height) * scale,
        };

        if outline {
            fill_rect(&mut img, rect, Colour::BLACK);
            rect = rect.inset(1);
            fill_rect(&mut img, rect, Colour::WHITE);
            rect = rect.inset(1);
        }

        fill_rect(&mut img, rect, placement.piece.colour.value());
    }

    Ok(img)
}

/// Pixel dimensions of a `width` x `height` panel at `scale`.
fn image_size(width: u32, height: u32, scale: u32) -> Result<(u32, u32)> {
    let too_large = || BrickError::Build {
        message: format!(
            "A {}x{} panel at scale {} is too large to render",
            width, height, scale
        ),
        help: Some("Lower --scale or --width".to_string()),
    };

    let img_width = width.checked_mul(scale).ok_or_else(too_large)?;
    let img_height = height.checked_mul(scale).ok_or_else(too_large)?;

    // RGBA buffer length must also be addressable.
    (img_width as usize)
        .checked_mul(img_height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(too_large)?;

    Ok((img_width, img_height))
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Rect {
    fn inset(self, by: u32) -> Self {
        Self {
            x0: self.x0 + by,
            y0: self.y0 + by,
            x1: self.x1.saturating_sub(by),
            y1: self.y1.saturating_sub(by),
        }
    }
}

/// Fill a rectangle; empty rectangles draw nothing.
fn fill_rect(img: &mut RgbaImage, rect: Rect, colour: Colour) {
    let rgba = Rgba(colour.to_rgba());
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            img.put_pixel(x, y, rgba);
        }
    }
}
