use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};

/// Grid height for a target width, keeping the source aspect ratio.
///
/// Truncates toward zero but never returns less than one row.
pub fn scaled_height(source_width: u32, source_height: u32, width: u32) -> u32 {
    if source_width == 0 {
        return 1;
    }
    let scale = width as f64 / source_width as f64;
    ((scale * source_height as f64) as u32).max(1)
}

/// Resize an image to `width` cells across with Lanczos3 filtering.
pub fn resize_to_width(image: &DynamicImage, width: u32) -> RgbaImage {
    let (source_width, source_height) = image.dimensions();
    let width = width.max(1);
    let height = scaled_height(source_width, source_height, width);

    image.resize_exact(width, height, FilterType::Lanczos3).to_rgba8()
}
