//! Image to palette grid conversion.
//!
//! Resizes an image to the target cell width, then maps every pixel to
//! the nearest catalog colour with optional dithering. Every colour in the
//! resulting grid is a palette member, which is what the packer requires.

mod resize;

use std::fmt;

use clap::ValueEnum;
use image::{DynamicImage, RgbaImage};
use palette::{IntoColor, Lab, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::{BrickError, Result};
use crate::types::{Colour, QuantizedGrid};

pub use resize::{resize_to_width, scaled_height};

/// Dithering method for colour quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMethod {
    /// No dithering; direct nearest-colour mapping.
    None,
    /// Ordered dithering using a Bayer 4x4 threshold matrix.
    Ordered,
    /// Floyd-Steinberg error diffusion dithering.
    #[default]
    FloydSteinberg,
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherMethod::None => write!(f, "none"),
            DitherMethod::Ordered => write!(f, "ordered"),
            DitherMethod::FloydSteinberg => write!(f, "floyd-steinberg"),
        }
    }
}

/// How "nearest" is measured when picking a palette colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColourMetric {
    /// Red-mean weighted RGB distance.
    #[default]
    Weighted,
    /// Euclidean distance in CIE L*a*b*.
    Lab,
}

impl fmt::Display for ColourMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourMetric::Weighted => write!(f, "weighted"),
            ColourMetric::Lab => write!(f, "lab"),
        }
    }
}

/// Quantization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizeOptions {
    pub dither: DitherMethod,
    pub metric: ColourMetric,
}

/// Bayer 4x4 ordered dithering threshold matrix.
/// Values are in the range [0, 16) and are normalized to [-0.5, 0.5)
/// by computing (value / 16.0 - 0.5) * spread.
const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Ordered dither strength in RGB units.
const ORDERED_SPREAD: f32 = 32.0;

/// Maps colours onto a fixed palette.
pub struct Quantizer {
    palette: Vec<Colour>,
    labs: Vec<[f32; 3]>,
    metric: ColourMetric,
}

impl Quantizer {
    pub fn new(palette: &[Colour], metric: ColourMetric) -> Result<Self> {
        if palette.is_empty() {
            return Err(BrickError::Build {
                message: "Cannot quantize to an empty palette".to_string(),
                help: Some("The catalog must define at least one colour".to_string()),
            });
        }

        Ok(Self {
            palette: palette.to_vec(),
            labs: palette.iter().map(|&c| to_lab(c)).collect(),
            metric,
        })
    }

    /// Nearest palette colour. Ties go to the earlier palette entry.
    pub fn nearest(&self, colour: Colour) -> Colour {
        self.palette[self.nearest_index(colour)]
    }

    fn nearest_index(&self, colour: Colour) -> usize {
        let mut best_index = 0;
        let mut best_dist = f32::MAX;

        match self.metric {
            ColourMetric::Weighted => {
                for (i, pc) in self.palette.iter().enumerate() {
                    let dist = colour_distance(&colour, pc) as f32;
                    if dist < best_dist {
                        best_dist = dist;
                        best_index = i;
                    }
                }
            }
            ColourMetric::Lab => {
                let lab = to_lab(colour);
                for (i, pl) in self.labs.iter().enumerate() {
                    let dist = (0..3).map(|k| (lab[k] - pl[k]).powi(2)).sum::<f32>();
                    if dist < best_dist {
                        best_dist = dist;
                        best_index = i;
                    }
                }
            }
        }

        best_index
    }

    /// Quantize an image, one grid cell per pixel.
    ///
    /// Translucent pixels are flattened over white first.
    pub fn quantize(&self, image: &RgbaImage, dither: DitherMethod) -> QuantizedGrid {
        let pixels: Vec<Vec<Colour>> = image
            .rows()
            .map(|row| {
                row.map(|p| Colour::from_rgba(p.0).flatten_over(Colour::WHITE))
                    .collect()
            })
            .collect();

        let rows = match dither {
            DitherMethod::None => self.quantize_direct(&pixels),
            DitherMethod::Ordered => self.dither_ordered(&pixels),
            DitherMethod::FloydSteinberg => self.dither_floyd_steinberg(&pixels),
        };

        let mut grid = QuantizedGrid::filled(image.width(), image.height(), self.palette[0]);
        for (y, row) in rows.iter().enumerate() {
            for (x, &colour) in row.iter().enumerate() {
                grid.set(x as u32, y as u32, colour);
            }
        }
        grid
    }

    fn quantize_direct(&self, pixels: &[Vec<Colour>]) -> Vec<Vec<Colour>> {
        pixels
            .iter()
            .map(|row| row.iter().map(|&c| self.nearest(c)).collect())
            .collect()
    }

    /// Shifts each pixel by the Bayer threshold before the nearest lookup.
    fn dither_ordered(&self, pixels: &[Vec<Colour>]) -> Vec<Vec<Colour>> {
        pixels
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, c)| {
                        let threshold = BAYER_4X4[y % 4][x % 4] as f32 / 16.0 - 0.5;
                        let offset = threshold * ORDERED_SPREAD;

                        let shift = |v: u8| (v as f32 + offset).clamp(0.0, 255.0) as u8;
                        self.nearest(Colour::rgb(shift(c.r), shift(c.g), shift(c.b)))
                    })
                    .collect()
            })
            .collect()
    }

    /// Floyd-Steinberg error diffusion, left-to-right, top-to-bottom:
    ///
    /// ```text
    ///        *   7/16
    ///  3/16 5/16 1/16
    /// ```
    fn dither_floyd_steinberg(&self, pixels: &[Vec<Colour>]) -> Vec<Vec<Colour>> {
        let height = pixels.len();
        if height == 0 {
            return vec![];
        }
        let width = pixels[0].len();

        let mut buf: Vec<Vec<[f32; 3]>> = pixels
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| [c.r as f32, c.g as f32, c.b as f32])
                    .collect()
            })
            .collect();

        let mut result = vec![vec![self.palette[0]; width]; height];

        for y in 0..height {
            for x in 0..width {
                let old = buf[y][x];
                let old_colour = Colour::rgb(
                    old[0].clamp(0.0, 255.0) as u8,
                    old[1].clamp(0.0, 255.0) as u8,
                    old[2].clamp(0.0, 255.0) as u8,
                );

                let new = self.nearest(old_colour);
                result[y][x] = new;

                let err = [
                    old[0] - new.r as f32,
                    old[1] - new.g as f32,
                    old[2] - new.b as f32,
                ];

                let neighbours: [(i64, i64, f32); 4] = [
                    (1, 0, 7.0 / 16.0),
                    (-1, 1, 3.0 / 16.0),
                    (0, 1, 5.0 / 16.0),
                    (1, 1, 1.0 / 16.0),
                ];

                for (dx, dy, weight) in neighbours {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;

                    if nx >= 0 && nx < width as i64 && ny < height as i64 {
                        let cell = &mut buf[ny as usize][nx as usize];
                        for k in 0..3 {
                            cell[k] += err[k] * weight;
                        }
                    }
                }
            }
        }

        result
    }
}

/// Resize an image to `width` cells and quantize it to `palette`.
pub fn quantize_image(
    image: &DynamicImage,
    width: u32,
    palette: &[Colour],
    options: &QuantizeOptions,
) -> Result<QuantizedGrid> {
    let quantizer = Quantizer::new(palette, options.metric)?;
    let resized = resize_to_width(image, width);
    Ok(quantizer.quantize(&resized, options.dither))
}

/// Weighted RGB colour distance.
///
/// Uses the low-cost approximation from https://www.compuphase.com/cmetric.htm
/// which weights channels based on the mean red value.
fn colour_distance(a: &Colour, b: &Colour) -> u32 {
    let rmean = (a.r as i32 + b.r as i32) / 2;
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;

    let r_weight = 512 + rmean;
    let g_weight = 1024;
    let b_weight = 512 + (255 - rmean);

    ((r_weight * dr * dr + g_weight * dg * dg + b_weight * db * db) >> 8) as u32
}

fn to_lab(colour: Colour) -> [f32; 3] {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );
    let lab: Lab = rgb.into_color();
    [lab.l, lab.a, lab.b]
}
