//! brickify - Brick mosaic generator
//!
//! A library for turning images into brick mosaics: quantize an image to a
//! catalog's palette, greedily pack the cells into the largest pieces that
//! fit, then render a preview and count the parts.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod mosaic;
pub mod output;
pub mod quantize;
pub mod render;
pub mod report;
pub mod types;
pub mod validation;

pub use error::{BrickError, Result};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use mosaic::{pack, Anchor, Panel, Placement, TilePacker};
pub use quantize::{quantize_image, ColourMetric, DitherMethod, QuantizeOptions, Quantizer};
pub use render::{render_panel, write_png, MAX_SCALE};
pub use report::{BillOfMaterials, BomEntry};
pub use types::{
    BrickColour, BuiltinCatalogs, Catalog, CatalogEntry, Colour, Grid, Piece, PieceShape,
    QuantizedGrid,
};
pub use validation::{validate_catalog, Diagnostic, Severity, ValidationResult};
