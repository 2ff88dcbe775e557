//! Core domain types for brickify.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` / `BrickColour` - RGBA values and named brick colours
//! - `PieceShape` / `Piece` - rectangular footprints and purchasable pieces
//! - `Catalog` - which shapes are available in which colours
//! - `Grid` - the quantized cell grid the packer reads

mod catalog;
mod colour;
mod grid;
mod piece;

pub use catalog::{BuiltinCatalogs, Catalog, CatalogEntry};
pub use colour::{BrickColour, Colour};
pub use grid::{Grid, QuantizedGrid};
pub use piece::{Piece, PieceShape};
