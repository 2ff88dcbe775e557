use miette::Diagnostic;
use thiserror::Error;

use crate::types::Colour;

/// Main error type for brickify operations
#[derive(Error, Diagnostic, Debug)]
pub enum BrickError {
    #[error("IO error: {0}")]
    #[diagnostic(code(brickify::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(brickify::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(brickify::image))]
    Image {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(brickify::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The grid holds a colour the catalog does not know.
    #[error("Unknown colour {colour} at ({x}, {y})")]
    #[diagnostic(
        code(brickify::unknown_colour),
        help("Quantize the image to the catalog palette before packing")
    )]
    UnknownColour { colour: Colour, x: u32, y: u32 },

    /// No allowed shape covers a cell. Only reachable when the catalog
    /// lacks a 1x1 piece for a colour present in the grid.
    #[error("No piece fits {colour} at ({x}, {y})")]
    #[diagnostic(
        code(brickify::no_fitting_piece),
        help("Every catalog colour needs a 1x1 shape; run `brickify check` on the catalog")
    )]
    NoFittingPiece { colour: String, x: u32, y: u32 },

    #[error("Build error: {message}")]
    #[diagnostic(code(brickify::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, BrickError>;
