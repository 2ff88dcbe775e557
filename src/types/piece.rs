//! Piece shapes and pieces.

use std::fmt;
use std::str::FromStr;

use crate::error::{BrickError, Result};

use super::BrickColour;

/// A rectangular footprint measured in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceShape {
    pub width: u32,
    pub height: u32,
}

impl PieceShape {
    /// The single-cell shape every colour needs so that any cell can be covered.
    pub const UNIT: Self = Self::new(1, 1);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells covered. Widened so catalog dimensions cannot overflow.
    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_square(self) -> bool {
        self.width == self.height
    }

    /// The same shape rotated by 90 degrees.
    pub fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Orientation-normalized shape with the smaller dimension first.
    pub fn canonical(self) -> Self {
        if self.width <= self.height {
            self
        } else {
            self.transposed()
        }
    }
}

impl fmt::Display for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for PieceShape {
    type Err = BrickError;

    /// Parse a `WxH` string such as `2x4`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BrickError::Parse {
            message: format!("Invalid piece shape: {}", s),
            help: Some("Use WIDTHxHEIGHT with positive integers, e.g. 2x4".to_string()),
        };

        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self::new(width, height))
    }
}

/// One purchasable unit: a shape in a colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece {
    pub shape: PieceShape,
    pub colour: BrickColour,
}

impl Piece {
    pub fn new(shape: PieceShape, colour: BrickColour) -> Self {
        Self { shape, colour }
    }

    /// The piece with its shape orientation-normalized, for reporting only.
    pub fn canonical(&self) -> Self {
        Self::new(self.shape.canonical(), self.colour.clone())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.shape, self.colour)
    }
}
