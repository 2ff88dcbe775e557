//! The packed mosaic: anchored pieces covering a grid.

use std::collections::BTreeMap;

use crate::types::Piece;

/// Top-left cell of a placed piece.
///
/// Ordered row-major (by `y`, then `x`), matching the packer's scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Anchor {
    pub y: u32,
    pub x: u32,
}

impl Anchor {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { y, x }
    }
}

/// One piece anchored on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    pub anchor: Anchor,
    pub piece: &'a Piece,
}

impl Placement<'_> {
    /// Cells covered by this placement, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let Anchor { x: ax, y: ay } = self.anchor;
        let shape = self.piece.shape;
        (0..shape.height).flat_map(move |dy| (0..shape.width).map(move |dx| (ax + dx, ay + dy)))
    }

    /// Check whether the placement covers a cell.
    pub fn covers(&self, x: u32, y: u32) -> bool {
        let shape = self.piece.shape;
        x >= self.anchor.x
            && y >= self.anchor.y
            && x < self.anchor.x + shape.width
            && y < self.anchor.y + shape.height
    }
}

/// A complete tiling of a grid, built once by the packer and read-only after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    width: u32,
    height: u32,
    pieces: BTreeMap<Anchor, Piece>,
}

impl Panel {
    pub(crate) fn new(width: u32, height: u32, pieces: BTreeMap<Anchor, Piece>) -> Self {
        Self {
            width,
            height,
            pieces,
        }
    }

    /// Grid bounds as (width, height) in cells.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of placed pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The piece anchored at a cell, if any.
    pub fn piece_at(&self, anchor: Anchor) -> Option<&Piece> {
        self.pieces.get(&anchor)
    }

    /// All placements in row-major anchor order.
    pub fn placements(&self) -> impl Iterator<Item = Placement<'_>> {
        self.pieces
            .iter()
            .map(|(&anchor, piece)| Placement { anchor, piece })
    }

    /// Count placed pieces by canonical shape and colour.
    ///
    /// A 1x2 and a 2x1 of the same colour count toward the same entry.
    pub fn count_pieces(&self) -> BTreeMap<Piece, usize> {
        let mut counts = BTreeMap::new();
        for piece in self.pieces.values() {
            *counts.entry(piece.canonical()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrickColour, Colour, PieceShape};

    fn red() -> BrickColour {
        BrickColour::new("Bright red (#21)", Colour::rgb(196, 40, 27))
    }

    fn panel(entries: &[((u32, u32), PieceShape)]) -> Panel {
        let pieces = entries
            .iter()
            .map(|&((x, y), shape)| (Anchor::new(x, y), Piece::new(shape, red())))
            .collect();
        Panel::new(3, 2, pieces)
    }

    #[test]
    fn test_size() {
        let p = panel(&[]);
        assert_eq!(p.size(), (3, 2));
        assert!(p.is_empty());
    }

    #[test]
    fn test_count_pieces_canonicalizes() {
        let p = panel(&[
            ((0, 0), PieceShape::new(2, 1)),
            ((2, 0), PieceShape::new(1, 2)),
            ((0, 1), PieceShape::new(2, 1)),
        ]);

        let counts = p.count_pieces();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&Piece::new(PieceShape::new(1, 2), red())], 3);
    }

    #[test]
    fn test_placements_in_scan_order() {
        let p = panel(&[
            ((0, 1), PieceShape::new(2, 1)),
            ((2, 0), PieceShape::new(1, 2)),
            ((0, 0), PieceShape::new(2, 1)),
        ]);

        let anchors: Vec<Anchor> = p.placements().map(|pl| pl.anchor).collect();
        assert_eq!(
            anchors,
            vec![Anchor::new(0, 0), Anchor::new(2, 0), Anchor::new(0, 1)]
        );
    }

    #[test]
    fn test_placement_cells() {
        let p = panel(&[((1, 0), PieceShape::new(2, 2))]);
        let placement = p.placements().next().unwrap();

        let cells: Vec<_> = placement.cells().collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (1, 1), (2, 1)]);
        assert!(placement.covers(2, 1));
        assert!(!placement.covers(0, 0));
    }
}
