//! Greedy tile packer.
//!
//! Scans the grid row-major and covers every uncovered cell with the
//! largest allowed piece that fits, never backtracking. The result is a
//! valid tiling whenever every colour in the grid has a 1x1 piece, though
//! not necessarily one with the fewest pieces.

use std::collections::{BTreeMap, HashMap};

use crate::error::{BrickError, Result};
use crate::types::{BrickColour, Catalog, Colour, Grid, Piece, PieceShape};

use super::panel::{Anchor, Panel};

/// Orientations to try for one colour, in order.
#[derive(Debug, Clone)]
struct Candidates {
    colour: BrickColour,
    orientations: Vec<PieceShape>,
}

/// Packs quantized grids into panels using a catalog.
pub struct TilePacker {
    candidates: HashMap<Colour, Candidates>,
}

impl TilePacker {
    /// Prepare a packer for a catalog.
    pub fn new(catalog: &Catalog) -> Self {
        let mut candidates = HashMap::new();
        for entry in catalog.entries() {
            candidates
                .entry(entry.colour.value())
                .or_insert_with(|| Candidates {
                    colour: entry.colour.clone(),
                    orientations: candidate_orientations(&entry.shapes),
                });
        }
        Self { candidates }
    }

    /// The orientations tried for a colour, in trial order.
    pub fn orientations(&self, colour: &Colour) -> Option<&[PieceShape]> {
        self.candidates.get(colour).map(|c| c.orientations.as_slice())
    }

    /// Cover every cell of `grid` exactly once.
    ///
    /// Fails with `UnknownColour` when the scan reaches a colour missing
    /// from the catalog, and with `NoFittingPiece` when no allowed shape
    /// covers a cell, which only happens if its colour lacks a 1x1 piece.
    pub fn pack<G: Grid + ?Sized>(&self, grid: &G) -> Result<Panel> {
        let width = grid.width();
        let height = grid.height();

        let mut coverage = Coverage::new(width, height);
        let mut pieces = BTreeMap::new();

        for y in 0..height {
            for x in 0..width {
                if coverage.is_covered(x, y) {
                    continue;
                }

                let colour = grid.colour_at(x, y);
                let candidates = self
                    .candidates
                    .get(&colour)
                    .ok_or(BrickError::UnknownColour { colour, x, y })?;

                let shape = candidates
                    .orientations
                    .iter()
                    .copied()
                    .find(|&shape| coverage.fits(grid, x, y, shape, colour))
                    .ok_or_else(|| BrickError::NoFittingPiece {
                        colour: candidates.colour.name().to_string(),
                        x,
                        y,
                    })?;

                coverage.cover(x, y, shape);
                pieces.insert(
                    Anchor::new(x, y),
                    Piece::new(shape, candidates.colour.clone()),
                );
            }
        }

        Ok(Panel::new(width, height, pieces))
    }
}

/// Pack a grid with a catalog in one call.
pub fn pack<G: Grid + ?Sized>(grid: &G, catalog: &Catalog) -> Result<Panel> {
    TilePacker::new(catalog).pack(grid)
}

/// Order shapes largest area first, ties kept in declaration order, each
/// followed by its transpose. Squares and repeated orientations appear once.
fn candidate_orientations(shapes: &[PieceShape]) -> Vec<PieceShape> {
    let mut by_area = shapes.to_vec();
    by_area.sort_by(|a, b| b.area().cmp(&a.area()));

    let mut orientations = Vec::with_capacity(by_area.len() * 2);
    for shape in by_area {
        for orientation in [shape, shape.transposed()] {
            if !orientations.contains(&orientation) {
                orientations.push(orientation);
            }
        }
    }
    orientations
}

/// Which cells are already covered.
struct Coverage {
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl Coverage {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            covered: vec![false; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn is_covered(&self, x: u32, y: u32) -> bool {
        self.covered[self.index(x, y)]
    }

    /// In bounds, uncovered, and a single colour throughout.
    fn fits<G: Grid + ?Sized>(
        &self,
        grid: &G,
        x: u32,
        y: u32,
        shape: PieceShape,
        colour: Colour,
    ) -> bool {
        let in_bounds = x as u64 + shape.width as u64 <= self.width as u64
            && y as u64 + shape.height as u64 <= self.height as u64;
        if !in_bounds {
            return false;
        }

        (y..y + shape.height).all(|cy| {
            (x..x + shape.width)
                .all(|cx| !self.is_covered(cx, cy) && grid.colour_at(cx, cy) == colour)
        })
    }

    fn cover(&mut self, x: u32, y: u32, shape: PieceShape) {
        for cy in y..y + shape.height {
            for cx in x..x + shape.width {
                let i = self.index(cx, cy);
                self.covered[i] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuiltinCatalogs, QuantizedGrid};
    use pretty_assertions::assert_eq;

    const A: Colour = Colour::rgb(242, 243, 242);
    const B: Colour = Colour::rgb(27, 42, 52);

    fn colour_a() -> BrickColour {
        BrickColour::new("White (#1)", A)
    }

    fn colour_b() -> BrickColour {
        BrickColour::new("Black (#26)", B)
    }

    fn catalog(a: &[PieceShape], b: &[PieceShape]) -> Catalog {
        Catalog::new("test")
            .with_colour(colour_a(), a.to_vec())
            .with_colour(colour_b(), b.to_vec())
    }

    /// A takes 1x2 pieces, B only 1x1.
    fn domino_catalog() -> Catalog {
        catalog(&[shape(1, 2), PieceShape::UNIT], &[PieceShape::UNIT])
    }

    fn shape(w: u32, h: u32) -> PieceShape {
        PieceShape::new(w, h)
    }

    /// Small deterministic generator so property checks cover many layouts.
    fn noisy_grid(width: u32, height: u32, seed: u64) -> QuantizedGrid {
        let mut state = seed;
        let mut grid = QuantizedGrid::filled(width, height, A);
        for y in 0..height {
            for x in 0..width {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                // Bias toward runs so larger pieces get placed too.
                if (state >> 33) % 3 == 0 {
                    grid.set(x, y, B);
                }
            }
        }
        grid
    }

    fn assert_valid_tiling(grid: &QuantizedGrid, panel: &Panel) {
        let (w, h) = panel.size();
        assert_eq!((w, h), (grid.width(), grid.height()));

        let mut owner: Vec<Option<Anchor>> = vec![None; (w * h) as usize];
        for placement in panel.placements() {
            for (x, y) in placement.cells() {
                assert!(x < w && y < h, "cell ({}, {}) out of bounds", x, y);
                let slot = &mut owner[(y * w + x) as usize];
                assert!(slot.is_none(), "cell ({}, {}) covered twice", x, y);
                *slot = Some(placement.anchor);
                assert_eq!(grid.colour_at(x, y), placement.piece.colour.value());
            }
        }
        assert!(owner.iter().all(Option::is_some), "grid not fully covered");
    }

    #[test]
    fn test_single_cell() {
        let grid = QuantizedGrid::filled(1, 1, A);
        let panel = pack(&grid, &catalog(&[PieceShape::UNIT], &[PieceShape::UNIT])).unwrap();

        assert_eq!(panel.len(), 1);
        let placement = panel.placements().next().unwrap();
        assert_eq!(placement.anchor, Anchor::new(0, 0));
        assert_eq!(placement.piece.shape, PieceShape::UNIT);
    }

    #[test]
    fn test_two_cells_use_one_transposed_piece() {
        let grid = QuantizedGrid::filled(2, 1, A);
        let panel = pack(&grid, &domino_catalog()).unwrap();

        assert_eq!(panel.len(), 1);
        let piece = panel.piece_at(Anchor::new(0, 0)).unwrap();
        assert_eq!(piece.shape, shape(2, 1));
        assert_eq!(piece.colour, colour_a());
    }

    #[test]
    fn test_stored_orientation_preferred() {
        let grid = QuantizedGrid::filled(2, 2, A);
        let panel = pack(&grid, &domino_catalog()).unwrap();

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.piece_at(Anchor::new(0, 0)).unwrap().shape, shape(1, 2));
        assert_eq!(panel.piece_at(Anchor::new(1, 0)).unwrap().shape, shape(1, 2));
    }

    #[test]
    fn test_transpose_then_unit_fallback() {
        let grid = QuantizedGrid::filled(3, 1, A);
        let panel = pack(&grid, &domino_catalog()).unwrap();

        assert_eq!(panel.piece_at(Anchor::new(0, 0)).unwrap().shape, shape(2, 1));
        assert_eq!(panel.piece_at(Anchor::new(2, 0)).unwrap().shape, PieceShape::UNIT);
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn test_pieces_do_not_straddle_colours() {
        let grid = QuantizedGrid::from_rows(&[vec![A, A, B, B]]);
        let shapes = [shape(1, 2), PieceShape::UNIT];
        let panel = pack(&grid, &catalog(&shapes, &shapes)).unwrap();

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.piece_at(Anchor::new(0, 0)).unwrap().colour, colour_a());
        assert_eq!(panel.piece_at(Anchor::new(2, 0)).unwrap().colour, colour_b());
        assert_valid_tiling(&grid, &panel);
    }

    #[test]
    fn test_largest_area_first() {
        let grid = QuantizedGrid::filled(4, 4, A);
        let panel = pack(&grid, &BuiltinCatalogs::basic()).unwrap();

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.piece_at(Anchor::new(0, 0)).unwrap().shape, shape(2, 4));
        assert_eq!(panel.piece_at(Anchor::new(2, 0)).unwrap().shape, shape(2, 4));
    }

    #[test]
    fn test_area_ties_follow_declaration_order() {
        let grid = QuantizedGrid::filled(4, 2, A);
        let panel = pack(&grid, &BuiltinCatalogs::basic()).unwrap();
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.piece_at(Anchor::new(0, 0)).unwrap().shape, shape(4, 2));

        // 1x4 and 2x2 share an area and both fit; 1x4 is declared first.
        let grid = QuantizedGrid::filled(4, 3, A);
        let catalog = catalog(&[shape(1, 4), shape(2, 2), PieceShape::UNIT], &[PieceShape::UNIT]);
        let panel = pack(&grid, &catalog).unwrap();
        assert_eq!(panel.piece_at(Anchor::new(0, 0)).unwrap().shape, shape(4, 1));
    }

    #[test]
    fn test_candidate_orientations() {
        let orientations = candidate_orientations(&[
            PieceShape::UNIT,
            shape(1, 2),
            shape(2, 2),
            shape(2, 1),
            shape(1, 4),
        ]);
        assert_eq!(
            orientations,
            vec![shape(2, 2), shape(1, 4), shape(4, 1), shape(1, 2), shape(2, 1), PieceShape::UNIT]
        );
    }

    #[test]
    fn test_unknown_colour() {
        let grid = QuantizedGrid::from_rows(&[vec![A, Colour::rgb(1, 2, 3)]]);
        let err = pack(&grid, &catalog(&[PieceShape::UNIT], &[PieceShape::UNIT])).unwrap_err();

        match err {
            BrickError::UnknownColour { colour, x, y } => {
                assert_eq!(colour, Colour::rgb(1, 2, 3));
                assert_eq!((x, y), (1, 0));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_unit_piece_fails() {
        let grid = QuantizedGrid::from_rows(&[vec![A, B, A]]);
        let err = pack(&grid, &catalog(&[shape(1, 2)], &[PieceShape::UNIT])).unwrap_err();

        match err {
            BrickError::NoFittingPiece { colour, x, y } => {
                assert_eq!(colour, "White (#1)");
                assert_eq!((x, y), (0, 0));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = QuantizedGrid::filled(0, 0, A);
        let panel = pack(&grid, &BuiltinCatalogs::basic()).unwrap();
        assert!(panel.is_empty());
        assert_eq!(panel.size(), (0, 0));
    }

    #[test]
    fn test_random_grids_tile_exactly() {
        let catalog = BuiltinCatalogs::all();
        let a = catalog.colours().next().unwrap().value();
        assert_eq!(a, A);

        for seed in 0..20 {
            let grid = noisy_grid(13, 9, seed);
            let panel = pack(&grid, &catalog).unwrap();
            assert_valid_tiling(&grid, &panel);
        }
    }

    #[test]
    fn test_unit_only_counts_sum_to_area() {
        let grid = noisy_grid(7, 5, 42);
        let panel = pack(&grid, &catalog(&[PieceShape::UNIT], &[PieceShape::UNIT])).unwrap();

        let total: usize = panel.count_pieces().values().sum();
        assert_eq!(total, 35);
    }

    #[test]
    fn test_pack_is_deterministic() {
        let grid = noisy_grid(16, 12, 7);
        let catalog = BuiltinCatalogs::all();

        let first = pack(&grid, &catalog).unwrap();
        let second = TilePacker::new(&catalog).pack(&grid).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_oversized_catalog_shape_is_skipped() {
        let yaml = concat!(
            "colours:\n",
            "  - name: Black\n",
            "    value: \"#1B2A34\"\n",
            "    shapes: [70000x70000, 1x1]\n",
        );
        let catalog = Catalog::parse(yaml, "huge").unwrap();
        let packer = TilePacker::new(&catalog);
        assert_eq!(
            packer.orientations(&B).unwrap(),
            &[shape(70000, 70000), PieceShape::UNIT]
        );

        let grid = QuantizedGrid::filled(2, 2, B);
        let panel = packer.pack(&grid).unwrap();
        assert_eq!(panel.len(), 4);
        assert_valid_tiling(&grid, &panel);
    }
}
