//! Read-only colour grids consumed by the packer.

use super::Colour;

/// A bounded grid where every cell resolves to exactly one colour.
///
/// Reads are total over `[0, width) x [0, height)`.
pub trait Grid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn colour_at(&self, x: u32, y: u32) -> Colour;
}

/// An owned, palette-quantized grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedGrid {
    width: u32,
    height: u32,
    cells: Vec<Colour>,
}

impl QuantizedGrid {
    /// Create a grid filled with one colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            cells: vec![colour; width as usize * height as usize],
        }
    }

    /// Create a grid from rows (`rows[y][x]`).
    ///
    /// Rows shorter than the first row are padded with their last colour;
    /// longer rows are truncated.
    pub fn from_rows(rows: &[Vec<Colour>]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            let pad = row.last().copied().unwrap_or_default();
            cells.extend((0..width as usize).map(|x| row.get(x).copied().unwrap_or(pad)));
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Set a single cell.
    pub fn set(&mut self, x: u32, y: u32, colour: Colour) {
        let i = self.offset(x, y);
        self.cells[i] = colour;
    }

    /// Distinct colours present, in scan order of first appearance.
    pub fn distinct_colours(&self) -> Vec<Colour> {
        let mut seen = Vec::new();
        for &c in &self.cells {
            if !seen.contains(&c) {
                seen.push(c);
            }
        }
        seen
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Grid for QuantizedGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn colour_at(&self, x: u32, y: u32) -> Colour {
        self.cells[self.offset(x, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let red = Colour::rgb(255, 0, 0);
        let grid = QuantizedGrid::from_rows(&[
            vec![red, Colour::WHITE],
            vec![Colour::BLACK, red],
        ]);

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.colour_at(1, 0), Colour::WHITE);
        assert_eq!(grid.colour_at(0, 1), Colour::BLACK);
        assert_eq!(grid.distinct_colours(), vec![red, Colour::WHITE, Colour::BLACK]);
    }

    #[test]
    fn test_from_rows_ragged() {
        let grid = QuantizedGrid::from_rows(&[
            vec![Colour::WHITE, Colour::WHITE, Colour::WHITE],
            vec![Colour::BLACK],
        ]);

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.colour_at(2, 1), Colour::BLACK);
    }

    #[test]
    fn test_set() {
        let mut grid = QuantizedGrid::filled(3, 2, Colour::WHITE);
        grid.set(2, 1, Colour::BLACK);
        assert_eq!(grid.colour_at(2, 1), Colour::BLACK);
        assert_eq!(grid.colour_at(1, 1), Colour::WHITE);
    }
}
