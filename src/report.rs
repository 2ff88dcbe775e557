//! Bill of materials for a packed panel.
//!
//! Aggregates a panel's pieces by canonical shape and colour, then formats
//! the totals as text for the terminal or JSON for other tools.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{BrickError, Result};
use crate::mosaic::Panel;
use crate::output::plural;
use crate::types::Piece;

/// One line of the bill: a canonical piece and how many are needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomEntry {
    pub piece: Piece,
    pub count: usize,
}

/// Piece counts for one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillOfMaterials {
    pub size: (u32, u32),
    entries: Vec<BomEntry>,
}

impl BillOfMaterials {
    /// Build the bill from a panel.
    ///
    /// Entries are sorted by colour name, then largest shape first.
    pub fn from_panel(panel: &Panel) -> Self {
        let mut entries: Vec<BomEntry> = panel
            .count_pieces()
            .into_iter()
            .map(|(piece, count)| BomEntry { piece, count })
            .collect();

        entries.sort_by(|a, b| {
            a.piece
                .colour
                .name()
                .cmp(b.piece.colour.name())
                .then_with(|| b.piece.shape.area().cmp(&a.piece.shape.area()))
                .then_with(|| a.piece.shape.cmp(&b.piece.shape))
        });

        Self {
            size: panel.size(),
            entries,
        }
    }

    pub fn entries(&self) -> &[BomEntry] {
        &self.entries
    }

    /// Total number of pieces.
    pub fn total_pieces(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Total cells covered; equals the panel area for a complete tiling.
    pub fn total_cells(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.count as u64 * e.piece.shape.area())
            .sum()
    }

    /// Plain text listing, one entry per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{:>5} x {}", entry.count, entry.piece);
        }
        let _ = writeln!(
            out,
            "{} for a {}x{} panel",
            plural(self.total_pieces(), "piece", "pieces"),
            self.size.0,
            self.size.1
        );
        out
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&BomJson::from_bill(self)).map_err(|e| BrickError::Build {
            message: format!("Failed to serialize bill of materials: {}", e),
            help: None,
        })
    }

    /// Write the JSON form to a file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| BrickError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write bill of materials: {}", e),
        })?;
        Ok(())
    }
}

// --- JSON serialization types ---

#[derive(Serialize)]
struct BomJson<'a> {
    width: u32,
    height: u32,
    total_pieces: usize,
    pieces: Vec<BomJsonEntry<'a>>,
}

#[derive(Serialize)]
struct BomJsonEntry<'a> {
    shape: String,
    colour: &'a str,
    value: String,
    count: usize,
}

impl<'a> BomJson<'a> {
    fn from_bill(bill: &'a BillOfMaterials) -> Self {
        BomJson {
            width: bill.size.0,
            height: bill.size.1,
            total_pieces: bill.total_pieces(),
            pieces: bill
                .entries
                .iter()
                .map(|e| BomJsonEntry {
                    shape: e.piece.shape.to_string(),
                    colour: e.piece.colour.name(),
                    value: e.piece.colour.value().to_string(),
                    count: e.count,
                })
                .collect(),
        }
    }
}
