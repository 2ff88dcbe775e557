//! Validation checks for brick catalogs.
//!
//! Each check takes a `&Catalog` and returns a `ValidationResult`.

use std::collections::HashMap;

use crate::types::{Catalog, Colour, PieceShape};

use super::warning::{Diagnostic, ValidationResult};

/// Every colour needs a 1x1 piece, or an isolated cell of that colour
/// cannot be covered.
pub fn check_unit_pieces(catalog: &Catalog) -> ValidationResult {
    catalog
        .entries()
        .iter()
        .filter(|entry| !entry.shapes.is_empty() && !entry.has_unit_piece())
        .map(|entry| {
            Diagnostic::error(
                "brickify::check::missing-unit-piece",
                format!("Colour '{}' has no 1x1 piece", entry.colour),
            )
            .with_help("Add 1x1 to its shapes so any pixel of this colour can be covered")
        })
        .collect()
}

/// Colours are identified by value; a repeated value shadows the later entry.
pub fn check_duplicate_colours(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<Colour, &str> = HashMap::new();

    for entry in catalog.entries() {
        let value = entry.colour.value();
        if let Some(first) = seen.get(&value) {
            result.push(
                Diagnostic::error(
                    "brickify::check::duplicate-colour",
                    format!(
                        "Colour '{}' has the same value {} as '{}'",
                        entry.colour, value, first
                    ),
                )
                .with_help("Merge the shape lists into one entry"),
            );
        } else {
            seen.insert(value, entry.colour.name());
        }
    }

    result
}

/// A shape listed twice, directly or as its transpose, is tried twice.
pub fn check_duplicate_shapes(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    for entry in catalog.entries() {
        let mut seen: Vec<PieceShape> = Vec::new();
        for shape in &entry.shapes {
            if seen.contains(&shape.canonical()) {
                result.push(Diagnostic::warning(
                    "brickify::check::duplicate-shape",
                    format!(
                        "Colour '{}' lists {} twice (both orientations are always tried)",
                        entry.colour, shape
                    ),
                ));
            } else {
                seen.push(shape.canonical());
            }
        }
    }

    result
}

/// A colour without shapes makes every pixel of it fail to pack.
pub fn check_empty_colours(catalog: &Catalog) -> ValidationResult {
    catalog
        .entries()
        .iter()
        .filter(|entry| entry.shapes.is_empty())
        .map(|entry| {
            Diagnostic::error(
                "brickify::check::empty-colour",
                format!("Colour '{}' lists no shapes", entry.colour),
            )
            .with_help("Remove the colour or give it at least a 1x1 shape")
        })
        .collect()
}
