//! Validation system for brick catalogs.
//!
//! Runs a suite of checks against a catalog and reports errors and
//! warnings. Used by both `brickify check` and `brickify build`, which
//! refuses to pack with a catalog that has errors.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::{plural, Printer};
use crate::types::Catalog;

/// Run all validation checks against the catalog.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_empty_colours(catalog));
    result.merge(checks::check_unit_pieces(catalog));
    result.merge(checks::check_duplicate_colours(catalog));
    result.merge(checks::check_duplicate_shapes(catalog));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let verb = d.severity.to_string();
        let line = format!("{} {}", d.message, printer.dim(&format!("[{}]", d.code)));
        match d.severity {
            Severity::Error => printer.error(&verb, &line),
            Severity::Warning => printer.warning(&verb, &line),
        }
        if let Some(help) = &d.help {
            printer.info("help", help);
        }
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.error("Failed", &format!("{}, {}", errors, warnings));
    } else {
        printer.status("Checked", &format!("{}, {}", errors, warnings));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrickColour, BuiltinCatalogs, Colour, PieceShape};

    #[test]
    fn test_validate_builtin_catalogs() {
        for name in BuiltinCatalogs::NAMES {
            let catalog = BuiltinCatalogs::get(name).unwrap();
            assert!(validate_catalog(&catalog).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_validate_collects_every_check() {
        let catalog = Catalog::new("broken")
            .with_colour(
                BrickColour::new("Black", Colour::BLACK),
                [PieceShape::new(1, 2), PieceShape::new(2, 1)],
            )
            .with_colour(BrickColour::new("Also black", Colour::BLACK), [PieceShape::UNIT])
            .with_colour(BrickColour::new("White", Colour::WHITE), Vec::<PieceShape>::new());

        let result = validate_catalog(&catalog);
        // empty-colour, missing-unit-piece, duplicate-colour
        assert_eq!(result.error_count(), 3);
        // duplicate-shape
        assert_eq!(result.warning_count(), 1);
    }
}
