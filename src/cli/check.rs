use clap::Args;

use crate::error::{BrickError, Result};
use crate::output::Printer;
use crate::types::Catalog;
use crate::validation::{print_diagnostics, validate_catalog};

/// Check a catalog for problems without converting anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Builtin catalog names or catalog file paths
    #[arg(default_value = "all")]
    pub catalogs: Vec<String>,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let mut failed = Vec::new();

    for name in &args.catalogs {
        let catalog = Catalog::resolve(name)?;
        printer.status("Checking", &catalog.name);

        let result = validate_catalog(&catalog);
        print_diagnostics(&result, printer);
        if result.has_errors() {
            failed.push(catalog.name);
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(BrickError::Build {
            message: format!("Catalog check failed: {}", failed.join(", ")),
            help: None,
        })
    }
}
