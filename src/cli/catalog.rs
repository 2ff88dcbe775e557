//! Catalog command implementation.
//!
//! Prints a catalog's colours and shapes to stdout.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::{BuiltinCatalogs, Catalog};

/// List the colours and shapes in a catalog
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Builtin catalog name or catalog file path
    #[arg(default_value = "all")]
    pub catalog: String,
}

pub fn run(args: CatalogArgs, printer: &Printer) -> Result<()> {
    let catalog = Catalog::resolve(&args.catalog)?;

    printer.info(
        "Catalog",
        &format!(
            "{} ({})",
            catalog.name,
            plural(catalog.len(), "colour", "colours")
        ),
    );

    if BuiltinCatalogs::get(&args.catalog).is_none() {
        printer.info("Loaded", &args.catalog);
    }

    print!("{}", format_catalog(&catalog));

    Ok(())
}

/// One line per colour: value, name and shapes in priority order.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for entry in catalog.entries() {
        let shapes: Vec<String> = entry.shapes.iter().map(|s| s.to_string()).collect();
        out.push_str(&format!(
            "{}  {:<30} {}\n",
            entry.colour.value(),
            entry.colour.name(),
            shapes.join(" ")
        ));
    }
    out
}
