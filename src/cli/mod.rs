pub mod build;
pub mod catalog;
pub mod check;
pub mod completions;
pub mod init;

use clap::{Parser, Subcommand};

/// brickify - Turn images into brick mosaics with a parts list
#[derive(Parser, Debug)]
#[command(name = "brickify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert images into mosaic previews and parts lists
    Build(build::BuildArgs),

    /// List the colours and shapes in a catalog
    Catalog(catalog::CatalogArgs),

    /// Check a catalog for problems without converting anything
    Check(check::CheckArgs),

    /// Initialize a brickify project (generates bricks.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
