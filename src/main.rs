use brickify::cli::{Cli, Commands};
use brickify::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => brickify::cli::build::run(args, &printer)?,
        Commands::Catalog(args) => brickify::cli::catalog::run(args, &printer)?,
        Commands::Check(args) => brickify::cli::check::run(args, &printer)?,
        Commands::Init(args) => brickify::cli::init::run(args, &printer)?,
        Commands::Completions(args) => brickify::cli::completions::run(args)?,
    }

    Ok(())
}
