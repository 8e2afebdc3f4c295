use clap::{Args, Subcommand};

mod import;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// Create products from a JSON array file
    Import(import::ImportArgs),
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::Import(args) => import::run(args).await,
    }
}
