use clap::{Parser, Subcommand};

mod db;
mod products;

#[derive(Debug, Parser)]
#[command(name = "catalog-app", about = "Product Catalog CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Products(products::ProductsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Products(command) => products::run(command).await,
        }
    }
}
