use std::path::PathBuf;

use catalog_app::{
    database::{self, Db},
    products::{
        PgProductsService, ProductsService,
        data::{NewProduct, ProductSubmission},
    },
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// JSON file holding an array of product objects
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), String> {
    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let products = parse_products(&contents)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool.clone()));

    for product in products {
        let created = service
            .create_product(product)
            .await
            .map_err(|error| format!("failed to create product: {error}"))?;

        println!("{}\t{}", created.uuid, created.name);
    }

    pool.close().await;

    Ok(())
}

/// Validate every entry up front so a bad file imports nothing.
fn parse_products(contents: &str) -> Result<Vec<NewProduct>, String> {
    let submissions: Vec<ProductSubmission> =
        serde_json::from_str(contents).map_err(|error| format!("invalid product file: {error}"))?;

    submissions
        .into_iter()
        .enumerate()
        .map(|(index, submission)| {
            NewProduct::try_from(submission).map_err(|error| format!("entry {index}: {error}"))
        })
        .collect()
}
