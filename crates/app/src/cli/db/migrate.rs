use clap::Args;
use catalog_app::database;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let migrator = sqlx::migrate!("../../migrations");

    migrator
        .run(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    println!("applied {} migration(s)", migrator.iter().count());

    pool.close().await;

    Ok(())
}
