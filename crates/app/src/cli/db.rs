use clap::{Args, Subcommand};
use shoeclean_app::database;
use sqlx::PgPool;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand, pool: &PgPool) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate => {
            database::migrate(pool)
                .await
                .map_err(|error| format!("failed to apply migrations: {error}"))?;

            println!("migrations applied");

            Ok(())
        }
    }
}
