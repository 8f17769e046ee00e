use clap::{Args, Parser, Subcommand};
use shoeclean_app::database::{self, Db};

mod catalog;
mod db;
mod user;
mod voucher;

#[derive(Debug, Parser)]
#[command(name = "shoeclean-app", about = "Shoeclean administration", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog(catalog::CatalogCommand),
    Voucher(voucher::VoucherCommand),
    User(user::UserCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let url = self
            .database
            .database_url
            .ok_or_else(|| "DATABASE_URL or --database-url is required".to_string())?;

        let pool = database::connect(&url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command, &pool).await,
            Commands::Catalog(command) => catalog::run(command, Db::new(pool)).await,
            Commands::Voucher(command) => voucher::run(command, Db::new(pool)).await,
            Commands::User(command) => user::run(command, Db::new(pool)).await,
        }
    }
}
