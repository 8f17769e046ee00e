use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use shoeclean::catalog::ServiceType;
use shoeclean_app::{
    database::Db,
    domain::catalogs::{CatalogsService, PgCatalogsService, data::NewCatalog},
};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Create or replace the catalog entry for a service type
    Set(SetCatalogArgs),

    /// Print every catalog entry
    List,
}

#[derive(Debug, Args)]
struct SetCatalogArgs {
    /// DEEP_CLEANING, RAPID_CLEANING or REPAIR
    #[arg(long)]
    service_type: ServiceType,

    #[arg(long)]
    description: String,

    /// Price per pair
    #[arg(long)]
    price: Decimal,
}

pub(crate) async fn run(command: CatalogCommand, db: Db) -> Result<(), String> {
    let service = PgCatalogsService::new(db);

    match command.command {
        CatalogSubcommand::Set(args) => {
            let catalog = service
                .upsert_catalog(NewCatalog {
                    service_type: args.service_type,
                    description: args.description,
                    price: args.price,
                })
                .await
                .map_err(|error| format!("failed to set catalog: {error}"))?;

            println!("catalog_uuid: {}", catalog.uuid);
            println!("service_type: {}", catalog.service_type);
            println!("price: {}", catalog.price);
        }
        CatalogSubcommand::List => {
            let catalogs = service
                .list_catalogs()
                .await
                .map_err(|error| format!("failed to list catalogs: {error}"))?;

            for catalog in catalogs {
                println!(
                    "{}\t{}\t{}",
                    catalog.service_type, catalog.price, catalog.description
                );
            }
        }
    }

    Ok(())
}
