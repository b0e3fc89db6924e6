use std::sync::Arc;

use clap::{Args, Subcommand};
use mealbox_app::domain::delivery_costs::{
    DefaultDeliveryCostsService, DeliveryCostsService, PgDeliveryCostsRepository,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DeliveryCostCommand {
    #[command(subcommand)]
    command: DeliveryCostSubcommand,
}

#[derive(Debug, Subcommand)]
enum DeliveryCostSubcommand {
    /// Add or replace the cost for one location
    Set(SetArgs),

    /// Remove one location
    Remove(LocationArgs),

    /// Print every location and its cost
    List(DatabaseArgs),
}

#[derive(Debug, Args)]
struct LocationArgs {
    #[arg(long)]
    state: String,

    #[arg(long)]
    lga: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Cost in minor units
    #[arg(long, allow_negative_numbers = true)]
    cost: i64,

    #[command(flatten)]
    location: LocationArgs,
}

async fn service(database: &DatabaseArgs) -> Result<DefaultDeliveryCostsService, String> {
    let db = database.connect().await?;

    Ok(DefaultDeliveryCostsService::new(Arc::new(
        PgDeliveryCostsRepository::new(db),
    )))
}

pub(crate) async fn run(command: DeliveryCostCommand) -> Result<(), String> {
    match command.command {
        DeliveryCostSubcommand::Set(args) => {
            let location = service(&args.location.database)
                .await?
                .add_location(&args.location.state, &args.location.lga, args.cost)
                .await
                .map_err(|error| format!("failed to set delivery cost: {error}"))?;

            println!("{} / {}: {}", location.state, location.lga, location.cost);
        }
        DeliveryCostSubcommand::Remove(args) => {
            service(&args.database)
                .await?
                .remove_location(&args.state, &args.lga)
                .await
                .map_err(|error| format!("failed to remove delivery cost: {error}"))?;

            println!("removed {} / {}", args.state, args.lga);
        }
        DeliveryCostSubcommand::List(database) => {
            let locations = service(&database)
                .await?
                .all_locations()
                .await
                .map_err(|error| format!("failed to list delivery costs: {error}"))?;

            for location in locations {
                println!("{}\t{}\t{}", location.state, location.lga, location.cost);
            }
        }
    }

    Ok(())
}
