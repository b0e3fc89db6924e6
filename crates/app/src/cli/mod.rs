use clap::{Parser, Subcommand};

mod db;
mod delivery_cost;
mod user;

#[derive(Debug, Parser)]
#[command(name = "mealbox-app", about = "Mealbox CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    DeliveryCost(delivery_cost::DeliveryCostCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::DeliveryCost(command) => delivery_cost::run(command).await,
        }
    }
}

/// Connection string shared by every subcommand.
#[derive(Debug, clap::Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Admin commands run one at a time.
const CLI_MAX_CONNECTIONS: u32 = 2;

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<mealbox_app::database::Db, String> {
        let pool = mealbox_app::database::connect(&self.database_url, CLI_MAX_CONNECTIONS)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        Ok(mealbox_app::database::Db::new(pool))
    }
}
