use clap::{Args, Subcommand};
use mealbox_app::domain::users::{PgUsersRepository, UsersRepository, models::Role};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Give an existing user the admin role
    GrantAdmin(RoleArgs),

    /// Return an admin to the customer role
    RevokeAdmin(RoleArgs),
}

#[derive(Debug, Args)]
struct RoleArgs {
    /// Email address of the user
    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    let (args, role) = match command.command {
        UserSubcommand::GrantAdmin(args) => (args, Role::Admin),
        UserSubcommand::RevokeAdmin(args) => (args, Role::Customer),
    };

    let repository = PgUsersRepository::new(args.database.connect().await?);

    let changed = repository
        .set_role(&args.email, role)
        .await
        .map_err(|error| format!("failed to update role: {error}"))?;

    if changed == 0 {
        return Err(format!("no user with email {}", args.email));
    }

    println!("{} is now {role}", args.email);

    Ok(())
}
