use clap::{Args, Subcommand};
use jiff::SignedDuration;
use shoeclean_app::{
    auth::{AuthService, JwtManager, NewUser, PgAuthService, RoleName},
    database::Db,
    events::EventBus,
};
use zeroize::Zeroizing;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a user without sending a welcome email
    Register(RegisterArgs),

    /// Grant a role to an existing user
    GrantRole(GrantRoleArgs),
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "SHOECLEAN_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Args)]
struct GrantRoleArgs {
    #[arg(long)]
    email: String,

    /// ROLE_USER or ROLE_ADMIN
    #[arg(long)]
    role: RoleName,
}

pub(crate) async fn run(command: UserCommand, db: Db) -> Result<(), String> {
    // Nothing here issues tokens or delivers events.
    let (events, _receiver) = EventBus::channel(1);
    let service = PgAuthService::new(db, JwtManager::new("", SignedDuration::ZERO), events);

    match command.command {
        UserSubcommand::Register(args) => {
            let user = service
                .register(NewUser {
                    email: args.email,
                    password: Zeroizing::new(args.password),
                    name: args.name,
                    mobile: None,
                })
                .await
                .map_err(|error| format!("failed to register user: {error}"))?;

            println!("user_uuid: {}", user.uuid);
            println!("email: {}", user.email);
        }
        UserSubcommand::GrantRole(args) => {
            service
                .grant_role(&args.email, args.role)
                .await
                .map_err(|error| format!("failed to grant role: {error}"))?;

            println!("granted {} to {}", args.role, args.email);
        }
    }

    Ok(())
}
