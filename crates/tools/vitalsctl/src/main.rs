mod cli;
mod commands;
mod error;
mod prelude;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{
    handle_create_user, handle_delete_user, handle_hash_password, handle_reset_password,
};
use prelude::*;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    pretty_env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateUser {
            user,
            first_name,
            last_name,
            role,
        } => handle_create_user(user, first_name, last_name, role),
        Commands::ResetPassword { user } => handle_reset_password(user),
        Commands::DeleteUser { username } => handle_delete_user(&username),
        Commands::HashPassword { password } => handle_hash_password(password),
    };

    if let Err(ref e) = result {
        log::error!("Error: {}", e);
    }

    result
}
