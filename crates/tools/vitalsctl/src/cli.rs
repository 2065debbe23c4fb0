//! Command-line interface definitions for vitalsctl.

use clap::{Args, Parser, Subcommand};

/// Account management for the vitals server.
///
/// Database settings are read from the environment (`DATABASE_URL`, or
/// `DB_HOST`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`), with a `.env` file
/// loaded first when present.
#[derive(Parser, Debug)]
#[command(name = "vitalsctl")]
#[command(about = "Vitals CLI - account setup for the vitals server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a user who can log in to the server
    CreateUser {
        #[command(flatten)]
        user: UserArgs,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Free-form role label, shown in user listings
        #[arg(long, default_value = "")]
        role: String,
    },

    /// Replace a user's password
    ResetPassword {
        #[command(flatten)]
        user: UserArgs,
    },

    /// Delete a user and all of their records
    DeleteUser {
        #[arg(long)]
        username: String,
    },

    /// Print a password hash suitable for the users table
    HashPassword {
        /// Recommended to keep this empty and set it when prompted
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// User name
    #[arg(long)]
    pub username: String,

    /// User password
    /// Recommended to keep this empty and set it when prompted
    #[arg(long)]
    pub password: Option<String>,
}
