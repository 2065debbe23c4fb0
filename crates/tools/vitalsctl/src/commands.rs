use vitals_auth::secret_hash::generate_password_hash;
use vitals_models::{
    db::{config::DbConfig, connection::DbConnection},
    users::user::{User, UserCreate},
};

use crate::{cli::UserArgs, prelude::*};

fn connect() -> Result<DbConnection> {
    Ok(DbConnection::new(&DbConfig::from_env()?)?.setup()?)
}

/// Uses the given password, prompting for one when it was not passed.
fn resolve_password(password: Option<String>) -> Result<String> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password > ")?,
    };

    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }
    Ok(password)
}

pub fn handle_create_user(
    args: UserArgs,
    first_name: String,
    last_name: String,
    role: String,
) -> Result<()> {
    let password = resolve_password(args.password)?;
    let connection = connect()?;

    if User::fetch_by_username(&args.username, &connection)?.is_some() {
        return Err(Error::UserExists(args.username));
    }

    let user = UserCreate {
        first_name,
        last_name,
        role,
        user_name: args.username,
        password_hash: generate_password_hash(&password)?,
    }
    .save(&connection)?;

    log::info!("Created user {}", user.id);
    println!("Created user '{}' with id {}", user.user_name, user.id);
    Ok(())
}

pub fn handle_reset_password(args: UserArgs) -> Result<()> {
    let password = resolve_password(args.password)?;
    let connection = connect()?;

    let user = User::fetch_by_username(&args.username, &connection)?
        .ok_or_else(|| Error::UserNotFound(args.username.clone()))?;
    User::update_password_hash(user.id, &generate_password_hash(&password)?, &connection)?;

    log::info!("Reset password of user {}", user.id);
    println!("Password of '{}' updated", user.user_name);
    Ok(())
}

pub fn handle_delete_user(username: &str) -> Result<()> {
    let connection = connect()?;

    let user = User::delete_by_username(username, &connection)?
        .ok_or_else(|| Error::UserNotFound(String::from(username)))?;

    log::info!("Deleted user {}", user.id);
    println!("Deleted user '{}'", user.user_name);
    Ok(())
}

pub fn handle_hash_password(password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    println!("{}", generate_password_hash(&password)?);
    Ok(())
}
