use diesel_migrations::MigrationHarness;
use vitals_models::db::{
    config::DbConfig,
    connection::{DbConnection, MIGRATIONS},
};
use vitals_models::users::user::{User, UserCreate};

/// Fresh, migrated database that is rolled back when dropped.
pub struct DBTestContext {
    pub conn: DbConnection,
}

impl DBTestContext {
    pub fn from_env() -> Self {
        let config = DbConfig::from_env().expect("DATABASE_URL must be set for database tests");
        let conn = DbConnection::new(&config)
            .expect("Cannot connect to database")
            .setup()
            .expect("Failed to run database migrations");
        Self { conn }
    }

    pub fn create_user(&self, name: &str) -> User {
        UserCreate {
            first_name: String::from("Test"),
            last_name: String::from("User"),
            role: String::from("user"),
            user_name: String::from(name),
            password_hash: String::from("$argon2id$placeholder"),
        }
        .save(&self.conn)
        .expect("Failed to create user")
    }
}

impl Drop for DBTestContext {
    fn drop(&mut self) {
        let mut conn = self.conn.pool.get().expect("Failed to get a connection");
        conn.revert_all_migrations(MIGRATIONS)
            .expect("Failed to revert changes to db");
    }
}
