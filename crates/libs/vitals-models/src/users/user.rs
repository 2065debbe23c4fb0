//! User account model.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{db::connection::DbConnection, prelude::*};

/// A user of the vitals server.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Stored for display only.
    pub role: String,
    pub user_name: String,
    pub password_hash: String,
    /// When this user was created.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub user_name: String,
    pub password_hash: String,
}

impl UserCreate {
    /// Inserts the user.
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(crate::schema::users::table)
            .values(self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    /// Fetches every user, oldest first.
    pub fn fetch_all(connection: &DbConnection) -> Result<Vec<Self>> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(users.order(id.asc()).select(User::as_select()).load(conn)?)
    }

    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(users
            .filter(id.eq(target))
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_username(name: &str, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(users
            .filter(user_name.eq(name))
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    /// Fetches the user only if both the id and the username match.
    pub fn fetch_by_id_and_username(
        target: i64,
        name: &str,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(users
            .filter(id.eq(target))
            .filter(user_name.eq(name))
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    /// Whether a user with this id exists.
    pub fn exists(target: i64, connection: &DbConnection) -> Result<bool> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(diesel::select(diesel::dsl::exists(users.filter(id.eq(target)))).get_result(conn)?)
    }

    /// Replaces the stored password hash.
    pub fn update_password_hash(
        target: i64,
        new_hash: &str,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(users.filter(id.eq(target)))
            .set((password_hash.eq(new_hash), updated_at.eq(Utc::now())))
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?)
    }

    /// Deletes the user by username. Their vitals records go with them.
    pub fn delete_by_username(name: &str, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::users::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(diesel::delete(users.filter(user_name.eq(name)))
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?)
    }
}
