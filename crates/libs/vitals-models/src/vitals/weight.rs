//! Body weight records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{db::connection::DbConnection, prelude::*};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::weights)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Weight {
    pub id: i64,
    pub user_id: i64,
    pub weight: f32,
    /// When the measurement was taken.
    pub time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::weights)]
pub struct WeightCreate {
    pub user_id: i64,
    pub weight: f32,
    pub time: DateTime<Utc>,
}

impl WeightCreate {
    pub fn save(self, connection: &DbConnection) -> Result<Weight> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(crate::schema::weights::table)
            .values(self)
            .returning(Weight::as_returning())
            .get_result(conn)?)
    }
}

impl Weight {
    /// Fetches a user's weight records, newest first.
    pub fn fetch_by_user(owner: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        use crate::schema::weights::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(weights
            .filter(user_id.eq(owner))
            .order(time.desc())
            .select(Weight::as_select())
            .load(conn)?)
    }

    pub fn update(
        target: i64,
        owner: i64,
        value: f32,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        use crate::schema::weights::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(weights.filter(id.eq(target)).filter(user_id.eq(owner)))
            .set((weight.eq(value), updated_at.eq(Utc::now())))
            .returning(Weight::as_returning())
            .get_result(conn)
            .optional()?)
    }

    pub fn delete(target: i64, owner: i64, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::weights::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(diesel::delete(weights.filter(id.eq(target)).filter(user_id.eq(owner)))
            .returning(Weight::as_returning())
            .get_result(conn)
            .optional()?)
    }
}
