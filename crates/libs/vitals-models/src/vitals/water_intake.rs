//! Water intake records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{db::connection::DbConnection, prelude::*};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::water_intakes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WaterIntake {
    pub id: i64,
    pub user_id: i64,
    pub cups: f32,
    pub time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::water_intakes)]
pub struct WaterIntakeCreate {
    pub user_id: i64,
    pub cups: f32,
    pub time: DateTime<Utc>,
}

impl WaterIntakeCreate {
    pub fn save(self, connection: &DbConnection) -> Result<WaterIntake> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(crate::schema::water_intakes::table)
            .values(self)
            .returning(WaterIntake::as_returning())
            .get_result(conn)?)
    }
}

impl WaterIntake {
    pub fn fetch_by_user(owner: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        use crate::schema::water_intakes::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(water_intakes
            .filter(user_id.eq(owner))
            .order(time.desc())
            .select(WaterIntake::as_select())
            .load(conn)?)
    }

    pub fn update(
        target: i64,
        owner: i64,
        value: f32,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        use crate::schema::water_intakes::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(
            diesel::update(water_intakes.filter(id.eq(target)).filter(user_id.eq(owner)))
                .set((cups.eq(value), updated_at.eq(Utc::now())))
                .returning(WaterIntake::as_returning())
                .get_result(conn)
                .optional()?,
        )
    }

    pub fn delete(target: i64, owner: i64, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::water_intakes::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(
            diesel::delete(water_intakes.filter(id.eq(target)).filter(user_id.eq(owner)))
                .returning(WaterIntake::as_returning())
                .get_result(conn)
                .optional()?,
        )
    }
}
