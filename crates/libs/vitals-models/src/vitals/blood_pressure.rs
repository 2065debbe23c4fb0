//! Blood pressure records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{db::connection::DbConnection, prelude::*};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::blood_pressures)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BloodPressure {
    pub id: i64,
    pub user_id: i64,
    /// Systolic pressure in mmHg.
    pub systolic: i32,
    /// Diastolic pressure in mmHg.
    pub diastolic: i32,
    pub time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::blood_pressures)]
pub struct BloodPressureCreate {
    pub user_id: i64,
    pub systolic: i32,
    pub diastolic: i32,
    pub time: DateTime<Utc>,
}

impl BloodPressureCreate {
    pub fn save(self, connection: &DbConnection) -> Result<BloodPressure> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(crate::schema::blood_pressures::table)
            .values(self)
            .returning(BloodPressure::as_returning())
            .get_result(conn)?)
    }
}

impl BloodPressure {
    pub fn fetch_by_user(owner: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        use crate::schema::blood_pressures::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(blood_pressures
            .filter(user_id.eq(owner))
            .order(time.desc())
            .select(BloodPressure::as_select())
            .load(conn)?)
    }

    pub fn update(
        target: i64,
        owner: i64,
        (sys, dia): (i32, i32),
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        use crate::schema::blood_pressures::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(
            diesel::update(blood_pressures.filter(id.eq(target)).filter(user_id.eq(owner)))
                .set((
                    systolic.eq(sys),
                    diastolic.eq(dia),
                    updated_at.eq(Utc::now()),
                ))
                .returning(BloodPressure::as_returning())
                .get_result(conn)
                .optional()?,
        )
    }

    pub fn delete(target: i64, owner: i64, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::blood_pressures::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(
            diesel::delete(blood_pressures.filter(id.eq(target)).filter(user_id.eq(owner)))
                .returning(BloodPressure::as_returning())
                .get_result(conn)
                .optional()?,
        )
    }
}
