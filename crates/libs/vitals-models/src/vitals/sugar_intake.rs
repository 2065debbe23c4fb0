//! Sugar intake records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::{db::connection::DbConnection, prelude::*};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::sugar_intakes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SugarIntake {
    pub id: i64,
    pub user_id: i64,
    pub grams: i64,
    pub time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::sugar_intakes)]
pub struct SugarIntakeCreate {
    pub user_id: i64,
    pub grams: i64,
    pub time: DateTime<Utc>,
}

impl SugarIntakeCreate {
    pub fn save(self, connection: &DbConnection) -> Result<SugarIntake> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(crate::schema::sugar_intakes::table)
            .values(self)
            .returning(SugarIntake::as_returning())
            .get_result(conn)?)
    }
}

impl SugarIntake {
    pub fn fetch_by_user(owner: i64, connection: &DbConnection) -> Result<Vec<Self>> {
        use crate::schema::sugar_intakes::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(sugar_intakes
            .filter(user_id.eq(owner))
            .order(time.desc())
            .select(SugarIntake::as_select())
            .load(conn)?)
    }

    pub fn update(
        target: i64,
        owner: i64,
        value: i64,
        connection: &DbConnection,
    ) -> Result<Option<Self>> {
        use crate::schema::sugar_intakes::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(
            diesel::update(sugar_intakes.filter(id.eq(target)).filter(user_id.eq(owner)))
                .set((grams.eq(value), updated_at.eq(Utc::now())))
                .returning(SugarIntake::as_returning())
                .get_result(conn)
                .optional()?,
        )
    }

    pub fn delete(target: i64, owner: i64, connection: &DbConnection) -> Result<Option<Self>> {
        use crate::schema::sugar_intakes::dsl::*;
        let conn = &mut connection.pool.get()?;

        Ok(
            diesel::delete(sugar_intakes.filter(id.eq(target)).filter(user_id.eq(owner)))
                .returning(SugarIntake::as_returning())
                .get_result(conn)
                .optional()?,
        )
    }
}
