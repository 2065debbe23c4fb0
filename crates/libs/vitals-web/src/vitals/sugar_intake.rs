//! Sugar intake, measured in grams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals_models::{
    db::connection::DbConnection,
    vitals::sugar_intake::{SugarIntake, SugarIntakeCreate},
};

use super::{existing_user, record_time, require_nonzero};
use crate::{extract::parse_id, prelude::*};

const ID_LABEL: &str = "sugar intake";
const NOT_FOUND_LABEL: &str = "Sugar Intake";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SugarIntakeRequest {
    pub grams: u32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl SugarIntakeRequest {
    fn grams(&self) -> Result<i64> {
        Ok(i64::from(require_nonzero(self.grams, "grams")?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SugarIntakeResponse {
    pub id: i64,
    pub grams: i64,
    pub time: DateTime<Utc>,
}

impl From<SugarIntake> for SugarIntakeResponse {
    fn from(record: SugarIntake) -> Self {
        Self {
            id: record.id,
            grams: record.grams,
            time: record.time,
        }
    }
}

pub fn list(user_id: &str, connection: &DbConnection) -> Result<Vec<SugarIntakeResponse>> {
    let user_id = existing_user(user_id, connection)?;
    Ok(SugarIntake::fetch_by_user(user_id, connection)?
        .into_iter()
        .map(SugarIntakeResponse::from)
        .collect())
}

pub fn create(
    user_id: &str,
    request: SugarIntakeRequest,
    connection: &DbConnection,
) -> Result<SugarIntakeResponse> {
    let grams = request.grams()?;
    let user_id = existing_user(user_id, connection)?;

    let record = SugarIntakeCreate {
        user_id,
        grams,
        time: record_time(request.time),
    }
    .save(connection)?;
    Ok(record.into())
}

pub fn update(
    user_id: &str,
    id: &str,
    request: SugarIntakeRequest,
    connection: &DbConnection,
) -> Result<SugarIntakeResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;
    let grams = request.grams()?;

    SugarIntake::update(id, user_id, grams, connection)?
        .map(SugarIntakeResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}

pub fn delete(user_id: &str, id: &str, connection: &DbConnection) -> Result<SugarIntakeResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;

    SugarIntake::delete(id, user_id, connection)?
        .map(SugarIntakeResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_grams_are_rejected() {
        let request = SugarIntakeRequest {
            grams: 0,
            time: None,
        };
        assert!(matches!(request.grams(), Err(Error::BadRequest(_))));
    }
}
