//! Water intake, measured in cups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals_models::{
    db::connection::DbConnection,
    vitals::water_intake::{WaterIntake, WaterIntakeCreate},
};

use super::{existing_user, record_time, require_positive};
use crate::{extract::parse_id, prelude::*};

const ID_LABEL: &str = "water intake";
const NOT_FOUND_LABEL: &str = "Water Intake";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterIntakeRequest {
    pub cups: f32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterIntakeResponse {
    pub id: i64,
    pub cups: f32,
    pub time: DateTime<Utc>,
}

impl From<WaterIntake> for WaterIntakeResponse {
    fn from(record: WaterIntake) -> Self {
        Self {
            id: record.id,
            cups: record.cups,
            time: record.time,
        }
    }
}

pub fn list(user_id: &str, connection: &DbConnection) -> Result<Vec<WaterIntakeResponse>> {
    let user_id = existing_user(user_id, connection)?;
    Ok(WaterIntake::fetch_by_user(user_id, connection)?
        .into_iter()
        .map(WaterIntakeResponse::from)
        .collect())
}

pub fn create(
    user_id: &str,
    request: WaterIntakeRequest,
    connection: &DbConnection,
) -> Result<WaterIntakeResponse> {
    let cups = require_positive(request.cups, "cups")?;
    let user_id = existing_user(user_id, connection)?;

    let record = WaterIntakeCreate {
        user_id,
        cups,
        time: record_time(request.time),
    }
    .save(connection)?;
    Ok(record.into())
}

pub fn update(
    user_id: &str,
    id: &str,
    request: WaterIntakeRequest,
    connection: &DbConnection,
) -> Result<WaterIntakeResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;
    let cups = require_positive(request.cups, "cups")?;

    WaterIntake::update(id, user_id, cups, connection)?
        .map(WaterIntakeResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}

pub fn delete(user_id: &str, id: &str, connection: &DbConnection) -> Result<WaterIntakeResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;

    WaterIntake::delete(id, user_id, connection)?
        .map(WaterIntakeResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}
