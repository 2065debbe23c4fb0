//! Blood pressure readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals_models::{
    db::connection::DbConnection,
    vitals::blood_pressure::{BloodPressure, BloodPressureCreate},
};

use super::{existing_user, record_time, require_nonzero};
use crate::{extract::parse_id, prelude::*};

const ID_LABEL: &str = "blood pressure";
const NOT_FOUND_LABEL: &str = "Blood Pressure";

/// Values are in mmHg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodPressureRequest {
    pub systolic: u16,
    pub diastolic: u16,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl BloodPressureRequest {
    fn reading(&self) -> Result<(i32, i32)> {
        let systolic = require_nonzero(self.systolic, "systolic")?;
        let diastolic = require_nonzero(self.diastolic, "diastolic")?;
        Ok((i32::from(systolic), i32::from(diastolic)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureResponse {
    pub id: i64,
    pub systolic: i32,
    pub diastolic: i32,
    pub time: DateTime<Utc>,
}

impl From<BloodPressure> for BloodPressureResponse {
    fn from(record: BloodPressure) -> Self {
        Self {
            id: record.id,
            systolic: record.systolic,
            diastolic: record.diastolic,
            time: record.time,
        }
    }
}

pub fn list(user_id: &str, connection: &DbConnection) -> Result<Vec<BloodPressureResponse>> {
    let user_id = existing_user(user_id, connection)?;
    Ok(BloodPressure::fetch_by_user(user_id, connection)?
        .into_iter()
        .map(BloodPressureResponse::from)
        .collect())
}

pub fn create(
    user_id: &str,
    request: BloodPressureRequest,
    connection: &DbConnection,
) -> Result<BloodPressureResponse> {
    let (systolic, diastolic) = request.reading()?;
    let user_id = existing_user(user_id, connection)?;

    let record = BloodPressureCreate {
        user_id,
        systolic,
        diastolic,
        time: record_time(request.time),
    }
    .save(connection)?;
    Ok(record.into())
}

pub fn update(
    user_id: &str,
    id: &str,
    request: BloodPressureRequest,
    connection: &DbConnection,
) -> Result<BloodPressureResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;
    let reading = request.reading()?;

    BloodPressure::update(id, user_id, reading, connection)?
        .map(BloodPressureResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}

pub fn delete(
    user_id: &str,
    id: &str,
    connection: &DbConnection,
) -> Result<BloodPressureResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;

    BloodPressure::delete(id, user_id, connection)?
        .map(BloodPressureResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}
