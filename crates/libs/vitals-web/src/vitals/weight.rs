//! Body weight records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vitals_models::{
    db::connection::DbConnection,
    vitals::weight::{Weight, WeightCreate},
};

use super::{existing_user, record_time, require_positive};
use crate::{extract::parse_id, prelude::*};

const ID_LABEL: &str = "weight";
const NOT_FOUND_LABEL: &str = "Weight";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRequest {
    pub weight: f32,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightResponse {
    pub id: i64,
    pub weight: f32,
    pub time: DateTime<Utc>,
}

impl From<Weight> for WeightResponse {
    fn from(record: Weight) -> Self {
        Self {
            id: record.id,
            weight: record.weight,
            time: record.time,
        }
    }
}

/// Lists the user's weights, newest first.
pub fn list(user_id: &str, connection: &DbConnection) -> Result<Vec<WeightResponse>> {
    let user_id = existing_user(user_id, connection)?;
    Ok(Weight::fetch_by_user(user_id, connection)?
        .into_iter()
        .map(WeightResponse::from)
        .collect())
}

pub fn create(
    user_id: &str,
    request: WeightRequest,
    connection: &DbConnection,
) -> Result<WeightResponse> {
    let weight = require_positive(request.weight, "weight")?;
    let user_id = existing_user(user_id, connection)?;

    let record = WeightCreate {
        user_id,
        weight,
        time: record_time(request.time),
    }
    .save(connection)?;
    Ok(record.into())
}

/// Replaces the value of a record. The recorded time is left unchanged.
pub fn update(
    user_id: &str,
    id: &str,
    request: WeightRequest,
    connection: &DbConnection,
) -> Result<WeightResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;
    let weight = require_positive(request.weight, "weight")?;

    Weight::update(id, user_id, weight, connection)?
        .map(WeightResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}

pub fn delete(user_id: &str, id: &str, connection: &DbConnection) -> Result<WeightResponse> {
    let user_id = parse_id(user_id, "user")?;
    let id = parse_id(id, ID_LABEL)?;

    Weight::delete(id, user_id, connection)?
        .map(WeightResponse::from)
        .ok_or(Error::NotFound(NOT_FOUND_LABEL))
}
