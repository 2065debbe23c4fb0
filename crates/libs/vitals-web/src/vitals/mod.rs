//! Per-user vitals records.
//!
//! Every kind follows the same pattern: `list` and `create` are addressed by
//! user id, `update` and `delete` by user id plus record id. A record that
//! exists but belongs to another user is reported as not found.

use chrono::{DateTime, Utc};
use vitals_models::{db::connection::DbConnection, users::user::User};

use crate::{extract::parse_id, prelude::*};

pub mod blood_pressure;
pub mod sugar_intake;
pub mod water_intake;
pub mod weight;

/// Parses the user id from the path and checks that the user exists.
fn existing_user(raw_id: &str, connection: &DbConnection) -> Result<i64> {
    let id = parse_id(raw_id, "user")?;
    if !User::exists(id, connection)? {
        return Err(Error::NotFound("User"));
    }
    Ok(id)
}

fn record_time(time: Option<DateTime<Utc>>) -> DateTime<Utc> {
    time.unwrap_or_else(Utc::now)
}

fn require_positive(value: f32, field: &str) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::BadRequest(format!("{field} must be a positive number")))
    }
}

fn require_nonzero<T: PartialEq + Default>(value: T, field: &str) -> Result<T> {
    if value == T::default() {
        Err(Error::BadRequest(format!("{field} is required")))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_time_defaults_to_now() {
        let before = Utc::now();
        let time = record_time(None);
        assert!(time >= before && time <= Utc::now());
    }

    #[test]
    fn test_given_time_is_kept() {
        let time = Utc::now() - chrono::TimeDelta::days(3);
        assert_eq!(record_time(Some(time)), time);
    }

    #[test]
    fn test_positive_measurements() {
        assert_eq!(require_positive(70.5, "weight").unwrap(), 70.5);
        for value in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(require_positive(value, "weight").is_err(), "{value} was accepted");
        }
    }

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(require_nonzero(120u16, "systolic").unwrap(), 120);
        let err = require_nonzero(0u16, "systolic").unwrap_err();
        assert_eq!(err.to_string(), "systolic is required");
    }
}
