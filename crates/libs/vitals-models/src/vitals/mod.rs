//! Timestamped health measurements owned by a user.
//!
//! Every record kind supports the same operations: list a user's records
//! newest first, insert, update the measured values, and delete. Updates and
//! deletes are scoped to the owning user and return `None` when no row with
//! that id belongs to the user.

pub mod blood_pressure;
pub mod sugar_intake;
pub mod water_intake;
pub mod weight;
