use chrono::{TimeDelta, Utc};
use common::DBTestContext;
use serial_test::serial;
use vitals_models::users::user::User;
use vitals_models::vitals::{
    blood_pressure::{BloodPressure, BloodPressureCreate},
    sugar_intake::{SugarIntake, SugarIntakeCreate},
    water_intake::{WaterIntake, WaterIntakeCreate},
    weight::{Weight, WeightCreate},
};

mod common;

#[test]
#[serial]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
fn test_user_lookups() {
    let db = DBTestContext::from_env();
    let alice = db.create_user("alice");

    let by_name = User::fetch_by_username("alice", &db.conn).unwrap();
    assert_eq!(by_name.as_ref().map(|u| u.id), Some(alice.id));

    assert!(User::fetch_by_username("nobody", &db.conn).unwrap().is_none());
    assert!(
        User::fetch_by_id_and_username(alice.id, "alice", &db.conn)
            .unwrap()
            .is_some()
    );
    assert!(
        User::fetch_by_id_and_username(alice.id, "bob", &db.conn)
            .unwrap()
            .is_none()
    );
    assert!(User::exists(alice.id, &db.conn).unwrap());
    assert_eq!(User::fetch_all(&db.conn).unwrap().len(), 1);
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
fn test_weight_records_are_scoped_to_their_user() {
    let db = DBTestContext::from_env();
    let alice = db.create_user("alice");
    let bob = db.create_user("bob");
    let now = Utc::now();

    let older = WeightCreate {
        user_id: alice.id,
        weight: 70.5,
        time: now - TimeDelta::days(1),
    }
    .save(&db.conn)
    .unwrap();
    let newer = WeightCreate {
        user_id: alice.id,
        weight: 70.1,
        time: now,
    }
    .save(&db.conn)
    .unwrap();

    let records = Weight::fetch_by_user(alice.id, &db.conn).unwrap();
    assert_eq!(
        records.iter().map(|w| w.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    assert!(Weight::update(older.id, bob.id, 1.0, &db.conn).unwrap().is_none());
    let updated = Weight::update(older.id, alice.id, 69.9, &db.conn)
        .unwrap()
        .unwrap();
    assert_eq!(updated.weight, 69.9);
    assert_eq!(updated.time, older.time);

    assert!(Weight::delete(newer.id, bob.id, &db.conn).unwrap().is_none());
    assert!(Weight::delete(newer.id, alice.id, &db.conn).unwrap().is_some());
    assert_eq!(Weight::fetch_by_user(alice.id, &db.conn).unwrap().len(), 1);
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
fn test_other_vitals_round_trip() {
    let db = DBTestContext::from_env();
    let alice = db.create_user("alice");
    let now = Utc::now();

    let bp = BloodPressureCreate {
        user_id: alice.id,
        systolic: 120,
        diastolic: 80,
        time: now,
    }
    .save(&db.conn)
    .unwrap();
    let bp = BloodPressure::update(bp.id, alice.id, (118, 79), &db.conn)
        .unwrap()
        .unwrap();
    assert_eq!((bp.systolic, bp.diastolic), (118, 79));

    let water = WaterIntakeCreate {
        user_id: alice.id,
        cups: 2.5,
        time: now,
    }
    .save(&db.conn)
    .unwrap();
    assert_eq!(WaterIntake::fetch_by_user(alice.id, &db.conn).unwrap(), vec![water]);

    let sugar = SugarIntakeCreate {
        user_id: alice.id,
        grams: 30,
        time: now,
    }
    .save(&db.conn)
    .unwrap();
    let deleted = SugarIntake::delete(sugar.id, alice.id, &db.conn).unwrap();
    assert_eq!(deleted.map(|s| s.grams), Some(30));
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
fn test_deleting_a_user_removes_their_records() {
    let db = DBTestContext::from_env();
    let alice = db.create_user("alice");

    WeightCreate {
        user_id: alice.id,
        weight: 70.0,
        time: Utc::now(),
    }
    .save(&db.conn)
    .unwrap();

    let deleted = User::delete_by_username("alice", &db.conn).unwrap();
    assert_eq!(deleted.map(|u| u.id), Some(alice.id));
    assert!(Weight::fetch_by_user(alice.id, &db.conn).unwrap().is_empty());
    assert!(User::delete_by_username("alice", &db.conn).unwrap().is_none());
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
fn test_setup_on_migrated_database_applies_nothing() {
    let db = DBTestContext::from_env();
    db.create_user("alice");

    let conn = db.conn.clone().setup().unwrap();

    assert_eq!(User::fetch_all(&conn).unwrap().len(), 1);
}

#[test]
#[serial]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
fn test_password_hash_can_be_replaced() {
    let db = DBTestContext::from_env();
    let alice = db.create_user("alice");

    let updated = User::update_password_hash(alice.id, "$argon2id$new", &db.conn)
        .unwrap()
        .unwrap();
    assert_eq!(updated.password_hash, "$argon2id$new");
    assert_eq!(updated.user_name, "alice");

    assert!(
        User::update_password_hash(alice.id + 1000, "$argon2id$new", &db.conn)
            .unwrap()
            .is_none()
    );
}
