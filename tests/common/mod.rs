//! Helpers for integration tests.
#![allow(dead_code)]

use category_api::db::{DbPool, establish_connection_pool, run_migrations};
use category_api::domain::category::NewCategory;
use category_api::domain::types::{CategoryDescription, CategoryId, CategoryName, CategorySlug};
use chrono::{DateTime, NaiveDateTime};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn timestamp(seconds: i64) -> NaiveDateTime {
    DateTime::from_timestamp(seconds, 0)
        .expect("valid timestamp")
        .naive_utc()
}

pub fn new_category(
    id: &str,
    slug: &str,
    name: &str,
    description: Option<&str>,
    active: bool,
    created_at: i64,
) -> NewCategory {
    NewCategory {
        id: CategoryId::new(id).expect("valid id"),
        slug: CategorySlug::new(slug).expect("valid slug"),
        name: CategoryName::new(name).expect("valid name"),
        description: description.map(|d| CategoryDescription::new(d).expect("valid description")),
        active,
        created_date: timestamp(created_at),
    }
}
