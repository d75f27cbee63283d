//! # Slateroom DB
//!
//! Database connection pool initialization for the Slateroom API.

use std::env;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// The returned [`sqlx::PgPool`] is cheaply cloneable and is shared through
/// the application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails; this runs
/// once at startup where dying loudly is the right answer.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
