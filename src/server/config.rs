/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables, focusing on the optional PostgreSQL database connection and
 * the upload directory.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - PostgreSQL connection string (optional)
 * - `UPLOAD_DIR` - directory for stored images (default `uploads`)
 * - `SERVER_PORT` - listening port, read in `main` (default 3000)
 * - `JWT_SECRET` - session signing key, read by the auth module
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * A missing or unreachable database leaves `None` and the server runs
 * without database features.
 */

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Database configuration result
///
/// Contains the connection pool if successfully configured, or `None` if
/// the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if `DATABASE_URL` is not set or the connection fails
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Migrations may already have been applied out of band.
            tracing::warn!("Continuing - database might not be up to date");
        }
    }

    Some(pool)
}

/// Directory uploaded images are stored in
///
/// Read from `UPLOAD_DIR`, defaulting to `uploads` relative to the
/// working directory.
pub fn upload_dir() -> PathBuf {
    std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"))
}

/// Session token signing key
///
/// Read from `JWT_SECRET` once, on first use; the development fallback
/// (and its warning) therefore appears at most once per process.
pub fn jwt_secret() -> &'static str {
    static SECRET: OnceLock<String> = OnceLock::new();
    SECRET.get_or_init(|| {
        std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development fallback");
            "dev-secret-change-in-production".to_string()
        })
    })
}
