//! pgdriver - a PostgreSQL driver adapter behind a driver-agnostic interface
//!
//! The crate does one thing: open a single connection, execute parameterized
//! statements through it, and read the results back. Connection failures are
//! typed errors; execution failures are logged and surfaced as a `None`
//! sentinel from [`DatabaseDriver::query`]. There is no pooling, no retry,
//! and no transaction management here.
//!
//! # Example
//! ```ignore
//! use pgdriver::{ConnectionSettings, DatabaseDriver, PostgresDriver, SqlParam};
//!
//! let mut driver = PostgresDriver::new();
//! driver
//!     .connect(&ConnectionSettings::new("localhost:5432", "app", "secret", "appdb"))
//!     .await?;
//!
//! if let Some(mut statement) = driver
//!     .query("SELECT id, name FROM users WHERE active = $1", &[SqlParam::from(true)])
//!     .await
//! {
//!     while let Some(row) = statement.fetch_assoc() {
//!         println!("{} -> {}", row["id"], row["name"]);
//!     }
//! }
//!
//! let active = driver.count("(*)", "users", "active = $1", &[SqlParam::from(true)]).await;
//! ```

pub mod config;
pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

// Re-export main types for convenient access
pub use config::{ConnectOptions, ConnectionSettings, DEFAULT_CHARSET};
pub use drivers::PostgresDriver;
pub use error::{DriverError, Result, ERROR_UNKNOWN_DATABASE};
pub use traits::DatabaseDriver;
pub use types::{ParamKind, SqlParam, Statement};
