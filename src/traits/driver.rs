use async_trait::async_trait;

use crate::config::ConnectionSettings;
use crate::error::Result;
use crate::types::{SqlParam, Statement};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Opening and closing a single, exclusively-owned connection
/// - Converting [`SqlParam`] values to native bind types
/// - Executing statements and converting results to [`Statement`] handles
///
/// Error policy is intentionally asymmetric and must stay that way:
/// connection establishment raises a typed error, while the [`query`]
/// wrapper swallows execution failures into a logged `None` sentinel.
///
/// [`query`]: DatabaseDriver::query
#[async_trait]
pub trait DatabaseDriver: Send {
    /// Open a connection as described by `settings`.
    /// Fails with `SelectionFailed` when the server reports an unknown
    /// database, `ConnectionFailed` for every other cause.
    async fn connect(&mut self, settings: &ConnectionSettings) -> Result<()>;

    /// Release the connection. Idempotent; a no-op when already closed.
    fn close(&mut self);

    /// Whether a live connection is currently held.
    fn is_connected(&self) -> bool;

    /// Execute a SQL statement with the given parameters.
    /// Parameters use PostgreSQL-style placeholders ($1, $2, etc.)
    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<Statement>;

    /// The most recently auto-generated row identifier on this session.
    async fn last_insert_id(&mut self) -> Result<i64>;

    /// Escape and quote a scalar for literal inclusion in hand-built SQL.
    /// Not a substitute for parameter binding.
    fn quote(&self, value: &str) -> String;

    /// The connected server's version string.
    async fn server_version(&mut self) -> Result<String>;

    /// Execute a statement, swallowing failures: the error is reported
    /// through the logging channel and `None` is returned in place of a
    /// handle. Callers must check for `None` before reading results.
    async fn query(&mut self, sql: &str, params: &[SqlParam]) -> Option<Statement> {
        match self.execute(sql, params).await {
            Ok(statement) => Some(statement),
            Err(err) => {
                tracing::error!(error = %err, sql, "query execution failed");
                None
            }
        }
    }

    /// Build and run `SELECT COUNT<field> FROM <table> [WHERE <conditions>]`,
    /// returning the counted value, or `None` when execution failed.
    ///
    /// `field` is interpolated verbatim, parentheses and all (e.g. `"(*)"`),
    /// and `conditions` likewise; neither is escaped here, so both must come
    /// from trusted code, with values passed through `params`.
    async fn count(
        &mut self,
        field: &str,
        table: &str,
        conditions: &str,
        params: &[SqlParam],
    ) -> Option<i64> {
        let mut sql = format!("SELECT COUNT{field} FROM {table}");
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(conditions);
        }
        let mut statement = self.query(&sql, params).await?;
        statement.fetch_first_column(0)?.parse().ok()
    }
}
