use std::collections::VecDeque;

use async_trait::async_trait;

use crate::config::ConnectionSettings;
use crate::error::{DriverError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{SqlParam, Statement};

/// A recorded statement execution for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// An in-memory database driver for testing.
///
/// Allows scripting responses (or failures) and verifying executed
/// statements, without a live server.
///
/// # Example
/// ```
/// use pgdriver::drivers::{InMemoryDriver, ResponseBuilder};
///
/// let driver = InMemoryDriver::new().with_response(
///     ResponseBuilder::new()
///         .columns(&["id", "name"])
///         .row(&["1", "Alice"])
///         .build(),
/// );
/// ```
pub struct InMemoryDriver {
    connected: bool,
    responses: VecDeque<Result<Statement>>,
    recorded_queries: Vec<RecordedQuery>,
    last_insert_id: i64,
}

impl InMemoryDriver {
    /// Create a new in-memory driver with no scripted responses.
    pub fn new() -> Self {
        Self {
            connected: false,
            responses: VecDeque::new(),
            recorded_queries: Vec::new(),
            last_insert_id: 0,
        }
    }

    /// Queue a response for the next execution. Responses are consumed in
    /// FIFO order; an empty queue yields empty statements.
    pub fn with_response(mut self, response: Statement) -> Self {
        self.responses.push_back(Ok(response));
        self
    }

    /// Queue an execution failure for the next execution.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.responses
            .push_back(Err(DriverError::QueryFailed(message.into())));
        self
    }

    /// Set the value reported by `last_insert_id`.
    pub fn with_last_insert_id(mut self, id: i64) -> Self {
        self.last_insert_id = id;
        self
    }

    /// All statement executions recorded so far.
    pub fn recorded_queries(&self) -> &[RecordedQuery] {
        &self.recorded_queries
    }

    /// The most recent recorded execution, if any.
    pub fn last_query(&self) -> Option<&RecordedQuery> {
        self.recorded_queries.last()
    }

    /// Assert that the last execution matches the expected SQL and parameters.
    pub fn assert_last_query(&self, expected_sql: &str, expected_params: &[SqlParam]) {
        let last = self.last_query().expect("No queries were recorded");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.params, expected_params,
            "Parameters mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_params, last.params
        );
    }

    /// Assert that exactly n executions happened.
    pub fn assert_query_count(&self, expected: usize) {
        let actual = self.recorded_queries.len();
        assert_eq!(
            actual, expected,
            "Query count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }
}

impl Default for InMemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for InMemoryDriver {
    async fn connect(&mut self, _settings: &ConnectionSettings) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) {
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<Statement> {
        self.recorded_queries.push(RecordedQuery {
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(Statement::empty()))
    }

    async fn last_insert_id(&mut self) -> Result<i64> {
        Ok(self.last_insert_id)
    }

    fn quote(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    async fn server_version(&mut self) -> Result<String> {
        Ok("0.0-in-memory".to_string())
    }
}

/// Builder for scripted responses.
pub struct ResponseBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    affected: Option<u64>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            affected: None,
        }
    }

    /// Set the column names for the response.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row of string values.
    pub fn row(mut self, values: &[&str]) -> Self {
        self.rows
            .push(values.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Set the affected-row count, for statements that return no rows.
    pub fn affected(mut self, count: u64) -> Self {
        self.affected = Some(count);
        self
    }

    /// Build the scripted Statement.
    pub fn build(self) -> Statement {
        Statement::new(self.columns, self.rows, self.affected)
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
