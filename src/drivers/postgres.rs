use async_trait::async_trait;
use futures::{pin_mut, TryStreamExt};
use tokio_postgres::{types::ToSql, Client, Config, NoTls};

use crate::config::ConnectionSettings;
use crate::error::{DriverError, Result, ERROR_UNKNOWN_DATABASE};
use crate::traits::DatabaseDriver;
use crate::types::{SqlParam, Statement};

const DEFAULT_PORT: u16 = 5432;

/// PostgreSQL driver implementation using tokio-postgres.
///
/// Holds at most one connection. Every statement goes through the extended
/// protocol, so parameters are always bound server-side; sessions are opened
/// fresh on each `connect` and never pooled.
pub struct PostgresDriver {
    state: ConnectionState,
}

enum ConnectionState {
    Disconnected,
    Connected(Client),
}

impl PostgresDriver {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    fn client(&self) -> Result<&Client> {
        match &self.state {
            ConnectionState::Connected(client) => Ok(client),
            ConnectionState::Disconnected => Err(DriverError::NotConnected),
        }
    }
}

impl Default for PostgresDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for PostgresDriver {
    async fn connect(&mut self, settings: &ConnectionSettings) -> Result<()> {
        let charset = settings.options.charset();
        let (host, port) = split_host_port(&settings.host);

        let mut config = Config::new();
        config
            .host(host)
            .port(port)
            .user(&settings.user)
            .password(&settings.password)
            .dbname(&settings.database)
            .options(&format!("-c client_encoding={charset}"));

        let (client, connection) = config.connect(NoTls).await.map_err(connect_error)?;

        // Drive the connection until the client is dropped.
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::error!(error = %err, "postgres connection task failed");
            }
        });

        // The encoding is already a startup option above; setting it again
        // per session covers server/client combinations that ignore one of
        // the two mechanisms. Both must stay.
        let set_encoding = format!("SET client_encoding TO '{charset}'");
        client
            .execute(set_encoding.as_str(), &[])
            .await
            .map_err(connect_error)?;

        self.state = ConnectionState::Connected(client);
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the client ends the spawned connection task.
        self.state = ConnectionState::Disconnected;
    }

    fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected(_))
    }

    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> Result<Statement> {
        let client = self.client()?;

        // Convert SqlParam values to tokio-postgres compatible types
        let converted_params: Vec<Box<dyn ToSql + Sync + Send>> =
            params.iter().map(param_to_native).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = converted_params
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let stream = client
            .query_raw(sql, param_refs)
            .await
            .map_err(query_error)?;
        pin_mut!(stream);

        let mut rows = Vec::new();
        while let Some(row) = stream.try_next().await.map_err(query_error)? {
            rows.push(row);
        }
        let affected = stream.rows_affected();

        let columns: Vec<String> = if rows.is_empty() {
            Vec::new()
        } else {
            rows[0]
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        };

        let values: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                (0..row.columns().len())
                    .map(|i| row_value_to_string(row, i))
                    .collect()
            })
            .collect();

        Ok(Statement::new(columns, values, affected))
    }

    async fn last_insert_id(&mut self) -> Result<i64> {
        let mut statement = self.execute("SELECT LASTVAL()", &[]).await?;
        statement
            .fetch_first_column(0)
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| DriverError::QueryFailed("no sequence value in this session".into()))
    }

    fn quote(&self, value: &str) -> String {
        postgres_protocol::escape::escape_literal(value)
    }

    async fn server_version(&mut self) -> Result<String> {
        let mut statement = self.execute("SHOW server_version", &[]).await?;
        statement
            .fetch_first_column(0)
            .ok_or_else(|| DriverError::QueryFailed("server reported no version".into()))
    }
}

/// Split an optional `host:port` suffix off the host. A suffix that is not a
/// valid port is treated as part of the host name.
fn split_host_port(host: &str) -> (&str, u16) {
    match host.rsplit_once(':') {
        Some((name, port)) => match port.parse() {
            Ok(port) => (name, port),
            Err(_) => (host, DEFAULT_PORT),
        },
        None => (host, DEFAULT_PORT),
    }
}

fn connect_error(err: tokio_postgres::Error) -> DriverError {
    let (code, message) = match err.as_db_error() {
        Some(db) => (db.code().code().to_string(), db.message().to_string()),
        None => (String::new(), err.to_string()),
    };
    classify_connect_error(code, message)
}

fn classify_connect_error(code: String, message: String) -> DriverError {
    if code == ERROR_UNKNOWN_DATABASE {
        DriverError::SelectionFailed { code, message }
    } else {
        DriverError::ConnectionFailed { code, message }
    }
}

fn query_error(err: tokio_postgres::Error) -> DriverError {
    DriverError::QueryFailed(err.to_string())
}

/// Map an abstract parameter to its native bind value. The source set is
/// closed at four kinds, so this match is the whole mapping.
fn param_to_native(param: &SqlParam) -> Box<dyn ToSql + Sync + Send> {
    match param {
        SqlParam::Null => Box::new(None::<String>),
        SqlParam::Int(i) => Box::new(*i),
        SqlParam::Bool(b) => Box::new(*b),
        SqlParam::Text(s) => Box::new(s.clone()),
    }
}

/// Convert a row value at a given index to a string, trying the common
/// result types in turn. SQL NULL comes back as the string "NULL".
fn row_value_to_string(row: &tokio_postgres::Row, index: usize) -> String {
    if let Ok(val) = row.try_get::<_, i64>(index) {
        return val.to_string();
    }
    if let Ok(val) = row.try_get::<_, i32>(index) {
        return val.to_string();
    }
    if let Ok(val) = row.try_get::<_, String>(index) {
        return val;
    }
    if let Ok(val) = row.try_get::<_, bool>(index) {
        return val.to_string();
    }
    if let Ok(val) = row.try_get::<_, f64>(index) {
        return val.to_string();
    }
    if let Ok(val) = row.try_get::<_, Option<String>>(index) {
        return val.unwrap_or_else(|| "NULL".to_string());
    }
    "NULL".to_string()
}
