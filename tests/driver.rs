use pgdriver::drivers::{InMemoryDriver, ResponseBuilder};
use pgdriver::{ConnectionSettings, DatabaseDriver, SqlParam};

fn settings() -> ConnectionSettings {
    ConnectionSettings::new("localhost", "app", "secret", "appdb")
}

#[tokio::test]
async fn test_lifecycle_transitions() {
    let mut driver = InMemoryDriver::new();
    assert!(!driver.is_connected());

    driver.connect(&settings()).await.unwrap();
    assert!(driver.is_connected());

    driver.close();
    assert!(!driver.is_connected());

    // close is idempotent
    driver.close();
    assert!(!driver.is_connected());
}

#[tokio::test]
async fn test_query_returns_statement_on_success() {
    let mut driver = InMemoryDriver::new().with_response(
        ResponseBuilder::new()
            .columns(&["id", "name"])
            .row(&["1", "Alice"])
            .row(&["2", "Bob"])
            .build(),
    );

    let mut statement = driver
        .query("SELECT id, name FROM users", &[])
        .await
        .expect("query should succeed");

    driver.assert_last_query("SELECT id, name FROM users", &[]);
    assert_eq!(statement.row_count(), 2);

    let first = statement.fetch_assoc().unwrap();
    assert_eq!(first["name"], "Alice");
    let second = statement.fetch_row().unwrap();
    assert_eq!(second, vec!["2".to_string(), "Bob".to_string()]);
    assert!(statement.fetch_row().is_none());
}

#[tokio::test]
async fn test_query_failure_returns_sentinel_instead_of_raising() {
    let mut driver = InMemoryDriver::new().with_error("syntax error at or near \"SELEC\"");

    let statement = driver.query("SELEC * FROM users", &[]).await;
    assert!(statement.is_none());

    // The statement was still attempted, and later queries keep working.
    driver.assert_query_count(1);
    assert!(driver.query("SELECT 1", &[]).await.is_some());
}

#[tokio::test]
async fn test_execute_failure_raises() {
    let mut driver = InMemoryDriver::new().with_error("relation \"missing\" does not exist");

    let err = driver
        .execute("SELECT * FROM missing", &[])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn test_count_builds_expected_sql() {
    let mut driver = InMemoryDriver::new().with_response(
        ResponseBuilder::new().columns(&["count"]).row(&["3"]).build(),
    );

    let n = driver.count("(*)", "users", "", &[]).await;

    driver.assert_last_query("SELECT COUNT(*) FROM users", &[]);
    assert_eq!(n, Some(3));
}

#[tokio::test]
async fn test_count_with_conditions_and_params() {
    let mut driver = InMemoryDriver::new().with_response(
        ResponseBuilder::new().columns(&["count"]).row(&["1"]).build(),
    );

    let n = driver
        .count("(id)", "users", "name = $1", &[SqlParam::from("Bob")])
        .await;

    driver.assert_last_query(
        "SELECT COUNT(id) FROM users WHERE name = $1",
        &[SqlParam::Text("Bob".to_string())],
    );
    assert_eq!(n, Some(1));
}

#[tokio::test]
async fn test_count_returns_none_when_execution_fails() {
    let mut driver = InMemoryDriver::new().with_error("table dropped");
    assert_eq!(driver.count("(*)", "users", "", &[]).await, None);
}

#[tokio::test]
async fn test_fetch_first_column_linear_seek() {
    let mut driver = InMemoryDriver::new().with_response(
        ResponseBuilder::new()
            .columns(&["val"])
            .row(&["a"])
            .row(&["b"])
            .row(&["c"])
            .row(&["d"])
            .row(&["e"])
            .build(),
    );

    let mut statement = driver.query("SELECT val FROM letters", &[]).await.unwrap();
    assert_eq!(statement.fetch_first_column(2), Some("c".to_string()));
}

#[tokio::test]
async fn test_row_count_on_sentinel_is_absent() {
    let mut driver = InMemoryDriver::new().with_error("boom");

    let count = driver
        .query("UPDATE users SET active = $1", &[SqlParam::from(false)])
        .await
        .map(|statement| statement.row_count());
    assert_eq!(count, None);
}

#[tokio::test]
async fn test_affected_rows_reported_for_writes() {
    let mut driver =
        InMemoryDriver::new().with_response(ResponseBuilder::new().affected(4).build());

    let statement = driver
        .query("DELETE FROM users WHERE active = $1", &[SqlParam::from(false)])
        .await
        .unwrap();
    assert_eq!(statement.row_count(), 4);
}

#[tokio::test]
async fn test_last_insert_id() {
    let mut driver = InMemoryDriver::new().with_last_insert_id(42);
    driver
        .query("INSERT INTO users (name) VALUES ($1)", &[SqlParam::from("Eve")])
        .await
        .unwrap();
    assert_eq!(driver.last_insert_id().await.unwrap(), 42);
}

#[tokio::test]
async fn test_null_param_binds_as_null_kind() {
    let mut driver = InMemoryDriver::new();
    driver
        .query(
            "UPDATE users SET nickname = $1",
            &[SqlParam::from(None::<String>)],
        )
        .await
        .unwrap();
    driver.assert_last_query("UPDATE users SET nickname = $1", &[SqlParam::Null]);
}

#[test]
fn test_quote_escapes_embedded_quotes() {
    let driver = InMemoryDriver::new();
    assert_eq!(driver.quote("O'Brien"), "'O''Brien'");
}
