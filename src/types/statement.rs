use std::collections::HashMap;

/// The result handle of one executed statement.
///
/// Created per execution and owned by the caller; the driver does not retain
/// it. All values are converted to strings by the driver. Rows are read
/// incrementally through an internal cursor.
#[derive(Debug, Clone)]
pub struct Statement {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    cursor: usize,
    row_count: u64,
}

impl Statement {
    /// Creates a statement from column names, row values, and the row count
    /// reported by the server. When the server reports none, the number of
    /// returned rows is used.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>, affected: Option<u64>) -> Self {
        let row_count = affected.unwrap_or(rows.len() as u64);
        Self {
            columns,
            rows,
            cursor: 0,
            row_count,
        }
    }

    /// A statement with no columns and no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), None)
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fetches the next row as a column-name-to-value mapping.
    /// Returns `None` once the results are exhausted.
    pub fn fetch_assoc(&mut self) -> Option<HashMap<String, String>> {
        let row = self.fetch_row()?;
        Some(self.columns.iter().cloned().zip(row).collect())
    }

    /// Fetches the next row as an ordered sequence of column values.
    /// Returns `None` once the results are exhausted.
    pub fn fetch_row(&mut self) -> Option<Vec<String>> {
        let row = self.rows.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(row)
    }

    /// Discards `skip` leading rows, then returns the first column of the
    /// next row. This is a linear seek: each skipped row is fetched and
    /// dropped, and there is no way to seek backwards.
    pub fn fetch_first_column(&mut self, skip: usize) -> Option<String> {
        for _ in 0..skip {
            self.fetch_row()?;
        }
        self.fetch_row().and_then(|row| row.into_iter().next())
    }

    /// Number of rows returned or affected by the execution.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_row_statement() -> Statement {
        let rows = (0..5).map(|i| vec![format!("v{i}")]).collect();
        Statement::new(vec!["val".to_string()], rows, None)
    }

    #[test]
    fn test_fetch_row_advances_cursor() {
        let mut statement = five_row_statement();
        assert_eq!(statement.fetch_row(), Some(vec!["v0".to_string()]));
        assert_eq!(statement.fetch_row(), Some(vec!["v1".to_string()]));
    }

    #[test]
    fn test_fetch_row_returns_none_when_exhausted() {
        let mut statement = Statement::new(
            vec!["id".to_string()],
            vec![vec!["1".to_string()]],
            None,
        );
        assert!(statement.fetch_row().is_some());
        assert!(statement.fetch_row().is_none());
        assert!(statement.fetch_assoc().is_none());
    }

    #[test]
    fn test_fetch_assoc_keys_by_column_name() {
        let mut statement = Statement::new(
            vec!["id".to_string(), "name".to_string()],
            vec![vec!["1".to_string(), "Alice".to_string()]],
            None,
        );
        let row = statement.fetch_assoc().unwrap();
        assert_eq!(row["id"], "1");
        assert_eq!(row["name"], "Alice");
    }

    #[test]
    fn test_fetch_first_column_skips_leading_rows() {
        let mut statement = five_row_statement();
        assert_eq!(statement.fetch_first_column(2), Some("v2".to_string()));
        // Rows 0 and 1 were consumed by the seek; the cursor sits past row 2.
        assert_eq!(statement.fetch_row(), Some(vec!["v3".to_string()]));
    }

    #[test]
    fn test_fetch_first_column_past_end_returns_none() {
        let mut statement = five_row_statement();
        assert_eq!(statement.fetch_first_column(5), None);
    }

    #[test]
    fn test_row_count_prefers_server_report() {
        let statement = Statement::new(Vec::new(), Vec::new(), Some(3));
        assert_eq!(statement.row_count(), 3);
        assert_eq!(five_row_statement().row_count(), 5);
        assert_eq!(Statement::empty().row_count(), 0);
    }
}
