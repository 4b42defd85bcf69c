/// Represents a SQL parameter value in a driver-agnostic way.
/// Drivers are responsible for converting these to their native bind types.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Null,
    Int(i64),
    Bool(bool),
    Text(String),
}

/// The closed set of abstract parameter kinds a value can bind as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Null,
    Int,
    Bool,
    Text,
}

impl SqlParam {
    /// Classifies this value into its abstract parameter kind.
    pub fn kind(&self) -> ParamKind {
        match self {
            SqlParam::Null => ParamKind::Null,
            SqlParam::Int(_) => ParamKind::Int,
            SqlParam::Bool(_) => ParamKind::Bool,
            SqlParam::Text(_) => ParamKind::Text,
        }
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(i64::from(value))
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl<T: Into<SqlParam>> From<Option<T>> for SqlParam {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlParam::Null,
        }
    }
}
