/// Character set used when the connection options do not name one.
pub const DEFAULT_CHARSET: &str = "utf8";

/// Everything needed to open one database session.
///
/// `host` may embed a port as `host:port`; drivers fall back to their
/// default port otherwise.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub options: ConnectOptions,
}

impl ConnectionSettings {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
            database: database.into(),
            options: ConnectOptions::default(),
        }
    }

    /// Override the session character set.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.options.charset = Some(charset.into());
        self
    }
}

/// Optional connection-level settings. `charset` is the only recognized key.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub charset: Option<String>,
}

impl ConnectOptions {
    /// The configured character set, or [`DEFAULT_CHARSET`] if unset.
    pub fn charset(&self) -> &str {
        self.charset.as_deref().unwrap_or(DEFAULT_CHARSET)
    }
}
