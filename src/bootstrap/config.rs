use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATABASE_NAME: &str = "myblog";

/// Whether cascading writes run inside a multi-document transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionMode {
    /// Use transactions when the deployment is a replica set or sharded.
    Auto,
    On,
    Off,
}

impl FromStr for TransactionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(TransactionMode::Auto),
            "on" | "true" | "1" => Ok(TransactionMode::On),
            "off" | "false" | "0" => Ok(TransactionMode::Off),
            other => anyhow::bail!("MONGO_TRANSACTIONS must be auto, on or off (got {other:?})"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub token_secret: String,
    pub jwt_expires_secs: i64,
    pub request_timeout: Duration,
    pub transactions: TransactionMode,
    pub cors_origins: Vec<String>,
    pub is_production: bool,
}

// Secrets stay out of startup logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("database_url", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("token_secret", &"<redacted>")
            .field("jwt_expires_secs", &self.jwt_expires_secs)
            .field("request_timeout", &self.request_timeout)
            .field("transactions", &self.transactions)
            .field("cors_origins", &self.cors_origins)
            .field("is_production", &self.is_production)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token_secret = non_empty("TOKEN_SECRET")
            .ok_or_else(|| anyhow::anyhow!("TOKEN_SECRET must be set"))?;
        let database_url = non_empty("DATABASE_URL")
            .or_else(|| non_empty("db"))
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let database_name = database_name_from_url(&database_url);
        let port = non_empty("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let jwt_expires_secs = match non_empty("JWT_EXPIRES_SECS") {
            Some(v) => positive_secs("JWT_EXPIRES_SECS", &v)?,
            None => 60 * 60,
        };
        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(v) => {
                Duration::from_secs(positive_secs("REQUEST_TIMEOUT_SECS", &v)?.unsigned_abs())
            }
            None => Duration::from_secs(10),
        };
        let transactions = match non_empty("MONGO_TRANSACTIONS") {
            Some(v) => v.parse()?,
            None => TransactionMode::Auto,
        };
        let cors_origins = non_empty("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|o| o.trim().trim_end_matches('/').to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let is_production = matches!(
            lookup("RUST_ENV").as_deref(),
            Some("production") | Some("prod")
        );

        if is_production && token_secret.len() < 16 {
            anyhow::bail!("TOKEN_SECRET must be at least 16 characters in production");
        }

        Ok(Self {
            port,
            database_url,
            database_name,
            token_secret,
            jwt_expires_secs,
            request_timeout,
            transactions,
            cors_origins,
            is_production,
        })
    }
}

fn positive_secs(key: &str, raw: &str) -> anyhow::Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => anyhow::bail!("{key} must be a positive number of seconds (got {raw:?})"),
    }
}

/// Takes the text after the last `/` of the connection string, up to any
/// query string, as the database name.
pub fn database_name_from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path = without_scheme
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or("");
    let name = path.split('?').next().unwrap_or("");
    let name = name.rsplit('/').next().unwrap_or("");
    if name.is_empty() {
        DEFAULT_DATABASE_NAME.to_string()
    } else {
        name.to_string()
    }
}
