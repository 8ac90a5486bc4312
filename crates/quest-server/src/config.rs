use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server configuration, read from `QUEST_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub position_ttl_secs: i64,
    pub cleanup_interval_secs: u64,
    pub graphql_auth: bool,
    pub public_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take their defaults; set but
    /// unparseable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("QUEST_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "QUEST_PORT", 3333)?;
        let db_path = lookup("QUEST_DB_PATH").unwrap_or_else(|| "quest.db".into()).into();
        let position_ttl_secs = parse_or(&lookup, "QUEST_POSITION_TTL_SECS", 30)?;
        let cleanup_interval_secs = parse_or(&lookup, "QUEST_CLEANUP_INTERVAL_SECS", 60)?;
        let graphql_auth = parse_or(&lookup, "QUEST_GRAPHQL_AUTH", false)?;
        let public_dir = lookup("QUEST_PUBLIC_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        if position_ttl_secs <= 0 {
            anyhow::bail!("QUEST_POSITION_TTL_SECS must be positive, got {}", position_ttl_secs);
        }
        if cleanup_interval_secs == 0 {
            anyhow::bail!("QUEST_CLEANUP_INTERVAL_SECS must be positive");
        }

        Ok(Self {
            host,
            port,
            db_path,
            position_ttl_secs,
            cleanup_interval_secs,
            graphql_auth,
            public_dir,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
