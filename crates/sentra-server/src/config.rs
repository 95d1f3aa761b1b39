use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::Duration;
use tracing::warn;

/// Secret used when none is configured. Anyone can forge tokens with it.
const DEV_SECRET: &str = "dev-secret";

pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// `None` keeps tokens valid forever.
    pub token_ttl: Option<Duration>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = var("SENTRA_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                warn!("SENTRA_JWT_SECRET not set, falling back to the development secret");
                DEV_SECRET.into()
            });

        let token_ttl = parse_opt::<i64>(&var, "SENTRA_TOKEN_TTL_HOURS")?
            .map(|hours| {
                if hours <= 0 {
                    bail!("invalid SENTRA_TOKEN_TTL_HOURS: {hours} is not a positive number of hours");
                }
                Duration::try_hours(hours)
                    .with_context(|| format!("invalid SENTRA_TOKEN_TTL_HOURS: {hours} is out of range"))
            })
            .transpose()?;

        let max_upload_mb = parse_opt::<usize>(&var, "SENTRA_MAX_UPLOAD_MB")?.unwrap_or(50);
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .with_context(|| format!("invalid SENTRA_MAX_UPLOAD_MB: {max_upload_mb} is out of range"))?;

        Ok(Self {
            host: var("SENTRA_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_opt(&var, "SENTRA_PORT")?.unwrap_or(3000),
            jwt_secret,
            token_ttl,
            max_upload_bytes,
        })
    }
}

fn parse_opt<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("invalid {key}: {raw:?}"))
        })
        .transpose()
}
