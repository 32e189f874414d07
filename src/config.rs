// Bot configuration, read from environment variables (a .env file is
// loaded first by main).
//
// TELEGRAM_TOKEN       - Bot API token (required)
// ADMIN_IDS            - user ids allowed to moderate, separated by commas,
//                        semicolons or whitespace (required, may be empty)
// MODERATION_TIMEZONE  - IANA timezone for quiet hours (default Europe/Moscow)

use chrono_tz::Tz;
use std::collections::HashSet;
use thiserror::Error;

pub const DEFAULT_TIMEZONE: &str = "Europe/Moscow";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub admin_ids: HashSet<u64>,
    pub timezone: Tz,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key -> value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let telegram_token = lookup("TELEGRAM_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;

        let admin_ids = lookup("ADMIN_IDS")
            .map(|raw| parse_admin_ids(&raw))
            .ok_or(ConfigError::Missing("ADMIN_IDS"))?;

        let tz_name = lookup("MODERATION_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = tz_name
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(tz_name.clone()))?;

        Ok(Self {
            telegram_token,
            admin_ids,
            timezone,
        })
    }
}

/// Parse a list of user ids. Tokens that aren't ids are skipped.
pub fn parse_admin_ids(raw: &str) -> HashSet<u64> {
    raw.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|id| match id.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Ignoring invalid admin id in ADMIN_IDS: {}", id);
                None
            }
        })
        .collect()
}
