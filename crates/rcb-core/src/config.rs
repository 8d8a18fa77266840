use std::{env, fmt};

use chrono::NaiveTime;

use crate::{domain::ChatId, errors::Error, Result};

/// Chat id used when `CHAT_ID` is not set.
pub const DEFAULT_CHAT_ID: i64 = 987_654_321;

/// Local wall-clock time of the daily report when `DAILY_REPORT_TIME` is not set.
pub const DEFAULT_DAILY_REPORT_TIME: &str = "21:00";

/// Typed configuration, loaded once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub authorized_chat_id: ChatId,
    pub daily_report_time: NaiveTime,
}

impl Config {
    /// Config without a transport token, for router tests.
    #[cfg(test)]
    pub(crate) fn for_chat(authorized_chat_id: ChatId) -> Self {
        Self {
            bot_token: String::new(),
            authorized_chat_id,
            daily_report_time: default_report_time(),
        }
    }

    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from an arbitrary key lookup (the process
    /// environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("BOT_TOKEN").and_then(non_empty).ok_or_else(|| {
            Error::Config("BOT_TOKEN environment variable is required".to_string())
        })?;

        let authorized_chat_id = match lookup("CHAT_ID").and_then(non_empty) {
            Some(raw) => raw.trim().parse::<i64>().map(ChatId).map_err(|_| {
                Error::Config(format!("CHAT_ID must be an integer, got {raw:?}"))
            })?,
            None => ChatId(DEFAULT_CHAT_ID),
        };

        let daily_report_time = match lookup("DAILY_REPORT_TIME").and_then(non_empty) {
            Some(raw) => parse_hh_mm(&raw)?,
            None => default_report_time(),
        };

        Ok(Self {
            bot_token,
            authorized_chat_id,
            daily_report_time,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("authorized_chat_id", &self.authorized_chat_id)
            .field("daily_report_time", &self.daily_report_time)
            .finish()
    }
}

fn default_report_time() -> NaiveTime {
    parse_hh_mm(DEFAULT_DAILY_REPORT_TIME).unwrap_or_default()
}

fn parse_hh_mm(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| Error::Config(format!("DAILY_REPORT_TIME must be HH:MM, got {raw:?}")))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
