//! Environment-driven settings
//!
//! There is no configuration file; everything that varies between runs is
//! read from the process environment once, when the binary starts.
//!
//! - `MINIGIT_LOG`: tracing filter directive (e.g. `debug`, `minigit=trace`)
//! - `MINIGIT_COMMIT_DATE`: fixed timestamp recorded in new commits
//! - `NO_PAGER`: disable the pager for long output

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const LOG_ENV: &str = "MINIGIT_LOG";
pub const COMMIT_DATE_ENV: &str = "MINIGIT_COMMIT_DATE";
pub const NO_PAGER_ENV: &str = "NO_PAGER";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Timestamp to stamp on new commits instead of the wall clock
    pub commit_date: Option<DateTime<FixedOffset>>,
    /// Whether long output may go through the interactive pager
    pub pager_enabled: bool,
    pub log_filter: String,
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let commit_date = match std::env::var(COMMIT_DATE_ENV) {
            Ok(raw) => Some(
                parse_commit_date(&raw)
                    .with_context(|| format!("invalid {COMMIT_DATE_ENV} value: {raw}"))?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            commit_date,
            pager_enabled: std::env::var_os(NO_PAGER_ENV).is_none(),
            log_filter: std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// The timestamp for a commit created right now
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}

pub fn parse_commit_date(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map_err(|e| anyhow::anyhow!("unrecognized date format: {e}"))
}
