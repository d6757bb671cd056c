use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

// About a century; keeps `now - cooldown` inside chrono's range.
const MAX_COOLDOWN_DAYS: i64 = 36_500;
const MAX_FETCH_TIMEOUT_SECS: u64 = 3_600;

/// Column values stamped on every new `content_plan` row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDefaults {
    pub target_age: String,
    pub format: String,
    pub voice_tone: String,
    pub status: String,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            target_age: "전연령".to_string(),
            format: "shorts".to_string(),
            voice_tone: "professional".to_string(),
            status: "planning".to_string(),
        }
    }
}

/// Runtime settings shared by `fetch` and `manage`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Explicit connection string. When unset, the `PG*` variables are used.
    pub dsn: Option<String>,
    pub entries_per_source: usize,
    pub list_limit: i64,
    pub template_cooldown: chrono::Duration,
    pub fetch_timeout: Duration,
    pub defaults: ItemDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dsn: None,
            entries_per_source: 5,
            list_limit: 20,
            template_cooldown: chrono::Duration::days(7),
            fetch_timeout: Duration::from_secs(20),
            defaults: ItemDefaults::default(),
        }
    }
}

impl Config {
    /// Load settings from the process environment. Call `dotenvy::dotenv()` first
    /// so values in `.env` are visible.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Config::default();
        let defaults = ItemDefaults {
            target_age: lookup("PLANNER_DEFAULT_TARGET_AGE").unwrap_or(base.defaults.target_age),
            format: lookup("PLANNER_DEFAULT_FORMAT").unwrap_or(base.defaults.format),
            voice_tone: lookup("PLANNER_DEFAULT_VOICE_TONE").unwrap_or(base.defaults.voice_tone),
            status: lookup("PLANNER_DEFAULT_STATUS").unwrap_or(base.defaults.status),
        };
        let entries_per_source: usize = parse_opt(&lookup, "PLANNER_ENTRIES_PER_SOURCE")?.unwrap_or(base.entries_per_source);
        let list_limit: i64 = parse_opt(&lookup, "PLANNER_LIST_LIMIT")?.unwrap_or(base.list_limit);
        let cooldown_days: i64 = parse_opt(&lookup, "PLANNER_TEMPLATE_COOLDOWN_DAYS")?.unwrap_or(7);
        let timeout_secs: u64 = parse_opt(&lookup, "PLANNER_FETCH_TIMEOUT_SECS")?.unwrap_or(20);

        if entries_per_source == 0 {
            bail!("PLANNER_ENTRIES_PER_SOURCE must be at least 1");
        }
        if list_limit < 1 {
            bail!("PLANNER_LIST_LIMIT must be at least 1, got {list_limit}");
        }
        if !(0..=MAX_COOLDOWN_DAYS).contains(&cooldown_days) {
            bail!("PLANNER_TEMPLATE_COOLDOWN_DAYS must be within 0..={MAX_COOLDOWN_DAYS}, got {cooldown_days}");
        }
        if !(1..=MAX_FETCH_TIMEOUT_SECS).contains(&timeout_secs) {
            bail!("PLANNER_FETCH_TIMEOUT_SECS must be within 1..={MAX_FETCH_TIMEOUT_SECS}, got {timeout_secs}");
        }

        Ok(Config {
            dsn: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            entries_per_source,
            list_limit,
            template_cooldown: chrono::Duration::days(cooldown_days),
            fetch_timeout: Duration::from_secs(timeout_secs),
            defaults,
        })
    }

    /// `--dsn` wins over `DATABASE_URL`.
    pub fn with_dsn(mut self, dsn: Option<String>) -> Self {
        if dsn.is_some() {
            self.dsn = dsn;
        }
        self
    }
}

fn parse_opt<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => {
            let v = raw.trim().parse::<T>().with_context(|| format!("invalid {key}={raw:?}"))?;
            Ok(Some(v))
        }
    }
}
