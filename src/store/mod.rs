use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

mod pg;
#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub mod testdb;

pub use pg::PgStore;

/// An enabled row of `rss_sources`.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Source {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub category: Option<String>,
}

/// A `content_plan` row as shown by `manage list`.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct PlanItem {
    pub id: i32,
    pub keyword: String,
    pub target_age: Option<String>,
    pub status: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values for a new `content_plan` row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPlanItem<'a> {
    pub keyword: &'a str,
    pub target_age: Option<&'a str>,
    pub format: &'a str,
    pub voice_tone: &'a str,
    pub status: &'a str,
    pub category: Option<&'a str>,
}

/// An eligible row of `topic_templates`.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Template {
    pub id: i32,
    pub template: String,
    pub target_age: Option<String>,
    pub category: Option<String>,
    pub weight: f64,
}

/// Reads and writes the planning tables. The Postgres implementation runs every
/// call inside one transaction; the caller decides when to commit.
#[allow(async_fn_in_trait)]
pub trait PlanStore {
    async fn enabled_sources(&mut self) -> Result<Vec<Source>>;

    /// Insert unless `keyword` already exists. Returns the new id, or `None` on a duplicate.
    async fn insert_item(&mut self, item: &NewPlanItem<'_>) -> Result<Option<i32>>;

    async fn touch_source(&mut self, source_id: i32, at: DateTime<Utc>) -> Result<()>;

    /// Newest first. `status = None` means every status; `limit = None` means no limit.
    async fn list_items(&mut self, status: Option<&str>, limit: Option<i64>) -> Result<Vec<PlanItem>>;

    /// Enabled templates never used or last used at or before `cutoff`.
    async fn eligible_templates(&mut self, cutoff: DateTime<Utc>) -> Result<Vec<Template>>;

    async fn mark_template_used(&mut self, template_id: i32, at: DateTime<Utc>) -> Result<()>;
}
