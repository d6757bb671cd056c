use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;
use tracing::Instrument;

use crate::config::Config;
use crate::store::{PgStore, PlanItem, PlanStore};
use crate::telemetry::{self};
use crate::telemetry::ops::list::Phase as ListPhase;

pub mod table;

/// Status argument meaning "no filter".
pub const ALL_STATUSES: &str = "all";

#[derive(Serialize)]
pub struct TopicList {
    pub status: Option<String>,
    pub total: usize,
    pub items: Vec<PlanItem>,
}

/// `manage list [status]`
pub async fn run(pool: &PgPool, cfg: &Config, status: Option<String>) -> Result<()> {
    let log = telemetry::list();
    let _g = log.root_span_kv([("status", format!("{:?}", status))]).entered();
    let t0 = Instant::now();

    let mut store = PgStore::begin(pool).await?;
    let items = list_topics(&mut store, cfg, status.as_deref()).await?;

    if telemetry::config::json_mode() {
        let status = status_filter(status.as_deref()).map(str::to_string);
        log.result_timed(&TopicList { status, total: items.len(), items }, t0)?;
    } else {
        let _s = log.span(&ListPhase::Render).entered();
        println!("{}", table::render(&items));
    }
    Ok(())
}

/// Unfiltered: the newest `list_limit` rows. Filtered: every row with that status.
pub async fn list_topics<S: PlanStore>(store: &mut S, cfg: &Config, status: Option<&str>) -> Result<Vec<PlanItem>> {
    let log = telemetry::list();
    let filter = status_filter(status);
    let limit = if filter.is_none() { Some(cfg.list_limit) } else { None };
    let items = store.list_items(filter, limit).instrument(log.span(&ListPhase::Query)).await?;
    log.debug(format!("{} row(s) status={:?} limit={:?}", items.len(), filter, limit));
    Ok(items)
}

fn status_filter(status: Option<&str>) -> Option<&str> {
    status.map(str::trim).filter(|s| !s.is_empty() && *s != ALL_STATUSES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn seeded(n: usize) -> MemoryStore {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut store = MemoryStore::default();
        for i in 0..n {
            let status = if i % 3 == 0 { "done" } else { "planning" };
            store.add_item(&format!("topic-{i}"), status, base + Duration::hours(i as i64));
        }
        store
    }

    #[tokio::test]
    async fn unfiltered_is_limited_and_newest_first() {
        let mut store = seeded(30);
        let items = list_topics(&mut store, &Config::default(), None).await.unwrap();
        assert_eq!(items.len(), 20);
        assert_eq!(items[0].keyword, "topic-29");
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn all_keyword_means_unfiltered() {
        let mut store = seeded(30);
        let items = list_topics(&mut store, &Config::default(), Some("all")).await.unwrap();
        assert_eq!(items.len(), 20);
    }

    #[tokio::test]
    async fn status_filter_drops_the_limit() {
        let mut store = seeded(90);
        let items = list_topics(&mut store, &Config::default(), Some("done")).await.unwrap();
        assert_eq!(items.len(), 30);
        assert!(items.iter().all(|i| i.status == "done"));
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn same_timestamp_orders_by_id_desc() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut store = MemoryStore::default();
        store.add_item("a", "planning", ts);
        store.add_item("b", "planning", ts);
        let items = list_topics(&mut store, &Config::default(), None).await.unwrap();
        assert_eq!(items[0].keyword, "b");
    }

    #[test]
    fn status_filter_normalizes() {
        assert_eq!(status_filter(None), None);
        assert_eq!(status_filter(Some("all")), None);
        assert_eq!(status_filter(Some("  ")), None);
        assert_eq!(status_filter(Some("done")), Some("done"));
    }
}
