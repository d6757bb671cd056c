use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Instant;
use tracing::Instrument;

use crate::config::Config;
use crate::store::{NewPlanItem, PgStore, PlanStore, Source};
use crate::telemetry::{self};
use crate::telemetry::ops::fetch::Phase as FetchPhase;

pub mod fetch;
pub mod parse;
pub mod types;

pub use fetch::{FeedFetcher, FetchError, HttpFetcher};
use types::{FeedEntry, FetchReport, SourceSummary};

/// `fetch`: poll every enabled source and plan its unseen entries. Everything is
/// committed in one transaction at the end of the run.
pub async fn run(pool: &PgPool, cfg: &Config) -> Result<FetchReport> {
    let log = telemetry::fetch();
    let _g = log.root_span_kv([
        ("entries_per_source", cfg.entries_per_source.to_string()),
        ("timeout_secs", cfg.fetch_timeout.as_secs().to_string()),
    ]).entered();
    let t0 = Instant::now();

    let fetcher = HttpFetcher::new(cfg.fetch_timeout)?;
    let mut store = PgStore::begin(pool).await?;
    let report = ingest(&mut store, &fetcher, cfg, Utc::now()).await?;
    store.commit().instrument(log.span(&FetchPhase::Commit)).await?;

    if telemetry::config::json_mode() {
        log.result_timed(&report, t0)?;
    } else {
        println!("\n✅ {}개 새 주제 추가됨", report.totals.inserted);
    }
    Ok(report)
}

/// Feed errors are isolated per source; store errors abort the run.
pub async fn ingest<S, F>(store: &mut S, fetcher: &F, cfg: &Config, now: DateTime<Utc>) -> Result<FetchReport>
where
    S: PlanStore,
    F: FeedFetcher,
{
    let log = telemetry::fetch();
    let sources = store.enabled_sources().instrument(log.span(&FetchPhase::LoadSources)).await?;
    log.debug(format!("{} enabled source(s)", sources.len()));

    let mut report = FetchReport::default();
    for source in sources {
        let span = log.span_kv(&FetchPhase::Source, [("source_id", source.id.to_string()), ("url", source.url.clone())]);
        let summary = ingest_source(store, fetcher, cfg, &source).instrument(span.clone()).await?;
        store.touch_source(source.id, now).instrument(span).await?;

        log.source_summary(summary.source_id, summary.inserted, summary.skipped, summary.error.is_some());
        report.totals.sources += 1;
        report.totals.inserted += summary.inserted;
        report.totals.skipped += summary.skipped;
        if summary.error.is_some() {
            report.totals.failed += 1;
        }
        report.per_source.push(summary);
    }

    let t = &report.totals;
    log.totals(t.sources, t.inserted, t.skipped, t.failed);
    Ok(report)
}

async fn ingest_source<S, F>(store: &mut S, fetcher: &F, cfg: &Config, source: &Source) -> Result<SourceSummary>
where
    S: PlanStore,
    F: FeedFetcher,
{
    let log = telemetry::fetch();
    log.info(format!("📡 Fetching: {}", source.name));
    let mut summary = SourceSummary { source_id: source.id, name: source.name.clone(), inserted: 0, skipped: 0, error: None };

    let entries = match fetcher.fetch_entries(&source.url).instrument(log.span(&FetchPhase::FetchFeed)).await {
        Ok(entries) => entries,
        Err(err) => {
            log.warn_kv(&format!("  ⚠️  오류: {err}"), [("source_id", source.id.to_string()), ("url", source.url.clone())]);
            summary.error = Some(err.to_string());
            return Ok(summary);
        }
    };

    let defaults = &cfg.defaults;
    for entry in entries.iter().take(cfg.entries_per_source) {
        let Some(title) = entry.title.as_deref() else {
            summary.skipped += 1;
            log.debug("↩️ skip (no title)");
            continue;
        };
        let item = NewPlanItem {
            keyword: title,
            target_age: Some(defaults.target_age.as_str()),
            format: &defaults.format,
            voice_tone: &defaults.voice_tone,
            status: &defaults.status,
            category: source.category.as_deref(),
        };
        match store.insert_item(&item).instrument(log.span(&FetchPhase::WriteItem)).await? {
            Some(id) => {
                summary.inserted += 1;
                log.info_kv(&format!("  ➕ {title}"), item_fields(id, entry));
            }
            None => {
                summary.skipped += 1;
                log.debug(format!("↩️ skip (already planned): {title} <{}>", entry.link.as_deref().unwrap_or("-")));
            }
        }
    }
    Ok(summary)
}

fn item_fields(id: i32, entry: &FeedEntry) -> [(&'static str, String); 2] {
    [("id", id.to_string()), ("link", entry.link.clone().unwrap_or_default())]
}
