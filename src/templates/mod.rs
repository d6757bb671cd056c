use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;
use tracing::Instrument;

use crate::config::Config;
use crate::store::{NewPlanItem, PgStore, PlanStore};
use crate::telemetry::{self};
use crate::telemetry::ops::generate::Phase as GeneratePhase;

pub mod select;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GenerateOutcome {
    /// Nothing enabled and out of cooldown; no writes happened.
    NoEligible,
    Created { id: i32, template_id: i32, keyword: String },
    /// The keyword was already planned; only the template's cooldown was restarted.
    Duplicate { template_id: i32, keyword: String },
}

/// `manage generate`
pub async fn run(pool: &PgPool, cfg: &Config) -> Result<GenerateOutcome> {
    let log = telemetry::generate();
    let _g = log.root_span_kv([("cooldown_days", cfg.template_cooldown.num_days().to_string())]).entered();
    let t0 = Instant::now();

    let mut store = PgStore::begin(pool).await?;
    let mut rng = rand::rng();
    let outcome = generate(&mut store, cfg, Utc::now(), &mut rng).await?;
    if outcome != GenerateOutcome::NoEligible {
        store.commit().instrument(log.span(&GeneratePhase::Commit)).await?;
    }

    if telemetry::config::json_mode() {
        log.result_timed(&outcome, t0)?;
    } else {
        match &outcome {
            GenerateOutcome::NoEligible => println!("사용 가능한 템플릿이 없습니다."),
            GenerateOutcome::Created { id, keyword, .. } => println!("\n✅ 새 주제 생성 (ID: {id}): {keyword}"),
            GenerateOutcome::Duplicate { keyword, .. } => println!("\n↩️ 이미 계획된 주제입니다: {keyword}"),
        }
    }
    Ok(outcome)
}

pub async fn generate<S, R>(store: &mut S, cfg: &Config, now: DateTime<Utc>, rng: &mut R) -> Result<GenerateOutcome>
where
    S: PlanStore,
    R: Rng + ?Sized,
{
    let log = telemetry::generate();
    let cutoff = now - cfg.template_cooldown;
    let candidates = store.eligible_templates(cutoff).instrument(log.span(&GeneratePhase::Select)).await?;
    let Some(chosen) = select::pick_weighted(&candidates, rng) else {
        log.info("ℹ️  No eligible template");
        return Ok(GenerateOutcome::NoEligible);
    };
    log.debug(format!("picked template {} of {} candidate(s)", chosen.id, candidates.len()));

    let placeholders = select::unfilled_placeholders(&chosen.template);
    if !placeholders.is_empty() {
        log.warn_kv(
            &format!("⚠️  Template {} has unfilled placeholders; text is used verbatim", chosen.id),
            [("placeholders", placeholders.join(","))],
        );
    }

    let defaults = &cfg.defaults;
    let item = NewPlanItem {
        keyword: &chosen.template,
        target_age: chosen.target_age.as_deref(),
        format: &defaults.format,
        voice_tone: &defaults.voice_tone,
        status: &defaults.status,
        category: chosen.category.as_deref(),
    };
    let inserted = store.insert_item(&item).instrument(log.span(&GeneratePhase::WriteItem)).await?;
    store.mark_template_used(chosen.id, now).instrument(log.span(&GeneratePhase::MarkUsed)).await?;

    let keyword = chosen.template.clone();
    Ok(match inserted {
        Some(id) => GenerateOutcome::Created { id, template_id: chosen.id, keyword },
        None => GenerateOutcome::Duplicate { template_id: chosen.id, keyword },
    })
}
