use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use super::{NewPlanItem, PlanItem, PlanStore, Source, Template};

pub struct PgStore {
    tx: Transaction<'static, Postgres>,
}

impl PgStore {
    pub async fn begin(pool: &PgPool) -> Result<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl PlanStore for PgStore {
    async fn enabled_sources(&mut self) -> Result<Vec<Source>> {
        let rows = sqlx::query_as::<_, Source>(
            r#"
            SELECT id, name, url, category
            FROM rss_sources
            WHERE enabled = TRUE
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    // The NOT EXISTS guard dedups on tables that predate the unique index.
    async fn insert_item(&mut self, item: &NewPlanItem<'_>) -> Result<Option<i32>> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO content_plan (keyword, target_age, format, voice_tone, status, category)
            SELECT $1::TEXT, $2::TEXT, $3::TEXT, $4::TEXT, $5::TEXT, $6::TEXT
            WHERE NOT EXISTS (SELECT 1 FROM content_plan WHERE keyword = $1::TEXT)
            ON CONFLICT DO NOTHING
            RETURNING id
            "#,
        )
        .bind(item.keyword)
        .bind(item.target_age)
        .bind(item.format)
        .bind(item.voice_tone)
        .bind(item.status)
        .bind(item.category)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(id)
    }

    async fn touch_source(&mut self, source_id: i32, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE rss_sources SET last_fetched = $2 WHERE id = $1")
            .bind(source_id)
            .bind(at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn list_items(&mut self, status: Option<&str>, limit: Option<i64>) -> Result<Vec<PlanItem>> {
        // LIMIT NULL is no limit
        let rows = sqlx::query_as::<_, PlanItem>(
            r#"
            SELECT id, keyword, target_age, COALESCE(status, '') AS status, category,
                   created_at::TIMESTAMPTZ AS created_at
            FROM content_plan
            WHERE ($1::TEXT IS NULL OR status = $1::TEXT)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(status)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn eligible_templates(&mut self, cutoff: DateTime<Utc>) -> Result<Vec<Template>> {
        let rows = sqlx::query_as::<_, Template>(
            r#"
            SELECT id, template, target_age, category,
                   COALESCE(weight, 1.0)::FLOAT8 AS weight
            FROM topic_templates
            WHERE enabled = TRUE
              AND (last_used IS NULL OR last_used <= $1)
            ORDER BY id
            "#,
        )
        .bind(cutoff)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(rows)
    }

    async fn mark_template_used(&mut self, template_id: i32, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE topic_templates SET last_used = $2 WHERE id = $1")
            .bind(template_id)
            .bind(at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }
}
