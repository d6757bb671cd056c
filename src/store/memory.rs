use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use super::{NewPlanItem, PlanItem, PlanStore, Source, Template};

#[derive(Clone, Debug)]
pub struct SourceRow {
    pub source: Source,
    pub enabled: bool,
    pub last_fetched: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct ItemRow {
    pub item: PlanItem,
    pub format: Option<String>,
    pub voice_tone: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TemplateRow {
    pub template: Template,
    pub enabled: bool,
    pub last_used: Option<DateTime<Utc>>,
}

/// In-process stand-in for the planning tables.
#[derive(Default)]
pub struct MemoryStore {
    pub sources: Vec<SourceRow>,
    pub items: Vec<ItemRow>,
    pub templates: Vec<TemplateRow>,
    /// Makes `insert_item` fail, to exercise error paths.
    pub fail_inserts: bool,
}

impl MemoryStore {
    pub fn add_source(&mut self, id: i32, url: &str, category: Option<&str>, enabled: bool) {
        self.sources.push(SourceRow {
            source: Source { id, name: format!("source-{id}"), url: url.to_string(), category: category.map(str::to_string) },
            enabled,
            last_fetched: None,
        });
    }

    pub fn add_item(&mut self, keyword: &str, status: &str, created_at: DateTime<Utc>) -> i32 {
        let id = self.next_item_id();
        self.items.push(ItemRow {
            item: PlanItem {
                id,
                keyword: keyword.to_string(),
                target_age: None,
                status: status.to_string(),
                category: None,
                created_at,
            },
            format: None,
            voice_tone: None,
        });
        id
    }

    pub fn add_template(&mut self, id: i32, text: &str, weight: f64, enabled: bool, last_used: Option<DateTime<Utc>>) {
        self.templates.push(TemplateRow {
            template: Template {
                id,
                template: text.to_string(),
                target_age: Some("10대".to_string()),
                category: Some(format!("cat-{id}")),
                weight,
            },
            enabled,
            last_used,
        });
    }

    pub fn source(&self, id: i32) -> &SourceRow {
        self.sources.iter().find(|s| s.source.id == id).expect("source exists")
    }

    pub fn template(&self, id: i32) -> &TemplateRow {
        self.templates.iter().find(|t| t.template.id == id).expect("template exists")
    }

    fn next_item_id(&self) -> i32 {
        self.items.iter().map(|r| r.item.id).max().unwrap_or(0) + 1
    }
}

impl PlanStore for MemoryStore {
    async fn enabled_sources(&mut self) -> Result<Vec<Source>> {
        let mut out: Vec<Source> = self.sources.iter().filter(|s| s.enabled).map(|s| s.source.clone()).collect();
        out.sort_by_key(|s| s.id);
        Ok(out)
    }

    async fn insert_item(&mut self, item: &NewPlanItem<'_>) -> Result<Option<i32>> {
        if self.fail_inserts {
            bail!("insert rejected");
        }
        if self.items.iter().any(|r| r.item.keyword == item.keyword) {
            return Ok(None);
        }
        let id = self.next_item_id();
        self.items.push(ItemRow {
            item: PlanItem {
                id,
                keyword: item.keyword.to_string(),
                target_age: item.target_age.map(str::to_string),
                status: item.status.to_string(),
                category: item.category.map(str::to_string),
                created_at: Utc::now(),
            },
            format: Some(item.format.to_string()),
            voice_tone: Some(item.voice_tone.to_string()),
        });
        Ok(Some(id))
    }

    async fn touch_source(&mut self, source_id: i32, at: DateTime<Utc>) -> Result<()> {
        if let Some(row) = self.sources.iter_mut().find(|s| s.source.id == source_id) {
            row.last_fetched = Some(at);
        }
        Ok(())
    }

    async fn list_items(&mut self, status: Option<&str>, limit: Option<i64>) -> Result<Vec<PlanItem>> {
        let mut rows: Vec<PlanItem> = self
            .items
            .iter()
            .filter(|r| status.is_none_or(|s| r.item.status == s))
            .map(|r| r.item.clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(n) = limit {
            rows.truncate(n.max(0) as usize);
        }
        Ok(rows)
    }

    async fn eligible_templates(&mut self, cutoff: DateTime<Utc>) -> Result<Vec<Template>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| t.enabled && t.last_used.is_none_or(|used| used <= cutoff))
            .map(|t| t.template.clone())
            .collect())
    }

    async fn mark_template_used(&mut self, template_id: i32, at: DateTime<Utc>) -> Result<()> {
        if let Some(row) = self.templates.iter_mut().find(|t| t.template.id == template_id) {
            row.last_used = Some(at);
        }
        Ok(())
    }
}
