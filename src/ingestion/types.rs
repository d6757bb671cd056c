use serde::Serialize;

/// The parts of a feed entry the planner cares about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl FeedEntry {
    pub fn from_rss_item(item: &rss::Item) -> Self {
        FeedEntry { title: clean_title(item.title()), link: item.link().map(str::to_string) }
    }

    pub fn from_atom_entry(entry: &atom_syndication::Entry) -> Self {
        FeedEntry {
            title: clean_title(Some(entry.title().value.as_str())),
            link: entry.links().first().map(|l| l.href().to_string()),
        }
    }
}

fn clean_title(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source_id: i32,
    pub name: String,
    pub inserted: usize,
    pub skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchTotals {
    pub sources: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct FetchReport {
    pub totals: FetchTotals,
    pub per_source: Vec<SourceSummary>,
}
