use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Fetch;

#[derive(Copy, Clone, Debug)]
pub enum Phase { LoadSources, Source, FetchFeed, WriteItem, Commit }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::LoadSources => "load_sources",
        Phase::Source => "source",
        Phase::FetchFeed => "fetch_feed",
        Phase::WriteItem => "write_item",
        Phase::Commit => "commit",
    }}
    fn span(&self) -> Span { match self {
        Phase::LoadSources => info_span!("load_sources"),
        Phase::Source => info_span!("source"),
        Phase::FetchFeed => info_span!("fetch_feed"),
        Phase::WriteItem => info_span!("write_item"),
        Phase::Commit => info_span!("commit"),
    }}
}

impl OpMarker for Fetch {
    const NAME: &'static str = "fetch";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("fetch") }
}
