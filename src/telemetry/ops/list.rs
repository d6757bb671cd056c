use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct List;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Query, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Query => "query", Phase::Render => "render" } }
    fn span(&self) -> Span { match self { Phase::Query => info_span!("query"), Phase::Render => info_span!("render") } }
}

impl OpMarker for List {
    const NAME: &'static str = "list";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("list") }
}
