use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Generate;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Select, WriteItem, MarkUsed, Commit }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Select => "select",
        Phase::WriteItem => "write_item",
        Phase::MarkUsed => "mark_used",
        Phase::Commit => "commit",
    }}
    fn span(&self) -> Span { match self {
        Phase::Select => info_span!("select"),
        Phase::WriteItem => info_span!("write_item"),
        Phase::MarkUsed => info_span!("mark_used"),
        Phase::Commit => info_span!("commit"),
    }}
}

impl OpMarker for Generate {
    const NAME: &'static str = "generate";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("generate") }
}
