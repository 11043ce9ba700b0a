use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Diagnostic counters for one solve invocation.
///
/// These are telemetry, not correctness data: `steps` is the number of search
/// nodes visited (the value bounded by the engine's ceiling), `backtracks`
/// counts abandoned branches, and `consistency_checks` counts proposed
/// values tested against the constraint index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub steps: u64,
    pub backtracks: u64,
    pub consistency_checks: u64,
}

/// Renders a run summary for console reporting.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Steps"),
        Cell::new("Backtracks"),
        Cell::new("Consistency Checks"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(&stats.steps.to_string()),
        Cell::new(&stats.backtracks.to_string()),
        Cell::new(&stats.consistency_checks.to_string()),
    ]));
    table.to_string()
}
