//! Plain-text rendering for CLI output.

use std::fmt::Write as _;

use aeos_core::{CostLedger, Registry, Routed, Sealed};

/// A routed result: the response, then tool usage and logs when present.
pub fn routed(routed: &Routed) -> String {
    let envelope = &routed.envelope;
    let mut out = format!("[{}] {}\n", routed.division, envelope.response);
    for usage in &envelope.tool_usage {
        let _ = writeln!(out, "  tool: {} ({} -> {})", usage.tool, usage.input, usage.output);
    }
    for line in &envelope.logs {
        let _ = writeln!(out, "  log: {line}");
    }
    let _ = writeln!(out, "  cost: {:.4}", envelope.cost);
    out
}

/// One line per division, in routing order.
pub fn divisions(registry: &Registry<Sealed>) -> String {
    let mut out = String::new();
    for (position, division) in registry.iter().enumerate() {
        let predicate = match (division.is_fallback(), division.accepts_all()) {
            (true, _) => "fallback",
            (false, true) => "always",
            (false, false) => "keywords",
        };
        let _ = writeln!(
            out,
            "{:>2}. {:<8} {:<32} {:<9} {:.4}  {}",
            position + 1,
            division.id(),
            division.name(),
            predicate,
            division.cost(),
            division.capabilities().join(", ")
        );
    }
    out
}

/// Per-division totals followed by the session total.
pub fn summary(ledger: &CostLedger) -> String {
    let mut out = String::from("--- session summary ---\n");
    for totals in ledger.cost_by_division() {
        let _ = writeln!(
            out,
            "{:<32} {:>4} requests  {:.4}",
            totals.division, totals.requests, totals.cost
        );
    }
    let _ = writeln!(
        out,
        "{:<32} {:>4} requests  {:.4}",
        "total",
        ledger.request_count(),
        ledger.total_cost()
    );
    out
}
