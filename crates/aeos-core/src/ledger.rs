//! Cost and audit ledger.
//!
//! The router keeps no state between calls. Consumers that want a running
//! session cost or an audit trail feed each [`Routed`] result into a
//! [`CostLedger`]. Audit records live in a bounded ring buffer; the running
//! totals are never reduced by eviction.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use tracing::debug;

use crate::envelope::ToolUsage;
use crate::router::Routed;

/// Records preallocated up front; the ring grows on demand beyond this.
const INITIAL_RECORDS: usize = 64;

/// One recorded dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    /// Division that handled the query.
    pub division: String,
    /// Cost charged.
    pub cost: f64,
    /// Tool usage copied from the envelope.
    pub tool_usage: Vec<ToolUsage>,
    /// Audit log lines copied from the envelope.
    pub logs: Vec<String>,
    /// When the record was taken.
    pub recorded_at: SystemTime,
}

/// Per-division aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionTotals {
    pub division: String,
    pub requests: u64,
    pub cost: f64,
}

#[derive(Debug)]
struct LedgerState {
    records: VecDeque<AuditRecord>,
    capacity: usize,
    total_cost: f64,
    requests: u64,
    by_division: BTreeMap<String, (u64, f64)>,
}

impl LedgerState {
    fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(INITIAL_RECORDS)),
            capacity,
            total_cost: 0.0,
            requests: 0,
            by_division: BTreeMap::new(),
        }
    }

    fn push(&mut self, record: AuditRecord) {
        self.total_cost += record.cost;
        self.requests += 1;
        let entry = self
            .by_division
            .entry(record.division.clone())
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += record.cost;

        if self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }
}

/// Shared, clone-able ledger handle.
#[derive(Debug, Clone)]
pub struct CostLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl CostLedger {
    /// Create a ledger retaining at most `capacity` audit records.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState::new(capacity.max(1)))),
        }
    }

    /// Record one dispatch result.
    pub fn record(&self, routed: &Routed) {
        let record = AuditRecord {
            division: routed.division.clone(),
            cost: routed.envelope.cost,
            tool_usage: routed.envelope.tool_usage.clone(),
            logs: routed.envelope.logs.clone(),
            recorded_at: SystemTime::now(),
        };
        debug!(division = %record.division, cost = record.cost, "Ledger record");

        self.lock().push(record);
    }

    /// Sum of every recorded cost, including evicted records.
    pub fn total_cost(&self) -> f64 {
        self.lock().total_cost
    }

    /// Number of dispatches recorded, including evicted records.
    pub fn request_count(&self) -> u64 {
        self.lock().requests
    }

    /// Snapshot of retained audit records, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().records.iter().cloned().collect()
    }

    /// Per-division totals, sorted by division name.
    pub fn cost_by_division(&self) -> Vec<DivisionTotals> {
        self.lock()
            .by_division
            .iter()
            .map(|(division, (requests, cost))| DivisionTotals {
                division: division.clone(),
                requests: *requests,
                cost: *cost,
            })
            .collect()
    }

    /// Number of retained audit records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ledger updates never panic midway, so a poisoned state is still
    /// consistent.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
