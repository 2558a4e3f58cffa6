// ── Request state ──
//
// The `{loading, last_error}` pair views observe, extended with an
// in-flight counter and a per-operation error map. Only the coordinator
// writes it; views read snapshots through a `watch` channel.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::operation::OperationKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    in_flight: usize,
    last_error: Option<String>,
    errors: BTreeMap<OperationKind, String>,
}

impl RequestState {
    /// True while at least one operation is in flight.
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Message of the most recent failure, cleared whenever an operation starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Most recent failure of one operation kind.
    pub fn error_for(&self, kind: OperationKind) -> Option<&str> {
        self.errors.get(&kind).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<OperationKind, String> {
        &self.errors
    }

    // ── Transitions (coordinator only) ──────────────────────────────

    pub(crate) fn begin(&mut self, kind: OperationKind) {
        self.in_flight += 1;
        self.last_error = None;
        self.errors.remove(&kind);
    }

    pub(crate) fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub(crate) fn record_failure(&mut self, kind: OperationKind, message: String) {
        self.errors.insert(kind, message.clone());
        self.last_error = Some(message);
    }

    pub(crate) fn clear_errors(&mut self) {
        self.last_error = None;
        self.errors.clear();
    }
}
