//! Thread-safe diagnostic accumulation.

use parking_lot::Mutex;

use crate::types::{sort_violations, Violation};

/// Collects violations from concurrently analyzed blocks.
///
/// Emission order is whatever the workers produce; [`DiagnosticSink::into_sorted`]
/// restores report order.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    inner: Mutex<Vec<Violation>>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one violation.
    pub fn push(&self, violation: Violation) {
        self.inner.lock().push(violation);
    }

    /// Appends several violations under a single lock.
    pub fn extend(&self, violations: impl IntoIterator<Item = Violation>) {
        let mut guard = self.inner.lock();
        guard.extend(violations);
    }

    /// Number of violations collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the sink, returning violations in report order.
    #[must_use]
    pub fn into_sorted(self) -> Vec<Violation> {
        let mut violations = self.inner.into_inner();
        sort_violations(&mut violations);
        violations
    }
}
