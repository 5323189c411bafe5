//! Activity ledger: newest-first status lines, bounded.

use iv_api_types::Severity;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub message: String,
    pub severity: Severity,
}

impl LedgerEntry {
    pub fn line(&self) -> String {
        format!("> {}", self.message)
    }

    pub fn color(&self) -> &'static str {
        match self.severity {
            Severity::Error => "#ff4d4d",
            Severity::Info | Severity::Success => "#00f2ff",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    entries: VecDeque<LedgerEntry>,
    capacity: usize,
}

impl Ledger {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an entry; returns the evicted oldest entry when full.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> Option<LedgerEntry> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(LedgerEntry {
            message: message.into(),
            severity,
        });
        evicted
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LedgerEntry> {
        self.entries.front()
    }

}
