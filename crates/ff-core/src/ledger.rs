//! Ordered, append-only ledger of assumptions and plausibility warnings.
//!
//! Every stage of a run appends here whenever it substitutes a default for a
//! missing input or notices a value that looks wrong without being invalid.
//! The ledger travels with the result record so an auditor can reconstruct
//! every non-explicit decision made during the run.

use crate::numeric::{Real, guarded_div};

/// What a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntryKind {
    /// A default or inference replaced a value the input did not state.
    Assumption,
    /// A non-blocking calculation warning.
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEntry {
    /// Position in the ledger, starting at 0.
    pub seq: usize,
    pub kind: EntryKind,
    /// Component id, bus name, or `system`.
    pub subject: String,
    /// Short machine-friendly category, e.g. `transformer.x_r`.
    pub topic: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assumed or inferred value.
    pub fn assume(
        &mut self,
        subject: impl Into<String>,
        topic: impl Into<String>,
        message: impl Into<String>,
    ) {
        let entry = self.push(EntryKind::Assumption, subject, topic, message);
        tracing::debug!(subject = %entry.subject, topic = %entry.topic, "assumed: {}", entry.message);
    }

    /// Record a non-blocking calculation warning.
    pub fn warn(
        &mut self,
        subject: impl Into<String>,
        topic: impl Into<String>,
        message: impl Into<String>,
    ) {
        let entry = self.push(EntryKind::Warning, subject, topic, message);
        tracing::warn!(subject = %entry.subject, topic = %entry.topic, "{}", entry.message);
    }

    fn push(
        &mut self,
        kind: EntryKind,
        subject: impl Into<String>,
        topic: impl Into<String>,
        message: impl Into<String>,
    ) -> &LedgerEntry {
        let seq = self.entries.len();
        self.entries.push(LedgerEntry {
            seq,
            kind,
            subject: subject.into(),
            topic: topic.into(),
            message: message.into(),
        });
        &self.entries[seq]
    }

    /// Divide with a bounded fallback, recording a warning when the guard trips.
    pub fn guarded_div(
        &mut self,
        num: Real,
        den: Real,
        fallback: Real,
        subject: &str,
        what: &str,
    ) -> Real {
        let g = guarded_div(num, den, fallback);
        if g.fell_back {
            self.warn(
                subject,
                "numeric.division_guard",
                format!("{what}: denominator {den:e} is degenerate; using fallback {fallback}"),
            );
        }
        g.value
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn assumptions(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Assumption)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Warning)
    }

    /// Entries whose topic equals `topic`.
    pub fn by_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a LedgerEntry> {
        self.entries.iter().filter(move |e| e.topic == topic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LedgerEntry> {
        self.entries
    }
}
