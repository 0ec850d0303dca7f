use crate::core::models::{DatasetRows, EventRecord, IssueRecord};
use crate::core::types::DatasetKind;

/// Last fetched rows per dataset kind.
///
/// Exactly two slots exist and both live as long as the cache does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowCache {
    issues: Vec<IssueRecord>,
    events: Vec<EventRecord>,
}

/// Borrowed view of one cache slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachedRows<'a> {
    Issues(&'a [IssueRecord]),
    Events(&'a [EventRecord]),
}

impl CachedRows<'_> {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Self::Issues(_) => DatasetKind::Issues,
            Self::Events(_) => DatasetKind::Events,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Issues(rows) => rows.len(),
            Self::Events(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot matching the rows' kind. The other slot is untouched.
    pub fn update(&mut self, rows: DatasetRows) {
        match rows {
            DatasetRows::Issues(rows) => self.issues = rows,
            DatasetRows::Events(rows) => self.events = rows,
        }
    }

    /// Current rows for `kind`; empty if never fetched
    pub fn get(&self, kind: DatasetKind) -> CachedRows<'_> {
        match kind {
            DatasetKind::Issues => CachedRows::Issues(&self.issues),
            DatasetKind::Events => CachedRows::Events(&self.events),
        }
    }
}
