//! Factory array ranges

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_QUALIFIER;

/// Contiguous slice `[start, start + count)` of the factory array
///
/// All factories inside a range produce the same declared type and share
/// the same qualifier. The empty qualifier marks the default group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    start: usize,
    count: usize,
    qualifier: String,
}

impl Range {
    /// Create a new range
    pub fn new(start: usize, count: usize, qualifier: impl Into<String>) -> Self {
        Self {
            start,
            count,
            qualifier: qualifier.into(),
        }
    }

    /// Create a range for the default (unqualified) group
    pub fn unqualified(start: usize, count: usize) -> Self {
        Self::new(start, count, DEFAULT_QUALIFIER)
    }

    /// Offset of the first factory
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of factories
    pub fn count(&self) -> usize {
        self.count
    }

    /// Offset one past the last factory, saturating at `usize::MAX`
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.count)
    }

    /// Offset one past the last factory, `None` if it overflows `usize`
    pub fn checked_end(&self) -> Option<usize> {
        self.start.checked_add(self.count)
    }

    /// Qualifier of this group, empty for the default group
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// Slice bounds into the factory array
    pub fn bounds(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }

    /// Whether the two ranges share at least one slot
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Map the empty qualifier to "no qualifier"
///
/// Lookups treat `Some("")` exactly like `None`: both request the default
/// lookup path.
pub fn normalize_qualifier(qualifier: Option<&str>) -> Option<&str> {
    qualifier.filter(|q| *q != DEFAULT_QUALIFIER)
}
