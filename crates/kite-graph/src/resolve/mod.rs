//! Whole-package resolution passes.
//!
//! Both passes run after every file is extracted, single-threaded over the
//! aggregate. They turn name-based references into ids and never guess:
//! a name shared by several candidates stays unresolved.

mod index;
mod relationships;
mod symbols;

pub use index::NameIndex;
pub use relationships::{RelationshipRefs, resolve_relationships};
pub use symbols::resolve_symbol_usages;

use serde::{Deserialize, Serialize};

use crate::model::ResolutionStatus;

/// Outcome tally for one relationship kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionCounts {
    pub resolved: usize,
    pub ambiguous: usize,
    /// Includes self-references
    pub unresolved: usize,
}

impl ResolutionCounts {
    pub fn record(&mut self, status: ResolutionStatus) {
        match status {
            ResolutionStatus::Resolved => self.resolved += 1,
            ResolutionStatus::Ambiguous => self.ambiguous += 1,
            ResolutionStatus::Unresolved | ResolutionStatus::SelfReference => {
                self.unresolved += 1
            }
        }
    }

    pub fn total(&self) -> usize {
        self.resolved + self.ambiguous + self.unresolved
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounts {
    pub total: usize,
    pub resolved: usize,
    /// Usages with no findable target (library calls, locals, ...)
    pub dropped: usize,
}

/// Diagnostics of both resolution passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub class_extends: ResolutionCounts,
    pub class_implements: ResolutionCounts,
    pub interface_extends: ResolutionCounts,
    pub symbol_usages: UsageCounts,
}
