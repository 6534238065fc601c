//! Run-scoped merge state
//!
//! Grows monotonically while headers are folded in and is consumed once by
//! [`Accumulator::finish`].

use std::collections::BTreeSet;

use headerweld_core::{Config, LineKind, MergeStats};

use crate::amalgamation::Amalgamation;

/// Deduplicated include set plus the ordered body
#[derive(Debug, Default)]
pub struct Accumulator {
    /// Hoisted system includes; a BTreeSet keeps them sorted for emission
    includes: BTreeSet<String>,
    /// Body lines in cross-file order
    body: Vec<String>,
    stats: MergeStats,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified line into the run state
    pub fn fold(&mut self, kind: LineKind, line: &str) {
        self.stats.record(kind);
        match kind {
            LineKind::SystemInclude => {
                self.includes.insert(line.trim_end().to_string());
            }
            LineKind::ConditionalStart | LineKind::ConditionalEnd | LineKind::PlainContent => {
                self.body.push(line.to_string());
            }
            LineKind::LocalInclude | LineKind::ExcludedExternalInclude | LineKind::InclusionGuard => {}
        }
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(String::as_str)
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn stats(&self) -> &MergeStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut MergeStats {
        &mut self.stats
    }

    /// Freeze the run state into the emitted header
    pub fn finish(self, config: &Config) -> Amalgamation {
        Amalgamation {
            guard: config.emit_guard.then(|| config.guard.clone()),
            includes: self.includes.into_iter().collect(),
            disable_directive: config.excluded.disable_directive.clone(),
            body: self.body,
            stats: self.stats,
        }
    }
}
