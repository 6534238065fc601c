//! Core type definitions

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Classification of a single header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `#include "..."` - its target is one of the merged headers
    LocalInclude,
    /// Include of the optional dependency replaced by the disable directive
    ExcludedExternalInclude,
    /// `#include <...>` outside any conditional region, hoisted to the top
    SystemInclude,
    /// `#pragma once`
    InclusionGuard,
    /// `#if`, `#ifdef` or `#ifndef`
    ConditionalStart,
    /// `#endif`
    ConditionalEnd,
    /// Anything else, kept in the body as-is
    PlainContent,
}

impl LineKind {
    /// All kinds, in rule priority order
    pub const ALL: [LineKind; 7] = [
        LineKind::LocalInclude,
        LineKind::ExcludedExternalInclude,
        LineKind::InclusionGuard,
        LineKind::ConditionalStart,
        LineKind::ConditionalEnd,
        LineKind::SystemInclude,
        LineKind::PlainContent,
    ];

    /// Whether the line is copied into the merged body
    pub fn is_body(&self) -> bool {
        matches!(
            self,
            LineKind::ConditionalStart | LineKind::ConditionalEnd | LineKind::PlainContent
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::LocalInclude => "local_include",
            LineKind::ExcludedExternalInclude => "excluded_external_include",
            LineKind::SystemInclude => "system_include",
            LineKind::InclusionGuard => "inclusion_guard",
            LineKind::ConditionalStart => "conditional_start",
            LineKind::ConditionalEnd => "conditional_end",
            LineKind::PlainContent => "plain_content",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditional-compilation state while walking one header
///
/// `Inside` carries the number of open regions, so an inner `#endif` leaves
/// the enclosing region open. Every header starts `Outside` so an unbalanced
/// region cannot leak into the next file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nesting {
    #[default]
    Outside,
    Inside(NonZeroUsize),
}

impl Nesting {
    /// Number of conditional regions currently open
    pub fn depth(&self) -> usize {
        match self {
            Nesting::Outside => 0,
            Nesting::Inside(depth) => depth.get(),
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, Nesting::Inside(_))
    }

    /// `#if`, `#ifdef`, `#ifndef`
    pub fn enter(&mut self) {
        *self = Nesting::Inside(NonZeroUsize::MIN.saturating_add(self.depth()));
    }

    /// `#endif`; a stray one outside any region stays `Outside`
    pub fn leave(&mut self) {
        *self = match NonZeroUsize::new(self.depth().saturating_sub(1)) {
            Some(depth) => Nesting::Inside(depth),
            None => Nesting::Outside,
        };
    }
}

/// Counters collected during one merge run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Headers read
    pub files: usize,
    /// Total lines classified
    pub lines: usize,
    pub local_includes: usize,
    pub excluded_includes: usize,
    /// System includes seen (before dedup)
    pub system_includes: usize,
    /// System includes left in place because they sat inside a conditional
    pub nested_includes: usize,
    pub guards: usize,
    pub conditionals: usize,
    /// Lines appended to the body
    pub body_lines: usize,
    /// Headers that ended inside a conditional region
    pub unbalanced_files: Vec<String>,
}

impl MergeStats {
    /// Record one classified line
    pub fn record(&mut self, kind: LineKind) {
        self.lines += 1;
        match kind {
            LineKind::LocalInclude => self.local_includes += 1,
            LineKind::ExcludedExternalInclude => self.excluded_includes += 1,
            LineKind::SystemInclude => self.system_includes += 1,
            LineKind::InclusionGuard => self.guards += 1,
            LineKind::ConditionalStart | LineKind::ConditionalEnd => self.conditionals += 1,
            LineKind::PlainContent => {}
        }
        if kind.is_body() {
            self.body_lines += 1;
        }
    }
}
