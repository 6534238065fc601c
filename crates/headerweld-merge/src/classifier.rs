//! Line Classifier
//!
//! Decides what each header line is: a local include, a hoistable system
//! include, a guard, a conditional boundary, or ordinary body text.
//! Directives are matched at the start of the line with the whitespace the C
//! preprocessor tolerates (`  #  include <x>`); a directive mentioned later in
//! a line (inside a comment, say) is plain content.

use headerweld_core::{Error, ExcludedDependency, LineKind, Nesting, Result};
use regex::Regex;
use serde::Serialize;

const LOCAL_INCLUDE: &str = r#"^\s*#\s*include\s*""#;
const SYSTEM_INCLUDE: &str = r"^\s*#\s*include\s*<";
const GUARD: &str = r"^\s*#\s*pragma\s+once\b";
const CONDITIONAL_START: &str = r"^\s*#\s*if(?:n?def)?\b";
const CONDITIONAL_END: &str = r"^\s*#\s*endif\b";

/// Per-line classifier with precompiled directive patterns
#[derive(Debug, Clone)]
pub struct Classifier {
    local_include: Regex,
    excluded_include: Regex,
    guard: Regex,
    conditional_start: Regex,
    conditional_end: Regex,
    system_include: Regex,
}

/// A line together with its classification, as reported by `classify_source`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    /// 1-based line number
    pub line: usize,
    pub kind: LineKind,
    pub text: String,
}

impl Classifier {
    /// Build a classifier that drops includes of `excluded`
    pub fn new(excluded: &ExcludedDependency) -> Result<Self> {
        let excluded_pattern = format!(
            r"^\s*#\s*include\s*<\s*{}",
            regex::escape(excluded.include_prefix.trim())
        );

        Ok(Self {
            local_include: compile(LOCAL_INCLUDE)?,
            excluded_include: compile(&excluded_pattern)?,
            guard: compile(GUARD)?,
            conditional_start: compile(CONDITIONAL_START)?,
            conditional_end: compile(CONDITIONAL_END)?,
            system_include: compile(SYSTEM_INCLUDE)?,
        })
    }

    /// Classify one line, updating `nesting` on conditional boundaries.
    ///
    /// Rules are tried in priority order, so a line that looks like both a
    /// local and a system include is a local include.
    pub fn classify(&self, line: &str, nesting: &mut Nesting) -> LineKind {
        if self.local_include.is_match(line) {
            return LineKind::LocalInclude;
        }
        if self.excluded_include.is_match(line) {
            return LineKind::ExcludedExternalInclude;
        }
        if self.guard.is_match(line) {
            return LineKind::InclusionGuard;
        }
        if self.conditional_start.is_match(line) {
            nesting.enter();
            return LineKind::ConditionalStart;
        }
        if self.conditional_end.is_match(line) {
            nesting.leave();
            return LineKind::ConditionalEnd;
        }
        if self.system_include.is_match(line) {
            // Hoisting a conditional include would make it unconditional
            return match nesting {
                Nesting::Outside => LineKind::SystemInclude,
                Nesting::Inside(_) => LineKind::PlainContent,
            };
        }
        LineKind::PlainContent
    }

    /// Whether the line is an angle-bracket include, ignoring nesting
    pub fn is_system_include(&self, line: &str) -> bool {
        self.system_include.is_match(line)
    }

    /// Classify a whole header starting outside any conditional region
    pub fn classify_source(&self, source: &str) -> Vec<ClassifiedLine> {
        let mut nesting = Nesting::Outside;
        source
            .lines()
            .enumerate()
            .map(|(idx, text)| ClassifiedLine {
                line: idx + 1,
                kind: self.classify(text, &mut nesting),
                text: text.to_string(),
            })
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Config(format!("invalid pattern {pattern:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&ExcludedDependency::default()).unwrap()
    }

    fn kind(line: &str) -> LineKind {
        classifier().classify(line, &mut Nesting::Outside)
    }

    fn inside(depth: usize) -> Nesting {
        let mut nesting = Nesting::Outside;
        for _ in 0..depth {
            nesting.enter();
        }
        nesting
    }

    #[test]
    fn test_local_include() {
        assert_eq!(kind(r#"#include "extract.hpp""#), LineKind::LocalInclude);
        assert_eq!(kind(r#"  #  include"setup.hpp""#), LineKind::LocalInclude);
    }

    #[test]
    fn test_excluded_include_ignores_nesting() {
        let c = classifier();
        let line = "#include <fast_float/fast_float.h>";
        assert_eq!(c.classify(line, &mut Nesting::Outside), LineKind::ExcludedExternalInclude);

        let mut nesting = inside(1);
        assert_eq!(c.classify(line, &mut nesting), LineKind::ExcludedExternalInclude);
        assert_eq!(nesting, inside(1));
    }

    #[test]
    fn test_guard() {
        assert_eq!(kind("#pragma once"), LineKind::InclusionGuard);
        assert_eq!(kind("# pragma  once  "), LineKind::InclusionGuard);
        assert_eq!(kind("#pragma pack(1)"), LineKind::PlainContent);
    }

    #[test]
    fn test_conditionals_toggle_nesting() {
        let c = classifier();
        for open in ["#if __unix__", "#ifdef SS_THROW_ON_INVALID", "#ifndef SSP_DISABLE_FAST_FLOAT"] {
            let mut nesting = Nesting::Outside;
            assert_eq!(c.classify(open, &mut nesting), LineKind::ConditionalStart);
            assert_eq!(nesting, inside(1));
        }

        let mut nesting = inside(1);
        assert_eq!(c.classify("#else", &mut nesting), LineKind::PlainContent);
        assert_eq!(c.classify("#elif defined(X)", &mut nesting), LineKind::PlainContent);
        assert_eq!(nesting, inside(1));

        assert_eq!(c.classify("#endif", &mut nesting), LineKind::ConditionalEnd);
        assert_eq!(nesting, Nesting::Outside);
    }

    #[test]
    fn test_inner_endif_keeps_outer_region_open() {
        let c = classifier();
        let mut nesting = Nesting::Outside;
        assert_eq!(c.classify("#if A", &mut nesting), LineKind::ConditionalStart);
        assert_eq!(c.classify("#ifdef B", &mut nesting), LineKind::ConditionalStart);
        assert_eq!(c.classify("#endif", &mut nesting), LineKind::ConditionalEnd);
        assert_eq!(nesting, inside(1));
        assert_eq!(c.classify("#include <map>", &mut nesting), LineKind::PlainContent);
        assert_eq!(c.classify("#endif", &mut nesting), LineKind::ConditionalEnd);
        assert_eq!(c.classify("#include <map>", &mut nesting), LineKind::SystemInclude);
    }

    #[test]
    fn test_if_prefix_is_not_conditional() {
        assert_eq!(kind("#iffy"), LineKind::PlainContent);
        assert_eq!(kind("#endiff"), LineKind::PlainContent);
    }

    #[test]
    fn test_system_include_hoisting_depends_on_nesting() {
        let c = classifier();
        assert_eq!(c.classify("#include <vector>", &mut Nesting::Outside), LineKind::SystemInclude);
        assert_eq!(c.classify("#include <array>", &mut inside(1)), LineKind::PlainContent);
        assert!(c.is_system_include("#include <array>"));
    }

    #[test]
    fn test_local_wins_over_system() {
        assert_eq!(kind(r#"#include "a.hpp" // was <a.hpp>"#), LineKind::LocalInclude);
    }

    #[test]
    fn test_mid_line_directive_is_content() {
        assert_eq!(kind("// #include <vector>"), LineKind::PlainContent);
        assert_eq!(kind(r##"const char* s = "#pragma once";"##), LineKind::PlainContent);
    }

    #[test]
    fn test_custom_excluded_prefix_is_escaped() {
        let c = Classifier::new(&ExcludedDependency {
            include_prefix: "boost/spirit.hpp".into(),
            disable_directive: "#define NO_SPIRIT".into(),
        })
        .unwrap();
        let mut nesting = Nesting::Outside;
        assert_eq!(
            c.classify("#include <boost/spirit.hpp>", &mut nesting),
            LineKind::ExcludedExternalInclude
        );
        assert_eq!(
            c.classify("#include <boost/spiritXhpp>", &mut nesting),
            LineKind::SystemInclude
        );
    }

    #[test]
    fn test_classify_source_numbers_lines() {
        let source = "#pragma once\n#ifndef X\n#include <array>\n#endif\n#include <vector>\n";
        let lines = classifier().classify_source(source);
        let kinds: Vec<_> = lines.iter().map(|l| (l.line, l.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (1, LineKind::InclusionGuard),
                (2, LineKind::ConditionalStart),
                (3, LineKind::PlainContent),
                (4, LineKind::ConditionalEnd),
                (5, LineKind::SystemInclude),
            ]
        );
    }
}
