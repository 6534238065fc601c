//! Merged header emission

use std::io::Write;

use headerweld_core::{MergeStats, Result};

/// The final state of a run, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amalgamation {
    /// Unit-level guard, when guard emission is enabled
    pub guard: Option<String>,
    /// Hoisted includes, sorted and deduplicated
    pub includes: Vec<String>,
    /// Written once in place of every dropped excluded include
    pub disable_directive: String,
    pub body: Vec<String>,
    pub stats: MergeStats,
}

/// First line where a rendered header and an existing file disagree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMismatch {
    /// 1-based line number
    pub line: usize,
    /// What the merge produces, terminator included; `None` past its end
    pub expected: Option<String>,
    /// What the existing file has, `None` past its end
    pub found: Option<String>,
}

impl std::fmt::Display for LineMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |s: &Option<String>| match s {
            Some(text) => format!("{text:?}"),
            None => "<end of file>".to_string(),
        };
        write!(
            f,
            "line {}: expected {}, found {}",
            self.line,
            show(&self.expected),
            show(&self.found)
        )
    }
}

impl Amalgamation {
    /// Output lines in emission order: guard, includes, disable directive, body
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.guard
            .as_deref()
            .into_iter()
            .chain(self.includes.iter().map(String::as_str))
            .chain(std::iter::once(self.disable_directive.as_str()))
            .chain(self.body.iter().map(String::as_str))
    }

    /// Render the whole header; every line ends with `\n`
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Compare byte for byte against an existing merged header.
    ///
    /// Line terminators are part of each compared line, so a CRLF file or a
    /// missing final newline is reported as stale.
    pub fn first_mismatch(&self, existing: &str) -> Option<LineMismatch> {
        let rendered = self.render();
        if rendered == existing {
            return None;
        }

        let mut ours = rendered.split_inclusive('\n');
        let mut theirs = existing.split_inclusive('\n');
        let mut line = 0;

        loop {
            line += 1;
            match (ours.next(), theirs.next()) {
                (Some(a), Some(b)) if a == b => continue,
                (a, b) => {
                    return Some(LineMismatch {
                        line,
                        expected: a.map(str::to_string),
                        found: b.map(str::to_string),
                    })
                }
            }
        }
    }
}
