//! Amalgamator
//!
//! Walks the configured headers in order, classifies every line and folds it
//! into an [`Accumulator`]. Any header that cannot be read aborts the run
//! before anything is emitted.

use std::path::Path;

use headerweld_core::{Config, Error, LineKind, Nesting, Result};
use tracing::{debug, info, warn};

use crate::accumulator::Accumulator;
use crate::amalgamation::Amalgamation;
use crate::classifier::Classifier;

/// Merges a fixed list of headers into one
#[derive(Debug, Clone)]
pub struct Amalgamator {
    config: Config,
    classifier: Classifier,
}

impl Amalgamator {
    /// Validate the config and compile the classification rules
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let classifier = Classifier::new(&config.excluded)?;
        Ok(Self { config, classifier })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Read and merge every configured header from disk
    pub fn run(&self) -> Result<Amalgamation> {
        let mut acc = Accumulator::new();

        for path in self.config.header_paths() {
            let source = read_header(&path)?;
            self.merge_source(&path.display().to_string(), &source, &mut acc);
        }

        let out = acc.finish(&self.config);
        info!(
            "Merged {} headers: {} includes hoisted, {} body lines",
            out.stats.files,
            out.includes.len(),
            out.body.len()
        );
        Ok(out)
    }

    /// Merge in-memory `(name, source)` pairs in the given order
    pub fn merge_sources<'a, I>(&self, sources: I) -> Amalgamation
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut acc = Accumulator::new();
        for (name, source) in sources {
            self.merge_source(name, source, &mut acc);
        }
        acc.finish(&self.config)
    }

    /// Fold one header into the run state.
    ///
    /// Nesting starts `Outside` for every header, whatever the previous one
    /// ended with.
    pub fn merge_source(&self, name: &str, source: &str, acc: &mut Accumulator) {
        let mut nesting = Nesting::Outside;
        let mut lines = 0;

        for line in source.lines() {
            let kind = self.classifier.classify(line, &mut nesting);
            if kind == LineKind::PlainContent && nesting.is_inside() && self.classifier.is_system_include(line) {
                acc.stats_mut().nested_includes += 1;
            }
            acc.fold(kind, line);
            lines += 1;
        }

        let stats = acc.stats_mut();
        stats.files += 1;
        if nesting.is_inside() {
            warn!("{}: unbalanced conditional region at end of file", name);
            stats.unbalanced_files.push(name.to_string());
        }
        debug!("Merged {} ({} lines)", name, lines);
    }
}

fn read_header(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::from_read(path, e))
}
