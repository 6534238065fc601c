//! headerweld Merge Engine
//!
//! Turns an ordered list of headers into one standalone header.
//!
//! ## Modules
//!
//! - `classifier` - Per-line directive classification
//! - `accumulator` - Deduplicated include set and ordered body
//! - `amalgamator` - Reads headers in order and drives the merge
//! - `amalgamation` - Emission of the merged header

pub mod accumulator;
pub mod amalgamation;
pub mod amalgamator;
pub mod classifier;

pub use accumulator::Accumulator;
pub use amalgamation::{Amalgamation, LineMismatch};
pub use amalgamator::Amalgamator;
pub use classifier::{ClassifiedLine, Classifier};

use headerweld_core::{Config, Result};

/// Merge the headers described by `config`
pub fn amalgamate(config: Config) -> Result<Amalgamation> {
    Amalgamator::new(config)?.run()
}
