//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Merge configuration: which headers, in which order, and how to stitch them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the header names are relative to
    pub root: PathBuf,

    /// Headers to merge, in dependency order
    pub headers: Vec<String>,

    /// Emit a single guard line at the top of the merged header
    pub emit_guard: bool,

    /// Guard line written when `emit_guard` is set
    pub guard: String,

    /// Optional dependency stripped from the merged header
    pub excluded: ExcludedDependency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("include/ss"),
            headers: [
                "type_traits.hpp",
                "exception.hpp",
                "function_traits.hpp",
                "restrictions.hpp",
                "common.hpp",
                "setup.hpp",
                "splitter.hpp",
                "extract.hpp",
                "converter.hpp",
                "parser.hpp",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            emit_guard: true,
            guard: "#pragma once".into(),
            excluded: ExcludedDependency::default(),
        }
    }
}

/// The replaceable external dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcludedDependency {
    /// Start of the include target, e.g. `fast_float` matches `<fast_float/fast_float.h>`
    pub include_prefix: String,

    /// Directive emitted once in place of every dropped include
    pub disable_directive: String,
}

impl Default for ExcludedDependency {
    fn default() -> Self {
        Self {
            include_prefix: "fast_float".into(),
            disable_directive: "#define SSP_DISABLE_FAST_FLOAT".into(),
        }
    }
}

impl Config {
    /// Parse a YAML document; absent keys keep their defaults
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::from_read(path, e))?;
        Self::from_yaml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.headers.is_empty() {
            return Err(Error::Config("header list is empty".into()));
        }
        if let Some(blank) = self.headers.iter().position(|h| h.trim().is_empty()) {
            return Err(Error::Config(format!("header #{} has an empty name", blank + 1)));
        }
        if self.excluded.include_prefix.trim().is_empty() {
            return Err(Error::Config("excluded.include_prefix is empty".into()));
        }
        if self.excluded.disable_directive.trim().is_empty() {
            return Err(Error::Config("excluded.disable_directive is empty".into()));
        }
        if self.emit_guard && self.guard.trim().is_empty() {
            return Err(Error::Config("emit_guard is set but guard is empty".into()));
        }
        Ok(())
    }

    /// Header paths joined onto `root`, in merge order
    pub fn header_paths(&self) -> Vec<PathBuf> {
        self.headers.iter().map(|h| self.root.join(h)).collect()
    }

    /// Re-root relative paths onto `base`, used for configs loaded from another directory
    pub fn rebased(mut self, base: &Path) -> Self {
        if self.root.is_relative() {
            self.root = base.join(&self.root);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.headers.len(), 10);
        assert_eq!(config.headers.first().map(String::as_str), Some("type_traits.hpp"));
        assert_eq!(config.headers.last().map(String::as_str), Some("parser.hpp"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str("root: src\nheaders: [a.h, b.h]\n").unwrap();
        assert_eq!(config.root, PathBuf::from("src"));
        assert_eq!(config.headers, vec!["a.h", "b.h"]);
        assert!(config.emit_guard);
        assert_eq!(config.excluded, ExcludedDependency::default());
    }

    #[test]
    fn test_excluded_override() {
        let yaml = r##"
headers: [a.h]
emit_guard: false
excluded:
  include_prefix: ryu
  disable_directive: "#define NO_RYU"
"##;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(!config.emit_guard);
        assert_eq!(config.excluded.include_prefix, "ryu");
        assert_eq!(config.excluded.disable_directive, "#define NO_RYU");
    }

    #[test]
    fn test_empty_header_list_rejected() {
        let err = Config::from_yaml_str("headers: []\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_yaml_rejected() {
        let err = Config::from_yaml_str("headers: {not: [a list\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_header_paths_in_order() {
        let config = Config {
            root: PathBuf::from("inc"),
            headers: vec!["z.h".into(), "a.h".into()],
            ..Config::default()
        };
        assert_eq!(
            config.header_paths(),
            vec![PathBuf::from("inc/z.h"), PathBuf::from("inc/a.h")]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_rebased_only_relative() {
        let config = Config::default().rebased(Path::new("/work"));
        assert_eq!(config.root, PathBuf::from("/work/include/ss"));

        let absolute = Config {
            root: PathBuf::from("/abs"),
            ..Config::default()
        };
        assert_eq!(absolute.rebased(Path::new("/work")).root, PathBuf::from("/abs"));
    }
}
