//! headerweld Core
//!
//! Core types, error taxonomy and configuration shared by the merge engine
//! and the command-line front end.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ExcludedDependency};
pub use error::{Error, Result};
pub use types::*;
