//! High-level SDK for differ.
//!
//! Diff any two `Serialize` values in one call: both sides are normalized
//! into the value model, then handed to the structural diff engine. This is
//! the main entry point for applications embedding differ.

pub mod config;
pub mod diff;
pub mod error;

pub use config::{load_config_json, load_config_toml};
pub use diff::{diff_json, diff_serialize, diff_serialize_with, render_json};
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use differ_engine::{AlignStrategy, DiffConfig, Differ, ROOT_KEY};
pub use differ_normalize::{to_value, NormalizeError};
pub use differ_types::{ChangeField, ChangeKind, ChangeMap, ScalarValue, Value, ValueKind};
