//! The diff orchestrator.
//!
//! [`Differ`] is the single recursive entry point. It dispatches each
//! `(before, after)` pair on value kind:
//!
//! | before \ after | Null      | Scalar    | List      | Map       |
//! |----------------|-----------|-----------|-----------|-----------|
//! | Null           | unchanged | inserted  | inserted  | inserted  |
//! | Scalar         | deleted   | compare   | replaced  | replaced  |
//! | List           | deleted   | replaced  | list diff | replaced  |
//! | Map            | deleted   | replaced  | replaced  | map diff  |
//!
//! A kind mismatch is reported as a single replaced leaf carrying both whole
//! values; the engine never recurses into, or fails on, mismatched kinds.

use differ_types::{ChangeField, ChangeMap, Value};
use tracing::debug;

use crate::config::DiffConfig;
use crate::scalar::compare_scalars;

/// Key used for the root entry when a non-container pair is diffed.
pub const ROOT_KEY: &str = "";

/// Structural diff engine.
///
/// Cheap to construct and free of interior state; share one instance across
/// threads or build a fresh one per call.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    config: DiffConfig,
}

impl Differ {
    /// Create a differ with the given configuration.
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff two values.
    ///
    /// For two maps or two lists the result is the container's own change
    /// map. For any other pair it holds at most one entry, under the empty
    /// key. Use [`ChangeMap::has_changes`] for the overall verdict.
    pub fn diff(&self, before: &Value, after: &Value) -> ChangeMap {
        self.diff_keyed(ROOT_KEY, before, after)
    }

    /// Diff two values, naming the root entry `key`.
    ///
    /// `key` only appears in the result when the pair is not two maps or two
    /// lists; for container pairs it is used solely to pick the identity
    /// field of a top-level list.
    pub fn diff_keyed(&self, key: &str, before: &Value, after: &Value) -> ChangeMap {
        debug!(key, before = %before.kind(), after = %after.kind(), "diff");

        let changes = match (before, after) {
            (Value::Map(b), Value::Map(a)) => self.diff_map(b, a),
            (Value::List(b), Value::List(a)) => self.diff_list(key, b, a),
            _ => self.diff_node(key, before, after).into_iter().collect(),
        };

        debug!(
            entries = changes.len(),
            insertions = changes.insertions(),
            deletions = changes.deletions(),
            modifications = changes.modifications(),
            "diff complete"
        );
        changes
    }

    /// Diff a single node, returning its change field.
    ///
    /// Returns `None` when the two sides are equal and unchanged entries
    /// were not requested.
    pub(crate) fn diff_node(&self, key: &str, before: &Value, after: &Value) -> Option<ChangeField> {
        match (before, after) {
            (Value::Null, Value::Null) => self.unchanged(key, after),
            (Value::Null, _) => Some(ChangeField::inserted(key, after.clone())),
            (_, Value::Null) => Some(ChangeField::deleted(key, before.clone())),
            (Value::Scalar(b), Value::Scalar(a)) => {
                if compare_scalars(b, a) {
                    Some(ChangeField::replaced(key, before.clone(), after.clone()))
                } else {
                    self.unchanged(key, after)
                }
            }
            (Value::Map(b), Value::Map(a)) => {
                let children = self.diff_map(b, a);
                self.container(key, before, after, children)
            }
            (Value::List(b), Value::List(a)) => {
                let children = self.diff_list(key, b, a);
                self.container(key, before, after, children)
            }
            _ => {
                debug!(key, before = %before.kind(), after = %after.kind(), "kind mismatch");
                Some(ChangeField::replaced(key, before.clone(), after.clone()))
            }
        }
    }

    fn container(&self, key: &str, before: &Value, after: &Value, children: ChangeMap) -> Option<ChangeField> {
        if children.has_changes() {
            Some(ChangeField::modified(key, before.clone(), after.clone(), children))
        } else {
            self.unchanged(key, after)
        }
    }

    fn unchanged(&self, key: &str, value: &Value) -> Option<ChangeField> {
        self.config
            .include_unchanged
            .then(|| ChangeField::unchanged(key, value.clone()))
    }
}

/// Diff two values with the default configuration.
pub fn diff(before: &Value, after: &Value) -> ChangeMap {
    Differ::default().diff(before, after)
}
