//! Key-wise diff over maps.
//!
//! Keys only in `before` are deletions, keys only in `after` are insertions,
//! and keys on both sides are diffed recursively. Unchanged keys are left
//! out of the result.

use std::collections::BTreeMap;

use differ_types::{ChangeField, ChangeMap, Value};

use crate::differ::Differ;

impl Differ {
    /// Diff two maps over the union of their keys.
    pub fn diff_map(&self, before: &BTreeMap<String, Value>, after: &BTreeMap<String, Value>) -> ChangeMap {
        let mut changes = ChangeMap::new();

        // Removed, modified and unchanged keys.
        for (key, old_val) in before {
            match after.get(key) {
                Some(new_val) => {
                    if let Some(field) = self.diff_node(key, old_val, new_val) {
                        changes.insert(field);
                    }
                }
                None => changes.insert(ChangeField::deleted(key.as_str(), old_val.clone())),
            }
        }

        // Added keys.
        for (key, new_val) in after {
            if !before.contains_key(key) {
                changes.insert(ChangeField::inserted(key.as_str(), new_val.clone()));
            }
        }

        changes
    }
}
