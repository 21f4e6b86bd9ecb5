//! The change tree produced by a diff.
//!
//! A [`ChangeMap`] holds one [`ChangeField`] per key that differs between the
//! two compared containers. Nested containers that changed carry their own
//! `ChangeMap` inside [`ChangeKind::Modified`], so the result mirrors the
//! shape of the input down to the deepest change.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// What happened at a single node of the change tree.
///
/// Insertion and deletion are mutually exclusive leaf states; a node is
/// either a leaf replacement or a container holding nested changes, never
/// both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "children", rename_all = "snake_case")]
pub enum ChangeKind {
    /// Both sides are equal. Only reported when the caller asked for
    /// unchanged entries.
    Unchanged,
    /// The key or position exists only in the "after" value.
    Inserted,
    /// The key or position exists only in the "before" value.
    Deleted,
    /// The leaf value was replaced (different scalar, or different kinds).
    Replaced,
    /// A container whose descendants changed.
    Modified(ChangeMap),
}

/// One entry in a change tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeField {
    /// Map key, or the decimal index for list elements.
    ///
    /// A deleted list element whose index is already held by a changed
    /// element is keyed `~{index}` instead, so list keys are not always
    /// plain integers.
    pub key: String,
    /// What changed at this node.
    pub change: ChangeKind,
    /// The value on the "before" side (`Null` for insertions).
    pub before: Value,
    /// The value on the "after" side (`Null` for deletions).
    pub after: Value,
}

impl ChangeField {
    /// A key or position that only exists on the "after" side.
    pub fn inserted(key: impl Into<String>, after: Value) -> Self {
        Self {
            key: key.into(),
            change: ChangeKind::Inserted,
            before: Value::Null,
            after,
        }
    }

    /// A key or position that only exists on the "before" side.
    pub fn deleted(key: impl Into<String>, before: Value) -> Self {
        Self {
            key: key.into(),
            change: ChangeKind::Deleted,
            before,
            after: Value::Null,
        }
    }

    /// A leaf whose value was replaced.
    pub fn replaced(key: impl Into<String>, before: Value, after: Value) -> Self {
        Self {
            key: key.into(),
            change: ChangeKind::Replaced,
            before,
            after,
        }
    }

    /// A container whose nested entries changed.
    ///
    /// `before` and `after` keep the untouched container values; the
    /// authoritative detail lives in `children`.
    pub fn modified(key: impl Into<String>, before: Value, after: Value, children: ChangeMap) -> Self {
        Self {
            key: key.into(),
            change: ChangeKind::Modified(children),
            before,
            after,
        }
    }

    /// An entry that did not change.
    pub fn unchanged(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            change: ChangeKind::Unchanged,
            before: value.clone(),
            after: value,
        }
    }

    /// `true` when this key or position exists only in the "after" value.
    pub fn is_new(&self) -> bool {
        matches!(self.change, ChangeKind::Inserted)
    }

    /// `true` when this key or position exists only in the "before" value.
    pub fn is_deleted(&self) -> bool {
        matches!(self.change, ChangeKind::Deleted)
    }

    /// `true` for leaf replacements and for containers with nested changes.
    pub fn is_changed(&self) -> bool {
        matches!(self.change, ChangeKind::Replaced | ChangeKind::Modified(_))
    }

    /// `true` unless this entry is [`ChangeKind::Unchanged`].
    pub fn has_changes(&self) -> bool {
        !matches!(self.change, ChangeKind::Unchanged)
    }

    /// Nested changes, if this node is a modified container.
    pub fn children(&self) -> Option<&ChangeMap> {
        match &self.change {
            ChangeKind::Modified(children) => Some(children),
            _ => None,
        }
    }
}

/// All changes at one nesting level, keyed by map key or list index.
///
/// An empty `ChangeMap` means "no changes". Iteration order is the sorted
/// key order, so output is deterministic. List keys are decimal strings and
/// sort lexically (`"10"` before `"2"`); callers that need numeric order
/// should parse them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeMap(BTreeMap<String, ChangeField>);

impl ChangeMap {
    /// Create an empty change map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if any entry is an actual change.
    ///
    /// Differs from `!is_empty()` only when unchanged entries were requested.
    pub fn has_changes(&self) -> bool {
        self.0.values().any(ChangeField::has_changes)
    }

    /// Insert a field under its own key, replacing any previous entry.
    pub fn insert(&mut self, field: ChangeField) {
        self.0.insert(field.key.clone(), field);
    }

    /// Remove and return the entry for a key.
    pub fn remove(&mut self, key: &str) -> Option<ChangeField> {
        self.0.remove(key)
    }

    /// Look up the entry for a key.
    pub fn get(&self, key: &str) -> Option<&ChangeField> {
        self.0.get(key)
    }

    /// Returns `true` if an entry exists for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ChangeField> {
        self.0.iter()
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, ChangeField> {
        self.0.keys()
    }

    /// Number of inserted leaves anywhere in the tree.
    pub fn insertions(&self) -> usize {
        self.count_leaves(&|f| f.is_new())
    }

    /// Number of deleted leaves anywhere in the tree.
    pub fn deletions(&self) -> usize {
        self.count_leaves(&|f| f.is_deleted())
    }

    /// Number of replaced leaves anywhere in the tree.
    pub fn modifications(&self) -> usize {
        self.count_leaves(&|f| matches!(f.change, ChangeKind::Replaced))
    }

    fn count_leaves(&self, pred: &dyn Fn(&ChangeField) -> bool) -> usize {
        self.0
            .values()
            .map(|f| match f.children() {
                Some(children) => children.count_leaves(pred),
                None => usize::from(pred(f)),
            })
            .sum()
    }

    /// Flatten the tree into `(path, leaf)` pairs.
    ///
    /// Paths join keys with `.`, e.g. `items.2.price`. Modified containers
    /// are not listed themselves, only their leaves.
    pub fn paths(&self) -> Vec<(String, &ChangeField)> {
        let mut out = Vec::new();
        self.collect_paths(None, &mut out);
        out
    }

    fn collect_paths<'a>(&'a self, prefix: Option<&str>, out: &mut Vec<(String, &'a ChangeField)>) {
        for (key, field) in &self.0 {
            let path = match prefix {
                Some(p) => format!("{p}.{key}"),
                None => key.clone(),
            };
            match field.children() {
                Some(children) => children.collect_paths(Some(&path), out),
                None => out.push((path, field)),
            }
        }
    }
}

impl<'a> IntoIterator for &'a ChangeMap {
    type Item = (&'a String, &'a ChangeField);
    type IntoIter = btree_map::Iter<'a, String, ChangeField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ChangeMap {
    type Item = (String, ChangeField);
    type IntoIter = btree_map::IntoIter<String, ChangeField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<ChangeField> for ChangeMap {
    fn from_iter<I: IntoIterator<Item = ChangeField>>(iter: I) -> Self {
        let mut map = Self::new();
        for field in iter {
            map.insert(field);
        }
        map
    }
}
