//! Positional diff over lists.
//!
//! Elements are first aligned (see [`crate::sequence`]), then:
//!
//! - an inserted element is keyed by its `after` index,
//! - a deleted element is keyed by its `before` index,
//! - a matched pair is diffed recursively and keyed by its `after` index,
//!   appearing only if it changed.
//!
//! Because deletions and the rest live in different index spaces, a key can
//! be claimed twice. A deletion and an insertion on the same key fold into a
//! single replaced entry. A deletion that lands on a changed matched element
//! is moved to the key `~{before index}`. A deletion always wins over an
//! unchanged entry.

use differ_types::{ChangeField, ChangeMap, Value};

use crate::differ::Differ;
use crate::identity::Matchable;
use crate::sequence::align;

/// Prefix for deletion keys displaced by a changed element at the same index.
pub const DISPLACED_PREFIX: char = '~';

impl Differ {
    /// Diff two lists.
    ///
    /// `key` is the name the list lives under; it selects the identity field
    /// from the configuration.
    pub fn diff_list(&self, key: &str, before: &[Value], after: &[Value]) -> ChangeMap {
        let config = self.config();
        let identity_key = config.identity_key_for(key);
        let lhs = Matchable::wrap_all(before, identity_key);
        let rhs = Matchable::wrap_all(after, identity_key);
        let alignment = align(&lhs, &rhs, config.strategy, config.lcs_cell_limit);

        let mut changes = ChangeMap::new();

        for &j in &alignment.inserted {
            changes.insert(ChangeField::inserted(j.to_string(), after[j].clone()));
        }

        for &(i, j) in &alignment.matched {
            if let Some(field) = self.diff_node(&j.to_string(), &before[i], &after[j]) {
                changes.insert(field);
            }
        }

        for &i in &alignment.deleted {
            let key = i.to_string();
            let occupant = changes.get(&key).map(|f| (f.is_new(), f.has_changes()));
            match occupant {
                None | Some((_, false)) => {
                    changes.insert(ChangeField::deleted(key, before[i].clone()));
                }
                Some((true, _)) => {
                    if let Some(inserted) = changes.remove(&key) {
                        changes.insert(ChangeField::replaced(key, before[i].clone(), inserted.after));
                    }
                }
                Some((false, true)) => {
                    let displaced = format!("{DISPLACED_PREFIX}{i}");
                    changes.insert(ChangeField::deleted(displaced, before[i].clone()));
                }
            }
        }

        changes
    }
}
