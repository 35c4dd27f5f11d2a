//! Grouping and partitioning.
//!
//! These operations split one collection into several without hidden state.
//! Groups appear in the order their key is first encountered, and members
//! keep their relative order inside a group.
//!
//! # Examples
//!
//! ```rust
//! use collectables::collect;
//! use collectables::eager::KeySelector;
//!
//! let staff = collect![
//!     collect!["name" => "Azdy", "department" => "IT"],
//!     collect!["name" => "Fahmi", "department" => "IT"],
//!     collect!["name" => "Azkan", "department" => "HR"],
//! ];
//!
//! let by_department = staff.group_by(KeySelector::field("department"));
//! assert_eq!(by_department.len(), 2);
//! assert_eq!(by_department.get("IT").map(|group| group.len()), Some(2));
//! assert_eq!(by_department.get("HR").map(|group| group.len()), Some(1));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use super::EagerCollection;
use crate::key::{Key, ToKey};

/// A collection of collections, keyed by group key.
pub type GroupResult<V> = EagerCollection<EagerCollection<V>>;

// =============================================================================
// Fields
// =============================================================================

/// Record-like values whose fields can be read by name.
///
/// Implement this for your own types to group them with
/// [`KeySelector::field`].
pub trait Fields {
    /// Returns the field named `name` as a key, or `None` if absent.
    fn field(&self, name: &str) -> Option<Key>;
}

impl<V: ToKey> Fields for EagerCollection<V> {
    fn field(&self, name: &str) -> Option<Key> {
        self.get(name).map(ToKey::to_key)
    }
}

impl<V: ToKey, S: BuildHasher> Fields for HashMap<String, V, S> {
    fn field(&self, name: &str) -> Option<Key> {
        self.get(name).map(ToKey::to_key)
    }
}

impl<V: ToKey, S: BuildHasher> Fields for HashMap<&str, V, S> {
    fn field(&self, name: &str) -> Option<Key> {
        self.get(name).map(ToKey::to_key)
    }
}

impl<V: ToKey> Fields for BTreeMap<String, V> {
    fn field(&self, name: &str) -> Option<Key> {
        self.get(name).map(ToKey::to_key)
    }
}

impl<V: ToKey> Fields for BTreeMap<&str, V> {
    fn field(&self, name: &str) -> Option<Key> {
        self.get(name).map(ToKey::to_key)
    }
}

// =============================================================================
// KeySelector
// =============================================================================

/// How a grouping operation derives the group key of an element.
pub enum KeySelector<'a, V> {
    /// Reads a named field through [`Fields`].
    Field {
        /// The field name.
        name: String,
        /// The accessor captured when the selector was built.
        accessor: fn(&V, &str) -> Option<Key>,
    },
    /// Computes the key from the value and its current key.
    Function(Box<dyn FnMut(&V, &Key) -> Key + 'a>),
}

impl<'a, V> KeySelector<'a, V> {
    /// Selects by field name.
    ///
    /// Elements without the field are grouped under the empty label.
    pub fn field(name: impl Into<String>) -> Self
    where
        V: Fields,
    {
        Self::Field {
            name: name.into(),
            accessor: <V as Fields>::field,
        }
    }

    /// Selects with a function of the value and its key.
    pub fn function<K, F>(mut function: F) -> Self
    where
        K: Into<Key>,
        F: FnMut(&V, &Key) -> K + 'a,
    {
        Self::Function(Box::new(move |value, key| function(value, key).into()))
    }

    fn select(&mut self, value: &V, key: &Key) -> Key {
        match self {
            Self::Field { name, accessor } => {
                accessor(value, name.as_str()).unwrap_or_else(Key::empty_label)
            }
            Self::Function(function) => function(value, key),
        }
    }
}

impl<V> fmt::Debug for KeySelector<'_, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { name, .. } => formatter.debug_tuple("Field").field(name).finish(),
            Self::Function(_) => formatter.write_str("Function(..)"),
        }
    }
}

// =============================================================================
// Operations
// =============================================================================

fn append_to_group<U>(groups: &mut GroupResult<U>, group_key: Key, value: U) {
    if let Some(group) = groups.entries.get_mut(&group_key) {
        group.push(value);
    } else {
        let mut group = EagerCollection::new();
        group.push(value);
        groups.entries.insert(group_key, group);
    }
}

impl<V: Clone> EagerCollection<V> {
    /// Groups elements by the key `selector` derives for each one.
    ///
    /// Members are re-indexed from 0 inside their group.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    /// use collectables::eager::KeySelector;
    ///
    /// let words = collect!["apple", "avocado", "banana"];
    /// let by_initial = words.group_by(KeySelector::function(|word: &&str, _| {
    ///     word[..1].to_string()
    /// }));
    ///
    /// assert_eq!(by_initial.get("a"), Some(&collect!["apple", "avocado"]));
    /// assert_eq!(by_initial.get("b"), Some(&collect!["banana"]));
    /// ```
    pub fn group_by(&self, mut selector: KeySelector<'_, V>) -> GroupResult<V> {
        let mut groups = EagerCollection::new();
        for (key, value) in self {
            let group_key = selector.select(value, key);
            append_to_group(&mut groups, group_key, value.clone());
        }
        groups
    }

    /// Maps each element to one `(group key, value)` entry and gathers the
    /// values per group key.
    ///
    /// Values sharing a group key are appended, never overwritten.
    pub fn map_to_groups<K, U, F>(&self, mut function: F) -> GroupResult<U>
    where
        K: Into<Key>,
        F: FnMut(&V, &Key) -> (K, U),
    {
        let mut groups = EagerCollection::new();
        for (key, value) in self {
            let (group_key, mapped) = function(value, key);
            append_to_group(&mut groups, group_key.into(), mapped);
        }
        groups
    }

    /// Splits into the pairs that satisfy `predicate` and those that do not.
    ///
    /// Both halves keep the original keys and order.
    pub fn partition<P>(&self, mut predicate: P) -> (Self, Self)
    where
        P: FnMut(&V, &Key) -> bool,
    {
        let mut matching = Self::new();
        let mut rest = Self::new();
        for (key, value) in self {
            let target = if predicate(value, key) {
                &mut matching
            } else {
                &mut rest
            };
            target.entries.insert(key.clone(), value.clone());
        }
        (matching, rest)
    }

    /// Counts elements per group key.
    pub fn count_by(&self, mut selector: KeySelector<'_, V>) -> EagerCollection<usize> {
        let mut counts = EagerCollection::new();
        for (key, value) in self {
            let group_key = selector.select(value, key);
            if let Some(count) = counts.entries.get_mut(&group_key) {
                *count += 1;
            } else {
                counts.entries.insert(group_key, 1);
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect;
    use rstest::{fixture, rstest};

    #[fixture]
    fn staff() -> EagerCollection<EagerCollection<&'static str>> {
        collect![
            collect!["name" => "Fahmi", "department" => "IT"],
            collect!["name" => "Azdy", "department" => "IT"],
            collect!["name" => "Hasyim", "department" => "HR"],
        ]
    }

    #[rstest]
    fn test_map_to_groups_appends_per_key(staff: EagerCollection<EagerCollection<&'static str>>) {
        let result = staff.map_to_groups(|person, _| {
            (
                *person.get("department").unwrap(),
                *person.get("name").unwrap(),
            )
        });

        assert_eq!(
            result,
            EagerCollection::from_pairs([
                ("IT", collect!["Fahmi", "Azdy"]),
                ("HR", collect!["Hasyim"]),
            ])
        );
    }

    #[rstest]
    fn test_group_by_missing_field_uses_empty_label() {
        let records = collect![
            collect!["team" => "core"],
            collect!["name" => "nobody"],
        ];
        let groups = records.group_by(KeySelector::field("team"));
        let keys: Vec<Key> = groups.keys().to_vec();
        assert_eq!(keys, vec![Key::from("core"), Key::empty_label()]);
    }

    #[rstest]
    fn test_group_by_hash_map_records() {
        let records: EagerCollection<HashMap<String, u32>> = collect![
            HashMap::from([("level".to_string(), 1)]),
            HashMap::from([("level".to_string(), 2)]),
            HashMap::from([("level".to_string(), 1)]),
        ];
        let groups = records.group_by(KeySelector::field("level"));
        assert_eq!(groups.get(1usize).map(EagerCollection::len), Some(2));
        assert_eq!(groups.get(2usize).map(EagerCollection::len), Some(1));
    }

    #[rstest]
    fn test_partition_scores() {
        let scores = EagerCollection::from_pairs([("Azdy", 100), ("Gibran", 80), ("Azkan", 90)]);
        let (passed, failed) = scores.partition(|value, _| *value >= 90);

        assert_eq!(passed, EagerCollection::from_pairs([("Azdy", 100), ("Azkan", 90)]));
        assert_eq!(failed, EagerCollection::from_pairs([("Gibran", 80)]));
    }

    #[rstest]
    fn test_count_by_function() {
        let numbers = collect![1, 2, 3, 4, 5];
        let counts = numbers.count_by(KeySelector::function(|value: &i32, _| {
            if value % 2 == 0 { "even" } else { "odd" }
        }));
        assert_eq!(counts, EagerCollection::from_pairs([("odd", 3), ("even", 2)]));
    }

    #[rstest]
    fn test_key_selector_debug() {
        let selector: KeySelector<'_, EagerCollection<&str>> = KeySelector::field("department");
        assert_eq!(format!("{selector:?}"), "Field(\"department\")");
    }
}
