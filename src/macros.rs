//! Construction macro.

/// Builds an [`EagerCollection`](crate::eager::EagerCollection) from a
/// literal list of values or of `key => value` entries.
///
/// # Examples
///
/// ```rust
/// use collectables::collect;
/// use collectables::eager::EagerCollection;
///
/// let numbers = collect![1, 2, 3];
/// assert_eq!(numbers.to_vec(), vec![1, 2, 3]);
///
/// let person = collect!["name" => "Fahmi", "department" => "IT"];
/// assert_eq!(person.get("department"), Some(&"IT"));
///
/// let empty: EagerCollection<i32> = collect![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! collect {
    // Empty: an empty collection
    () => {
        $crate::eager::EagerCollection::new()
    };

    // Keyed entries: keys as given
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::eager::EagerCollection::from_pairs([$(($key, $value)),+])
    };

    // Values: index keys from 0
    ($($value:expr),+ $(,)?) => {
        $crate::eager::EagerCollection::from([$($value),+])
    };
}
