//! Keys and key-value pairs.
//!
//! Every element of a collection lives under a [`Key`]. A key is either a
//! positional [`Key::Index`] handed out in insertion order, or a textual
//! [`Key::Label`] chosen by the caller.
//!
//! # Examples
//!
//! ```rust
//! use collectables::key::{Key, ToKey};
//!
//! assert_eq!(Key::from(3usize), Key::Index(3));
//! assert_eq!(Key::from("name"), Key::Label("name".to_string()));
//! assert_eq!("IT".to_key(), Key::from("IT"));
//! assert_eq!(Key::Index(7).to_string(), "7");
//! ```

use std::fmt;

/// The key an element is stored under.
///
/// Index keys sort before label keys; within a variant the natural ordering
/// of the payload applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Positional key assigned by `push`-style insertion.
    Index(usize),
    /// Caller-chosen textual key.
    Label(String),
}

/// One `(key, value)` entry of a collection.
pub type Pair<V> = (Key, V);

impl Key {
    /// Returns the empty label, used as the group key for elements that
    /// carry no value for a requested field.
    #[inline]
    pub const fn empty_label() -> Self {
        Self::Label(String::new())
    }

    /// Returns the index if this is an [`Key::Index`].
    #[inline]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Label(_) => None,
        }
    }

    /// Returns the label if this is a [`Key::Label`].
    #[inline]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Label(label) => Some(label),
        }
    }

    /// Returns `true` for [`Key::Index`] keys.
    #[inline]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Label(label) => formatter.write_str(label),
        }
    }
}

impl From<usize> for Key {
    #[inline]
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for Key {
    #[inline]
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<&String> for Key {
    #[inline]
    fn from(label: &String) -> Self {
        Self::Label(label.clone())
    }
}

impl From<&Self> for Key {
    #[inline]
    fn from(key: &Self) -> Self {
        key.clone()
    }
}

// =============================================================================
// ToKey
// =============================================================================

/// Values that can act as a key.
///
/// Used wherever a *value* is promoted to a key: `combine`, field-based
/// grouping and `count_by`. Non-negative integers become index keys;
/// everything else becomes a label.
pub trait ToKey {
    /// Builds the key this value stands for.
    fn to_key(&self) -> Key;
}

impl ToKey for Key {
    #[inline]
    fn to_key(&self) -> Key {
        self.clone()
    }
}

impl ToKey for str {
    #[inline]
    fn to_key(&self) -> Key {
        Key::from(self)
    }
}

impl ToKey for String {
    #[inline]
    fn to_key(&self) -> Key {
        Key::from(self.as_str())
    }
}

impl ToKey for char {
    #[inline]
    fn to_key(&self) -> Key {
        Key::Label(self.to_string())
    }
}

impl ToKey for bool {
    #[inline]
    fn to_key(&self) -> Key {
        Key::Index(usize::from(*self))
    }
}

impl<T: ToKey + ?Sized> ToKey for &T {
    #[inline]
    fn to_key(&self) -> Key {
        (**self).to_key()
    }
}

macro_rules! impl_to_key_for_integers {
    ($($ty:ty),*) => {
        $(
            impl ToKey for $ty {
                #[inline]
                fn to_key(&self) -> Key {
                    usize::try_from(*self)
                        .map_or_else(|_| Key::Label(self.to_string()), Key::Index)
                }
            }
        )*
    };
}

impl_to_key_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Index(index) => serializer.serialize_u64(*index as u64),
            Self::Label(label) => serializer.serialize_str(label),
        }
    }
}

#[cfg(feature = "serde")]
struct KeyVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or a string")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        usize::try_from(value)
            .map(Key::Index)
            .map_err(|_| E::custom(format!("index {value} does not fit in usize")))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        usize::try_from(value)
            .map(Key::Index)
            .map_err(|_| E::custom(format!("index {value} is not a valid position")))
    }

    // Formats such as JSON carry every map key as a string; canonical
    // decimal strings are read back as indices.
    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match value.parse::<usize>() {
            Ok(index) if index.to_string() == value => Ok(Key::Index(index)),
            _ => Ok(Key::from(value)),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}
