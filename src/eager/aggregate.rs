//! Numeric aggregates: `sum`, `avg`, `min`, `max`.

use super::EagerCollection;
use crate::error::EmptyCollectionError;

/// Numbers that can be summed and averaged.
///
/// Implemented for every primitive integer and float type.
pub trait Numeric: Copy {
    /// The additive identity, returned by `sum` over an empty collection.
    const ZERO: Self;

    /// Adds two values.
    ///
    /// # Panics
    ///
    /// Integer implementations panic on overflow in debug builds and wrap
    /// in release builds, like `+`.
    fn add(self, other: Self) -> Self;

    /// Widens the value to `f64` for averaging.
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric_for_primitives {
    ($zero:literal => $($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = $zero;

                #[inline]
                fn add(self, other: Self) -> Self {
                    self + other
                }

                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric_for_primitives!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_numeric_for_primitives!(0.0 => f32, f64);

impl<V> EagerCollection<V> {
    /// Sums the values. An empty collection sums to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use collectables::collect;
    /// use collectables::eager::EagerCollection;
    ///
    /// assert_eq!(collect![1, 2, 3, 4, 5, 6, 7, 8, 9].sum(), 45);
    /// assert_eq!(EagerCollection::<u32>::new().sum(), 0);
    /// ```
    ///
    /// # Panics
    ///
    /// Integer overflow panics in debug builds, as with `+`.
    pub fn sum(&self) -> V
    where
        V: Numeric,
    {
        self.iter()
            .fold(V::ZERO, |total, &(_, value)| total.add(value))
    }

    /// Arithmetic mean of the values.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn avg(&self) -> Result<f64, EmptyCollectionError>
    where
        V: Numeric,
    {
        if self.is_empty() {
            return Err(EmptyCollectionError::new("avg"));
        }
        Ok(self.sum().to_f64() / self.len() as f64)
    }

    /// Smallest value; the first one wins on ties.
    ///
    /// Values that do not compare (such as `NaN`) never replace the current
    /// minimum.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn min(&self) -> Result<V, EmptyCollectionError>
    where
        V: PartialOrd + Clone,
    {
        self.extreme(|candidate, current| candidate < current)
            .ok_or_else(|| EmptyCollectionError::new("min"))
    }

    /// Largest value; the first one wins on ties.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] if the collection is empty.
    pub fn max(&self) -> Result<V, EmptyCollectionError>
    where
        V: PartialOrd + Clone,
    {
        self.extreme(|candidate, current| candidate > current)
            .ok_or_else(|| EmptyCollectionError::new("max"))
    }

    fn extreme<F>(&self, replaces: F) -> Option<V>
    where
        V: Clone,
        F: Fn(&V, &V) -> bool,
    {
        self.iter()
            .map(|(_, value)| value)
            .reduce(|current, candidate| {
                if replaces(candidate, current) {
                    candidate
                } else {
                    current
                }
            })
            .cloned()
    }
}
