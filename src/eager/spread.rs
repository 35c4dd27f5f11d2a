//! Spreading tuple values into positional arguments.
//!
//! [`Spread`] lets `map_spread` call a multi-argument function with the
//! fields of each tuple value:
//!
//! ```rust
//! use collectables::collect;
//!
//! let names = collect![("Iman", "Hasyim"), ("Azdy", "Fahmi")];
//! let full_names = names.map_spread(|first, last| format!("{first} {last}"));
//!
//! assert_eq!(full_names.to_vec(), vec!["Iman Hasyim", "Azdy Fahmi"]);
//! ```

use super::EagerCollection;

/// A tuple whose fields can be passed to `F` as separate arguments.
pub trait Spread<F> {
    /// What `F` returns.
    type Output;

    /// Calls `function` with the fields of `self`.
    fn spread(self, function: &mut F) -> Self::Output;
}

macro_rules! impl_spread_for_tuples {
    ($(($($field:ident),+)),+ $(,)?) => {
        $(
            #[allow(non_snake_case)]
            impl<$($field,)+ U, F> Spread<F> for ($($field,)+)
            where
                F: FnMut($($field),+) -> U,
            {
                type Output = U;

                #[inline]
                fn spread(self, function: &mut F) -> U {
                    let ($($field,)+) = self;
                    function($($field),+)
                }
            }
        )+
    };
}

impl_spread_for_tuples!((A), (A, B), (A, B, C), (A, B, C, D));

impl<V: Clone> EagerCollection<V> {
    /// Maps every tuple value by spreading its fields into `function`.
    ///
    /// Keys are preserved.
    pub fn map_spread<F, U>(&self, mut function: F) -> EagerCollection<U>
    where
        V: Spread<F, Output = U>,
    {
        self.map(|value, _| value.clone().spread(&mut function))
    }
}

#[cfg(test)]
mod tests {
    use crate::collect;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
    }

    #[rstest]
    fn test_map_spread_pairs_into_constructor() {
        let names = collect![("Iman", "Hasyim"), ("Azdy", "Fahmi")];
        let people = names.map_spread(|first_name, last_name| Person {
            name: format!("{first_name} {last_name}"),
        });

        assert_eq!(
            people.to_vec(),
            vec![
                Person {
                    name: "Iman Hasyim".to_string()
                },
                Person {
                    name: "Azdy Fahmi".to_string()
                },
            ]
        );
    }

    #[rstest]
    fn test_map_spread_single_and_quadruple() {
        let singles = collect![(1,), (2,)];
        assert_eq!(singles.map_spread(|value| value * 10).to_vec(), vec![10, 20]);

        let quads = collect![(1, 2, 3, 4)];
        assert_eq!(quads.map_spread(|a, b, c, d| a + b + c + d).to_vec(), vec![10]);
    }
}
