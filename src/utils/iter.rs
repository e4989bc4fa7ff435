//! Iterator utilities.
use std::cmp::{Ordering, PartialOrd};
use std::error::Error;
use std::fmt;

/// Maximum of a collection of items where the maximum might not exist.
pub trait PartialMax {
    type Item;

    /// A maximum element of an iterator when one exists.
    ///
    /// If several elements are equally maximum then the last one is returned.
    ///
    /// # Errors
    /// Returns a [`PartialMaxError`] if there are no elements or the elements are not comparable.
    fn partial_max(self) -> Result<Self::Item, PartialMaxError>;
}

impl<T, I> PartialMax for I
where
    T: PartialOrd,
    I: Iterator<Item = T>,
{
    type Item = T;

    fn partial_max(mut self) -> Result<Self::Item, PartialMaxError> {
        match self.try_fold(None, |acc: Option<T>, x| match acc {
            None => Ok(Some(x)),
            Some(a) => match a.partial_cmp(&x) {
                None => Err(()),
                Some(Ordering::Greater) => Ok(Some(a)),
                Some(_) => Ok(Some(x)),
            },
        }) {
            Ok(Some(x)) => Ok(x),
            Ok(None) => Err(PartialMaxError::Empty),
            Err(_) => Err(PartialMaxError::Incomparable),
        }
    }
}

/// Reason that the maximum does not exist.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PartialMaxError {
    /// The collection is empty, there is no maximum.
    Empty,
    /// Some pair of elements cannot be compared.
    Incomparable,
}

impl fmt::Display for PartialMaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PartialMaxError::Empty => "Empty",
                PartialMaxError::Incomparable => "Incomparable",
            }
        )
    }
}

impl Error for PartialMaxError {}

/// All items of a collection that share the maximal key.
pub trait MaximaByKey {
    type Item;

    /// Every element whose key equals the largest key, in iteration order.
    ///
    /// Elements with a NaN key are never maximal.
    /// Returns an empty vector if the iterator is empty or every key is NaN.
    fn maxima_by_key<F>(self, key: F) -> Vec<Self::Item>
    where
        F: FnMut(&Self::Item) -> f64;
}

impl<I: Iterator> MaximaByKey for I {
    type Item = I::Item;

    #[allow(clippy::float_cmp)] // exact ties
    fn maxima_by_key<F>(self, mut key: F) -> Vec<Self::Item>
    where
        F: FnMut(&Self::Item) -> f64,
    {
        let mut best = f64::NEG_INFINITY;
        let mut maxima = Vec::new();
        for item in self {
            let k = key(&item);
            if k > best {
                best = k;
                maxima.clear();
                maxima.push(item);
            } else if k == best {
                maxima.push(item);
            }
        }
        maxima
    }
}
