//! Time series data container.
//!
//! The [`Series`] type provides a contiguous, heap-allocated container for
//! input data and kernel outputs.

use core::ops::Index;

use crate::num::TaFloat;

/// A contiguous time series of floating-point values.
///
/// `Series<T>` stores price data, kernel outputs and the intermediate
/// buffers of compound indicators. Kernel outputs only hold valid values:
/// the warm-up region is never materialised.
///
/// # Example
///
/// ```rust
/// use ta_core::Series;
///
/// let mut series: Series<f64> = Series::new();
/// series.push(100.0);
/// series.push(101.5);
/// series.push(99.8);
///
/// assert_eq!(series.len(), 3);
/// assert_eq!(series[0], 100.0);
/// assert_eq!(series.last(), Some(&99.8));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Series<T: TaFloat> {
    data: Vec<T>,
}

impl<T: TaFloat> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TaFloat> Series<T> {
    /// Create a new empty series.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a new series with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a series filled with a value.
    #[must_use]
    pub fn filled(value: T, len: usize) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    /// Returns the number of elements in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a value to the end of the series.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Get a reference to the value at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Get the first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Get the last value, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// Drop the first `n` values.
    ///
    /// Used by compound kernels that discard the leading outputs of an inner
    /// computation. Skipping more values than the series holds empties it.
    #[must_use]
    pub fn skip(mut self, n: usize) -> Self {
        let n = n.min(self.data.len());
        self.data.drain(..n);
        self
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the underlying data as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the series and returns the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: TaFloat> Index<usize> for Series<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: TaFloat> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T: TaFloat> IntoIterator for Series<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T: TaFloat> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: TaFloat> From<Vec<T>> for Series<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: TaFloat> From<&[T]> for Series<T> {
    fn from(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<T: TaFloat> AsRef<[T]> for Series<T> {
    fn as_ref(&self) -> &[T] {
        &self.data
    }
}
