//! OHLCV (Open, High, Low, Close, Volume) data types.
//!
//! This module provides the price bar, the columnar price bundle handed to
//! price-based indicators, and the [`PriceField`] keys that name its columns.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaError};
use crate::num::TaFloat;
use crate::series::Series;

/// One column of a price bundle.
///
/// Price inputs of an indicator declare which fields they read; at the call
/// boundary each field is supplied as a series under its [`key`](Self::key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriceField {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
    /// Open interest.
    OpenInterest,
}

impl PriceField {
    /// All fields in bundle order.
    pub const ALL: [PriceField; 6] = [
        PriceField::Open,
        PriceField::High,
        PriceField::Low,
        PriceField::Close,
        PriceField::Volume,
        PriceField::OpenInterest,
    ];

    /// Key under which the field is supplied to a call.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
            Self::OpenInterest => "openInterest",
        }
    }
}

/// A single OHLCV price bar.
///
/// # Example
///
/// ```rust
/// use ta_core::Bar;
///
/// let bar = Bar::new(100.0, 105.0, 98.0, 103.0, 1_000_000.0);
/// assert!(bar.is_valid());
/// assert_eq!(bar.real_body(), 3.0);
/// assert_eq!(bar.upper_shadow(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar<T: TaFloat> {
    /// Opening price for the period.
    pub open: T,
    /// Highest price during the period.
    pub high: T,
    /// Lowest price during the period.
    pub low: T,
    /// Closing price for the period.
    pub close: T,
    /// Trading volume during the period.
    pub volume: T,
}

impl<T: TaFloat> Bar<T> {
    /// Create a new bar.
    #[must_use]
    pub fn new(open: T, high: T, low: T, close: T, volume: T) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check if the bar satisfies OHLCV invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.open.is_valid()
            && self.high.is_valid()
            && self.low.is_valid()
            && self.close.is_valid()
            && self.volume.is_valid()
            && self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
            && self.volume >= T::ZERO
    }

    /// The bar's range: High - Low.
    #[must_use]
    pub fn range(&self) -> T {
        self.high - self.low
    }

    /// The candle's real body: |Close - Open|.
    #[must_use]
    pub fn real_body(&self) -> T {
        (self.close - self.open).abs()
    }

    /// Candle color: `1` for white (close >= open), `-1` for black.
    #[must_use]
    pub fn color(&self) -> i32 {
        if self.close >= self.open {
            1
        } else {
            -1
        }
    }

    /// The upper shadow: High - max(Open, Close).
    #[must_use]
    pub fn upper_shadow(&self) -> T {
        let body_top = if self.close >= self.open {
            self.close
        } else {
            self.open
        };
        self.high - body_top
    }

    /// The lower shadow: min(Open, Close) - Low.
    #[must_use]
    pub fn lower_shadow(&self) -> T {
        let body_bottom = if self.close >= self.open {
            self.open
        } else {
            self.close
        };
        body_bottom - self.low
    }
}

impl<T: TaFloat> Default for Bar<T> {
    fn default() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO, T::ZERO)
    }
}

/// A columnar price bundle.
///
/// All columns share one length; open interest is optional.
///
/// # Example
///
/// ```rust
/// use ta_core::{Bar, OhlcvSeries};
///
/// let mut ohlcv: OhlcvSeries<f64> = OhlcvSeries::new();
/// ohlcv.push(Bar::new(100.0, 105.0, 98.0, 103.0, 1_000_000.0));
/// ohlcv.push(Bar::new(103.0, 108.0, 101.0, 107.0, 1_200_000.0));
///
/// assert_eq!(ohlcv.len(), 2);
/// assert_eq!(ohlcv.close()[1], 107.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OhlcvSeries<T: TaFloat> {
    open: Series<T>,
    high: Series<T>,
    low: Series<T>,
    close: Series<T>,
    volume: Series<T>,
    open_interest: Option<Series<T>>,
}

impl<T: TaFloat> Default for OhlcvSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TaFloat> OhlcvSeries<T> {
    /// Create a new empty OHLCV series.
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: Series::new(),
            high: Series::new(),
            low: Series::new(),
            close: Series::new(),
            volume: Series::new(),
            open_interest: None,
        }
    }

    /// Create an OHLCV series from individual columns.
    ///
    /// # Errors
    ///
    /// Returns [`TaError::InconsistentLength`] if the columns differ in length.
    pub fn from_series(
        open: Series<T>,
        high: Series<T>,
        low: Series<T>,
        close: Series<T>,
        volume: Series<T>,
    ) -> Result<Self> {
        let len = open.len();
        for (field, column) in [
            (PriceField::High, &high),
            (PriceField::Low, &low),
            (PriceField::Close, &close),
            (PriceField::Volume, &volume),
        ] {
            check_column_len(field, len, column.len())?;
        }

        Ok(Self {
            open,
            high,
            low,
            close,
            volume,
            open_interest: None,
        })
    }

    /// Attach an open-interest column (builder pattern).
    ///
    /// # Errors
    ///
    /// Returns [`TaError::InconsistentLength`] if the column length differs.
    pub fn with_open_interest(mut self, open_interest: Series<T>) -> Result<Self> {
        check_column_len(PriceField::OpenInterest, self.len(), open_interest.len())?;
        self.open_interest = Some(open_interest);
        Ok(self)
    }

    /// Returns the number of bars in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Returns `true` if the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Append a bar to the series.
    ///
    /// An attached open-interest column is extended with zero.
    pub fn push(&mut self, bar: Bar<T>) {
        self.open.push(bar.open);
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.close.push(bar.close);
        self.volume.push(bar.volume);
        if let Some(open_interest) = self.open_interest.as_mut() {
            open_interest.push(T::ZERO);
        }
    }

    /// Get a bar at the specified index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Bar<T>> {
        if index >= self.len() {
            return None;
        }

        Some(Bar::new(
            self.open[index],
            self.high[index],
            self.low[index],
            self.close[index],
            self.volume[index],
        ))
    }

    /// Returns a reference to the open prices series.
    #[must_use]
    pub fn open(&self) -> &Series<T> {
        &self.open
    }

    /// Returns a reference to the high prices series.
    #[must_use]
    pub fn high(&self) -> &Series<T> {
        &self.high
    }

    /// Returns a reference to the low prices series.
    #[must_use]
    pub fn low(&self) -> &Series<T> {
        &self.low
    }

    /// Returns a reference to the close prices series.
    #[must_use]
    pub fn close(&self) -> &Series<T> {
        &self.close
    }

    /// Returns a reference to the volume series.
    #[must_use]
    pub fn volume(&self) -> &Series<T> {
        &self.volume
    }

    /// Returns the column for a price field, if present.
    #[must_use]
    pub fn column(&self, field: PriceField) -> Option<&Series<T>> {
        match field {
            PriceField::Open => Some(&self.open),
            PriceField::High => Some(&self.high),
            PriceField::Low => Some(&self.low),
            PriceField::Close => Some(&self.close),
            PriceField::Volume => Some(&self.volume),
            PriceField::OpenInterest => self.open_interest.as_ref(),
        }
    }

    /// Returns an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = Bar<T>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl<T: TaFloat> FromIterator<Bar<T>> for OhlcvSeries<T> {
    fn from_iter<I: IntoIterator<Item = Bar<T>>>(iter: I) -> Self {
        let mut series = Self::new();
        for bar in iter {
            series.push(bar);
        }
        series
    }
}

fn check_column_len(field: PriceField, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(TaError::InconsistentLength {
            name: field.key().to_string(),
            expected,
            actual,
        })
    }
}
