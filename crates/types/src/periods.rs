use crate::{utils::normalize_decimal, InvalidPeriodError};
use serde::{Deserialize, Serialize};

/// A single rental offer: a range of rental durations, in days, and the price
/// per day in the smallest denomination of the payment token.
///
/// `min_days <= max_days` always holds, and `price_per_day` is always a
/// normalized non-negative decimal integer of arbitrary size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UncheckedPeriod")]
pub struct RentalPeriod {
    min_days: u64,
    max_days: u64,
    price_per_day: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UncheckedPeriod {
    min_days: u64,
    max_days: u64,
    price_per_day: String,
}

impl TryFrom<UncheckedPeriod> for RentalPeriod {
    type Error = InvalidPeriodError;

    fn try_from(value: UncheckedPeriod) -> Result<Self, Self::Error> {
        Self::new(value.min_days, value.max_days, value.price_per_day)
    }
}

impl RentalPeriod {
    /// Create a new rental period.
    pub fn new(
        min_days: u64,
        max_days: u64,
        price_per_day: impl AsRef<str>,
    ) -> Result<Self, InvalidPeriodError> {
        if min_days > max_days {
            return Err(InvalidPeriodError::DayRange { min_days, max_days });
        }
        let price = price_per_day.as_ref();
        let price_per_day =
            normalize_decimal(price).ok_or_else(|| InvalidPeriodError::Price(price.to_string()))?;
        Ok(Self { min_days, max_days, price_per_day })
    }

    /// Create a rental period of exactly `days` days.
    pub fn fixed(days: u64, price_per_day: impl AsRef<str>) -> Result<Self, InvalidPeriodError> {
        Self::new(days, days, price_per_day)
    }

    /// Get the minimum rental duration in days.
    pub const fn min_days(&self) -> u64 {
        self.min_days
    }

    /// Get the maximum rental duration in days.
    pub const fn max_days(&self) -> u64 {
        self.max_days
    }

    /// Get the price per day as a decimal string.
    pub fn price_per_day(&self) -> &str {
        &self.price_per_day
    }
}

/// An ordered, non-empty table of [`RentalPeriod`] offers.
///
/// Order is significant. The signed listing carries the table as three
/// parallel arrays, and the rentals contract refers to offers by their
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RentalPeriod>", into = "Vec<RentalPeriod>")]
pub struct PeriodTable(Vec<RentalPeriod>);

impl TryFrom<Vec<RentalPeriod>> for PeriodTable {
    type Error = InvalidPeriodError;

    fn try_from(periods: Vec<RentalPeriod>) -> Result<Self, Self::Error> {
        Self::new(periods)
    }
}

impl From<PeriodTable> for Vec<RentalPeriod> {
    fn from(table: PeriodTable) -> Self {
        table.0
    }
}

impl PeriodTable {
    /// Create a new table from an ordered list of periods.
    pub fn new(periods: Vec<RentalPeriod>) -> Result<Self, InvalidPeriodError> {
        if periods.is_empty() {
            return Err(InvalidPeriodError::Empty);
        }
        Ok(Self(periods))
    }

    /// Create a table of fixed-length periods, one per entry of `days`, all at
    /// the same price.
    pub fn uniform(days: &[u64], price_per_day: &str) -> Result<Self, InvalidPeriodError> {
        days.iter()
            .map(|days| RentalPeriod::fixed(*days, price_per_day))
            .collect::<Result<Vec<_>, _>>()
            .and_then(Self::new)
    }

    /// Number of periods in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false. Tables cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the period at `index`.
    pub fn get(&self, index: usize) -> Option<&RentalPeriod> {
        self.0.get(index)
    }

    /// Get the periods as a slice.
    pub fn as_slice(&self) -> &[RentalPeriod] {
        &self.0
    }

    /// Iterate over the periods in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RentalPeriod> {
        self.0.iter()
    }

    /// The `pricePerDay` column.
    pub fn prices_per_day(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(RentalPeriod::price_per_day)
    }

    /// The `maxDays` column.
    pub fn max_days(&self) -> impl Iterator<Item = u64> + '_ {
        self.iter().map(RentalPeriod::max_days)
    }

    /// The `minDays` column.
    pub fn min_days(&self) -> impl Iterator<Item = u64> + '_ {
        self.iter().map(RentalPeriod::min_days)
    }
}

impl<'a> IntoIterator for &'a PeriodTable {
    type Item = &'a RentalPeriod;
    type IntoIter = std::slice::Iter<'a, RentalPeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
