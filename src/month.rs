//! Calendar month keys and the half-open date ranges they cover.

use std::{fmt::Display, str::FromStr};

use time::{Date, Duration, Month};

use crate::Error;

/// A half-open range of dates, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first date in the range.
    pub start: Date,
    /// The first date after the range.
    pub end: Date,
}

impl DateRange {
    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}

/// A year-month key such as `2024-06`.
///
/// Both ends of the month's [DateRange] are computed on construction, so a
/// `YearMonth` always has a valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    start: Date,
    end: Date,
}

impl YearMonth {
    /// Create the key for `month` of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the first day of the month or the
    /// first day of the following month is outside the supported date range.
    pub fn new(year: i32, month: Month) -> Result<Self, Error> {
        let out_of_range = || Error::InvalidMonth(format!("{year:04}-{:02}", u8::from(month)));

        let start = Date::from_calendar_date(year, month, 1).map_err(|_| out_of_range())?;
        let end = match month {
            Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
            month => Date::from_calendar_date(year, month.next(), 1),
        }
        .map_err(|_| out_of_range())?;

        Ok(Self { start, end })
    }

    /// The month that `date` falls in.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for the last supported month, since its
    /// end date cannot be represented.
    pub fn from_date(date: Date) -> Result<Self, Error> {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// The calendar month.
    pub fn month(&self) -> Month {
        self.start.month()
    }

    /// The dates in this month as `[first day, first day of next month)`.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    /// The month before this one, if it can be represented.
    pub fn previous(&self) -> Option<Self> {
        let last_day_of_previous = self.start.checked_sub(Duration::days(1))?;

        Self::from_date(last_day_of_previous).ok()
    }

    /// The month after this one, if it can be represented.
    pub fn next(&self) -> Option<Self> {
        Self::from_date(self.end).ok()
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), u8::from(self.month()))
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse a key in the form `YYYY-MM`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(text.to_owned());

        let (year, month) = text.split_once('-').ok_or_else(invalid)?;

        let is_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|byte| byte.is_ascii_digit())
        };

        if !is_digits(year, 4) || !is_digits(month, 2) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

/// Resolve a `YYYY-MM` key to the half-open range of dates in that month.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `ym` is not a valid `YYYY-MM` key.
pub fn month_range(ym: &str) -> Result<DateRange, Error> {
    ym.parse::<YearMonth>().map(|month| month.range())
}
