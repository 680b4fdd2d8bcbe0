use std::{fmt, str::FromStr};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::HasDateRange;
use crate::errors::{FinboardError, Result};
use crate::time::Clock;

/// A `YYYY-MM` calendar month, held as its inclusive first and last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthToken {
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthToken {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let invalid = || FinboardError::InvalidMonthToken(format!("{year:04}-{month:02}"));
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;
        Ok(Self { start, end })
    }

    /// Parses exactly `YYYY-MM`.
    pub fn parse(token: &str) -> Result<Self> {
        let invalid = || FinboardError::InvalidMonthToken(token.to_string());
        let (year, month) = token.trim().split_once('-').ok_or_else(invalid)?;
        let well_formed = year.len() == 4
            && month.len() == 2
            && year.chars().chain(month.chars()).all(|ch| ch.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn current(clock: &impl Clock) -> Self {
        Self::containing(clock.today())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn previous(&self) -> Option<Self> {
        self.start.pred_opt().map(Self::containing)
    }

    pub fn next(&self) -> Option<Self> {
        self.end.succ_opt().map(Self::containing)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthToken {
    type Err = FinboardError;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for MonthToken {
    type Error = FinboardError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<MonthToken> for String {
    fn from(token: MonthToken) -> Self {
        token.to_string()
    }
}

/// Whether `item` is active at any point in `month`. A missing month passes everything.
pub fn belongs_to_month<T: HasDateRange + ?Sized>(item: &T, month: Option<&MonthToken>) -> bool {
    match month {
        Some(month) => item.date_span().overlaps(month.start, month.end),
        None => true,
    }
}
