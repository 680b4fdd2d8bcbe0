//! Capability traits the list utilities rely on, plus shared date helpers.

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::errors::{FinboardError, Result};

/// Provides the name used for sorting and searching.
pub trait HasName {
    fn name(&self) -> &str;

    /// Text matched by free-text search. Defaults to the name.
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.name())
    }
}

/// Associates entities with an optional category label.
pub trait HasCategory {
    fn category(&self) -> Option<&str>;
}

/// Supplies the amount used for numeric ordering.
pub trait HasAmount {
    fn display_amount(&self) -> f64;
}

/// Distinguishes active entries from archived ones.
pub trait Archivable {
    fn is_active(&self) -> bool;
}

/// Describes the calendar footprint of an entry.
pub trait HasDateRange {
    fn date_span(&self) -> DateSpan;

    /// Date used for chronological ordering.
    fn sort_date(&self) -> Option<NaiveDate> {
        self.date_span().anchor()
    }
}

/// Calendar footprint of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpan {
    /// Single occurrence on one day.
    On(NaiveDate),
    /// Active from `start` through `end` inclusive; open-ended when `end` is `None`.
    Between {
        start: NaiveDate,
        end: Option<NaiveDate>,
    },
    /// Recurs without anchoring dates and applies to every period.
    Always,
}

impl DateSpan {
    pub fn anchor(&self) -> Option<NaiveDate> {
        match self {
            DateSpan::On(date) => Some(*date),
            DateSpan::Between { start, .. } => Some(*start),
            DateSpan::Always => None,
        }
    }

    /// Inclusive overlap test against `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        match self {
            DateSpan::On(date) => *date >= from && *date <= to,
            DateSpan::Between { start, end } => {
                *start <= to && end.map_or(true, |end| end >= from)
            }
            DateSpan::Always => true,
        }
    }
}

impl<T: HasName + ?Sized> HasName for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn search_text(&self) -> Cow<'_, str> {
        (**self).search_text()
    }
}

impl<T: HasCategory + ?Sized> HasCategory for &T {
    fn category(&self) -> Option<&str> {
        (**self).category()
    }
}

impl<T: HasAmount + ?Sized> HasAmount for &T {
    fn display_amount(&self) -> f64 {
        (**self).display_amount()
    }
}

impl<T: Archivable + ?Sized> Archivable for &T {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

impl<T: HasDateRange + ?Sized> HasDateRange for &T {
    fn date_span(&self) -> DateSpan {
        (**self).date_span()
    }

    fn sort_date(&self) -> Option<NaiveDate> {
        (**self).sort_date()
    }
}

/// Parses a `YYYY-MM-DD` calendar date, rejecting anything else.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| FinboardError::InvalidDate {
        input: input.to_string(),
    })
}
