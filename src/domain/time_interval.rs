use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Enumerates time units used by `TimeInterval`.
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Represents a time unit and multiplier for recurrence calculations.
///
/// Month and year steps use calendar arithmetic: when the anchor's day does not
/// exist in the target month it is clamped to that month's last day.
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub const fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    /// Returns `anchor` shifted forward by `steps` whole intervals, or `None`
    /// when the result falls outside the supported calendar range.
    ///
    /// Occurrences are always computed from the anchor, never chained, so a
    /// clamped month (Jan 31 -> Feb 29) does not drag later months back.
    pub fn nth_after(&self, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
        let count = self.every.checked_mul(steps)?;
        match self.unit {
            TimeUnit::Day => anchor.checked_add_days(Days::new(count as u64)),
            TimeUnit::Week => anchor.checked_add_days(Days::new(count as u64 * 7)),
            TimeUnit::Month => anchor.checked_add_months(Months::new(count)),
            TimeUnit::Year => anchor.checked_add_months(Months::new(count.checked_mul(12)?)),
        }
    }

    /// Lower-bound estimate of how many whole intervals separate `anchor` from
    /// `reference`. Returns zero when `reference` is not after `anchor`.
    pub fn whole_steps_between(&self, anchor: NaiveDate, reference: NaiveDate) -> u32 {
        if reference <= anchor || self.every == 0 {
            return 0;
        }
        let steps = match self.unit {
            TimeUnit::Day => steps_linear(anchor, reference, self.every as i64),
            TimeUnit::Week => steps_linear(anchor, reference, self.every as i64 * 7),
            TimeUnit::Month => steps_months(anchor, reference, self.every as i64),
            TimeUnit::Year => steps_months(anchor, reference, self.every as i64 * 12),
        };
        u32::try_from(steps).unwrap_or(u32::MAX)
    }
}

fn steps_linear(anchor: NaiveDate, reference: NaiveDate, interval_days: i64) -> i64 {
    (reference - anchor).num_days().div_euclid(interval_days)
}

fn steps_months(anchor: NaiveDate, reference: NaiveDate, interval_months: i64) -> i64 {
    let anchor_idx = anchor.year() as i64 * 12 + anchor.month0() as i64;
    let reference_idx = reference.year() as i64 * 12 + reference.month0() as i64;
    (reference_idx - anchor_idx).div_euclid(interval_months).max(0)
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(last.day())
}
