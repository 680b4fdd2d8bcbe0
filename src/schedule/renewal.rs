use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Frequency, RecurringItem, Schedule, TimeInterval};
use crate::errors::{FinboardError, Result};
use crate::time::Clock;

/// Upper bound on the correction loop that follows the step estimate.
const MAX_CORRECTION_STEPS: u32 = 8;

/// Next occurrence of a recurring series relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenewalProjection {
    pub next_renewal: Option<NaiveDate>,
    pub is_ended: bool,
    /// Days from the reference day to `next_renewal` (0 = today). For an ended
    /// series this is the negative count of days since its last occurrence.
    pub days_until_renewal: i64,
}

/// Projects the first occurrence of the series on or after `today`.
///
/// The k-th occurrence is `start_date` shifted by k whole periods; month and
/// year periods clamp to the last day of shorter months.
pub fn project(
    start_date: NaiveDate,
    frequency: Frequency,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<RenewalProjection> {
    let interval = frequency.interval().ok_or_else(|| {
        FinboardError::InvalidSchedule("one-time items have no renewal cycle".into())
    })?;
    if let Some(end) = end_date {
        if end < start_date {
            return Err(FinboardError::InvalidSchedule(format!(
                "end date {end} precedes start date {start_date}"
            )));
        }
    }

    let out_of_range = || {
        FinboardError::InvalidSchedule(format!(
            "{frequency} series from {start_date} leaves the supported calendar range"
        ))
    };

    // The estimate can land one period past `today` for clamped months, so
    // back off one step and walk forward.
    let mut steps = interval
        .whole_steps_between(start_date, today)
        .saturating_sub(1);
    let mut candidate = interval.nth_after(start_date, steps).ok_or_else(out_of_range)?;
    let mut guard = 0u32;
    while candidate < today {
        if guard >= MAX_CORRECTION_STEPS {
            return Err(out_of_range());
        }
        steps += 1;
        guard += 1;
        candidate = interval.nth_after(start_date, steps).ok_or_else(out_of_range)?;
    }

    match end_date {
        Some(end) if candidate > end => {
            let last = last_occurrence(interval, start_date, end).ok_or_else(out_of_range)?;
            debug!(%start_date, %end, %frequency, "series ended before next renewal");
            Ok(RenewalProjection {
                next_renewal: None,
                is_ended: true,
                days_until_renewal: (last - today).num_days(),
            })
        }
        _ => Ok(RenewalProjection {
            next_renewal: Some(candidate),
            is_ended: false,
            days_until_renewal: (candidate - today).num_days(),
        }),
    }
}

/// Latest occurrence on or before `end`; the series starts on or before it.
fn last_occurrence(interval: TimeInterval, start_date: NaiveDate, end: NaiveDate) -> Option<NaiveDate> {
    let mut steps = interval.whole_steps_between(start_date, end);
    let mut candidate = interval.nth_after(start_date, steps)?;
    while candidate > end && steps > 0 {
        steps -= 1;
        candidate = interval.nth_after(start_date, steps)?;
    }
    Some(candidate)
}

/// Binds a clock so callers can project items without threading "today".
#[derive(Debug, Clone)]
pub struct RenewalProjector<C: Clock> {
    clock: C,
}

impl<C: Clock> RenewalProjector<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Projects any item. One-time items report their fixed date; standing
    /// schedules have no anchor and yield `None`.
    pub fn project_item(&self, item: &RecurringItem) -> Result<Option<RenewalProjection>> {
        let today = self.clock.today();
        match item.schedule {
            Schedule::OneTime { date } => {
                let days = (date - today).num_days();
                let is_ended = days < 0;
                Ok(Some(RenewalProjection {
                    next_renewal: (!is_ended).then_some(date),
                    is_ended,
                    days_until_renewal: days,
                }))
            }
            Schedule::Recurring {
                frequency,
                start_date,
                end_date,
            } => project(start_date, frequency, end_date, today).map(Some),
            Schedule::Standing { .. } => Ok(None),
        }
    }
}
