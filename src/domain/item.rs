//! Subscriptions, budget lines, and expenses tracked on a schedule.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::{CurrencyCode, Priced};
use crate::domain::common::*;
use crate::domain::frequency::Frequency;
use crate::errors::{FinboardError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Subscription,
    Budget,
    Expense,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::Subscription => "Subscription",
            ItemKind::Budget => "Budget",
            ItemKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// When an item occurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schedule {
    OneTime {
        date: NaiveDate,
    },
    Recurring {
        frequency: Frequency,
        start_date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    },
    /// Repeats every period with no anchoring dates, like a standing monthly budget.
    Standing { frequency: Frequency },
}

impl Schedule {
    pub fn recurring(
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self> {
        let schedule = Schedule::Recurring {
            frequency,
            start_date,
            end_date,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Schedule::OneTime { .. } => Frequency::OneTime,
            Schedule::Recurring { frequency, .. } | Schedule::Standing { frequency } => *frequency,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Schedule::OneTime { .. } => Ok(()),
            Schedule::Recurring {
                frequency,
                start_date,
                end_date,
            } => {
                if !frequency.is_recurring() {
                    return Err(FinboardError::InvalidSchedule(
                        "one-time items take a single date, not a start/end range".into(),
                    ));
                }
                match end_date {
                    Some(end) if end < start_date => Err(FinboardError::InvalidSchedule(format!(
                        "end date {end} precedes start date {start_date}"
                    ))),
                    _ => Ok(()),
                }
            }
            Schedule::Standing { frequency } => {
                if frequency.is_recurring() {
                    Ok(())
                } else {
                    Err(FinboardError::InvalidSchedule(
                        "standing schedules need a recurring frequency".into(),
                    ))
                }
            }
        }
    }

    pub fn date_span(&self) -> DateSpan {
        match self {
            Schedule::OneTime { date } => DateSpan::On(*date),
            Schedule::Recurring {
                start_date,
                end_date,
                ..
            } => DateSpan::Between {
                start: *start_date,
                end: *end_date,
            },
            Schedule::Standing { .. } => DateSpan::Always,
        }
    }
}

fn default_active() -> bool {
    true
}

/// A named entity billed or tracked on a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub kind: ItemKind,
    pub amount: f64,
    pub currency: CurrencyCode,
    pub schedule: Schedule,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RecurringItem {
    pub fn new(
        name: impl Into<String>,
        kind: ItemKind,
        amount: f64,
        currency: CurrencyCode,
        schedule: Schedule,
    ) -> Result<Self> {
        let item = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            amount,
            currency,
            schedule,
            is_active: true,
            category: None,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks the shape invariants the server would otherwise reject.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FinboardError::Validation("name must not be empty".into()));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(FinboardError::Validation(format!(
                "amount for `{}` must be a non-negative number",
                self.name
            )));
        }
        self.schedule.validate()
    }

    pub fn frequency(&self) -> Frequency {
        self.schedule.frequency()
    }

    /// Marks the item archived. Returns `false` when it already was.
    pub fn archive(&mut self) -> bool {
        std::mem::replace(&mut self.is_active, false)
    }

    /// Reactivates an archived item. Returns `false` when it was already active.
    pub fn restore(&mut self) -> bool {
        !std::mem::replace(&mut self.is_active, true)
    }
}

impl HasName for RecurringItem {
    fn name(&self) -> &str {
        &self.name
    }
}

impl HasCategory for RecurringItem {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl HasAmount for RecurringItem {
    fn display_amount(&self) -> f64 {
        self.amount
    }
}

impl Priced for RecurringItem {
    fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
}

impl Archivable for RecurringItem {
    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl HasDateRange for RecurringItem {
    fn date_span(&self) -> DateSpan {
        self.schedule.date_span()
    }
}
