use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::time_interval::{TimeInterval, TimeUnit};

/// Billing or tracking cadence of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Biannually,
    Annually,
}

impl Frequency {
    pub const ALL: [Frequency; 8] = [
        Frequency::OneTime,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Biannually,
        Frequency::Annually,
    ];

    pub fn is_recurring(self) -> bool {
        !matches!(self, Frequency::OneTime)
    }

    /// Period between occurrences; `None` for one-time items.
    pub fn interval(self) -> Option<TimeInterval> {
        let interval = match self {
            Frequency::OneTime => return None,
            Frequency::Daily => TimeInterval::new(1, TimeUnit::Day),
            Frequency::Weekly => TimeInterval::new(1, TimeUnit::Week),
            Frequency::Biweekly => TimeInterval::new(2, TimeUnit::Week),
            Frequency::Monthly => TimeInterval::new(1, TimeUnit::Month),
            Frequency::Quarterly => TimeInterval::new(3, TimeUnit::Month),
            Frequency::Biannually => TimeInterval::new(6, TimeUnit::Month),
            Frequency::Annually => TimeInterval::new(1, TimeUnit::Year),
        };
        Some(interval)
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::OneTime => "One-time",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Biannually => "Biannually",
            Frequency::Annually => "Annually",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
