use std::fmt;

use serde::{Deserialize, Serialize};

use super::renewal::RenewalProjection;

/// Coarse emphasis level for an upcoming renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        };
        f.write_str(label)
    }
}

/// Inclusive day thresholds separating the urgency levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyThresholds {
    pub high_within_days: i64,
    pub medium_within_days: i64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            high_within_days: 3,
            medium_within_days: 14,
        }
    }
}

impl UrgencyThresholds {
    /// Negative or missing day counts are `Low`.
    pub fn classify(&self, days_until_renewal: Option<i64>) -> Urgency {
        match days_until_renewal {
            Some(days) if days < 0 => Urgency::Low,
            Some(days) if days <= self.high_within_days => Urgency::High,
            Some(days) if days <= self.medium_within_days => Urgency::Medium,
            _ => Urgency::Low,
        }
    }

    /// Badge for a row, if any. Ended or past entries get none.
    pub fn badge(&self, days_until_renewal: Option<i64>) -> Option<Urgency> {
        days_until_renewal
            .filter(|days| *days >= 0)
            .map(|days| self.classify(Some(days)))
    }

    pub fn badge_for(&self, projection: &RenewalProjection) -> Option<Urgency> {
        if projection.is_ended || projection.next_renewal.is_none() {
            return None;
        }
        self.badge(Some(projection.days_until_renewal))
    }
}

/// Classifies with the default thresholds (high <= 3 days, medium <= 14).
pub fn classify(days_until_renewal: Option<i64>) -> Urgency {
    UrgencyThresholds::default().classify(days_until_renewal)
}
