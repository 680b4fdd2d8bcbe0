#![doc(test(attr(deny(warnings))))]

//! Finboard Core holds the list utilities behind the personal-finance
//! dashboard: renewal projection for recurring items, urgency badges,
//! month bucketing, search/category filtering, and stable sorting.
//!
//! ```
//! use chrono::NaiveDate;
//! use finboard_core::{domain::Frequency, schedule::project};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
//! let projection = project(start, Frequency::Monthly, None, today).unwrap();
//! assert_eq!(projection.next_renewal, NaiveDate::from_ymd_opt(2024, 2, 29));
//! ```

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod list;
pub mod schedule;
pub mod time;
pub mod utils;

pub use errors::{FinboardError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finboard Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
