//! Item models and the capability traits list utilities operate on.

pub mod asset;
pub mod common;
pub mod frequency;
pub mod item;
pub mod time_interval;

pub use asset::PortfolioAsset;
pub use common::{
    parse_date, Archivable, DateSpan, HasAmount, HasCategory, HasDateRange, HasName,
};
pub use frequency::Frequency;
pub use item::{ItemKind, RecurringItem, Schedule};
pub use time_interval::{days_in_month, TimeInterval, TimeUnit};
