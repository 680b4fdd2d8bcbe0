//! Filtering, month bucketing, and ordering of list rows.

pub mod month;
pub mod query;
pub mod search;
pub mod sort;

pub use month::{belongs_to_month, MonthToken};
pub use query::{ListQuery, Listable};
pub use search::{filter, SearchFilter};
pub use sort::{compare, compare_names, sort_items, SortDirection, SortField, SortSpec, Sortable};
