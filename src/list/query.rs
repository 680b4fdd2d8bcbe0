use tracing::debug;

use super::month::{belongs_to_month, MonthToken};
use super::search::SearchFilter;
use super::sort::{compare, SortSpec};
use crate::domain::{Archivable, HasAmount, HasCategory, HasDateRange, HasName};

/// Everything the list utilities need from an item.
pub trait Listable: HasName + HasCategory + HasAmount + HasDateRange + Archivable {}

impl<T: HasName + HasCategory + HasAmount + HasDateRange + Archivable + ?Sized> Listable for T {}

/// Search/category filter, then month filter, then sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: SearchFilter,
    pub month: Option<MonthToken>,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: SearchFilter) -> Self {
        self.search = search;
        self
    }

    pub fn with_month(mut self, month: Option<MonthToken>) -> Self {
        self.month = month;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the visible rows. Identical inputs always yield the same order.
    pub fn apply<'a, T: Listable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let search = (!self.search.is_noop()).then_some(&self.search);
        let mut rows: Vec<&T> = items
            .iter()
            .filter(|item| search.map_or(true, |search| search.matches(*item)))
            .filter(|item| belongs_to_month(*item, self.month.as_ref()))
            .collect();
        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| compare(*a, *b, spec));
        }
        debug!(
            total = items.len(),
            visible = rows.len(),
            searched = search.is_some(),
            month = ?self.month.map(|month| month.to_string()),
            sort = ?self.sort,
            "list query applied"
        );
        rows
    }
}
