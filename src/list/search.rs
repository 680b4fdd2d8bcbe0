use crate::domain::{Archivable, HasCategory, HasName};

/// Free-text and category restrictions applied to a list. Every restriction
/// left unset lets all items through; the ones that are set combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
    category: Option<String>,
    active_only: bool,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring query. Blank queries clear the restriction.
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.needle = query
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase);
        self
    }

    /// Exact category match.
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category.map(str::to_string);
        self
    }

    pub fn active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    pub fn is_noop(&self) -> bool {
        self.needle.is_none() && self.category.is_none() && !self.active_only
    }

    pub fn matches<T: HasName + HasCategory + Archivable + ?Sized>(&self, item: &T) -> bool {
        if self.active_only && !item.is_active() {
            return false;
        }
        self.matches_text(item)
    }

    /// Query and category checks only; ignores `active_only`.
    pub fn matches_text<T: HasName + HasCategory + ?Sized>(&self, item: &T) -> bool {
        if let Some(category) = &self.category {
            if item.category() != Some(category.as_str()) {
                return false;
            }
        }
        match &self.needle {
            Some(needle) => item.search_text().to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }

    /// Borrows the matching items, preserving input order.
    pub fn apply<'a, T: HasName + HasCategory + Archivable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Filters by optional query and optional category.
pub fn filter<'a, T: HasName + HasCategory>(
    items: &'a [T],
    query: Option<&str>,
    category: Option<&str>,
) -> Vec<&'a T> {
    let search = SearchFilter::new()
        .with_query(query)
        .with_category(category);
    items.iter().filter(|item| search.matches_text(*item)).collect()
}
