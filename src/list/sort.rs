use std::{cmp::Ordering, fmt, str::FromStr};

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

use crate::domain::{HasAmount, HasDateRange, HasName};
use crate::errors::FinboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Amount,
    Date,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Name, SortField::Amount, SortField::Date];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Amount => "amount",
            SortField::Date => "date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = FinboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| FinboardError::Validation(format!("unknown sort field `{value}`")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Items the comparator can order by any field.
pub trait Sortable: HasName + HasAmount + HasDateRange {}

impl<T: HasName + HasAmount + HasDateRange + ?Sized> Sortable for T {}

/// Dictionary-style comparison: accents and case are folded first, so
/// "Éclair" files under E. Ties fall back to case-folded and then raw text so
/// distinct names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}

fn lowercase(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

/// Orders two items by `spec`. Items without a date sort after dated ones in
/// both directions.
pub fn compare<T: Sortable + ?Sized>(a: &T, b: &T, spec: SortSpec) -> Ordering {
    match spec.field {
        SortField::Name => spec.direction.apply(compare_names(a.name(), b.name())),
        SortField::Amount => spec
            .direction
            .apply(a.display_amount().total_cmp(&b.display_amount())),
        SortField::Date => match (a.sort_date(), b.sort_date()) {
            (Some(left), Some(right)) => spec.direction.apply(left.cmp(&right)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Stable in-place sort; equal keys keep their input order in either direction.
pub fn sort_items<T: Sortable>(items: &mut [T], spec: SortSpec) {
    items.sort_by(|a, b| compare(a, b, spec));
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::DateSpan;

    #[derive(Debug)]
    struct Row {
        id: u32,
        name: &'static str,
        amount: f64,
        date: Option<NaiveDate>,
    }

    impl HasName for Row {
        fn name(&self) -> &str {
            self.name
        }
    }

    impl HasAmount for Row {
        fn display_amount(&self) -> f64 {
            self.amount
        }
    }

    impl HasDateRange for Row {
        fn date_span(&self) -> DateSpan {
            self.date.map(DateSpan::On).unwrap_or(DateSpan::Always)
        }
    }

    fn row(id: u32, name: &'static str, amount: f64, date: Option<(i32, u32, u32)>) -> Row {
        Row {
            id,
            name,
            amount,
            date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        }
    }

    fn ids(rows: &[Row]) -> Vec<u32> {
        rows.iter().map(|row| row.id).collect()
    }

    #[test]
    fn equal_names_keep_input_order() {
        let mut rows = vec![row(1, "A", 1.0, None), row(2, "A", 1.0, None)];
        sort_items(&mut rows, SortSpec::new(SortField::Name, SortDirection::Asc));
        assert_eq!(ids(&rows), vec![1, 2]);
        sort_items(&mut rows, SortSpec::new(SortField::Name, SortDirection::Desc));
        assert_eq!(ids(&rows), vec![1, 2]);
    }

    #[test]
    fn names_ignore_case() {
        let mut rows = vec![
            row(1, "spotify", 0.0, None),
            row(2, "Netflix", 0.0, None),
            row(3, "apple", 0.0, None),
        ];
        sort_items(&mut rows, SortSpec::new(SortField::Name, SortDirection::Asc));
        assert_eq!(ids(&rows), vec![3, 2, 1]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut rows = vec![
            row(1, "Zoom", 0.0, None),
            row(2, "Éclair Bakery", 0.0, None),
            row(3, "Apple", 0.0, None),
            row(4, "eclair bakery", 0.0, None),
        ];
        sort_items(&mut rows, SortSpec::new(SortField::Name, SortDirection::Asc));
        assert_eq!(ids(&rows), vec![3, 4, 2, 1]);
        assert_eq!(compare_names("Ångström", "Zebra"), Ordering::Less);
        assert_ne!(compare_names("Éclair", "Eclair"), Ordering::Equal);
    }

    #[test]
    fn amounts_sort_numerically_both_ways() {
        let mut rows = vec![
            row(1, "a", 9.5, None),
            row(2, "b", 100.0, None),
            row(3, "c", 10.0, None),
        ];
        sort_items(&mut rows, SortSpec::new(SortField::Amount, SortDirection::Asc));
        assert_eq!(ids(&rows), vec![1, 3, 2]);
        sort_items(&mut rows, SortSpec::new(SortField::Amount, SortDirection::Desc));
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn undated_rows_trail_in_both_directions() {
        let mut rows = vec![
            row(1, "a", 0.0, None),
            row(2, "b", 0.0, Some((2024, 3, 1))),
            row(3, "c", 0.0, Some((2024, 1, 1))),
        ];
        sort_items(&mut rows, SortSpec::new(SortField::Date, SortDirection::Asc));
        assert_eq!(ids(&rows), vec![3, 2, 1]);
        sort_items(&mut rows, SortSpec::new(SortField::Date, SortDirection::Desc));
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn parses_fields() {
        assert_eq!("Amount".parse::<SortField>().unwrap(), SortField::Amount);
        assert!("price".parse::<SortField>().is_err());
    }
}
