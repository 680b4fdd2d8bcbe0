use super::style::UiStyle;
use crate::schedule::Urgency;

/// Row data for a [`Table`]; the badge renders in the last column.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub urgency: Option<Urgency>,
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, headers: &[&str]) -> Self {
        Self {
            title: title.map(Into::into),
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>, urgency: Option<Urgency>) {
        self.rows.push(TableRow { cells, urgency });
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.cells.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders padded columns. Color is applied after padding so escape codes
    /// never disturb alignment.
    pub fn render(&self, style: &UiStyle) -> String {
        let widths = self.widths();
        let total_width = widths.iter().map(|width| width + 2).sum::<usize>();
        let last = self.headers.len().saturating_sub(1);
        let mut out = String::new();

        if let Some(title) = &self.title {
            out.push_str(&style.header(title));
            out.push('\n');
        }

        let header = pad_line(&self.headers, &widths);
        out.push_str(&style.header(header.trim_end()));
        out.push('\n');
        out.push_str(&style.horizontal_line(total_width));
        out.push('\n');

        for row in &self.rows {
            let mut line = String::new();
            for (idx, width) in widths.iter().enumerate() {
                let cell = row.cells.get(idx).map(String::as_str).unwrap_or("");
                let padded = format!("{cell:<width$}  ");
                if idx == last {
                    line.push_str(&style.badge(padded.trim_end(), row.urgency));
                } else {
                    line.push_str(&padded);
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// One block per row: the first cell as a heading, the remaining non-empty
    /// cells as aligned `Header value` lines.
    pub fn render_cards(&self, style: &UiStyle) -> String {
        let label_width = self
            .headers
            .iter()
            .skip(1)
            .map(|header| header.chars().count())
            .max()
            .unwrap_or(0);
        let last = self.headers.len().saturating_sub(1);
        let mut out = String::new();

        if let Some(title) = &self.title {
            out.push_str(&style.header(title));
            out.push('\n');
            out.push_str(&style.horizontal_line(title.chars().count()));
            out.push('\n');
        }

        for row in &self.rows {
            let heading = row.cells.first().map(String::as_str).unwrap_or("");
            out.push_str(&style.header(heading));
            out.push('\n');
            for (idx, header) in self.headers.iter().enumerate().skip(1) {
                let cell = row.cells.get(idx).map(String::as_str).unwrap_or("");
                if cell.is_empty() {
                    continue;
                }
                let value = if idx == last {
                    style.badge(cell, row.urgency)
                } else {
                    cell.to_string()
                };
                out.push_str(&format!("  {header:<label_width$}  {value}\n"));
            }
            out.push('\n');
        }
        out
    }
}

fn pad_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}  "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = Table::new(None::<String>, &["Name", "Due"]);
        table.add_row(vec!["Netflix Premium".into(), "high".into()], Some(Urgency::High));
        table.add_row(vec!["Gym".into(), String::new()], None);
        let rendered = table.render(&UiStyle::plain());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Name             Due");
        assert_eq!(lines[2], "Netflix Premium  high");
        assert_eq!(lines[3], "Gym");
    }

    #[test]
    fn cards_list_each_non_empty_field() {
        let mut table = Table::new(None::<String>, &["Name", "Next", "Due"]);
        table.add_row(
            vec!["Netflix Premium".into(), "2024-02-29".into(), "in 14 days".into()],
            Some(Urgency::Medium),
        );
        table.add_row(vec!["Groceries".into(), "every period".into(), String::new()], None);
        let rendered = table.render_cards(&UiStyle::plain());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Netflix Premium",
                "  Next  2024-02-29",
                "  Due   in 14 days",
                "",
                "Groceries",
                "  Next  every period",
                "",
            ]
        );
    }
}
