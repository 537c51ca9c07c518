//! Table rendering utilities for CLI outputs.

use crate::utils::formatting::{pad_left, pad_right, truncate};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    /// Upper bound on the column width; cells are truncated beyond it.
    pub max_width: usize,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
            align: Align::Left,
        }
    }

    pub fn right(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()))
                    .max()
                    .unwrap_or(0);
                content
                    .max(UnicodeWidthStr::width(col.header.as_str()))
                    .min(col.max_width)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let cell = |text: &str, i: usize| {
            let t = truncate(text, widths[i]);
            match self.columns[i].align {
                Align::Left => pad_right(&t, widths[i]),
                Align::Right => pad_left(&t, widths[i]),
            }
        };

        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| cell(&c.header, i))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        for row in &self.rows {
            let line: Vec<String> = (0..self.columns.len())
                .map(|i| cell(row.get(i).map(String::as_str).unwrap_or(""), i))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_content() {
        let mut t = Table::new(vec![Column::left("Dish", 30), Column::right("Price", 10)]);
        t.add_row(vec!["Crème brûlée".into(), "8.50".into()]);
        t.add_row(vec!["Tarte".into(), "12.00".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Dish          Price");
        assert_eq!(lines[1], "Crème brûlée   8.50");
        assert_eq!(lines[2], "Tarte         12.00");
    }
}
