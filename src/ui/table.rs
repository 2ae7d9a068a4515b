// Tue Jan 13 2026 - Alex

use colored::*;
use std::cmp::max;

/// Plain-text table used for layout listings.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    alignment: Vec<Alignment>,
    use_color: bool,
    border: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            column_widths: Vec::new(),
            alignment: Vec::new(),
            use_color: true,
            border: true,
        }
    }

    pub fn with_headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self.column_widths = self.headers.iter().map(|h| h.chars().count()).collect();
        self.alignment = vec![Alignment::Left; self.headers.len()];
        self
    }

    pub fn add_row<T: std::fmt::Display>(mut self, row: &[T]) -> Self {
        let string_row: Vec<String> = row.iter().map(|c| c.to_string()).collect();

        for (i, cell) in string_row.iter().enumerate() {
            let len = cell.chars().count();
            if i < self.column_widths.len() {
                self.column_widths[i] = max(self.column_widths[i], len);
            } else {
                self.column_widths.push(len);
                self.alignment.push(Alignment::Left);
            }
        }

        self.rows.push(string_row);
        self
    }

    pub fn with_alignment(mut self, column: usize, alignment: Alignment) -> Self {
        if column < self.alignment.len() {
            self.alignment[column] = alignment;
        }
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    fn align_cell(content: &str, width: usize, alignment: Alignment) -> String {
        match alignment {
            Alignment::Left => format!("{:<width$}", content, width = width),
            Alignment::Right => format!("{:>width$}", content, width = width),
        }
    }

    pub fn build(&self) -> String {
        if self.headers.is_empty() && self.rows.is_empty() {
            return String::new();
        }

        let mut output = Vec::new();
        let rule = self.build_rule();

        if self.border {
            output.push(rule.clone());
        }
        if !self.headers.is_empty() {
            output.push(self.build_row(&self.headers, true));
            if self.border {
                output.push(rule.clone());
            }
        }
        for row in &self.rows {
            output.push(self.build_row(row, false));
        }
        if self.border {
            output.push(rule);
        }

        output.join("\n")
    }

    fn build_row(&self, cells: &[String], is_header: bool) -> String {
        let separator = if self.border { "|" } else { "" };
        let mut line = String::from(separator);

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let alignment = self.alignment.get(i).copied().unwrap_or(Alignment::Left);
            let aligned = Self::align_cell(cell, *width, alignment);
            let formatted = if is_header && self.use_color {
                aligned.bold().to_string()
            } else {
                aligned
            };
            line.push_str(&format!(" {} {}", formatted, separator));
        }

        line.trim_end().to_string()
    }

    fn build_rule(&self) -> String {
        let cells: Vec<String> = self.column_widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", cells.join("+"))
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
