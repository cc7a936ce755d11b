use std::fmt::Write as _;
use std::ops::Range;

use anyhow::Result;

use crate::data::model::TripTable;
use crate::ui::menu;

// ---------------------------------------------------------------------------
// Raw data viewer – five rows at a time
// ---------------------------------------------------------------------------

/// Rows shown per request.
pub const PAGE_SIZE: usize = 5;

/// One window of rows, and whether it reaches the end of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub range: Range<usize>,
    pub exhausted: bool,
}

/// Steps through a table [`PAGE_SIZE`] rows at a time.
#[derive(Debug)]
pub struct Pager {
    len: usize,
    next_start: usize,
}

impl Pager {
    pub fn new(len: usize) -> Self {
        Self { len, next_start: 0 }
    }

    /// The next window of up to [`PAGE_SIZE`] rows, or `None` once every row
    /// has been shown (immediately so for an empty table). The final window
    /// may be partial and is flagged `exhausted`.
    pub fn next_window(&mut self) -> Option<Window> {
        if self.next_start >= self.len {
            return None;
        }
        let start = self.next_start;
        let end = (start + PAGE_SIZE).min(self.len);
        self.next_start = end;
        Some(Window {
            range: start..end,
            exhausted: end == self.len,
        })
    }
}

/// Interactively page through the filtered table.
///
/// Asks before the first window and between windows; stops on "No" or when
/// the table is exhausted (after printing the final, possibly partial,
/// window and an end-of-data notice).
pub fn browse(table: &TripTable) -> Result<()> {
    if !menu::confirm("\nWould you like to see the first 5 rows of raw data?")? {
        return Ok(());
    }

    let mut pager = Pager::new(table.len());
    loop {
        let Some(window) = pager.next_window() else {
            println!("That's the end of the data.");
            return Ok(());
        };
        print!("{}", render_window(table, window.range));
        if window.exhausted {
            println!("That's the end of the data.");
            return Ok(());
        }
        if !menu::confirm("Would you like to see more?")? {
            return Ok(());
        }
    }
}

/// Render one window of rows as an aligned pipe-delimited text table over the
/// columns the table actually carries.
pub fn render_window(table: &TripTable, range: Range<usize>) -> String {
    let columns = table.columns();
    let cells: Vec<Vec<String>> = table.rows[range]
        .iter()
        .map(|row| columns.iter().map(|col| row.cell(*col)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|col| col.title().len()).collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.len());
        }
    }

    let mut out = String::new();
    for (idx, col) in columns.iter().enumerate() {
        let _ = write!(out, "| {:<width$} ", col.title(), width = widths[idx]);
    }
    out.push_str("|\n");
    for width in &widths {
        let _ = write!(out, "|{}", "-".repeat(width + 2));
    }
    out.push_str("|\n");
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            let _ = write!(out, "| {:<width$} ", cell, width = widths[idx]);
        }
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Capabilities, TripRecord, TripTable};
    use chrono::NaiveDate;

    fn table(rows: usize) -> TripTable {
        let records = (0..rows)
            .map(|i| {
                let ts = NaiveDate::from_ymd_opt(2017, 1, 1 + i as u32)
                    .unwrap()
                    .and_hms_opt(6, 0, 0)
                    .unwrap();
                TripRecord::new(ts)
            })
            .collect();
        TripTable::new(records, Capabilities::default())
    }

    #[test]
    fn twelve_rows_page_as_five_five_two() {
        let mut pager = Pager::new(12);
        let first = pager.next_window().unwrap();
        assert_eq!(first.range, 0..5);
        assert!(!first.exhausted);

        let second = pager.next_window().unwrap();
        assert_eq!(second.range, 5..10);
        assert!(!second.exhausted);

        let third = pager.next_window().unwrap();
        assert_eq!(third.range, 10..12);
        assert!(third.exhausted);

        assert_eq!(pager.next_window(), None);
    }

    #[test]
    fn short_table_shows_everything_at_once() {
        let mut pager = Pager::new(3);
        let only = pager.next_window().unwrap();
        assert_eq!(only.range, 0..3);
        assert!(only.exhausted);
        assert_eq!(pager.next_window(), None);
    }

    #[test]
    fn empty_table_is_exhausted_immediately() {
        let mut pager = Pager::new(0);
        assert_eq!(pager.next_window(), None);
    }

    #[test]
    fn renders_headers_and_rows() {
        let table = table(2);
        let text = render_window(&table, 0..2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4); // header, separator, two rows
        assert!(lines[0].contains("Start Time"));
        assert!(lines[0].contains("Day of Week"));
        assert!(lines[2].contains("2017-01-01 06:00:00"));
        assert!(lines[3].contains("Monday")); // 2017-01-02
    }
}
