//! Column alignment shared by every report section.

use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::object::{Columns, Segment};
use tabled::settings::{Modify, Padding, Style};

/// Spaces written before the first cell of a row
pub const ROW_INDENT: usize = 4;
/// Spaces written after every cell, including the last one
pub const COLUMN_GAP: usize = 4;

/// A titled block of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<Vec<String>>,
}

impl Section {
    pub fn new(title: &'static str, rows: Vec<Vec<String>>) -> Self {
        Self { title, rows }
    }

    /// Write the header line, the aligned rows and the trailing blank line.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "  {}", self.title)?;
        w.write_all(layout(&self.rows).as_bytes())?;
        writeln!(w)
    }
}

/// Lay rows out as newline-terminated lines on a borderless table. Columns
/// are as wide as their widest cell in terminal columns, and short rows are
/// padded with empty cells so every line has the same shape.
pub fn layout(rows: &[Vec<String>]) -> String {
    let count_columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if count_columns == 0 {
        return String::new();
    }

    let mut builder = Builder::default();
    for row in rows {
        let mut record = row.clone();
        record.resize(count_columns, String::new());
        builder.push_record(record);
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Modify::new(Segment::all()).with(Padding::new(0, COLUMN_GAP, 0, 0)))
        .with(Modify::new(Columns::first()).with(Padding::new(ROW_INDENT, COLUMN_GAP, 0, 0)));

    let mut out = table.to_string();
    out.push('\n');
    out
}
