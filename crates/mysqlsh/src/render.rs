use crate::error::Result;
use crate::value::ResultSet;
use colored::Colorize;
use comfy_table::presets::{ASCII_FULL_CONDENSED, UTF8_FULL_CONDENSED};
use comfy_table::{ContentArrangement, Table};
use std::io::Write;
use std::time::Duration;

/// Border characters used for result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    #[default]
    Utf8,
    Ascii,
}

impl TableStyle {
    /// UTF-8 borders when the locale says the terminal handles them.
    pub fn from_locale() -> Self {
        Self::from_locale_vars(|key| std::env::var(key).ok())
    }

    fn from_locale_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.is_empty());

        match locale {
            Some(value) if is_utf8_locale(&value) => TableStyle::Utf8,
            _ => TableStyle::Ascii,
        }
    }

    fn preset(self) -> &'static str {
        match self {
            TableStyle::Utf8 => UTF8_FULL_CONDENSED,
            TableStyle::Ascii => ASCII_FULL_CONDENSED,
        }
    }
}

fn is_utf8_locale(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    value.contains("utf-8") || value.contains("utf8")
}

pub fn create_table(style: TableStyle) -> Table {
    let mut table = Table::new();
    table
        .load_preset(style.preset())
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn build_table(result: &ResultSet, style: TableStyle) -> Table {
    let mut table = create_table(style);
    table.set_header(result.columns());
    for row in result.rows() {
        table.add_row(row.iter());
    }
    table
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:?}", elapsed)
}

pub fn summary_line(rows: usize, elapsed: Duration) -> String {
    let noun = if rows == 1 { "row" } else { "rows" };
    format!("{} {} in set ({})", rows, noun, format_elapsed(elapsed))
}

/// Write the table, the summary line, any warning count, then a blank line.
pub fn render<W: Write>(
    out: &mut W,
    result: &ResultSet,
    elapsed: Duration,
    style: TableStyle,
) -> Result<()> {
    writeln!(out, "{}", build_table(result, style))?;
    writeln!(out, "{}", summary_line(result.len(), elapsed))?;
    if result.warnings() != 0 {
        let warning = format!("{} warning(s).", result.warnings());
        writeln!(out, "{}", warning.yellow())?;
    }
    writeln!(out)?;
    Ok(())
}
