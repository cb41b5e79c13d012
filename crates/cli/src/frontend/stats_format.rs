//! `--stats` output for a completed copy.
//!
//! The layout follows rsync's `--stats` block: one `Label: value` line per
//! counter, with byte counts grouped by thousands.

use std::fmt::Write;

use engine::CopySummary;

/// Formatter for a [`CopySummary`].
pub(crate) struct StatsFormatter<'a> {
    summary: &'a CopySummary,
}

impl<'a> StatsFormatter<'a> {
    pub(crate) const fn new(summary: &'a CopySummary) -> Self {
        Self { summary }
    }

    /// Renders the summary as newline-terminated lines.
    pub(crate) fn format(&self) -> String {
        let summary = self.summary;
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Block size: {} bytes",
            format_number(summary.block_size() as u64)
        );
        let _ = writeln!(
            output,
            "Total file size: {} bytes",
            format_number(summary.bytes_read())
        );
        let _ = writeln!(
            output,
            "Literal data: {} bytes",
            format_number(summary.bytes_written())
        );
        let _ = writeln!(
            output,
            "Hole data: {} bytes",
            format_number(summary.hole_bytes())
        );
        let _ = writeln!(
            output,
            "Data blocks: {}",
            format_number(summary.data_blocks())
        );
        let _ = writeln!(
            output,
            "Hole blocks: {}",
            format_number(summary.hole_blocks())
        );
        let _ = writeln!(
            output,
            "Length set explicitly: {}",
            if summary.length_fixed() { "yes" } else { "no" }
        );

        output
    }
}

/// Formats a number with thousands separators (commas).
pub(crate) fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
