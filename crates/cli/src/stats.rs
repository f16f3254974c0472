//! Rendering of the `--stat` totals block.

use std::fmt::Write;

use engine::RunStats;

/// Column at which the counts start, wide enough for the longest label.
const LABEL_WIDTH: usize = 18;

/// Renders the end-of-run totals as a three-line block.
///
/// Lines are newline-separated without a trailing newline; the reporter
/// appends the final one.
pub(crate) fn render_stats(stats: &RunStats) -> String {
    let mut output = String::new();

    write_row(
        &mut output,
        "Total entries:",
        stats.total_items(),
        stats.total_bytes(),
    );
    output.push('\n');
    write_row(
        &mut output,
        "Deleted entries:",
        stats.deleted_items(),
        stats.deleted_bytes(),
    );
    output.push('\n');
    write_row(
        &mut output,
        "Remaining:",
        stats.remaining_items(),
        stats.remaining_bytes(),
    );

    output
}

fn write_row(output: &mut String, label: &str, items: u64, bytes: u64) {
    write!(
        output,
        "{label:<LABEL_WIDTH$}{} ({} bytes)",
        format_number(items),
        format_number(bytes)
    )
    .unwrap();
}

/// Formats a number with thousands separators (commas).
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }

    result
}
