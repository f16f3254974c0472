use std::fs;
use std::path::Path;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

/// Section that must enclose the deletion date.
const TRASH_INFO_SECTION: &str = "Trash Info";

/// Key holding the deletion timestamp.
const DELETION_DATE_KEY: &str = "DeletionDate";

/// Timestamps are local wall-clock values with no zone designator.
const DELETION_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Reads a sidecar file and extracts its deletion timestamp.
///
/// Returns [`None`] when the file is unreadable, is not valid UTF-8, lacks a
/// `[Trash Info]` section or `DeletionDate` key, or carries a value that does
/// not parse as `YYYY-MM-DDTHH:MM:SS`. All of those are normal outcomes; the
/// caller excludes such records from the purge queue without reporting an
/// error.
#[must_use]
pub fn deletion_date(sidecar: &Path) -> Option<PrimitiveDateTime> {
    let contents = fs::read_to_string(sidecar).ok()?;
    parse_record(&contents)
}

/// Extracts the deletion timestamp from sidecar record contents.
///
/// Key lookup is ASCII-case-insensitive and only considers lines inside the
/// `[Trash Info]` section; the first `DeletionDate` line wins. Comment lines
/// starting with `#` or `;` are skipped.
#[must_use]
pub fn parse_record(contents: &str) -> Option<PrimitiveDateTime> {
    let mut in_trash_info = false;

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(section) = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            in_trash_info = section.trim() == TRASH_INFO_SECTION;
            continue;
        }

        if !in_trash_info {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case(DELETION_DATE_KEY) {
            return PrimitiveDateTime::parse(value.trim(), DELETION_DATE_FORMAT).ok();
        }
    }

    None
}
