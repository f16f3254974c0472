#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `trashinfo` reads the sidecar records that accompany every item in an XDG
//! trash store. A store keeps metadata under `<store>/info/<name>.trashinfo`
//! and the discarded content under `<store>/files/<name>`; this crate parses
//! the `DeletionDate` field out of the metadata and derives the companion
//! content path without touching the filesystem.
//!
//! # Design
//!
//! The record format is INI-like: a `[Trash Info]` section containing
//! `key=value` lines. Only the deletion date matters for retention pruning,
//! so parsing returns `Option<PrimitiveDateTime>` rather than a structured
//! record: a sidecar without a usable date is excluded from processing, and
//! that exclusion is a normal outcome, not an error. Timestamps are local
//! wall-clock values with no zone, which is why [`time::PrimitiveDateTime`]
//! is the parsed type.
//!
//! # Examples
//!
//! ```
//! use std::path::Path;
//! use time::macros::datetime;
//!
//! let record = "[Trash Info]\nPath=/home/u/report.pdf\nDeletionDate=2026-07-04T12:30:00\n";
//! let parsed = trashinfo::parse_record(record).unwrap();
//! assert_eq!(parsed, datetime!(2026-07-04 12:30:00));
//!
//! let real = trashinfo::real_file_name(Path::new("/t/info/report.pdf.trashinfo"));
//! assert_eq!(real, Path::new("/t/files/report.pdf"));
//! ```

mod paths;
mod record;

pub use paths::{real_file_name, FILES_DIR, INFO_DIR, TRASHINFO_EXTENSION};
pub use record::{deletion_date, parse_record};
