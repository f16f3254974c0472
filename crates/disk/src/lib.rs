#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `disk` answers the two filesystem questions retention pruning needs:
//! how much disk a trashed item actually occupies, and how much space is
//! still free on the filesystem holding a trash store.
//!
//! # Design
//!
//! [`consumed_size`] reports occupied blocks (`st_blocks` at the POSIX-fixed
//! 512-byte unit), not logical length, so sparse files and tail padding are
//! accounted the way `du` would. Symbolic links report the byte length of
//! their target string and are never followed. Directory walks are tolerant:
//! a subpath that cannot be read contributes zero and is surfaced through a
//! caller-supplied callback, so one unreadable entry cannot abort sizing.
//!
//! [`free_megabytes`] wraps `statvfs`. A filesystem reporting a zero fragment
//! size cannot express free space and yields
//! [`FreeSpaceError::UnsupportedFilesystem`], which callers treat as fatal
//! for the whole run.

mod free_space;
mod usage;

pub use free_space::{free_megabytes, FreeSpaceError, BYTES_PER_MEGABYTE};
pub use usage::consumed_size;
