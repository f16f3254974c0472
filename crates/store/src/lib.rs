#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `store` locates the trash stores a pruning run operates on. A store is a
//! directory with the XDG layout (`info/` sidecars next to `files/` content);
//! this crate models that layout and resolves the set of store roots from an
//! explicit override, the user's data home, or the system mount table.
//!
//! # Design
//!
//! Resolution is split from validation. [`home_store`] and [`mounted_stores`]
//! only build paths (mounted candidates are filtered by existence because a
//! volume without a trash directory is normal); [`TrashStore::require_info_dir`]
//! performs the hard check that a configured store is usable, and its failure
//! aborts the whole run.
//!
//! Mount scanning reads `/proc/mounts`, decodes the kernel's octal escapes in
//! the mount-point field, and probes the two conventional per-volume schemes
//! keyed by the current uid: `<mount>/.Trash/<uid>` and `<mount>/.Trash-<uid>`.
//!
//! # Errors
//!
//! [`StoreError`] covers the missing-`info`-directory contract violation and
//! an unreadable mount table. Nonexistent mounted candidates are silently
//! skipped, not errors.

mod layout;
mod resolve;

pub use layout::{StoreError, TrashStore};
pub use resolve::{home_store, home_store_from, mounted_stores, uid_stores_under};
