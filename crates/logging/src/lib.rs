#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the user-visible diagnostics primitives shared across
//! the trash-sweep workspace: the [`Message`] type with its severity prefix
//! rendering, the [`MessageSink`] writer adapter that streams rendered
//! messages into any [`io::Write`](std::io::Write) target, and the
//! [`Verbosity`] ladder that maps `-v`/`-q` flags onto output thresholds.
//!
//! # Design
//!
//! Diagnostics are rendered with a stable `trash-sweep <severity>:` prefix so
//! scripts can filter them, while plain report output (dry-run predictions,
//! statistics) is written directly by the caller without going through
//! [`Message`]. Each sink keeps one reusable render buffer so emitting large
//! batches of per-entry lines does not reallocate per message.
//!
//! # Invariants
//!
//! - Rendering never fails; only the underlying writer can produce errors.
//! - `LineMode::WithNewline` is the default so each diagnostic occupies its
//!   own line.
//! - [`Verbosity::Quiet`] gates informational output only; callers emit
//!   warnings and errors without consulting the ladder.
//!
//! # Examples
//!
//! ```
//! use logging::{Message, MessageSink};
//!
//! let mut sink = MessageSink::new(Vec::new());
//! sink.write(&Message::warning("skipping broken entry")).unwrap();
//! sink.write(&Message::error(4, "unsupported filesystem")).unwrap();
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(output.lines().all(|line| line.starts_with("trash-sweep")));
//! ```

mod message;
mod sink;
mod verbosity;

pub use message::{Message, Severity};
pub use sink::{LineMode, MessageSink};
pub use verbosity::Verbosity;
