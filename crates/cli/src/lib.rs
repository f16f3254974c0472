#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the thin command-line front-end for `trash-sweep`. It recognises
//! the retention flags (`--days`, `--delete`, `--min-free`/`--keep-free`,
//! `--max-free`, `--delete-first`), the store selection flags
//! (`--trash-path`, `--trash-mounts`), and the mode flags (`--dry-run`,
//! `--check`, `--stat`, `--verbose`, `--quiet`), resolves the trash stores to
//! sweep, and delegates the actual pruning to [`engine::run`].
//!
//! # Design
//!
//! [`run`] is the embeddable entry point: it accepts an argument iterator
//! together with handles for standard output and error, and returns the
//! process exit code, so the binary stays a two-line wrapper and tests can
//! drive the full surface in memory. A hand-built [`clap`](https://docs.rs/clap/)
//! command performs the parse with the automatic help and version flags
//! disabled; help and version output come from static snapshots so wording
//! stays stable.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes with one
//!   diagnostic on standard error.
//! - `--help` and `--version` short-circuit before any filesystem work.
//! - Megabyte-denominated flags are converted to bytes exactly once, here;
//!   the engine only ever sees bytes.
//!
//! # Errors
//!
//! Argument and policy validation failures exit with code `1`. Store
//! selection failures (no usable trash directory, unreadable mount table)
//! exit with code `3`, free-space probe failures with code `4`, both mapped
//! from [`engine::EngineError::exit_code`].
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["trash-sweep", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

use disk::BYTES_PER_MEGABYTE;
use engine::{Policy, PriorityPattern, Reporter};
use logging::{Message, MessageSink, Verbosity};
use store::TrashStore;

mod stats;

use stats::render_stats;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Exit code for argument and policy validation failures.
const USAGE_EXIT_CODE: i32 = 1;

/// Deterministic help text describing the supported surface.
const HELP_TEXT: &str = concat!(
    "trash-sweep ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "https://github.com/oferchen/trash-sweep\n",
    "\n",
    "Usage: trash-sweep [-d DAYS] [--delete MB] [--min-free MB] [--max-free MB]\n",
    "                   [-D PATTERN]... [-T PATH] [-t] [--dry-run] [--check]\n",
    "                   [--stat] [-v] [-q]\n",
    "\n",
    "Permanently removes trashed files according to retention policy: entries\n",
    "older than an age threshold, or oldest-first until a free-space goal is\n",
    "met. Without --trash-path the user's home trash directory is swept.\n",
    "\n",
    "  -d, --days DAYS       Purge entries deleted more than DAYS days ago.\n",
    "      --delete MB       Purge oldest entries until MB megabytes are freed\n",
    "                        in the store.\n",
    "      --min-free MB     Purge oldest entries until the store's filesystem\n",
    "                        has MB megabytes free (alias: --keep-free).\n",
    "      --max-free MB     Skip stores whose filesystem already has more\n",
    "                        than MB megabytes free.\n",
    "  -D, --delete-first PATTERN\n",
    "                        Purge entries whose name starts with a match of\n",
    "                        PATTERN before anything else. May be repeated; the\n",
    "                        first pattern has the highest priority.\n",
    "  -T, --trash-path PATH Sweep exactly the trash directory at PATH.\n",
    "  -t, --trash-mounts    Also sweep per-volume trash directories found in\n",
    "                        the mount table.\n",
    "      --dry-run         Report what would be removed without removing.\n",
    "      --check           Warn about records whose content is missing.\n",
    "      --stat            Print entry and byte totals at the end of the run.\n",
    "  -v, --verbose         Per-candidate diagnostics; repeat for debug output.\n",
    "  -q, --quiet           Only warnings and errors.\n",
    "  -h, --help            Show this help message and exit.\n",
    "  -V, --version         Output version information and exit.\n",
);

/// Version banner printed for `--version`.
const VERSION_TEXT: &str = concat!("trash-sweep ", env!("CARGO_PKG_VERSION"), "\n");

/// Parsed command produced by [`parse_args`].
#[derive(Debug)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    days: u32,
    delete_megabytes: u64,
    min_free_megabytes: u64,
    max_free_megabytes: u64,
    delete_first: Vec<String>,
    trash_path: Option<PathBuf>,
    trash_mounts: bool,
    dry_run: bool,
    check: bool,
    stat: bool,
    verbose: u8,
    quiet: bool,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("trash-sweep")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("days")
                .long("days")
                .short('d')
                .value_name("DAYS")
                .help("Purge entries deleted more than DAYS days ago.")
                .value_parser(clap::value_parser!(u32))
                .default_value("0"),
        )
        .arg(
            Arg::new("delete")
                .long("delete")
                .value_name("MB")
                .help("Purge oldest entries until MB megabytes are freed.")
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("min-free")
                .long("min-free")
                .alias("keep-free")
                .value_name("MB")
                .help("Purge oldest entries until MB megabytes are free.")
                .value_parser(clap::value_parser!(u64))
                .default_value("0")
                .conflicts_with("delete"),
        )
        .arg(
            Arg::new("max-free")
                .long("max-free")
                .value_name("MB")
                .help("Skip stores with more than MB megabytes free.")
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("delete-first")
                .long("delete-first")
                .short('D')
                .value_name("PATTERN")
                .help("Purge entries matching PATTERN first. May be repeated.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("trash-path")
                .long("trash-path")
                .short('T')
                .value_name("PATH")
                .help("Sweep exactly the trash directory at PATH.")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("trash-mounts")
                .long("trash-mounts")
                .short('t')
                .help("Also sweep per-volume trash directories.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would be removed without removing.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Warn about records whose content is missing.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stat")
                .long("stat")
                .help("Print entry and byte totals at the end of the run.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Per-candidate diagnostics; repeat for debug output.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only warnings and errors.")
                .action(ArgAction::SetTrue),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("trash-sweep"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        days: matches.remove_one::<u32>("days").unwrap_or_default(),
        delete_megabytes: matches.remove_one::<u64>("delete").unwrap_or_default(),
        min_free_megabytes: matches.remove_one::<u64>("min-free").unwrap_or_default(),
        max_free_megabytes: matches.remove_one::<u64>("max-free").unwrap_or_default(),
        delete_first: matches
            .remove_many::<String>("delete-first")
            .map(Iterator::collect)
            .unwrap_or_default(),
        trash_path: matches.remove_one::<PathBuf>("trash-path"),
        trash_mounts: matches.get_flag("trash-mounts"),
        dry_run: matches.get_flag("dry-run"),
        check: matches.get_flag("check"),
        stat: matches.get_flag("stat"),
        verbose: matches.get_count("verbose"),
        quiet: matches.get_flag("quiet"),
    })
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code the caller should use. All diagnostics are
/// rendered through [`logging::MessageSink`] so formatting stays uniform
/// across the workspace.
#[allow(clippy::module_name_repetitions)]
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let mut stderr_sink = MessageSink::new(stderr);
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, &mut stderr_sink),
        Err(error) => usage_failure(&mut stderr_sink, &error.to_string()),
    }
}

fn usage_failure<Err: Write>(stderr: &mut MessageSink<Err>, text: &str) -> i32 {
    let _ = stderr.write(&Message::error(USAGE_EXIT_CODE, text.to_string()));
    USAGE_EXIT_CODE
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut MessageSink<Err>) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        if stdout.write_all(HELP_TEXT.as_bytes()).is_err() {
            return USAGE_EXIT_CODE;
        }
        return 0;
    }

    if parsed.show_version {
        if stdout.write_all(VERSION_TEXT.as_bytes()).is_err() {
            return USAGE_EXIT_CODE;
        }
        return 0;
    }

    init_tracing();

    let mut patterns = Vec::with_capacity(parsed.delete_first.len());
    for text in &parsed.delete_first {
        match PriorityPattern::new(text) {
            Ok(pattern) => patterns.push(pattern),
            Err(error) => return usage_failure(stderr, &error.to_string()),
        }
    }

    let policy = match Policy::builder()
        .with_age_threshold_days(parsed.days)
        .with_delete_target_bytes(parsed.delete_megabytes.saturating_mul(BYTES_PER_MEGABYTE))
        .with_min_free_bytes(parsed.min_free_megabytes.saturating_mul(BYTES_PER_MEGABYTE))
        .with_max_free_bytes(parsed.max_free_megabytes.saturating_mul(BYTES_PER_MEGABYTE))
        .with_patterns(patterns)
        .with_dry_run(parsed.dry_run)
        .with_check(parsed.check)
        .with_stat(parsed.stat)
        .build()
    {
        Ok(policy) => policy,
        Err(error) => return usage_failure(stderr, &error.to_string()),
    };

    let verbosity = Verbosity::from_flags(parsed.verbose, parsed.quiet);

    let stores = match resolve_stores(&parsed) {
        Ok(stores) => stores,
        Err(message) => {
            let code = message.code().unwrap_or(USAGE_EXIT_CODE);
            let _ = stderr.write(&message);
            return code;
        }
    };
    debug!(count = stores.len(), "resolved trash stores");

    let now = collection_timestamp();

    let mut out_sink = MessageSink::new(stdout);
    let mut reporter = Reporter::new(&mut out_sink, stderr, verbosity);
    match engine::run(&stores, &policy, now, &mut reporter) {
        Ok(run_stats) => {
            if policy.stat() {
                reporter.line(Verbosity::Normal, &render_stats(&run_stats));
            }
            let _ = out_sink.flush();
            0
        }
        Err(error) => {
            let code = error.exit_code();
            let _ = stderr.write(&Message::error(code, error.to_string()));
            code
        }
    }
}

/// Resolves the list of stores this run sweeps, in processing order.
///
/// An explicit `--trash-path` wins over the home store; `--trash-mounts`
/// appends per-volume stores in mount-table order, deduplicated against
/// whatever came first.
fn resolve_stores(parsed: &ParsedArgs) -> Result<Vec<TrashStore>, Message> {
    let mut stores = Vec::new();

    if let Some(path) = &parsed.trash_path {
        stores.push(TrashStore::new(path.clone()));
    } else if let Some(home) = store::home_store() {
        stores.push(home);
    } else {
        return Err(Message::error(
            engine::STORE_SELECT_EXIT_CODE,
            "cannot locate the home trash directory (set HOME or XDG_DATA_HOME, \
             or pass --trash-path)",
        ));
    }

    if parsed.trash_mounts {
        let mounted = store::mounted_stores().map_err(|error| {
            Message::error(engine::STORE_SELECT_EXIT_CODE, error.to_string())
        })?;
        for candidate in mounted {
            if !stores.contains(&candidate) {
                stores.push(candidate);
            }
        }
    }

    Ok(stores)
}

/// Local wall-clock time, matching the timezone-free timestamps in sidecars.
fn collection_timestamp() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Installs an env-filter subscriber when `RUST_LOG` asks for one.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn run_capturing(arguments: &[&str]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(arguments.iter().copied(), &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).expect("stdout utf8"),
            String::from_utf8(stderr).expect("stderr utf8"),
        )
    }

    fn seed_store(root: &Path, name: &str, date: &str) {
        fs::create_dir_all(root.join("info")).expect("info dir");
        fs::create_dir_all(root.join("files")).expect("files dir");
        fs::write(
            root.join("info").join(format!("{name}.trashinfo")),
            format!("[Trash Info]\nPath=/home/u/{name}\nDeletionDate={date}\n"),
        )
        .expect("sidecar");
        fs::write(root.join("files").join(name), b"payload").expect("content");
    }

    #[test]
    fn help_prints_usage_and_succeeds() {
        let (code, stdout, stderr) = run_capturing(&["trash-sweep", "--help"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("Usage: trash-sweep"));
        assert!(stdout.contains("--delete-first"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn version_prints_banner_and_succeeds() {
        let (code, stdout, stderr) = run_capturing(&["trash-sweep", "-V"]);
        assert_eq!(code, 0);
        assert!(stdout.starts_with("trash-sweep "));
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
        assert!(stderr.is_empty());
    }

    #[test]
    fn unknown_flags_are_usage_errors() {
        let (code, stdout, stderr) = run_capturing(&["trash-sweep", "--definitely-bogus"]);
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(stdout.is_empty());
        assert!(!stderr.is_empty());
    }

    #[test]
    fn positional_operands_are_rejected() {
        let (code, _, stderr) = run_capturing(&["trash-sweep", "some/path"]);
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(!stderr.is_empty());
    }

    #[test]
    fn min_free_conflicts_with_delete() {
        let (code, _, stderr) =
            run_capturing(&["trash-sweep", "--min-free", "100", "--delete", "100"]);
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(!stderr.is_empty());
    }

    #[test]
    fn keep_free_is_an_alias_for_min_free() {
        let parsed =
            parse_args(["trash-sweep", "--keep-free", "250"]).expect("parse");
        assert_eq!(parsed.min_free_megabytes, 250);
    }

    #[test]
    fn bad_patterns_are_reported_with_their_text() {
        let (code, _, stderr) = run_capturing(&["trash-sweep", "-D", "["]);
        assert_eq!(code, USAGE_EXIT_CODE);
        assert!(stderr.contains("invalid priority pattern"));
        assert!(stderr.contains("(code 1)"));
    }

    #[test]
    fn missing_info_directory_exits_with_store_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().to_str().expect("utf8 path");

        let (code, _, stderr) =
            run_capturing(&["trash-sweep", "-T", root, "-d", "30"]);

        assert_eq!(code, engine::STORE_SELECT_EXIT_CODE);
        assert!(stderr.contains("trash information directory"));
    }

    #[test]
    fn age_sweep_over_an_explicit_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_store(dir.path(), "ancient", "2020-01-01T00:00:00");
        seed_store(dir.path(), "fresh", "2999-01-01T00:00:00");
        let root = dir.path().to_str().expect("utf8 path");

        let (code, _, stderr) =
            run_capturing(&["trash-sweep", "-T", root, "-d", "30"]);

        assert_eq!(code, 0, "stderr: {stderr}");
        assert!(!dir.path().join("files").join("ancient").exists());
        assert!(dir.path().join("files").join("fresh").exists());
    }

    #[test]
    fn dry_run_reports_but_keeps_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_store(dir.path(), "ancient", "2020-01-01T00:00:00");
        let root = dir.path().to_str().expect("utf8 path");

        let (code, stdout, _) =
            run_capturing(&["trash-sweep", "-T", root, "-d", "30", "--dry-run"]);

        assert_eq!(code, 0);
        assert!(stdout.contains("would remove"));
        assert!(dir.path().join("files").join("ancient").exists());
    }

    #[test]
    fn stat_mode_prints_the_totals_block() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_store(dir.path(), "ancient", "2020-01-01T00:00:00");
        let root = dir.path().to_str().expect("utf8 path");

        let (code, stdout, _) =
            run_capturing(&["trash-sweep", "-T", root, "--stat"]);

        assert_eq!(code, 0);
        assert!(stdout.contains("Total entries:"));
        assert!(stdout.contains("Deleted entries:"));
        assert!(stdout.contains("Remaining:"));
    }

    #[test]
    fn quiet_suppresses_the_stats_block() {
        let dir = tempfile::tempdir().expect("tempdir");
        seed_store(dir.path(), "ancient", "2020-01-01T00:00:00");
        let root = dir.path().to_str().expect("utf8 path");

        let (code, stdout, _) =
            run_capturing(&["trash-sweep", "-T", root, "--stat", "-q"]);

        assert_eq!(code, 0);
        assert!(stdout.is_empty());
    }
}
