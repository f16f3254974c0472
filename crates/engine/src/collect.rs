use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use disk::consumed_size;
use store::TrashStore;
use time::PrimitiveDateTime;
use tracing::debug;
use trashinfo::TRASHINFO_EXTENSION;

use crate::candidate::Candidate;
use crate::error::EngineError;
use crate::policy::Policy;
use crate::report::Reporter;

/// Enumerates one store's sidecar records into a candidate list.
///
/// Records without a parseable deletion date are skipped without a diagnostic
/// on the user streams. Sizes are measured only when `need_sizes` is set; an
/// absent real file contributes zero bytes and is not an error, though with
/// the check policy enabled it does draw a warning.
///
/// # Errors
///
/// Returns [`EngineError`] when the `info` directory cannot be enumerated at
/// all. Failures scoped to a single record never abort the collection.
pub(crate) fn collect_candidates<Out: Write, Err: Write>(
    store: &TrashStore,
    policy: &Policy,
    need_sizes: bool,
    now: PrimitiveDateTime,
    reporter: &mut Reporter<'_, Out, Err>,
) -> Result<Vec<Candidate>, EngineError> {
    let sidecars = list_sidecars(&store.info_dir())?;

    let mut candidates = Vec::with_capacity(sidecars.len());
    for sidecar in sidecars {
        let Some(deletion_time) = trashinfo::deletion_date(&sidecar) else {
            debug!(
                sidecar = %sidecar.display(),
                "skipping record without a deletion date",
            );
            continue;
        };
        let real_path = trashinfo::real_file_name(&sidecar);

        // Dangling symlinks still count as present content.
        let real_present =
            (policy.check() || need_sizes) && fs::symlink_metadata(&real_path).is_ok();
        if policy.check() && !real_present {
            reporter.warning(format!(
                "no content found for '{}'",
                sidecar.display(),
            ));
        }

        let mut candidate = Candidate::new(sidecar, real_path, deletion_time, now);
        if need_sizes {
            let bytes = measured_footprint(&candidate, real_present, reporter);
            candidate = candidate.with_consumed_bytes(bytes);
        }
        candidates.push(candidate);
    }

    Ok(candidates)
}

fn list_sidecars(info_dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let read_dir = fs::read_dir(info_dir).map_err(|error| {
        EngineError::io(
            "read trash information directory",
            info_dir.to_path_buf(),
            error,
        )
    })?;

    let mut sidecars = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|error| {
            EngineError::io(
                "read trash information entry",
                info_dir.to_path_buf(),
                error,
            )
        })?;
        let path = entry.path();
        if path
            .extension()
            .is_some_and(|extension| extension == TRASHINFO_EXTENSION)
        {
            sidecars.push(path);
        }
    }

    sidecars.sort();
    Ok(sidecars)
}

/// Measures a candidate's footprint: sidecar record plus real content.
fn measured_footprint<Out: Write, Err: Write>(
    candidate: &Candidate,
    real_present: bool,
    reporter: &mut Reporter<'_, Out, Err>,
) -> u64 {
    let mut log_failure = |path: &Path, error: &io::Error| {
        reporter.warning(format!(
            "cannot compute consumed size of '{}': {error}",
            path.display(),
        ));
    };

    let mut bytes = consumed_size(candidate.sidecar_path(), &mut log_failure);
    if real_present {
        bytes = bytes.saturating_add(consumed_size(candidate.real_path(), &mut log_failure));
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::{MessageSink, Verbosity};
    use time::macros::datetime;

    const NOW: PrimitiveDateTime = datetime!(2026-02-01 00:00:00);

    fn write_store(root: &Path, names_and_dates: &[(&str, &str)]) -> TrashStore {
        let store = TrashStore::new(root);
        fs::create_dir_all(store.info_dir()).expect("info dir");
        fs::create_dir_all(store.files_dir()).expect("files dir");
        for (name, date) in names_and_dates {
            let record = format!("[Trash Info]\nPath=/home/u/{name}\nDeletionDate={date}\n");
            fs::write(
                store.info_dir().join(format!("{name}.trashinfo")),
                record,
            )
            .expect("sidecar");
        }
        store
    }

    fn collect_with_policy(
        store: &TrashStore,
        policy: &Policy,
        need_sizes: bool,
    ) -> (Result<Vec<Candidate>, EngineError>, String) {
        let mut out = MessageSink::new(Vec::new());
        let mut err = MessageSink::new(Vec::new());
        let result = {
            let mut reporter = Reporter::new(&mut out, &mut err, Verbosity::Normal);
            collect_candidates(store, policy, need_sizes, NOW, &mut reporter)
        };
        let warnings = String::from_utf8(err.into_inner()).expect("utf8");
        (result, warnings)
    }

    fn default_policy() -> Policy {
        Policy::builder().build().expect("valid policy")
    }

    #[test]
    fn collects_only_parseable_sidecars() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = write_store(dir.path(), &[("kept.txt", "2026-01-10T08:00:00")]);
        fs::write(
            store.info_dir().join("undated.txt.trashinfo"),
            "[Trash Info]\nPath=/home/u/undated.txt\n",
        )
        .expect("sidecar");
        fs::write(store.info_dir().join("stray.log"), "not a record\n").expect("stray");

        let (result, warnings) = collect_with_policy(&store, &default_policy(), false);
        let candidates = result.expect("collect");

        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].real_path(),
            store.files_dir().join("kept.txt"),
        );
        assert_eq!(candidates[0].age_days(), 21);
        assert_eq!(candidates[0].consumed_bytes(), None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn enumeration_order_is_name_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = write_store(
            dir.path(),
            &[
                ("zulu", "2026-01-10T08:00:00"),
                ("alpha", "2026-01-12T08:00:00"),
                ("mike", "2026-01-11T08:00:00"),
            ],
        );

        let (result, _) = collect_with_policy(&store, &default_policy(), false);
        let names: Vec<_> = result
            .expect("collect")
            .iter()
            .map(|candidate| candidate.real_basename().expect("basename").into_owned())
            .collect();

        assert_eq!(names, ["alpha", "mike", "zulu"]);
    }

    #[test]
    fn sizes_cover_sidecar_and_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = write_store(dir.path(), &[("blob", "2026-01-10T08:00:00")]);
        fs::write(store.files_dir().join("blob"), vec![7_u8; 16 * 1024]).expect("content");

        let (result, warnings) = collect_with_policy(&store, &default_policy(), true);
        let candidates = result.expect("collect");

        let bytes = candidates[0].consumed_bytes().expect("measured");
        assert!(bytes >= 16 * 1024, "content blocks counted: {bytes}");
        assert!(warnings.is_empty());
    }

    #[test]
    fn absent_content_still_counts_the_sidecar() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = write_store(dir.path(), &[("gone", "2026-01-10T08:00:00")]);

        let (result, warnings) = collect_with_policy(&store, &default_policy(), true);
        let candidates = result.expect("collect");

        let bytes = candidates[0].consumed_bytes().expect("measured");
        assert!(bytes > 0, "sidecar blocks counted: {bytes}");
        assert!(warnings.is_empty(), "missing content is not an error");
    }

    #[test]
    fn check_policy_warns_about_missing_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = write_store(dir.path(), &[("gone", "2026-01-10T08:00:00")]);
        let policy = Policy::builder().with_check(true).build().expect("valid");

        let (result, warnings) = collect_with_policy(&store, &policy, false);
        let candidates = result.expect("collect");

        assert_eq!(candidates.len(), 1, "broken entries stay in the queue");
        assert!(warnings.contains("no content found"));
        assert!(warnings.contains("gone.trashinfo"));
    }

    #[cfg(unix)]
    #[test]
    fn check_policy_accepts_dangling_symlinks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = write_store(dir.path(), &[("link", "2026-01-10T08:00:00")]);
        std::os::unix::fs::symlink("/nonexistent/target", store.files_dir().join("link"))
            .expect("symlink");
        let policy = Policy::builder().with_check(true).build().expect("valid");

        let (result, warnings) = collect_with_policy(&store, &policy, false);
        assert_eq!(result.expect("collect").len(), 1);
        assert!(warnings.is_empty(), "a dangling link is still content");
    }

    #[test]
    fn unreadable_info_directory_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TrashStore::new(dir.path().join("missing"));

        let (result, _) = collect_with_policy(&store, &default_policy(), false);
        let error = result.expect_err("must fail");
        assert!(error.to_string().contains("read trash information directory"));
    }
}
