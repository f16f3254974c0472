use std::fs;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// POSIX fixes the `st_blocks` unit at 512 bytes regardless of `st_blksize`.
const ST_BLOCKS_UNIT: u64 = 512;

/// Returns the disk space occupied by `path`, in bytes.
///
/// Regular files and directories report `st_blocks` multiplied by the fixed
/// 512-byte unit; a directory additionally sums every entry below it, in no
/// guaranteed traversal order. A symbolic link reports the byte length of its
/// target string and is never followed, so a dangling link still has a
/// nonzero footprint.
///
/// The call itself never fails: any subpath that cannot be inspected
/// contributes zero and is reported through `on_error` together with the
/// offending path.
pub fn consumed_size<F>(path: &Path, on_error: &mut F) -> u64
where
    F: FnMut(&Path, &io::Error),
{
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) => {
            on_error(path, &error);
            return 0;
        }
    };

    if metadata.file_type().is_symlink() {
        return match fs::read_link(path) {
            Ok(target) => target.as_os_str().len() as u64,
            Err(error) => {
                on_error(path, &error);
                0
            }
        };
    }

    let mut total = metadata.blocks().saturating_mul(ST_BLOCKS_UNIT);

    if metadata.is_dir() {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(error) => {
                on_error(path, &error);
                return total;
            }
        };
        for entry in entries {
            match entry {
                Ok(entry) => {
                    total = total.saturating_add(consumed_size(&entry.path(), on_error));
                }
                Err(error) => on_error(path, &error),
            }
        }
    }

    total
}
