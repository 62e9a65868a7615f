//! File manipulation helpers.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{CacheError, Result};
use crate::glob::glob_dir;

/// Copy files into a directory, keeping each file's modification time.
///
/// Without an anchor every file lands directly in `dest`. With an anchor
/// the path of each file relative to the anchor is kept, and the needed
/// subdirectories are created. An anchor that is not a directory is
/// replaced by its parent.
pub fn copy_files<I, P>(src: I, dest: &Path, anchor: Option<&Path>) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    fs::create_dir_all(dest)?;

    let anchor = anchor.map(|a| {
        if a.is_dir() {
            a.to_path_buf()
        } else {
            a.parent().map(Path::to_path_buf).unwrap_or_default()
        }
    });

    let mut copied = Vec::new();
    for file in src {
        let file = file.as_ref();
        let target = match &anchor {
            Some(anchor) => {
                let rel = file
                    .strip_prefix(anchor)
                    .map_err(|_| CacheError::OutsideAnchor {
                        path: file.to_path_buf(),
                        anchor: anchor.clone(),
                    })?;
                dest.join(rel)
            }
            None => {
                let name = file.file_name().ok_or_else(|| {
                    CacheError::Other(anyhow::anyhow!("{} has no file name", file.display()))
                })?;
                dest.join(name)
            }
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        copy_preserving_mtime(file, &target)?;
        tracing::debug!("Copied {} -> {}", file.display(), target.display());
        copied.push(target);
    }

    Ok(copied)
}

/// Copy contents and permissions, then carry the source modification time
/// over (`fs::copy` leaves the destination stamped with "now").
fn copy_preserving_mtime(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)?;
    let modified = fs::metadata(from)?.modified()?;
    fs::File::options()
        .write(true)
        .open(to)?
        .set_modified(modified)?;
    Ok(())
}

/// Expand a glob pattern under `base` and return the matches relative to it.
pub fn relpaths(base: &Path, pattern: &str) -> Result<Vec<String>> {
    let matches = glob_dir(base, pattern)?;
    relpaths_of(base, matches)
}

/// Convert paths to strings relative to `base`.
pub fn relpaths_of<I, P>(base: &Path, paths: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| {
            let p = p.as_ref();
            p.strip_prefix(base)
                .map(|rel| rel.display().to_string())
                .map_err(|_| CacheError::OutsideAnchor {
                    path: p.to_path_buf(),
                    anchor: base.to_path_buf(),
                })
        })
        .collect()
}

/// Split paths into those under `base` and those outside it.
pub fn outoftree_paths<I, P>(base: &Path, paths: I) -> (Vec<PathBuf>, Vec<PathBuf>)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .partition(|p| p.starts_with(base))
}

/// Whether `testfile` is the same physical file as any of `paths`.
///
/// `testfile` must exist; paths in the list that do not exist never match.
pub fn path_in<I, P>(paths: I, testfile: &Path) -> Result<bool>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let target = fs::canonicalize(testfile)?;
    Ok(paths
        .into_iter()
        .any(|p| fs::canonicalize(p.as_ref()).is_ok_and(|c| c == target)))
}

/// Opposite of [`path_in`].
pub fn path_not_in<I, P>(paths: I, testfile: &Path) -> Result<bool>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    path_in(paths, testfile).map(|found| !found)
}

/// Render a path with forward slashes regardless of platform.
pub fn posix_path_string(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}
