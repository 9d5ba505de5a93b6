// Working-tree copy and mirror synchronization.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counts of filesystem entries a mirror pass touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct MirrorStats {
    /// Files written into the destination.
    pub copied: usize,
    /// Destination entries removed because the source lacks them.
    pub deleted: usize,
}

fn is_named(entry_name: &OsStr, names: &[&str]) -> bool {
    names.iter().any(|name| entry_name == OsStr::new(name))
}

fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src)
        .with_context(|| format!("Failed to read symlink {}", src.display()))?;
    if dst.symlink_metadata().is_ok() {
        fs::remove_file(dst)?;
    }
    #[cfg(unix)]
    std::os::unix::fs::symlink(&target, dst)
        .with_context(|| format!("Failed to create symlink {}", dst.display()))?;
    #[cfg(not(unix))]
    anyhow::bail!("Symlink {} cannot be copied on this platform", src.display());
    Ok(())
}

/// Recursively copies `src` into `dst`, skipping entries whose file name
/// matches `exclude` at any depth. Existing destination files are
/// overwritten; entries whose kind changed between source and destination
/// are replaced. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path, exclude: &[&str]) -> Result<usize> {
    let mut copied = 0;
    let walker = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_named(entry.file_name(), exclude));

    for entry in walker {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if target.symlink_metadata().is_ok() && !target.is_dir() {
                fs::remove_file(&target)?;
            }
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            if target.is_dir() {
                fs::remove_dir_all(&target)?;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Makes `dst` an exact mirror of `src`: destination entries absent from
/// the source are deleted, everything else is overlaid from the source.
/// Entries named in `preserve` are left untouched on the destination side,
/// which is how a staged clone keeps its version-control metadata.
pub fn mirror_tree(src: &Path, dst: &Path, preserve: &[&str]) -> Result<MirrorStats> {
    let mut stats = MirrorStats::default();

    let mut stale: Vec<PathBuf> = Vec::new();
    let walker = WalkDir::new(dst)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_named(entry.file_name(), preserve));
    for entry in walker {
        let entry = entry?;
        let rel = entry.path().strip_prefix(dst)?;
        if src.join(rel).symlink_metadata().is_err() {
            stale.push(entry.path().to_path_buf());
        }
    }

    for path in stale {
        // A stale directory removed earlier in the list takes its children
        // with it.
        let Ok(metadata) = path.symlink_metadata() else {
            continue;
        };
        if metadata.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        stats.deleted += 1;
    }

    stats.copied = copy_tree(src, dst, &[])?;
    Ok(stats)
}
