use anyhow::{Context, Result};
use filetime::{set_file_times, FileTime};
use fs_extra::dir::CopyOptions;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{config::Config, error, error::Error, info, locate::locate, paths, warn};

/// How a resolved template lands in each target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Copy the single template file, renamed after the target
    #[default]
    Rename,
    /// Copy the whole template under its own names, merging directories
    AsIs,
}

/// What happened to one target.
#[derive(Debug)]
pub enum Outcome {
    Copied {
        source: PathBuf,
        destination: PathBuf,
    },
    Skipped {
        target: PathBuf,
    },
    Failed {
        target: PathBuf,
        error: anyhow::Error,
    },
}

/// Per-target outcomes of one copy run, in target order.
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    /// Number of targets that could not be copied.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Failed { .. }))
            .count()
    }

    /// Turns any per-target failure into an error for the whole run.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if at least one target failed.
    pub fn finish(self) -> Result<()> {
        let failed = self.failures();

        anyhow::ensure!(
            failed == 0,
            "{failed} of {} targets failed",
            self.outcomes.len()
        );

        Ok(())
    }
}

/// Applies the access and modification times of `src` to `dst`.
fn copy_times(src: &Path, dst: &Path) -> Result<()> {
    let stat_src = std::fs::metadata(src)?;

    set_file_times(
        dst,
        FileTime::from_last_access_time(&stat_src),
        FileTime::from_last_modification_time(&stat_src),
    )
    .with_context(|| format!("Failed to set file times on {}", dst.display()))
}

/// Copies `src` to `dst` (bytes, permissions and timestamps), replacing a file at `dst`.
///
/// # Errors
///
/// Returns an [`Err`] if `src` and `dst` are the same file or any IO error occurs
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    anyhow::ensure!(
        paths::canonical(src) != paths::canonical(dst),
        "{} and {} are the same file",
        src.display(),
        dst.display()
    );

    let written = std::fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;

    copy_times(src, dst)?;

    Ok(written)
}

/// Merges the contents of `src` into `dst`. Colliding files are overwritten,
/// everything else already in `dst` is left alone.
///
/// # Errors
///
/// Returns an [`Err`] if any IO error occurs
pub fn copy_tree_merge(src: &Path, dst: &Path) -> Result<u64> {
    let options = CopyOptions {
        overwrite: true,
        content_only: true,
        ..CopyOptions::new()
    };

    let written = fs_extra::dir::copy(src, dst, &options)
        .with_context(|| format!("Failed to merge {} into {}", src.display(), dst.display()))?;

    for entry in WalkDir::new(src).min_depth(1).into_iter().filter_map(paths::readable) {
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(src)?;
            copy_times(entry.path(), &dst.join(rel))?;
        }
    }

    Ok(written)
}

/// Removes whatever lives at `path`: a symlink, a directory tree or a file.
///
/// # Errors
///
/// Returns an [`Err`] if any IO error occurs
pub fn remove_path(path: &Path) -> Result<()> {
    let file_type = path.symlink_metadata()?.file_type();

    if file_type.is_symlink() {
        // Directory symlinks on Windows only go away with remove_dir
        #[cfg(target_os = "windows")]
        std::fs::remove_dir(path).or_else(|_| std::fs::remove_file(path))?;

        #[cfg(not(target_os = "windows"))]
        std::fs::remove_file(path)?;
    } else if file_type.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }

    Ok(())
}

/// Where rename mode writes `source` for `target`.
///
/// Existing files and paths with an extension are written directly. Anything
/// else is a directory, and the file inside it is named after that directory.
#[must_use]
pub fn rename_destination(source: &Path, target: &Path) -> PathBuf {
    if target.is_file() || target.extension().is_some() {
        return target.to_owned();
    }

    let base = target
        .file_name()
        .or_else(|| target.parent().and_then(Path::file_name))
        .or_else(|| source.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match source.extension() {
        Some(ext) => target.join(format!("{base}.{}", ext.to_string_lossy())),
        None => target.join(base),
    }
}

fn rename_into(source: &Path, target: &Path) -> Result<PathBuf> {
    let destination = rename_destination(source, target);

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    copy_file(source, &destination)?;

    Ok(destination)
}

fn as_is_into(template: &Path, target: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory {}", target.display()))?;

    if template.is_dir() {
        copy_tree_merge(template, target)?;
        return Ok(target.to_owned());
    }

    let name = template
        .file_name()
        .with_context(|| format!("Template {} has no file name", template.display()))?;
    let destination = target.join(name);

    if destination.is_dir() {
        remove_path(&destination)?;
    }

    copy_file(template, &destination)?;

    Ok(destination)
}

/// Copies the single template file into every target, renamed to fit it.
/// A directory template is first narrowed to its `template.*` file.
///
/// # Errors
///
/// Fails before touching any target if a directory template has no unique
/// template file. Per-target failures are recorded in the [`Report`].
pub fn copy_rename(template: &Path, targets: &[PathBuf], config: &Config) -> Result<Report, Error> {
    let source = if template.is_dir() {
        locate(template)?
    } else {
        template.to_owned()
    };

    let mut report = Report::default();

    for target in targets {
        let outcome = match rename_into(&source, target) {
            Ok(destination) => {
                info!(
                    "Copied {} to {}",
                    config.pretty(&source),
                    config.pretty(&destination)
                );
                Outcome::Copied {
                    source: source.clone(),
                    destination,
                }
            }
            Err(e) => {
                error!(format!("{e:#}"));
                Outcome::Failed {
                    target: target.clone(),
                    error: e,
                }
            }
        };

        report.outcomes.push(outcome);
    }

    Ok(report)
}

/// Copies the template unchanged into every target directory. Targets that are
/// existing files are skipped with a warning.
///
/// # Errors
///
/// [`Error::NotFound`] if the template no longer exists. Per-target failures
/// are recorded in the [`Report`].
pub fn copy_as_is(template: &Path, targets: &[PathBuf], config: &Config) -> Result<Report, Error> {
    if !template.exists() {
        return Err(Error::NotFound {
            query: template.display().to_string(),
        });
    }

    let mut report = Report::default();

    for target in targets {
        if target.is_file() {
            warn!(
                "Target {} is not a directory (required for --as-is). Skipping",
                config.pretty(target)
            );
            report.outcomes.push(Outcome::Skipped {
                target: target.clone(),
            });
            continue;
        }

        let outcome = match as_is_into(template, target) {
            Ok(destination) => {
                info!(
                    "Copied {}{} to {}",
                    if template.is_dir() { "contents of " } else { "" },
                    config.pretty(template),
                    config.pretty(&destination)
                );
                Outcome::Copied {
                    source: template.to_owned(),
                    destination,
                }
            }
            Err(e) => {
                error!(format!("{e:#}"));
                Outcome::Failed {
                    target: target.clone(),
                    error: e,
                }
            }
        };

        report.outcomes.push(outcome);
    }

    Ok(report)
}
