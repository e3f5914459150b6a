use std::path::{Component, Path, PathBuf};

use walkdir::DirEntry;

use crate::trace;

/// Expands a leading `~` and makes `raw` absolute against `cwd`, collapsing
/// `.` and `..` components without touching the filesystem.
#[must_use]
pub fn absolute(raw: &str, cwd: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());

    if expanded.is_absolute() {
        normalize(&expanded)
    } else {
        normalize(&cwd.join(expanded))
    }
}

/// Lexically removes `.` and `..` components. A `..` at the root stays at the root.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    out
}

/// Canonicalizes the longest existing ancestor of `path` and re-attaches the
/// missing tail, so paths that do not exist yet still compare against
/// symlink-resolved ones.
#[must_use]
pub fn canonical(path: &Path) -> PathBuf {
    let path = normalize(path);
    let mut existing = path.as_path();
    let mut tail = Vec::new();

    loop {
        if let Ok(resolved) = existing.canonicalize() {
            return tail
                .iter()
                .rev()
                .fold(resolved, |acc: PathBuf, part| acc.join(part));
        }

        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_owned());
                existing = parent;
            }
            _ => return path.clone(),
        }
    }
}

/// Keeps readable walk entries, tracing the ones that fail.
pub fn readable(entry: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            trace!("Skipping unreadable entry: {e}");
            None
        }
    }
}

/// Whether the user wrote something path shaped rather than a bare name.
#[must_use]
pub fn looks_like_path(query: &str) -> bool {
    query.contains('/') || query.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_segments_are_collapsed() {
        let cwd = Path::new("/home/user/hw");

        assert_eq!(absolute("../temps/x", cwd), PathBuf::from("/home/user/temps/x"));
        assert_eq!(absolute("./a/./b", cwd), PathBuf::from("/home/user/hw/a/b"));
        assert_eq!(absolute("/abs/path", cwd), PathBuf::from("/abs/path"));
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn canonical_keeps_missing_tail() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();

        assert_eq!(
            canonical(&tmp.path().join("missing/deeper")),
            root.join("missing").join("deeper")
        );
        assert_eq!(canonical(tmp.path()), root);
    }

    #[test]
    fn unreadable_walk_entries_are_dropped() {
        let tmp = tempfile::tempdir().unwrap();

        let entries: Vec<_> = walkdir::WalkDir::new(tmp.path().join("missing"))
            .into_iter()
            .filter_map(readable)
            .collect();

        assert!(entries.is_empty());
    }

    #[test]
    fn path_shape() {
        assert!(looks_like_path("typst/template.typ"));
        assert!(!looks_like_path("template.typ"));
    }
}
