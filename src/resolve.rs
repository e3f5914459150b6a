//! Turns a user supplied template query into exactly one path on disk.
//!
//! Lookup order:
//! 1. The query as a path (tilde expanded, relative to the working directory).
//! 2. Every search root, in declaration order. Inside a root a directory named
//!    like the query wins; otherwise path-shaped queries are looked up as files
//!    and bare names are matched recursively against file names.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{error::Error, paths, trace, warn};

/// Matches collected across all search roots, in root order and then
/// discovery order within a root.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MatchSet {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl MatchSet {
    /// Searches `roots` for `query`. Missing roots are reported and skipped.
    #[must_use]
    pub fn collect(query: &str, roots: &[PathBuf]) -> Self {
        let mut set = Self::default();

        for root in roots {
            if !root.is_dir() {
                if root.exists() {
                    warn!("Template path {} is not a directory", root.display());
                } else {
                    warn!("Template directory {} does not exist", root.display());
                }
                continue;
            }

            let candidate = root.join(query);

            if candidate.is_dir() {
                set.dirs.push(candidate);
            } else if paths::looks_like_path(query) {
                if candidate.is_file() {
                    set.files.push(candidate);
                }
            } else {
                set.files.extend(find_named(root, query));
            }
        }

        set
    }

    /// Picks the winner. A unique directory beats any number of files.
    ///
    /// # Errors
    ///
    /// [`Error::Ambiguous`] when more than one candidate remains,
    /// [`Error::NotFound`] when there is none.
    pub fn decide(mut self, query: &str) -> Result<PathBuf, Error> {
        if self.dirs.len() == 1 {
            return Ok(self.dirs.remove(0));
        }

        match self.dirs.len() + self.files.len() {
            0 => Err(Error::NotFound {
                query: query.to_string(),
            }),
            1 => Ok(self.files.remove(0)),
            _ => Err(Error::Ambiguous {
                query: query.to_string(),
                dirs: self.dirs,
                files: self.files,
            }),
        }
    }
}

/// Files under `root` whose name matches `pattern`, sorted by path.
fn find_named(root: &Path, pattern: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(paths::readable)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name == pattern || glob_match::glob_match(pattern, name))
        })
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.is_file())
        .collect()
}

/// Resolves `query` to a single existing file or directory.
///
/// # Errors
///
/// [`Error::NotFound`] or [`Error::Ambiguous`], see [`MatchSet::decide`].
pub fn resolve(query: &str, cwd: &Path, roots: &[PathBuf]) -> Result<PathBuf, Error> {
    let query = query.trim();
    let local = paths::absolute(query, cwd);

    if local.exists() {
        trace!("Resolved {query} as a path: {}", local.display());
        return Ok(local);
    }

    let expanded = shellexpand::tilde(query);
    if Path::new(&*expanded).is_absolute() {
        return Err(Error::NotFound {
            query: query.to_string(),
        });
    }

    MatchSet::collect(query, roots).decide(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
    }

    #[test]
    fn absolute_path_wins_over_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        let outside = tmp.path().join("mine/template.typ");
        touch(&root.join("template.typ"));
        touch(&outside);

        let resolved = resolve(outside.to_str().unwrap(), tmp.path(), &[root]).unwrap();

        assert_eq!(resolved, outside);
    }

    #[test]
    fn relative_path_is_taken_from_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        touch(&root.join("notes.md"));
        touch(&tmp.path().join("work/notes.md"));

        let resolved = resolve("notes.md", &tmp.path().join("work"), &[root]).unwrap();

        assert_eq!(resolved, tmp.path().join("work/notes.md"));
    }

    #[test]
    fn missing_absolute_path_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let query = tmp.path().join("nope");

        let err = resolve(query.to_str().unwrap(), tmp.path(), &[tmp.path().to_owned()]);

        assert!(matches!(err, Err(Error::NotFound { .. })));
    }

    #[test]
    fn unique_directory_wins_over_files() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("a");
        let second = tmp.path().join("b");
        fs::create_dir_all(first.join("typst")).unwrap();
        touch(&second.join("nested/typst"));
        touch(&second.join("typst2/typst"));

        let resolved = resolve("typst", tmp.path(), &[first.clone(), second]).unwrap();

        assert_eq!(resolved, first.join("typst"));
    }

    #[test]
    fn two_files_are_ambiguous() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("a");
        let second = tmp.path().join("b");
        touch(&first.join("report.txt"));
        touch(&second.join("deep/report.txt"));

        let err = resolve("report.txt", tmp.path(), &[first.clone(), second.clone()]);

        match err {
            Err(Error::Ambiguous { dirs, files, .. }) => {
                assert!(dirs.is_empty());
                assert_eq!(
                    files,
                    vec![first.join("report.txt"), second.join("deep/report.txt")]
                );
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn two_directories_are_ambiguous() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("a");
        let second = tmp.path().join("b");
        fs::create_dir_all(first.join("lab")).unwrap();
        fs::create_dir_all(second.join("lab")).unwrap();

        let err = resolve("lab", tmp.path(), &[first, second]);

        assert!(matches!(err, Err(Error::Ambiguous { ref dirs, .. }) if dirs.len() == 2));
    }

    #[test]
    fn nothing_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        touch(&root.join("other.typ"));

        let err = resolve("missing.typ", tmp.path(), &[root]);

        assert!(matches!(err, Err(Error::NotFound { ref query }) if query == "missing.typ"));
    }

    #[test]
    fn path_shaped_query_only_checks_that_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        touch(&root.join("typst/template.typ"));
        touch(&root.join("other/template.typ"));

        let resolved = resolve("typst/template.typ", tmp.path(), &[root.clone()]).unwrap();

        assert_eq!(resolved, root.join("typst/template.typ"));
    }

    #[test]
    fn missing_root_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        touch(&root.join("x/only.bib"));

        let resolved =
            resolve("only.bib", tmp.path(), &[tmp.path().join("gone"), root.clone()]).unwrap();

        assert_eq!(resolved, root.join("x/only.bib"));
    }

    #[test]
    fn bracketed_name_matches_itself() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        touch(&root.join("labs/lab[1].typ"));

        let resolved = resolve("lab[1].typ", tmp.path(), &[root.clone()]).unwrap();

        assert_eq!(resolved, root.join("labs/lab[1].typ"));
    }

    #[test]
    fn root_that_is_a_file_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("temps.txt");
        touch(&bogus);
        let root = tmp.path().join("temps");
        touch(&root.join("only.typ"));

        let resolved = resolve("only.typ", tmp.path(), &[bogus, root.clone()]).unwrap();

        assert_eq!(resolved, root.join("only.typ"));
    }

    #[test]
    fn glob_pattern_matches_file_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("temps");
        touch(&root.join("sub/paper.typ"));
        touch(&root.join("sub/paper.bib"));

        let resolved = resolve("*.typ", tmp.path(), &[root.clone()]).unwrap();

        assert_eq!(resolved, root.join("sub/paper.typ"));
    }

    #[test]
    fn decide_prefers_single_directory() {
        let set = MatchSet {
            dirs: vec![PathBuf::from("/r/x")],
            files: vec![PathBuf::from("/r2/x"), PathBuf::from("/r3/x")],
        };

        assert_eq!(set.decide("x").unwrap(), PathBuf::from("/r/x"));
    }
}
