use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{error::Error, paths};

fn is_template_name(name: &str) -> bool {
    name == "template" || name.starts_with("template.")
}

/// Finds the one `template` / `template.*` file below `dir`.
///
/// # Errors
///
/// [`Error::NoTemplateFile`] if there is none, [`Error::MultipleTemplateFiles`]
/// if more than one is found.
pub fn locate(dir: &Path) -> Result<PathBuf, Error> {
    let mut matches: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(paths::readable)
        .filter(|entry| entry.file_name().to_str().is_some_and(is_template_name))
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.is_file())
        .collect();

    match matches.len() {
        0 => Err(Error::NoTemplateFile {
            dir: dir.to_owned(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::MultipleTemplateFiles {
            dir: dir.to_owned(),
            matches,
        }),
    }
}
