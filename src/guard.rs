use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Nesting},
    paths,
};

/// Refuses targets that overlap a directory template, in either direction.
/// Runs over every target before anything is copied. File templates always pass.
///
/// # Errors
///
/// [`Error::DestructiveNesting`] for the first overlapping target.
pub fn check(template: &Path, targets: &[PathBuf]) -> Result<(), Error> {
    if !template.is_dir() {
        return Ok(());
    }

    let root = paths::canonical(template);

    for target in targets {
        let resolved = paths::canonical(target);

        let nesting = if resolved.starts_with(&root) {
            Nesting::TargetInsideTemplate
        } else if root.starts_with(&resolved) {
            Nesting::TemplateInsideTarget
        } else {
            continue;
        };

        return Err(Error::DestructiveNesting {
            target: target.clone(),
            template: template.to_owned(),
            nesting,
        });
    }

    Ok(())
}
