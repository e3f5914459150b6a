use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Which way a directory template and a target overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// The target is the template directory or lives below it
    TargetInsideTemplate,
    /// The template directory lives below the target
    TemplateInsideTarget,
}

/// Fatal, classified failures of template resolution, guarding and picking.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to resolve template \"{query}\"")]
    NotFound { query: String },

    #[error("Multiple matches found for template \"{query}\":\n{}", listing(.dirs, .files))]
    Ambiguous {
        query: String,
        dirs: Vec<PathBuf>,
        files: Vec<PathBuf>,
    },

    #[error("No template.* files found in {}", .dir.display())]
    NoTemplateFile { dir: PathBuf },

    #[error(
        "Multiple template.* files found in {}:\n{}Please specify which template to use with --template",
        .dir.display(),
        indented(.matches)
    )]
    MultipleTemplateFiles { dir: PathBuf, matches: Vec<PathBuf> },

    #[error("{}. Refusing to copy", describe_nesting(.target, .template, .nesting))]
    DestructiveNesting {
        target: PathBuf,
        template: PathBuf,
        nesting: Nesting,
    },

    #[error("Picker `{program}` is not available. Is it installed and in PATH?")]
    PickerUnavailable { program: String },

    #[error("Aborted")]
    PickerCancelled,

    #[error("No templates found in template directories")]
    NoCandidates,

    #[error("Failed to run picker: {0}")]
    Picker(#[from] std::io::Error),
}

fn describe_nesting(target: &Path, template: &Path, nesting: &Nesting) -> String {
    match nesting {
        Nesting::TargetInsideTemplate => format!(
            "Target {} is inside template directory {}",
            target.display(),
            template.display()
        ),
        Nesting::TemplateInsideTarget => format!(
            "Template {} is inside target directory {}",
            template.display(),
            target.display()
        ),
    }
}

struct Indented<'a>(&'a [PathBuf]);

impl Display for Indented<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for path in self.0 {
            writeln!(f, "  {}", path.display())?;
        }

        Ok(())
    }
}

fn indented(paths: &[PathBuf]) -> Indented<'_> {
    Indented(paths)
}

fn listing(dirs: &[PathBuf], files: &[PathBuf]) -> String {
    format!(
        "Directories:\n{}Files:\n{}",
        Indented(dirs),
        Indented(files)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_lists_matches_grouped_by_kind() {
        let err = Error::Ambiguous {
            query: "report".into(),
            dirs: vec![PathBuf::from("/a/report")],
            files: vec![PathBuf::from("/b/report"), PathBuf::from("/c/x/report")],
        };

        let msg = err.to_string();
        let dirs_at = msg.find("Directories:").unwrap();
        let files_at = msg.find("Files:").unwrap();

        assert!(dirs_at < files_at);
        assert!(msg[dirs_at..files_at].contains("  /a/report"));
        assert!(msg[files_at..].contains("  /b/report"));
        assert!(msg[files_at..].contains("  /c/x/report"));
    }

    #[test]
    fn nesting_message_names_both_paths() {
        let err = Error::DestructiveNesting {
            target: PathBuf::from("/t"),
            template: PathBuf::from("/t/tmpl"),
            nesting: Nesting::TemplateInsideTarget,
        };

        assert_eq!(
            err.to_string(),
            "Template /t/tmpl is inside target directory /t. Refusing to copy"
        );
    }
}
