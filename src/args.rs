use std::path::{Path, PathBuf};

pub use clap::Parser;

use crate::{config::Config, copy::CopyMode, paths};

#[derive(Parser, Debug)]
#[clap(version, about = "Copy homework and project templates into place")]
pub struct Args {
    /// Target directories or files [default: current directory]
    pub targets: Vec<String>,

    /// Template name or path, looked up in the search roots when it is not a path
    #[clap(long, short, conflicts_with = "fuzzy")]
    pub template: Option<String>,

    /// Pick a template interactively with fzf from the search roots
    #[clap(long, short)]
    pub fuzzy: bool,

    /// Copy the whole template file/directory without renaming. Targets must be directories
    #[clap(long = "as-is", short = 'a', visible_alias = "all")]
    pub as_is: bool,
}

/// Where the template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Query(String),
    Fuzzy,
}

/// Normalized command line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub source: Source,
    pub mode: CopyMode,
    pub targets: Vec<PathBuf>,
}

impl Args {
    /// Fills in defaults: the configured default template and the current directory
    /// as the only target. Targets are made absolute against `cwd`.
    #[must_use]
    pub fn normalize(&self, cwd: &Path, config: &Config) -> Invocation {
        let source = match (&self.template, self.fuzzy) {
            (_, true) => Source::Fuzzy,
            (Some(query), false) => Source::Query(query.clone()),
            (None, false) => Source::Query(config.default_template().display().to_string()),
        };

        let targets = if self.targets.is_empty() {
            vec![cwd.to_owned()]
        } else {
            self.targets
                .iter()
                .map(|t| paths::absolute(t, cwd))
                .collect()
        };

        Invocation {
            source,
            mode: if self.as_is {
                CopyMode::AsIs
            } else {
                CopyMode::Rename
            },
            targets,
        }
    }
}
