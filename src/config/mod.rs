use anyhow::Context;
use derive_builder::Builder;
use directories::UserDirs;
use std::path::{Component, Path, PathBuf};

/// Read-only settings derived once at process start.
#[derive(Builder, Debug, Clone)]
#[builder(setter(into))]
pub struct Config {
    home: PathBuf,
    search_roots: Vec<PathBuf>,
    default_template: PathBuf,
}

impl Config {
    /// Create a new [`Config`] builder
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Attempt to create a new [`Config`] with sane defaults for path locations
    ///
    /// Search roots come from `CPTEMP_PATH` (a platform path list) when set,
    /// `~/temps` otherwise. The default template is `CPTEMP_DEFAULT` or
    /// `~/temps/typsttemp/template.typ`.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the users home can not be found.
    pub fn default_paths() -> anyhow::Result<Self> {
        let home = Self::get_user_home()?;

        let search_roots = match std::env::var_os("CPTEMP_PATH") {
            Some(list) if !list.is_empty() => std::env::split_paths(&list)
                .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
                .collect(),
            _ => vec![home.join("temps")],
        };

        let default_template = std::env::var("CPTEMP_DEFAULT")
            .map(|p| PathBuf::from(shellexpand::tilde(&p).into_owned()))
            .unwrap_or_else(|_| home.join("temps").join("typsttemp").join("template.typ"));

        Ok(Self {
            home,
            search_roots,
            default_template,
        })
    }

    /// Returns the path for the user home `~/`
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if a path for the users home can not
    /// be found
    pub fn get_user_home() -> anyhow::Result<PathBuf> {
        Ok(UserDirs::new()
            .context("Failed to get user's home directory")?
            .home_dir()
            .to_owned())
    }

    /// Returns the current working directory as a [`PathBuf`]
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the current working directory value is invalid.
    /// Possible cases:
    ///
    /// * Current directory does not exist.
    /// * There are insufficient permissions to access the current directory.
    pub fn get_current_dir() -> anyhow::Result<PathBuf> {
        std::env::current_dir().context("Failed to get current dir")
    }

    /// Shortens `path` for display to its last two components.
    /// A path equal to the home directory prints as `~`.
    #[must_use]
    pub fn pretty(&self, path: &Path) -> String {
        let path = crate::paths::canonical(path);
        let home = crate::paths::canonical(&self.home);

        let parts: Vec<_> = match path.strip_prefix(&home) {
            Ok(rel) => {
                let parts: Vec<_> = rel.components().collect();
                if parts.is_empty() {
                    return "~".to_string();
                }
                parts
            }
            Err(_) => path
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect(),
        };

        match parts.as_slice() {
            [.., parent, name] => format!(
                "{}/{}",
                parent.as_os_str().to_string_lossy(),
                name.as_os_str().to_string_lossy()
            ),
            [name] => name.as_os_str().to_string_lossy().into_owned(),
            [] => path.display().to_string(),
        }
    }

    /// Returns a reference to the user home of this [`Config`].
    #[must_use]
    pub fn home(&self) -> &Path {
        self.home.as_path()
    }

    /// Returns the ordered search roots of this [`Config`].
    #[must_use]
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// Returns the template used when none is given.
    #[must_use]
    pub fn default_template(&self) -> &Path {
        self.default_template.as_path()
    }
}
