use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{error::Error, paths, trace, warn};

/// Interactive selection of one entry out of a candidate list.
pub trait Picker {
    /// Returns the chosen line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// [`Error::PickerUnavailable`] if the picker cannot be started,
    /// [`Error::PickerCancelled`] if the user aborted.
    fn pick(&self, candidates: &[String]) -> Result<String, Error>;
}

/// Runs an external `fzf` compatible program: candidates on stdin, choice on stdout.
#[derive(Debug, Clone)]
pub struct Fzf {
    program: String,
    args: Vec<String>,
}

impl Default for Fzf {
    fn default() -> Self {
        Self {
            program: "fzf".to_string(),
            args: vec!["--prompt".to_string(), "template> ".to_string()],
        }
    }
}

impl Fzf {
    #[must_use]
    pub fn with_command(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Picker for Fzf {
    fn pick(&self, candidates: &[String]) -> Result<String, Error> {
        let mut child = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::PickerUnavailable {
                    program: self.program.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(mut stdin) = child.stdin.take() {
            // The picker may exit before reading everything
            match stdin.write_all(candidates.join("\n").as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            trace!("Picker exited with {}", output.status);
            return Err(Error::PickerCancelled);
        }

        let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if choice.is_empty() {
            return Err(Error::PickerCancelled);
        }

        Ok(choice)
    }
}

/// Immediate entries of every existing root, sorted by name within a root.
#[must_use]
pub fn candidates(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();

    for root in roots {
        let entries = match root.read_dir() {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Template directory {} does not exist", root.display());
                continue;
            }
            Err(e) => {
                warn!("Template directory {} cannot be read: {e}", root.display());
                continue;
            }
        };

        let mut paths: Vec<PathBuf> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
        paths.sort();
        out.extend(paths);
    }

    out
}

/// Lets the user choose a template from the search roots.
///
/// # Errors
///
/// [`Error::NoCandidates`] when the roots are empty, otherwise whatever the
/// picker reports.
pub fn pick_template(picker: &impl Picker, roots: &[PathBuf], cwd: &Path) -> Result<PathBuf, Error> {
    let options = candidates(roots);

    if options.is_empty() {
        return Err(Error::NoCandidates);
    }

    let lines: Vec<String> = options.iter().map(|p| p.display().to_string()).collect();
    let choice = picker.pick(&lines)?;

    Ok(paths::absolute(&choice, cwd))
}
