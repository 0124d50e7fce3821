//! Writing generated units and post-processing them.
//!
//! Each unit is written with truncate-and-replace semantics, then optionally
//! handed to an external formatter (`goimports` by default). A missing
//! formatter binary is skipped; a failing one aborts the run.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::synth::RenderedUnit;

/// Errors while writing or formatting output.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed on {path} ({status})")]
    Formatter {
        program: String,
        path: PathBuf,
        status: ExitStatus,
    },
}

/// External formatting/import-organizing tool run on each written file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Program name, resolved on `PATH`.
    pub program: String,
    /// Value for `-local`, grouping imports with this prefix last.
    pub local: Option<String>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::goimports()
    }
}

impl Formatter {
    pub fn goimports() -> Self {
        Self {
            program: "goimports".to_string(),
            local: None,
        }
    }

    /// Use a different program with goimports-compatible flags.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the `-local` import prefix.
    pub fn local(mut self, prefix: impl Into<String>) -> Self {
        self.local = Some(prefix.into());
        self
    }

    /// Format `path` in place.
    ///
    /// Returns `Ok(false)` without doing anything when the program is not
    /// installed.
    pub fn run(&self, path: &Path) -> Result<bool, WriteError> {
        let Ok(binary) = which::which(&self.program) else {
            tracing::debug!(program = %self.program, "formatter not found; skipping");
            return Ok(false);
        };

        let mut cmd = Command::new(&binary);
        if let Some(local) = &self.local {
            cmd.arg("-local").arg(local);
        }
        cmd.arg("-w").arg(path);

        let output = cmd.output().map_err(|source| WriteError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            tracing::error!(
                program = %self.program,
                path = %path.display(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "formatter failed"
            );
            return Err(WriteError::Formatter {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status: output.status,
            });
        }

        tracing::debug!(program = %self.program, path = %path.display(), "formatted");
        Ok(true)
    }
}

/// Write one unit into `dir`, replacing any previous content.
pub fn write_unit(dir: &Path, unit: &RenderedUnit) -> Result<PathBuf, WriteError> {
    let path = dir.join(&unit.file_name);
    std::fs::write(&path, &unit.contents).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(enum_name = %unit.enum_name, path = %path.display(), "wrote enum");
    Ok(path)
}

/// Write a unit and run the formatter on it, if one is configured.
pub fn emit_unit(
    dir: &Path,
    unit: &RenderedUnit,
    formatter: Option<&Formatter>,
) -> Result<PathBuf, WriteError> {
    let path = write_unit(dir, unit)?;
    if let Some(formatter) = formatter {
        formatter.run(&path)?;
    }
    Ok(path)
}
