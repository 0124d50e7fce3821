//! Error types for enumgen.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::extract::ExtractError;
use crate::output::WriteError;
use crate::scanner::ScanError;
use crate::synth::SynthesisError;

/// Top-level error type for enumgen operations.
#[derive(Debug, thiserror::Error)]
pub enum EnumgenError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("{0}")]
    Usage(String),

    #[error("failed to parse package: {0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("{0}")]
    Write(#[from] WriteError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Map an error to its exit code.
pub fn exit_code(error: &EnumgenError) -> i32 {
    match error {
        EnumgenError::PathNotFound(_) => 3,
        EnumgenError::Usage(_) => 2,
        EnumgenError::Scan(_) => 4,
        EnumgenError::Extract(_) => 6,
        EnumgenError::Synthesis(_) => 7,
        EnumgenError::Write(_) => 1,
        EnumgenError::Config(_) => 8,
    }
}
