//! Fluent builder API for enumgen.
//!
//! Provides both function composition and builder-style APIs
//! for scanning a package and generating enum units.

use std::path::{Path, PathBuf};

use crate::config::EnumConfig;
use crate::errors::EnumgenError;
use crate::extract::Strategy;
use crate::model::EnumDef;
use crate::output::{emit_unit, Formatter};
use crate::scanner::{scan_dir, ScanResult};
use crate::synth::{RenderedUnit, Synthesizer};
use crate::walker::WalkOptions;

/// Builder for generating enums from a package directory.
///
/// # Examples
///
/// ```no_run
/// use enumgen::builder::EnumGen;
/// use enumgen::extract::Strategy;
///
/// let report = EnumGen::new("./enums")
///     .strategy(Strategy::Tag)
///     .generate()
///     .unwrap();
/// println!("wrote {} files", report.written.len());
/// ```
#[derive(Debug, Clone)]
pub struct EnumGen {
    dir: PathBuf,
    strategy: Strategy,
    walk_options: WalkOptions,
    output_dir: Option<PathBuf>,
    package: Option<String>,
    formatter: Option<Formatter>,
}

impl EnumGen {
    /// Create a new builder for the given package directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strategy: Strategy::default(),
            walk_options: WalkOptions::default(),
            output_dir: None,
            package: None,
            formatter: Some(Formatter::default()),
        }
    }

    /// Select the extraction strategy (default: annotation).
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Skip source files whose name matches `pattern`.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.walk_options.exclude.push(pattern.into());
        self
    }

    /// Include hidden files.
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.walk_options.include_hidden = include;
        self
    }

    /// Write units somewhere other than the scanned directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Override the package name of generated units.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Post-process written files with `formatter`, or not at all with `None`.
    pub fn formatter(mut self, formatter: Option<Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Scan the directory without extracting.
    pub fn scan(&self) -> Result<ScanResult, EnumgenError> {
        if !self.dir.exists() {
            return Err(EnumgenError::PathNotFound(self.dir.clone()));
        }
        Ok(scan_dir(&self.dir, &self.walk_options)?)
    }

    /// Scan and extract enum definitions.
    pub fn extract(self) -> Result<Extraction, EnumgenError> {
        let scan = self.scan()?;
        let enums = self.strategy.extract(&scan.files)?;

        Ok(Extraction {
            package: self.package.or(scan.package),
            package_conflicts: scan.package_conflicts,
            enums,
        })
    }

    /// Scan, extract and render, without writing anything.
    pub fn render(self) -> Result<Vec<RenderedUnit>, EnumgenError> {
        let extraction = self.extract()?;
        let Some(package) = extraction.package_for_output() else {
            return Ok(Vec::new());
        };

        let synth = Synthesizer::new()?;
        Ok(synth.render_all(&extraction.enums, package)?)
    }

    /// Scan, extract, render and write every enum.
    ///
    /// Enums are processed one at a time; a failure leaves units written for
    /// earlier enums in place.
    pub fn generate(self) -> Result<GenerationReport, EnumgenError> {
        let dir = self.dir.clone();
        let out_dir = self.output_dir.clone().unwrap_or_else(|| self.dir.clone());
        let formatter = self.formatter.clone();
        let extraction = self.extract()?;

        let Some(package) = extraction.package_for_output() else {
            tracing::info!(dir = %dir.display(), "no enums found");
            return Ok(GenerationReport::default());
        };

        emit_all(&extraction.enums, package, &out_dir, formatter.as_ref())
    }
}

/// Enums found in one package.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Package the enums belong to; `None` if nothing was scanned.
    pub package: Option<String>,
    /// Package names overwritten while scanning (see [`ScanResult`]).
    pub package_conflicts: Vec<String>,
    pub enums: Vec<EnumDef>,
}

impl Extraction {
    /// Package to render into, or `None` when there is nothing to render.
    ///
    /// Every enum comes from a scanned file and every scanned file has a
    /// package clause, so a non-empty extraction always carries a package.
    fn package_for_output(&self) -> Option<&str> {
        if self.enums.is_empty() {
            return None;
        }
        self.package.as_deref()
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub package: Option<String>,
    /// Written files, in enum order.
    pub written: Vec<PathBuf>,
}

fn emit_all(
    enums: &[EnumDef],
    package: &str,
    out_dir: &Path,
    formatter: Option<&Formatter>,
) -> Result<GenerationReport, EnumgenError> {
    let synth = Synthesizer::new()?;
    let mut report = GenerationReport {
        package: Some(package.to_string()),
        written: Vec::with_capacity(enums.len()),
    };

    for def in enums {
        let unit = synth.render(def, package)?;
        report.written.push(emit_unit(out_dir, &unit, formatter)?);
    }

    Ok(report)
}

// ============================================================================
// Functional API
// ============================================================================

/// Extract enum definitions from a directory.
///
/// # Examples
///
/// ```no_run
/// use enumgen::builder::extract_from_path;
/// use enumgen::extract::Strategy;
///
/// for def in extract_from_path("./enums", Strategy::Annotation).unwrap() {
///     println!("{}: {} values", def.name, def.values.len());
/// }
/// ```
pub fn extract_from_path(
    dir: impl AsRef<Path>,
    strategy: Strategy,
) -> Result<Vec<EnumDef>, EnumgenError> {
    Ok(EnumGen::new(dir.as_ref()).strategy(strategy).extract()?.enums)
}

/// Render and write every enum of a JSON config into `out_dir`.
pub fn generate_from_config(
    config: &EnumConfig,
    out_dir: impl AsRef<Path>,
    formatter: Option<&Formatter>,
) -> Result<GenerationReport, EnumgenError> {
    let out_dir = out_dir.as_ref();
    if !out_dir.is_dir() {
        return Err(EnumgenError::PathNotFound(out_dir.to_path_buf()));
    }
    let enums = config.enum_defs()?;
    emit_all(&enums, &config.package, out_dir, formatter)
}
