//! Enumgen - Generate string-backed Go enums from declarative definitions.
//!
//! Enumgen scans a Go package directory, recognizes enum definitions written
//! in one of three forms, and renders a self-contained enum unit for each:
//! a named string type, its constants, validation, parsing, and JSON
//! (un)marshaling.
//!
//! # Quick Start
//!
//! ```no_run
//! use enumgen::builder::EnumGen;
//! use enumgen::extract::Strategy;
//!
//! // Generate enums from `//enum:` directives
//! let report = EnumGen::new("./enums")
//!     .strategy(Strategy::Annotation)
//!     .generate()
//!     .unwrap();
//!
//! for path in &report.written {
//!     println!("wrote {}", path.display());
//! }
//! ```
//!
//! # Modules
//!
//! - [`case`] - snake_case / PascalCase conversion
//! - [`walker`] - Package directory listing with gitignore support
//! - [`scanner`] - Tree-sitter based source scanning
//! - [`extract`] - Annotation, tag and const-block strategies
//! - [`synth`] - Template-driven code synthesis
//! - [`config`] - JSON enum definitions
//! - [`output`] - Writing and formatting generated units
//! - [`builder`] - Fluent API tying the pipeline together
//!
//! # Input forms
//!
//! - `//enum:name=Status values=pending,in_progress`
//! - ``type Role struct { enum `values:"admin,user"` }``
//! - `const ( StatusPending Status = "pending" ... )` with `--types Status`

pub mod case;
pub mod model;
pub mod errors;
pub mod walker;
pub mod scanner;
pub mod extract;
pub mod synth;
pub mod config;
pub mod output;
pub mod builder;
pub mod logging;

// Re-export key types at crate root for convenience
pub use builder::{EnumGen, Extraction, GenerationReport};
pub use config::{ConfigError, EnumConfig};
pub use errors::EnumgenError;
pub use extract::{ExtractError, Strategy};
pub use model::{EnumDef, EnumValue};
pub use output::{Formatter, WriteError};
pub use scanner::{ScanError, ScanResult, SourceFile, SyntaxNode};
pub use synth::{RenderedUnit, SynthesisError, Synthesizer};
pub use walker::WalkError;
