//! Enum extraction strategies.
//!
//! Each strategy walks the lowered source files of one package and yields
//! canonical [`EnumDef`]s:
//!
//! - [`Strategy::Annotation`] reads `//enum:name=... values=...` directives.
//! - [`Strategy::Tag`] reads `values:"..."` tags on `enum` marker fields.
//! - [`Strategy::ConstBlock`] infers enums from prefixed constant declarations.
//!
//! Only the annotation strategy can fail; the others treat anything they do
//! not recognize as "nothing to generate".

pub mod annotation;
pub mod const_block;
pub mod tag;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::EnumDef;
use crate::scanner::SourceFile;

pub use annotation::{parse_directive, DirectiveError, DIRECTIVE_PREFIX};
pub use const_block::parse_type_list;
pub use tag::{parse_enum_tag, TAG_MARKER};

/// Errors during extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed directive in {path}:{line}: {reason}")]
    MalformedDirective {
        path: PathBuf,
        line: usize,
        reason: DirectiveError,
    },
}

/// The active extraction strategy, chosen once per run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// `//enum:` directive comments.
    #[default]
    Annotation,
    /// Struct carriers with an `enum` marker field tag.
    Tag,
    /// Constants prefixed by one of the target type names.
    ConstBlock { targets: Vec<String> },
}

impl Strategy {
    /// Const-block strategy over the given type names.
    pub fn const_block<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Strategy::ConstBlock {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    /// Short name used on the command line and in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Annotation => "annotation",
            Strategy::Tag => "tag",
            Strategy::ConstBlock { .. } => "const",
        }
    }

    /// Run the strategy over every file, in order.
    pub fn extract(&self, files: &[SourceFile]) -> Result<Vec<EnumDef>, ExtractError> {
        let enums = match self {
            Strategy::Annotation => annotation::extract(files)?,
            Strategy::Tag => tag::extract(files),
            Strategy::ConstBlock { targets } => const_block::extract(files, targets),
        };

        tracing::debug!(strategy = self.name(), count = enums.len(), "extracted enums");
        Ok(enums)
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    /// `const` parses to a const-block strategy with no targets yet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annotation" => Ok(Strategy::Annotation),
            "tag" => Ok(Strategy::Tag),
            "const" | "const_block" => Ok(Strategy::ConstBlock {
                targets: Vec::new(),
            }),
            _ => Err(format!("unknown strategy: {}", s)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_source;
    use std::path::Path;

    fn file(code: &str) -> SourceFile {
        scan_source(Path::new("enums.go"), code).unwrap()
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::Annotation.to_string(), "annotation");
        assert_eq!(Strategy::Tag.to_string(), "tag");
        assert_eq!(Strategy::const_block(["Status"]).to_string(), "const");
        assert_eq!(Strategy::default(), Strategy::Annotation);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("annotation".parse::<Strategy>(), Ok(Strategy::Annotation));
        assert_eq!("TAG".parse::<Strategy>(), Ok(Strategy::Tag));
        assert_eq!(
            "const".parse::<Strategy>(),
            Ok(Strategy::ConstBlock { targets: vec![] })
        );
        assert!("regex".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategies_only_see_their_own_form() {
        let files = vec![file(
            r#"package p

//enum:name=Status values=pending,active
type Role struct {
	enum `values:"admin,user"`
}

type Level string

const (
	LevelLow  Level = "low"
	LevelHigh Level = "high"
)
"#,
        )];

        let annotated = Strategy::Annotation.extract(&files).unwrap();
        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].name, "Status");

        let tagged = Strategy::Tag.extract(&files).unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].name, "Role");

        let inferred = Strategy::const_block(["Level"]).extract(&files).unwrap();
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].name, "Level");
    }

    #[test]
    fn test_malformed_directive_error_message() {
        let files = vec![file("package p\n\n//enum:name=Status\n")];
        let err = Strategy::Annotation.extract(&files).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("enums.go:3"), "{message}");
        assert!(message.contains("enum values not specified"), "{message}");
    }
}
