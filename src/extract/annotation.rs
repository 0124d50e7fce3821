//! `//enum:` directive comments.
//!
//! ```text
//! //enum:name=TaskStatus values=in_progress,not_started,completed
//! ```
//!
//! Keys may appear in any order and are separated by single spaces only; a
//! tab is part of the surrounding token. Each value keeps its spelling as the
//! string value and is PascalCased for the constant name.

use thiserror::Error;

use crate::case::to_pascal_case;
use crate::model::{EnumDef, EnumValue};
use crate::scanner::SourceFile;

use super::ExtractError;

/// Prefix that marks a comment as a directive.
pub const DIRECTIVE_PREFIX: &str = "//enum:";

/// Why a directive was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("enum name not specified")]
    MissingName,

    #[error("enum values not specified")]
    MissingValues,

    #[error("empty value at position {position}")]
    EmptyValue { position: usize },

    #[error("duplicate constant {constant}")]
    DuplicateConstant { constant: String },
}

/// Parse one directive comment, including its prefix.
///
/// # Examples
///
/// ```
/// use enumgen::extract::parse_directive;
///
/// let def = parse_directive("//enum:name=Status values=pending,in_progress").unwrap();
/// assert_eq!(def.name, "Status");
/// assert_eq!(def.values[1].constant_name, "InProgress");
/// assert_eq!(def.values[1].string_value, "in_progress");
/// ```
pub fn parse_directive(comment: &str) -> Result<EnumDef, DirectiveError> {
    let content = comment.strip_prefix(DIRECTIVE_PREFIX).unwrap_or(comment);

    let mut name = "";
    let mut values = "";
    for part in content.split(' ') {
        if let Some(after) = part.strip_prefix("name=") {
            name = after;
        } else if let Some(after) = part.strip_prefix("values=") {
            values = after;
        }
    }

    if name.is_empty() {
        return Err(DirectiveError::MissingName);
    }
    if values.is_empty() {
        return Err(DirectiveError::MissingValues);
    }

    let mut def = EnumDef::new(name, Vec::new());
    for (i, token) in values.split(',').enumerate() {
        let constant = to_pascal_case(token);
        if constant.is_empty() {
            return Err(DirectiveError::EmptyValue { position: i + 1 });
        }
        if def.has_constant(&constant) {
            return Err(DirectiveError::DuplicateConstant { constant });
        }
        def.values.push(EnumValue::new(constant, token));
    }

    Ok(def)
}

/// Collect every directive in every file. The first malformed one aborts.
pub(super) fn extract(files: &[SourceFile]) -> Result<Vec<EnumDef>, ExtractError> {
    let mut enums = Vec::new();

    for file in files {
        for comment in file.comments() {
            if !comment.text.starts_with(DIRECTIVE_PREFIX) {
                continue;
            }

            let def = parse_directive(&comment.text).map_err(|reason| {
                ExtractError::MalformedDirective {
                    path: file.path.clone(),
                    line: comment.line,
                    reason,
                }
            })?;

            tracing::debug!(
                file = %file.path.display(),
                line = comment.line,
                name = %def.name,
                values = def.values.len(),
                "found enum directive"
            );
            enums.push(def);
        }
    }

    Ok(enums)
}
