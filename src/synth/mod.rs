//! Code synthesis for Go enum units.
//!
//! Renders an [`EnumDef`] through a fixed Handlebars template keyed by
//! `package`, `type_name`, `plural` and `values`, then re-parses the result
//! with tree-sitter-go so invalid text is never emitted.

use std::fmt::Write;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::model::EnumDef;
use crate::scanner::{first_syntax_error, parse_go, ScanError};

const TEMPLATE_NAME: &str = "enum";
const TEMPLATE: &str = include_str!("enum.go.hbs");

const GO_KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Errors during synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("enum {enum_name} has no values")]
    EmptyEnum { enum_name: String },

    #[error("invalid enum template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("failed to render enum {enum_name}: {source}")]
    Render {
        enum_name: String,
        #[source]
        source: handlebars::RenderError,
    },

    #[error("invalid package name {package:?}")]
    InvalidPackage { package: String },

    #[error("generated code for {enum_name} is not valid Go (line {line}, column {column})")]
    InvalidOutput {
        enum_name: String,
        line: usize,
        column: usize,
    },

    #[error("failed to validate generated code: {0}")]
    Parser(#[from] ScanError),
}

/// One generated file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub enum_name: String,
    pub file_name: String,
    pub contents: String,
}

#[derive(Serialize)]
struct ValueContext<'a> {
    constant_name: &'a str,
    string_value: &'a str,
    /// `<TypeName><ConstantName>`.
    ident: String,
    /// Spaces aligning the type column of the const block.
    pad: String,
    literal: String,
}

#[derive(Serialize)]
struct TemplateContext<'a> {
    package: &'a str,
    type_name: &'a str,
    plural: String,
    values: Vec<ValueContext<'a>>,
}

impl<'a> TemplateContext<'a> {
    fn new(def: &'a EnumDef, package: &'a str) -> Self {
        let idents: Vec<String> = def
            .values
            .iter()
            .map(|v| format!("{}{}", def.name, v.constant_name))
            .collect();
        let width = idents.iter().map(|i| i.chars().count()).max().unwrap_or(0);

        let values = def
            .values
            .iter()
            .zip(idents)
            .map(|(v, ident)| ValueContext {
                constant_name: &v.constant_name,
                string_value: &v.string_value,
                pad: " ".repeat(width - ident.chars().count()),
                ident,
                literal: go_string_literal(&v.string_value),
            })
            .collect();

        Self {
            package,
            type_name: &def.name,
            plural: def.plural_name(),
            values,
        }
    }
}

/// Renders enum definitions into Go source.
pub struct Synthesizer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synthesizer").finish_non_exhaustive()
    }
}

impl Synthesizer {
    /// Build a synthesizer with the built-in template.
    pub fn new() -> Result<Self, SynthesisError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, TEMPLATE)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    /// Render one enum for `package`.
    ///
    /// Output is deterministic: the same definition and package always
    /// produce byte-identical text.
    pub fn render(&self, def: &EnumDef, package: &str) -> Result<RenderedUnit, SynthesisError> {
        if def.values.is_empty() {
            return Err(SynthesisError::EmptyEnum {
                enum_name: def.name.clone(),
            });
        }
        if !is_package_name(package) {
            return Err(SynthesisError::InvalidPackage {
                package: package.to_string(),
            });
        }

        let context = TemplateContext::new(def, package);
        let contents = self
            .registry
            .render(TEMPLATE_NAME, &context)
            .map_err(|source| SynthesisError::Render {
                enum_name: def.name.clone(),
                source,
            })?;

        validate_go(&def.name, &contents)?;

        tracing::debug!(name = %def.name, package, bytes = contents.len(), "rendered enum");
        Ok(RenderedUnit {
            enum_name: def.name.clone(),
            file_name: def.file_name(),
            contents,
        })
    }

    /// Render every definition, stopping at the first failure.
    pub fn render_all(
        &self,
        defs: &[EnumDef],
        package: &str,
    ) -> Result<Vec<RenderedUnit>, SynthesisError> {
        defs.iter().map(|def| self.render(def, package)).collect()
    }
}

/// Render a single enum with a one-off synthesizer.
pub fn render_enum(def: &EnumDef, package: &str) -> Result<RenderedUnit, SynthesisError> {
    Synthesizer::new()?.render(def, package)
}

fn validate_go(enum_name: &str, contents: &str) -> Result<(), SynthesisError> {
    let invalid = |line, column| SynthesisError::InvalidOutput {
        enum_name: enum_name.to_string(),
        line,
        column,
    };

    let tree = parse_go(contents)?.ok_or_else(|| invalid(1, 1))?;
    match first_syntax_error(&tree) {
        Some((line, column)) => Err(invalid(line, column)),
        None => Ok(()),
    }
}

/// Whether `name` can follow `package`: a Go identifier that is neither a
/// keyword nor the blank identifier.
fn is_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_ok
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && name != "_"
        && !GO_KEYWORDS.contains(&name)
}

/// Quote `s` as a Go interpreted string literal.
fn go_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnumValue;

    fn status() -> EnumDef {
        EnumDef::new(
            "Status",
            vec![
                EnumValue::new("Pending", "pending"),
                EnumValue::new("Active", "active"),
                EnumValue::new("InProgress", "in_progress"),
            ],
        )
    }

    #[test]
    fn test_render_contents() {
        let unit = render_enum(&status(), "test").unwrap();
        let code = &unit.contents;

        let checks = [
            "// Code generated by enumgen; DO NOT EDIT.",
            "package test",
            "type StatusEnum string",
            "\tStatusPending    StatusEnum = \"pending\"",
            "\tStatusActive     StatusEnum = \"active\"",
            "\tStatusInProgress StatusEnum = \"in_progress\"",
            "var AllStatuses = []StatusEnum{",
            "\tStatusActive,",
            "case StatusPending, StatusActive, StatusInProgress:",
            "func (e StatusEnum) IsValid() bool",
            "func (e StatusEnum) Validate() error",
            "return fmt.Errorf(\"invalid Status: %s\", string(e))",
            "func ParseStatus(s string) (StatusEnum, error)",
            "func (e StatusEnum) MarshalJSON() ([]byte, error)",
            "return []byte(\"null\"), nil",
            "func (e *StatusEnum) UnmarshalJSON(data []byte) error",
            "parsed, err := ParseStatus(s)",
        ];
        for check in checks {
            assert!(code.contains(check), "missing {check:?} in:\n{code}");
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let code = render_enum(&status(), "test").unwrap().contents;
        let order = [
            "type StatusEnum string",
            "const (",
            "var AllStatuses",
            "IsValid() bool",
            "func ParseStatus",
            "MarshalJSON",
            "UnmarshalJSON",
        ];
        let positions: Vec<usize> = order.iter().map(|s| code.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_values_keep_declaration_order() {
        let code = render_enum(&status(), "test").unwrap().contents;
        let pending = code.find("StatusPending ").unwrap();
        let active = code.find("StatusActive ").unwrap();
        let progress = code.find("StatusInProgress ").unwrap();
        assert!(pending < active && active < progress);
    }

    #[test]
    fn test_render_is_deterministic() {
        let synth = Synthesizer::new().unwrap();
        let first = synth.render(&status(), "enums").unwrap();
        let second = synth.render(&status(), "enums").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_file_name() {
        let unit = render_enum(&status(), "enums").unwrap();
        assert_eq!(unit.file_name, "status_enum_generated.go");
        assert_eq!(unit.enum_name, "Status");
    }

    #[test]
    fn test_plural_override() {
        let def = status().with_plural("States");
        let code = render_enum(&def, "enums").unwrap().contents;
        assert!(code.contains("var AllStates = []StatusEnum{"));
    }

    #[test]
    fn test_title_cased_values_render() {
        let def = EnumDef::new(
            "Priority",
            vec![EnumValue::new("Low", "Low"), EnumValue::new("High", "High")],
        );
        let code = render_enum(&def, "enums").unwrap().contents;
        assert!(code.contains("PriorityLow  PriorityEnum = \"Low\""));
    }

    #[test]
    fn test_html_is_not_escaped() {
        let def = EnumDef::new("Op", vec![EnumValue::new("Lt", "<&>")]);
        let code = render_enum(&def, "ops").unwrap().contents;
        assert!(code.contains("OpLt OpEnum = \"<&>\""));
    }

    #[test]
    fn test_string_values_are_quoted() {
        assert_eq!(go_string_literal("plain"), "\"plain\"");
        assert_eq!(go_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(go_string_literal("a\\b\n"), "\"a\\\\b\\n\"");
        assert_eq!(go_string_literal("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_empty_enum_rejected() {
        let def = EnumDef::new("Nothing", Vec::new());
        let err = render_enum(&def, "p").unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyEnum { .. }));
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        let def = EnumDef::new("my-enum", vec![EnumValue::new("A", "a")]);
        let err = render_enum(&def, "p").unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidOutput { .. }), "{err:?}");
    }

    #[test]
    fn test_invalid_package_rejected() {
        let err = render_enum(&status(), "not a package").unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidPackage { .. }), "{err:?}");
    }

    #[test]
    fn test_keyword_package_rejected() {
        for keyword in ["type", "func", "package", "_"] {
            let err = render_enum(&status(), keyword).unwrap_err();
            assert!(
                matches!(&err, SynthesisError::InvalidPackage { package } if package == keyword),
                "{keyword}: {err:?}"
            );
        }
    }

    #[test]
    fn test_package_names() {
        assert!(is_package_name("enums"));
        assert!(is_package_name("_internal"));
        assert!(is_package_name("v2"));
        assert!(is_package_name("typed"));
        assert!(!is_package_name(""));
        assert!(!is_package_name("2fast"));
        assert!(!is_package_name("my-pkg"));
        assert!(!is_package_name("var"));
    }
}
