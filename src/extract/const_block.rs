//! Enum inference from prefixed constants.
//!
//! ```go
//! type Status string
//!
//! const (
//!     StatusPending Status = "pending"
//!     StatusInProgress Status = "in_progress"
//! )
//! ```
//!
//! yields `Status` with values `Pending`/`pending` and
//! `InProgress`/`in_progress`. String values are always re-derived from the
//! constant name; the declared values are never read.

use std::collections::HashSet;

use crate::case::to_snake_case;
use crate::model::{EnumDef, EnumValue};
use crate::scanner::{ConstBlock, SourceFile};

/// Split a comma-separated list of type names, trimming each entry.
///
/// ```
/// use enumgen::extract::parse_type_list;
///
/// assert_eq!(parse_type_list(" Status, Level ,,"), vec!["Status", "Level"]);
/// ```
pub fn parse_type_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One named constant with the type it effectively has.
struct Member<'a> {
    name: &'a str,
    ty: Option<&'a str>,
}

/// Resolve the effective type of each constant in a block.
///
/// A bare spec (no type, no value) repeats the previous spec, so it inherits
/// that spec's type. A spec with a value but no type is untyped.
fn members(block: &ConstBlock) -> Vec<Member<'_>> {
    let mut out = Vec::new();
    let mut current: Option<&str> = None;

    for spec in &block.specs {
        if !spec.is_implicit_repeat() {
            current = spec.ty.as_deref();
        }
        for name in &spec.names {
            out.push(Member {
                name: name.as_str(),
                ty: current,
            });
        }
    }
    out
}

/// Suffix of `name` after `target`, if it names a member of that enum.
fn member_suffix<'a>(name: &'a str, target: &str) -> Option<&'a str> {
    let suffix = name.strip_prefix(target)?;
    let first = suffix.chars().next()?;
    (first.is_uppercase() || first.is_ascii_digit()).then_some(suffix)
}

/// Constant-name suffixes of `block` that belong to `target`.
///
/// Members typed as `target` win over untyped ones when the block has both;
/// members typed as anything else never qualify.
fn qualifying_suffixes<'a>(block: &'a ConstBlock, target: &str) -> Vec<&'a str> {
    let candidates: Vec<(Member<'a>, &'a str)> = members(block)
        .into_iter()
        .filter(|m| m.name != "_")
        .filter_map(|m| member_suffix(m.name, target).map(|s| (m, s)))
        .collect();

    let any_typed = candidates.iter().any(|(m, _)| m.ty == Some(target));

    candidates
        .into_iter()
        .filter(|(m, _)| {
            if any_typed {
                m.ty == Some(target)
            } else {
                m.ty.is_none()
            }
        })
        .map(|(_, suffix)| suffix)
        .collect()
}

/// One enum per declared target type with at least one qualifying constant,
/// in target order.
pub(super) fn extract(files: &[SourceFile], targets: &[String]) -> Vec<EnumDef> {
    let declared: HashSet<&str> = files
        .iter()
        .flat_map(|f| f.type_decls())
        .map(|t| t.name.as_str())
        .collect();

    let mut seen = HashSet::new();
    let mut enums = Vec::new();

    for target in targets {
        if !seen.insert(target.as_str()) {
            continue;
        }
        if !declared.contains(target.as_str()) {
            tracing::debug!(target = %target, "no type declaration for target; skipping");
            continue;
        }

        let mut def = EnumDef::new(target.clone(), Vec::new());
        for file in files {
            for block in file.const_blocks() {
                for suffix in qualifying_suffixes(block, target) {
                    if def.has_constant(suffix) {
                        tracing::warn!(
                            target = %target,
                            constant = %suffix,
                            file = %file.path.display(),
                            "skipping duplicate constant"
                        );
                        continue;
                    }
                    def.values.push(EnumValue::new(suffix, to_snake_case(suffix)));
                }
            }
        }

        if def.values.is_empty() {
            tracing::debug!(target = %target, "no qualifying constants for target");
            continue;
        }

        tracing::debug!(name = %def.name, values = def.values.len(), "inferred enum from constants");
        enums.push(def);
    }

    enums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_source;
    use std::path::Path;

    fn extract_str(code: &str, targets: &[&str]) -> Vec<EnumDef> {
        let file = scan_source(Path::new("status.go"), code).unwrap();
        let targets: Vec<String> = targets.iter().map(|s| s.to_string()).collect();
        extract(&[file], &targets)
    }

    #[test]
    fn test_typed_constants() {
        let enums = extract_str(
            r#"package p

type Status string

const (
	StatusPending Status = "pending"
	StatusActive  Status = "active"
)
"#,
            &["Status"],
        );
        assert_eq!(
            enums,
            vec![EnumDef::new(
                "Status",
                vec![
                    EnumValue::new("Pending", "pending"),
                    EnumValue::new("Active", "active"),
                ]
            )]
        );
    }

    #[test]
    fn test_untyped_block_matches_by_prefix() {
        let enums = extract_str(
            r#"package p

type Status string

const (
	StatusPending = "pending"
	StatusActive  = "active"
)
"#,
            &["Status"],
        );
        assert_eq!(
            enums[0].values,
            vec![
                EnumValue::new("Pending", "pending"),
                EnumValue::new("Active", "active"),
            ]
        );
    }

    #[test]
    fn test_iota_sequence_inherits_type() {
        let enums = extract_str(
            r#"package p

type Level int

const (
	LevelLow Level = iota
	LevelMedium
	LevelHigh
)
"#,
            &["Level"],
        );
        let names: Vec<_> = enums[0].values.iter().map(|v| v.constant_name.as_str()).collect();
        assert_eq!(names, vec!["Low", "Medium", "High"]);
    }

    #[test]
    fn test_typed_preferred_over_untyped() {
        let enums = extract_str(
            r#"package p

type Status string

const (
	StatusDefault = "x"
	StatusOpen   Status = "open"
	StatusClosed Status = "closed"
)
"#,
            &["Status"],
        );
        let names: Vec<_> = enums[0].values.iter().map(|v| v.constant_name.as_str()).collect();
        assert_eq!(names, vec!["Open", "Closed"]);
    }

    #[test]
    fn test_other_types_and_bare_name_skipped() {
        let enums = extract_str(
            r#"package p

type Status string

const (
	Status                   = "base"
	StatusCode     int       = 200
	Statusbar                = "bar"
	StatusInReview           = "in_review"
)
"#,
            &["Status"],
        );
        assert_eq!(
            enums[0].values,
            vec![EnumValue::new("InReview", "in_review")]
        );
    }

    #[test]
    fn test_acronym_string_value() {
        let enums = extract_str(
            r#"package p

type Proto string

const ProtoHTTP Proto = "http"
"#,
            &["Proto"],
        );
        assert_eq!(enums[0].values, vec![EnumValue::new("HTTP", "h_t_t_p")]);
    }

    #[test]
    fn test_unknown_targets_ignored() {
        let enums = extract_str(
            r#"package p

type Status string

const StatusOn Status = "on"
"#,
            &["Missing", "Status"],
        );
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].name, "Status");
    }

    #[test]
    fn test_target_without_constants_contributes_nothing() {
        let enums = extract_str("package p\n\ntype Status string\n", &["Status"]);
        assert!(enums.is_empty());
    }

    #[test]
    fn test_undeclared_type_is_ignored() {
        let enums = extract_str(
            "package p\n\nconst StatusOn = \"on\"\n",
            &["Status"],
        );
        assert!(enums.is_empty());
    }

    #[test]
    fn test_multiple_blocks_and_files_merge_in_order() {
        let types = scan_source(Path::new("a.go"), "package p\n\ntype Color string\n").unwrap();
        let consts = scan_source(
            Path::new("b.go"),
            r#"package p

const ColorRed Color = "red"

const (
	ColorGreen Color = "green"
	ColorRed2  Color = "red2"
	ColorRed   Color = "again"
)
"#,
        )
        .unwrap();

        let enums = extract(&[types, consts], &["Color".to_string()]);
        let names: Vec<_> = enums[0].values.iter().map(|v| v.constant_name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Green", "Red2"]);
        assert_eq!(enums[0].values[2].string_value, "red2");
    }

    #[test]
    fn test_parse_type_list() {
        assert_eq!(parse_type_list("Status"), vec!["Status"]);
        assert_eq!(parse_type_list(" A ,B"), vec!["A", "B"]);
        assert!(parse_type_list("").is_empty());
    }
}
