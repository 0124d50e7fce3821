//! Struct-tag carriers.
//!
//! ```go
//! type Role struct {
//!     enum `values:"admin,user,guest"`
//! }
//! ```
//!
//! Every token is title-cased once and that result is used for both the
//! constant name and the string value, so `admin` is written as `"Admin"`.

use crate::case::title_case;
use crate::model::{EnumDef, EnumValue};
use crate::scanner::{SourceFile, TypeKind};

/// Declared type of the field that carries the tag.
pub const TAG_MARKER: &str = "enum";

const VALUES_PREFIX: &str = "values:\"";

/// Raw comma-separated tokens of a `values:"..."` payload.
///
/// Returns `None` when the payload is missing, unterminated or empty.
pub fn parse_enum_tag(tag: &str) -> Option<Vec<String>> {
    let start = tag.find(VALUES_PREFIX)? + VALUES_PREFIX.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    let payload = &rest[..end];
    if payload.trim().is_empty() {
        return None;
    }
    Some(payload.split(',').map(str::to_string).collect())
}

/// Collect one enum per struct that carries a tagged marker field.
pub(super) fn extract(files: &[SourceFile]) -> Vec<EnumDef> {
    let mut enums = Vec::new();

    for file in files {
        for decl in file.type_decls() {
            let TypeKind::Struct { fields } = &decl.kind else {
                continue;
            };

            let tokens = fields
                .iter()
                .filter(|f| f.ty == TAG_MARKER)
                .filter_map(|f| f.tag.as_deref())
                .find_map(parse_enum_tag);

            let Some(tokens) = tokens else {
                continue;
            };

            let mut def = EnumDef::new(decl.name.clone(), Vec::new());
            for token in tokens {
                let titled = title_case(token.trim());
                if titled.is_empty() {
                    continue;
                }
                if def.has_constant(&titled) {
                    tracing::warn!(
                        name = %decl.name,
                        value = %titled,
                        "skipping duplicate tag value"
                    );
                    continue;
                }
                def.values.push(EnumValue::new(titled.clone(), titled));
            }

            if def.values.is_empty() {
                continue;
            }

            tracing::debug!(
                file = %file.path.display(),
                line = decl.line,
                name = %def.name,
                values = def.values.len(),
                "found tagged enum"
            );
            enums.push(def);
        }
    }

    enums
}
