//! Canonical enum model shared by every extraction strategy and the synthesizer.

use serde::Serialize;

/// One member of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    /// PascalCase fragment appended to the enum name (e.g. `InProgress`).
    pub constant_name: String,
    /// Wire representation (e.g. `in_progress`).
    pub string_value: String,
}

impl EnumValue {
    pub fn new(constant_name: impl Into<String>, string_value: impl Into<String>) -> Self {
        Self {
            constant_name: constant_name.into(),
            string_value: string_value.into(),
        }
    }
}

/// An enum discovered in source, independent of how it was found.
///
/// Values keep declaration order. Constant names are unique within one
/// definition and the value list is never empty once extraction succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<EnumValue>,
    /// Collection name override (`AllRoles`). `None` derives it from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            name: name.into(),
            values,
            plural: None,
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Plural used for the generated collection of all values.
    pub fn plural_name(&self) -> String {
        match &self.plural {
            Some(plural) if !plural.is_empty() => plural.clone(),
            _ => crate::case::pluralize(&self.name),
        }
    }

    /// Whether a value with this constant name is already present.
    pub fn has_constant(&self, constant_name: &str) -> bool {
        self.values.iter().any(|v| v.constant_name == constant_name)
    }

    /// Generated file name for this enum, stable for a given `name`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.name.to_lowercase(), GENERATED_SUFFIX)
    }
}

/// Suffix of every generated unit.
pub const GENERATED_SUFFIX: &str = "_enum_generated.go";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_lowercase() {
        let def = EnumDef::new("TaskStatus", vec![EnumValue::new("Done", "done")]);
        assert_eq!(def.file_name(), "taskstatus_enum_generated.go");
    }

    #[test]
    fn test_plural_defaults_and_override() {
        let def = EnumDef::new("Status", vec![EnumValue::new("Done", "done")]);
        assert_eq!(def.plural_name(), "Statuses");
        assert_eq!(def.with_plural("StatusList").plural_name(), "StatusList");
    }
}
