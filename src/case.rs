//! Case conversion for enum identifiers.
//!
//! Converts between the lowercase wire form of enum values (`in_progress`)
//! and the PascalCase fragments used in generated constant names
//! (`InProgress`). All functions are total and allocation-only.

/// Title-case a single word: first character upper, the rest lower.
///
/// Fully uppercase input is folded, so `PENDING` becomes `Pending`.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
            out
        }
        None => String::new(),
    }
}

/// Convert `snake_case` to `PascalCase`.
///
/// Empty segments (leading, trailing, or doubled `_`) contribute nothing.
///
/// # Examples
///
/// ```
/// use enumgen::case::to_pascal_case;
///
/// assert_eq!(to_pascal_case("in_progress"), "InProgress");
/// assert_eq!(to_pascal_case("PENDING"), "Pending");
/// ```
pub fn to_pascal_case(snake: &str) -> String {
    snake.split('_').map(title_case).collect()
}

/// Convert `PascalCase` or `camelCase` to `snake_case`.
///
/// Every uppercase letter after the first character gets its own separator,
/// so acronyms are split letter by letter (`HTTPCode` -> `h_t_t_p_code`).
pub fn to_snake_case(pascal: &str) -> String {
    let mut out = String::with_capacity(pascal.len() + 4);
    for (i, c) in pascal.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Naive English plural used to name the collection of all values.
pub fn pluralize(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{name}es");
    }

    if let Some(stem) = name.strip_suffix(|c: char| c == 'y' || c == 'Y') {
        let before_vowel = stem
            .chars()
            .last()
            .is_some_and(|c| "aeiouAEIOU".contains(c));
        if !stem.is_empty() && !before_vowel {
            return format!("{stem}ies");
        }
    }

    format!("{name}s")
}

/// Lowercase only the first character (`TaskStatus` -> `taskStatus`).
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pascal_case_table() {
        let cases = [
            ("active", "Active"),
            ("in_progress", "InProgress"),
            ("multi_word_example", "MultiWordExample"),
            ("PENDING", "Pending"),
            ("", ""),
            ("a", "A"),
            ("status_1", "Status1"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_pascal_case(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_pascal_case_empty_segments() {
        assert_eq!(to_pascal_case("_leading"), "Leading");
        assert_eq!(to_pascal_case("trailing_"), "Trailing");
        assert_eq!(to_pascal_case("double__under"), "DoubleUnder");
        assert_eq!(to_pascal_case("___"), "");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("InProgress"), "in_progress");
        assert_eq!(to_snake_case("pending"), "pending");
        assert_eq!(to_snake_case("camelCase"), "camel_case");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_snake_case_splits_acronyms() {
        assert_eq!(to_snake_case("HTTPCode"), "h_t_t_p_code");
        assert_eq!(to_snake_case("ID"), "i_d");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("low"), "Low");
        assert_eq!(title_case("HIGH"), "High");
        assert_eq!(title_case("in_progress"), "In_progress");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Role"), "Roles");
        assert_eq!(pluralize("Status"), "Statuses");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Branch"), "Branches");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("TaskStatus"), "taskStatus");
        assert_eq!(lower_first(""), "");
    }

    proptest! {
        #[test]
        fn snake_inverts_pascal(s in "[a-z][a-z0-9]{0,6}(_[a-z][a-z0-9]{0,6}){0,4}") {
            prop_assert_eq!(to_snake_case(&to_pascal_case(&s)), s);
        }

        #[test]
        fn pascal_output_has_no_separators(s in "[a-z_]{0,24}") {
            prop_assert!(!to_pascal_case(&s).contains('_'));
        }
    }
}
