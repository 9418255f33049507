//! Case-mapping helpers for selector and property naming.

/// Lowercase the first character, leaving the rest untouched.
///
/// # Examples
/// ```
/// use swiftward_core::utils::decapitalized;
/// assert_eq!(decapitalized("WithFrame"), "withFrame");
/// assert_eq!(decapitalized("x"), "x");
/// ```
pub fn decapitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert snake_case or kebab-case to lowerCamelCase.
///
/// Already-camelCase input is returned unchanged.
///
/// # Examples
/// ```
/// use swiftward_core::utils::to_lower_camel_case;
/// assert_eq!(to_lower_camel_case("foo_bar"), "fooBar");
/// assert_eq!(to_lower_camel_case("fooBar"), "fooBar");
/// ```
pub fn to_lower_camel_case(s: &str) -> String {
    fn is_separator(c: char) -> bool {
        matches!(c, '_' | '-')
    }

    if !s.chars().any(is_separator) {
        return decapitalized(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if is_separator(c) {
            capitalize_next = !result.is_empty();
            continue;
        }
        if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c.to_ascii_lowercase());
        }
    }
    result
}

/// Derive the Swift initializer argument label from an `initWith`-style
/// selector keyword: `initWithFrame` → `frame`; plain `init` → no label.
pub fn init_label_from_keyword(keyword: &str) -> Option<String> {
    let rest = keyword.strip_prefix("initWith")?;
    if rest.is_empty() {
        return None;
    }
    Some(decapitalized(rest))
}
