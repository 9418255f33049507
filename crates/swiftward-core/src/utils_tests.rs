use crate::utils::{capitalized, decapitalized, init_label_from_keyword, to_lower_camel_case};

#[test]
fn decapitalized_lowers_only_the_first_character() {
    assert_eq!(decapitalized("WithFrame"), "withFrame");
    assert_eq!(decapitalized("URL"), "uRL");
    assert_eq!(decapitalized(""), "");
}

#[test]
fn capitalized_raises_only_the_first_character() {
    assert_eq!(capitalized("point"), "Point");
    assert_eq!(capitalized(""), "");
}

#[test]
fn lower_camel_case_handles_separators_and_identity() {
    assert_eq!(to_lower_camel_case("foo_bar"), "fooBar");
    assert_eq!(to_lower_camel_case("foo-bar-baz"), "fooBarBaz");
    assert_eq!(to_lower_camel_case("fooBar"), "fooBar");
    assert_eq!(to_lower_camel_case("Already"), "already");
}

#[test]
fn init_labels_derive_from_selector_keywords() {
    assert_eq!(init_label_from_keyword("initWithFrame"), Some("frame".to_string()));
    assert_eq!(init_label_from_keyword("initWithX"), Some("x".to_string()));
    assert_eq!(init_label_from_keyword("init"), None);
    assert_eq!(init_label_from_keyword("initialize"), None);
}