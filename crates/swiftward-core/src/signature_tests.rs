use crate::signature::{FunctionSignature, ParameterSignature, SelectorSignature};
use crate::swift_type::SwiftType;

#[test]
fn selector_display_uses_objc_spelling() {
    let plain = SelectorSignature::new(false, [Some("count".to_string())]);
    assert_eq!(plain.to_string(), "count");
    assert_eq!(plain.argument_count(), 0);

    let keyed = SelectorSignature::new(
        false,
        [
            Some("insertObject".to_string()),
            Some("atIndex".to_string()),
            None,
        ],
    );
    assert_eq!(keyed.to_string(), "insertObject:atIndex::");
    assert_eq!(keyed.argument_count(), 2);
}

#[test]
fn selectors_compare_structurally() {
    let a = SelectorSignature::new(false, [Some("move".to_string()), Some("to".to_string())]);
    let b = SelectorSignature::new(false, [Some("move".to_string()), Some("to".to_string())]);
    let c = SelectorSignature::new(true, [Some("move".to_string()), Some("to".to_string())]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn signature_yields_its_selector() {
    let signature = FunctionSignature::new(
        "move",
        vec![ParameterSignature::new(
            Some("to"),
            "point",
            SwiftType::type_name("CGPoint"),
        )],
    );
    let selector = signature.selector_signature();
    assert_eq!(
        selector.keywords,
        vec![Some("move".to_string()), Some("to".to_string())]
    );
    assert!(!selector.is_static);
}

#[test]
fn unlabeled_parameters_become_anonymous_keywords() {
    let signature = FunctionSignature::new(
        "distance",
        vec![ParameterSignature::new(None, "other", SwiftType::double())],
    );
    assert_eq!(
        signature.selector_signature().keywords,
        vec![Some("distance".to_string()), None]
    );
    assert_eq!(signature.to_string(), "distance(_:)");
}

#[test]
fn defaulted_trailing_parameters_produce_shorter_selectors() {
    let mut animated = ParameterSignature::named("animated", SwiftType::bool());
    animated.has_default_value = true;
    let mut completion = ParameterSignature::named(
        "completion",
        SwiftType::optional(SwiftType::block(SwiftType::VOID, [])),
    );
    completion.has_default_value = true;

    let signature = FunctionSignature::new(
        "dismiss",
        vec![
            ParameterSignature::named("viewController", SwiftType::type_name("UIViewController")),
            animated,
            completion,
        ],
    );

    let selectors = signature.selector_signatures();
    assert_eq!(selectors.len(), 3);
    assert_eq!(selectors[0].argument_count(), 3);
    assert_eq!(selectors[1].argument_count(), 2);
    assert_eq!(selectors[2].argument_count(), 1);
}

#[test]
fn non_defaulted_parameters_stop_the_dropping() {
    let mut last = ParameterSignature::named("options", SwiftType::int());
    last.has_default_value = true;

    let signature = FunctionSignature::new(
        "load",
        vec![ParameterSignature::named("url", SwiftType::string()), last],
    );

    let selectors = signature.selector_signatures();
    assert_eq!(selectors.len(), 2);
    assert_eq!(selectors[1].argument_count(), 1);
}
