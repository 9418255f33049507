use indoc::indoc;
use swiftward_core::SwiftType;

use crate::analyze::intentions::IntentionGraph;
use crate::analyze::{IntentionTypeSystem, TypeSystem};
use crate::unit::Rewriter;

fn graph(source: &str) -> IntentionGraph {
    let collected = Rewriter::single(source).parse().collect();
    assert!(!collected.diagnostics().has_errors());
    collected.graph().clone()
}

const HIERARCHY: &str = indoc! {r#"
    @protocol Printable
    - (void)print;
    @end
    @protocol PrettyPrintable <Printable>
    @end
    @interface Base : NSObject <PrettyPrintable>
    @property (nonatomic) NSInteger tag;
    - (void)refresh;
    @end
    @interface Derived : Base
    @property (nonatomic) CGFloat scale;
    @end
"#};

#[test]
fn types_match_respects_nullability_unless_told_otherwise() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let plain = SwiftType::string();
    let optional = SwiftType::optional(SwiftType::string());

    assert!(!types.types_match(&plain, &optional, false));
    assert!(types.types_match(&plain, &optional, true));
    assert!(types.types_match(&plain, &plain, false));
}

#[test]
fn subclasses_assign_to_their_ancestors() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let base = SwiftType::type_name("Base");
    let derived = SwiftType::type_name("Derived");

    assert!(types.is_assignable(&derived, &base));
    assert!(!types.is_assignable(&base, &derived));
}

#[test]
fn conformance_reaches_through_inherited_protocols() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let derived = SwiftType::type_name("Derived");
    assert!(types.is_assignable(&derived, &SwiftType::type_name("PrettyPrintable")));
    assert!(types.is_assignable(&derived, &SwiftType::type_name("Printable")));
    assert!(types.is_assignable(&derived, &SwiftType::any_object()));
}

#[test]
fn optional_promotion_is_assignable() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let base = SwiftType::type_name("Base");
    assert!(types.is_assignable(&base, &SwiftType::optional(base.clone())));
    assert!(types.is_assignable(
        &SwiftType::implicitly_unwrapped_optional(base.clone()),
        &base
    ));
}

#[test]
fn member_lookup_walks_the_superclass_chain() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let derived = SwiftType::type_name("Derived");
    assert_eq!(
        types.member_type(&derived, "scale"),
        Some(SwiftType::cg_float())
    );
    assert_eq!(types.member_type(&derived, "tag"), Some(SwiftType::int()));
    assert_eq!(types.member_type(&derived, "missing"), None);
}

#[test]
fn method_lookup_includes_inherited_and_protocol_methods() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let derived = SwiftType::type_name("Derived");
    assert_eq!(types.method_signatures(&derived, "refresh").len(), 1);
    assert_eq!(types.method_signatures(&derived, "print").len(), 1);
    assert!(types.method_signatures(&derived, "missing").is_empty());
}

#[test]
fn identifier_types_cover_globals_and_type_references() {
    let graph = graph(indoc! {r#"
        static const NSInteger kLimit = 8;
        @interface Shape : NSObject
        @end
    "#});
    let types = IntentionTypeSystem::new(&graph);

    assert_eq!(types.identifier_type("kLimit"), Some(SwiftType::int()));
    assert_eq!(
        types.identifier_type("Shape"),
        Some(SwiftType::metatype(SwiftType::type_name("Shape")))
    );
    assert_eq!(types.identifier_type("unknown"), None);
}

#[test]
fn error_sentinel_never_assigns() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    assert!(!types.is_assignable(&SwiftType::Error, &SwiftType::int()));
    assert!(!types.is_assignable(&SwiftType::int(), &SwiftType::Error));
}

#[test]
fn deep_unwrapped_strips_layers_for_matching() {
    let graph = graph(HIERARCHY);
    let types = IntentionTypeSystem::new(&graph);

    let doubly = SwiftType::optional(SwiftType::implicitly_unwrapped_optional(
        SwiftType::type_name("Base"),
    ));
    assert!(types.types_match(&doubly, &SwiftType::type_name("Base"), true));
}
