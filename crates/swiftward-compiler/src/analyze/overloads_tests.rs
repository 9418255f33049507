use std::sync::Arc;

use swiftward_ast::LiteralKind;
use swiftward_core::{FunctionSignature, ParameterSignature, SwiftType};

use super::overloads::{OverloadArgument, OverloadResolver};
use super::type_system::StubTypeSystem;

fn unary(name: &str, param: SwiftType) -> FunctionSignature {
    FunctionSignature::new(name, vec![ParameterSignature::new(None, "value", param)])
        .with_return_type(SwiftType::type_name("T"))
}

#[test]
fn empty_signature_list_resolves_to_none() {
    let resolver = OverloadResolver::new();
    assert_eq!(resolver.resolve(&StubTypeSystem, &[], &[]), None);
}

#[test]
fn integer_literal_prefers_the_first_numeric_overload() {
    let signatures = [unary("f", SwiftType::int()), unary("f", SwiftType::double())];
    let resolver = OverloadResolver::new();

    let result = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[OverloadArgument::literal(LiteralKind::Integer)],
    );
    assert_eq!(result, Some(0));
}

#[test]
fn float_literal_rejects_integer_parameters() {
    let signatures = [unary("f", SwiftType::int()), unary("f", SwiftType::double())];
    let resolver = OverloadResolver::new();

    let result = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[OverloadArgument::literal(LiteralKind::Float)],
    );
    assert_eq!(result, Some(1));
}

#[test]
fn exact_match_distinguishes_nullability() {
    let signatures = [
        unary("f", SwiftType::type_name("NSString")),
        unary("f", SwiftType::optional(SwiftType::type_name("NSString"))),
    ];
    let resolver = OverloadResolver::new();

    let plain = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[OverloadArgument::typed(SwiftType::type_name("NSString"))],
    );
    assert_eq!(plain, Some(0));

    let optional = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[OverloadArgument::typed(SwiftType::optional(
            SwiftType::type_name("NSString"),
        ))],
    );
    assert_eq!(optional, Some(1));
}

#[test]
fn arity_mismatch_resolves_to_none() {
    let signatures = [unary("f", SwiftType::int())];
    let resolver = OverloadResolver::new();

    let result = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[
            OverloadArgument::typed(SwiftType::int()),
            OverloadArgument::typed(SwiftType::int()),
        ],
    );
    assert_eq!(result, None);
}

#[test]
fn all_uninformative_arguments_resolve_to_none() {
    let signatures = [unary("f", SwiftType::int())];
    let resolver = OverloadResolver::new();

    let result = resolver.resolve(&StubTypeSystem, &signatures, &[OverloadArgument::untyped()]);
    assert_eq!(result, None);
}

#[test]
fn declaration_order_breaks_ties() {
    let signatures = [unary("f", SwiftType::int()), unary("f", SwiftType::int())];
    let resolver = OverloadResolver::new();

    let result = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[OverloadArgument::typed(SwiftType::int())],
    );
    assert_eq!(result, Some(0));
}

#[test]
fn defaulted_parameters_extend_candidate_arities() {
    let mut trailing = ParameterSignature::named("animated", SwiftType::bool());
    trailing.has_default_value = true;
    let signatures = [FunctionSignature::new(
        "show",
        vec![
            ParameterSignature::named("view", SwiftType::type_name("UIView")),
            trailing,
        ],
    )];
    let resolver = OverloadResolver::new();

    let short = resolver.resolve(
        &StubTypeSystem,
        &signatures,
        &[OverloadArgument::typed(SwiftType::type_name("UIView"))],
    );
    assert_eq!(short, Some(0));
}

#[test]
fn resolution_is_deterministic_and_cache_transparent() {
    let signatures = [unary("f", SwiftType::int()), unary("f", SwiftType::double())];
    let arguments = [OverloadArgument::literal(LiteralKind::Integer)];

    let uncached = OverloadResolver::new();
    let first = uncached.resolve(&StubTypeSystem, &signatures, &arguments);
    let second = uncached.resolve(&StubTypeSystem, &signatures, &arguments);
    assert_eq!(first, second);

    let cached = OverloadResolver::new();
    cached.enable_cache();
    let third = cached.resolve(&StubTypeSystem, &signatures, &arguments);
    let fourth = cached.resolve(&StubTypeSystem, &signatures, &arguments);
    assert_eq!(first, third);
    assert_eq!(third, fourth);
}

#[test]
fn negative_results_are_cached_too() {
    let signatures = [unary("f", SwiftType::int())];
    let resolver = OverloadResolver::new();
    resolver.enable_cache();

    let arguments = [
        OverloadArgument::typed(SwiftType::int()),
        OverloadArgument::typed(SwiftType::int()),
    ];
    assert_eq!(resolver.resolve(&StubTypeSystem, &signatures, &arguments), None);
    assert_eq!(resolver.resolve(&StubTypeSystem, &signatures, &arguments), None);
}

#[test]
fn cache_lifecycle_is_idempotent() {
    let resolver = OverloadResolver::new();
    assert!(!resolver.is_cache_enabled());

    resolver.enable_cache();
    resolver.enable_cache();
    assert!(resolver.is_cache_enabled());

    resolver.teardown_cache();
    resolver.teardown_cache();
    assert!(!resolver.is_cache_enabled());
}

#[test]
fn shared_resolver_is_safe_across_threads() {
    let resolver = Arc::new(OverloadResolver::new());
    resolver.enable_cache();

    let signatures = Arc::new([unary("f", SwiftType::int()), unary("f", SwiftType::double())]);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            let signatures = Arc::clone(&signatures);
            std::thread::spawn(move || {
                let argument = if i % 2 == 0 {
                    OverloadArgument::literal(LiteralKind::Integer)
                } else {
                    OverloadArgument::literal(LiteralKind::Float)
                };
                let expected = if i % 2 == 0 { Some(0) } else { Some(1) };
                for _ in 0..100 {
                    let result =
                        resolver.resolve(&StubTypeSystem, signatures.as_ref(), &[argument.clone()]);
                    assert_eq!(result, expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    resolver.teardown_cache();
}
