use crate::swift_type::{CompositionMember, NominalType, SwiftType};
use crate::type_parser::parse_swift_type;

fn parse(source: &str) -> SwiftType {
    parse_swift_type(source).unwrap_or_else(|err| panic!("{source:?}: {err}"))
}

#[test]
fn parses_simple_nominal() {
    assert_eq!(parse("Int"), SwiftType::int());
}

#[test]
fn parses_generic_nominal() {
    assert_eq!(
        parse("Array<Int>"),
        SwiftType::generic("Array", [SwiftType::int()])
    );
    assert_eq!(
        parse("Dictionary<String, Array<Int>>"),
        SwiftType::generic(
            "Dictionary",
            [
                SwiftType::string(),
                SwiftType::generic("Array", [SwiftType::int()])
            ]
        )
    );
}

#[test]
fn parses_nested_nominal() {
    assert_eq!(
        parse("Outer.Inner.Leaf"),
        SwiftType::Nested(vec![
            NominalType::TypeName("Outer".into()),
            NominalType::TypeName("Inner".into()),
            NominalType::TypeName("Leaf".into()),
        ])
    );
}

#[test]
fn void_is_the_empty_tuple() {
    assert_eq!(parse("Void"), SwiftType::VOID);
    assert_eq!(parse("()"), SwiftType::VOID);
}

#[test]
fn parenthesized_single_element_unwraps() {
    assert_eq!(parse("(Int)"), SwiftType::int());
    assert_eq!(parse("((Int))"), SwiftType::int());
}

#[test]
fn parses_tuples() {
    assert_eq!(
        parse("(Int, Bool)"),
        SwiftType::tuple([SwiftType::int(), SwiftType::bool()])
    );
}

#[test]
fn parses_block_with_optional_return() {
    // Spec scenario: "(A, B) -> C?"
    assert_eq!(
        parse("(A, B) -> C?"),
        SwiftType::block(
            SwiftType::optional(SwiftType::type_name("C")),
            [SwiftType::type_name("A"), SwiftType::type_name("B")]
        )
    );
}

#[test]
fn block_parameter_labels_are_skipped() {
    let expected = SwiftType::block(SwiftType::VOID, [SwiftType::int()]);
    assert_eq!(parse("(value: Int) -> Void"), expected);
    assert_eq!(parse("(with value: Int) -> Void"), expected);
}

#[test]
fn block_parameter_attributes_are_skipped() {
    assert_eq!(
        parse("(@escaping (Int) -> Void) -> Void"),
        SwiftType::block(
            SwiftType::VOID,
            [SwiftType::block(SwiftType::VOID, [SwiftType::int()])]
        )
    );
    assert_eq!(
        parse("(@autoclosure () -> Bool) -> Void"),
        SwiftType::block(
            SwiftType::VOID,
            [SwiftType::block(SwiftType::bool(), [])]
        )
    );
}

#[test]
fn inout_is_skipped() {
    assert_eq!(
        parse("(inout Int) -> Void"),
        SwiftType::block(SwiftType::VOID, [SwiftType::int()])
    );
}

#[test]
fn variadic_parameter_becomes_array() {
    assert_eq!(
        parse("(Int...) -> Void"),
        SwiftType::block(SwiftType::VOID, [SwiftType::array(SwiftType::int())])
    );
}

#[test]
fn variadic_without_arrow_is_an_error() {
    let err = parse_swift_type("(Int...)").unwrap_err();
    assert_eq!(err.message, "expected block type");
}

#[test]
fn parses_array_and_dictionary() {
    assert_eq!(parse("[Int]"), SwiftType::array(SwiftType::int()));
    assert_eq!(
        parse("[String: Int]"),
        SwiftType::dictionary(SwiftType::string(), SwiftType::int())
    );
    assert_eq!(
        parse("[[Int]]"),
        SwiftType::array(SwiftType::array(SwiftType::int()))
    );
}

#[test]
fn postfix_suffixes_apply_left_to_right() {
    assert_eq!(parse("Int?"), SwiftType::optional(SwiftType::int()));
    assert_eq!(
        parse("Int!"),
        SwiftType::implicitly_unwrapped_optional(SwiftType::int())
    );
    assert_eq!(
        parse("Int!?"),
        SwiftType::optional(SwiftType::implicitly_unwrapped_optional(SwiftType::int()))
    );
    assert_eq!(
        parse("Int.Type"),
        SwiftType::metatype(SwiftType::int())
    );
    assert_eq!(
        parse("Int?.Type"),
        SwiftType::metatype(SwiftType::optional(SwiftType::int()))
    );
    assert_eq!(
        parse("MyProtocol.Protocol"),
        SwiftType::metatype(SwiftType::type_name("MyProtocol"))
    );
}

#[test]
fn parses_protocol_composition() {
    // Spec scenario: "A & B & C"
    assert_eq!(
        parse("A & B & C"),
        SwiftType::ProtocolComposition(vec![
            CompositionMember::Nominal(NominalType::TypeName("A".into())),
            CompositionMember::Nominal(NominalType::TypeName("B".into())),
            CompositionMember::Nominal(NominalType::TypeName("C".into())),
        ])
    );
}

#[test]
fn parses_optional_composition_through_parens() {
    assert_eq!(
        parse("(A & B)?"),
        SwiftType::optional(SwiftType::ProtocolComposition(vec![
            CompositionMember::Nominal(NominalType::TypeName("A".into())),
            CompositionMember::Nominal(NominalType::TypeName("B".into())),
        ]))
    );
}

#[test]
fn composition_member_must_be_nominal() {
    let err = parse_swift_type("[Int] & B").unwrap_err();
    assert_eq!(err.message, "expected nominal type in protocol composition");
}

#[test]
fn errors_carry_a_column() {
    let err = parse_swift_type("[Int").unwrap_err();
    assert_eq!(err.message, "expected ']'");
    assert_eq!(err.column, 4);

    let err = parse_swift_type("").unwrap_err();
    assert_eq!(err.message, "expected type");
    assert_eq!(err.column, 0);
}

#[test]
fn trailing_garbage_is_an_error() {
    let err = parse_swift_type("Int Bool").unwrap_err();
    assert_eq!(err.message, "unexpected input after type");
}

#[test]
fn round_trips_canonical_renderings() {
    let cases = [
        "Int",
        "Array<Int>",
        "Outer.Inner",
        "Void",
        "(Int, Bool)",
        "(A, B) -> C?",
        "((Int) -> Void)?",
        "[Int]",
        "[String: Int]",
        "A & B & C",
        "(A & B)?",
        "Int!?",
        "Int.Type",
        "[UIView]!",
    ];
    for case in cases {
        let ty = parse(case).normalized();
        assert_eq!(parse(&ty.to_string()), ty, "{case}");
    }
}
