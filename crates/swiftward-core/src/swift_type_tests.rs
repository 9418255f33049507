use crate::swift_type::{CompositionMember, NominalType, SwiftType, TupleShape};

#[test]
fn display_nominal_and_generic() {
    assert_eq!(SwiftType::type_name("Int").to_string(), "Int");
    assert_eq!(
        SwiftType::generic("Array", [SwiftType::type_name("Int")]).to_string(),
        "Array<Int>"
    );
}

#[test]
fn display_nested() {
    let ty = SwiftType::Nested(vec![
        NominalType::TypeName("Outer".into()),
        NominalType::TypeName("Inner".into()),
    ]);
    assert_eq!(ty.to_string(), "Outer.Inner");
}

#[test]
fn display_block_and_optional_need_parens() {
    let block = SwiftType::block(SwiftType::VOID, [SwiftType::int()]);
    assert_eq!(block.to_string(), "(Int) -> Void");
    assert_eq!(SwiftType::optional(block).to_string(), "((Int) -> Void)?");

    let comp = SwiftType::ProtocolComposition(vec![
        CompositionMember::Nominal(NominalType::TypeName("A".into())),
        CompositionMember::Nominal(NominalType::TypeName("B".into())),
    ]);
    assert_eq!(
        SwiftType::implicitly_unwrapped_optional(comp).to_string(),
        "(A & B)!"
    );
}

#[test]
fn display_void_and_tuples() {
    assert_eq!(SwiftType::VOID.to_string(), "Void");
    assert_eq!(
        SwiftType::tuple([SwiftType::int(), SwiftType::bool()]).to_string(),
        "(Int, Bool)"
    );
}

#[test]
fn display_collections() {
    assert_eq!(SwiftType::array(SwiftType::int()).to_string(), "[Int]");
    assert_eq!(
        SwiftType::dictionary(SwiftType::string(), SwiftType::int()).to_string(),
        "[String: Int]"
    );
}

#[test]
fn optional_constructor_collapses_same_flavor() {
    let once = SwiftType::optional(SwiftType::int());
    let twice = SwiftType::optional(once.clone());
    assert_eq!(once, twice);
    assert_eq!(twice.to_string(), "Int?");
}

#[test]
fn optional_flavors_still_nest_across_each_other() {
    let iuo = SwiftType::implicitly_unwrapped_optional(SwiftType::int());
    let wrapped = SwiftType::optional(iuo);
    assert_eq!(wrapped.to_string(), "Int!?");
}

#[test]
fn tuple_of_one_is_its_element() {
    assert_eq!(SwiftType::tuple([SwiftType::int()]), SwiftType::int());
    assert_eq!(SwiftType::tuple([]), SwiftType::VOID);
}

#[test]
fn normalized_unwraps_raw_one_tuples() {
    let raw = SwiftType::Tuple(TupleShape::Types(vec![SwiftType::int()]));
    assert_eq!(raw.normalized(), SwiftType::int());
}

#[test]
fn normalized_collapses_raw_double_optionals() {
    let raw = SwiftType::Optional(Box::new(SwiftType::Optional(Box::new(SwiftType::int()))));
    assert_eq!(raw.normalized(), SwiftType::optional(SwiftType::int()));
}

#[test]
fn normalized_is_idempotent() {
    let types = [
        SwiftType::optional(SwiftType::block(
            SwiftType::VOID,
            [SwiftType::array(SwiftType::string())],
        )),
        SwiftType::dictionary(SwiftType::string(), SwiftType::optional(SwiftType::int())),
        SwiftType::metatype(SwiftType::type_name("NSObject")),
    ];
    for ty in types {
        let once = ty.normalized();
        assert_eq!(once.normalized(), once);
    }
}

#[test]
fn deep_unwrapped_strips_all_optional_layers() {
    let ty = SwiftType::optional(SwiftType::implicitly_unwrapped_optional(SwiftType::int()));
    assert_eq!(ty.deep_unwrapped(), &SwiftType::int());
}

#[test]
fn numeric_predicates() {
    assert!(SwiftType::int().is_integer());
    assert!(SwiftType::uint().is_integer());
    assert!(!SwiftType::int().is_float());
    assert!(SwiftType::cg_float().is_float());
    assert!(SwiftType::double().is_numeric());
    assert!(!SwiftType::string().is_numeric());
    assert!(!SwiftType::optional(SwiftType::int()).is_integer());
}
