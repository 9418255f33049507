use crate::objc_type::ObjcType;

#[test]
fn display_common_shapes() {
    assert_eq!(ObjcType::id().to_string(), "id");
    assert_eq!(
        ObjcType::Id {
            protocols: vec!["NSCopying".into(), "NSCoding".into()]
        }
        .to_string(),
        "id<NSCopying, NSCoding>"
    );
    assert_eq!(
        ObjcType::pointer(ObjcType::struct_type("NSString")).to_string(),
        "NSString*"
    );
    assert_eq!(
        ObjcType::Generic(
            "NSArray".into(),
            vec![ObjcType::pointer(ObjcType::struct_type("NSString"))]
        )
        .to_string(),
        "NSArray<NSString*>"
    );
}

#[test]
fn qualified_constructor_drops_empty_lists() {
    let ty = ObjcType::qualified(ObjcType::struct_type("NSInteger"), Vec::new());
    assert_eq!(ty, ObjcType::struct_type("NSInteger"));

    let ty = ObjcType::specified(Vec::new(), ObjcType::struct_type("NSInteger"));
    assert_eq!(ty, ObjcType::struct_type("NSInteger"));
}

#[test]
fn normalized_flattens_qualifier_chains() {
    let nested = ObjcType::Qualified(
        Box::new(ObjcType::Qualified(
            Box::new(ObjcType::pointer(ObjcType::struct_type("NSString"))),
            vec!["_Nullable".into()],
        )),
        vec!["const".into()],
    );
    assert_eq!(
        nested.normalized(),
        ObjcType::Qualified(
            Box::new(ObjcType::pointer(ObjcType::struct_type("NSString"))),
            vec!["_Nullable".into(), "const".into()],
        )
    );
}

#[test]
fn normalized_flattens_specifier_chains() {
    let nested = ObjcType::Specified(
        vec!["static".into()],
        Box::new(ObjcType::Specified(
            vec!["const".into()],
            Box::new(ObjcType::struct_type("CGFloat")),
        )),
    );
    assert_eq!(
        nested.normalized(),
        ObjcType::Specified(
            vec!["static".into(), "const".into()],
            Box::new(ObjcType::struct_type("CGFloat")),
        )
    );
}

#[test]
fn normalized_is_identity_without_empty_lists() {
    let types = [
        ObjcType::pointer(ObjcType::struct_type("NSString")),
        ObjcType::Qualified(
            Box::new(ObjcType::pointer(ObjcType::struct_type("MyClass"))),
            vec!["_Nonnull".into()],
        ),
        ObjcType::Block {
            name: None,
            return_type: Box::new(ObjcType::Void),
            parameters: vec![ObjcType::struct_type("NSInteger")],
        },
        ObjcType::FixedArray(Box::new(ObjcType::struct_type("char")), 16),
    ];
    for ty in types {
        assert_eq!(ty.normalized(), ty);
    }
}

#[test]
fn unqualified_and_qualifiers_see_through_layers() {
    let ty = ObjcType::Specified(
        vec!["static".into()],
        Box::new(ObjcType::Qualified(
            Box::new(ObjcType::pointer(ObjcType::struct_type("NSString"))),
            vec!["_Nullable".into()],
        )),
    );
    assert_eq!(
        ty.unqualified(),
        &ObjcType::pointer(ObjcType::struct_type("NSString"))
    );
    assert_eq!(ty.qualifiers(), vec!["static", "_Nullable"]);
    assert!(ty.is_pointer());
}
