use indoc::indoc;

use super::ast::Root;
use super::{parse_source, SyntaxKind};
use crate::sources::SourceId;

fn parse_ok(source: &str) -> Root {
    let result = parse_source(source, SourceId::default());
    assert!(
        !result.diagnostics.has_errors(),
        "unexpected parse errors:\n{}",
        result.diagnostics.printer().render()
    );
    Root::cast(result.root).expect("parser always produces Root")
}

#[test]
fn parses_empty_input() {
    let root = parse_ok("");
    assert_eq!(root.interfaces().count(), 0);
}

#[test]
fn parses_interface_with_superclass_and_protocols() {
    let root = parse_ok(indoc! {r#"
        @interface Shape : NSObject <NSCopying, NSCoding>
        @end
    "#});

    let interface = root.interfaces().next().expect("one interface");
    assert_eq!(interface.name().unwrap().text(), "Shape");
    assert_eq!(interface.superclass().unwrap().text(), "NSObject");
    assert_eq!(interface.protocol_refs(), vec!["NSCopying", "NSCoding"]);
    assert_eq!(interface.category(), None);
}

#[test]
fn parses_class_extension_and_category() {
    let root = parse_ok(indoc! {r#"
        @interface Shape ()
        @end
        @interface Shape (Drawing)
        @end
    "#});

    let mut interfaces = root.interfaces();
    assert_eq!(interfaces.next().unwrap().category(), Some(String::new()));
    assert_eq!(
        interfaces.next().unwrap().category(),
        Some("Drawing".to_string())
    );
}

#[test]
fn parses_properties_with_attributes() {
    let root = parse_ok(indoc! {r#"
        @interface Shape : NSObject
        @property (nonatomic, weak) Shape *parent;
        @property (nonatomic, getter=isVisible) BOOL visible;
        @end
    "#});

    let interface = root.interfaces().next().unwrap();
    let properties: Vec<_> = interface.properties().collect();
    assert_eq!(properties.len(), 2);

    assert_eq!(properties[0].name().unwrap().text(), "parent");
    let attrs = properties[0].attributes();
    assert!(attrs.iter().any(|a| a.name == "weak"));

    let attrs = properties[1].attributes();
    let getter = attrs.iter().find(|a| a.name == "getter").unwrap();
    assert_eq!(getter.value.as_deref(), Some("isVisible"));
}

#[test]
fn parses_method_selectors() {
    let root = parse_ok(indoc! {r#"
        @interface Shape : NSObject
        - (void)moveToX:(CGFloat)x y:(CGFloat)y;
        + (instancetype)shape;
        @end
    "#});

    let interface = root.interfaces().next().unwrap();
    let methods: Vec<_> = interface.methods().collect();
    assert_eq!(methods.len(), 2);

    assert_eq!(methods[0].selector_text(), "moveToX:y:");
    assert!(!methods[0].is_class_method());
    let pieces = methods[0].selector_pieces();
    assert_eq!(pieces[0].parameter_name().as_deref(), Some("x"));
    assert_eq!(pieces[1].name().as_deref(), Some("y"));

    assert_eq!(methods[1].selector_text(), "shape");
    assert!(methods[1].is_class_method());
}

#[test]
fn parses_implementation_with_body() {
    let root = parse_ok(indoc! {r#"
        @implementation Shape
        - (void)reset {
            self.x = 0;
        }
        @end
    "#});

    let implementation = root.implementations().next().unwrap();
    assert_eq!(implementation.name().unwrap().text(), "Shape");
    let method = implementation.methods().next().unwrap();
    assert!(method.body().is_some());
}

#[test]
fn parses_protocol_with_optional_section() {
    let root = parse_ok(indoc! {r#"
        @protocol Drawable <NSObject>
        - (void)draw;
        @optional
        - (void)prepare;
        @end
    "#});

    let protocol = root.protocols().next().unwrap();
    assert_eq!(protocol.name().unwrap().text(), "Drawable");
    assert!(!protocol.is_forward());
    assert_eq!(protocol.methods().count(), 2);
}

#[test]
fn parses_forward_protocol_declaration() {
    let root = parse_ok("@protocol Drawable;\n");
    assert!(root.protocols().next().unwrap().is_forward());
}

#[test]
fn parses_ns_enum_and_ns_options() {
    let root = parse_ok(indoc! {r#"
        typedef NS_ENUM(NSUInteger, ShapeKind) {
            ShapeKindCircle,
            ShapeKindSquare = 10,
        };
        typedef NS_OPTIONS(NSUInteger, ShapeEdges) {
            ShapeEdgeTop = 1 << 0,
            ShapeEdgeBottom = 1 << 1,
        };
    "#});

    let enums: Vec<_> = root.enums().collect();
    assert_eq!(enums.len(), 2);
    assert_eq!(enums[0].name().unwrap().text(), "ShapeKind");
    assert!(!enums[0].is_option_set());
    assert_eq!(enums[0].members().count(), 2);
    assert!(enums[1].is_option_set());
}

#[test]
fn parses_typedef_struct() {
    let root = parse_ok(indoc! {r#"
        typedef struct {
            CGFloat width;
            CGFloat height;
        } ShapeSize;
    "#});

    let st = root.structs().next().unwrap();
    assert_eq!(st.name().unwrap().text(), "ShapeSize");
    assert_eq!(st.fields().count(), 2);
}

#[test]
fn parses_block_typedef() {
    let root = parse_ok("typedef void (^Completion)(NSInteger code);\n");
    let td = root.typedefs().next().unwrap();
    assert_eq!(td.alias_name().as_deref(), Some("Completion"));
}

#[test]
fn parses_globals_and_functions() {
    let root = parse_ok(indoc! {r#"
        static NSInteger kRetryCount = 3;
        CGFloat ShapeArea(CGFloat width, CGFloat height) {
            return width * height;
        }
    "#});

    let var = root.global_vars().next().unwrap();
    assert_eq!(var.name().unwrap().text(), "kRetryCount");
    assert!(var.initializer().is_some());

    let function = root.functions().next().unwrap();
    assert_eq!(function.name().unwrap().text(), "ShapeArea");
    assert_eq!(function.params().len(), 2);
    assert!(function.body().is_some());
}

#[test]
fn parses_preprocessor_lines_verbatim() {
    let root = parse_ok(indoc! {r#"
        #import <Foundation/Foundation.h>
        #define KIND 1
        @interface Shape : NSObject
        @end
    "#});

    assert_eq!(
        root.preprocessor_lines(),
        vec!["#import <Foundation/Foundation.h>", "#define KIND 1"]
    );
}

#[test]
fn parses_message_sends_and_literals_in_bodies() {
    let root = parse_ok(indoc! {r#"
        @implementation Shape
        - (void)demo {
            NSArray *items = @[@1, @2];
            NSString *name = [NSString stringWithFormat:@"%d", 7];
            [self configure];
            if ([items count] > 0) {
                return;
            }
        }
        @end
    "#});

    let method = root.implementations().next().unwrap().methods().next().unwrap();
    let body = method.body().unwrap();
    let sends: Vec<_> = body
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::MessageSend)
        .collect();
    assert_eq!(sends.len(), 3);
}

#[test]
fn recovers_from_malformed_declarations() {
    let result = parse_source("@interface 123\n@end\n@interface Ok : NSObject\n@end\n", SourceId::default());
    assert!(result.diagnostics.has_errors());

    let root = Root::cast(result.root).unwrap();
    let names: Vec<_> = root
        .interfaces()
        .filter_map(|i| i.name().map(|t| t.text().to_string()))
        .collect();
    assert!(names.contains(&"Ok".to_string()));
}

#[test]
fn nonnull_regions_round_trip_through_the_tree() {
    let source = indoc! {r#"
        NS_ASSUME_NONNULL_BEGIN
        @interface Shape : NSObject
        @end
        NS_ASSUME_NONNULL_END
    "#};
    let result = parse_source(source, SourceId::default());
    assert!(!result.diagnostics.has_errors());
    // Both region markers survive as tokens in the tree.
    let text = result.root.text().to_string();
    assert_eq!(text, source);
}
