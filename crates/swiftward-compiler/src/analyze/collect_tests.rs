use indoc::indoc;
use swiftward_core::{Ownership, SwiftType};

use crate::analyze::intentions::IntentionGraph;
use crate::unit::Rewriter;

fn collect(source: &str) -> IntentionGraph {
    let collected = Rewriter::single(source).parse().collect();
    assert!(
        !collected.diagnostics().has_errors(),
        "unexpected errors:\n{}",
        collected.diagnostics().printer().render()
    );
    collected.graph().clone()
}

#[test]
fn collects_class_shape() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject <NSCopying>
        @property (nonatomic) CGFloat area;
        - (void)reset;
        @end
    "#});

    let class = graph.class("Shape").expect("class collected");
    assert_eq!(class.superclass.as_deref(), Some("NSObject"));
    assert_eq!(class.protocols, vec!["NSCopying"]);
    assert_eq!(class.properties.len(), 1);
    assert_eq!(class.methods.len(), 1);
    assert_eq!(class.methods[0].signature.name, "reset");
}

#[test]
fn weak_property_becomes_optional() {
    // `@property (weak) MyClass *d;` → `weak var d: MyClass?`
    let graph = collect(indoc! {r#"
        @interface MyClass : NSObject
        @property (weak) MyClass *d;
        @end
    "#});

    let class = graph.class("MyClass").unwrap();
    let property = &class.properties[0];
    assert_eq!(property.ownership, Ownership::Weak);
    assert_eq!(
        property.swift_type,
        SwiftType::optional(SwiftType::type_name("MyClass"))
    );
}

#[test]
fn assign_object_property_becomes_unowned_unsafe_unwrapped() {
    // `@property (assign) MyClass *d;` outside NS_ASSUME_NONNULL
    // → `unowned(unsafe) var d: MyClass!`
    let graph = collect(indoc! {r#"
        @interface MyClass : NSObject
        @property (assign) MyClass *d;
        @end
    "#});

    let class = graph.class("MyClass").unwrap();
    let property = &class.properties[0];
    assert_eq!(property.ownership, Ownership::UnownedUnsafe);
    assert_eq!(
        property.swift_type,
        SwiftType::implicitly_unwrapped_optional(SwiftType::type_name("MyClass"))
    );
}

#[test]
fn nonnull_region_drops_the_unwrapping() {
    let graph = collect(indoc! {r#"
        NS_ASSUME_NONNULL_BEGIN
        @interface Shape : NSObject
        @property (nonatomic, copy) NSString *name;
        @property (nonatomic, nullable) NSString *nickname;
        @end
        NS_ASSUME_NONNULL_END
    "#});

    let class = graph.class("Shape").unwrap();
    assert_eq!(class.properties[0].swift_type, SwiftType::string());
    assert_eq!(
        class.properties[1].swift_type,
        SwiftType::optional(SwiftType::string())
    );
    assert!(class.in_nonnull_context);
}

#[test]
fn ivar_visibility_sections_set_access() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject {
            NSInteger _generation;
            @public
            CGFloat exposed;
            @private
            __weak Shape *_parent;
        }
        @end
    "#});

    use crate::analyze::intentions::AccessLevel;
    let class = graph.class("Shape").unwrap();
    assert_eq!(class.ivars.len(), 3);
    assert_eq!(class.ivars[0].access, AccessLevel::Private);
    assert_eq!(class.ivars[1].access, AccessLevel::Public);
    assert_eq!(class.ivars[2].access, AccessLevel::Private);
    assert_eq!(class.ivars[2].ownership, Ownership::Weak);
    assert_eq!(
        class.ivars[2].swift_type,
        SwiftType::optional(SwiftType::type_name("Shape"))
    );
}

#[test]
fn getter_and_setter_attributes_override_accessor_names() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject
        @property (nonatomic, getter=isVisible, setter=setShown:) BOOL visible;
        @end
    "#});

    let property = &graph.class("Shape").unwrap().properties[0];
    assert_eq!(property.getter_name.as_deref(), Some("isVisible"));
    assert_eq!(property.setter_name.as_deref(), Some("setShown"));
}

#[test]
fn implementation_bodies_merge_into_the_interface() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject
        - (void)reset;
        @end
        @implementation Shape
        - (void)reset {
            self.generation = 0;
        }
        @end
    "#});

    let class = graph.class("Shape").unwrap();
    assert_eq!(class.superclass.as_deref(), Some("NSObject"));
    assert_eq!(class.methods.len(), 1);
    assert!(class.methods[0].body.is_some());
}

#[test]
fn annotated_interface_signatures_beat_unannotated_redeclarations() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject
        - (nullable NSString *)title;
        @end
        @implementation Shape
        - (NSString *)title {
            return nil;
        }
        @end
    "#});

    let class = graph.class("Shape").unwrap();
    let method = &class.methods[0];
    // The interface's `nullable` survives the merge with the unannotated
    // implementation.
    assert_eq!(
        method.signature.return_type,
        SwiftType::optional(SwiftType::string())
    );
    assert!(method.body.is_some());
}

#[test]
fn init_selectors_become_init_intentions() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject
        - (instancetype)initWithName:(NSString *)name;
        @end
    "#});

    let class = graph.class("Shape").unwrap();
    assert_eq!(class.inits.len(), 1);
    let init = &class.inits[0];
    assert_eq!(init.signature.name, "init");
    assert_eq!(init.signature.parameters[0].label.as_deref(), Some("name"));
}

#[test]
fn dealloc_becomes_the_deinit_intention() {
    let graph = collect(indoc! {r#"
        @implementation Shape
        - (void)dealloc {
            cleanup();
        }
        @end
    "#});

    let class = graph.class("Shape").unwrap();
    assert!(class.deinit.is_some());
    assert!(class.deinit.as_ref().unwrap().body.is_some());
}

#[test]
fn named_categories_become_extensions() {
    let graph = collect(indoc! {r#"
        @interface Shape (Drawing)
        - (void)draw;
        @end
    "#});

    let extension = graph.extensions().next().expect("one extension");
    assert_eq!(extension.class_name, "Shape");
    assert_eq!(extension.category_name, "Drawing");
    assert_eq!(extension.methods.len(), 1);
}

#[test]
fn class_extensions_merge_into_the_class() {
    let graph = collect(indoc! {r#"
        @interface Shape : NSObject
        @end
        @interface Shape ()
        @property (nonatomic) NSInteger generation;
        @end
    "#});

    let class = graph.class("Shape").unwrap();
    assert_eq!(class.properties.len(), 1);
    assert_eq!(graph.extensions().count(), 0);
}

#[test]
fn protocols_track_optional_sections() {
    let graph = collect(indoc! {r#"
        @protocol Drawable <NSObject>
        - (void)draw;
        @optional
        - (void)prepare;
        @required
        - (void)finish;
        @end
    "#});

    let protocol = graph.protocol("Drawable").unwrap();
    assert_eq!(protocol.protocols, vec!["NSObject"]);
    let optional: Vec<_> = protocol
        .methods
        .iter()
        .map(|m| (m.signature.name.as_str(), m.is_optional))
        .collect();
    assert_eq!(
        optional,
        vec![("draw", false), ("prepare", true), ("finish", false)]
    );
}

#[test]
fn ns_enum_and_ns_options_set_the_flag() {
    let graph = collect(indoc! {r#"
        typedef NS_ENUM(NSUInteger, ShapeKind) {
            ShapeKindCircle,
        };
        typedef NS_OPTIONS(NSUInteger, ShapeEdges) {
            ShapeEdgesTop = 1,
        };
    "#});

    assert!(!graph.enum_intention("ShapeKind").unwrap().is_option_set);
    assert!(graph.enum_intention("ShapeEdges").unwrap().is_option_set);
    assert_eq!(
        graph.enum_intention("ShapeKind").unwrap().raw_type,
        SwiftType::uint()
    );
}

#[test]
fn static_globals_are_collected_even_inside_classes() {
    let graph = collect(indoc! {r#"
        @implementation Shape
        static NSInteger kGeneration = 1;
        @end
    "#});

    let var = graph.global_var("kGeneration").expect("collected");
    assert_eq!(var.swift_type, SwiftType::int());
    assert!(var.initializer.is_some());
}

#[test]
fn typedefs_map_to_swift_aliases() {
    let graph = collect("typedef void (^Completion)(NSInteger code);\n");
    let typedef = graph.typedef("Completion").expect("collected");
    assert_eq!(
        typedef.swift_type.deep_unwrapped(),
        &SwiftType::block(SwiftType::VOID, [SwiftType::int()])
    );
}

#[test]
fn preprocessor_directives_are_recorded_per_file() {
    let graph = collect(indoc! {r#"
        #import <UIKit/UIKit.h>
        @interface Shape : NSObject
        @end
    "#});

    assert_eq!(
        graph.files[0].preprocessor_directives,
        vec!["#import <UIKit/UIKit.h>"]
    );
}
