use indoc::indoc;

use crate::test_utils::expect_swift;

#[test]
fn emits_a_class_with_property_and_method() {
    let swift = expect_swift(indoc! {r#"
        #import <UIKit/UIKit.h>
        @interface Shape : NSObject
        @property (nonatomic) CGFloat area;
        - (void)reset;
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    // Preprocessor directives found in file:
    // #import <UIKit/UIKit.h>

    class Shape: NSObject {
        var area: CGFloat

        func reset() {
        }
    }
    ");
}

#[test]
fn emits_bodies_from_the_implementation() {
    let swift = expect_swift(indoc! {r#"
        @interface Shape : NSObject
        @property (nonatomic) CGFloat area;
        - (void)reset;
        @end
        @implementation Shape
        - (void)reset {
            self.area = 0;
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape: NSObject {
        var area: CGFloat

        func reset() {
            self.area = 0
        }
    }
    ");
}

#[test]
fn rewrites_cg_point_make_into_an_initializer() {
    // `CGPointMake(1, 2)` → `CGPoint(x: 1, y: 2)`
    let swift = expect_swift(indoc! {r#"
        @implementation Shape
        - (void)demo {
            CGPoint p = CGPointMake(1, 2);
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape {
        func demo() {
            var p: CGPoint = CGPoint(x: 1, y: 2)
        }
    }
    ");
}

#[test]
fn rewrites_path_calls_with_receiver_promotion() {
    // `CGPathMoveToPoint(path, NULL, x, y)` → `path.move(to: CGPoint(...))`
    let swift = expect_swift(indoc! {r#"
        @implementation Shape
        - (void)draw:(CGMutablePathRef)path {
            CGPathMoveToPoint(path, NULL, 10, 20);
            CGPathAddLineToPoint(path, NULL, 30, 40);
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape {
        func draw(_ path: CGMutablePathRef) {
            path.move(to: CGPoint(x: 10, y: 20))
            path.addLine(to: CGPoint(x: 30, y: 40))
        }
    }
    ");
}

#[test]
fn rewrites_rect_getters_into_member_access() {
    let swift = expect_swift(indoc! {r#"
        @implementation Shape
        - (CGFloat)leftOf:(CGRect)frame {
            return CGRectGetMinX(frame);
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape {
        func leftOf(_ frame: CGRect) -> CGFloat {
            return frame.minX
        }
    }
    ");
}

#[test]
fn collapses_alloc_init_chains() {
    let swift = expect_swift(indoc! {r#"
        @implementation Shape
        - (void)demo {
            Shape *copy = [[Shape alloc] initWithName:@"box"];
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r#"
    class Shape {
        func demo() {
            var copy: Shape! = Shape(name: "box")
        }
    }
    "#);
}

#[test]
fn emits_initializers_and_deinit() {
    let swift = expect_swift(indoc! {r#"
        @interface Shape : NSObject
        - (instancetype)initWithName:(NSString *)name;
        @end
        @implementation Shape
        - (instancetype)initWithName:(NSString *)name {
            return self;
        }
        - (void)dealloc {
            tearDown();
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape: NSObject {
        init(name: String!) {
        }

        deinit {
            tearDown()
        }
    }
    ");
}

#[test]
fn emits_enums_and_option_sets() {
    let swift = expect_swift(indoc! {r#"
        typedef NS_ENUM(NSUInteger, ShapeKind) {
            ShapeKindCircle,
            ShapeKindSquare = 10,
        };
        typedef NS_OPTIONS(NSUInteger, ShapeEdges) {
            ShapeEdgesTop = 1 << 0,
            ShapeEdgesBottom = 1 << 1,
        };
    "#});

    insta::assert_snapshot!(swift, @r"
    enum ShapeKind: UInt {
        case circle
        case square = 10
    }

    struct ShapeEdges: OptionSet {
        let rawValue: UInt

        static let top = ShapeEdges(rawValue: 1 << 0)
        static let bottom = ShapeEdges(rawValue: 1 << 1)
    }
    ");
}

#[test]
fn emits_structs_typealiases_and_globals() {
    let swift = expect_swift(indoc! {r#"
        typedef struct {
            CGFloat width;
            CGFloat height;
        } ShapeSize;
        typedef void (^Completion)(NSInteger code);
        static const NSInteger kShapeLimit = 16;
    "#});

    insta::assert_snapshot!(swift, @r"
    typealias Completion = (Int) -> Void

    struct ShapeSize {
        var width: CGFloat
        var height: CGFloat
    }

    let kShapeLimit: Int = 16
    ");
}

#[test]
fn emits_global_functions_with_bodies() {
    let swift = expect_swift(indoc! {r#"
        CGFloat ShapeArea(CGFloat width, CGFloat height) {
            return width * height;
        }
    "#});

    insta::assert_snapshot!(swift, @r"
    func ShapeArea(width: CGFloat, height: CGFloat) -> CGFloat {
        return width * height
    }
    ");
}

#[test]
fn emits_protocols_with_optional_sections() {
    let swift = expect_swift(indoc! {r#"
        @protocol Drawable <NSObject>
        - (void)draw;
        @optional
        - (void)prepare;
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    protocol Drawable: NSObject {
        func draw()

        // optional
        func prepare()
    }
    ");
}

#[test]
fn emits_categories_as_extensions() {
    let swift = expect_swift(indoc! {r#"
        @interface Shape (Drawing)
        - (void)draw;
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    extension Shape {
        // MARK: - Drawing

        func draw() {
        }
    }
    ");
}

#[test]
fn control_flow_round_trips() {
    let swift = expect_swift(indoc! {r#"
        @implementation Shape
        - (void)tick:(NSInteger)count {
            if (count > 0) {
                count--;
            } else {
                return;
            }
            while (count < 100) {
                count += 2;
            }
            for (NSString *name in self.names) {
                greet(name);
            }
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape {
        func tick(_ count: Int) {
            if count > 0 {
                count -= 1
            } else {
                return
            }
            while count < 100 {
                count += 2
            }
            for name in self.names {
                greet(name)
            }
        }
    }
    ");
}

#[test]
fn weak_and_assign_properties_emit_their_ownership() {
    let swift = expect_swift(indoc! {r#"
        @interface MyClass : NSObject
        @property (weak) MyClass *parent;
        @property (assign) MyClass *owner;
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class MyClass: NSObject {
        weak var parent: MyClass?
        unowned(unsafe) var owner: MyClass!
    }
    ");
}

#[test]
fn message_sends_read_as_member_calls() {
    let swift = expect_swift(indoc! {r#"
        @implementation Shape
        - (void)refresh {
            [self.layout invalidate];
            [self update:1 animated:YES];
        }
        @end
    "#});

    insta::assert_snapshot!(swift, @r"
    class Shape {
        func refresh() {
            self.layout.invalidate()
            self.update(1, animated: true)
        }
    }
    ");
}
