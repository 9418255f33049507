use indoc::indoc;

use crate::sources::SourceMap;
use crate::unit::Rewriter;

#[test]
fn header_and_implementation_merge_across_files() {
    let mut sources = SourceMap::new();
    sources.add(
        "Shape.h",
        indoc! {r#"
            @interface Shape : NSObject
            - (void)reset;
            @end
        "#},
    );
    sources.add(
        "Shape.m",
        indoc! {r#"
            @implementation Shape
            - (void)reset {
                tearDown();
            }
            @end
        "#},
    );

    let rewritten = Rewriter::new(sources)
        .parse()
        .collect()
        .rewrite()
        .expect("pipeline succeeds");
    let files = rewritten.emit();

    // The merged class emits where its implementation lives.
    assert!(!files[0].swift.contains("class Shape"), "{}", files[0].swift);
    assert!(files[1].swift.contains("class Shape: NSObject"), "{}", files[1].swift);
    assert!(files[1].swift.contains("tearDown()"));
}

#[test]
fn a_parse_error_is_contained_to_its_file() {
    let mut sources = SourceMap::new();
    sources.add("Broken.m", "@interface 42\n");
    sources.add(
        "Fine.m",
        indoc! {r#"
            @implementation Shape
            - (void)reset {
            }
            @end
        "#},
    );

    let rewritten = Rewriter::new(sources)
        .parse()
        .collect()
        .rewrite()
        .expect("siblings continue");
    let files = rewritten.emit();

    assert!(files[0].failed);
    assert!(files[0].swift.is_empty());
    assert!(!files[1].failed);
    assert!(files[1].swift.contains("class Shape"));
    assert!(rewritten.diagnostics().has_errors());
}

#[test]
fn overload_cache_does_not_change_output() {
    let source = indoc! {r#"
        @interface Shape : NSObject
        - (void)moveBy:(CGFloat)delta;
        @end
        @implementation Shape
        - (void)moveBy:(CGFloat)delta {
            [self moveBy:1];
        }
        @end
    "#};

    let cached = Rewriter::single(source)
        .with_overload_cache(true)
        .parse()
        .collect()
        .rewrite()
        .expect("pipeline succeeds")
        .emit();
    let uncached = Rewriter::single(source)
        .with_overload_cache(false)
        .parse()
        .collect()
        .rewrite()
        .expect("pipeline succeeds")
        .emit();

    assert_eq!(cached[0].swift, uncached[0].swift);
}

#[test]
fn empty_sessions_emit_nothing() {
    let rewritten = Rewriter::new(SourceMap::new())
        .parse()
        .collect()
        .rewrite()
        .expect("empty session succeeds");
    assert!(rewritten.emit().is_empty());
}
