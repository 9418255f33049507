use rowan::TextRange;

use super::{line_col, Diagnostics};
use crate::sources::SourceMap;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn collects_and_counts_by_severity() {
    let sources = SourceMap::single("@interfaceX");
    let id = sources.iter().next().unwrap().id;

    let mut diagnostics = Diagnostics::new();
    diagnostics.error(id, "expected class name", range(0, 10)).emit();
    diagnostics.warning(id, "unused directive", range(0, 1)).emit();

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_errors());
    assert!(diagnostics.has_errors_for(id));
}

#[test]
fn renders_with_source_snippet() {
    let mut sources = SourceMap::new();
    let id = sources.add("point.h", "@interface 1Point\n@end\n");

    let mut diagnostics = Diagnostics::new();
    diagnostics
        .error(id, "expected class name", range(11, 17))
        .emit();

    let rendered = diagnostics.printer().sources(&sources).render();
    assert!(rendered.contains("expected class name"), "{rendered}");
    assert!(rendered.contains("point.h"), "{rendered}");
}

#[test]
fn plain_rendering_without_sources() {
    let sources = SourceMap::single("x");
    let id = sources.iter().next().unwrap().id;

    let mut diagnostics = Diagnostics::new();
    diagnostics.error(id, "boom", range(0, 1)).emit();

    let rendered = diagnostics.printer().render();
    assert_eq!(rendered, "error: boom at 0..1");
}

#[test]
fn merges_collections() {
    let sources = SourceMap::single("x");
    let id = sources.iter().next().unwrap().id;

    let mut a = Diagnostics::new();
    a.error(id, "first", range(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.warning(id, "second", range(0, 1)).emit();

    a.extend(b);
    assert_eq!(a.len(), 2);
}

#[test]
fn line_col_is_one_based() {
    let source = "line one\nline two\nend";
    assert_eq!(line_col(source, 0), (1, 1));
    assert_eq!(line_col(source, 9), (2, 1));
    assert_eq!(line_col(source, 14), (2, 6));
    assert_eq!(line_col(source, source.len()), (3, 4));
}
