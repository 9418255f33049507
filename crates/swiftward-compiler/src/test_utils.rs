//! Test helpers shared across the crate's test modules.

use crate::unit::rewrite_to_swift;

/// Rewrites a source that must succeed without errors; returns the Swift
/// output without the trailing newline (snapshot-friendly).
pub fn expect_swift(source: &str) -> String {
    let (swift, diagnostics) = rewrite_to_swift(source).expect("pipeline failed");
    assert!(
        !diagnostics.has_errors(),
        "unexpected errors:\n{}",
        diagnostics.printer().render()
    );
    swift.trim_end().to_string()
}

/// Rewrites a source that may carry non-fatal diagnostics.
pub fn swift_with_diagnostics(source: &str) -> (String, crate::Diagnostics) {
    let (swift, diagnostics) = rewrite_to_swift(source).expect("pipeline failed");
    (swift.trim_end().to_string(), diagnostics)
}
