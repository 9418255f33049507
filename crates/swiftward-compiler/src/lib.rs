#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Swiftward compiler: Objective-C parser, intention graph, rewrite passes,
//! and Swift emitter.
//!
//! The pipeline, leaves first:
//! - `parser` - lexer, CST, and typed declaration wrappers
//! - `analyze` - nullability regions, intention collection, type mapping,
//!   type system, overload resolution
//! - `lower` - CST bodies to the Swift tree
//! - `rewrite` - fixpoint expression passes (type annotation, invocation
//!   transforms, idiom cleanups)
//! - `emit` - Swift source emission
//! - `unit` - staged facade driving all of the above

pub mod analyze;
pub mod diagnostics;
pub mod emit;
pub mod lower;
pub mod parser;
pub mod rewrite;
pub mod sources;
pub mod unit;

#[cfg(test)]
pub mod test_utils;
#[cfg(test)]
mod unit_tests;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use sources::{Source, SourceId, SourceMap};
pub use unit::{Rewriter, RewrittenFile};

/// Result type for pipeline stages that produce output plus diagnostics.
///
/// Non-fatal problems ride in the `Diagnostics`; the outer `Result` is for
/// failures that abort the stage.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that abort processing of a translation unit or the pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input nested too deeply for the parser.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// The expression-pass pipeline failed to reach a fixpoint; this is a
    /// configuration bug in the registered passes.
    #[error("expression passes did not reach a fixpoint in {iterations} iterations for {unit}")]
    FixpointExceeded { unit: String, iterations: u32 },

    /// Parsing failed with errors recorded in the attached diagnostics.
    #[error("parsing failed with {} errors", .0.error_count())]
    ParseFailed(Diagnostics),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
