//! Swift source emission.

mod exprs;
mod swift;
mod writer;

#[cfg(test)]
mod emit_tests;

pub use exprs::ExprPrinter;
pub use swift::SwiftEmitter;
pub use writer::SourceWriter;
