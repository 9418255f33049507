//! Lowering of CST bodies into the Swift tree.
//!
//! Objective-C constructs land in their closest Swift shape here; the
//! rewrite passes do the semantic work afterwards. Message sends become
//! member calls (`[recv sel:a b:c]` → `recv.sel(a, b: c)`), Objective-C
//! literals become Swift literals, C `for` loops desugar into `while`,
//! and constructs outside the modeled subset are preserved as `Unknown`
//! nodes carrying their source text.

mod exprs;
mod stmts;

#[cfg(test)]
mod tests;

pub use exprs::lower_expr;
pub use stmts::{lower_compound, lower_stmt};

use crate::analyze::type_mapper::MapContext;

/// Context shared by all lowering functions of one body.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCtx<'a> {
    pub map_ctx: MapContext<'a>,
}
