//! The fixpoint expression-pass pipeline.
//!
//! Passes are composable visitors over one unit's Swift tree — each one
//! implements `swiftward_ast`'s `ExpressionVisitor`/`StatementVisitor`
//! traits, so the tree traversal itself lives in one place. The pipeline
//! re-runs all passes until none reports a change, bounded by an iteration
//! cap; exceeding the cap is a configuration bug surfaced as
//! [`Error::FixpointExceeded`] with the offending unit's path.
//!
//! Ordering per iteration: type annotation (post-order; literals and
//! identifiers first, then member access and call-site overloads), then
//! invocation transforms (pre-order, first registered match wins, at most
//! one application per call site per iteration), then idiom cleanups.

pub mod annotate;
pub mod builtins;
pub mod idioms;
pub mod invocation;

#[cfg(test)]
mod annotate_tests;
#[cfg(test)]
mod invocation_tests;
#[cfg(test)]
mod pipeline_tests;

pub use invocation::{ArgStrategy, FunctionTransformer, TransformTarget, TransformerRegistry};

use swiftward_ast::{StmtId, SwiftAst};
use swiftward_core::SwiftType;

use crate::analyze::{OverloadResolver, TypeSystem};
use crate::diagnostics::Diagnostics;
use crate::sources::SourceId;
use crate::Error;

/// Iteration cap for the fixpoint loop.
pub const MAX_FIXPOINT_ITERATIONS: u32 = 10;

/// Enclosing-declaration facts one body is rewritten under.
#[derive(Debug, Clone, Default)]
pub struct BodyEnv {
    /// Type of `self` inside the body, if any.
    pub self_type: Option<SwiftType>,
    /// Parameter names and types, in order.
    pub parameters: Vec<(String, SwiftType)>,
}

/// Shared state passed to every pass invocation.
pub struct PassContext<'a> {
    pub ast: &'a mut SwiftAst,
    pub types: &'a dyn TypeSystem,
    pub resolver: &'a OverloadResolver,
    pub diagnostics: &'a mut Diagnostics,
    pub source: SourceId,
    pub env: &'a BodyEnv,
    changed: bool,
}

impl PassContext<'_> {
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }
}

/// One rewrite pass over a body.
pub trait ExpressionPass {
    fn name(&self) -> &'static str;

    fn run(&mut self, ctx: &mut PassContext<'_>, body: StmtId);
}

/// The ordered pass list with its fixpoint driver.
pub struct PassPipeline {
    passes: Vec<Box<dyn ExpressionPass>>,
}

impl PassPipeline {
    /// The standard pipeline: annotation, invocation transforms, idiom
    /// cleanups.
    pub fn standard(registry: TransformerRegistry) -> Self {
        Self {
            passes: vec![
                Box::new(annotate::TypeAnnotationPass),
                Box::new(invocation::InvocationTransformPass::new(registry)),
                Box::new(idioms::IdiomCleanupPass),
            ],
        }
    }

    pub fn with_passes(passes: Vec<Box<dyn ExpressionPass>>) -> Self {
        Self { passes }
    }

    /// Runs the pipeline over one body to fixpoint.
    #[allow(clippy::too_many_arguments)]
    pub fn run_body(
        &mut self,
        ast: &mut SwiftAst,
        types: &dyn TypeSystem,
        resolver: &OverloadResolver,
        diagnostics: &mut Diagnostics,
        source: SourceId,
        unit_path: &str,
        env: &BodyEnv,
        body: StmtId,
    ) -> Result<(), Error> {
        for _ in 0..MAX_FIXPOINT_ITERATIONS {
            let mut changed = false;
            for pass in &mut self.passes {
                let mut ctx = PassContext {
                    ast,
                    types,
                    resolver,
                    diagnostics,
                    source,
                    env,
                    changed: false,
                };
                pass.run(&mut ctx, body);
                changed |= ctx.changed;
            }
            if !changed {
                return Ok(());
            }
        }
        Err(Error::FixpointExceeded {
            unit: unit_path.to_string(),
            iterations: MAX_FIXPOINT_ITERATIONS,
        })
    }
}
