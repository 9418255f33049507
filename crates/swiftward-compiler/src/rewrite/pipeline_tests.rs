use swiftward_ast::{StmtId, SwiftAst};

use super::{ExpressionPass, PassContext, PassPipeline, BodyEnv, MAX_FIXPOINT_ITERATIONS};
use crate::analyze::{OverloadResolver, StubTypeSystem};
use crate::diagnostics::Diagnostics;
use crate::sources::SourceId;
use crate::Error;

/// A pass that always reports a change; the pipeline must refuse to spin
/// on it forever.
struct OscillatingPass;

impl ExpressionPass for OscillatingPass {
    fn name(&self) -> &'static str {
        "oscillating"
    }

    fn run(&mut self, ctx: &mut PassContext<'_>, _body: StmtId) {
        ctx.mark_changed();
    }
}

/// A pass that changes exactly once.
struct OneShotPass {
    fired: bool,
}

impl ExpressionPass for OneShotPass {
    fn name(&self) -> &'static str {
        "one-shot"
    }

    fn run(&mut self, ctx: &mut PassContext<'_>, _body: StmtId) {
        if !self.fired {
            self.fired = true;
            ctx.mark_changed();
        }
    }
}

fn run_pipeline(pipeline: &mut PassPipeline) -> Result<(), Error> {
    let mut ast = SwiftAst::new();
    let body = ast.compound(vec![]);
    let resolver = OverloadResolver::new();
    let mut diagnostics = Diagnostics::new();
    let env = BodyEnv::default();
    pipeline.run_body(
        &mut ast,
        &StubTypeSystem,
        &resolver,
        &mut diagnostics,
        SourceId::default(),
        "unit.m",
        &env,
        body,
    )
}

#[test]
fn oscillation_hits_the_iteration_cap() {
    let mut pipeline = PassPipeline::with_passes(vec![Box::new(OscillatingPass)]);
    let error = run_pipeline(&mut pipeline).unwrap_err();
    match error {
        Error::FixpointExceeded { unit, iterations } => {
            assert_eq!(unit, "unit.m");
            assert_eq!(iterations, MAX_FIXPOINT_ITERATIONS);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn settling_passes_terminate() {
    let mut pipeline =
        PassPipeline::with_passes(vec![Box::new(OneShotPass { fired: false })]);
    run_pipeline(&mut pipeline).expect("reaches fixpoint");
}

#[test]
fn an_empty_pipeline_is_a_fixpoint_immediately() {
    let mut pipeline = PassPipeline::with_passes(vec![]);
    run_pipeline(&mut pipeline).expect("reaches fixpoint");
}
