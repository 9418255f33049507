//! Staged facade driving the whole pipeline:
//! parse → collect → rewrite → emit.
//!
//! Each stage consumes the previous one and carries the accumulated
//! diagnostics forward. A file with parse errors is reported and skipped;
//! sibling files continue. The rewrite stage fans translation units out
//! with rayon; workers share the frozen intention graph and one overload
//! resolver (its cache is reader-writer guarded).

use std::collections::HashSet;

use rayon::prelude::*;
use swiftward_ast::{StmtId, SwiftAst};
use swiftward_core::SwiftType;

use crate::analyze::collect::collect_file;
use crate::analyze::intentions::IntentionGraph;
use crate::analyze::{IntentionTypeSystem, OverloadResolver};
use crate::diagnostics::Diagnostics;
use crate::emit::SwiftEmitter;
use crate::parser::ast::Root;
use crate::parser::parse_source;
use crate::rewrite::builtins::core_graphics_registry;
use crate::rewrite::{BodyEnv, PassPipeline, TransformerRegistry};
use crate::sources::{SourceId, SourceMap};
use crate::{Error, Result};

/// Entry point for a rewrite session.
pub struct Rewriter {
    sources: SourceMap,
    registry: TransformerRegistry,
    use_overload_cache: bool,
}

impl Rewriter {
    pub fn new(sources: SourceMap) -> Self {
        Self {
            sources,
            registry: core_graphics_registry(),
            use_overload_cache: true,
        }
    }

    /// Single inline source; convenience for tests and the one-file path.
    pub fn single(source: &str) -> Self {
        Self::new(SourceMap::single(source))
    }

    pub fn with_registry(mut self, registry: TransformerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_overload_cache(mut self, enabled: bool) -> Self {
        self.use_overload_cache = enabled;
        self
    }

    /// Parses every file with recovery; syntax problems land in the
    /// diagnostics, attributed per file.
    pub fn parse(self) -> RewriterParsed {
        let mut diagnostics = Diagnostics::new();
        let mut roots = Vec::with_capacity(self.sources.len());
        for source in self.sources.iter() {
            let result = parse_source(source.content, source.id);
            diagnostics.extend(result.diagnostics);
            roots.push(result.root);
        }
        RewriterParsed {
            sources: self.sources,
            registry: self.registry,
            use_overload_cache: self.use_overload_cache,
            roots,
            diagnostics,
        }
    }
}

pub struct RewriterParsed {
    sources: SourceMap,
    registry: TransformerRegistry,
    use_overload_cache: bool,
    roots: Vec<crate::parser::SyntaxNode>,
    diagnostics: Diagnostics,
}

impl RewriterParsed {
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Collects intentions and lowers bodies. Files whose parse failed are
    /// skipped here and marked failed; the rest of the session continues.
    pub fn collect(self) -> RewriterCollected {
        let mut failed: HashSet<SourceId> = HashSet::new();
        let mut asts: Vec<SwiftAst> = Vec::with_capacity(self.roots.len());
        let mut files = Vec::with_capacity(self.roots.len());

        for (root, source) in self.roots.iter().zip(self.sources.iter()) {
            let mut arena = SwiftAst::new();
            if self.diagnostics.has_errors_for(source.id) {
                failed.insert(source.id);
                files.push(crate::analyze::FileIntentions {
                    source: source.id,
                    path: source.path.to_string(),
                    ..Default::default()
                });
            } else {
                let root = Root::cast(root.clone()).expect("parser always produces Root");
                files.push(collect_file(&root, source.id, source.path, &mut arena));
            }
            asts.push(arena);
        }

        let graph = IntentionGraph::build(files);
        RewriterCollected {
            sources: self.sources,
            registry: self.registry,
            use_overload_cache: self.use_overload_cache,
            graph,
            asts,
            diagnostics: self.diagnostics,
            failed,
        }
    }
}

pub struct RewriterCollected {
    sources: SourceMap,
    registry: TransformerRegistry,
    use_overload_cache: bool,
    graph: IntentionGraph,
    asts: Vec<SwiftAst>,
    diagnostics: Diagnostics,
    failed: HashSet<SourceId>,
}

/// One body to push through the pipeline.
struct BodyJob {
    body: StmtId,
    env: BodyEnv,
}

impl RewriterCollected {
    pub fn graph(&self) -> &IntentionGraph {
        &self.graph
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// Runs the fixpoint pass pipeline over every body, one worker per
    /// translation unit. The intention graph is frozen from here on.
    pub fn rewrite(mut self) -> Result<RewriterRewritten> {
        let resolver = OverloadResolver::new();
        if self.use_overload_cache {
            resolver.enable_cache();
        }

        let mut jobs_per_source: Vec<Vec<BodyJob>> = Vec::new();
        jobs_per_source.resize_with(self.asts.len(), Vec::new);
        collect_jobs(&self.graph, &mut jobs_per_source);

        let graph = &self.graph;
        let registry = &self.registry;
        let resolver_ref = &resolver;
        let sources = &self.sources;

        let results: Vec<(Diagnostics, Result<()>)> = self
            .asts
            .par_iter_mut()
            .enumerate()
            .map(|(index, ast)| {
                let source = sources.get(SourceId::from_index(index));
                let types = IntentionTypeSystem::new(graph);
                let mut pipeline = PassPipeline::standard(registry.clone());
                let mut diagnostics = Diagnostics::new();
                let mut outcome = Ok(());
                for job in &jobs_per_source[index] {
                    if let Err(error) = pipeline.run_body(
                        ast,
                        &types,
                        resolver_ref,
                        &mut diagnostics,
                        source.id,
                        source.path,
                        &job.env,
                        job.body,
                    ) {
                        outcome = Err(error);
                        break;
                    }
                }
                (diagnostics, outcome)
            })
            .collect();

        for (diagnostics, outcome) in results {
            self.diagnostics.extend(diagnostics);
            outcome?;
        }

        resolver.teardown_cache();

        Ok(RewriterRewritten {
            sources: self.sources,
            graph: self.graph,
            asts: self.asts,
            diagnostics: self.diagnostics,
            failed: self.failed,
        })
    }
}

/// Gathers every body in the graph, keyed by the unit whose arena holds it.
fn collect_jobs(graph: &IntentionGraph, jobs: &mut [Vec<BodyJob>]) {
    let mut push = |source: SourceId, body: Option<StmtId>, env: BodyEnv| {
        if let Some(body) = body {
            if let Some(slot) = jobs.get_mut(source.index()) {
                slot.push(BodyJob { body, env });
            }
        }
    };

    for class in graph.classes() {
        let self_type = SwiftType::type_name(&class.name);
        for method in &class.methods {
            let env = BodyEnv {
                self_type: Some(if method.signature.is_static {
                    SwiftType::metatype(self_type.clone())
                } else {
                    self_type.clone()
                }),
                parameters: parameter_env(&method.signature),
            };
            push(method.source_ref.source, method.body, env);
        }
        for init in &class.inits {
            let env = BodyEnv {
                self_type: Some(self_type.clone()),
                parameters: parameter_env(&init.signature),
            };
            push(init.source_ref.source, init.body, env);
        }
        if let Some(deinit) = &class.deinit {
            let env = BodyEnv {
                self_type: Some(self_type.clone()),
                parameters: Vec::new(),
            };
            push(deinit.source_ref.source, deinit.body, env);
        }
    }

    for extension in graph.extensions() {
        let self_type = SwiftType::type_name(&extension.class_name);
        for method in &extension.methods {
            let env = BodyEnv {
                self_type: Some(self_type.clone()),
                parameters: parameter_env(&method.signature),
            };
            push(method.source_ref.source, method.body, env);
        }
    }

    for function in graph.global_funcs() {
        let env = BodyEnv {
            self_type: None,
            parameters: parameter_env(&function.signature),
        };
        push(function.source_ref.source, function.body, env);
    }

    for var in graph.global_vars() {
        push(var.source_ref.source, var.initializer, BodyEnv::default());
    }
}

fn parameter_env(signature: &swiftward_core::FunctionSignature) -> Vec<(String, SwiftType)> {
    signature
        .parameters
        .iter()
        .map(|p| (p.name.clone(), p.ty.clone()))
        .collect()
}

pub struct RewriterRewritten {
    sources: SourceMap,
    graph: IntentionGraph,
    asts: Vec<SwiftAst>,
    diagnostics: Diagnostics,
    failed: HashSet<SourceId>,
}

/// One emitted translation unit.
#[derive(Debug, Clone)]
pub struct RewrittenFile {
    pub source: SourceId,
    pub path: String,
    pub swift: String,
    /// The file's parse failed; `swift` is empty and the diagnostics carry
    /// the errors.
    pub failed: bool,
}

impl RewriterRewritten {
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn graph(&self) -> &IntentionGraph {
        &self.graph
    }

    /// Emits Swift for every unit; failed units come back empty.
    pub fn emit(&self) -> Vec<RewrittenFile> {
        self.sources
            .iter()
            .map(|source| {
                if self.failed.contains(&source.id) {
                    return RewrittenFile {
                        source: source.id,
                        path: source.path.to_string(),
                        swift: String::new(),
                        failed: true,
                    };
                }
                let emitter = SwiftEmitter::new(&self.graph, &self.asts, source.id);
                RewrittenFile {
                    source: source.id,
                    path: source.path.to_string(),
                    swift: emitter.emit(),
                    failed: false,
                }
            })
            .collect()
    }
}

/// One-shot convenience: rewrite a single source, returning the Swift text
/// and all diagnostics.
pub fn rewrite_to_swift(source: &str) -> Result<(String, Diagnostics)> {
    let rewritten = Rewriter::single(source).parse().collect().rewrite()?;
    let mut files = rewritten.emit();
    let file = files.remove(0);
    let diagnostics = rewritten.diagnostics;
    if file.failed {
        return Err(Error::ParseFailed(diagnostics));
    }
    Ok((file.swift, diagnostics))
}
