//! Overload resolution with a shared memoization cache.
//!
//! # Algorithm
//!
//! Candidates are every selector form each signature can produce (the full
//! form plus trailing-default-dropped forms). Resolution runs two passes:
//! an exact-match pass (only when every argument has a concrete type), then
//! an iterative nullability-ignoring elimination with literal promotion —
//! integer literals match any numeric parameter, float literals match float
//! parameters only. Declaration order is the final tie-breaker.
//!
//! # Cache
//!
//! The memo cache is keyed on `(signatures, arguments)` and stores negative
//! results too. `enable` / `teardown` are idempotent; all four operations
//! are reader-writer guarded so translation-unit workers can share one
//! resolver. While disabled, every cache operation is a no-op.

use std::collections::HashMap;
use std::sync::RwLock;

use swiftward_ast::LiteralKind;
use swiftward_core::{FunctionSignature, SwiftType};

use crate::analyze::type_system::TypeSystem;

/// A call-site argument as the resolver sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverloadArgument {
    pub ty: Option<SwiftType>,
    pub is_literal: bool,
    pub literal_kind: Option<LiteralKind>,
}

impl OverloadArgument {
    pub fn typed(ty: SwiftType) -> Self {
        Self {
            ty: Some(ty),
            is_literal: false,
            literal_kind: None,
        }
    }

    pub fn literal(kind: LiteralKind) -> Self {
        Self {
            ty: None,
            is_literal: true,
            literal_kind: Some(kind),
        }
    }

    pub fn untyped() -> Self {
        Self {
            ty: None,
            is_literal: false,
            literal_kind: None,
        }
    }

    pub fn is_missing_type(&self) -> bool {
        match &self.ty {
            None => true,
            Some(ty) => ty.is_error(),
        }
    }
}

type CacheKey = (Vec<FunctionSignature>, Vec<OverloadArgument>);

/// Resolves one signature from a list given call-site arguments.
#[derive(Debug, Default)]
pub struct OverloadResolver {
    cache: RwLock<Option<HashMap<CacheKey, Option<usize>>>>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    signature_index: usize,
    argument_count: usize,
}

impl OverloadResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the memo cache. Idempotent: enabling an enabled cache
    /// keeps its contents.
    pub fn enable_cache(&self) {
        let mut guard = self.cache.write().expect("overload cache poisoned");
        if guard.is_none() {
            *guard = Some(HashMap::new());
        }
    }

    /// Drops the memo cache. Idempotent.
    pub fn teardown_cache(&self) {
        let mut guard = self.cache.write().expect("overload cache poisoned");
        *guard = None;
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.cache.read().expect("overload cache poisoned").is_some()
    }

    fn cache_lookup(&self, key: &CacheKey) -> Option<Option<usize>> {
        let guard = self.cache.read().expect("overload cache poisoned");
        guard.as_ref().and_then(|map| map.get(key).copied())
    }

    fn cache_insert(&self, key: CacheKey, value: Option<usize>) {
        let mut guard = self.cache.write().expect("overload cache poisoned");
        if let Some(map) = guard.as_mut() {
            map.insert(key, value);
        }
    }

    /// Returns the index into `signatures` of the best overload, or `None`
    /// when no candidate fits.
    pub fn resolve(
        &self,
        types: &dyn TypeSystem,
        signatures: &[FunctionSignature],
        arguments: &[OverloadArgument],
    ) -> Option<usize> {
        if signatures.is_empty() {
            return None;
        }

        let key: CacheKey = (signatures.to_vec(), arguments.to_vec());
        if let Some(cached) = self.cache_lookup(&key) {
            return cached;
        }

        let result = self.resolve_uncached(types, signatures, arguments);
        self.cache_insert(key, result);
        result
    }

    fn resolve_uncached(
        &self,
        types: &dyn TypeSystem,
        signatures: &[FunctionSignature],
        arguments: &[OverloadArgument],
    ) -> Option<usize> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for (signature_index, signature) in signatures.iter().enumerate() {
            for selector in signature.selector_signatures() {
                candidates.push(Candidate {
                    signature_index,
                    argument_count: selector.argument_count(),
                });
            }
        }

        candidates.retain(|c| c.argument_count == arguments.len());
        let arguments_carry_no_information = arguments
            .iter()
            .all(|a| a.is_missing_type() && !a.is_literal);
        if candidates.is_empty() || (!arguments.is_empty() && arguments_carry_no_information) {
            return None;
        }

        // Exact-match pass: only meaningful when every argument has a
        // concrete type.
        if arguments.iter().all(|a| !a.is_missing_type()) {
            for candidate in &candidates {
                let params = &signatures[candidate.signature_index].parameters;
                let all_match = arguments.iter().zip(params).all(|(argument, parameter)| {
                    let ty = argument.ty.as_ref().expect("checked non-missing");
                    types.types_match(ty, &parameter.ty, false)
                });
                if all_match {
                    return Some(candidate.signature_index);
                }
            }
        }

        // Nullability-ignoring elimination with literal promotion.
        let mut remaining = candidates;
        loop {
            let before = remaining.len();
            for index in 0..arguments.len() {
                if remaining.len() <= 1 {
                    break;
                }
                let argument = &arguments[index];
                if argument.is_missing_type() && !argument.is_literal {
                    continue;
                }
                remaining.retain(|candidate| {
                    let parameter =
                        &signatures[candidate.signature_index].parameters[index].ty;
                    argument_fits(types, argument, parameter)
                });
            }
            if remaining.len() <= 1 || remaining.len() == before {
                break;
            }
        }

        remaining.first().map(|c| c.signature_index)
    }
}

/// One argument-vs-parameter test for the elimination pass.
fn argument_fits(types: &dyn TypeSystem, argument: &OverloadArgument, parameter: &SwiftType) -> bool {
    let parameter_core = parameter.deep_unwrapped();

    // Literal promotion: integer literals take any numeric parameter;
    // float literals never take integer parameters.
    if argument.is_literal {
        match argument.literal_kind {
            Some(LiteralKind::Integer) => {
                if types.is_numeric(parameter_core) {
                    return true;
                }
            }
            Some(LiteralKind::Float) => {
                if types.is_float(parameter_core) {
                    return true;
                }
                if types.is_integer(parameter_core) {
                    return false;
                }
            }
            _ => {}
        }
    }

    match &argument.ty {
        Some(ty) if !ty.is_error() => {
            types.is_assignable(ty.deep_unwrapped(), parameter_core)
        }
        // Untyped literal of a kind the promotion rules don't cover:
        // keep the candidate alive.
        _ => true,
    }
}
