//! Type queries over the intention graph.
//!
//! The rewrite passes consult types through the [`TypeSystem`] trait so unit
//! tests can drive them with a stub. [`IntentionTypeSystem`] answers against
//! the linked graph with hierarchical lookup: class, then superclass chain,
//! then conformed protocols.

use swiftward_core::{FunctionSignature, SwiftType};

use crate::analyze::intentions::{ClassIntention, IntentionGraph};

pub trait TypeSystem {
    /// Whether a value of `from` can stand where `to` is expected.
    fn is_assignable(&self, from: &SwiftType, to: &SwiftType) -> bool;

    /// Structural equality; optional wrapping is ignored only when
    /// `ignore_nullability` is set.
    fn types_match(&self, a: &SwiftType, b: &SwiftType, ignore_nullability: bool) -> bool {
        if ignore_nullability {
            a.deep_unwrapped().normalized() == b.deep_unwrapped().normalized()
        } else {
            a.normalized() == b.normalized()
        }
    }

    fn is_numeric(&self, ty: &SwiftType) -> bool {
        ty.is_numeric()
    }

    fn is_integer(&self, ty: &SwiftType) -> bool {
        ty.is_integer()
    }

    fn is_float(&self, ty: &SwiftType) -> bool {
        ty.is_float()
    }

    /// Type of a field/property access on `receiver`, if known.
    fn member_type(&self, receiver: &SwiftType, member: &str) -> Option<SwiftType>;

    /// Candidate methods named `name` on `receiver` (instance position).
    fn method_signatures(&self, receiver: &SwiftType, name: &str) -> Vec<FunctionSignature>;

    /// Candidate free functions named `name`.
    fn function_signatures(&self, name: &str) -> Vec<FunctionSignature>;

    /// Type of a bare identifier: globals, enum/class references.
    fn identifier_type(&self, name: &str) -> Option<SwiftType>;
}

/// Type system answering against a frozen [`IntentionGraph`].
pub struct IntentionTypeSystem<'g> {
    graph: &'g IntentionGraph,
}

impl<'g> IntentionTypeSystem<'g> {
    pub fn new(graph: &'g IntentionGraph) -> Self {
        Self { graph }
    }

    /// The class chain starting at `name`, following superclasses.
    fn class_chain(&self, name: &str) -> Vec<&'g ClassIntention> {
        let mut chain = Vec::new();
        let mut current = self.graph.class(name);
        // Graphs from source can contain inheritance cycles; bound the walk.
        while let Some(class) = current {
            if chain.iter().any(|c: &&ClassIntention| c.name == class.name) {
                break;
            }
            chain.push(class);
            current = class.superclass.as_deref().and_then(|s| self.graph.class(s));
        }
        chain
    }

    fn conforms_to(&self, class_name: &str, protocol_name: &str) -> bool {
        for class in self.class_chain(class_name) {
            for conformed in &class.protocols {
                if conformed == protocol_name
                    || self.protocol_inherits(conformed, protocol_name)
                {
                    return true;
                }
            }
        }
        false
    }

    fn protocol_inherits(&self, protocol_name: &str, target: &str) -> bool {
        // Iterative walk with a seen list; protocol graphs from source can
        // contain cycles.
        let mut pending = vec![protocol_name];
        let mut seen: Vec<&str> = Vec::new();
        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            if let Some(protocol) = self.graph.protocol(current) {
                pending.extend(protocol.protocols.iter().map(String::as_str));
            }
        }
        false
    }

    fn is_subclass_of(&self, name: &str, ancestor: &str) -> bool {
        self.class_chain(name).iter().any(|c| c.name == ancestor)
    }

    /// Methods named `name` declared by a protocol or anything it inherits.
    fn protocol_methods_named(
        &self,
        protocol_name: &str,
        name: &str,
        out: &mut Vec<swiftward_core::FunctionSignature>,
    ) {
        let mut pending = vec![protocol_name];
        let mut seen: Vec<&str> = Vec::new();
        while let Some(current) = pending.pop() {
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            let Some(protocol) = self.graph.protocol(current) else {
                continue;
            };
            for method in &protocol.methods {
                if method.signature.name == name {
                    out.push(method.signature.clone());
                }
            }
            pending.extend(protocol.protocols.iter().map(String::as_str));
        }
    }
}

impl TypeSystem for IntentionTypeSystem<'_> {
    fn is_assignable(&self, from: &SwiftType, to: &SwiftType) -> bool {
        let from = from.normalized();
        let to = to.normalized();

        if from.is_error() || to.is_error() {
            return false;
        }
        if from == to {
            return true;
        }
        // `T` fits anywhere `T?` / `T!` is expected.
        if to.is_optional() {
            return self.is_assignable(&from, to.unwrapped());
        }
        // An IUO source fits its unwrapped target.
        if let SwiftType::ImplicitlyUnwrappedOptional(inner) = &from {
            return self.is_assignable(inner, &to);
        }

        let (Some(from_name), Some(to_name)) = (
            from.as_nominal().map(|n| n.name().to_string()),
            to.as_nominal().map(|n| n.name().to_string()),
        ) else {
            return false;
        };

        if to_name == "AnyObject" {
            return self.graph.class(&from_name).is_some()
                || self.graph.protocol(&from_name).is_some();
        }
        if self.is_subclass_of(&from_name, &to_name) {
            return true;
        }
        if self.graph.protocol(&to_name).is_some() {
            return self.conforms_to(&from_name, &to_name)
                || self.protocol_inherits(&from_name, &to_name);
        }
        false
    }

    fn member_type(&self, receiver: &SwiftType, member: &str) -> Option<SwiftType> {
        let nominal = receiver.as_nominal()?;
        let name = nominal.name();

        for class in self.class_chain(name) {
            if let Some(property) = class.properties.iter().find(|p| p.name == member) {
                return Some(property.swift_type.clone());
            }
            if let Some(ivar) = class.ivars.iter().find(|v| v.name == member) {
                return Some(ivar.swift_type.clone());
            }
            for extension in self.graph.extensions_of(&class.name) {
                if let Some(property) = extension.properties.iter().find(|p| p.name == member) {
                    return Some(property.swift_type.clone());
                }
            }
        }

        if let Some(structure) = self.graph.struct_intention(name) {
            if let Some(field) = structure.fields.iter().find(|f| f.name == member) {
                return Some(field.swift_type.clone());
            }
        }

        if let Some(protocol) = self.graph.protocol(name) {
            if let Some(property) = protocol.properties.iter().find(|p| p.name == member) {
                return Some(property.swift_type.clone());
            }
        }

        // `EnumName.case`
        if let Some(enum_intention) = self.graph.enum_intention(name) {
            if enum_intention.cases.iter().any(|c| c.name == member) {
                return Some(SwiftType::type_name(&enum_intention.name));
            }
        }

        None
    }

    fn method_signatures(&self, receiver: &SwiftType, name: &str) -> Vec<FunctionSignature> {
        let Some(nominal) = receiver.as_nominal() else {
            return Vec::new();
        };
        let mut signatures = Vec::new();

        for class in self.class_chain(nominal.name()) {
            for method in &class.methods {
                if method.signature.name == name {
                    signatures.push(method.signature.clone());
                }
            }
            for extension in self.graph.extensions_of(&class.name) {
                for method in &extension.methods {
                    if method.signature.name == name {
                        signatures.push(method.signature.clone());
                    }
                }
            }
            for protocol_name in &class.protocols {
                self.protocol_methods_named(protocol_name, name, &mut signatures);
            }
        }

        self.protocol_methods_named(nominal.name(), name, &mut signatures);

        signatures
    }

    fn function_signatures(&self, name: &str) -> Vec<FunctionSignature> {
        self.graph
            .global_func(name)
            .map(|f| vec![f.signature.clone()])
            .unwrap_or_default()
    }

    fn identifier_type(&self, name: &str) -> Option<SwiftType> {
        if let Some(var) = self.graph.global_var(name) {
            return Some(var.swift_type.clone());
        }
        if self.graph.class(name).is_some()
            || self.graph.enum_intention(name).is_some()
            || self.graph.struct_intention(name).is_some()
        {
            return Some(SwiftType::metatype(SwiftType::type_name(name)));
        }
        if let Some(typedef) = self.graph.typedef(name) {
            return Some(SwiftType::metatype(typedef.swift_type.clone()));
        }
        None
    }
}

/// Structural-rules-only type system for unit tests: no graph, so
/// assignability is equality modulo optionals.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubTypeSystem;

impl TypeSystem for StubTypeSystem {
    fn is_assignable(&self, from: &SwiftType, to: &SwiftType) -> bool {
        let from = from.normalized();
        let to = to.normalized();
        if from.is_error() || to.is_error() {
            return false;
        }
        if from == to {
            return true;
        }
        if to.is_optional() {
            return self.is_assignable(&from, to.unwrapped());
        }
        if let SwiftType::ImplicitlyUnwrappedOptional(inner) = &from {
            return self.is_assignable(inner, &to);
        }
        false
    }

    fn member_type(&self, _receiver: &SwiftType, _member: &str) -> Option<SwiftType> {
        None
    }

    fn method_signatures(&self, _receiver: &SwiftType, _name: &str) -> Vec<FunctionSignature> {
        Vec::new()
    }

    fn function_signatures(&self, _name: &str) -> Vec<FunctionSignature> {
        Vec::new()
    }

    fn identifier_type(&self, _name: &str) -> Option<SwiftType> {
        None
    }
}
