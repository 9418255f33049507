//! Swift declaration emission.
//!
//! One output file per input file: every intention whose home is the file
//! being emitted renders here, in graph order — preprocessor echo first,
//! then type aliases, enums, structs, protocols, globals, functions,
//! classes, extensions.

use swiftward_ast::{StmtId, SwiftAst};
use swiftward_core::utils::decapitalized;
use swiftward_core::{FunctionSignature, Ownership};

use super::exprs::ExprPrinter;
use super::writer::SourceWriter;
use crate::analyze::intentions::{
    AccessLevel, ClassIntention, EnumIntention, ExtensionIntention, IntentionGraph,
    PropertyIntention, ProtocolIntention, StructIntention,
};
use crate::sources::SourceId;

/// Emits the Swift source for one translation unit.
pub struct SwiftEmitter<'a> {
    graph: &'a IntentionGraph,
    asts: &'a [SwiftAst],
    source: SourceId,
    out: SourceWriter,
}

impl<'a> SwiftEmitter<'a> {
    pub fn new(graph: &'a IntentionGraph, asts: &'a [SwiftAst], source: SourceId) -> Self {
        Self {
            graph,
            asts,
            source,
            out: SourceWriter::new(),
        }
    }

    fn printer_for(&self, source: SourceId) -> ExprPrinter<'a> {
        ExprPrinter::new(&self.asts[source.index()])
    }

    pub fn emit(mut self) -> String {
        self.emit_preprocessor_echo();

        let typedefs: Vec<_> = self
            .graph
            .typedefs()
            .filter(|t| t.home == self.source)
            .cloned()
            .collect();
        for typedef in &typedefs {
            self.out.blank_line();
            self.out
                .line(&format!("typealias {} = {}", typedef.name, typedef.swift_type));
        }

        let enums: Vec<_> = self
            .graph
            .enums()
            .filter(|e| e.home == self.source)
            .cloned()
            .collect();
        for decl in &enums {
            self.out.blank_line();
            self.emit_enum(decl);
        }

        let structs: Vec<_> = self
            .graph
            .structs()
            .filter(|s| s.home == self.source)
            .cloned()
            .collect();
        for decl in &structs {
            self.out.blank_line();
            self.emit_struct(decl);
        }

        let protocols: Vec<_> = self
            .graph
            .protocols()
            .filter(|p| p.home == self.source)
            .cloned()
            .collect();
        for decl in &protocols {
            self.out.blank_line();
            self.emit_protocol(decl);
        }

        let globals: Vec<_> = self
            .graph
            .global_vars()
            .filter(|v| v.home == self.source)
            .cloned()
            .collect();
        for decl in &globals {
            self.out.blank_line();
            let keyword = if decl.is_constant { "let" } else { "var" };
            let initializer = decl
                .initializer
                .and_then(|stmt| {
                    let ast = &self.asts[decl.source_ref.source.index()];
                    match ast.stmt_kind(stmt) {
                        swiftward_ast::StmtKind::Expressions(exprs) => exprs.first().copied(),
                        _ => None,
                    }
                })
                .map(|init| format!(" = {}", self.printer_for(decl.source_ref.source).render(init)))
                .unwrap_or_default();
            self.out.line(&format!(
                "{}{keyword} {}: {}{initializer}",
                access_prefix(decl.access),
                decl.name,
                decl.swift_type
            ));
        }

        let functions: Vec<_> = self
            .graph
            .global_funcs()
            .filter(|f| f.home == self.source)
            .cloned()
            .collect();
        for decl in &functions {
            self.out.blank_line();
            let header = format!(
                "{}func {}",
                access_prefix(decl.access),
                signature_text(&decl.signature)
            );
            self.emit_braced(&header, decl.body, decl.source_ref.source);
        }

        let classes: Vec<_> = self
            .graph
            .classes()
            .filter(|c| c.home == self.source)
            .cloned()
            .collect();
        for decl in &classes {
            self.out.blank_line();
            self.emit_class(&decl);
        }

        let extensions: Vec<_> = self
            .graph
            .extensions()
            .filter(|e| e.home == self.source)
            .cloned()
            .collect();
        for decl in &extensions {
            self.out.blank_line();
            self.emit_extension(&decl);
        }

        self.out.finish()
    }

    fn emit_preprocessor_echo(&mut self) {
        let Some(record) = self.graph.files.iter().find(|f| f.source == self.source) else {
            return;
        };
        if record.preprocessor_directives.is_empty() {
            return;
        }
        self.out.line("// Preprocessor directives found in file:");
        for directive in &record.preprocessor_directives {
            self.out.line(&format!("// {directive}"));
        }
    }

    fn emit_enum(&mut self, decl: &EnumIntention) {
        let printer = self.printer_for(decl.home);
        if decl.is_option_set {
            self.out
                .line(&format!("struct {}: OptionSet {{", decl.name));
            self.out.indent();
            self.out.line(&format!("let rawValue: {}", decl.raw_type));
            self.out.blank_line();
            for case in &decl.cases {
                let name = case_name(&decl.name, &case.name);
                match case.value {
                    Some(value) => self.out.line(&format!(
                        "static let {name} = {}(rawValue: {})",
                        decl.name,
                        printer.render(value)
                    )),
                    None => self.out.line(&format!(
                        "static let {name} = {}(rawValue: 0)",
                        decl.name
                    )),
                }
            }
            self.out.dedent();
            self.out.line("}");
        } else {
            self.out
                .line(&format!("enum {}: {} {{", decl.name, decl.raw_type));
            self.out.indent();
            for case in &decl.cases {
                let name = case_name(&decl.name, &case.name);
                match case.value {
                    Some(value) => self
                        .out
                        .line(&format!("case {name} = {}", printer.render(value))),
                    None => self.out.line(&format!("case {name}")),
                }
            }
            self.out.dedent();
            self.out.line("}");
        }
    }

    fn emit_struct(&mut self, decl: &StructIntention) {
        self.out.line(&format!("struct {} {{", decl.name));
        self.out.indent();
        for field in &decl.fields {
            self.out
                .line(&format!("var {}: {}", field.name, field.swift_type));
        }
        self.out.dedent();
        self.out.line("}");
    }

    fn emit_protocol(&mut self, decl: &ProtocolIntention) {
        let inheritance = if decl.protocols.is_empty() {
            String::new()
        } else {
            format!(": {}", decl.protocols.join(", "))
        };
        self.out.line(&format!("protocol {}{inheritance} {{", decl.name));
        self.out.indent();
        for property in &decl.properties {
            let accessors = if property.is_readonly {
                "{ get }"
            } else {
                "{ get set }"
            };
            self.out.line(&format!(
                "var {}: {} {accessors}",
                property.name, property.swift_type
            ));
        }
        let mut wrote_optional_marker = false;
        for method in decl.methods.iter().filter(|m| !m.is_optional) {
            self.out
                .line(&format!("func {}", signature_text(&method.signature)));
        }
        for method in decl.methods.iter().filter(|m| m.is_optional) {
            if !wrote_optional_marker {
                self.out.blank_line();
                self.out.line("// optional");
                wrote_optional_marker = true;
            }
            self.out
                .line(&format!("func {}", signature_text(&method.signature)));
        }
        self.out.dedent();
        self.out.line("}");
    }

    fn emit_class(&mut self, decl: &ClassIntention) {
        let mut inheritance: Vec<String> = Vec::new();
        if let Some(superclass) = &decl.superclass {
            inheritance.push(superclass.clone());
        }
        inheritance.extend(decl.protocols.iter().cloned());
        let inheritance = if inheritance.is_empty() {
            String::new()
        } else {
            format!(": {}", inheritance.join(", "))
        };

        self.out.line(&format!(
            "{}class {}{inheritance} {{",
            access_prefix(decl.access),
            decl.name
        ));
        self.out.indent();

        for ivar in &decl.ivars {
            let ownership = ownership_prefix(ivar.ownership);
            self.out.line(&format!(
                "{}{ownership}var {}: {}",
                access_prefix(ivar.access),
                ivar.name,
                ivar.swift_type
            ));
        }
        for property in &decl.properties {
            self.emit_property(property);
        }

        for init in &decl.inits {
            self.out.blank_line();
            let params = parameters_text(&init.signature);
            let header = format!("{}init({params})", access_prefix(init.access));
            self.emit_braced(&header, init.body, init.source_ref.source);
        }

        if let Some(deinit) = &decl.deinit {
            self.out.blank_line();
            self.emit_braced("deinit", deinit.body, deinit.source_ref.source);
        }

        for method in &decl.methods {
            self.out.blank_line();
            let is_static = if method.signature.is_static {
                "static "
            } else {
                ""
            };
            let header = format!(
                "{}{is_static}func {}",
                access_prefix(method.access),
                signature_text(&method.signature)
            );
            self.emit_braced(&header, method.body, method.source_ref.source);
        }

        self.out.dedent();
        self.out.line("}");
    }

    fn emit_property(&mut self, property: &PropertyIntention) {
        let ownership = ownership_prefix(property.ownership);
        let setter = if property.is_readonly {
            "private(set) "
        } else {
            ""
        };
        self.out.line(&format!(
            "{}{setter}{ownership}var {}: {}",
            access_prefix(property.access),
            property.name,
            property.swift_type
        ));
    }

    fn emit_extension(&mut self, decl: &ExtensionIntention) {
        self.out
            .line(&format!("extension {} {{", decl.class_name));
        self.out.indent();
        if !decl.category_name.is_empty() {
            self.out.line(&format!("// MARK: - {}", decl.category_name));
        }
        for property in &decl.properties {
            self.emit_property(property);
        }
        for method in &decl.methods {
            self.out.blank_line();
            let header = format!(
                "func {}",
                signature_text(&method.signature)
            );
            self.emit_braced(&header, method.body, method.source_ref.source);
        }
        self.out.dedent();
        self.out.line("}");
    }

    /// Emits `header { body }`, with an empty body when no statements came
    /// from the source.
    fn emit_braced(&mut self, header: &str, body: Option<StmtId>, body_source: SourceId) {
        match body {
            Some(body) => {
                let printer = self.printer_for(body_source);
                let block = printer.render_block(body, 0);
                self.out.line(&format!("{header} {block}"));
            }
            None => {
                self.out.line(&format!("{header} {{"));
                self.out.line("}");
            }
        }
    }
}

fn access_prefix(access: AccessLevel) -> String {
    let keyword = access.keyword();
    if keyword.is_empty() {
        String::new()
    } else {
        format!("{keyword} ")
    }
}

fn ownership_prefix(ownership: Ownership) -> String {
    match ownership {
        Ownership::Strong => String::new(),
        other => format!("{} ", other.keyword()),
    }
}

/// `name(label name: T, _ name: T) -> R` rendering of a signature; a
/// `Void` or unresolved return renders bare.
fn signature_text(signature: &FunctionSignature) -> String {
    let params = parameters_text(signature);
    let mut out = format!("{}({params})", signature.name);
    if !signature.return_type.is_void() && !signature.return_type.is_error() {
        out.push_str(&format!(" -> {}", signature.return_type));
    }
    out
}

fn parameters_text(signature: &FunctionSignature) -> String {
    signature
        .parameters
        .iter()
        .map(|parameter| {
            let ty = &parameter.ty;
            match &parameter.label {
                Some(label) if *label == parameter.name => format!("{}: {ty}", parameter.name),
                Some(label) => format!("{label} {}: {ty}", parameter.name),
                None => format!("_ {}: {ty}", parameter.name),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `ShapeKindCircle` → `circle` under enum `ShapeKind`.
fn case_name(enum_name: &str, case: &str) -> String {
    let stripped = case.strip_prefix(enum_name).unwrap_or(case);
    let stripped = stripped.trim_start_matches('_');
    if stripped.is_empty() {
        decapitalized(case)
    } else {
        decapitalized(stripped)
    }
}
