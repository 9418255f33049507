//! Intention collection: one walk per file over the CST.

use rowan::TextRange;
use swiftward_ast::SwiftAst;
use swiftward_core::utils::init_label_from_keyword;
use swiftward_core::{
    FunctionSignature, ObjcType, Ownership, ParameterSignature, SelectorSignature, SwiftType,
};

use crate::analyze::intentions::{
    AccessLevel, ClassIntention, DeinitIntention, EnumCaseIntention, EnumIntention,
    ExtensionIntention, FieldIntention, FileIntentions, GlobalFuncIntention, GlobalVarIntention,
    IVarIntention, InitIntention, MethodIntention, PropertyIntention, SourceRef, StructIntention,
    TypedefIntention,
};
use crate::analyze::nullability::NullabilityRegions;
use crate::analyze::objc_types::lower_type_node;
use crate::analyze::type_mapper::{map_type, MapContext};
use crate::lower::{lower_compound, lower_expr, LowerCtx};
use crate::parser::ast::{
    FunctionDecl, GlobalVarDecl, InterfaceDecl, MethodDecl, PropertyDecl, Root, TypeNode,
};
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::sources::SourceId;

/// Collects one file's intentions, lowering bodies into `arena`.
pub fn collect_file(
    root: &Root,
    source: SourceId,
    path: &str,
    arena: &mut SwiftAst,
) -> FileIntentions {
    let regions = NullabilityRegions::scan(root.as_cst());
    let mut collector = Collector {
        source,
        regions,
        arena,
    };

    let mut file = FileIntentions {
        source,
        path: path.to_string(),
        preprocessor_directives: root.preprocessor_lines(),
        ..FileIntentions::default()
    };

    for interface in root.interfaces() {
        match interface.category() {
            // Named categories become extensions; the primary interface and
            // anonymous class extensions both merge into the class.
            Some(category) if !category.is_empty() => {
                file.extensions
                    .push(collector.collect_category(&interface, category));
            }
            _ => file.classes.push(collector.collect_interface(&interface)),
        }
    }

    for implementation in root.implementations() {
        let name = implementation
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        match implementation.category() {
            Some(category) if !category.is_empty() => {
                file.extensions.push(collector.collect_category_impl(
                    &implementation,
                    name,
                    category,
                ));
            }
            _ => {
                file.implementations
                    .push(collector.collect_implementation(&implementation, name));
            }
        }
    }

    for protocol in root.protocols() {
        if protocol.is_forward() {
            continue;
        }
        file.protocols.push(collector.collect_protocol(&protocol));
    }

    for decl in root.enums() {
        file.enums.push(collector.collect_enum(&decl));
    }
    for decl in root.structs() {
        file.structs.push(collector.collect_struct(&decl));
    }
    for decl in root.typedefs() {
        if let Some(intention) = collector.collect_typedef(&decl) {
            file.typedefs.push(intention);
        }
    }
    for decl in root.global_vars() {
        if let Some(intention) = collector.collect_global_var(&decl) {
            file.global_vars.push(intention);
        }
    }
    for decl in root.functions() {
        if let Some(intention) = collector.collect_function(&decl) {
            file.global_funcs.push(intention);
        }
    }

    // `static` declarations nested in class scope are still globals.
    for interface in root.interfaces() {
        for decl in interface.global_vars() {
            if let Some(intention) = collector.collect_global_var(&decl) {
                file.global_vars.push(intention);
            }
        }
    }
    for implementation in root.implementations() {
        for decl in implementation.global_vars() {
            if let Some(intention) = collector.collect_global_var(&decl) {
                file.global_vars.push(intention);
            }
        }
        for decl in implementation.functions() {
            if let Some(intention) = collector.collect_function(&decl) {
                file.global_funcs.push(intention);
            }
        }
    }

    file
}

struct Collector<'a> {
    source: SourceId,
    regions: NullabilityRegions,
    arena: &'a mut SwiftAst,
}

/// What one method declaration turned into.
enum Member {
    Method(MethodIntention),
    Init(InitIntention),
    Deinit(DeinitIntention),
}

impl Collector<'_> {
    fn source_ref(&self, range: TextRange) -> SourceRef {
        SourceRef::new(self.source, range)
    }

    fn in_nonnull(&self, node: &SyntaxNode) -> bool {
        self.regions.contains(node.text_range().start())
    }

    fn map_ctx<'s>(&self, node: &SyntaxNode, self_type: Option<&'s str>) -> MapContext<'s> {
        MapContext {
            in_nonnull_region: self.in_nonnull(node),
            self_type,
        }
    }

    fn collect_interface(&mut self, interface: &InterfaceDecl) -> ClassIntention {
        let name = interface
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let mut class = ClassIntention {
            superclass: interface.superclass().map(|t| t.text().to_string()),
            protocols: interface.protocol_refs(),
            access: AccessLevel::Internal,
            source_ref: self.source_ref(interface.as_cst().text_range()),
            in_nonnull_context: self.in_nonnull(interface.as_cst()),
            ivars: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            inits: Vec::new(),
            deinit: None,
            home: self.source,
            name,
        };

        if let Some(block) = interface.ivar_block() {
            class.ivars = self.collect_ivars(&block);
        }
        for property in interface.properties() {
            let class_name = class.name.clone();
            class
                .properties
                .push(self.collect_property(&property, Some(&class_name)));
        }
        for method in interface.methods() {
            let class_name = class.name.clone();
            let member = self.collect_method_intention(&method, &class_name);
            push_member(&mut class, member);
        }
        class
    }

    fn collect_implementation(
        &mut self,
        implementation: &crate::parser::ast::ImplementationDecl,
        name: String,
    ) -> ClassIntention {
        let mut class = ClassIntention {
            superclass: None,
            protocols: Vec::new(),
            access: AccessLevel::Internal,
            source_ref: self.source_ref(implementation.as_cst().text_range()),
            in_nonnull_context: self.in_nonnull(implementation.as_cst()),
            ivars: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            inits: Vec::new(),
            deinit: None,
            home: self.source,
            name,
        };

        for method in implementation.methods() {
            let class_name = class.name.clone();
            let member = self.collect_method_intention(&method, &class_name);
            push_member(&mut class, member);
        }
        class
    }

    fn collect_category(
        &mut self,
        interface: &InterfaceDecl,
        category: String,
    ) -> ExtensionIntention {
        let class_name = interface
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let mut extension = ExtensionIntention {
            category_name: category,
            access: AccessLevel::Internal,
            source_ref: self.source_ref(interface.as_cst().text_range()),
            in_nonnull_context: self.in_nonnull(interface.as_cst()),
            properties: Vec::new(),
            methods: Vec::new(),
            home: self.source,
            class_name,
        };
        for property in interface.properties() {
            let class_name = extension.class_name.clone();
            extension
                .properties
                .push(self.collect_property(&property, Some(&class_name)));
        }
        for method in interface.methods() {
            let class_name = extension.class_name.clone();
            if let Member::Method(m) = self.collect_method_intention(&method, &class_name) {
                extension.methods.push(m);
            }
        }
        extension
    }

    fn collect_category_impl(
        &mut self,
        implementation: &crate::parser::ast::ImplementationDecl,
        class_name: String,
        category: String,
    ) -> ExtensionIntention {
        let mut extension = ExtensionIntention {
            category_name: category,
            access: AccessLevel::Internal,
            source_ref: self.source_ref(implementation.as_cst().text_range()),
            in_nonnull_context: self.in_nonnull(implementation.as_cst()),
            properties: Vec::new(),
            methods: Vec::new(),
            home: self.source,
            class_name,
        };
        for method in implementation.methods() {
            let class_name = extension.class_name.clone();
            if let Member::Method(m) = self.collect_method_intention(&method, &class_name) {
                extension.methods.push(m);
            }
        }
        extension
    }

    fn collect_protocol(
        &mut self,
        protocol: &crate::parser::ast::ProtocolDecl,
    ) -> crate::analyze::intentions::ProtocolIntention {
        let name = protocol
            .name()
            .map(|t| t.text().to_string())
            .unwrap_or_default();
        let mut intention = crate::analyze::intentions::ProtocolIntention {
            protocols: protocol.protocol_refs(),
            access: AccessLevel::Internal,
            source_ref: self.source_ref(protocol.as_cst().text_range()),
            in_nonnull_context: self.in_nonnull(protocol.as_cst()),
            properties: Vec::new(),
            methods: Vec::new(),
            home: self.source,
            name,
        };

        // `@optional` / `@required` section state applies to the members
        // that follow, in declaration order.
        let mut optional = false;
        for element in protocol.as_cst().children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(token) => match token.kind() {
                    SyntaxKind::AtOptional => optional = true,
                    SyntaxKind::AtRequired => optional = false,
                    _ => {}
                },
                rowan::NodeOrToken::Node(node) => match node.kind() {
                    SyntaxKind::MethodDecl => {
                        if let Some(decl) = MethodDecl::cast(node) {
                            let protocol_name = intention.name.clone();
                            if let Member::Method(mut m) =
                                self.collect_method_intention(&decl, &protocol_name)
                            {
                                m.is_optional = optional;
                                intention.methods.push(m);
                            }
                        }
                    }
                    SyntaxKind::PropertyDecl => {
                        if let Some(decl) = PropertyDecl::cast(node) {
                            let protocol_name = intention.name.clone();
                            intention
                                .properties
                                .push(self.collect_property(&decl, Some(&protocol_name)));
                        }
                    }
                    _ => {}
                },
            }
        }
        intention
    }

    fn collect_ivars(&mut self, block: &SyntaxNode) -> Vec<IVarIntention> {
        let mut access = AccessLevel::Private;
        let mut ivars = Vec::new();

        for element in block.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(token) => match token.kind() {
                    SyntaxKind::AtPrivate => access = AccessLevel::Private,
                    SyntaxKind::AtPublic => access = AccessLevel::Public,
                    SyntaxKind::AtProtected | SyntaxKind::AtPackage => {
                        access = AccessLevel::Internal
                    }
                    _ => {}
                },
                rowan::NodeOrToken::Node(node) if node.kind() == SyntaxKind::IvarDecl => {
                    let Some(decl) = crate::parser::ast::IvarDecl::cast(node.clone()) else {
                        continue;
                    };
                    let Some(type_node) = decl.type_node() else {
                        continue;
                    };
                    let objc = self.fixed_array_adjusted(&node, lower_type_node(type_node.as_cst()));
                    let in_nonnull = self.in_nonnull(&node);
                    let ownership = ownership_from_qualifiers(&objc);
                    let ctx = MapContext {
                        in_nonnull_region: in_nonnull,
                        self_type: None,
                    };
                    let swift = adjust_for_ownership(map_type(&objc, ctx), ownership);
                    for name in decl.names() {
                        ivars.push(IVarIntention {
                            name,
                            swift_type: swift.clone(),
                            objc_type: objc.clone(),
                            ownership,
                            access,
                            source_ref: self.source_ref(node.text_range()),
                            in_nonnull_context: in_nonnull,
                        });
                    }
                }
                _ => {}
            }
        }
        ivars
    }

    fn fixed_array_adjusted(&self, decl: &SyntaxNode, objc: ObjcType) -> ObjcType {
        let mut length = None;
        let mut saw_bracket = false;
        for token in decl.children_with_tokens().filter_map(|e| e.into_token()) {
            match token.kind() {
                SyntaxKind::BracketOpen => saw_bracket = true,
                SyntaxKind::IntNumber if saw_bracket => {
                    length = token.text().parse::<usize>().ok();
                }
                _ => {}
            }
        }
        match length {
            Some(length) => ObjcType::FixedArray(Box::new(objc), length),
            None => objc,
        }
    }

    fn collect_property(
        &mut self,
        property: &PropertyDecl,
        self_type: Option<&str>,
    ) -> PropertyIntention {
        let node = property.as_cst();
        let mut objc = property
            .type_node()
            .map(|t| lower_type_node(t.as_cst()))
            .unwrap_or(ObjcType::Void);
        // Block-typed properties name themselves inside the declarator.
        let name = property
            .name()
            .map(|t| t.text().to_string())
            .or_else(|| match objc.unqualified() {
                ObjcType::Block { name, .. } | ObjcType::FunctionPointer { name, .. } => {
                    name.clone()
                }
                _ => None,
            })
            .unwrap_or_default();

        let attributes = property.attributes();
        let mut ownership = Ownership::Strong;
        let mut is_readonly = false;
        let mut getter_name = None;
        let mut setter_name = None;
        let mut attr_nullability: Option<&str> = None;

        for attribute in &attributes {
            match attribute.name.as_str() {
                "weak" => ownership = Ownership::Weak,
                "assign" | "unsafe_unretained" => {
                    if objc.is_pointer() {
                        ownership = Ownership::UnownedUnsafe;
                    }
                }
                "readonly" => is_readonly = true,
                "getter" => getter_name = attribute.value.clone(),
                "setter" => setter_name = attribute.value.clone(),
                "nullable" => attr_nullability = Some("nullable"),
                "nonnull" => attr_nullability = Some("nonnull"),
                _ => {}
            }
        }

        if let Some(qual) = attr_nullability {
            objc = ObjcType::qualified(objc, [qual.to_string()]).normalized();
        }

        let in_nonnull = self.in_nonnull(node);
        let ctx = MapContext {
            in_nonnull_region: in_nonnull,
            self_type,
        };
        let swift = adjust_for_ownership(map_type(&objc, ctx), ownership);

        PropertyIntention {
            name,
            swift_type: swift,
            objc_type: objc,
            ownership,
            is_readonly,
            getter_name,
            setter_name: setter_name.map(|s| s.trim_end_matches(':').to_string()),
            access: AccessLevel::Internal,
            source_ref: self.source_ref(node.text_range()),
            in_nonnull_context: in_nonnull,
        }
    }

    fn collect_method_intention(&mut self, method: &MethodDecl, self_type: &str) -> Member {
        let node = method.as_cst();
        let in_nonnull = self.in_nonnull(node);
        let ctx = MapContext {
            in_nonnull_region: in_nonnull,
            self_type: Some(self_type),
        };
        let lower_ctx = LowerCtx { map_ctx: ctx };

        let is_static = method.is_class_method();
        let pieces = method.selector_pieces();
        let first_name = pieces
            .first()
            .and_then(|p| p.name())
            .unwrap_or_default();

        let return_objc = method
            .return_type()
            .map(|t| lower_type_node(t.as_cst()))
            .unwrap_or(ObjcType::id());

        let mut has_annotations = has_nullability_annotations(&return_objc);
        let mut parameters = Vec::new();
        let mut keywords = vec![Some(first_name.clone())];
        for (index, piece) in pieces.iter().enumerate() {
            if index > 0 {
                keywords.push(piece.name());
            }
            if !piece.has_parameter() {
                continue;
            }
            let objc = piece
                .parameter_type()
                .map(|t: TypeNode| lower_type_node(t.as_cst()))
                .unwrap_or(ObjcType::id());
            has_annotations |= has_nullability_annotations(&objc);
            let param_name = piece
                .parameter_name()
                .or_else(|| piece.name())
                .unwrap_or_default();
            let label = if index == 0 {
                None
            } else {
                piece.name()
            };
            parameters.push(ParameterSignature {
                label,
                name: param_name,
                ty: map_type(&objc, ctx),
                has_default_value: false,
            });
        }

        let selector = SelectorSignature {
            is_static,
            keywords,
        };
        let body = method.body().map(|b| lower_compound(&b, self.arena, &lower_ctx));
        let source_ref = self.source_ref(node.text_range());

        if !is_static && first_name == "dealloc" && parameters.is_empty() {
            return Member::Deinit(DeinitIntention {
                access: AccessLevel::Internal,
                source_ref,
                body,
            });
        }

        if !is_static && (first_name == "init" || first_name.starts_with("initWith")) {
            let mut init_params = parameters;
            if let Some(first) = init_params.first_mut() {
                first.label = init_label_from_keyword(&first_name);
            }
            if let Some(body) = body {
                strip_trailing_return_self(self.arena, body);
            }
            let signature = FunctionSignature::new("init", init_params)
                .with_return_type(SwiftType::type_name(self_type));
            return Member::Init(InitIntention {
                selector,
                signature,
                access: AccessLevel::Internal,
                source_ref,
                in_nonnull_context: in_nonnull,
                body,
            });
        }

        let signature = FunctionSignature::new(first_name, parameters)
            .with_return_type(map_type(&return_objc, ctx))
            .with_static(is_static);

        Member::Method(MethodIntention {
            selector,
            signature,
            is_optional: false,
            has_nullability_annotations: has_annotations,
            access: AccessLevel::Internal,
            source_ref,
            in_nonnull_context: in_nonnull,
            body,
        })
    }

    fn collect_enum(&mut self, decl: &crate::parser::ast::EnumDecl) -> EnumIntention {
        let node = decl.as_cst();
        let raw_type = decl
            .raw_type()
            .map(|t| map_type(&lower_type_node(t.as_cst()), MapContext::default()))
            .unwrap_or_else(SwiftType::int);
        let ctx = LowerCtx::default();

        let cases = decl
            .members()
            .map(|member| EnumCaseIntention {
                name: member
                    .name()
                    .map(|t| t.text().to_string())
                    .unwrap_or_default(),
                value: member.value().map(|v| lower_expr(&v, self.arena, &ctx)),
            })
            .collect();

        EnumIntention {
            name: decl
                .name()
                .map(|t| t.text().to_string())
                .unwrap_or_default(),
            raw_type,
            is_option_set: decl.is_option_set(),
            cases,
            access: AccessLevel::Internal,
            source_ref: self.source_ref(node.text_range()),
            home: self.source,
        }
    }

    fn collect_struct(&mut self, decl: &crate::parser::ast::StructDecl) -> StructIntention {
        let node = decl.as_cst();
        let mut fields = Vec::new();
        for field in decl.fields() {
            let swift = field
                .type_node()
                .map(|t| {
                    map_type(
                        &lower_type_node(t.as_cst()),
                        MapContext {
                            in_nonnull_region: true,
                            self_type: None,
                        },
                    )
                })
                .unwrap_or(SwiftType::Error);
            for name in field.names() {
                fields.push(FieldIntention {
                    name,
                    swift_type: swift.clone(),
                });
            }
        }

        StructIntention {
            name: decl
                .name()
                .map(|t| t.text().to_string())
                .unwrap_or_default(),
            fields,
            access: AccessLevel::Internal,
            source_ref: self.source_ref(node.text_range()),
            home: self.source,
        }
    }

    fn collect_typedef(
        &mut self,
        decl: &crate::parser::ast::TypedefDecl,
    ) -> Option<TypedefIntention> {
        let node = decl.as_cst();
        let name = decl.alias_name()?;
        let objc = decl.type_node().map(|t| lower_type_node(t.as_cst()))?;
        // Aliases name the bare type; nullability belongs to use sites.
        let ctx = MapContext {
            in_nonnull_region: true,
            self_type: None,
        };
        let swift = map_type(&objc, ctx);
        Some(TypedefIntention {
            name,
            objc_type: objc,
            swift_type: swift,
            access: AccessLevel::Internal,
            source_ref: self.source_ref(node.text_range()),
            home: self.source,
        })
    }

    fn collect_global_var(&mut self, decl: &GlobalVarDecl) -> Option<GlobalVarIntention> {
        let node = decl.as_cst();
        let name = decl.name()?.text().to_string();
        let objc = decl
            .type_node()
            .map(|t| lower_type_node(t.as_cst()))
            .unwrap_or(ObjcType::Void);
        let in_nonnull = self.in_nonnull(node);
        let ctx = MapContext {
            in_nonnull_region: in_nonnull,
            self_type: None,
        };
        let lower_ctx = LowerCtx { map_ctx: ctx };
        let is_constant = objc.qualifiers().contains(&"const");
        let initializer = decl.initializer().map(|e| {
            let expr = lower_expr(&e, self.arena, &lower_ctx);
            self.arena.expr_stmt(expr)
        });

        Some(GlobalVarIntention {
            name,
            swift_type: map_type(&objc, ctx),
            objc_type: objc,
            is_constant,
            initializer,
            access: AccessLevel::Internal,
            source_ref: self.source_ref(node.text_range()),
            in_nonnull_context: in_nonnull,
            home: self.source,
        })
    }

    fn collect_function(&mut self, decl: &FunctionDecl) -> Option<GlobalFuncIntention> {
        let node = decl.as_cst();
        let name = decl.name()?.text().to_string();
        let in_nonnull = self.in_nonnull(node);
        let ctx = MapContext {
            in_nonnull_region: in_nonnull,
            self_type: None,
        };
        let lower_ctx = LowerCtx { map_ctx: ctx };

        let parameters = decl
            .params()
            .iter()
            .map(|param| {
                let ty = param
                    .type_node()
                    .map(|t| map_type(&lower_type_node(t.as_cst()), ctx))
                    .unwrap_or(SwiftType::Error);
                let name = param.name().unwrap_or_default();
                ParameterSignature::named(&name, ty)
            })
            .collect();

        let return_type = decl
            .return_type()
            .map(|t| map_type(&lower_type_node(t.as_cst()), ctx))
            .unwrap_or(SwiftType::VOID);

        let body = decl.body().map(|b| lower_compound(&b, self.arena, &lower_ctx));

        Some(GlobalFuncIntention {
            name: name.clone(),
            signature: FunctionSignature::new(name, parameters).with_return_type(return_type),
            access: AccessLevel::Internal,
            source_ref: self.source_ref(node.text_range()),
            in_nonnull_context: in_nonnull,
            body,
            home: self.source,
        })
    }
}

/// Swift initializers cannot return a value; the idiomatic Objective-C
/// trailing `return self;` is dropped on lowering.
fn strip_trailing_return_self(arena: &mut SwiftAst, body: swiftward_ast::StmtId) {
    use swiftward_ast::{ExprKind, StmtKind};

    let StmtKind::Compound(children) = arena.stmt_kind(body) else {
        return;
    };
    let Some(last) = children.last().copied() else {
        return;
    };
    let StmtKind::Return(Some(value)) = arena.stmt_kind(last) else {
        return;
    };
    if !matches!(arena.expr_kind(*value), ExprKind::Identifier(name) if name == "self") {
        return;
    }
    let StmtKind::Compound(children) = &mut arena.stmt_mut(body).kind else {
        return;
    };
    children.pop();
}

fn push_member(class: &mut ClassIntention, member: Member) {
    match member {
        Member::Method(m) => class.methods.push(m),
        Member::Init(i) => class.inits.push(i),
        Member::Deinit(d) => class.deinit = Some(d),
    }
}

fn ownership_from_qualifiers(objc: &ObjcType) -> Ownership {
    let qualifiers = objc.qualifiers();
    if qualifiers.contains(&"__weak") {
        Ownership::Weak
    } else if qualifiers.contains(&"__unsafe_unretained") {
        Ownership::UnownedUnsafe
    } else {
        Ownership::Strong
    }
}

/// Weak references are always optional in Swift, regardless of declared
/// nullability.
fn adjust_for_ownership(swift: SwiftType, ownership: Ownership) -> SwiftType {
    match ownership {
        Ownership::Weak => SwiftType::optional(swift.deep_unwrapped().clone()),
        _ => swift,
    }
}

fn has_nullability_annotations(objc: &ObjcType) -> bool {
    objc.qualifiers().iter().any(|q| {
        matches!(
            *q,
            "_Nonnull"
                | "_Nullable"
                | "_Null_unspecified"
                | "__nonnull"
                | "__nullable"
                | "__null_unspecified"
                | "nonnull"
                | "nullable"
                | "null_unspecified"
        )
    })
}
