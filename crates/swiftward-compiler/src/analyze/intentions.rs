//! The intention graph: source-derived declaration records that outlive
//! parsing and drive emission.
//!
//! # Ownership
//!
//! Intentions are owned by the graph; enclosing relationships are expressed
//! as name lookups (`IntentionGraph::class`, `method.home`), never owning
//! back-pointers, so the graph stays cycle-free and `Send`.
//!
//! # Merging
//!
//! `@interface` and `@implementation` records for one class merge during
//! [`IntentionGraph::build`]: bodies come from the implementation; for a
//! selector declared with nullability annotations in the interface and
//! redeclared without them, the annotated signature wins.

use indexmap::IndexMap;
use rowan::TextRange;
use serde::Serialize;
use swiftward_ast::{ExprId, StmtId};
use swiftward_core::{FunctionSignature, ObjcType, Ownership, SelectorSignature, SwiftType};

use crate::sources::SourceId;

/// Swift access level attached to every intention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AccessLevel {
    Private,
    FilePrivate,
    #[default]
    Internal,
    Public,
    Open,
}

impl AccessLevel {
    /// Declaration-modifier spelling; empty for internal.
    pub fn keyword(self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::FilePrivate => "fileprivate",
            AccessLevel::Internal => "",
            AccessLevel::Public => "public",
            AccessLevel::Open => "open",
        }
    }
}

/// Where an intention came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub source: SourceId,
    #[serde(skip)]
    pub range: TextRange,
}

impl SourceRef {
    pub fn new(source: SourceId, range: TextRange) -> Self {
        Self { source, range }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodIntention {
    pub selector: SelectorSignature,
    pub signature: FunctionSignature,
    pub is_optional: bool,
    /// Any `_Nonnull`/`_Nullable`-family annotation on the return or a
    /// parameter; drives interface-vs-implementation signature merging.
    pub has_nullability_annotations: bool,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    /// Lowered body in the arena of `source_ref.source`'s unit.
    #[serde(skip)]
    pub body: Option<StmtId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitIntention {
    pub selector: SelectorSignature,
    pub signature: FunctionSignature,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    #[serde(skip)]
    pub body: Option<StmtId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeinitIntention {
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    #[serde(skip)]
    pub body: Option<StmtId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyIntention {
    pub name: String,
    pub swift_type: SwiftType,
    pub objc_type: ObjcType,
    pub ownership: Ownership,
    pub is_readonly: bool,
    pub getter_name: Option<String>,
    pub setter_name: Option<String>,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct IVarIntention {
    pub name: String,
    pub swift_type: SwiftType,
    pub objc_type: ObjcType,
    pub ownership: Ownership,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassIntention {
    pub name: String,
    pub superclass: Option<String>,
    pub protocols: Vec<String>,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    pub ivars: Vec<IVarIntention>,
    pub properties: Vec<PropertyIntention>,
    pub methods: Vec<MethodIntention>,
    pub inits: Vec<InitIntention>,
    pub deinit: Option<DeinitIntention>,
    /// The file this class emits into (implementation site when merged).
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtensionIntention {
    pub class_name: String,
    pub category_name: String,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    pub properties: Vec<PropertyIntention>,
    pub methods: Vec<MethodIntention>,
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolIntention {
    pub name: String,
    pub protocols: Vec<String>,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    pub properties: Vec<PropertyIntention>,
    pub methods: Vec<MethodIntention>,
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumCaseIntention {
    pub name: String,
    #[serde(skip)]
    pub value: Option<ExprId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumIntention {
    pub name: String,
    pub raw_type: SwiftType,
    pub is_option_set: bool,
    pub cases: Vec<EnumCaseIntention>,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldIntention {
    pub name: String,
    pub swift_type: SwiftType,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructIntention {
    pub name: String,
    pub fields: Vec<FieldIntention>,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypedefIntention {
    pub name: String,
    pub objc_type: ObjcType,
    pub swift_type: SwiftType,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalVarIntention {
    pub name: String,
    pub swift_type: SwiftType,
    pub objc_type: ObjcType,
    pub is_constant: bool,
    /// Initializer wrapped in an expression statement so the pass pipeline
    /// can rewrite it in place.
    #[serde(skip)]
    pub initializer: Option<StmtId>,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    pub home: SourceId,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalFuncIntention {
    pub name: String,
    pub signature: FunctionSignature,
    pub access: AccessLevel,
    pub source_ref: SourceRef,
    pub in_nonnull_context: bool,
    #[serde(skip)]
    pub body: Option<StmtId>,
    pub home: SourceId,
}

/// Raw per-file collection result, before cross-file linking.
#[derive(Debug, Clone, Default)]
pub struct FileIntentions {
    pub source: SourceId,
    pub path: String,
    pub preprocessor_directives: Vec<String>,
    pub classes: Vec<ClassIntention>,
    /// `@implementation` records, merged into `classes` during linking.
    pub implementations: Vec<ClassIntention>,
    pub extensions: Vec<ExtensionIntention>,
    pub protocols: Vec<ProtocolIntention>,
    pub enums: Vec<EnumIntention>,
    pub structs: Vec<StructIntention>,
    pub typedefs: Vec<TypedefIntention>,
    pub global_vars: Vec<GlobalVarIntention>,
    pub global_funcs: Vec<GlobalFuncIntention>,
}

/// Per-file record kept after linking, for emission ordering.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub source: SourceId,
    pub path: String,
    pub preprocessor_directives: Vec<String>,
}

/// The linked cross-file symbol table.
#[derive(Debug, Clone, Default)]
pub struct IntentionGraph {
    pub files: Vec<FileRecord>,
    classes: IndexMap<String, ClassIntention>,
    protocols: IndexMap<String, ProtocolIntention>,
    extensions: Vec<ExtensionIntention>,
    enums: IndexMap<String, EnumIntention>,
    structs: IndexMap<String, StructIntention>,
    typedefs: IndexMap<String, TypedefIntention>,
    global_vars: IndexMap<String, GlobalVarIntention>,
    global_funcs: IndexMap<String, GlobalFuncIntention>,
}

impl IntentionGraph {
    /// Links per-file collections into one graph, merging interface and
    /// implementation records.
    pub fn build(files: Vec<FileIntentions>) -> Self {
        let mut graph = IntentionGraph::default();

        for file in files {
            graph.files.push(FileRecord {
                source: file.source,
                path: file.path,
                preprocessor_directives: file.preprocessor_directives,
            });

            for class in file.classes {
                match graph.classes.get_mut(&class.name) {
                    Some(existing) => merge_interface(existing, class),
                    None => {
                        graph.classes.insert(class.name.clone(), class);
                    }
                }
            }
            for implementation in file.implementations {
                match graph.classes.get_mut(&implementation.name) {
                    Some(existing) => merge_implementation(existing, implementation),
                    None => {
                        // Implementation without a visible interface still
                        // declares the class.
                        graph
                            .classes
                            .insert(implementation.name.clone(), implementation);
                    }
                }
            }
            graph.extensions.extend(file.extensions);
            for protocol in file.protocols {
                graph.protocols.entry(protocol.name.clone()).or_insert(protocol);
            }
            for item in file.enums {
                graph.enums.entry(item.name.clone()).or_insert(item);
            }
            for item in file.structs {
                graph.structs.entry(item.name.clone()).or_insert(item);
            }
            for item in file.typedefs {
                graph.typedefs.entry(item.name.clone()).or_insert(item);
            }
            for item in file.global_vars {
                graph.global_vars.entry(item.name.clone()).or_insert(item);
            }
            for item in file.global_funcs {
                match graph.global_funcs.get_mut(&item.name) {
                    Some(existing) => {
                        if existing.body.is_none() && item.body.is_some() {
                            *existing = item;
                        }
                    }
                    None => {
                        graph.global_funcs.insert(item.name.clone(), item);
                    }
                }
            }
        }

        graph
    }

    pub fn class(&self, name: &str) -> Option<&ClassIntention> {
        self.classes.get(name)
    }

    pub fn protocol(&self, name: &str) -> Option<&ProtocolIntention> {
        self.protocols.get(name)
    }

    pub fn enum_intention(&self, name: &str) -> Option<&EnumIntention> {
        self.enums.get(name)
    }

    pub fn struct_intention(&self, name: &str) -> Option<&StructIntention> {
        self.structs.get(name)
    }

    pub fn typedef(&self, name: &str) -> Option<&TypedefIntention> {
        self.typedefs.get(name)
    }

    pub fn global_var(&self, name: &str) -> Option<&GlobalVarIntention> {
        self.global_vars.get(name)
    }

    pub fn global_func(&self, name: &str) -> Option<&GlobalFuncIntention> {
        self.global_funcs.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassIntention> {
        self.classes.values()
    }

    pub fn protocols(&self) -> impl Iterator<Item = &ProtocolIntention> {
        self.protocols.values()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &ExtensionIntention> {
        self.extensions.iter()
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumIntention> {
        self.enums.values()
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructIntention> {
        self.structs.values()
    }

    pub fn typedefs(&self) -> impl Iterator<Item = &TypedefIntention> {
        self.typedefs.values()
    }

    pub fn global_vars(&self) -> impl Iterator<Item = &GlobalVarIntention> {
        self.global_vars.values()
    }

    pub fn global_funcs(&self) -> impl Iterator<Item = &GlobalFuncIntention> {
        self.global_funcs.values()
    }

    /// Extensions of a given class.
    pub fn extensions_of(&self, class_name: &str) -> impl Iterator<Item = &ExtensionIntention> {
        self.extensions
            .iter()
            .filter(move |e| e.class_name == class_name)
    }
}

/// Merges a second `@interface` (a class extension) into the primary one.
fn merge_interface(primary: &mut ClassIntention, extension: ClassIntention) {
    if primary.superclass.is_none() {
        primary.superclass = extension.superclass;
    }
    for protocol in extension.protocols {
        if !primary.protocols.contains(&protocol) {
            primary.protocols.push(protocol);
        }
    }
    primary.ivars.extend(extension.ivars);
    for property in extension.properties {
        if !primary.properties.iter().any(|p| p.name == property.name) {
            primary.properties.push(property);
        }
    }
    for method in extension.methods {
        merge_method(&mut primary.methods, method);
    }
    primary.inits.extend(extension.inits);
}

/// Merges an `@implementation` into the interface record: bodies transfer,
/// annotated interface signatures survive.
fn merge_implementation(primary: &mut ClassIntention, implementation: ClassIntention) {
    primary.home = implementation.home;
    primary.ivars.extend(implementation.ivars);

    for method in implementation.methods {
        merge_method(&mut primary.methods, method);
    }
    for init in implementation.inits {
        match primary
            .inits
            .iter_mut()
            .find(|existing| existing.selector == init.selector)
        {
            Some(existing) => existing.body = init.body.or(existing.body),
            None => primary.inits.push(init),
        }
    }
    if primary.deinit.is_none() {
        primary.deinit = implementation.deinit;
    } else if let (Some(primary_deinit), Some(implementation_deinit)) =
        (primary.deinit.as_mut(), implementation.deinit)
    {
        if primary_deinit.body.is_none() {
            *primary_deinit = implementation_deinit;
        }
    }
}

fn merge_method(methods: &mut Vec<MethodIntention>, incoming: MethodIntention) {
    match methods
        .iter_mut()
        .find(|existing| existing.selector == incoming.selector)
    {
        Some(existing) => {
            // Nullability overrides: an annotated declaration beats an
            // unannotated redeclaration.
            let keep_existing_signature =
                existing.has_nullability_annotations && !incoming.has_nullability_annotations;
            if !keep_existing_signature {
                existing.signature = incoming.signature;
                existing.has_nullability_annotations = incoming.has_nullability_annotations;
                existing.in_nonnull_context = incoming.in_nonnull_context;
            }
            if incoming.body.is_some() {
                existing.body = incoming.body;
                existing.source_ref = incoming.source_ref;
            }
        }
        None => methods.push(incoming),
    }
}
