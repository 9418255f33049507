//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors. Cast is
//! infallible for the correct `SyntaxKind`; validation happens in the
//! intention collector.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(InterfaceDecl, InterfaceDecl);
ast_node!(ImplementationDecl, ImplementationDecl);
ast_node!(ProtocolDecl, ProtocolDecl);
ast_node!(PropertyDecl, PropertyDecl);
ast_node!(MethodDecl, MethodDecl);
ast_node!(SelectorPiece, SelectorPiece);
ast_node!(EnumDecl, EnumDecl);
ast_node!(EnumMember, EnumMember);
ast_node!(StructDecl, StructDecl);
ast_node!(StructField, StructField);
ast_node!(TypedefDecl, TypedefDecl);
ast_node!(GlobalVarDecl, GlobalVarDecl);
ast_node!(FunctionDecl, FunctionDecl);
ast_node!(Param, Param);
ast_node!(IvarDecl, IvarDecl);
ast_node!(TypeNode, TypeNode);

/// First token of the given kind among direct children.
pub fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// All tokens of the given kind among direct children.
pub fn child_tokens(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == kind)
        .collect()
}

fn first_child(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|n| n.kind() == kind)
}

impl Root {
    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceDecl> + '_ {
        self.0.children().filter_map(InterfaceDecl::cast)
    }

    pub fn implementations(&self) -> impl Iterator<Item = ImplementationDecl> + '_ {
        self.0.children().filter_map(ImplementationDecl::cast)
    }

    pub fn protocols(&self) -> impl Iterator<Item = ProtocolDecl> + '_ {
        self.0.children().filter_map(ProtocolDecl::cast)
    }

    pub fn enums(&self) -> impl Iterator<Item = EnumDecl> + '_ {
        self.0.children().filter_map(EnumDecl::cast)
    }

    pub fn structs(&self) -> impl Iterator<Item = StructDecl> + '_ {
        self.0.children().filter_map(StructDecl::cast)
    }

    pub fn typedefs(&self) -> impl Iterator<Item = TypedefDecl> + '_ {
        self.0.children().filter_map(TypedefDecl::cast)
    }

    pub fn global_vars(&self) -> impl Iterator<Item = GlobalVarDecl> + '_ {
        self.0.children().filter_map(GlobalVarDecl::cast)
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDecl> + '_ {
        self.0.children().filter_map(FunctionDecl::cast)
    }

    /// Verbatim preprocessor lines, in file order.
    pub fn preprocessor_lines(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::PreprocLine)
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl InterfaceDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    /// `@interface C (Name)` → `Some("Name")`; `@interface C ()` →
    /// `Some("")`; a primary interface → `None`.
    pub fn category(&self) -> Option<String> {
        if child_token(&self.0, SyntaxKind::ParenOpen).is_none() {
            return None;
        }
        let idents = child_tokens(&self.0, SyntaxKind::Ident);
        Some(idents.get(1).map(|t| t.text().to_string()).unwrap_or_default())
    }

    pub fn superclass(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Colon)?;
        let idents = child_tokens(&self.0, SyntaxKind::Ident);
        idents.into_iter().nth(1)
    }

    pub fn protocol_refs(&self) -> Vec<String> {
        protocol_ref_names(&self.0)
    }

    pub fn ivar_block(&self) -> Option<SyntaxNode> {
        first_child(&self.0, SyntaxKind::IvarBlock)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyDecl> + '_ {
        self.0.children().filter_map(PropertyDecl::cast)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> + '_ {
        self.0.children().filter_map(MethodDecl::cast)
    }

    pub fn global_vars(&self) -> impl Iterator<Item = GlobalVarDecl> + '_ {
        self.0.children().filter_map(GlobalVarDecl::cast)
    }
}

impl ImplementationDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    pub fn category(&self) -> Option<String> {
        child_token(&self.0, SyntaxKind::ParenOpen)?;
        let idents = child_tokens(&self.0, SyntaxKind::Ident);
        Some(idents.get(1).map(|t| t.text().to_string()).unwrap_or_default())
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> + '_ {
        self.0.children().filter_map(MethodDecl::cast)
    }

    pub fn global_vars(&self) -> impl Iterator<Item = GlobalVarDecl> + '_ {
        self.0.children().filter_map(GlobalVarDecl::cast)
    }

    pub fn functions(&self) -> impl Iterator<Item = FunctionDecl> + '_ {
        self.0.children().filter_map(FunctionDecl::cast)
    }
}

impl ProtocolDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    /// Forward declarations (`@protocol A;`) declare nothing.
    pub fn is_forward(&self) -> bool {
        child_token(&self.0, SyntaxKind::Semicolon).is_some()
            && child_token(&self.0, SyntaxKind::AtEnd).is_none()
    }

    pub fn protocol_refs(&self) -> Vec<String> {
        protocol_ref_names(&self.0)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyDecl> + '_ {
        self.0.children().filter_map(PropertyDecl::cast)
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> + '_ {
        self.0.children().filter_map(MethodDecl::cast)
    }
}

fn protocol_ref_names(node: &SyntaxNode) -> Vec<String> {
    first_child(node, SyntaxKind::ProtocolRefList)
        .map(|list| {
            child_tokens(&list, SyntaxKind::Ident)
                .into_iter()
                .map(|t| t.text().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// One parsed property attribute: a bare name, or `name=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAttributeView {
    pub name: String,
    pub value: Option<String>,
}

impl PropertyDecl {
    pub fn attributes(&self) -> Vec<PropertyAttributeView> {
        let Some(list) = first_child(&self.0, SyntaxKind::PropertyAttributeList) else {
            return Vec::new();
        };
        list.children()
            .filter(|n| n.kind() == SyntaxKind::PropertyAttribute)
            .filter_map(|attr| {
                let idents = child_tokens(&attr, SyntaxKind::Ident);
                let name = idents.first()?.text().to_string();
                let value = idents.get(1).map(|t| {
                    let mut text = t.text().to_string();
                    if child_token(&attr, SyntaxKind::Colon).is_some() {
                        text.push(':');
                    }
                    text
                });
                Some(PropertyAttributeView { name, value })
            })
            .collect()
    }

    pub fn type_node(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    /// The declared property name: the trailing identifier after the type.
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }
}

impl MethodDecl {
    pub fn is_class_method(&self) -> bool {
        child_token(&self.0, SyntaxKind::Plus).is_some()
    }

    pub fn return_type(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeClause)
            .and_then(|clause| first_child(&clause, SyntaxKind::TypeNode))
            .and_then(TypeNode::cast)
    }

    pub fn selector_pieces(&self) -> Vec<SelectorPiece> {
        self.0.children().filter_map(SelectorPiece::cast).collect()
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        first_child(&self.0, SyntaxKind::CompoundStmt)
    }

    /// The Objective-C selector spelling, `piece:piece:` or `name`.
    pub fn selector_text(&self) -> String {
        let pieces = self.selector_pieces();
        let mut out = String::new();
        for piece in &pieces {
            out.push_str(piece.name().as_deref().unwrap_or(""));
            if piece.has_parameter() {
                out.push(':');
            }
        }
        out
    }
}

impl SelectorPiece {
    pub fn name(&self) -> Option<String> {
        child_tokens(&self.0, SyntaxKind::Ident)
            .first()
            .map(|t| t.text().to_string())
    }

    pub fn has_parameter(&self) -> bool {
        child_token(&self.0, SyntaxKind::Colon).is_some()
    }

    pub fn parameter_type(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeClause)
            .and_then(|clause| first_child(&clause, SyntaxKind::TypeNode))
            .and_then(TypeNode::cast)
    }

    /// Internal parameter name: the second identifier (after the selector
    /// keyword and type clause).
    pub fn parameter_name(&self) -> Option<String> {
        if !self.has_parameter() {
            return None;
        }
        child_tokens(&self.0, SyntaxKind::Ident)
            .into_iter()
            .nth(1)
            .map(|t| t.text().to_string())
    }
}

impl EnumDecl {
    pub fn is_option_set(&self) -> bool {
        child_token(&self.0, SyntaxKind::NsOptions).is_some()
    }

    pub fn raw_type(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    pub fn members(&self) -> impl Iterator<Item = EnumMember> + '_ {
        self.0.children().filter_map(EnumMember::cast)
    }
}

impl EnumMember {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    /// The initializer expression node after `=`, if any.
    pub fn value(&self) -> Option<SyntaxNode> {
        child_token(&self.0, SyntaxKind::Equals)?;
        self.0.children().find(|n| n.kind() != SyntaxKind::TypeNode)
    }
}

impl StructDecl {
    /// The typedef'd name: the trailing identifier before `;`.
    pub fn name(&self) -> Option<SyntaxToken> {
        child_tokens(&self.0, SyntaxKind::Ident).into_iter().last()
    }

    pub fn fields(&self) -> impl Iterator<Item = StructField> + '_ {
        self.0.children().filter_map(StructField::cast)
    }
}

impl StructField {
    pub fn type_node(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    pub fn names(&self) -> Vec<String> {
        child_tokens(&self.0, SyntaxKind::Ident)
            .into_iter()
            .map(|t| t.text().to_string())
            .collect()
    }
}

impl TypedefDecl {
    pub fn type_node(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    /// Alias name: the trailing identifier, or for block/function-pointer
    /// shapes the declarator name inside the type node.
    pub fn alias_name(&self) -> Option<String> {
        if let Some(token) = child_token(&self.0, SyntaxKind::Ident) {
            return Some(token.text().to_string());
        }
        let type_node = self.type_node()?;
        declarator_name(type_node.as_cst())
    }
}

/// Name bound inside an inline `(^name)` / `(*name)` declarator.
pub fn declarator_name(type_node: &SyntaxNode) -> Option<String> {
    let mut after_marker = false;
    for element in type_node.children_with_tokens() {
        let Some(token) = element.into_token() else {
            continue;
        };
        match token.kind() {
            SyntaxKind::Caret | SyntaxKind::Star if !after_marker => {
                // Only the declarator star (inside parens) binds a name;
                // plain pointer stars are not followed by an identifier.
                after_marker = true;
            }
            SyntaxKind::Ident if after_marker => return Some(token.text().to_string()),
            SyntaxKind::ParenClose => after_marker = false,
            _ => {}
        }
    }
    None
}

impl GlobalVarDecl {
    pub fn type_node(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    /// Initializer expression node after `=`.
    pub fn initializer(&self) -> Option<SyntaxNode> {
        child_token(&self.0, SyntaxKind::Equals)?;
        self.0.children().find(|n| n.kind() != SyntaxKind::TypeNode)
    }
}

impl FunctionDecl {
    pub fn return_type(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.0, SyntaxKind::Ident)
    }

    pub fn params(&self) -> Vec<Param> {
        first_child(&self.0, SyntaxKind::ParamList)
            .map(|list| list.children().filter_map(Param::cast).collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        first_child(&self.0, SyntaxKind::CompoundStmt)
    }
}

impl Param {
    pub fn type_node(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    pub fn name(&self) -> Option<String> {
        child_token(&self.0, SyntaxKind::Ident).map(|t| t.text().to_string())
    }
}

impl IvarDecl {
    pub fn type_node(&self) -> Option<TypeNode> {
        first_child(&self.0, SyntaxKind::TypeNode).and_then(TypeNode::cast)
    }

    pub fn names(&self) -> Vec<String> {
        child_tokens(&self.0, SyntaxKind::Ident)
            .into_iter()
            .map(|t| t.text().to_string())
            .collect()
    }
}
