//! Lowering of CST `TypeNode`s into [`ObjcType`] values.

use swiftward_core::ObjcType;

use crate::parser::ast::declarator_name;
use crate::parser::{SyntaxKind, SyntaxNode};

/// Lowers a `TypeNode` into the Objective-C type model. The result is
/// normalized (no empty qualifier lists, no nested qualifier chains).
pub fn lower_type_node(node: &SyntaxNode) -> ObjcType {
    debug_assert_eq!(node.kind(), SyntaxKind::TypeNode);

    let mut specifiers: Vec<String> = Vec::new();
    let mut qualifiers: Vec<String> = Vec::new();
    let mut core: Option<ObjcType> = None;
    let mut primitive_run: Vec<String> = Vec::new();
    let mut core_name: Option<String> = None;
    let mut generic_args: Vec<ObjcType> = Vec::new();
    let mut protocols: Vec<String> = Vec::new();
    let mut is_id = false;
    let mut pointer_depth = 0usize;
    let mut in_generics = false;
    let mut declarator: Option<SyntaxKind> = None; // Caret or Star
    let mut block_params: Vec<ObjcType> = Vec::new();

    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Node(child) => match child.kind() {
                SyntaxKind::TypeNode => {
                    let lowered = lower_type_node(&child);
                    if declarator.is_some() {
                        block_params.push(lowered);
                    } else if in_generics {
                        generic_args.push(lowered);
                    }
                }
                SyntaxKind::ProtocolRefList => {
                    for token in child.children_with_tokens().filter_map(|e| e.into_token()) {
                        if token.kind() == SyntaxKind::Ident {
                            protocols.push(token.text().to_string());
                        }
                    }
                }
                _ => {}
            },
            rowan::NodeOrToken::Token(token) => {
                let kind = token.kind();
                match kind {
                    SyntaxKind::KwStatic
                    | SyntaxKind::KwExtern
                    | SyntaxKind::KwInline
                    | SyntaxKind::KwVolatile => specifiers.push(token.text().to_string()),
                    SyntaxKind::KwConst => qualifiers.push(token.text().to_string()),
                    _ if kind.is_storage_qual() => specifiers.push(token.text().to_string()),
                    _ if kind.is_nullability_qual() => qualifiers.push(token.text().to_string()),
                    SyntaxKind::Ident
                        if matches!(
                            token.text(),
                            "nullable" | "nonnull" | "null_unspecified"
                        ) && (core_name.is_none() || core.is_some() || pointer_depth > 0) =>
                    {
                        qualifiers.push(token.text().to_string());
                    }
                    _ if kind.is_primitive_type_keyword() => {
                        primitive_run.push(token.text().to_string());
                    }
                    SyntaxKind::KwId => is_id = true,
                    SyntaxKind::KwInstancetype => core = Some(ObjcType::Instancetype),
                    SyntaxKind::Ident if core_name.is_none() && core.is_none() && !is_id => {
                        core_name = Some(token.text().to_string());
                    }
                    SyntaxKind::AngleOpen => in_generics = true,
                    SyntaxKind::AngleClose => in_generics = false,
                    SyntaxKind::Star if declarator.is_none() && !in_generics => {
                        // A star right after `(` is a function-pointer
                        // declarator, not an extra indirection.
                        if token
                            .prev_token()
                            .map(|t| skip_trivia_back(t))
                            .flatten()
                            .is_some_and(|t| t.kind() == SyntaxKind::ParenOpen)
                        {
                            declarator = Some(SyntaxKind::Star);
                        } else {
                            pointer_depth += 1;
                        }
                    }
                    SyntaxKind::Caret => declarator = Some(SyntaxKind::Caret),
                    _ => {}
                }
            }
        }
    }

    // Assemble the core type.
    let mut ty = if let Some(core) = core {
        core
    } else if is_id {
        ObjcType::Id { protocols }
    } else if !primitive_run.is_empty() {
        ObjcType::Struct(primitive_run.join(" "))
    } else if let Some(name) = core_name {
        if generic_args.is_empty() {
            ObjcType::Struct(name)
        } else {
            ObjcType::Generic(name, generic_args)
        }
    } else {
        ObjcType::Void
    };

    if matches!(ty, ObjcType::Struct(ref n) if n == "void") {
        ty = ObjcType::Void;
    }

    for _ in 0..pointer_depth {
        ty = ObjcType::pointer(ty);
    }

    // Block / function-pointer declarators swallow the assembled type as
    // their return type.
    if let Some(marker) = declarator {
        let name = declarator_name(node);
        ty = if marker == SyntaxKind::Caret {
            ObjcType::Block {
                name,
                return_type: Box::new(ty),
                parameters: block_params,
            }
        } else {
            ObjcType::FunctionPointer {
                name,
                return_type: Box::new(ty),
                parameters: block_params,
            }
        };
    }

    ObjcType::specified(specifiers, ObjcType::qualified(ty, qualifiers)).normalized()
}

fn skip_trivia_back(
    mut token: crate::parser::SyntaxToken,
) -> Option<crate::parser::SyntaxToken> {
    while token.kind().is_trivia() {
        token = token.prev_token()?;
    }
    Some(token)
}
