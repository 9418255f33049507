//! Objective-C type annotations.

use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind;

/// Whether the current token can begin a type annotation.
pub(in crate::parser) fn at_type_start(p: &Parser<'_>) -> bool {
    let kind = p.current();
    kind.is_primitive_type_keyword()
        || kind.is_storage_qual()
        || kind.is_nullability_qual()
        || matches!(
            kind,
            SyntaxKind::KwId
                | SyntaxKind::KwInstancetype
                | SyntaxKind::KwStruct
                | SyntaxKind::KwConst
                | SyntaxKind::KwVolatile
                | SyntaxKind::KwStatic
                | SyntaxKind::KwExtern
                | SyntaxKind::KwInline
                | SyntaxKind::KwUnsigned
                | SyntaxKind::KwSigned
        )
        || (kind == SyntaxKind::Ident && looks_like_type_name(p))
}

/// `Ident` heuristics: uppercase-leading names in declaration position read
/// as types (`NSString *`, `CGFloat x`).
fn looks_like_type_name(p: &Parser<'_>) -> bool {
    let next = p.nth(1);
    matches!(
        next,
        SyntaxKind::Star | SyntaxKind::Ident | SyntaxKind::AngleOpen
    ) || next.is_nullability_qual()
}

/// Contextual nullability keywords allowed at the head of a type
/// annotation (`(nullable NSString *)`).
fn at_contextual_nullability(p: &Parser<'_>) -> bool {
    p.at(SyntaxKind::Ident)
        && matches!(p.text(), "nullable" | "nonnull" | "null_unspecified")
        && matches!(p.nth(1), SyntaxKind::Ident)
        || (p.at(SyntaxKind::Ident)
            && matches!(p.text(), "nullable" | "nonnull" | "null_unspecified")
            && (p.nth(1).is_primitive_type_keyword()
                || matches!(p.nth(1), SyntaxKind::KwId | SyntaxKind::KwInstancetype)))
}

/// Parses a full type annotation into a `TypeNode`:
/// specifiers/qualifiers, the core type (primitive run, `id<...>`,
/// `instancetype`, `struct X`, or a named type with lightweight generics),
/// pointer stars with nullability, and an optional inline block or
/// function-pointer declarator.
pub(in crate::parser) fn type_node(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TypeNode);

    // Leading specifiers and qualifiers.
    loop {
        let kind = p.current();
        if kind.is_storage_qual()
            || kind.is_nullability_qual()
            || matches!(
                kind,
                SyntaxKind::KwStatic
                    | SyntaxKind::KwExtern
                    | SyntaxKind::KwInline
                    | SyntaxKind::KwConst
                    | SyntaxKind::KwVolatile
            )
        {
            p.bump();
        } else if at_contextual_nullability(p) {
            p.bump();
        } else {
            break;
        }
    }

    // Core type.
    if p.current().is_primitive_type_keyword() {
        while p.current().is_primitive_type_keyword() {
            p.bump();
        }
    } else if p.at(SyntaxKind::KwId) {
        p.bump();
        if p.at(SyntaxKind::AngleOpen) {
            protocol_ref_angle_list(p);
        }
    } else if p.at(SyntaxKind::KwInstancetype) {
        p.bump();
    } else if p.at(SyntaxKind::KwStruct) || p.at(SyntaxKind::KwEnum) || p.at(SyntaxKind::KwUnion) {
        p.bump();
        p.eat(SyntaxKind::Ident);
    } else if p.at(SyntaxKind::Ident) {
        p.bump();
        if p.at(SyntaxKind::AngleOpen) {
            generic_arg_list(p);
        }
    } else {
        p.error("expected type");
    }

    // Pointer and trailing qualifiers.
    loop {
        let kind = p.current();
        if matches!(kind, SyntaxKind::Star | SyntaxKind::KwConst) || kind.is_nullability_qual() {
            p.bump();
        } else if p.at(SyntaxKind::Ident)
            && matches!(p.text(), "nullable" | "nonnull" | "null_unspecified")
        {
            p.bump();
        } else {
            break;
        }
    }

    // Inline block `(^name)(params)` or function pointer `(*name)(params)`.
    if p.at(SyntaxKind::ParenOpen)
        && matches!(p.nth(1), SyntaxKind::Caret | SyntaxKind::Star)
    {
        p.bump();
        p.bump();
        p.eat(SyntaxKind::Ident);
        p.expect(SyntaxKind::ParenClose, "expected ')'");
        if p.at(SyntaxKind::ParenOpen) {
            block_param_list(p);
        }
    }

    p.finish_node();
}

/// `<P1, P2>` protocol conformance list after `id` or a class name.
fn protocol_ref_angle_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ProtocolRefList);
    p.bump();
    while !p.eof() && !p.at(SyntaxKind::AngleClose) {
        if !p.eat(SyntaxKind::Ident) && !p.eat(SyntaxKind::Comma) {
            p.err_and_bump("expected protocol name");
        }
    }
    p.expect(SyntaxKind::AngleClose, "expected '>'");
    p.finish_node();
}

/// `<Type, Type>` lightweight generic arguments.
fn generic_arg_list(p: &mut Parser<'_>) {
    p.bump();
    while !p.eof() && !p.at(SyntaxKind::AngleClose) {
        type_node(p);
        if !p.at(SyntaxKind::AngleClose) && !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::AngleClose, "expected '>'");
}

/// Parameter list of an inline block/function-pointer type.
fn block_param_list(p: &mut Parser<'_>) {
    p.bump();
    while !p.eof() && !p.at(SyntaxKind::ParenClose) {
        if p.at(SyntaxKind::KwVoid) && p.nth(1) == SyntaxKind::ParenClose {
            p.bump();
            break;
        }
        type_node(p);
        p.eat(SyntaxKind::Ident);
        if !p.at(SyntaxKind::ParenClose) && !p.eat(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::ParenClose, "expected ')'");
}
