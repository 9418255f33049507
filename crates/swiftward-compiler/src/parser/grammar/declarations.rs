//! Top-level Objective-C declarations.

use crate::parser::core::Parser;
use crate::parser::cst::SyntaxKind;

use super::statements::compound_stmt;
use super::types::{at_type_start, type_node};

/// `@interface Name [: Super | (Category)] [<P...>] [{ivars}] members @end`
pub(super) fn interface_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::InterfaceDecl);
    p.bump();
    p.expect(SyntaxKind::Ident, "expected class name");

    if p.eat(SyntaxKind::ParenOpen) {
        // Class extension `()` or named category `(Name)`.
        p.eat(SyntaxKind::Ident);
        p.expect(SyntaxKind::ParenClose, "expected ')'");
    } else if p.eat(SyntaxKind::Colon) {
        p.expect(SyntaxKind::Ident, "expected superclass name");
    }

    if p.at(SyntaxKind::AngleOpen) {
        protocol_ref_list(p);
    }

    if p.at(SyntaxKind::BraceOpen) {
        ivar_block(p);
    }

    member_loop(p, true);
    p.expect(SyntaxKind::AtEnd, "expected '@end'");
    p.finish_node();
}

/// `@implementation Name [(Category)] members @end`
pub(super) fn implementation_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ImplementationDecl);
    p.bump();
    p.expect(SyntaxKind::Ident, "expected class name");

    if p.eat(SyntaxKind::ParenOpen) {
        p.eat(SyntaxKind::Ident);
        p.expect(SyntaxKind::ParenClose, "expected ')'");
    }

    if p.at(SyntaxKind::BraceOpen) {
        ivar_block(p);
    }

    member_loop(p, false);
    p.expect(SyntaxKind::AtEnd, "expected '@end'");
    p.finish_node();
}

/// `@protocol Name;` forward declaration, or a full protocol body.
pub(super) fn protocol_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ProtocolDecl);
    p.bump();
    p.expect(SyntaxKind::Ident, "expected protocol name");

    if p.eat(SyntaxKind::Semicolon) {
        p.finish_node();
        return;
    }
    // `@protocol A, B;` forward list.
    if p.at(SyntaxKind::Comma) {
        while p.eat(SyntaxKind::Comma) {
            p.expect(SyntaxKind::Ident, "expected protocol name");
        }
        p.expect(SyntaxKind::Semicolon, "expected ';'");
        p.finish_node();
        return;
    }

    if p.at(SyntaxKind::AngleOpen) {
        protocol_ref_list(p);
    }

    member_loop(p, true);
    p.expect(SyntaxKind::AtEnd, "expected '@end'");
    p.finish_node();
}

/// `@class A, B;`
pub(super) fn class_forward_decl(p: &mut Parser<'_>) {
    p.bump();
    p.eat(SyntaxKind::Ident);
    while p.eat(SyntaxKind::Comma) {
        p.expect(SyntaxKind::Ident, "expected class name");
    }
    p.expect(SyntaxKind::Semicolon, "expected ';'");
}

fn member_loop(p: &mut Parser<'_>, declarations_only: bool) {
    while !p.eof() && !p.at(SyntaxKind::AtEnd) {
        match p.current() {
            SyntaxKind::AtProperty => property_decl(p),
            SyntaxKind::Plus | SyntaxKind::Minus => method_decl(p, declarations_only),
            SyntaxKind::AtOptional
            | SyntaxKind::AtRequired
            | SyntaxKind::PreprocLine
            | SyntaxKind::NonnullBegin
            | SyntaxKind::NonnullEnd
            | SyntaxKind::Semicolon => p.bump(),
            SyntaxKind::AtSynthesize | SyntaxKind::AtDynamic => {
                // `@synthesize name = _name;` has no Swift counterpart; the
                // property itself drives emission.
                p.bump();
                while !p.eof() && !p.eat(SyntaxKind::Semicolon) {
                    p.bump();
                }
            }
            _ if at_type_start(p) => global_decl(p),
            _ => p.err_and_bump("expected member declaration"),
        }
    }
}

fn protocol_ref_list(p: &mut Parser<'_>) {
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

/// `{ @private int _x; ... }` instance-variable block.
fn ivar_block(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IvarBlock);
    p.bump();
    while !p.eof() && !p.at(SyntaxKind::BraceClose) {
        match p.current() {
            SyntaxKind::AtPrivate
            | SyntaxKind::AtProtected
            | SyntaxKind::AtPublic
            | SyntaxKind::AtPackage => p.bump(),
            _ if at_type_start(p) => ivar_decl(p),
            _ => p.err_and_bump("expected instance variable"),
        }
    }
    p.expect(SyntaxKind::BraceClose, "expected '}'");
    p.finish_node();
}

fn ivar_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::IvarDecl);
    type_node(p);
    p.expect(SyntaxKind::Ident, "expected instance variable name");
    if p.eat(SyntaxKind::BracketOpen) {
        p.eat(SyntaxKind::IntNumber);
        p.expect(SyntaxKind::BracketClose, "expected ']'");
    }
    while p.eat(SyntaxKind::Comma) {
        p.expect(SyntaxKind::Ident, "expected instance variable name");
    }
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

/// `@property (attrs) Type name;`
fn property_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PropertyDecl);
    p.bump();

    if p.at(SyntaxKind::ParenOpen) {
        property_attribute_list(p);
    }

    type_node(p);
    // Block-typed properties carry their name inside the declarator:
    // `void (^completion)(NSInteger);`.
    if !p.eat(SyntaxKind::Ident) && !p.at(SyntaxKind::Semicolon) {
        p.error("expected property name");
    }
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

fn property_attribute_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PropertyAttributeList);
    p.bump();
    while !p.eof() && !p.at(SyntaxKind::ParenClose) {
        property_attribute(p);
        if !p.at(SyntaxKind::ParenClose) && !p.eat(SyntaxKind::Comma) {
            p.err_and_bump("expected ','");
        }
    }
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    p.finish_node();
}

/// One attribute: `weak`, `readonly`, `getter=isEnabled`, `setter=setOn:`.
fn property_attribute(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PropertyAttribute);
    match p.current() {
        SyntaxKind::Ident => {
            p.bump();
            if p.eat(SyntaxKind::Equals) {
                p.expect(SyntaxKind::Ident, "expected accessor selector");
                p.eat(SyntaxKind::Colon);
            }
        }
        // `class` properties share the keyword token.
        kind if kind.is_nullability_qual() => p.bump(),
        _ => p.err_and_bump("expected property attribute"),
    }
    p.finish_node();
}

/// `- (ReturnType)sel:(T)name other:(T)name ...` with `;` or a body.
fn method_decl(p: &mut Parser<'_>, declaration_only: bool) {
    p.start_node(SyntaxKind::MethodDecl);
    p.bump(); // `+` or `-`

    if p.at(SyntaxKind::ParenOpen) {
        type_clause(p);
    }

    // Selector pieces.
    if p.at(SyntaxKind::Ident) {
        selector_piece(p);
        while p.at(SyntaxKind::Ident) && p.nth(1) == SyntaxKind::Colon {
            selector_piece(p);
        }
        // Variadic tail `, ...`.
        if p.eat(SyntaxKind::Comma) {
            p.eat(SyntaxKind::Ellipsis);
        }
    } else {
        p.error("expected selector");
    }

    match p.current() {
        SyntaxKind::Semicolon => p.bump(),
        SyntaxKind::BraceOpen => {
            if declaration_only {
                p.error("method body not allowed in interface");
            }
            compound_stmt(p);
        }
        _ => p.error("expected ';' or method body"),
    }
    p.finish_node();
}

/// `name` or `name:(Type)param`.
fn selector_piece(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SelectorPiece);
    p.bump();
    if p.eat(SyntaxKind::Colon) {
        if p.at(SyntaxKind::ParenOpen) {
            type_clause(p);
        }
        p.expect(SyntaxKind::Ident, "expected parameter name");
    }
    p.finish_node();
}

/// `(Type)` annotation in method signatures.
fn type_clause(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TypeClause);
    p.bump();
    type_node(p);
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    p.finish_node();
}

/// `typedef` declarations: `NS_ENUM`/`NS_OPTIONS`, `struct`, block and
/// function-pointer aliases, and plain aliases.
pub(super) fn typedef_decl(p: &mut Parser<'_>) {
    match p.nth(1) {
        SyntaxKind::NsEnum | SyntaxKind::NsOptions => enum_decl(p),
        SyntaxKind::KwStruct
            if matches!(p.nth(2), SyntaxKind::BraceOpen | SyntaxKind::Ident) =>
        {
            struct_decl(p)
        }
        _ => {
            p.start_node(SyntaxKind::TypedefDecl);
            p.bump();
            type_node(p);
            p.eat(SyntaxKind::Ident);
            p.expect(SyntaxKind::Semicolon, "expected ';'");
            p.finish_node();
        }
    }
}

/// `typedef NS_ENUM(NSUInteger, Name) { A, B = 1, };`
fn enum_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EnumDecl);
    p.bump(); // typedef
    p.bump(); // NS_ENUM / NS_OPTIONS
    p.expect(SyntaxKind::ParenOpen, "expected '('");
    type_node(p);
    p.expect(SyntaxKind::Comma, "expected ','");
    p.expect(SyntaxKind::Ident, "expected enum name");
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    p.expect(SyntaxKind::BraceOpen, "expected '{'");
    while !p.eof() && !p.at(SyntaxKind::BraceClose) {
        enum_member(p);
        if !p.at(SyntaxKind::BraceClose) && !p.eat(SyntaxKind::Comma) {
            p.err_and_bump("expected ','");
        }
    }
    p.expect(SyntaxKind::BraceClose, "expected '}'");
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

fn enum_member(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EnumMember);
    p.expect(SyntaxKind::Ident, "expected enum case name");
    if p.eat(SyntaxKind::Equals) {
        super::expressions::expr(p);
    }
    p.finish_node();
}

/// `typedef struct { fields } Name;` or `typedef struct Tag Name;`
fn struct_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::StructDecl);
    p.bump(); // typedef
    p.bump(); // struct
    p.eat(SyntaxKind::Ident); // optional tag
    if p.eat(SyntaxKind::BraceOpen) {
        while !p.eof() && !p.at(SyntaxKind::BraceClose) {
            if !at_type_start(p) {
                p.err_and_bump("expected field declaration");
                continue;
            }
            struct_field(p);
        }
        p.expect(SyntaxKind::BraceClose, "expected '}'");
    }
    p.expect(SyntaxKind::Ident, "expected struct name");
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

fn struct_field(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::StructField);
    type_node(p);
    p.expect(SyntaxKind::Ident, "expected field name");
    if p.eat(SyntaxKind::BracketOpen) {
        p.eat(SyntaxKind::IntNumber);
        p.expect(SyntaxKind::BracketClose, "expected ']'");
    }
    while p.eat(SyntaxKind::Comma) {
        p.expect(SyntaxKind::Ident, "expected field name");
    }
    p.expect(SyntaxKind::Semicolon, "expected ';'");
    p.finish_node();
}

/// A file- or class-scope C declaration: global variable or function.
pub(super) fn global_decl(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    type_node(p);

    if !p.at(SyntaxKind::Ident) {
        p.start_node_at(checkpoint, SyntaxKind::GlobalVarDecl);
        p.error("expected declaration name");
        p.eat(SyntaxKind::Semicolon);
        p.finish_node();
        return;
    }

    if p.nth(1) == SyntaxKind::ParenOpen {
        p.start_node_at(checkpoint, SyntaxKind::FunctionDecl);
        p.bump(); // name
        param_list(p);
        match p.current() {
            SyntaxKind::Semicolon => p.bump(),
            SyntaxKind::BraceOpen => compound_stmt(p),
            _ => p.error("expected ';' or function body"),
        }
        p.finish_node();
    } else {
        p.start_node_at(checkpoint, SyntaxKind::GlobalVarDecl);
        p.bump(); // name
        if p.eat(SyntaxKind::BracketOpen) {
            p.eat(SyntaxKind::IntNumber);
            p.expect(SyntaxKind::BracketClose, "expected ']'");
        }
        if p.eat(SyntaxKind::Equals) {
            super::expressions::expr(p);
        }
        p.expect(SyntaxKind::Semicolon, "expected ';'");
        p.finish_node();
    }
}

fn param_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ParamList);
    p.expect(SyntaxKind::ParenOpen, "expected '('");
    while !p.eof() && !p.at(SyntaxKind::ParenClose) {
        if p.at(SyntaxKind::KwVoid) && p.nth(1) == SyntaxKind::ParenClose {
            p.bump();
            break;
        }
        if p.eat(SyntaxKind::Ellipsis) {
            break;
        }
        param(p);
        if !p.at(SyntaxKind::ParenClose) && !p.eat(SyntaxKind::Comma) {
            p.err_and_bump("expected ','");
        }
    }
    p.expect(SyntaxKind::ParenClose, "expected ')'");
    p.finish_node();
}

fn param(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::Param);
    type_node(p);
    p.eat(SyntaxKind::Ident);
    p.finish_node();
}
