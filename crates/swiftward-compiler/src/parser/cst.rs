//! Syntax kinds for the Objective-C subset.
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexer) and node
//! kinds (from the parser). Logos derives token recognition; node kinds
//! carry no token/regex attributes. `ObjcLang` implements Rowan's
//! `Language` trait for tree construction.

#![allow(dead_code)] // Token-set helpers are used unevenly across grammar modules

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST`
/// sentinel. `#[repr(u16)]` enables the safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // ------------------------------------------------------------------
    // Punctuation and operators
    // ------------------------------------------------------------------
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("<")]
    AngleOpen,

    #[token(">")]
    AngleClose,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token("->")]
    Arrow,

    #[token("*")]
    Star,

    #[token("^")]
    Caret,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    #[token("?")]
    Question,

    #[token("=")]
    Equals,

    #[token("==")]
    EqualsEquals,

    #[token("!=")]
    BangEquals,

    #[token("<=")]
    AngleOpenEquals,

    #[token(">=")]
    AngleCloseEquals,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("<<")]
    ShiftLeft,

    #[token(">>")]
    ShiftRight,

    #[token("+=")]
    PlusEquals,

    #[token("-=")]
    MinusEquals,

    #[token("*=")]
    StarEquals,

    #[token("/=")]
    SlashEquals,

    #[token("%=")]
    PercentEquals,

    #[token("&=")]
    AmpEquals,

    #[token("|=")]
    PipeEquals,

    #[token("^=")]
    CaretEquals,

    #[token("<<=")]
    ShiftLeftEquals,

    #[token(">>=")]
    ShiftRightEquals,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    // ------------------------------------------------------------------
    // `@` keywords and literal openers
    // ------------------------------------------------------------------
    #[token("@interface")]
    AtInterface,

    #[token("@implementation")]
    AtImplementation,

    #[token("@end")]
    AtEnd,

    #[token("@protocol")]
    AtProtocol,

    #[token("@property")]
    AtProperty,

    #[token("@optional")]
    AtOptional,

    #[token("@required")]
    AtRequired,

    #[token("@private")]
    AtPrivate,

    #[token("@protected")]
    AtProtected,

    #[token("@public")]
    AtPublic,

    #[token("@package")]
    AtPackage,

    #[token("@class")]
    AtClass,

    #[token("@selector")]
    AtSelector,

    #[token("@synthesize")]
    AtSynthesize,

    #[token("@dynamic")]
    AtDynamic,

    #[token("@[")]
    AtBracketOpen,

    #[token("@{")]
    AtBraceOpen,

    #[token("@(")]
    AtParenOpen,

    #[token("@YES")]
    AtYes,

    #[token("@NO")]
    AtNo,

    #[token("@")]
    At,

    // ------------------------------------------------------------------
    // C keywords
    // ------------------------------------------------------------------
    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("while")]
    KwWhile,

    #[token("do")]
    KwDo,

    #[token("for")]
    KwFor,

    #[token("in")]
    KwIn,

    #[token("switch")]
    KwSwitch,

    #[token("case")]
    KwCase,

    #[token("default")]
    KwDefault,

    #[token("return")]
    KwReturn,

    #[token("break")]
    KwBreak,

    #[token("continue")]
    KwContinue,

    #[token("typedef")]
    KwTypedef,

    #[token("struct")]
    KwStruct,

    #[token("enum")]
    KwEnum,

    #[token("union")]
    KwUnion,

    #[token("static")]
    KwStatic,

    #[token("extern")]
    KwExtern,

    #[token("inline")]
    KwInline,

    #[token("const")]
    KwConst,

    #[token("volatile")]
    KwVolatile,

    #[token("unsigned")]
    KwUnsigned,

    #[token("signed")]
    KwSigned,

    #[token("long")]
    KwLong,

    #[token("short")]
    KwShort,

    #[token("int")]
    KwInt,

    #[token("char")]
    KwChar,

    #[token("float")]
    KwFloat,

    #[token("double")]
    KwDouble,

    #[token("void")]
    KwVoid,

    #[token("sizeof")]
    KwSizeof,

    #[token("self")]
    KwSelf,

    #[token("super")]
    KwSuper,

    #[token("nil")]
    KwNil,

    #[token("Nil")]
    KwNilUpper,

    #[token("NULL")]
    KwNull,

    #[token("YES")]
    KwYes,

    #[token("NO")]
    KwNo,

    #[token("TRUE")]
    KwTrue,

    #[token("FALSE")]
    KwFalse,

    #[token("instancetype")]
    KwInstancetype,

    #[token("id")]
    KwId,

    // ------------------------------------------------------------------
    // Foundation macros and qualifiers
    // ------------------------------------------------------------------
    #[token("NS_ASSUME_NONNULL_BEGIN")]
    NonnullBegin,

    #[token("NS_ASSUME_NONNULL_END")]
    NonnullEnd,

    #[token("NS_ENUM")]
    NsEnum,

    #[token("NS_OPTIONS")]
    NsOptions,

    #[token("_Nonnull")]
    #[token("__nonnull")]
    NonnullQual,

    #[token("_Nullable")]
    #[token("__nullable")]
    NullableQual,

    #[token("_Null_unspecified")]
    #[token("__null_unspecified")]
    NullUnspecifiedQual,

    #[token("__weak")]
    WeakQual,

    #[token("__strong")]
    StrongQual,

    #[token("__unsafe_unretained")]
    UnsafeUnretainedQual,

    #[token("__block")]
    BlockQual,

    #[token("__kindof")]
    KindofQual,

    // ------------------------------------------------------------------
    // Literals, identifiers, trivia
    // ------------------------------------------------------------------
    /// `@"..."` Objective-C string literal.
    #[regex(r#"@"(?:[^"\\]|\\.)*""#)]
    AtString,

    /// Plain C string literal.
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    CString,

    #[regex(r"'(?:[^'\\]|\\.)'")]
    CharLiteral,

    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*|[0-9]+[uUlL]*")]
    IntNumber,

    #[regex(r"[0-9]+\.[0-9]+(?:[eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fF]?")]
    #[regex(r"[0-9]+[fF]")]
    FloatNumber,

    /// Preprocessor line, captured verbatim through end of line.
    #[regex(r"#[^\n]*", allow_greedy = true)]
    PreprocLine,

    /// Identifier. Keywords are defined above and take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced run of unrecognized characters.
    Garbage,

    /// EOF / out-of-bounds sentinel.
    Error,

    // ------------------------------------------------------------------
    // Node kinds (no lexer attributes below this point)
    // ------------------------------------------------------------------
    Root,
    InterfaceDecl,
    ImplementationDecl,
    ProtocolDecl,
    ProtocolRefList,
    IvarBlock,
    IvarDecl,
    PropertyDecl,
    PropertyAttributeList,
    PropertyAttribute,
    MethodDecl,
    TypeClause,
    SelectorPiece,
    EnumDecl,
    EnumMember,
    StructDecl,
    StructField,
    TypedefDecl,
    GlobalVarDecl,
    FunctionDecl,
    ParamList,
    Param,
    TypeNode,

    CompoundStmt,
    IfStmt,
    WhileStmt,
    DoWhileStmt,
    ForStmt,
    ForInStmt,
    SwitchStmt,
    SwitchCase,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    ExprStmt,
    VarDeclStmt,
    VarDeclarator,

    IdentExpr,
    LiteralExpr,
    ObjcArrayLiteral,
    ObjcDictLiteral,
    BoxedExpr,
    MessageSend,
    MessageArg,
    SelectorExpr,
    CallExpr,
    SubscriptExpr,
    MemberExpr,
    BinaryExpr,
    UnaryExpr,
    PostfixUnaryExpr,
    TernaryExpr,
    AssignExpr,
    CastExpr,
    ParenExpr,
    BlockLiteral,
    SizeofExpr,
    ErrorNode,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment
        )
    }

    /// Nullability qualifier tokens usable inside type annotations.
    pub fn is_nullability_qual(self) -> bool {
        matches!(
            self,
            SyntaxKind::NonnullQual | SyntaxKind::NullableQual | SyntaxKind::NullUnspecifiedQual
        )
    }

    pub fn is_storage_qual(self) -> bool {
        matches!(
            self,
            SyntaxKind::WeakQual
                | SyntaxKind::StrongQual
                | SyntaxKind::UnsafeUnretainedQual
                | SyntaxKind::BlockQual
                | SyntaxKind::KindofQual
        )
    }

    /// Keywords that may begin a primitive C type.
    pub fn is_primitive_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::KwUnsigned
                | SyntaxKind::KwSigned
                | SyntaxKind::KwLong
                | SyntaxKind::KwShort
                | SyntaxKind::KwInt
                | SyntaxKind::KwChar
                | SyntaxKind::KwFloat
                | SyntaxKind::KwDouble
                | SyntaxKind::KwVoid
        )
    }
}

/// Language tag for Rowan trees of the Objective-C subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjcLang {}

impl Language for ObjcLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: SyntaxKind is repr(u16), contiguous, and bounds-checked.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ObjcLang>;
pub type SyntaxToken = rowan::SyntaxToken<ObjcLang>;
pub type SyntaxElement = rowan::SyntaxElement<ObjcLang>;

/// Compact set of syntax kinds, for `at_set` parser checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet([u64; 4]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0; 4]);

    pub const fn new(kinds: &[SyntaxKind]) -> TokenSet {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16 as usize;
            bits[kind / 64] |= 1u64 << (kind % 64);
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet([
            self.0[0] | other.0[0],
            self.0[1] | other.0[1],
            self.0[2] | other.0[2],
            self.0[3] | other.0[3],
        ])
    }

    pub const fn contains(self, kind: SyntaxKind) -> bool {
        let kind = kind as u16 as usize;
        kind < 256 && (self.0[kind / 64] >> (kind % 64)) & 1 != 0
    }
}

pub mod token_sets {
    use super::{SyntaxKind, TokenSet};

    /// Tokens that can begin a top-level declaration; used for recovery.
    pub const DECL_RECOVERY: TokenSet = TokenSet::new(&[
        SyntaxKind::AtInterface,
        SyntaxKind::AtImplementation,
        SyntaxKind::AtProtocol,
        SyntaxKind::AtEnd,
        SyntaxKind::AtProperty,
        SyntaxKind::KwTypedef,
        SyntaxKind::PreprocLine,
        SyntaxKind::NonnullBegin,
        SyntaxKind::NonnullEnd,
    ]);

    /// Tokens that terminate statement recovery.
    pub const STMT_RECOVERY: TokenSet = TokenSet::new(&[
        SyntaxKind::Semicolon,
        SyntaxKind::BraceClose,
        SyntaxKind::AtEnd,
    ]);

    /// Tokens that may begin an expression.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        SyntaxKind::Ident,
        SyntaxKind::IntNumber,
        SyntaxKind::FloatNumber,
        SyntaxKind::AtString,
        SyntaxKind::CString,
        SyntaxKind::CharLiteral,
        SyntaxKind::ParenOpen,
        SyntaxKind::BracketOpen,
        SyntaxKind::AtBracketOpen,
        SyntaxKind::AtBraceOpen,
        SyntaxKind::AtParenOpen,
        SyntaxKind::AtYes,
        SyntaxKind::AtNo,
        SyntaxKind::At,
        SyntaxKind::AtSelector,
        SyntaxKind::KwSelf,
        SyntaxKind::KwSuper,
        SyntaxKind::KwNil,
        SyntaxKind::KwNilUpper,
        SyntaxKind::KwNull,
        SyntaxKind::KwYes,
        SyntaxKind::KwNo,
        SyntaxKind::KwTrue,
        SyntaxKind::KwFalse,
        SyntaxKind::KwSizeof,
        SyntaxKind::Minus,
        SyntaxKind::Plus,
        SyntaxKind::Bang,
        SyntaxKind::Tilde,
        SyntaxKind::Star,
        SyntaxKind::Amp,
        SyntaxKind::PlusPlus,
        SyntaxKind::MinusMinus,
        SyntaxKind::Caret,
    ]);
}
