//! Swift type representation.
//!
//! # Design Decisions
//!
//! ## Closed sum, value semantics
//!
//! `SwiftType` is a plain tagged union with structural equality and hashing.
//! Resolved types are copied freely onto expressions during the annotation
//! pass, so the representation stays boxed-but-owned rather than interned.
//!
//! ## Normalization
//!
//! Three textual identities hold after [`SwiftType::normalized`]:
//! - a 1-ary tuple is its element: `(T)` ≡ `T`
//! - optionals of the same flavor never nest: `T??` ≡ `T?`
//! - `Void` is the empty tuple
//!
//! The smart constructors ([`SwiftType::optional`], [`SwiftType::tuple`])
//! maintain these on construction; `normalized` re-establishes them for types
//! assembled variant-by-variant (e.g. by the type parser).
//!
//! ## One metatype
//!
//! Both `.Type` and `.Protocol` suffixes collapse into the single
//! [`SwiftType::Metatype`] variant; the distinction carries no weight in the
//! modeled subset.

use serde::Serialize;

/// A nominal (named) type, optionally with generic arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum NominalType {
    TypeName(String),
    Generic(String, Vec<SwiftType>),
}

impl NominalType {
    pub fn name(&self) -> &str {
        match self {
            NominalType::TypeName(name) | NominalType::Generic(name, _) => name,
        }
    }
}

impl std::fmt::Display for NominalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NominalType::TypeName(name) => f.write_str(name),
            NominalType::Generic(name, args) => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Shape of a tuple type. A 1-ary tuple is not representable; it normalizes
/// to its element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TupleShape {
    Empty,
    Types(Vec<SwiftType>),
}

/// A member of a protocol composition: either a plain nominal or a dotted
/// nested nominal chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CompositionMember {
    Nominal(NominalType),
    Nested(Vec<NominalType>),
}

impl std::fmt::Display for CompositionMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompositionMember::Nominal(nominal) => write!(f, "{nominal}"),
            CompositionMember::Nested(path) => write_nested(f, path),
        }
    }
}

/// Reference ownership for variables and properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Ownership {
    #[default]
    Strong,
    Weak,
    UnownedSafe,
    UnownedUnsafe,
}

impl Ownership {
    /// The Swift declaration-modifier spelling; empty for strong.
    pub fn keyword(self) -> &'static str {
        match self {
            Ownership::Strong => "",
            Ownership::Weak => "weak",
            Ownership::UnownedSafe => "unowned(safe)",
            Ownership::UnownedUnsafe => "unowned(unsafe)",
        }
    }
}

/// A Swift type signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum SwiftType {
    Nominal(NominalType),
    /// Dotted qualified type: `Outer.Inner.Leaf`. Always ≥ 2 components.
    Nested(Vec<NominalType>),
    /// `A & B & C`
    ProtocolComposition(Vec<CompositionMember>),
    Tuple(TupleShape),
    Block {
        return_type: Box<SwiftType>,
        parameters: Vec<SwiftType>,
    },
    Metatype(Box<SwiftType>),
    Optional(Box<SwiftType>),
    ImplicitlyUnwrappedOptional(Box<SwiftType>),
    Array(Box<SwiftType>),
    Dictionary(Box<SwiftType>, Box<SwiftType>),
    /// Sentinel for "type unknown"; produced when resolution fails.
    Error,
}

impl SwiftType {
    pub const VOID: SwiftType = SwiftType::Tuple(TupleShape::Empty);

    pub fn type_name(name: impl Into<String>) -> SwiftType {
        SwiftType::Nominal(NominalType::TypeName(name.into()))
    }

    pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = SwiftType>) -> SwiftType {
        let args: Vec<_> = args.into_iter().collect();
        let name = name.into();
        if args.is_empty() {
            SwiftType::Nominal(NominalType::TypeName(name))
        } else {
            SwiftType::Nominal(NominalType::Generic(name, args))
        }
    }

    /// Wraps in `Optional`, collapsing an already-optional type.
    pub fn optional(ty: SwiftType) -> SwiftType {
        match ty {
            SwiftType::Optional(_) => ty,
            other => SwiftType::Optional(Box::new(other)),
        }
    }

    /// Wraps in an implicitly-unwrapped optional, collapsing a same-flavor wrap.
    pub fn implicitly_unwrapped_optional(ty: SwiftType) -> SwiftType {
        match ty {
            SwiftType::ImplicitlyUnwrappedOptional(_) => ty,
            other => SwiftType::ImplicitlyUnwrappedOptional(Box::new(other)),
        }
    }

    /// Builds a tuple; the empty list is `Void` and a single element is the
    /// element itself.
    pub fn tuple(types: impl IntoIterator<Item = SwiftType>) -> SwiftType {
        let mut types: Vec<_> = types.into_iter().collect();
        match types.len() {
            0 => SwiftType::VOID,
            1 => types.remove(0),
            _ => SwiftType::Tuple(TupleShape::Types(types)),
        }
    }

    pub fn block(
        return_type: SwiftType,
        parameters: impl IntoIterator<Item = SwiftType>,
    ) -> SwiftType {
        SwiftType::Block {
            return_type: Box::new(return_type),
            parameters: parameters.into_iter().collect(),
        }
    }

    pub fn metatype(ty: SwiftType) -> SwiftType {
        SwiftType::Metatype(Box::new(ty))
    }

    pub fn array(element: SwiftType) -> SwiftType {
        SwiftType::Array(Box::new(element))
    }

    pub fn dictionary(key: SwiftType, value: SwiftType) -> SwiftType {
        SwiftType::Dictionary(Box::new(key), Box::new(value))
    }

    pub fn int() -> SwiftType {
        SwiftType::type_name("Int")
    }

    pub fn uint() -> SwiftType {
        SwiftType::type_name("UInt")
    }

    pub fn double() -> SwiftType {
        SwiftType::type_name("Double")
    }

    pub fn float() -> SwiftType {
        SwiftType::type_name("Float")
    }

    pub fn cg_float() -> SwiftType {
        SwiftType::type_name("CGFloat")
    }

    pub fn bool() -> SwiftType {
        SwiftType::type_name("Bool")
    }

    pub fn string() -> SwiftType {
        SwiftType::type_name("String")
    }

    pub fn any_object() -> SwiftType {
        SwiftType::type_name("AnyObject")
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            SwiftType::Optional(_) | SwiftType::ImplicitlyUnwrappedOptional(_)
        )
    }

    pub fn is_void(&self) -> bool {
        matches!(self, SwiftType::Tuple(TupleShape::Empty))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SwiftType::Error)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, SwiftType::Block { .. })
    }

    /// The bare type name, if this is a non-generic nominal.
    pub fn as_type_name(&self) -> Option<&str> {
        match self {
            SwiftType::Nominal(NominalType::TypeName(name)) => Some(name),
            _ => None,
        }
    }

    /// The nominal, through any number of optional wrappers.
    pub fn as_nominal(&self) -> Option<&NominalType> {
        match self.deep_unwrapped() {
            SwiftType::Nominal(nominal) => Some(nominal),
            _ => None,
        }
    }

    /// Strips one optional layer, if any.
    pub fn unwrapped(&self) -> &SwiftType {
        match self {
            SwiftType::Optional(inner) | SwiftType::ImplicitlyUnwrappedOptional(inner) => inner,
            other => other,
        }
    }

    /// Strips optional layers repeatedly.
    pub fn deep_unwrapped(&self) -> &SwiftType {
        let mut current = self;
        while let SwiftType::Optional(inner) | SwiftType::ImplicitlyUnwrappedOptional(inner) =
            current
        {
            current = inner;
        }
        current
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.as_type_name(),
            Some(
                "Int" | "Int8" | "Int16" | "Int32" | "Int64" | "UInt" | "UInt8" | "UInt16"
                    | "UInt32" | "UInt64"
            )
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self.as_type_name(),
            Some("Float" | "Double" | "CGFloat" | "Float80")
        )
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Re-establishes the structural identities described in the module docs.
    pub fn normalized(&self) -> SwiftType {
        match self {
            SwiftType::Nominal(nominal) => SwiftType::Nominal(normalize_nominal(nominal)),
            SwiftType::Nested(path) => {
                let path: Vec<_> = path.iter().map(normalize_nominal).collect();
                if path.len() == 1 {
                    SwiftType::Nominal(path.into_iter().next().expect("len checked"))
                } else {
                    SwiftType::Nested(path)
                }
            }
            SwiftType::ProtocolComposition(members) => {
                let members = members
                    .iter()
                    .map(|member| match member {
                        CompositionMember::Nominal(nominal) => {
                            CompositionMember::Nominal(normalize_nominal(nominal))
                        }
                        CompositionMember::Nested(path) => {
                            let path: Vec<_> = path.iter().map(normalize_nominal).collect();
                            if path.len() == 1 {
                                CompositionMember::Nominal(
                                    path.into_iter().next().expect("len checked"),
                                )
                            } else {
                                CompositionMember::Nested(path)
                            }
                        }
                    })
                    .collect();
                SwiftType::ProtocolComposition(members)
            }
            SwiftType::Tuple(TupleShape::Empty) => SwiftType::VOID,
            SwiftType::Tuple(TupleShape::Types(types)) => {
                SwiftType::tuple(types.iter().map(SwiftType::normalized))
            }
            SwiftType::Block {
                return_type,
                parameters,
            } => SwiftType::block(
                return_type.normalized(),
                parameters.iter().map(SwiftType::normalized),
            ),
            SwiftType::Metatype(inner) => SwiftType::metatype(inner.normalized()),
            SwiftType::Optional(inner) => SwiftType::optional(inner.normalized()),
            SwiftType::ImplicitlyUnwrappedOptional(inner) => {
                SwiftType::implicitly_unwrapped_optional(inner.normalized())
            }
            SwiftType::Array(element) => SwiftType::array(element.normalized()),
            SwiftType::Dictionary(key, value) => {
                SwiftType::dictionary(key.normalized(), value.normalized())
            }
            SwiftType::Error => SwiftType::Error,
        }
    }

    /// True when the canonical rendering needs parentheses before a postfix
    /// suffix (`?`, `!`, `.Type`).
    fn needs_suffix_parens(&self) -> bool {
        matches!(
            self,
            SwiftType::Block { .. } | SwiftType::ProtocolComposition(_)
        )
    }
}

fn normalize_nominal(nominal: &NominalType) -> NominalType {
    match nominal {
        NominalType::TypeName(name) => NominalType::TypeName(name.clone()),
        NominalType::Generic(name, args) => {
            if args.is_empty() {
                NominalType::TypeName(name.clone())
            } else {
                NominalType::Generic(name.clone(), args.iter().map(SwiftType::normalized).collect())
            }
        }
    }
}

fn write_nested(f: &mut std::fmt::Formatter<'_>, path: &[NominalType]) -> std::fmt::Result {
    for (i, component) in path.iter().enumerate() {
        if i > 0 {
            f.write_str(".")?;
        }
        write!(f, "{component}")?;
    }
    Ok(())
}

impl std::fmt::Display for SwiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwiftType::Nominal(nominal) => write!(f, "{nominal}"),
            SwiftType::Nested(path) => write_nested(f, path),
            SwiftType::ProtocolComposition(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            SwiftType::Tuple(TupleShape::Empty) => f.write_str("Void"),
            SwiftType::Tuple(TupleShape::Types(types)) => {
                f.write_str("(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
            SwiftType::Block {
                return_type,
                parameters,
            } => {
                f.write_str("(")?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {return_type}")
            }
            SwiftType::Metatype(inner) => {
                if inner.needs_suffix_parens() {
                    write!(f, "({inner}).Type")
                } else {
                    write!(f, "{inner}.Type")
                }
            }
            SwiftType::Optional(inner) => {
                if inner.needs_suffix_parens() {
                    write!(f, "({inner})?")
                } else {
                    write!(f, "{inner}?")
                }
            }
            SwiftType::ImplicitlyUnwrappedOptional(inner) => {
                if inner.needs_suffix_parens() {
                    write!(f, "({inner})!")
                } else {
                    write!(f, "{inner}!")
                }
            }
            SwiftType::Array(element) => write!(f, "[{element}]"),
            SwiftType::Dictionary(key, value) => write!(f, "[{key}: {value}]"),
            SwiftType::Error => f.write_str("<<error type>>"),
        }
    }
}
