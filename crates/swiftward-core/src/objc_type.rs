//! Objective-C type representation.
//!
//! Declared source types as the frontend sees them, before nullability
//! mapping produces [`crate::SwiftType`]s. Qualifier and specifier lists are
//! kept as raw strings (`_Nullable`, `__weak`, `const`, `static`, ...);
//! [`ObjcType::normalized`] flattens nested qualified/specified chains and
//! drops empty lists so structurally-equal declarations compare equal.

use serde::Serialize;

/// An Objective-C type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ObjcType {
    /// `id` or `id<P1, P2>`
    Id { protocols: Vec<String> },
    Instancetype,
    /// A named non-pointer type: primitives, structs, typedef names.
    Struct(String),
    Void,
    Pointer(Box<ObjcType>),
    /// `NSArray<NSString *>` — lightweight generics on a named type.
    Generic(String, Vec<ObjcType>),
    /// Type with trailing qualifiers: `NSString * _Nullable`.
    Qualified(Box<ObjcType>, Vec<String>),
    /// Type with leading specifiers: `static const CGFloat`.
    Specified(Vec<String>, Box<ObjcType>),
    Block {
        name: Option<String>,
        return_type: Box<ObjcType>,
        parameters: Vec<ObjcType>,
    },
    FunctionPointer {
        name: Option<String>,
        return_type: Box<ObjcType>,
        parameters: Vec<ObjcType>,
    },
    FixedArray(Box<ObjcType>, usize),
}

impl ObjcType {
    pub fn id() -> ObjcType {
        ObjcType::Id {
            protocols: Vec::new(),
        }
    }

    pub fn struct_type(name: impl Into<String>) -> ObjcType {
        ObjcType::Struct(name.into())
    }

    pub fn pointer(pointee: ObjcType) -> ObjcType {
        ObjcType::Pointer(Box::new(pointee))
    }

    /// Wraps in qualifiers; a no-op for an empty list.
    pub fn qualified(ty: ObjcType, qualifiers: impl IntoIterator<Item = String>) -> ObjcType {
        let qualifiers: Vec<_> = qualifiers.into_iter().collect();
        if qualifiers.is_empty() {
            ty
        } else {
            ObjcType::Qualified(Box::new(ty), qualifiers)
        }
    }

    /// Wraps in specifiers; a no-op for an empty list.
    pub fn specified(specifiers: impl IntoIterator<Item = String>, ty: ObjcType) -> ObjcType {
        let specifiers: Vec<_> = specifiers.into_iter().collect();
        if specifiers.is_empty() {
            ty
        } else {
            ObjcType::Specified(specifiers, Box::new(ty))
        }
    }

    /// The type with all qualifier/specifier layers stripped.
    pub fn unqualified(&self) -> &ObjcType {
        match self {
            ObjcType::Qualified(inner, _) | ObjcType::Specified(_, inner) => inner.unqualified(),
            other => other,
        }
    }

    /// All qualifiers and specifiers applied anywhere in the outer layers.
    pub fn qualifiers(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut current = self;
        loop {
            match current {
                ObjcType::Qualified(inner, quals) => {
                    out.extend(quals.iter().map(String::as_str));
                    current = inner;
                }
                ObjcType::Specified(specs, inner) => {
                    out.extend(specs.iter().map(String::as_str));
                    current = inner;
                }
                _ => return out,
            }
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.unqualified(), ObjcType::Pointer(_))
    }

    /// Flattens nested qualified/specified chains and removes empty lists.
    pub fn normalized(&self) -> ObjcType {
        match self {
            ObjcType::Id { protocols } => ObjcType::Id {
                protocols: protocols.clone(),
            },
            ObjcType::Instancetype => ObjcType::Instancetype,
            ObjcType::Struct(name) => ObjcType::Struct(name.clone()),
            ObjcType::Void => ObjcType::Void,
            ObjcType::Pointer(pointee) => ObjcType::pointer(pointee.normalized()),
            ObjcType::Generic(name, args) => ObjcType::Generic(
                name.clone(),
                args.iter().map(ObjcType::normalized).collect(),
            ),
            ObjcType::Qualified(inner, qualifiers) => {
                let inner = inner.normalized();
                match inner {
                    ObjcType::Qualified(innermost, mut inner_quals) => {
                        inner_quals.extend(qualifiers.iter().cloned());
                        ObjcType::qualified(*innermost, inner_quals)
                    }
                    other => ObjcType::qualified(other, qualifiers.iter().cloned()),
                }
            }
            ObjcType::Specified(specifiers, inner) => {
                let inner = inner.normalized();
                match inner {
                    ObjcType::Specified(inner_specs, innermost) => {
                        let mut specs = specifiers.clone();
                        specs.extend(inner_specs);
                        ObjcType::specified(specs, *innermost)
                    }
                    other => ObjcType::specified(specifiers.iter().cloned(), other),
                }
            }
            ObjcType::Block {
                name,
                return_type,
                parameters,
            } => ObjcType::Block {
                name: name.clone(),
                return_type: Box::new(return_type.normalized()),
                parameters: parameters.iter().map(ObjcType::normalized).collect(),
            },
            ObjcType::FunctionPointer {
                name,
                return_type,
                parameters,
            } => ObjcType::FunctionPointer {
                name: name.clone(),
                return_type: Box::new(return_type.normalized()),
                parameters: parameters.iter().map(ObjcType::normalized).collect(),
            },
            ObjcType::FixedArray(element, length) => {
                ObjcType::FixedArray(Box::new(element.normalized()), *length)
            }
        }
    }
}

impl std::fmt::Display for ObjcType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjcType::Id { protocols } => {
                f.write_str("id")?;
                if !protocols.is_empty() {
                    write!(f, "<{}>", protocols.join(", "))?;
                }
                Ok(())
            }
            ObjcType::Instancetype => f.write_str("instancetype"),
            ObjcType::Struct(name) => f.write_str(name),
            ObjcType::Void => f.write_str("void"),
            ObjcType::Pointer(pointee) => write!(f, "{pointee}*"),
            ObjcType::Generic(name, args) => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            ObjcType::Qualified(inner, qualifiers) => {
                write!(f, "{inner} {}", qualifiers.join(" "))
            }
            ObjcType::Specified(specifiers, inner) => {
                write!(f, "{} {inner}", specifiers.join(" "))
            }
            ObjcType::Block {
                name,
                return_type,
                parameters,
            } => {
                write!(f, "{return_type} (^{})(", name.as_deref().unwrap_or(""))?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
            ObjcType::FunctionPointer {
                name,
                return_type,
                parameters,
            } => {
                write!(f, "{return_type} (*{})(", name.as_deref().unwrap_or(""))?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
            ObjcType::FixedArray(element, length) => write!(f, "{element}[{length}]"),
        }
    }
}
