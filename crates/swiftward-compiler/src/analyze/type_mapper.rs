//! Objective-C → Swift type mapping.
//!
//! # Nullability
//!
//! Only reference-like types (object pointers, `id`, blocks) take optional
//! wrapping. The wrap is chosen from explicit qualifiers first, then the
//! declaration's `NS_ASSUME_NONNULL` context:
//!
//! - `_Nullable` / `nullable`       → `T?`
//! - `_Nonnull` / `nonnull`         → `T`
//! - unannotated, in nonnull region → `T`
//! - unannotated, outside           → `T!`
//!
//! Value types (primitives, structs, enums) map unwrapped.

use swiftward_core::{ObjcType, SwiftType};

/// Nullability resolved for one declaration site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    Nonnull,
    Nullable,
    Unspecified,
}

/// Per-declaration mapping context.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapContext<'a> {
    /// Inside an `NS_ASSUME_NONNULL` region.
    pub in_nonnull_region: bool,
    /// The enclosing nominal, for `instancetype`.
    pub self_type: Option<&'a str>,
}

impl MapContext<'_> {
    fn default_nullability(&self) -> Nullability {
        if self.in_nonnull_region {
            Nullability::Nonnull
        } else {
            Nullability::Unspecified
        }
    }
}

fn explicit_nullability(qualifiers: &[&str]) -> Option<Nullability> {
    for qual in qualifiers {
        match *qual {
            "_Nullable" | "__nullable" | "nullable" => return Some(Nullability::Nullable),
            "_Nonnull" | "__nonnull" | "nonnull" => return Some(Nullability::Nonnull),
            "_Null_unspecified" | "__null_unspecified" | "null_unspecified" => {
                return Some(Nullability::Unspecified)
            }
            _ => {}
        }
    }
    None
}

fn apply_nullability(ty: SwiftType, nullability: Nullability) -> SwiftType {
    match nullability {
        Nullability::Nonnull => ty,
        Nullability::Nullable => SwiftType::optional(ty),
        Nullability::Unspecified => SwiftType::implicitly_unwrapped_optional(ty),
    }
}

/// Primitive and Foundation scalar names.
fn scalar_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "NSInteger" | "long" | "long int" => "Int",
        "NSUInteger" | "unsigned long" | "unsigned long int" | "unsigned" => "UInt",
        "int" | "signed int" | "signed" => "Int32",
        "unsigned int" => "UInt32",
        "short" | "short int" => "Int16",
        "unsigned short" => "UInt16",
        "char" | "signed char" => "Int8",
        "unsigned char" => "UInt8",
        "long long" | "long long int" => "Int64",
        "unsigned long long" => "UInt64",
        "float" => "Float",
        "double" => "Double",
        "CGFloat" => "CGFloat",
        "BOOL" | "bool" => "Bool",
        "NSTimeInterval" => "TimeInterval",
        "SEL" => "Selector",
        _ => return None,
    })
}

/// Object-pointer classes bridged to Swift value types.
fn bridged_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "NSString" => "String",
        _ => return None,
    })
}

/// Maps an Objective-C type to its Swift rendering under the given context.
pub fn map_type(objc: &ObjcType, ctx: MapContext<'_>) -> SwiftType {
    let qualifiers = objc.qualifiers();
    let nullability = explicit_nullability(&qualifiers).unwrap_or_else(|| ctx.default_nullability());
    map_core(objc.unqualified(), ctx, nullability)
}

fn map_core(objc: &ObjcType, ctx: MapContext<'_>, nullability: Nullability) -> SwiftType {
    match objc {
        ObjcType::Void => SwiftType::VOID,
        ObjcType::Instancetype => {
            let name = ctx.self_type.unwrap_or("AnyObject");
            apply_nullability(SwiftType::type_name(name), nullability)
        }
        ObjcType::Id { protocols } => {
            let base = match protocols.len() {
                0 => SwiftType::any_object(),
                1 => SwiftType::type_name(&protocols[0]),
                _ => SwiftType::ProtocolComposition(
                    protocols
                        .iter()
                        .map(|p| {
                            swiftward_core::CompositionMember::Nominal(
                                swiftward_core::NominalType::TypeName(p.clone()),
                            )
                        })
                        .collect(),
                ),
            };
            apply_nullability(base, nullability)
        }
        ObjcType::Struct(name) => match scalar_name(name) {
            Some(scalar) => SwiftType::type_name(scalar),
            None => SwiftType::type_name(name.clone()),
        },
        ObjcType::Pointer(pointee) => map_pointer(pointee, ctx, nullability),
        ObjcType::Generic(name, args) => map_generic(name, args, ctx),
        ObjcType::Qualified(inner, quals) => {
            let explicit = explicit_nullability(&quals.iter().map(String::as_str).collect::<Vec<_>>());
            map_core(inner, ctx, explicit.unwrap_or(nullability))
        }
        ObjcType::Specified(_, inner) => map_core(inner, ctx, nullability),
        ObjcType::Block {
            return_type,
            parameters,
            ..
        } => {
            let block = SwiftType::block(
                map_type(return_type, ctx),
                parameters.iter().map(|p| map_type(p, ctx)),
            );
            apply_nullability(block, nullability)
        }
        ObjcType::FunctionPointer {
            return_type,
            parameters,
            ..
        } => {
            let block = SwiftType::block(
                map_type(return_type, ctx),
                parameters.iter().map(|p| map_type(p, ctx)),
            );
            apply_nullability(block, nullability)
        }
        ObjcType::FixedArray(element, _) => SwiftType::array(map_type(element, ctx)),
    }
}

fn map_pointer(pointee: &ObjcType, ctx: MapContext<'_>, nullability: Nullability) -> SwiftType {
    match pointee.unqualified() {
        // `void *`
        ObjcType::Void => apply_nullability(SwiftType::type_name("UnsafeMutableRawPointer"), nullability),
        ObjcType::Struct(name) => {
            if let Some(bridged) = bridged_name(name) {
                return apply_nullability(SwiftType::type_name(bridged), nullability);
            }
            if let Some(scalar) = scalar_name(name) {
                // Pointer to a scalar: an out-parameter shape.
                return apply_nullability(
                    SwiftType::generic("UnsafeMutablePointer", [SwiftType::type_name(scalar)]),
                    nullability,
                );
            }
            apply_nullability(SwiftType::type_name(name.clone()), nullability)
        }
        ObjcType::Generic(name, args) => apply_nullability(map_generic(name, args, ctx), nullability),
        ObjcType::Id { .. } => {
            // `id *` — out-parameter of object references.
            let inner = map_core(pointee.unqualified(), ctx, Nullability::Nullable);
            apply_nullability(
                SwiftType::generic("UnsafeMutablePointer", [inner]),
                nullability,
            )
        }
        other => {
            let inner = map_core(other, ctx, Nullability::Nonnull);
            apply_nullability(
                SwiftType::generic("UnsafeMutablePointer", [inner]),
                nullability,
            )
        }
    }
}

fn map_generic(name: &str, args: &[ObjcType], ctx: MapContext<'_>) -> SwiftType {
    let mapped: Vec<SwiftType> = args
        .iter()
        .map(|a| {
            // Elements inside generic collections are nonnull by
            // convention; `NSArray<NSString *> *` holds `String`s.
            let ctx = MapContext {
                in_nonnull_region: true,
                ..ctx
            };
            map_type(a, ctx)
        })
        .collect();

    match (name, mapped.len()) {
        ("NSArray", 1) => SwiftType::array(mapped.into_iter().next().expect("len checked")),
        ("NSDictionary", 2) => {
            let mut iter = mapped.into_iter();
            let key = iter.next().expect("len checked");
            let value = iter.next().expect("len checked");
            SwiftType::dictionary(key, value)
        }
        _ => SwiftType::generic(name, mapped),
    }
}
