#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core type models for Swiftward.
//!
//! Two type languages live here:
//! - **Swift side**: [`SwiftType`] is the resolved-type vocabulary the rewrite
//!   pipeline annotates expressions with, plus the textual parser for it.
//! - **Objective-C side**: [`ObjcType`] mirrors declared source types before
//!   nullability mapping turns them into Swift types.
//!
//! Method identity is split the same way the languages split it:
//! [`SelectorSignature`] is the label-only Objective-C identity,
//! [`FunctionSignature`] the fully-typed Swift one.

pub mod colors;
pub mod objc_type;
pub mod signature;
pub mod swift_type;
pub mod type_parser;
pub mod utils;

#[cfg(test)]
mod objc_type_tests;
#[cfg(test)]
mod signature_tests;
#[cfg(test)]
mod swift_type_tests;
#[cfg(test)]
mod type_parser_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use objc_type::ObjcType;
pub use signature::{FunctionSignature, ParameterSignature, SelectorSignature};
pub use swift_type::{CompositionMember, NominalType, Ownership, SwiftType, TupleShape};
pub use type_parser::{TypeParseError, parse_swift_type};
