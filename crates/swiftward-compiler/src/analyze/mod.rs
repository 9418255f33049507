//! Semantic analysis: nullability regions, intention collection, type
//! mapping, type system, and overload resolution.

pub mod collect;
pub mod intentions;
pub mod nullability;
pub mod objc_types;
pub mod overloads;
pub mod type_mapper;
pub mod type_system;

#[cfg(test)]
mod collect_tests;
#[cfg(test)]
mod overloads_tests;
#[cfg(test)]
mod type_system_tests;

pub use collect::collect_file;
pub use intentions::{FileIntentions, IntentionGraph};
pub use overloads::{OverloadArgument, OverloadResolver};
pub use type_system::{IntentionTypeSystem, StubTypeSystem, TypeSystem};
