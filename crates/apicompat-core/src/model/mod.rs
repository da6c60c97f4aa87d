//! Read-only object model of an API surface.
//!
//! The model is produced by a metadata provider (surface files loaded by
//! `apicompat-store`, or builders in tests) and is never mutated by the
//! comparison engine.

pub mod assembly;
pub mod attribute;
pub mod element;
pub mod member;
pub mod type_def;

pub use assembly::{AssemblyDef, NamespaceDef, TypeForwarderDef};
pub use attribute::AttributeDef;
pub use element::{Element, ElementKind};
pub use member::{MemberDef, MemberKind, ParameterDef};
pub use type_def::{TypeDef, TypeKind, Visibility};
