//! propmeta types - host runtime type model
//!
//! This crate defines what the accessor-resolution engine consumes: type
//! descriptors, member descriptors with their executable handles, dynamic
//! values, and the [`TypeIntrospector`] interface. It also ships an
//! in-memory host, [`TypeRegistry`], which `#[derive(Introspect)]` types
//! and hand-written [`ClassDecl`]s register into.
//!
//! # Modules
//!
//! - [`descriptor`] - Concrete type handles and declared type expressions
//! - [`member`] - Method, field and constructor descriptors
//! - [`value`] - Dynamic values and conversions
//! - [`introspect`] - The introspection interface
//! - [`registry`] - In-memory host runtime with generic type resolution

pub mod descriptor;
pub mod introspect;
pub mod member;
pub mod registry;
pub mod value;

pub use descriptor::{Primitive, TypeDescriptor, TypeExpr, ROOT_TYPE_NAME};
pub use introspect::{Introspect, TypeIntrospector};
pub use member::{
    ConstructorDescriptor, ConstructorHandle, FieldDescriptor, FieldHandle, MethodDescriptor,
    MethodHandle, Modifiers,
};
pub use registry::{ClassDecl, DeclKind, TypeRegistry};
pub use value::{FromValue, HostType, InvokeError, Value};
