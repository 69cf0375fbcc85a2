//! The type-introspection interface consumed by the resolution engine

use crate::descriptor::{TypeDescriptor, TypeExpr};
use crate::member::{ConstructorDescriptor, FieldDescriptor, MethodDescriptor};

/// Host runtime type introspection
///
/// Everything the accessor-resolution engine knows about a type comes
/// through this trait. Implementations must be pure: asking the same
/// question twice returns the same answer, in the same order.
pub trait TypeIntrospector: Send + Sync {
    /// Direct superclass, `None` for the root type, interfaces and unknown types
    fn superclass(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor>;

    /// Interfaces directly implemented (or, for an interface, extended) by `ty`
    fn interfaces(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor>;

    /// Methods declared on `ty` itself, in declaration order
    fn declared_methods(&self, ty: &TypeDescriptor) -> Vec<MethodDescriptor>;

    /// Every method visible on an interface, including those inherited from
    /// its super-interfaces
    fn interface_methods(&self, iface: &TypeDescriptor) -> Vec<MethodDescriptor>;

    /// Fields declared on `ty` itself, in declaration order
    fn declared_fields(&self, ty: &TypeDescriptor) -> Vec<FieldDescriptor>;

    fn declared_constructors(&self, ty: &TypeDescriptor) -> Vec<ConstructorDescriptor>;

    /// Whether a value of type `source` can be stored in a slot of type `target`
    fn is_assignable_from(&self, target: &TypeDescriptor, source: &TypeDescriptor) -> bool;

    /// Resolve a member's declared type to a concrete type, as seen from `owner`.
    ///
    /// `declaring` is the type that declares the member; `owner` is the
    /// (possibly more derived) type whose model is being built.
    fn resolve_declared_type(
        &self,
        declared: &TypeExpr,
        declaring: &TypeDescriptor,
        owner: &TypeDescriptor,
    ) -> TypeDescriptor;
}

/// Rust types that can describe themselves to a host registry
///
/// Implemented by `#[derive(Introspect)]`.
pub trait Introspect: crate::value::HostType {
    fn declare() -> crate::registry::ClassDecl;
}
