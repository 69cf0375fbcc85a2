//! Attribute parsing for the Introspect derive macro

use darling::{FromDeriveInput, FromField};
use syn::{DeriveInput, Generics, Ident, Type};

/// Parsed #[introspect(...)] attributes on the struct
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(introspect), supports(struct_named))]
pub struct IntrospectArgs {
    /// Struct identifier
    pub ident: Ident,

    pub generics: Generics,

    /// Struct fields
    pub data: darling::ast::Data<(), IntrospectFieldArgs>,

    /// Host class name (defaults to the struct name)
    #[darling(default)]
    pub name: Option<String>,

    /// Declare a zero-argument constructor backed by `Default`
    #[darling(default)]
    pub default_constructor: bool,

    /// Let instances travel as `Value::Object`, so the struct can be the
    /// type of another struct's field (requires `Clone`)
    #[darling(default)]
    pub value: bool,
}

impl IntrospectArgs {
    pub fn class_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }
}

/// Parsed #[introspect(...)] attributes on a field
#[derive(Debug, FromField)]
#[darling(attributes(introspect))]
pub struct IntrospectFieldArgs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Leave the field out of the declaration
    #[darling(default)]
    pub skip: bool,

    /// Declared field name, if different from the Rust identifier
    #[darling(default)]
    pub rename: Option<String>,

    /// Declare as a static final constant: readable, never writable
    #[darling(default)]
    pub constant: bool,
}

impl IntrospectFieldArgs {
    /// Name the field is declared under
    pub fn declared_name(&self) -> Option<String> {
        let ident = self.ident.as_ref()?;
        Some(self.rename.clone().unwrap_or_else(|| {
            let name = ident.to_string();
            name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
        }))
    }
}

/// Parse a DeriveInput into IntrospectArgs
pub fn parse_introspect(input: &DeriveInput) -> darling::Result<IntrospectArgs> {
    IntrospectArgs::from_derive_input(input)
}
