//! propmeta proc macros
//!
//! - `#[derive(Introspect)]` - Describe a Rust struct to the host runtime
//!
//! # Example
//!
//! ```ignore
//! use propmeta_core::Introspect;
//!
//! #[derive(Default, Clone, Introspect)]
//! #[introspect(name = "Person", default_constructor)]
//! pub struct Person {
//!     name: String,
//!
//!     #[introspect(rename = "years")]
//!     age: i32,
//!
//!     #[introspect(constant)]
//!     species: String,
//!
//!     #[introspect(skip)]
//!     cache: Vec<u8>,
//! }
//!
//! let registry = TypeRegistry::new();
//! let person = registry.register_type::<Person>();
//! ```
//!
//! # Attributes
//!
//! ## Struct Attributes
//!
//! - `#[introspect(name = "ClassName")]` - Host class name (default: the struct name).
//! - `#[introspect(default_constructor)]` - Declare a zero-argument constructor using `Default`.
//! - `#[introspect(value)]` - Implement `From<Self> for Value` and `FromValue` so the
//!   struct can be used as a field type of other introspected structs.
//!
//! ## Field Attributes
//!
//! - `#[introspect(skip)]` - Don't declare the field.
//! - `#[introspect(rename = "name")]` - Declare the field under another name.
//! - `#[introspect(constant)]` - Declare as static final; it never gets a setter.
//!
//! Declared field types must implement `HostType`, `FromValue` and `Clone`,
//! and `Value: From<T>`.

mod introspect;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive macro for host type declarations
///
/// # Generated Code
///
/// - `impl HostType` returning the class descriptor
/// - `impl Introspect` whose `declare()` lists every field with read and
///   write handles that downcast the target to the struct
/// - With `value`, conversions to and from `Value::Object`
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    introspect::derive_introspect(input).into()
}
