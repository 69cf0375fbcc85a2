//! Accessor resolution - property models built from type introspection
//!
//! Turns the raw members a host reports for a type into a table of
//! logical properties, each with at most one getter and one setter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                TypeIntrospector (host runtime)              │
//! │   superclass / interfaces / declared members / assignable   │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PropertyModel::build                      │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │ signature::class_methods(ty)                        │   │
//! │  │   - walks superclasses and their interfaces         │   │
//! │  │   - most-derived declaration per signature wins     │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! │                          │                                  │
//! │  ┌─────────────────────────────────────────────────────┐   │
//! │  │ resolver: getters, then setters                     │   │
//! │  │ fields:   fallback for empty slots                  │   │
//! │  └─────────────────────────────────────────────────────┘   │
//! └─────────────────────────────┬───────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │   ModelStore (DashMap, publish once)  →  MetaType (paths)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use propmeta_core::reflect::ModelStore;
//! use propmeta_core::types::TypeRegistry;
//!
//! let registry = TypeRegistry::new();
//! let person = registry.register_type::<Person>();
//!
//! let store = ModelStore::with_defaults(Arc::new(registry));
//! let model = store.model_for(&person);
//!
//! let mut instance = model.default_constructor()?.new_instance()?;
//! model.setter_invoker("name")?.set(instance.as_mut(), "Ada".into())?;
//! ```

mod accessor;
mod fields;
mod meta;
mod model;
pub mod naming;
mod resolver;
pub mod signature;
mod store;

#[cfg(test)]
mod fixtures;

pub use accessor::{Accessor, Constructor};
pub use meta::{MetaType, PropertyPath};
pub use model::{PropertyEntry, PropertyModel};
pub use signature::MemberSignature;
pub use store::ModelStore;
