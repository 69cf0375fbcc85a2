//! propmeta - accessor resolution and property model caching
//!
//! Given a host type, this crate works out which logical properties it
//! exposes and how to read and write each one, then caches the result.
//!
//! # Re-exports
//!
//! - [`types`] - Type descriptors, member descriptors and the host registry
//! - [`Introspect`] - Derive macro declaring a Rust struct to the registry

// Allow the crate to refer to itself as `propmeta_core` for proc macro compatibility
extern crate self as propmeta_core;

pub use propmeta_types as types;

pub mod config;
pub mod error;
pub mod logging;
pub mod reflect;

pub use config::{config_path, ConfigError, ConfigResult, ReflectorConfig};
pub use error::{ReflectionError, ReflectionResult};
pub use logging::init_logging;
pub use reflect::{
    Accessor, Constructor, MetaType, ModelStore, PropertyEntry, PropertyModel, PropertyPath,
};

// Re-export macros
pub use propmeta_macros::Introspect;
