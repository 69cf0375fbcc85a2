//! Error types for property resolution and lookup

use propmeta_types::{InvokeError, TypeDescriptor};

/// Error type for property model operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReflectionError {
    /// A member name reached the naming classifier without a get/set/is shape
    #[error("Error parsing property name '{0}'.  Didn't start with 'is', 'get' or 'set'.")]
    InvalidAccessorName(String),

    #[error("There is no default constructor for {ty}")]
    NoDefaultConstructor { ty: TypeDescriptor },

    #[error("There is no getter for property named '{property}' in '{ty}'")]
    NoSuchGetter { property: String, ty: TypeDescriptor },

    #[error("There is no setter for property named '{property}' in '{ty}'")]
    NoSuchSetter { property: String, ty: TypeDescriptor },

    /// The property exists but its declarations could not be reconciled
    #[error("{0}")]
    AmbiguousAccessor(String),

    /// The underlying member handle failed
    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

/// Result type for property model operations
pub type ReflectionResult<T> = Result<T, ReflectionError>;
