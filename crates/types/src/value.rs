//! Dynamic values passed through accessors
//!
//! The mapping layer never knows property types at compile time, so values
//! cross the accessor boundary as [`Value`]. Conversions to and from Rust
//! types go through `From<T> for Value` and [`FromValue`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;

/// Error raised by a member handle when it is invoked
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokeError {
    /// The target object is not an instance of the declaring type
    #[error("Target is not an instance of {expected}")]
    TargetMismatch { expected: String },

    #[error("Expected {expected} argument(s), got {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("Cannot convert {found} value to {expected}")]
    ArgumentType {
        expected: &'static str,
        found: &'static str,
    },

    /// The descriptor was registered without an executable handle
    #[error("Member '{0}' has no invocation handle")]
    Unbound(String),

    /// The member itself reported a failure
    #[error("Invocation failed: {0}")]
    Failed(String),
}

impl InvokeError {
    pub fn target_mismatch(expected: impl fmt::Display) -> Self {
        InvokeError::TargetMismatch {
            expected: expected.to_string(),
        }
    }
}

/// Dynamically typed property value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    /// Any other host object, shared
    Object(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Short name of the variant, used in conversion errors
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Wrap an arbitrary host object
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Value::Object(Arc::new(value))
    }

    /// Borrow the wrapped object as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Long(v) => f.debug_tuple("Long").field(v).finish(),
            Value::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Value::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Conversion out of a [`Value`]
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, InvokeError>;
}

macro_rules! impl_from_value {
    ($ty:ty, $expected:literal, $($pat:pat => $out:expr),+ $(,)?) => {
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, InvokeError> {
                match value {
                    $($pat => Ok($out),)+
                    other => Err(InvokeError::ArgumentType {
                        expected: $expected,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

impl_from_value!(bool, "bool", Value::Bool(v) => v);
impl_from_value!(i32, "int", Value::Int(v) => v);
impl_from_value!(i64, "long", Value::Long(v) => v, Value::Int(v) => i64::from(v));
impl_from_value!(f64, "double", Value::Double(v) => v, Value::Int(v) => f64::from(v));
impl_from_value!(String, "string", Value::Str(v) => v);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, InvokeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Rust types that have a descriptor in the host runtime
pub trait HostType {
    fn descriptor() -> TypeDescriptor;
}

impl HostType for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::BOOLEAN
    }
}

impl HostType for i32 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::INT
    }
}

impl HostType for i64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::LONG
    }
}

impl HostType for f64 {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::DOUBLE
    }
}

impl HostType for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::class("String")
    }
}

impl<T: HostType> HostType for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: HostType> HostType for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array_of(T::descriptor())
    }
}
