//! Property accessors
//!
//! An [`Accessor`] is the capability to read or write one property. It is
//! backed by a method, by a raw field, or is ambiguous; the ambiguous case
//! keeps its place in the model and fails only when invoked.

use std::any::Any;

use propmeta_types::{
    ConstructorDescriptor, FieldDescriptor, InvokeError, MethodDescriptor, TypeDescriptor, Value,
};

use crate::error::{ReflectionError, ReflectionResult};

/// Read or write capability for a single property
#[derive(Debug, Clone)]
pub enum Accessor {
    /// Zero-argument `getX()` / `isX()` method
    MethodGetter {
        method: MethodDescriptor,
        declared_type: TypeDescriptor,
    },
    /// One-argument `setX(value)` method
    MethodSetter {
        method: MethodDescriptor,
        declared_type: TypeDescriptor,
    },
    FieldGetter {
        field: FieldDescriptor,
        declared_type: TypeDescriptor,
    },
    FieldSetter {
        field: FieldDescriptor,
        declared_type: TypeDescriptor,
    },
    /// Irreconcilable declarations; invoking fails with the recorded reason
    Ambiguous {
        reason: String,
        declared_type: TypeDescriptor,
    },
}

impl Accessor {
    /// Resolved property type this accessor reads or writes
    pub fn declared_type(&self) -> &TypeDescriptor {
        match self {
            Accessor::MethodGetter { declared_type, .. }
            | Accessor::MethodSetter { declared_type, .. }
            | Accessor::FieldGetter { declared_type, .. }
            | Accessor::FieldSetter { declared_type, .. }
            | Accessor::Ambiguous { declared_type, .. } => declared_type,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Accessor::Ambiguous { .. })
    }

    /// True when backed by a raw field rather than a method
    pub fn is_field(&self) -> bool {
        matches!(
            self,
            Accessor::FieldGetter { .. } | Accessor::FieldSetter { .. }
        )
    }

    /// Invoke against `target`.
    ///
    /// Method accessors pass `args` to the method handle. A field getter
    /// ignores them; a field setter takes exactly one argument and returns
    /// [`Value::Null`].
    pub fn invoke(&self, target: &mut dyn Any, args: &[Value]) -> ReflectionResult<Value> {
        match self {
            Accessor::MethodGetter { method, .. } | Accessor::MethodSetter { method, .. } => {
                Ok(method.invoke(target, args)?)
            }
            Accessor::FieldGetter { field, .. } => Ok(field.read(&*target)?),
            Accessor::FieldSetter { field, .. } => {
                let [value] = args else {
                    return Err(InvokeError::ArgumentCount {
                        expected: 1,
                        found: args.len(),
                    }
                    .into());
                };
                field.write(target, value.clone())?;
                Ok(Value::Null)
            }
            Accessor::Ambiguous { reason, .. } => {
                Err(ReflectionError::AmbiguousAccessor(reason.clone()))
            }
        }
    }

    /// Read the property from `target`
    pub fn get(&self, target: &mut dyn Any) -> ReflectionResult<Value> {
        self.invoke(target, &[])
    }

    /// Write `value` into `target`
    pub fn set(&self, target: &mut dyn Any, value: Value) -> ReflectionResult<()> {
        self.invoke(target, &[value]).map(|_| ())
    }
}

/// Zero-argument constructor of a type
#[derive(Debug, Clone)]
pub struct Constructor {
    descriptor: ConstructorDescriptor,
}

impl Constructor {
    pub(crate) fn new(descriptor: ConstructorDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn declaring_type(&self) -> &TypeDescriptor {
        &self.descriptor.declaring_type
    }

    pub fn descriptor(&self) -> &ConstructorDescriptor {
        &self.descriptor
    }

    /// Create a fresh instance
    pub fn new_instance(&self) -> ReflectionResult<Box<dyn Any + Send>> {
        Ok(self.descriptor.instantiate(&[])?)
    }
}
