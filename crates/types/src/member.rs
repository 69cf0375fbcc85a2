//! Member descriptors: methods, fields and constructors
//!
//! Descriptors are plain data plus an optional executable handle. Hosts
//! without a way to execute a member (for example a schema loaded from
//! disk) leave the handle unbound; invoking it then fails with
//! [`InvokeError::Unbound`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::descriptor::{TypeDescriptor, TypeExpr};
use crate::value::{InvokeError, Value};

bitflags! {
    /// Member modifier flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        const ABSTRACT = 1 << 5;
        /// Compiler-generated, no source counterpart
        const SYNTHETIC = 1 << 6;
        /// Bridge override introduced by generic erasure
        const BRIDGE = 1 << 7;
    }
}

type MethodFn = dyn Fn(&mut dyn Any, &[Value]) -> Result<Value, InvokeError> + Send + Sync;
type FieldGetFn = dyn Fn(&dyn Any) -> Result<Value, InvokeError> + Send + Sync;
type FieldSetFn = dyn Fn(&mut dyn Any, Value) -> Result<(), InvokeError> + Send + Sync;
type ConstructorFn = dyn Fn(&[Value]) -> Result<Box<dyn Any + Send>, InvokeError> + Send + Sync;

/// Executable body of a method
#[derive(Clone, Default)]
pub struct MethodHandle(Option<Arc<MethodFn>>);

impl MethodHandle {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Any, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_bound() { "MethodHandle" } else { "MethodHandle(unbound)" })
    }
}

/// Read and write access to a field's storage
#[derive(Clone, Default)]
pub struct FieldHandle {
    get: Option<Arc<FieldGetFn>>,
    set: Option<Arc<FieldSetFn>>,
}

impl FieldHandle {
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn(&dyn Any) -> Result<Value, InvokeError> + Send + Sync + 'static,
        S: Fn(&mut dyn Any, Value) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        Self {
            get: Some(Arc::new(get)),
            set: Some(Arc::new(set)),
        }
    }

    /// Handle that can only read
    pub fn read_only<G>(get: G) -> Self
    where
        G: Fn(&dyn Any) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        Self {
            get: Some(Arc::new(get)),
            set: None,
        }
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandle")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

/// Instantiates the declaring type
#[derive(Clone, Default)]
pub struct ConstructorHandle(Option<Arc<ConstructorFn>>);

impl ConstructorHandle {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Box<dyn Any + Send>, InvokeError> + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }
}

impl fmt::Debug for ConstructorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() { "ConstructorHandle" } else { "ConstructorHandle(unbound)" })
    }
}

/// A declared method
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub name: Arc<str>,
    /// Set by the host when the method is attached to a class
    pub declaring_type: TypeDescriptor,
    pub return_type: TypeExpr,
    pub parameters: Vec<TypeExpr>,
    pub modifiers: Modifiers,
    pub handle: MethodHandle,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<Arc<str>>, return_type: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeDescriptor::root(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            handle: MethodHandle::default(),
        }
    }

    pub fn param(mut self, ty: impl Into<TypeExpr>) -> Self {
        self.parameters.push(ty.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_handle(mut self, handle: MethodHandle) -> Self {
        self.handle = handle;
        self
    }

    pub fn is_bridge(&self) -> bool {
        self.modifiers.contains(Modifiers::BRIDGE)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Erased return type
    pub fn raw_return_type(&self) -> TypeDescriptor {
        self.return_type.erasure()
    }

    /// Erased parameter types
    pub fn raw_parameter_types(&self) -> Vec<TypeDescriptor> {
        self.parameters.iter().map(TypeExpr::erasure).collect()
    }

    pub fn invoke(&self, target: &mut dyn Any, args: &[Value]) -> Result<Value, InvokeError> {
        match &self.handle.0 {
            Some(f) => f(target, args),
            None => Err(InvokeError::Unbound(self.qualified_name())),
        }
    }

    fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

/// A declared field
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: Arc<str>,
    pub declaring_type: TypeDescriptor,
    pub ty: TypeExpr,
    pub modifiers: Modifiers,
    pub handle: FieldHandle,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<Arc<str>>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            declaring_type: TypeDescriptor::root(),
            ty: ty.into(),
            modifiers: Modifiers::PRIVATE,
            handle: FieldHandle::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_handle(mut self, handle: FieldHandle) -> Self {
        self.handle = handle;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(Modifiers::FINAL)
    }

    pub fn read(&self, target: &dyn Any) -> Result<Value, InvokeError> {
        match &self.handle.get {
            Some(get) => get(target),
            None => Err(InvokeError::Unbound(self.qualified_name())),
        }
    }

    pub fn write(&self, target: &mut dyn Any, value: Value) -> Result<(), InvokeError> {
        match &self.handle.set {
            Some(set) => set(target, value),
            None => Err(InvokeError::Unbound(self.qualified_name())),
        }
    }

    fn qualified_name(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

/// A declared constructor
#[derive(Debug, Clone)]
pub struct ConstructorDescriptor {
    pub declaring_type: TypeDescriptor,
    pub parameters: Vec<TypeExpr>,
    pub modifiers: Modifiers,
    pub handle: ConstructorHandle,
}

impl ConstructorDescriptor {
    pub fn new(parameters: Vec<TypeExpr>) -> Self {
        Self {
            declaring_type: TypeDescriptor::root(),
            parameters,
            modifiers: Modifiers::PUBLIC,
            handle: ConstructorHandle::default(),
        }
    }

    /// Zero-argument constructor
    pub fn no_args() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_handle(mut self, handle: ConstructorHandle) -> Self {
        self.handle = handle;
        self
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn instantiate(&self, args: &[Value]) -> Result<Box<dyn Any + Send>, InvokeError> {
        match &self.handle.0 {
            Some(f) => f(args),
            None => Err(InvokeError::Unbound(format!("{}.<init>", self.declaring_type))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        count: i32,
    }

    #[test]
    fn test_unbound_method() {
        let method = MethodDescriptor::new("getName", TypeDescriptor::class("String"));
        let mut target = Counter { count: 0 };
        let err = method.invoke(&mut target, &[]).unwrap_err();
        assert_eq!(err, InvokeError::Unbound("Object.getName".to_string()));
    }

    #[test]
    fn test_bound_method() {
        let method = MethodDescriptor::new("getCount", TypeDescriptor::INT).with_handle(
            MethodHandle::new(|target, _args| {
                let this = target
                    .downcast_ref::<Counter>()
                    .ok_or_else(|| InvokeError::target_mismatch("Counter"))?;
                Ok(Value::Int(this.count))
            }),
        );
        let mut target = Counter { count: 5 };
        assert_eq!(method.invoke(&mut target, &[]), Ok(Value::Int(5)));

        let mut wrong = 1u8;
        assert!(matches!(
            method.invoke(&mut wrong, &[]),
            Err(InvokeError::TargetMismatch { .. })
        ));
    }

    #[test]
    fn test_field_handle() {
        let field = FieldDescriptor::new("count", TypeDescriptor::INT).with_handle(FieldHandle::new(
            |target| {
                let this = target
                    .downcast_ref::<Counter>()
                    .ok_or_else(|| InvokeError::target_mismatch("Counter"))?;
                Ok(Value::Int(this.count))
            },
            |target, value| {
                let this = target
                    .downcast_mut::<Counter>()
                    .ok_or_else(|| InvokeError::target_mismatch("Counter"))?;
                this.count = crate::FromValue::from_value(value)?;
                Ok(())
            },
        ));

        let mut target = Counter { count: 1 };
        field.write(&mut target, Value::Int(9)).unwrap();
        assert_eq!(field.read(&target), Ok(Value::Int(9)));
    }

    #[test]
    fn test_modifiers() {
        let field = FieldDescriptor::new("MAX", TypeDescriptor::INT)
            .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL);
        assert!(field.is_static());
        assert!(field.is_final());

        let bridge = MethodDescriptor::new("getValue", TypeDescriptor::root())
            .with_modifiers(Modifiers::PUBLIC | Modifiers::BRIDGE | Modifiers::SYNTHETIC);
        assert!(bridge.is_bridge());
    }
}
