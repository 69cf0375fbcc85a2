//! Shared test fixtures

use std::any::Any;

use propmeta_types::{
    ClassDecl, ConstructorDescriptor, ConstructorHandle, FieldDescriptor, FieldHandle, FromValue,
    InvokeError, MethodDescriptor, MethodHandle, TypeDescriptor, TypeExpr, TypeRegistry, Value,
};

pub fn string() -> TypeDescriptor {
    TypeDescriptor::class("String")
}

pub fn char_sequence() -> TypeDescriptor {
    TypeDescriptor::class("CharSequence")
}

pub fn number() -> TypeDescriptor {
    TypeDescriptor::class("Number")
}

pub fn integer() -> TypeDescriptor {
    TypeDescriptor::class("Integer")
}

/// Zero-argument method returning `ty`
pub fn getter(name: &str, ty: impl Into<TypeExpr>) -> MethodDescriptor {
    MethodDescriptor::new(name, ty)
}

/// One-argument void method taking `ty`
pub fn setter(name: &str, ty: impl Into<TypeExpr>) -> MethodDescriptor {
    MethodDescriptor::new(name, TypeDescriptor::VOID).param(ty)
}

/// Registry preloaded with a small standard library:
/// `CharSequence <- String`, `Number <- Integer`
pub fn registry() -> TypeRegistry {
    let registry = TypeRegistry::new();
    registry.register(ClassDecl::interface("CharSequence"));
    registry.register(ClassDecl::class("String").implements(char_sequence()));
    registry.register(ClassDecl::class("Number"));
    registry.register(ClassDecl::class("Integer").extends(number()));
    registry
}

/// Plain Rust object used as an invocation target
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub active: bool,
}

fn person(target: &dyn Any) -> Result<&Person, InvokeError> {
    target
        .downcast_ref::<Person>()
        .ok_or_else(|| InvokeError::target_mismatch("Person"))
}

fn person_mut(target: &mut dyn Any) -> Result<&mut Person, InvokeError> {
    target
        .downcast_mut::<Person>()
        .ok_or_else(|| InvokeError::target_mismatch("Person"))
}

pub fn person_name_field() -> FieldDescriptor {
    FieldDescriptor::new("name", string()).with_handle(FieldHandle::new(
        |target| Ok(Value::from(person(target)?.name.clone())),
        |target, value| {
            person_mut(target)?.name = String::from_value(value)?;
            Ok(())
        },
    ))
}

pub fn person_active_field() -> FieldDescriptor {
    FieldDescriptor::new("active", TypeDescriptor::BOOLEAN).with_handle(FieldHandle::new(
        |target| Ok(Value::from(person(target)?.active)),
        |target, value| {
            person_mut(target)?.active = bool::from_value(value)?;
            Ok(())
        },
    ))
}

pub fn person_get_name() -> MethodDescriptor {
    getter("getName", string()).with_handle(MethodHandle::new(|target, _| {
        Ok(Value::from(person(target)?.name.clone()))
    }))
}

pub fn person_set_name() -> MethodDescriptor {
    setter("setName", string()).with_handle(MethodHandle::new(|target, args| {
        let value = args.first().cloned().unwrap_or_default();
        person_mut(target)?.name = String::from_value(value)?;
        Ok(Value::Null)
    }))
}

pub fn person_get_age() -> MethodDescriptor {
    getter("getAge", TypeDescriptor::INT).with_handle(MethodHandle::new(|target, _| {
        Ok(Value::from(person(target)?.age))
    }))
}

pub fn person_constructor() -> ConstructorDescriptor {
    ConstructorDescriptor::no_args().with_handle(ConstructorHandle::new(|_| {
        Ok(Box::new(Person::default()) as Box<dyn Any + Send>)
    }))
}
