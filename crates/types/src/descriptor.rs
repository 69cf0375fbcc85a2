//! Type descriptors and declared type expressions
//!
//! A [`TypeDescriptor`] is the erased, concrete handle to a type in the host
//! runtime. A [`TypeExpr`] is what a member actually declares, which may
//! still mention type variables of its declaring class.

use std::fmt;
use std::sync::Arc;

/// Name of the universal root type. Inheritance walks stop here.
pub const ROOT_TYPE_NAME: &str = "Object";

/// Built-in primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Void,
}

impl Primitive {
    /// Source-level spelling of the primitive
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
            Primitive::Void => "void",
        }
    }
}

/// Concrete (erased) type handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A primitive such as `int` or `boolean`
    Primitive(Primitive),
    /// A named class or interface
    Class(Arc<str>),
    /// An array of the component type
    Array(Arc<TypeDescriptor>),
}

impl TypeDescriptor {
    pub const BOOLEAN: TypeDescriptor = TypeDescriptor::Primitive(Primitive::Boolean);
    pub const INT: TypeDescriptor = TypeDescriptor::Primitive(Primitive::Int);
    pub const LONG: TypeDescriptor = TypeDescriptor::Primitive(Primitive::Long);
    pub const DOUBLE: TypeDescriptor = TypeDescriptor::Primitive(Primitive::Double);
    pub const VOID: TypeDescriptor = TypeDescriptor::Primitive(Primitive::Void);

    /// Descriptor for a named class or interface
    pub fn class(name: impl Into<Arc<str>>) -> Self {
        TypeDescriptor::Class(name.into())
    }

    /// Descriptor for an array of `component`
    pub fn array_of(component: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Arc::new(component))
    }

    /// The universal root type
    pub fn root() -> Self {
        TypeDescriptor::class(ROOT_TYPE_NAME)
    }

    pub fn is_root(&self) -> bool {
        matches!(self, TypeDescriptor::Class(name) if &**name == ROOT_TYPE_NAME)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(_))
    }

    /// True only for the primitive `boolean`, not a boxed wrapper
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(Primitive::Boolean))
    }

    /// Component type if this is an array
    pub fn component(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::Array(component) => Some(component),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => f.write_str(p.name()),
            TypeDescriptor::Class(name) => f.write_str(name),
            TypeDescriptor::Array(component) => write!(f, "{}[]", component),
        }
    }
}

/// A declared type, possibly generic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Already concrete
    Concrete(TypeDescriptor),
    /// A type variable such as `T`, optionally bounded (`T extends Number`)
    Variable {
        name: Arc<str>,
        bound: Option<Box<TypeExpr>>,
    },
    /// `Raw<Arg, ...>`
    Parameterized { raw: TypeDescriptor, args: Vec<TypeExpr> },
    /// `T[]` where the component is itself generic
    GenericArray(Box<TypeExpr>),
    /// `?` or `? extends Upper`
    Wildcard { upper: Option<Box<TypeExpr>> },
}

impl TypeExpr {
    /// Unbounded type variable
    pub fn var(name: impl Into<Arc<str>>) -> Self {
        TypeExpr::Variable {
            name: name.into(),
            bound: None,
        }
    }

    /// Type variable with an upper bound
    pub fn bounded_var(name: impl Into<Arc<str>>, bound: TypeExpr) -> Self {
        TypeExpr::Variable {
            name: name.into(),
            bound: Some(Box::new(bound)),
        }
    }

    pub fn parameterized(raw: TypeDescriptor, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Parameterized { raw, args }
    }

    pub fn generic_array(component: TypeExpr) -> Self {
        TypeExpr::GenericArray(Box::new(component))
    }

    /// Raw type as the runtime sees it without any owner context.
    ///
    /// Variables and wildcards erase to their bound, or the root type.
    pub fn erasure(&self) -> TypeDescriptor {
        match self {
            TypeExpr::Concrete(ty) => ty.clone(),
            TypeExpr::Variable { bound, .. } | TypeExpr::Wildcard { upper: bound } => bound
                .as_ref()
                .map(|b| b.erasure())
                .unwrap_or_else(TypeDescriptor::root),
            TypeExpr::Parameterized { raw, .. } => raw.clone(),
            TypeExpr::GenericArray(component) => TypeDescriptor::array_of(component.erasure()),
        }
    }
}

impl From<TypeDescriptor> for TypeExpr {
    fn from(ty: TypeDescriptor) -> Self {
        TypeExpr::Concrete(ty)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Concrete(ty) => write!(f, "{}", ty),
            TypeExpr::Variable { name, .. } => f.write_str(name),
            TypeExpr::Parameterized { raw, args } => {
                write!(f, "{}<", raw)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeExpr::GenericArray(component) => write!(f, "{}[]", component),
            TypeExpr::Wildcard { upper: None } => f.write_str("?"),
            TypeExpr::Wildcard { upper: Some(upper) } => write!(f, "? extends {}", upper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TypeDescriptor::BOOLEAN.to_string(), "boolean");
        assert_eq!(TypeDescriptor::class("String").to_string(), "String");
        assert_eq!(
            TypeDescriptor::array_of(TypeDescriptor::INT).to_string(),
            "int[]"
        );
    }

    #[test]
    fn test_root() {
        assert!(TypeDescriptor::root().is_root());
        assert!(!TypeDescriptor::class("String").is_root());
        assert!(!TypeDescriptor::BOOLEAN.is_root());
    }

    #[test]
    fn test_erasure() {
        let list = TypeDescriptor::class("List");
        let param = TypeExpr::parameterized(list.clone(), vec![TypeExpr::var("T")]);
        assert_eq!(param.erasure(), list);

        // Unbounded variable erases to the root type
        assert_eq!(TypeExpr::var("T").erasure(), TypeDescriptor::root());

        // Bounded variable erases to its bound
        let number = TypeDescriptor::class("Number");
        let bounded = TypeExpr::bounded_var("N", number.clone().into());
        assert_eq!(bounded.erasure(), number);

        // Generic array erases component-wise
        let array = TypeExpr::generic_array(bounded);
        assert_eq!(array.erasure(), TypeDescriptor::array_of(number));
    }
}
