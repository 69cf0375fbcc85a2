//! In-memory host runtime
//!
//! [`TypeRegistry`] holds class and interface declarations and answers the
//! [`TypeIntrospector`] questions about them, including generic type
//! resolution along the inheritance graph. Declarations come from
//! [`ClassDecl`] builders or from types deriving `Introspect`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::descriptor::{TypeDescriptor, TypeExpr};
use crate::introspect::{Introspect, TypeIntrospector};
use crate::member::{ConstructorDescriptor, FieldDescriptor, MethodDescriptor};

/// Whether a declaration is a class or an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
}

/// Declaration of one class or interface
#[derive(Debug, Clone)]
pub struct ClassDecl {
    ty: TypeDescriptor,
    kind: DeclKind,
    type_params: Vec<Arc<str>>,
    superclass: Option<TypeExpr>,
    interfaces: Vec<TypeExpr>,
    methods: Vec<MethodDescriptor>,
    fields: Vec<FieldDescriptor>,
    constructors: Vec<ConstructorDescriptor>,
}

impl ClassDecl {
    /// Start a class declaration. Without [`extends`](Self::extends) the
    /// superclass is the root type.
    pub fn class(name: impl Into<Arc<str>>) -> Self {
        Self::new(TypeDescriptor::class(name), DeclKind::Class)
    }

    /// Start an interface declaration
    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::new(TypeDescriptor::class(name), DeclKind::Interface)
    }

    fn new(ty: TypeDescriptor, kind: DeclKind) -> Self {
        Self {
            ty,
            kind,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Declare a type parameter (`class Box<T>`)
    pub fn type_param(mut self, name: impl Into<Arc<str>>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn extends(mut self, superclass: impl Into<TypeExpr>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Implement an interface, or for an interface, extend one
    pub fn implements(mut self, iface: impl Into<TypeExpr>) -> Self {
        self.interfaces.push(iface.into());
        self
    }

    pub fn method(mut self, mut method: MethodDescriptor) -> Self {
        method.declaring_type = self.ty.clone();
        self.methods.push(method);
        self
    }

    pub fn field(mut self, mut field: FieldDescriptor) -> Self {
        field.declaring_type = self.ty.clone();
        self.fields.push(field);
        self
    }

    pub fn constructor(mut self, mut constructor: ConstructorDescriptor) -> Self {
        constructor.declaring_type = self.ty.clone();
        self.constructors.push(constructor);
        self
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn kind(&self) -> DeclKind {
        self.kind
    }

    /// Declared superclass, falling back to the root type for classes
    fn effective_superclass(&self) -> Option<TypeExpr> {
        match self.kind {
            DeclKind::Interface => None,
            DeclKind::Class if self.ty.is_root() => None,
            DeclKind::Class => Some(
                self.superclass
                    .clone()
                    .unwrap_or_else(|| TypeDescriptor::root().into()),
            ),
        }
    }
}

type Bindings = HashMap<Arc<str>, TypeExpr>;

/// Thread-safe registry of host declarations
pub struct TypeRegistry {
    classes: RwLock<HashMap<TypeDescriptor, Arc<ClassDecl>>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry that knows only the root type
    pub fn new() -> Self {
        let registry = Self {
            classes: RwLock::new(HashMap::new()),
        };
        registry.register(ClassDecl::new(TypeDescriptor::root(), DeclKind::Class));
        registry
    }

    /// Add or replace a declaration, returning its descriptor
    pub fn register(&self, decl: ClassDecl) -> TypeDescriptor {
        let ty = decl.ty.clone();
        self.classes.write().insert(ty.clone(), Arc::new(decl));
        ty
    }

    /// Register a Rust type that describes itself
    pub fn register_type<T: Introspect>(&self) -> TypeDescriptor {
        self.register(T::declare())
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.classes.read().contains_key(ty)
    }

    /// Number of declarations, including the root type
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    fn decl(&self, ty: &TypeDescriptor) -> Option<Arc<ClassDecl>> {
        self.classes.read().get(ty).cloned()
    }

    /// Direct supertypes (superclass first, then interfaces) as declared
    fn supertype_exprs(&self, ty: &TypeDescriptor) -> Vec<TypeExpr> {
        match ty {
            TypeDescriptor::Class(_) => self
                .decl(ty)
                .map(|decl| {
                    decl.effective_superclass()
                        .into_iter()
                        .chain(decl.interfaces.iter().cloned())
                        .collect()
                })
                .unwrap_or_default(),
            TypeDescriptor::Array(_) => vec![TypeDescriptor::root().into()],
            TypeDescriptor::Primitive(_) => Vec::new(),
        }
    }

    fn collect_interface_methods(
        &self,
        iface: &TypeDescriptor,
        seen: &mut HashSet<TypeDescriptor>,
        out: &mut Vec<MethodDescriptor>,
    ) {
        if !seen.insert(iface.clone()) {
            return;
        }
        if let Some(decl) = self.decl(iface) {
            out.extend(decl.methods.iter().cloned());
            for parent in &decl.interfaces {
                self.collect_interface_methods(&parent.erasure(), seen, out);
            }
        }
    }

    /// Type-variable bindings of `target` as seen from `current`.
    ///
    /// Walks supertypes depth-first, substituting each level's arguments
    /// with the bindings accumulated so far. A raw supertype reference
    /// (no arguments) leaves the supertype's variables unbound.
    fn bindings_towards(
        &self,
        current: &TypeDescriptor,
        target: &TypeDescriptor,
        env: &Bindings,
        seen: &mut HashSet<TypeDescriptor>,
    ) -> Option<Bindings> {
        if current == target {
            return Some(env.clone());
        }
        if !seen.insert(current.clone()) {
            return None;
        }
        for sup in self.supertype_exprs(current) {
            let raw = sup.erasure();
            let args: Vec<TypeExpr> = match &sup {
                TypeExpr::Parameterized { args, .. } => {
                    args.iter().map(|arg| substitute(arg, env)).collect()
                }
                _ => Vec::new(),
            };
            let params = self
                .decl(&raw)
                .map(|decl| decl.type_params.clone())
                .unwrap_or_default();
            let next: Bindings = params.into_iter().zip(args).collect();
            if let Some(found) = self.bindings_towards(&raw, target, &next, seen) {
                return Some(found);
            }
        }
        None
    }
}

/// Replace bound type variables inside `expr`
fn substitute(expr: &TypeExpr, env: &Bindings) -> TypeExpr {
    match expr {
        TypeExpr::Concrete(_) => expr.clone(),
        TypeExpr::Variable { name, .. } => env.get(name).cloned().unwrap_or_else(|| expr.clone()),
        TypeExpr::Parameterized { raw, args } => TypeExpr::Parameterized {
            raw: raw.clone(),
            args: args.iter().map(|arg| substitute(arg, env)).collect(),
        },
        TypeExpr::GenericArray(component) => TypeExpr::generic_array(substitute(component, env)),
        TypeExpr::Wildcard { upper } => TypeExpr::Wildcard {
            upper: upper.as_ref().map(|u| Box::new(substitute(u, env))),
        },
    }
}

impl TypeIntrospector for TypeRegistry {
    fn superclass(&self, ty: &TypeDescriptor) -> Option<TypeDescriptor> {
        match ty {
            TypeDescriptor::Class(_) => self
                .decl(ty)
                .and_then(|decl| decl.effective_superclass())
                .map(|sup| sup.erasure()),
            TypeDescriptor::Array(_) => Some(TypeDescriptor::root()),
            TypeDescriptor::Primitive(_) => None,
        }
    }

    fn interfaces(&self, ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
        self.decl(ty)
            .map(|decl| decl.interfaces.iter().map(TypeExpr::erasure).collect())
            .unwrap_or_default()
    }

    fn declared_methods(&self, ty: &TypeDescriptor) -> Vec<MethodDescriptor> {
        self.decl(ty)
            .map(|decl| decl.methods.clone())
            .unwrap_or_default()
    }

    fn interface_methods(&self, iface: &TypeDescriptor) -> Vec<MethodDescriptor> {
        let mut out = Vec::new();
        self.collect_interface_methods(iface, &mut HashSet::new(), &mut out);
        out
    }

    fn declared_fields(&self, ty: &TypeDescriptor) -> Vec<FieldDescriptor> {
        self.decl(ty)
            .map(|decl| decl.fields.clone())
            .unwrap_or_default()
    }

    fn declared_constructors(&self, ty: &TypeDescriptor) -> Vec<ConstructorDescriptor> {
        self.decl(ty)
            .map(|decl| decl.constructors.clone())
            .unwrap_or_default()
    }

    fn is_assignable_from(&self, target: &TypeDescriptor, source: &TypeDescriptor) -> bool {
        if target == source {
            return true;
        }
        match (target, source) {
            (TypeDescriptor::Primitive(_), _) | (_, TypeDescriptor::Primitive(_)) => false,
            (t, _) if t.is_root() => true,
            (TypeDescriptor::Array(t), TypeDescriptor::Array(s)) => {
                !t.is_primitive() && !s.is_primitive() && self.is_assignable_from(t, s)
            }
            (_, TypeDescriptor::Array(_)) => false,
            _ => {
                let mut seen = HashSet::new();
                let mut stack = vec![source.clone()];
                while let Some(current) = stack.pop() {
                    if &current == target {
                        return true;
                    }
                    if seen.insert(current.clone()) {
                        stack.extend(self.supertype_exprs(&current).iter().map(TypeExpr::erasure));
                    }
                }
                false
            }
        }
    }

    fn resolve_declared_type(
        &self,
        declared: &TypeExpr,
        declaring: &TypeDescriptor,
        owner: &TypeDescriptor,
    ) -> TypeDescriptor {
        let env = self
            .bindings_towards(owner, declaring, &Bindings::new(), &mut HashSet::new())
            .unwrap_or_default();
        substitute(declared, &env).erasure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Modifiers;

    fn string() -> TypeDescriptor {
        TypeDescriptor::class("String")
    }

    #[test]
    fn test_decl_descriptor_and_kind() {
        let class = ClassDecl::class("User");
        assert_eq!(class.descriptor(), &TypeDescriptor::class("User"));
        assert_eq!(class.kind(), DeclKind::Class);

        let iface = ClassDecl::interface("Named");
        assert_eq!(iface.descriptor(), &TypeDescriptor::class("Named"));
        assert_eq!(iface.kind(), DeclKind::Interface);
    }

    #[test]
    fn test_root_registered() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(&TypeDescriptor::root()));
        assert_eq!(registry.superclass(&TypeDescriptor::root()), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_default_superclass_is_root() {
        let registry = TypeRegistry::new();
        let user = registry.register(ClassDecl::class("User"));
        assert_eq!(registry.superclass(&user), Some(TypeDescriptor::root()));

        let iface = registry.register(ClassDecl::interface("Named"));
        assert_eq!(registry.superclass(&iface), None);
    }

    #[test]
    fn test_members_get_declaring_type() {
        let registry = TypeRegistry::new();
        let user = registry.register(
            ClassDecl::class("User")
                .method(MethodDescriptor::new("getName", string()))
                .field(FieldDescriptor::new("name", string())),
        );
        assert_eq!(registry.declared_methods(&user)[0].declaring_type, user);
        assert_eq!(registry.declared_fields(&user)[0].declaring_type, user);
    }

    #[test]
    fn test_assignability() {
        let registry = TypeRegistry::new();
        registry.register(ClassDecl::interface("CharSequence"));
        registry.register(ClassDecl::class("String").implements(TypeDescriptor::class("CharSequence")));
        registry.register(ClassDecl::class("Number"));
        registry.register(ClassDecl::class("Integer").extends(TypeDescriptor::class("Number")));

        let char_seq = TypeDescriptor::class("CharSequence");
        let number = TypeDescriptor::class("Number");
        let integer = TypeDescriptor::class("Integer");

        assert!(registry.is_assignable_from(&char_seq, &string()));
        assert!(!registry.is_assignable_from(&string(), &char_seq));
        assert!(registry.is_assignable_from(&number, &integer));
        assert!(!registry.is_assignable_from(&number, &string()));
        assert!(registry.is_assignable_from(&TypeDescriptor::root(), &integer));
        assert!(!registry.is_assignable_from(&TypeDescriptor::root(), &TypeDescriptor::INT));
        assert!(registry.is_assignable_from(&TypeDescriptor::INT, &TypeDescriptor::INT));
        assert!(registry.is_assignable_from(
            &TypeDescriptor::array_of(number.clone()),
            &TypeDescriptor::array_of(integer)
        ));
        assert!(!registry.is_assignable_from(
            &TypeDescriptor::array_of(TypeDescriptor::LONG),
            &TypeDescriptor::array_of(TypeDescriptor::INT)
        ));
    }

    #[test]
    fn test_interface_methods_include_super_interfaces() {
        let registry = TypeRegistry::new();
        registry.register(
            ClassDecl::interface("Named").method(MethodDescriptor::new("getName", string())),
        );
        let entity = registry.register(
            ClassDecl::interface("Entity")
                .implements(TypeDescriptor::class("Named"))
                .method(MethodDescriptor::new("getId", TypeDescriptor::LONG)),
        );

        let names: Vec<_> = registry
            .interface_methods(&entity)
            .iter()
            .map(|m| m.name.to_string())
            .collect();
        assert_eq!(names, vec!["getId", "getName"]);
    }

    #[test]
    fn test_resolve_through_superclass() {
        let registry = TypeRegistry::new();
        let boxed = registry.register(
            ClassDecl::class("Box")
                .type_param("T")
                .method(MethodDescriptor::new("getValue", TypeExpr::var("T"))),
        );
        let string_box = registry.register(
            ClassDecl::class("StringBox")
                .extends(TypeExpr::parameterized(boxed.clone(), vec![string().into()])),
        );

        let declared = TypeExpr::var("T");
        assert_eq!(
            registry.resolve_declared_type(&declared, &boxed, &string_box),
            string()
        );
        // Seen from the generic class itself the variable erases to its bound
        assert_eq!(
            registry.resolve_declared_type(&declared, &boxed, &boxed),
            TypeDescriptor::root()
        );
    }

    #[test]
    fn test_resolve_through_intermediate_and_interface() {
        let registry = TypeRegistry::new();
        let holder = registry.register(
            ClassDecl::interface("Holder")
                .type_param("V")
                .method(MethodDescriptor::new("getItems", TypeExpr::generic_array(TypeExpr::var("V")))),
        );
        let base = registry.register(
            ClassDecl::class("Base")
                .type_param("K")
                .implements(TypeExpr::parameterized(holder.clone(), vec![TypeExpr::var("K")]))
                .method(
                    MethodDescriptor::new("describe", string())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                ),
        );
        let concrete = registry.register(
            ClassDecl::class("Concrete").extends(TypeExpr::parameterized(base, vec![string().into()])),
        );

        let declared = TypeExpr::generic_array(TypeExpr::var("V"));
        assert_eq!(
            registry.resolve_declared_type(&declared, &holder, &concrete),
            TypeDescriptor::array_of(string())
        );
    }

    #[test]
    fn test_raw_supertype_leaves_variables_unbound() {
        let registry = TypeRegistry::new();
        let number = registry.register(ClassDecl::class("Number"));
        let boxed = registry.register(ClassDecl::class("NumberBox").type_param("N"));
        let raw = registry.register(ClassDecl::class("RawBox").extends(boxed.clone()));

        let declared = TypeExpr::bounded_var("N", number.clone().into());
        assert_eq!(registry.resolve_declared_type(&declared, &boxed, &raw), number);
    }
}
