//! The property model of one type
//!
//! [`PropertyModel::build`] runs the full resolution pipeline:
//!
//! 1. index methods across the inheritance chain ([`signature`](super::signature))
//! 2. resolve getter, then setter conflicts ([`resolver`](super::resolver))
//! 3. fill remaining slots from fields ([`fields`](super::fields))
//! 4. derive the name sets and the case-insensitive index
//!
//! The result is immutable and safe to share across threads.

use std::collections::{BTreeSet, HashMap};

use propmeta_types::{TypeDescriptor, TypeExpr, TypeIntrospector};
use tracing::debug;

use super::accessor::{Accessor, Constructor};
use super::signature;
use crate::config::ReflectorConfig;
use crate::error::{ReflectionError, ReflectionResult};

/// One logical property and its accessors
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    name: String,
    getter: Option<Accessor>,
    setter: Option<Accessor>,
}

impl PropertyEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn getter(&self) -> Option<&Accessor> {
        self.getter.as_ref()
    }

    pub fn setter(&self) -> Option<&Accessor> {
        self.setter.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        self.getter.is_some() && self.setter.is_none()
    }

    pub fn is_write_only(&self) -> bool {
        self.getter.is_none() && self.setter.is_some()
    }
}

/// Resolved, immutable property metadata for a single type
#[derive(Debug, Clone)]
pub struct PropertyModel {
    ty: TypeDescriptor,
    properties: HashMap<String, PropertyEntry>,
    readable: BTreeSet<String>,
    writable: BTreeSet<String>,
    /// Uppercased name -> canonical name
    case_insensitive: HashMap<String, String>,
    default_constructor: Option<Constructor>,
}

impl PropertyModel {
    /// Build the model for `ty` with the default configuration
    pub fn build(introspector: &dyn TypeIntrospector, ty: &TypeDescriptor) -> Self {
        Self::build_with(introspector, ty, &ReflectorConfig::default())
    }

    /// Build the model for `ty`.
    ///
    /// Never fails: irreconcilable declarations become ambiguous accessors
    /// that fail when invoked.
    pub fn build_with(
        introspector: &dyn TypeIntrospector,
        ty: &TypeDescriptor,
        config: &ReflectorConfig,
    ) -> Self {
        let mut builder = ModelBuilder {
            introspector,
            config,
            ty: ty.clone(),
            getters: HashMap::new(),
            setters: HashMap::new(),
        };

        let methods = signature::class_methods(introspector, ty);
        builder.add_getters(&methods);
        builder.add_setters(&methods);
        builder.add_fields();

        let default_constructor = introspector
            .declared_constructors(ty)
            .into_iter()
            .find(|c| c.parameter_count() == 0)
            .map(Constructor::new);

        let model = builder.finish(default_constructor);
        debug!(
            "Built property model for {}: {} readable, {} writable",
            model.ty,
            model.readable.len(),
            model.writable.len()
        );
        model
    }

    /// The type this model describes
    pub fn type_of(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn default_constructor(&self) -> ReflectionResult<&Constructor> {
        self.default_constructor
            .as_ref()
            .ok_or_else(|| ReflectionError::NoDefaultConstructor {
                ty: self.ty.clone(),
            })
    }

    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }

    pub fn getter_invoker(&self, name: &str) -> ReflectionResult<&Accessor> {
        self.properties
            .get(name)
            .and_then(PropertyEntry::getter)
            .ok_or_else(|| ReflectionError::NoSuchGetter {
                property: name.to_string(),
                ty: self.ty.clone(),
            })
    }

    pub fn setter_invoker(&self, name: &str) -> ReflectionResult<&Accessor> {
        self.properties
            .get(name)
            .and_then(PropertyEntry::setter)
            .ok_or_else(|| ReflectionError::NoSuchSetter {
                property: name.to_string(),
                ty: self.ty.clone(),
            })
    }

    /// Resolved type returned by the property's getter
    pub fn getter_type(&self, name: &str) -> ReflectionResult<&TypeDescriptor> {
        self.getter_invoker(name).map(Accessor::declared_type)
    }

    /// Resolved type accepted by the property's setter
    pub fn setter_type(&self, name: &str) -> ReflectionResult<&TypeDescriptor> {
        self.setter_invoker(name).map(Accessor::declared_type)
    }

    pub fn readable_properties(&self) -> &BTreeSet<String> {
        &self.readable
    }

    pub fn writable_properties(&self) -> &BTreeSet<String> {
        &self.writable
    }

    pub fn has_getter(&self, name: &str) -> bool {
        self.readable.contains(name)
    }

    pub fn has_setter(&self, name: &str) -> bool {
        self.writable.contains(name)
    }

    /// Canonical property name for any casing of `name`
    pub fn find_property_name(&self, name: &str) -> Option<&str> {
        self.case_insensitive
            .get(&name.to_uppercase())
            .map(String::as_str)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.properties.values()
    }
}

/// Mutable state of one model build, shared by the pipeline stages
pub(crate) struct ModelBuilder<'a> {
    pub(crate) introspector: &'a dyn TypeIntrospector,
    pub(crate) config: &'a ReflectorConfig,
    pub(crate) ty: TypeDescriptor,
    pub(crate) getters: HashMap<String, Accessor>,
    pub(crate) setters: HashMap<String, Accessor>,
}

impl ModelBuilder<'_> {
    /// Concrete type of a member declared on `declaring`, seen from the
    /// type being modelled
    pub(crate) fn resolve(&self, declared: &TypeExpr, declaring: &TypeDescriptor) -> TypeDescriptor {
        self.introspector
            .resolve_declared_type(declared, declaring, &self.ty)
    }

    fn finish(self, default_constructor: Option<Constructor>) -> PropertyModel {
        let readable: BTreeSet<String> = self.getters.keys().cloned().collect();
        let writable: BTreeSet<String> = self.setters.keys().cloned().collect();

        // Collisions under uppercasing: the later insert wins
        let case_insensitive = readable
            .iter()
            .chain(writable.iter())
            .map(|name| (name.to_uppercase(), name.clone()))
            .collect();

        let mut properties: HashMap<String, PropertyEntry> = HashMap::new();
        for (name, getter) in self.getters {
            properties.insert(
                name.clone(),
                PropertyEntry {
                    name,
                    getter: Some(getter),
                    setter: None,
                },
            );
        }
        for (name, setter) in self.setters {
            properties
                .entry(name.clone())
                .or_insert_with(|| PropertyEntry {
                    name,
                    getter: None,
                    setter: None,
                })
                .setter = Some(setter);
        }

        PropertyModel {
            ty: self.ty,
            properties,
            readable,
            writable,
            case_insensitive,
            default_constructor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::fixtures::*;
    use propmeta_types::{ClassDecl, FieldDescriptor, Modifiers, TypeRegistry, Value};

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    /// `String getName()`, `void setName(String)`, `int getAge()` and a
    /// bare `boolean active` field
    fn person_registry(active_modifiers: Modifiers) -> (TypeRegistry, TypeDescriptor) {
        let registry = registry();
        let ty = registry.register(
            ClassDecl::class("Person")
                .method(person_get_name())
                .method(person_set_name())
                .method(person_get_age())
                .field(person_name_field())
                .field(person_active_field().with_modifiers(active_modifiers))
                .constructor(person_constructor()),
        );
        (registry, ty)
    }

    #[test]
    fn test_end_to_end_constant_field() {
        let (registry, ty) =
            person_registry(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL);
        let model = PropertyModel::build(&registry, &ty);

        assert_eq!(names(model.readable_properties()), vec!["active", "age", "name"]);
        assert_eq!(names(model.writable_properties()), vec!["name"]);
        assert_eq!(
            model.setter_invoker("age").unwrap_err(),
            ReflectionError::NoSuchSetter {
                property: "age".to_string(),
                ty: ty.clone()
            }
        );
        assert_eq!(model.getter_type("active").unwrap(), &TypeDescriptor::BOOLEAN);
        assert!(model.property("age").unwrap().is_read_only());
    }

    #[test]
    fn test_end_to_end_instance_field() {
        let (registry, ty) = person_registry(Modifiers::PRIVATE);
        let model = PropertyModel::build(&registry, &ty);

        assert_eq!(names(model.readable_properties()), vec!["active", "age", "name"]);
        assert_eq!(names(model.writable_properties()), vec!["active", "name"]);
        assert!(model.setter_invoker("active").unwrap().is_field());
        // The setName method wins over the name field
        assert!(!model.setter_invoker("name").unwrap().is_field());
    }

    #[test]
    fn test_invocation_round_trip() {
        let (registry, ty) = person_registry(Modifiers::PRIVATE);
        let model = PropertyModel::build(&registry, &ty);

        let mut instance = model.default_constructor().unwrap().new_instance().unwrap();
        let target = instance.as_mut() as &mut dyn std::any::Any;

        model
            .setter_invoker("name")
            .unwrap()
            .set(target, Value::from("Grace"))
            .unwrap();
        model
            .setter_invoker("active")
            .unwrap()
            .set(target, Value::from(true))
            .unwrap();

        for property in model.readable_properties() {
            // Every readable property can be read
            model.getter_invoker(property).unwrap().get(target).unwrap();
        }
        assert_eq!(
            model.getter_invoker("name").unwrap().get(target),
            Ok(Value::from("Grace"))
        );
        assert_eq!(
            model.getter_invoker("active").unwrap().get(target),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn test_lookup_failures() {
        let registry = registry();
        let ty = registry.register(ClassDecl::class("Empty"));
        let model = PropertyModel::build(&registry, &ty);

        assert!(model.readable_properties().is_empty());
        assert!(!model.has_default_constructor());
        assert!(matches!(
            model.default_constructor(),
            Err(ReflectionError::NoDefaultConstructor { .. })
        ));
        assert!(matches!(
            model.getter_type("missing"),
            Err(ReflectionError::NoSuchGetter { .. })
        ));
        assert!(matches!(
            model.setter_type("missing"),
            Err(ReflectionError::NoSuchSetter { .. })
        ));
        assert_eq!(model.type_of(), &ty);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = registry();
        let ty = registry.register(
            ClassDecl::class("Account")
                .method(getter("getUserName", string()))
                .method(setter("setUserName", string())),
        );
        let model = PropertyModel::build(&registry, &ty);

        assert_eq!(model.find_property_name("USERNAME"), Some("userName"));
        assert_eq!(model.find_property_name("username"), Some("userName"));
        assert_eq!(model.find_property_name("password"), None);
    }

    #[test]
    fn test_case_insensitive_collision_last_write_wins() {
        let registry = registry();
        let ty = registry.register(
            ClassDecl::class("Link")
                .method(getter("getURL", string()))
                .method(getter("getUrl", string())),
        );
        let model = PropertyModel::build(&registry, &ty);

        assert!(model.has_getter("URL"));
        assert!(model.has_getter("url"));
        // Names are indexed in sorted order, so "url" is written after "URL"
        assert_eq!(model.find_property_name("Url"), Some("url"));
    }

    #[test]
    fn test_write_only_property() {
        let registry = registry();
        let ty = registry.register(
            ClassDecl::class("Secret").method(setter("setPassword", string())),
        );
        let model = PropertyModel::build(&registry, &ty);

        assert!(model.has_setter("password"));
        assert!(!model.has_getter("password"));
        assert!(model.property("password").unwrap().is_write_only());
        assert_eq!(model.properties().count(), 1);
    }

    #[test]
    fn test_reserved_names_excluded() {
        let registry = registry();
        let ty = registry.register(
            ClassDecl::class("Proxy")
                .method(getter("getClass", TypeDescriptor::class("Class")))
                .field(FieldDescriptor::new("serialVersionUID", TypeDescriptor::LONG))
                .field(FieldDescriptor::new("$jacocoData", TypeDescriptor::root()))
                .field(FieldDescriptor::new("id", TypeDescriptor::LONG)),
        );
        let model = PropertyModel::build(&registry, &ty);

        assert_eq!(names(model.readable_properties()), vec!["id"]);
        assert_eq!(names(model.writable_properties()), vec!["id"]);
    }

    #[test]
    fn test_generic_getter_type_resolved_for_owner() {
        let registry = registry();
        let boxed = registry.register(
            ClassDecl::class("Box")
                .type_param("T")
                .method(getter("getValue", TypeExpr::var("T")))
                .method(setter("setValue", TypeExpr::var("T"))),
        );
        let string_box = registry.register(
            ClassDecl::class("StringBox")
                .extends(TypeExpr::parameterized(boxed.clone(), vec![string().into()])),
        );

        let model = PropertyModel::build(&registry, &string_box);
        assert_eq!(model.getter_type("value").unwrap(), &string());
        assert_eq!(model.setter_type("value").unwrap(), &string());

        let raw = PropertyModel::build(&registry, &boxed);
        assert_eq!(raw.getter_type("value").unwrap(), &TypeDescriptor::root());
    }

    #[test]
    fn test_build_is_repeatable() {
        let (registry, ty) = person_registry(Modifiers::PRIVATE);
        let first = PropertyModel::build(&registry, &ty);
        let second = PropertyModel::build(&registry, &ty);
        assert_eq!(first.readable_properties(), second.readable_properties());
        assert_eq!(first.writable_properties(), second.writable_properties());
    }
}
