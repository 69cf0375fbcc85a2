//! Per-type model cache
//!
//! Models are built on first request and published once. Two threads
//! racing on the same type may both build, but only the first insert is
//! kept and every caller receives that same `Arc`.

use std::sync::Arc;

use dashmap::DashMap;
use propmeta_types::{TypeDescriptor, TypeIntrospector};
use tracing::{debug, trace};

use super::model::PropertyModel;
use crate::config::ReflectorConfig;

/// Shared source of [`PropertyModel`]s
pub struct ModelStore {
    introspector: Arc<dyn TypeIntrospector>,
    config: ReflectorConfig,
    models: DashMap<TypeDescriptor, Arc<PropertyModel>>,
}

impl ModelStore {
    pub fn new(introspector: Arc<dyn TypeIntrospector>, config: ReflectorConfig) -> Self {
        Self {
            introspector,
            config,
            models: DashMap::new(),
        }
    }

    /// Store with the default configuration
    pub fn with_defaults(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self::new(introspector, ReflectorConfig::default())
    }

    /// Model for `ty`, building it on first use.
    ///
    /// With caching disabled every call returns a freshly built model.
    pub fn model_for(&self, ty: &TypeDescriptor) -> Arc<PropertyModel> {
        if !self.config.cache_enabled {
            return Arc::new(self.build(ty));
        }

        if let Some(model) = self.models.get(ty) {
            trace!("Cache hit for model {}", ty);
            return Arc::clone(model.value());
        }

        // Built outside the map lock; a concurrent builder may publish first
        let built = Arc::new(self.build(ty));
        let published = Arc::clone(self.models.entry(ty.clone()).or_insert(built).value());
        debug!("Published model for {} ({} cached)", ty, self.models.len());
        published
    }

    fn build(&self, ty: &TypeDescriptor) -> PropertyModel {
        PropertyModel::build_with(self.introspector.as_ref(), ty, &self.config)
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.config.cache_enabled
    }

    /// Number of published models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn introspector(&self) -> &dyn TypeIntrospector {
        self.introspector.as_ref()
    }

    pub fn config(&self) -> &ReflectorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::fixtures::*;
    use propmeta_types::ClassDecl;

    fn store(cache_enabled: bool) -> (ModelStore, TypeDescriptor) {
        let registry = registry();
        let ty = registry.register(
            ClassDecl::class("Person")
                .method(person_get_name())
                .method(person_set_name())
                .field(person_active_field()),
        );
        let config = ReflectorConfig {
            cache_enabled,
            ..ReflectorConfig::default()
        };
        (ModelStore::new(Arc::new(registry), config), ty)
    }

    #[test]
    fn test_publishes_once() {
        let (store, ty) = store(true);
        assert!(store.is_empty());

        let first = store.model_for(&ty);
        let second = store.model_for(&ty);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
        assert!(first.has_getter("name"));
    }

    #[test]
    fn test_cache_disabled_builds_fresh() {
        let (store, ty) = store(false);
        assert!(!store.is_cache_enabled());

        let first = store.model_for(&ty);
        let second = store.model_for(&ty);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.readable_properties(), second.readable_properties());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_callers_share_one_model() {
        let (store, ty) = store(true);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let ty = ty.clone();
                std::thread::spawn(move || store.model_for(&ty))
            })
            .collect();
        let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for model in &models[1..] {
            assert!(Arc::ptr_eq(&models[0], model));
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_type_yields_empty_model() {
        let (store, _) = store(true);
        let model = store.model_for(&TypeDescriptor::class("Missing"));
        assert!(model.readable_properties().is_empty());
        assert!(!model.has_default_constructor());
    }
}
