//! Navigation over nested property paths
//!
//! A path such as `order.items[0].name` is split one segment at a time by
//! [`PropertyPath`]. [`MetaType`] follows each segment's getter type into
//! the next model, fetched through the [`ModelStore`].

use std::collections::BTreeSet;
use std::sync::Arc;

use propmeta_types::TypeDescriptor;

use super::model::PropertyModel;
use super::store::ModelStore;
use crate::error::ReflectionResult;

/// First segment of a dotted property path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyPath<'a> {
    name: &'a str,
    indexed_name: &'a str,
    index: Option<&'a str>,
    children: Option<&'a str>,
}

impl<'a> PropertyPath<'a> {
    pub fn parse(path: &'a str) -> Self {
        let (indexed_name, children) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let (name, index) = match indexed_name.split_once('[') {
            Some((name, rest)) => (name, Some(rest.strip_suffix(']').unwrap_or(rest))),
            None => (indexed_name, None),
        };
        Self {
            name,
            indexed_name,
            index,
            children,
        }
    }

    /// Segment name without any index
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Segment including its index, e.g. `items[0]`
    pub fn indexed_name(&self) -> &'a str {
        self.indexed_name
    }

    pub fn index(&self) -> Option<&'a str> {
        self.index
    }

    /// Remainder of the path after this segment
    pub fn children(&self) -> Option<&'a str> {
        self.children
    }

    pub fn has_next(&self) -> bool {
        self.children.is_some()
    }

    /// The next segment
    pub fn next(&self) -> Option<PropertyPath<'a>> {
        self.children.map(PropertyPath::parse)
    }
}

/// A type's property model, navigable by path
pub struct MetaType<'s> {
    store: &'s ModelStore,
    model: Arc<PropertyModel>,
}

impl<'s> MetaType<'s> {
    pub fn for_type(store: &'s ModelStore, ty: &TypeDescriptor) -> Self {
        Self {
            store,
            model: store.model_for(ty),
        }
    }

    pub fn model(&self) -> &PropertyModel {
        &self.model
    }

    /// Canonical spelling of `path`, matching every segment case-insensitively.
    ///
    /// With `use_camel_case`, underscores are ignored so `user_name` finds
    /// `userName`. Returns `None` if any segment is unknown.
    pub fn find_property(&self, path: &str, use_camel_case: bool) -> Option<String> {
        let path = if use_camel_case {
            path.replace('_', "")
        } else {
            path.to_string()
        };
        let mut canonical = String::new();
        self.build_property(&path, &mut canonical)?;
        Some(canonical)
    }

    fn build_property(&self, path: &str, out: &mut String) -> Option<()> {
        let segment = PropertyPath::parse(path);
        let name = self.model.find_property_name(segment.name())?;
        out.push_str(name);

        match segment.children() {
            Some(children) => {
                out.push('.');
                let child = self.child(name).ok()?;
                child.build_property(children, out)
            }
            None => Some(()),
        }
    }

    /// Type returned by reading `path`
    pub fn getter_type(&self, path: &str) -> ReflectionResult<TypeDescriptor> {
        let segment = PropertyPath::parse(path);
        match segment.children() {
            Some(children) => self.child_for(&segment)?.getter_type(children),
            None => self.segment_type(&segment),
        }
    }

    /// Type accepted when writing `path`
    pub fn setter_type(&self, path: &str) -> ReflectionResult<TypeDescriptor> {
        let segment = PropertyPath::parse(path);
        match segment.children() {
            Some(children) => self.child_for(&segment)?.setter_type(children),
            None => self.model.setter_type(segment.name()).cloned(),
        }
    }

    pub fn has_getter(&self, path: &str) -> bool {
        let segment = PropertyPath::parse(path);
        if !self.model.has_getter(segment.name()) {
            return false;
        }
        match segment.children() {
            Some(children) => self
                .child_for(&segment)
                .is_ok_and(|child| child.has_getter(children)),
            None => true,
        }
    }

    pub fn has_setter(&self, path: &str) -> bool {
        let segment = PropertyPath::parse(path);
        match segment.children() {
            Some(children) => {
                self.model.has_setter(segment.name())
                    && self
                        .child_for(&segment)
                        .is_ok_and(|child| child.has_setter(children))
            }
            None => self.model.has_setter(segment.name()),
        }
    }

    pub fn getter_names(&self) -> &BTreeSet<String> {
        self.model.readable_properties()
    }

    pub fn setter_names(&self) -> &BTreeSet<String> {
        self.model.writable_properties()
    }

    pub fn has_default_constructor(&self) -> bool {
        self.model.has_default_constructor()
    }

    /// Getter type of one segment; an indexed array segment yields the
    /// component type
    fn segment_type(&self, segment: &PropertyPath<'_>) -> ReflectionResult<TypeDescriptor> {
        let ty = self.model.getter_type(segment.name())?;
        Ok(match (segment.index(), ty.component()) {
            (Some(_), Some(component)) => component.clone(),
            _ => ty.clone(),
        })
    }

    fn child_for(&self, segment: &PropertyPath<'_>) -> ReflectionResult<MetaType<'s>> {
        let ty = self.segment_type(segment)?;
        Ok(MetaType::for_type(self.store, &ty))
    }

    fn child(&self, name: &str) -> ReflectionResult<MetaType<'s>> {
        let ty = self.model.getter_type(name)?;
        Ok(MetaType::for_type(self.store, ty))
    }
}
