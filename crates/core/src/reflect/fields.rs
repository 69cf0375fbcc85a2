//! Field fallback
//!
//! Properties with no accessor method are served from fields declared on
//! the type or any superclass. Interfaces are not consulted. A field
//! never replaces a method accessor, and a static final field is never
//! writable.

use std::collections::HashSet;

use propmeta_types::FieldDescriptor;

use super::accessor::Accessor;
use super::model::ModelBuilder;

impl ModelBuilder<'_> {
    pub(crate) fn add_fields(&mut self) {
        let mut visited = HashSet::new();
        let mut current = Some(self.ty.clone());
        while let Some(class) = current {
            if class.is_root() || !visited.insert(class.clone()) {
                break;
            }
            for field in self.introspector.declared_fields(&class) {
                self.add_field(field);
            }
            current = self.introspector.superclass(&class);
        }
    }

    fn add_field(&mut self, field: FieldDescriptor) {
        let name = field.name.to_string();
        if !self.config.is_valid_property_name(&name) {
            return;
        }

        let constant = field.is_static() && field.is_final();
        let wants_setter = !constant && !self.setters.contains_key(&name);
        let wants_getter = !self.getters.contains_key(&name);
        if !wants_setter && !wants_getter {
            return;
        }

        let declared_type = self.resolve(&field.ty, &field.declaring_type);
        if wants_setter {
            self.setters.insert(
                name.clone(),
                Accessor::FieldSetter {
                    field: field.clone(),
                    declared_type: declared_type.clone(),
                },
            );
        }
        if wants_getter {
            self.getters.insert(
                name,
                Accessor::FieldGetter {
                    field,
                    declared_type,
                },
            );
        }
    }
}
