//! Method discovery across the inheritance chain
//!
//! Collects every callable member visible on a type, most-derived first,
//! and keeps only the first declaration of each [`MemberSignature`] so an
//! override hides what it overrides.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use propmeta_types::{MethodDescriptor, TypeDescriptor, TypeIntrospector};
use tracing::trace;

/// Structural identity of a method: erased return type, name, erased
/// parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSignature {
    pub return_kind: TypeDescriptor,
    pub name: Arc<str>,
    pub parameter_kinds: Vec<TypeDescriptor>,
}

impl MemberSignature {
    pub fn of(method: &MethodDescriptor) -> Self {
        Self {
            return_kind: method.raw_return_type(),
            name: method.name.clone(),
            parameter_kinds: method.raw_parameter_types(),
        }
    }
}

impl fmt::Display for MemberSignature {
    /// `String#getName` / `void#setName:String`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.return_kind, self.name)?;
        for (i, param) in self.parameter_kinds.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { ':' } else { ',' }, param)?;
        }
        Ok(())
    }
}

/// All non-bridge methods declared on `ty`, its superclasses and the
/// interfaces of each, stopping before the root type.
///
/// Interfaces are walked at every level because an abstract class in the
/// chain need not declare the interface methods it inherits.
pub fn class_methods(
    introspector: &dyn TypeIntrospector,
    ty: &TypeDescriptor,
) -> Vec<MethodDescriptor> {
    let mut seen = HashSet::new();
    let mut methods = Vec::new();
    let mut visited = HashSet::new();

    let mut current = Some(ty.clone());
    while let Some(class) = current {
        // A cyclic superclass chain ends at the first repeated type
        if class.is_root() || !visited.insert(class.clone()) {
            break;
        }
        add_unique(&mut seen, &mut methods, introspector.declared_methods(&class));
        for iface in introspector.interfaces(&class) {
            add_unique(&mut seen, &mut methods, introspector.interface_methods(&iface));
        }
        current = introspector.superclass(&class);
    }

    trace!("Indexed {} unique methods for {}", methods.len(), ty);
    methods
}

fn add_unique(
    seen: &mut HashSet<MemberSignature>,
    out: &mut Vec<MethodDescriptor>,
    candidates: Vec<MethodDescriptor>,
) {
    for method in candidates {
        if method.is_bridge() {
            continue;
        }
        if seen.insert(MemberSignature::of(&method)) {
            out.push(method);
        }
    }
}
