//! Getter and setter conflict resolution
//!
//! Several methods may claim the same property: covariant overrides,
//! `isX`/`getX` pairs, overloaded setters. Each group is folded down to
//! one accessor. Groups that cannot be reconciled produce an
//! [`Accessor::Ambiguous`] entry instead of an error.

use std::collections::HashMap;

use propmeta_types::{MethodDescriptor, TypeExpr};
use tracing::warn;

use super::accessor::Accessor;
use super::model::ModelBuilder;
use super::naming;

type Candidates<'m> = Vec<(String, Vec<&'m MethodDescriptor>)>;

impl ModelBuilder<'_> {
    pub(crate) fn add_getters(&mut self, methods: &[MethodDescriptor]) {
        let groups = self.group_candidates(methods, |m| {
            m.parameter_count() == 0 && naming::is_getter(&m.name)
        });
        for (property, candidates) in groups {
            if let Some((winner, ambiguous)) = self.pick_getter(&candidates) {
                self.add_getter(property, winner, ambiguous);
            }
        }
    }

    pub(crate) fn add_setters(&mut self, methods: &[MethodDescriptor]) {
        let groups = self.group_candidates(methods, |m| {
            m.parameter_count() == 1 && naming::is_setter(&m.name)
        });
        for (property, candidates) in groups {
            self.resolve_setter_conflicts(property, &candidates);
        }
    }

    /// Group accessor-shaped methods by property name, in discovery order
    fn group_candidates<'m>(
        &self,
        methods: &'m [MethodDescriptor],
        shape: impl Fn(&MethodDescriptor) -> bool,
    ) -> Candidates<'m> {
        let mut groups: Candidates<'m> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for method in methods.iter().filter(|m| shape(*m)) {
            let Ok(property) = naming::method_to_property(&method.name) else {
                continue;
            };
            if !self.config.is_valid_property_name(&property) {
                continue;
            }
            let slot = *index.entry(property.clone()).or_insert_with(|| {
                groups.push((property, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(method);
        }
        groups
    }

    /// Fold getter candidates to a single winner.
    ///
    /// Returns the winner and whether the group is ambiguous. Folding stops
    /// at the first irreconcilable pair, keeping the winner so far.
    fn pick_getter<'m>(
        &self,
        candidates: &[&'m MethodDescriptor],
    ) -> Option<(&'m MethodDescriptor, bool)> {
        let (&first, rest) = candidates.split_first()?;
        let mut winner = first;

        for &candidate in rest {
            let winner_type = winner.raw_return_type();
            let candidate_type = candidate.raw_return_type();

            if candidate_type == winner_type {
                if !candidate_type.is_boolean() {
                    return Some((winner, true));
                }
                if candidate.name.starts_with("is") {
                    winner = candidate;
                }
            } else if self
                .introspector
                .is_assignable_from(&candidate_type, &winner_type)
            {
                // winner is the narrower override
            } else if self
                .introspector
                .is_assignable_from(&winner_type, &candidate_type)
            {
                winner = candidate;
            } else {
                return Some((winner, true));
            }
        }
        Some((winner, false))
    }

    fn add_getter(&mut self, property: String, method: &MethodDescriptor, ambiguous: bool) {
        let declared_type = self.resolve(&method.return_type, &method.declaring_type);
        let accessor = if ambiguous {
            let reason = format!(
                "Illegal overloaded getter method with ambiguous type for property '{}' in class '{}'. \
                 This breaks the JavaBeans specification and can cause unpredictable results.",
                property, method.declaring_type
            );
            warn!("{}", reason);
            Accessor::Ambiguous {
                reason,
                declared_type,
            }
        } else {
            Accessor::MethodGetter {
                method: method.clone(),
                declared_type,
            }
        };
        self.getters.insert(property, accessor);
    }

    /// Choose one setter for `property`.
    ///
    /// A setter whose parameter type equals the getter's type wins
    /// outright, even after an ambiguity was recorded. Otherwise the
    /// narrower parameter type wins.
    fn resolve_setter_conflicts(&mut self, property: String, candidates: &[&MethodDescriptor]) {
        let getter_type = self
            .getters
            .get(&property)
            .filter(|getter| !getter.is_ambiguous())
            .map(|getter| getter.declared_type().clone());

        let mut matched: Option<&MethodDescriptor> = None;
        let mut ambiguous = false;

        for &setter in candidates {
            if getter_type.as_ref() == Some(&setter_param(setter).erasure()) {
                matched = Some(setter);
                break;
            }
            if !ambiguous {
                matched = self.pick_better_setter(&property, matched, setter);
                ambiguous = matched.is_none();
            }
        }

        if let Some(setter) = matched {
            self.add_setter(property, setter);
        }
    }

    /// Returns `None` after recording an ambiguous setter
    fn pick_better_setter<'m>(
        &mut self,
        property: &str,
        current: Option<&'m MethodDescriptor>,
        candidate: &'m MethodDescriptor,
    ) -> Option<&'m MethodDescriptor> {
        let Some(current) = current else {
            return Some(candidate);
        };

        let current_type = setter_param(current).erasure();
        let candidate_type = setter_param(candidate).erasure();
        if self
            .introspector
            .is_assignable_from(&current_type, &candidate_type)
        {
            return Some(candidate);
        }
        if self
            .introspector
            .is_assignable_from(&candidate_type, &current_type)
        {
            return Some(current);
        }

        let reason = format!(
            "Ambiguous setters defined for property '{}' in class '{}' with types '{}' and '{}'.",
            property, candidate.declaring_type, current_type, candidate_type
        );
        warn!("{}", reason);
        let declared_type = self.resolve(setter_param(current), &current.declaring_type);
        self.setters.insert(
            property.to_string(),
            Accessor::Ambiguous {
                reason,
                declared_type,
            },
        );
        None
    }

    fn add_setter(&mut self, property: String, method: &MethodDescriptor) {
        let declared_type = self.resolve(setter_param(method), &method.declaring_type);
        self.setters.insert(
            property,
            Accessor::MethodSetter {
                method: method.clone(),
                declared_type,
            },
        );
    }
}

/// The single parameter of a setter; arity is checked when grouping
fn setter_param(method: &MethodDescriptor) -> &TypeExpr {
    &method.parameters[0]
}
