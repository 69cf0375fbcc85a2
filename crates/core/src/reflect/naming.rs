//! Accessor naming conventions
//!
//! Classifies member names as get-shaped (`getX`, `isX`) or set-shaped
//! (`setX`) and maps them to the logical property name.

use crate::error::{ReflectionError, ReflectionResult};

/// Map an accessor name to its property name.
///
/// Strips the `is`/`get`/`set` prefix and decapitalizes the remainder,
/// unless the first two letters are both uppercase (`getURL` stays `URL`).
///
/// Callers must filter with [`is_getter`] / [`is_setter`] first; any other
/// name is rejected with [`ReflectionError::InvalidAccessorName`].
pub fn method_to_property(name: &str) -> ReflectionResult<String> {
    let rest = name
        .strip_prefix("is")
        .or_else(|| name.strip_prefix("get"))
        .or_else(|| name.strip_prefix("set"))
        .ok_or_else(|| ReflectionError::InvalidAccessorName(name.to_string()))?;

    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Ok(String::new());
    };
    let keep_case = chars.next().is_some_and(char::is_uppercase);
    if keep_case {
        return Ok(rest.to_string());
    }

    let mut property: String = first.to_lowercase().collect();
    property.push_str(&rest[first.len_utf8()..]);
    Ok(property)
}

/// True for `getX` (longer than `get`) or `isX` (longer than `is`)
pub fn is_getter(name: &str) -> bool {
    (name.starts_with("get") && name.len() > 3) || (name.starts_with("is") && name.len() > 2)
}

/// True for `setX` (longer than `set`)
pub fn is_setter(name: &str) -> bool {
    name.starts_with("set") && name.len() > 3
}

pub fn is_property(name: &str) -> bool {
    is_getter(name) || is_setter(name)
}
