//! Field-wise merge rules shared by every provider patch
//!
//! A patch field only takes effect when it is present and non-empty.

use std::collections::HashMap;

/// Replace when the patch holds a non-empty string
pub(crate) fn string(target: &mut String, patch: &Option<String>) {
    if let Some(value) = patch.as_ref().filter(|v| !v.is_empty()) {
        target.clone_from(value);
    }
}

/// Replace when the patch holds a non-zero number
pub(crate) fn number<T: Copy + Default + PartialEq>(target: &mut T, patch: &Option<T>) {
    if let Some(value) = (*patch).filter(|v| *v != T::default()) {
        *target = value;
    }
}

/// Replace when the patch sets the flag, whatever its value
pub(crate) fn flag(target: &mut bool, patch: &Option<bool>) {
    if let Some(value) = patch {
        *target = *value;
    }
}

/// Add or replace keys; keys missing from the patch survive
pub(crate) fn map<V: Clone>(target: &mut HashMap<String, V>, patch: &Option<HashMap<String, V>>) {
    if let Some(entries) = patch {
        target.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Replace wholesale when the patch holds a non-empty list
pub(crate) fn list<T: Clone>(target: &mut Vec<T>, patch: &Option<Vec<T>>) {
    if let Some(items) = patch.as_ref().filter(|items| !items.is_empty()) {
        target.clone_from(items);
    }
}

/// Replace wholesale when present
pub(crate) fn nested<T: Clone>(target: &mut Option<T>, patch: &Option<T>) {
    if patch.is_some() {
        target.clone_from(patch);
    }
}
