//! Tri-state PATCH field: absent, explicit `null`, or a value.
//!
//! A single `Option` cannot distinguish "leave the logo alone" from "clear
//! the logo", so PATCH bodies use this instead for nullable fields.

use serde::{Deserialize, Deserializer};

/// A PATCH field that distinguishes omission from explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field absent from the request body: no change.
    Unset,
    /// Field explicitly `null`: clear the value.
    Clear,
    /// Field present: replace the value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }
}

// Manual impl: the derive would bound `T: Default`, which the payload types
// have no reason to satisfy.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

// Deserialization only distinguishes `null` from a value; omission is
// handled by `#[serde(default)]` on the containing struct's field, which
// yields `Unset`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}
