//! Packed-string name backing

use super::{checks, codec, Name};
use crate::config;
use crate::contract::{self, ContractKind, ContractViolation};
use std::fmt;

/// A name stored as one packed string.
///
/// Components stay embedded in the string with their escaping intact; the
/// component count is cached at construction and revalidated by every
/// mutator. A packed string always parses to at least one component, so
/// this backing cannot represent the empty name: removing the last
/// remaining component fails its postcondition instead of succeeding.
#[derive(Debug, Clone)]
pub struct StringName {
    packed: String,
    delimiter: char,
    component_count: usize,
}

impl StringName {
    /// Parse a packed string under the default delimiter.
    pub fn new(packed: &str) -> Result<Self, ContractViolation> {
        Self::with_delimiter(packed, config::active().default_delimiter)
    }

    /// Parse a packed string under an explicit delimiter.
    pub fn with_delimiter(packed: &str, delimiter: char) -> Result<Self, ContractViolation> {
        checks::require_usable_delimiter(delimiter)?;
        let escape = config::active().escape_character;
        contract::require(
            codec::is_well_formed(packed, escape),
            format!("packed name '{packed}' ends in a dangling escape"),
        )?;

        let component_count = codec::split(packed, delimiter, escape).len();
        let name = Self {
            packed: packed.to_string(),
            delimiter,
            component_count,
        };
        contract::ensure(
            name.delimiter == delimiter,
            "delimiter was not stored verbatim",
        )?;
        checks::name_invariants(&name)?;
        Ok(name)
    }

    /// The packed representation, escaping intact.
    pub fn packed(&self) -> &str {
        &self.packed
    }

    fn split_components(&self) -> Vec<String> {
        codec::split(
            &self.packed,
            self.delimiter,
            config::active().escape_character,
        )
    }

    /// Rebuild from edited components through the full construction checks,
    /// so a bad edit cannot yield a malformed name.
    fn rebuilt(&self, components: Vec<String>) -> Result<Self, ContractViolation> {
        Self::with_delimiter(&codec::join(&components, self.delimiter), self.delimiter)
    }

    fn desync() -> ContractViolation {
        contract::violated(
            ContractKind::Invariant,
            "cached component count diverged from the packed string",
        )
    }
}

impl Name for StringName {
    fn component_count(&self) -> usize {
        self.component_count
    }

    fn component(&self, i: usize) -> Result<String, ContractViolation> {
        checks::require_index(i, self.component_count)?;
        let mut components = self.split_components();
        if i >= components.len() {
            return Err(Self::desync());
        }
        Ok(components.swap_remove(i))
    }

    fn components(&self) -> Vec<String> {
        self.split_components()
    }

    fn with_component(&self, i: usize, component: &str) -> Result<Self, ContractViolation> {
        checks::require_index(i, self.component_count)?;
        checks::require_escaped(component, self.delimiter)?;

        let mut components = self.split_components();
        let slot = components.get_mut(i).ok_or_else(Self::desync)?;
        *slot = component.to_string();
        let updated = self.rebuilt(components)?;

        checks::ensure_component_is(&updated, i, component)?;
        checks::ensure_count_change(self.component_count, updated.component_count, 0)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn insert(&self, i: usize, component: &str) -> Result<Self, ContractViolation> {
        checks::require_insert_index(i, self.component_count)?;
        checks::require_escaped(component, self.delimiter)?;

        let mut components = self.split_components();
        if i > components.len() {
            return Err(Self::desync());
        }
        components.insert(i, component.to_string());
        let updated = self.rebuilt(components)?;

        checks::ensure_component_is(&updated, i, component)?;
        checks::ensure_count_change(self.component_count, updated.component_count, 1)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn append(&self, component: &str) -> Result<Self, ContractViolation> {
        checks::require_escaped(component, self.delimiter)?;

        let mut components = self.split_components();
        components.push(component.to_string());
        let updated = self.rebuilt(components)?;

        checks::ensure_component_is(&updated, self.component_count, component)?;
        checks::ensure_count_change(self.component_count, updated.component_count, 1)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn remove(&self, i: usize) -> Result<Self, ContractViolation> {
        checks::require_index(i, self.component_count)?;

        let mut components = self.split_components();
        if i >= components.len() {
            return Err(Self::desync());
        }
        components.remove(i);
        let updated = self.rebuilt(components)?;

        checks::ensure_count_change(self.component_count, updated.component_count, -1)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl fmt::Display for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
