//! Component-list name backing

use super::{checks, codec, Name};
use crate::config;
use crate::contract::{self, ContractViolation};
use std::fmt;

/// A name stored as an explicit component list.
///
/// Unlike the packed backing, the list can be empty, so this is the
/// representation of the zero-component name (the full name of a tree
/// root). Components are held in escaped form.
#[derive(Debug, Clone)]
pub struct ArrayName {
    components: Vec<String>,
    delimiter: char,
}

impl ArrayName {
    /// Build from escaped components under the default delimiter.
    pub fn new(components: Vec<String>) -> Result<Self, ContractViolation> {
        Self::with_delimiter(components, config::active().default_delimiter)
    }

    /// Build from escaped components under an explicit delimiter.
    pub fn with_delimiter(
        components: Vec<String>,
        delimiter: char,
    ) -> Result<Self, ContractViolation> {
        checks::require_usable_delimiter(delimiter)?;
        for component in &components {
            checks::require_escaped(component, delimiter)?;
        }
        let name = Self {
            components,
            delimiter,
        };
        contract::ensure(
            name.delimiter == delimiter,
            "delimiter was not stored verbatim",
        )?;
        checks::name_invariants(&name)?;
        Ok(name)
    }

    /// The empty name under the default delimiter.
    pub fn empty() -> Result<Self, ContractViolation> {
        Self::new(Vec::new())
    }

    /// Parse a packed string into a list-backed name.
    pub fn parse(packed: &str, delimiter: char) -> Result<Self, ContractViolation> {
        checks::require_usable_delimiter(delimiter)?;
        let escape = config::active().escape_character;
        contract::require(
            codec::is_well_formed(packed, escape),
            format!("packed name '{packed}' ends in a dangling escape"),
        )?;
        Self::with_delimiter(codec::split(packed, delimiter, escape), delimiter)
    }
}

impl Name for ArrayName {
    fn component_count(&self) -> usize {
        self.components.len()
    }

    fn component(&self, i: usize) -> Result<String, ContractViolation> {
        checks::require_index(i, self.components.len())?;
        Ok(self.components[i].clone())
    }

    fn components(&self) -> Vec<String> {
        self.components.clone()
    }

    fn with_component(&self, i: usize, component: &str) -> Result<Self, ContractViolation> {
        checks::require_index(i, self.components.len())?;
        checks::require_escaped(component, self.delimiter)?;

        let mut components = self.components.clone();
        components[i] = component.to_string();
        let updated = Self::with_delimiter(components, self.delimiter)?;

        checks::ensure_component_is(&updated, i, component)?;
        checks::ensure_count_change(self.components.len(), updated.component_count(), 0)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn insert(&self, i: usize, component: &str) -> Result<Self, ContractViolation> {
        checks::require_insert_index(i, self.components.len())?;
        checks::require_escaped(component, self.delimiter)?;

        let mut components = self.components.clone();
        components.insert(i, component.to_string());
        let updated = Self::with_delimiter(components, self.delimiter)?;

        checks::ensure_component_is(&updated, i, component)?;
        checks::ensure_count_change(self.components.len(), updated.component_count(), 1)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn append(&self, component: &str) -> Result<Self, ContractViolation> {
        self.insert(self.components.len(), component)
    }

    fn remove(&self, i: usize) -> Result<Self, ContractViolation> {
        checks::require_index(i, self.components.len())?;

        let mut components = self.components.clone();
        components.remove(i);
        let updated = Self::with_delimiter(components, self.delimiter)?;

        checks::ensure_count_change(self.components.len(), updated.component_count(), -1)?;
        checks::name_invariants(&updated)?;
        Ok(updated)
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }
}

impl fmt::Display for ArrayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
