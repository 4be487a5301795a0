//! Hierarchical delimited names
//!
//! A name is an ordered sequence of components rendered as a single string
//! with a delimiter between components. Components may contain the delimiter
//! itself when escaped (see [`codec`]). Two backings implement one shared
//! contract: [`StringName`] keeps the packed string, [`ArrayName`] keeps the
//! component list. Mutation is value-style throughout: operations return a
//! new name and leave the receiver untouched, so a name held by two owners
//! can never change under one of them.

pub mod codec;
pub mod hasher;

mod array_name;
mod string_name;

pub use array_name::ArrayName;
pub use string_name::StringName;

use crate::config;
use crate::contract::{self, ContractViolation};

/// The shared contract of hierarchical names.
///
/// Required methods cover component access and value-style mutation; the
/// renditions, equality, and hashing are provided on top of them. Accessors
/// hand out components in escaped form. Mutators check their preconditions
/// on entry, their postconditions on the result, and the class invariant
/// last, so a name that leaves any operation is well-formed.
pub trait Name: Clone {
    /// Number of components. An empty name has zero.
    fn component_count(&self) -> usize;

    /// Component at `i`, in escaped form.
    fn component(&self, i: usize) -> Result<String, ContractViolation>;

    /// Snapshot of all components, in escaped form.
    fn components(&self) -> Vec<String>;

    /// New name with component `i` replaced.
    fn with_component(&self, i: usize, component: &str) -> Result<Self, ContractViolation>;

    /// New name with `component` inserted before position `i`.
    ///
    /// `i` may equal the component count, which appends.
    fn insert(&self, i: usize, component: &str) -> Result<Self, ContractViolation>;

    /// New name with `component` appended.
    fn append(&self, component: &str) -> Result<Self, ContractViolation>;

    /// New name with component `i` removed.
    fn remove(&self, i: usize) -> Result<Self, ContractViolation>;

    /// The delimiter this name renders with.
    fn delimiter(&self) -> char;

    /// Whether the name has no components.
    fn is_empty(&self) -> bool {
        self.component_count() == 0
    }

    /// Human-readable rendition: components unescaped and joined with the
    /// name's own delimiter. Lossy; a component containing the delimiter
    /// is indistinguishable from two components.
    fn as_string(&self) -> String {
        render(&self.components(), self.delimiter())
    }

    /// Human-readable rendition with a caller-chosen delimiter.
    fn as_string_with(&self, delimiter: char) -> Result<String, ContractViolation> {
        checks::require_usable_delimiter(delimiter)?;
        Ok(render(&self.components(), delimiter))
    }

    /// Machine-readable rendition: components re-escaped for the default
    /// delimiter and joined with it. For a name using the default
    /// delimiter, feeding the result to [`StringName::new`] reconstructs
    /// an equal name.
    fn as_data_string(&self) -> String {
        let naming = config::active();
        let canonical: Vec<String> = self
            .components()
            .iter()
            .map(|component| {
                let raw = codec::unescape(component, naming.escape_character);
                codec::escape(&raw, naming.default_delimiter, naming.escape_character)
            })
            .collect();
        codec::join(&canonical, naming.default_delimiter)
    }

    /// Name equality across backings: same canonical content and the same
    /// component count.
    ///
    /// Comparing names with different delimiters is a precondition
    /// violation, not an unequal result.
    fn is_equal<N: Name>(&self, other: &N) -> Result<bool, ContractViolation> {
        checks::require_matching_delimiter(self.delimiter(), other.delimiter())?;
        Ok(self.component_count() == other.component_count()
            && self.as_data_string() == other.as_data_string())
    }

    /// 64-bit hash code. Names that compare equal produce equal codes.
    fn hash_code(&self) -> u64 {
        hasher::hash_code(
            &self.as_data_string(),
            self.delimiter(),
            self.component_count(),
        )
    }

    /// Full 32-byte canonical digest of the name.
    fn canonical_digest(&self) -> hasher::Digest {
        hasher::canonical_digest(
            &self.as_data_string(),
            self.delimiter(),
            self.component_count(),
        )
    }

    /// New name with all of `other`'s components appended in order.
    fn concat<N: Name>(&self, other: &N) -> Result<Self, ContractViolation> {
        checks::require_matching_delimiter(self.delimiter(), other.delimiter())?;
        let before = self.component_count();
        let mut joined = self.clone();
        for component in other.components() {
            joined = joined.append(&component)?;
        }
        checks::ensure_count_change(
            before,
            joined.component_count(),
            other.component_count() as isize,
        )?;
        Ok(joined)
    }

    /// Clone carrying an explicit equality guarantee.
    fn checked_clone(&self) -> Result<Self, ContractViolation> {
        let duplicate = self.clone();
        contract::ensure(self.is_equal(&duplicate)?, "clone must equal its original")?;
        Ok(duplicate)
    }
}

fn render(components: &[String], delimiter: char) -> String {
    let escape = config::active().escape_character;
    let rendered: Vec<String> = components
        .iter()
        .map(|component| codec::unescape(component, escape))
        .collect();
    codec::join(&rendered, delimiter)
}

/// Contract checks shared by every name backing.
pub(crate) mod checks {
    use super::{codec, Name};
    use crate::config;
    use crate::contract::{self, ContractViolation};

    pub(crate) fn require_usable_delimiter(delimiter: char) -> Result<(), ContractViolation> {
        let escape = config::active().escape_character;
        contract::require(
            delimiter != escape,
            format!("delimiter '{delimiter}' must differ from the escape character '{escape}'"),
        )
    }

    pub(crate) fn require_matching_delimiter(
        own: char,
        other: char,
    ) -> Result<(), ContractViolation> {
        contract::require(
            own == other,
            format!("delimiters must match, got '{own}' and '{other}'"),
        )
    }

    pub(crate) fn require_escaped(component: &str, delimiter: char) -> Result<(), ContractViolation> {
        let escape = config::active().escape_character;
        contract::require(
            codec::is_properly_escaped(component, delimiter, escape),
            format!("component '{component}' is not properly escaped for delimiter '{delimiter}'"),
        )
    }

    pub(crate) fn require_index(i: usize, count: usize) -> Result<(), ContractViolation> {
        contract::require(
            i < count,
            format!("index {i} out of bounds for {count} components"),
        )
    }

    pub(crate) fn require_insert_index(i: usize, count: usize) -> Result<(), ContractViolation> {
        contract::require(
            i <= count,
            format!("insert index {i} out of bounds for {count} components"),
        )
    }

    pub(crate) fn ensure_count_change(
        before: usize,
        after: usize,
        change: isize,
    ) -> Result<(), ContractViolation> {
        let actual = after as isize - before as isize;
        contract::ensure(
            actual == change,
            format!("component count changed by {actual}, expected {change}"),
        )
    }

    pub(crate) fn ensure_component_is<N: Name>(
        name: &N,
        i: usize,
        expected: &str,
    ) -> Result<(), ContractViolation> {
        let actual = name.component(i)?;
        contract::ensure(
            actual == expected,
            format!("component {i} is '{actual}' after the update, expected '{expected}'"),
        )
    }

    /// Class invariant shared by both backings: the delimiter stays usable
    /// and every component is properly escaped for it.
    pub(crate) fn name_invariants<N: Name>(name: &N) -> Result<(), ContractViolation> {
        let naming = config::active();
        contract::invariant(
            name.delimiter() != naming.escape_character,
            format!(
                "delimiter '{}' collides with the escape character",
                name.delimiter()
            ),
        )?;
        for (i, component) in name.components().iter().enumerate() {
            contract::invariant(
                codec::is_properly_escaped(component, name.delimiter(), naming.escape_character),
                format!("component {i} '{component}' breaks the escaping invariant"),
            )?;
        }
        Ok(())
    }
}
