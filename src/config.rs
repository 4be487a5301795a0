//! Configuration System
//!
//! Process-wide naming configuration (delimiter and escape character) plus the
//! root configuration structure. The naming pair is installed once, before any
//! name is constructed, and stays fixed for the life of the process. Supports
//! environment variable overrides and runtime validation.

use crate::contract::{self, ContractKind, ContractViolation};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Delimiter used when no other delimiter is given.
pub const DEFAULT_DELIMITER: char = '.';

/// Escape character shared by every name in the process.
pub const ESCAPE_CHARACTER: char = '\\';

/// Naming configuration: the delimiter/escape pair all names agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Delimiter assumed by constructors that take none.
    #[serde(default = "default_delimiter")]
    pub default_delimiter: char,

    /// Character that escapes the following character inside a component.
    #[serde(default = "default_escape_character")]
    pub escape_character: char,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_escape_character() -> char {
    ESCAPE_CHARACTER
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            default_delimiter: default_delimiter(),
            escape_character: default_escape_character(),
        }
    }
}

impl NamingConfig {
    /// Create a validated naming configuration.
    pub fn new(default_delimiter: char, escape_character: char) -> Result<Self, ContractViolation> {
        let config = Self {
            default_delimiter,
            escape_character,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the delimiter and escape character can coexist.
    pub fn validate(&self) -> Result<(), ContractViolation> {
        contract::require(
            self.default_delimiter != self.escape_character,
            format!(
                "default delimiter '{}' must differ from escape character '{}'",
                self.default_delimiter, self.escape_character
            ),
        )
    }

    /// Build a configuration from the environment.
    ///
    /// `NAMETREE_DELIMITER` and `NAMETREE_ESCAPE` override the defaults; each
    /// must hold exactly one character.
    pub fn from_env() -> Result<Self, ContractViolation> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("NAMETREE_DELIMITER") {
            config.default_delimiter = single_char("NAMETREE_DELIMITER", &value)?;
        }
        if let Ok(value) = std::env::var("NAMETREE_ESCAPE") {
            config.escape_character = single_char("NAMETREE_ESCAPE", &value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Install this configuration as the process-wide naming configuration.
    ///
    /// Must run before the first name or tree is constructed. Once [`active`]
    /// has been consulted the defaults are pinned and installation fails.
    pub fn install(self) -> Result<(), ContractViolation> {
        self.validate()?;
        ACTIVE.set(self).map_err(|_| {
            ContractViolation::new(
                ContractKind::Precondition,
                "naming configuration is already installed",
            )
        })
    }
}

static ACTIVE: OnceLock<NamingConfig> = OnceLock::new();

/// The naming configuration in effect for this process.
///
/// Falls back to `.` / `\` when nothing was installed.
pub fn active() -> NamingConfig {
    *ACTIVE.get_or_init(NamingConfig::default)
}

fn single_char(var: &str, value: &str) -> Result<char, ContractViolation> {
    let mut chars = value.chars();
    let first = chars.next();
    contract::require(
        first.is_some() && chars.next().is_none(),
        format!("{var} must hold exactly one character, got '{value}'"),
    )?;
    first.ok_or_else(|| {
        ContractViolation::new(ContractKind::Precondition, format!("{var} is empty"))
    })
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NametreeConfig {
    /// Naming configuration
    #[serde(default)]
    pub naming: NamingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NametreeConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self, ContractViolation> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ContractViolation::new(
                ContractKind::Precondition,
                format!("config file {path:?} is unreadable: {e}"),
            )
        })?;
        let config: NametreeConfig = serde_json::from_str(&raw).map_err(|e| {
            ContractViolation::new(
                ContractKind::Precondition,
                format!("config file {path:?} is not valid JSON: {e}"),
            )
        })?;
        config.naming.validate()?;
        Ok(config)
    }
}
