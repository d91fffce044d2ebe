use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ErrorCode, TicketError};

/// Names eligible to appear as a ticket requester or assignee.
///
/// Fixed for the lifetime of a store. Always non-empty with unique,
/// non-blank names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster(Vec<String>);

/// Reasons a roster list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("{}: roster must list at least one person", ErrorCode::ConfigParseError)]
    Empty,

    #[error("{}: roster contains a blank name", ErrorCode::ConfigParseError)]
    BlankName,

    #[error("{}: roster lists '{0}' more than once", ErrorCode::ConfigParseError)]
    Duplicate(String),
}

impl Roster {
    /// Build a roster, trimming each name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] if the list is empty, contains a blank name or
    /// repeats a name.
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(RosterError::BlankName);
            }
            if !seen.insert(name.to_string()) {
                return Err(RosterError::Duplicate(name.to_string()));
            }
            out.push(name.to_string());
        }
        if out.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(Self(out))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Exact, case-sensitive membership; callers trim form input first.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Check that `name` is on the roster, reporting `field` on failure.
    pub(crate) fn check(&self, field: &'static str, name: &str) -> Result<(), TicketError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(TicketError::InvalidDomainValue {
                field,
                value: name.to_string(),
            })
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self(DEFAULT_ROSTER.iter().map(ToString::to_string).collect())
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = RosterError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.0
    }
}

const DEFAULT_ROSTER: [&str; 7] = [
    "Alfredo",
    "Enrico",
    "Sebastián",
    "Julio",
    "Johanna",
    "Victor",
    "Lissette",
];

/// Configuration consumed when a store is initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    #[serde(default)]
    pub roster: Roster,
}

impl DeskConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Fails if the text is not valid TOML or the roster is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse desk config")
    }
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<DeskConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no desk config, using default roster");
        return Ok(DeskConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    DeskConfig::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
