//! SectionKey enum representing the seven Vision to Values sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The seven sections of a Vision to Values document, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Vision,
    Mission,
    Strategy,
    Objectives,
    Priorities,
    Culture,
    Values,
}

impl SectionKey {
    /// Returns all section keys in canonical order.
    pub fn all() -> &'static [SectionKey] {
        &[
            SectionKey::Vision,
            SectionKey::Mission,
            SectionKey::Strategy,
            SectionKey::Objectives,
            SectionKey::Priorities,
            SectionKey::Culture,
            SectionKey::Values,
        ]
    }

    /// Returns the wire key (lowercase, as used in JSON documents).
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Vision => "vision",
            SectionKey::Mission => "mission",
            SectionKey::Strategy => "strategy",
            SectionKey::Objectives => "objectives",
            SectionKey::Priorities => "priorities",
            SectionKey::Culture => "culture",
            SectionKey::Values => "values",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKey::Vision => "Vision",
            SectionKey::Mission => "Mission",
            SectionKey::Strategy => "Strategy",
            SectionKey::Objectives => "Objectives",
            SectionKey::Priorities => "Priorities",
            SectionKey::Culture => "Culture",
            SectionKey::Values => "Values",
        }
    }

    /// Returns the 0-based index of this section in the canonical order.
    pub fn order_index(&self) -> usize {
        *self as usize
    }

    /// Looks up a section by its exact wire key.
    pub fn from_key(key: &str) -> Option<SectionKey> {
        Self::all().iter().copied().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| ValidationError::unknown_section(s))
    }
}
