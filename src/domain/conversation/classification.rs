//! Classification of a chat message into one of the seven sections.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SectionKey;

/// Outcome of intent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "section")]
pub enum Classification {
    /// The message is about this section.
    Section(SectionKey),
    /// The classifier's label matched none of the sections.
    Unrecognized,
}

impl Classification {
    /// Parses a raw classifier label.
    ///
    /// The label is trimmed and lower-cased, then must match a section key
    /// exactly. Anything else is `Unrecognized`; this never fails.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match SectionKey::from_key(&normalized) {
            Some(key) => Classification::Section(key),
            None => Classification::Unrecognized,
        }
    }

    pub fn section(&self) -> Option<SectionKey> {
        match self {
            Classification::Section(key) => Some(*key),
            Classification::Unrecognized => None,
        }
    }
}
