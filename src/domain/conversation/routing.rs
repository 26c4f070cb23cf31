//! Active-section routing.
//!
//! The section under discussion is an explicit state with seven values.
//! Each chat turn's classification is the only transition input, and the
//! previous state has no influence on where a recognized message routes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SectionKey;

use super::classification::Classification;

/// The section the conversation is currently focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveSection(SectionKey);

impl ActiveSection {
    pub fn new(key: SectionKey) -> Self {
        Self(key)
    }

    pub fn key(&self) -> SectionKey {
        self.0
    }

    /// Applies a classification.
    ///
    /// A recognized section always wins over the current one; an
    /// unrecognized message leaves the pointer where it is.
    pub fn route(self, classification: Classification) -> Self {
        match classification {
            Classification::Section(key) => Self(key),
            Classification::Unrecognized => self,
        }
    }
}

impl Default for ActiveSection {
    fn default() -> Self {
        Self(SectionKey::Vision)
    }
}
