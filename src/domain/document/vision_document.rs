//! VisionDocument - the seven-section draft a founder is building.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::SectionKey;

use super::section_value::SectionValue;

/// Text shown to the coach when a section has no draft yet.
pub const NO_DRAFT_PROVIDED: &str = "No draft provided yet.";

static PLACEHOLDER_VALUE: Lazy<SectionValue> = Lazy::new(SectionValue::placeholder);

/// A partial set of sections, e.g. decoded from a model reply.
pub type SectionMap = BTreeMap<SectionKey, SectionValue>;

/// The Vision to Values document.
///
/// Always holds exactly the seven known sections; unset ones hold `"TBD"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SectionMap", into = "SectionMap")]
pub struct VisionDocument {
    sections: SectionMap,
}

impl VisionDocument {
    /// Creates a document with every section set to the placeholder.
    pub fn placeholder() -> Self {
        let sections = SectionKey::all()
            .iter()
            .map(|key| (*key, SectionValue::placeholder()))
            .collect();
        Self { sections }
    }

    /// Creates a document from a partial map, backfilling missing sections.
    pub fn from_partial(partial: SectionMap) -> Self {
        let mut document = Self::placeholder();
        document.sections.extend(partial);
        document
    }

    /// Returns the value of a section.
    pub fn get(&self, key: SectionKey) -> &SectionValue {
        // Every key is inserted by the constructors.
        self.sections.get(&key).unwrap_or(&*PLACEHOLDER_VALUE)
    }

    /// Replaces the value of a section unconditionally.
    pub fn set(&mut self, key: SectionKey, value: SectionValue) {
        self.sections.insert(key, value);
    }

    /// Iterates sections in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &SectionValue)> {
        self.sections.iter().map(|(key, value)| (*key, value))
    }

    /// Merges synthesized sections into the document.
    ///
    /// A section is replaced only while it is unset (empty or `"TBD"`).
    /// Returns the keys that were replaced, in display order.
    pub fn merge_missing(&mut self, incoming: &SectionMap) -> Vec<SectionKey> {
        let mut replaced = Vec::new();
        for (key, value) in incoming {
            let current = self.get(*key);
            if current.is_unset() && current != value {
                self.sections.insert(*key, value.clone());
                replaced.push(*key);
            }
        }
        replaced
    }

    /// Returns the current draft of a section for the coach.
    ///
    /// Unset sections are described as having no draft.
    pub fn draft_for(&self, key: SectionKey) -> String {
        let value = self.get(key);
        if value.is_unset() {
            NO_DRAFT_PROVIDED.to_string()
        } else {
            value.render_inline()
        }
    }

    /// Renders every section except `focus` as `KEY: value` lines.
    pub fn context_excluding(&self, focus: SectionKey) -> String {
        self.iter()
            .filter(|(key, _)| *key != focus)
            .map(|(key, value)| format!("{}: {}", key.as_str().to_uppercase(), value.render_inline()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the sections that carry real content, in display order.
    pub fn filled_sections(&self) -> impl Iterator<Item = (SectionKey, &SectionValue)> {
        self.iter().filter(|(_, value)| !value.is_unset())
    }

    /// Returns true if no section has content yet.
    pub fn is_blank(&self) -> bool {
        self.filled_sections().next().is_none()
    }
}

impl Default for VisionDocument {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl From<SectionMap> for VisionDocument {
    fn from(partial: SectionMap) -> Self {
        Self::from_partial(partial)
    }
}

impl From<VisionDocument> for SectionMap {
    fn from(document: VisionDocument) -> Self {
        document.sections
    }
}

/// Keeps the known section keys of a JSON object, dropping the rest.
///
/// Used for model replies and client-supplied context, both of which may
/// carry keys outside the seven sections.
pub fn sections_from_json(object: &Map<String, Value>) -> SectionMap {
    object
        .iter()
        .filter_map(|(key, value)| {
            SectionKey::from_key(key).map(|section| (section, SectionValue::from(value.clone())))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(SectionKey, &str)]) -> SectionMap {
        pairs
            .iter()
            .map(|(key, text)| (*key, SectionValue::text(*text)))
            .collect()
    }

    #[test]
    fn placeholder_has_all_seven_sections_as_tbd() {
        let doc = VisionDocument::placeholder();
        assert_eq!(doc.iter().count(), 7);
        assert!(doc.iter().all(|(_, v)| *v == SectionValue::placeholder()));
        assert!(doc.is_blank());
    }

    #[test]
    fn serializes_as_ordered_map_with_wire_keys() {
        let doc = VisionDocument::placeholder();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"vision":"TBD","mission":"TBD","strategy":"TBD","objectives":"TBD","priorities":"TBD","culture":"TBD","values":"TBD"}"#
        );
    }

    #[test]
    fn deserializing_partial_map_backfills_placeholders() {
        let doc: VisionDocument = serde_json::from_value(json!({"vision": "See far"})).unwrap();
        assert_eq!(doc.get(SectionKey::Vision), &SectionValue::text("See far"));
        assert_eq!(doc.get(SectionKey::Values), &SectionValue::placeholder());
        assert_eq!(doc.iter().count(), 7);
    }

    #[test]
    fn merge_replaces_only_unset_sections() {
        let mut doc = VisionDocument::placeholder();
        doc.set(SectionKey::Vision, SectionValue::text("Ours"));
        doc.set(SectionKey::Mission, SectionValue::text(""));

        let replaced = doc.merge_missing(&map(&[
            (SectionKey::Vision, "Theirs"),
            (SectionKey::Mission, "Build tools"),
            (SectionKey::Culture, "Open"),
        ]));

        assert_eq!(replaced, vec![SectionKey::Mission, SectionKey::Culture]);
        assert_eq!(doc.get(SectionKey::Vision), &SectionValue::text("Ours"));
        assert_eq!(doc.get(SectionKey::Mission), &SectionValue::text("Build tools"));
        assert_eq!(doc.get(SectionKey::Culture), &SectionValue::text("Open"));
    }

    #[test]
    fn merging_placeholder_into_placeholder_reports_nothing() {
        let mut doc = VisionDocument::placeholder();
        let replaced = doc.merge_missing(VisionDocument::placeholder().sections_ref());
        assert!(replaced.is_empty());
    }

    #[test]
    fn draft_for_unset_section_is_described() {
        let mut doc = VisionDocument::placeholder();
        assert_eq!(doc.draft_for(SectionKey::Culture), NO_DRAFT_PROVIDED);

        doc.set(SectionKey::Culture, SectionValue::text("Radical candor"));
        assert_eq!(doc.draft_for(SectionKey::Culture), "Radical candor");
    }

    #[test]
    fn context_excluding_lists_other_six_sections() {
        let mut doc = VisionDocument::placeholder();
        doc.set(SectionKey::Vision, SectionValue::text("See far"));
        doc.set(SectionKey::Values, SectionValue::from_edit(r#"["Ownership","Candor"]"#));

        let context = doc.context_excluding(SectionKey::Culture);
        let lines: Vec<&str> = context.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "VISION: See far");
        assert_eq!(lines[1], "MISSION: TBD");
        assert_eq!(lines[5], "VALUES: Ownership; Candor");
        assert!(!context.contains("CULTURE"));
    }

    #[test]
    fn filled_sections_skip_placeholders() {
        let mut doc = VisionDocument::placeholder();
        doc.set(SectionKey::Strategy, SectionValue::text("Win niches"));
        let filled: Vec<SectionKey> = doc.filled_sections().map(|(k, _)| k).collect();
        assert_eq!(filled, vec![SectionKey::Strategy]);
        assert!(!doc.is_blank());
    }

    #[test]
    fn sections_from_json_drops_unknown_keys() {
        let object = json!({"vision": "See far", "tagline": "Go", "values": ["A"]});
        let sections = sections_from_json(object.as_object().unwrap());
        assert_eq!(sections.len(), 2);
        assert!(sections.contains_key(&SectionKey::Vision));
        assert!(sections.contains_key(&SectionKey::Values));
    }

    impl VisionDocument {
        fn sections_ref(&self) -> &SectionMap {
            &self.sections
        }
    }

    mod merge_properties {
        use super::*;
        use proptest::prelude::*;

        fn section_value() -> impl Strategy<Value = SectionValue> {
            prop_oneof![
                Just(SectionValue::placeholder()),
                Just(SectionValue::text("")),
                Just(SectionValue::text("  ")),
                "[a-zA-Z ]{1,24}".prop_map(SectionValue::text),
                proptest::collection::vec("[a-z]{1,8}", 0..3)
                    .prop_map(|items| SectionValue::from_edit(&serde_json::to_string(&items).unwrap())),
            ]
        }

        fn document() -> impl Strategy<Value = VisionDocument> {
            proptest::collection::vec(section_value(), 7).prop_map(|values| {
                let sections = SectionKey::all().iter().copied().zip(values).collect();
                VisionDocument::from_partial(sections)
            })
        }

        fn partial() -> impl Strategy<Value = SectionMap> {
            proptest::collection::btree_map(
                proptest::sample::select(SectionKey::all().to_vec()),
                section_value(),
                0..8,
            )
        }

        proptest! {
            #[test]
            fn merge_never_replaces_filled_sections(mut doc in document(), incoming in partial()) {
                let before = doc.clone();
                let replaced = doc.merge_missing(&incoming);

                for key in SectionKey::all() {
                    let original = before.get(*key);
                    if !original.is_unset() {
                        prop_assert_eq!(doc.get(*key), original);
                        prop_assert!(!replaced.contains(key));
                    }
                }
                prop_assert_eq!(doc.iter().count(), 7);
            }

            #[test]
            fn merge_reports_exactly_the_changed_keys(mut doc in document(), incoming in partial()) {
                let before = doc.clone();
                let replaced = doc.merge_missing(&incoming);

                for key in SectionKey::all() {
                    let changed = doc.get(*key) != before.get(*key);
                    prop_assert_eq!(changed, replaced.contains(key));
                }
            }
        }
    }
}
