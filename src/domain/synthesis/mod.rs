//! Synthesis module - turning model replies into document sections.

mod decoder;

pub use decoder::decode_sections;

use crate::domain::document::{sections_from_json, VisionDocument};

/// Builds the document returned to callers from a raw model reply.
///
/// An undecodable reply yields the all-placeholder document; a partial reply
/// is backfilled with placeholders.
pub fn document_from_reply(reply: &str) -> VisionDocument {
    let decoded = decode_sections(reply);
    if decoded.is_empty() {
        return VisionDocument::placeholder();
    }
    VisionDocument::from_partial(sections_from_json(&decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::SectionValue;
    use crate::domain::foundation::SectionKey;

    #[test]
    fn undecodable_reply_becomes_placeholder_document() {
        assert_eq!(document_from_reply("sorry"), VisionDocument::placeholder());
    }

    #[test]
    fn partial_reply_is_backfilled() {
        let doc = document_from_reply("{\"vision\":\"See far\",\"slogan\":\"Go\"}");
        assert_eq!(doc.get(SectionKey::Vision), &SectionValue::text("See far"));
        assert_eq!(doc.get(SectionKey::Mission), &SectionValue::placeholder());
        assert_eq!(doc.iter().count(), 7);
    }
}
