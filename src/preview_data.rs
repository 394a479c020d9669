// src/preview_data.rs
use serde::{Deserialize, Serialize};

/// Server response for a page preview request.
///
/// `page_translation` and `mirrored_translation` are trusted HTML
/// fragments; `title` is plain text and must never be rendered as markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewPayload {
    pub title: String,
    pub page_translation: String,
    #[serde(default)]
    pub mirrored_translation: String,
    #[serde(default)]
    pub mirrored_page_first: bool,
    #[serde(default)]
    pub right_to_left: bool,
}

/// Placement slot for the mirrored page content, relative to the main
/// content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorSlot {
    First,
    Last,
}

impl PreviewPayload {
    /// The slot that receives `mirrored_translation`; the other slot is
    /// always cleared in the same render step.
    pub fn mirror_slot(&self) -> MirrorSlot {
        if self.mirrored_page_first {
            MirrorSlot::First
        } else {
            MirrorSlot::Last
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let json = r#"{
            "title": "Home",
            "page_translation": "<p>Hi</p>",
            "mirrored_translation": "<p>Bonjour</p>",
            "mirrored_page_first": false,
            "right_to_left": false
        }"#;
        let payload: PreviewPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.title, "Home");
        assert_eq!(payload.page_translation, "<p>Hi</p>");
        assert_eq!(payload.mirrored_translation, "<p>Bonjour</p>");
        assert!(!payload.mirrored_page_first);
        assert!(!payload.right_to_left);
    }

    #[test]
    fn test_absent_fields_default_to_off() {
        let json = r#"{"title": "Home", "page_translation": "<p>Hi</p>"}"#;
        let payload: PreviewPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.mirrored_translation, "");
        assert!(!payload.mirrored_page_first);
        assert!(!payload.right_to_left);
        assert_eq!(payload.mirror_slot(), MirrorSlot::Last);
    }

    #[test]
    fn test_mirror_slot_selection() {
        let mut payload: PreviewPayload =
            serde_json::from_str(r#"{"title": "", "page_translation": ""}"#).unwrap();
        assert_eq!(payload.mirror_slot(), MirrorSlot::Last);
        payload.mirrored_page_first = true;
        assert_eq!(payload.mirror_slot(), MirrorSlot::First);
    }

    #[test]
    fn test_title_keeps_markup_characters() {
        let json = r#"{"title": "<b>Home</b>", "page_translation": ""}"#;
        let payload: PreviewPayload = serde_json::from_str(json).unwrap();
        // The title stays a literal string; escaping is the renderer's job.
        assert_eq!(payload.title, "<b>Home</b>");
    }
}
