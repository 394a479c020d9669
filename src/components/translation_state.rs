// src/components/translation_state.rs
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo_net::http::Request;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::utils;

/// Attribute on the reset trigger naming the endpoint to POST to.
pub const RESET_URL_ATTR: &str = "data-url";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslationStateResponse {
    #[serde(rename = "translationState")]
    pub translation_state: String,
}

/// The form regions affected by a translation state reset. The per-state
/// result icon is not part of the bundle because its id depends on the
/// server response.
pub struct TranslationStateRegions {
    pub warning: Element,
    pub current_state_icon: Element,
    pub trigger: Element,
}

impl TranslationStateRegions {
    pub fn from_document(document: &Document) -> Option<Self> {
        Some(Self {
            warning: document.get_element_by_id("currently-in-translation-warning")?,
            current_state_icon: document.get_element_by_id("currently-in-translation-state")?,
            trigger: document.get_element_by_id("cancel-translation")?,
        })
    }
}

/// Control that cancels the "currently in translation" state of a page
/// and swaps the state icons to whatever the server reports back.
#[derive(Clone)]
pub struct TranslationStateReset {
    inner: Rc<Inner>,
}

struct Inner {
    document: Document,
    regions: TranslationStateRegions,
    listeners: RefCell<Vec<EventListener>>,
}

impl TranslationStateReset {
    pub fn new(document: Document, regions: TranslationStateRegions) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                regions,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn from_document(document: &Document) -> Option<Self> {
        TranslationStateRegions::from_document(document)
            .map(|regions| Self::new(document.clone(), regions))
    }

    /// Wire the reset trigger. `None` when the control is not part of
    /// this page.
    pub fn wire(document: &Document) -> Option<Self> {
        let this = Self::from_document(document)?;
        let listener = {
            let control = this.clone();
            EventListener::new(&this.inner.regions.trigger, "click", move |event| {
                event.prevent_default();
                control.reset();
            })
        };
        this.inner.listeners.borrow_mut().push(listener);
        Some(this)
    }

    /// POST the state reset and update the form once the server confirms.
    pub fn reset(&self) {
        let Some(url) = self.inner.regions.trigger.get_attribute(RESET_URL_ATTR) else {
            log::warn!("Translation reset trigger has no {} attribute", RESET_URL_ATTR);
            return;
        };
        let this = self.clone();
        spawn_local(async move {
            match this.cancel_translation(&url).await {
                Ok(response) => {
                    this.apply_state(&response.translation_state);
                    log::debug!("Cancelled translation process");
                }
                Err(e) => log::warn!("{}", e),
            }
        });
    }

    async fn cancel_translation(&self, url: &str) -> Result<TranslationStateResponse, String> {
        let token = utils::get_csrf_token(&self.inner.document)?;
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .header("HTTP_X_REQUESTED_WITH", "XMLHttpRequest")
            .header("X-CSRFToken", &token)
            .send()
            .await
            .map_err(|e| format!("Translation state reset failed: {:?}", e))?;
        response
            .json()
            .await
            .map_err(|e| format!("Unexpected translation state response: {:?}", e))
    }

    /// Hide the in-translation warning and icon, reveal the icon matching
    /// the new state.
    pub fn apply_state(&self, state: &str) {
        utils::hide(&self.inner.regions.warning);
        utils::hide(&self.inner.regions.current_state_icon);
        let icon_id = format!("reset-translation-state-{}", state);
        match self.inner.document.get_element_by_id(&icon_id) {
            Some(icon) => utils::show(&icon),
            None => log::warn!("No translation state icon #{}", icon_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_name() {
        let response: TranslationStateResponse =
            serde_json::from_str(r#"{"translationState": "up-to-date"}"#).unwrap();
        assert_eq!(response.translation_state, "up-to-date");
    }

    // Browser-dependent tests; run with `wasm-pack test --headless --firefox`.
    #[cfg(target_arch = "wasm32")]
    mod dom {
        use gloo::utils::document;
        use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

        use super::super::*;

        wasm_bindgen_test_configure!(run_in_browser);

        fn hidden_div(doc: &Document, id: &str) -> Element {
            let el = doc.create_element("div").unwrap();
            el.set_id(id);
            let _ = el.class_list().add_1("hidden");
            doc.body().unwrap().append_child(&el).unwrap();
            el
        }

        #[wasm_bindgen_test]
        fn state_icons_swap_on_apply() {
            let doc = document();
            let warning = doc.create_element("div").unwrap();
            let current = doc.create_element("div").unwrap();
            let trigger = doc.create_element("a").unwrap();
            let result_icon = hidden_div(&doc, "reset-translation-state-outdated");

            let control = TranslationStateReset::new(
                doc.clone(),
                TranslationStateRegions {
                    warning: warning.clone(),
                    current_state_icon: current.clone(),
                    trigger,
                },
            );
            control.apply_state("outdated");

            assert!(warning.class_list().contains("hidden"));
            assert!(current.class_list().contains("hidden"));
            assert!(!result_icon.class_list().contains("hidden"));
            result_icon.remove();
        }

        #[wasm_bindgen_test]
        fn unknown_state_only_hides_the_current_icons() {
            let doc = document();
            let warning = doc.create_element("div").unwrap();
            let current = doc.create_element("div").unwrap();
            let trigger = doc.create_element("a").unwrap();

            let control = TranslationStateReset::new(
                doc.clone(),
                TranslationStateRegions {
                    warning: warning.clone(),
                    current_state_icon: current.clone(),
                    trigger,
                },
            );
            control.apply_state("no-such-state");

            assert!(warning.class_list().contains("hidden"));
            assert!(current.class_list().contains("hidden"));
        }
    }
}
