// src/components/preview_overlay.rs
use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::preview_data::{MirrorSlot, PreviewPayload};

/// Shown in place of the page content when the preview request fails.
pub const LOAD_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Attribute carrying the preview URL on each trigger element.
pub const PREVIEW_URL_ATTR: &str = "data-preview-page";

/// The display regions the popup renders into. All of them must already
/// exist in the page markup; the controller never creates elements.
pub struct PreviewRegions {
    pub overlay: Element,
    pub title: Element,
    pub content: Element,
    pub mirror_first: Element,
    pub mirror_last: Element,
    pub close_button: Element,
}

impl PreviewRegions {
    /// Resolve the regions by their fixed ids. `None` when the overlay
    /// is not part of this page, in which case the preview feature is
    /// simply absent.
    pub fn from_document(document: &Document) -> Option<Self> {
        Some(Self {
            overlay: document.get_element_by_id("preview_overlay")?,
            title: document.get_element_by_id("preview-content-header")?,
            content: document.get_element_by_id("preview-content-block")?,
            mirror_first: document.get_element_by_id("preview-content-block-first")?,
            mirror_last: document.get_element_by_id("preview-content-block-last")?,
            close_button: document.get_element_by_id("btn-close-preview")?,
        })
    }
}

/// Controller for the page preview popup.
///
/// Clones are cheap and drive the same overlay. Wired click listeners
/// hold a clone of the controller and the controller owns the listener
/// handles, so once wired the widget lives for the rest of the page.
#[derive(Clone)]
pub struct PreviewOverlay {
    inner: Rc<Inner>,
}

struct Inner {
    regions: PreviewRegions,
    // Monotonic request token; a settling response is dropped unless it
    // still carries the latest value.
    request_seq: Cell<u64>,
    // Already-wired triggers by element identity, each owning its click
    // listener.
    wired: RefCell<Vec<(Element, EventListener)>>,
    // Close-button and backdrop listeners; non-empty means attached.
    overlay_listeners: RefCell<Vec<EventListener>>,
}

impl PreviewOverlay {
    pub fn new(regions: PreviewRegions) -> Self {
        Self {
            inner: Rc::new(Inner {
                regions,
                request_seq: Cell::new(0),
                wired: RefCell::new(Vec::new()),
                overlay_listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn from_document(document: &Document) -> Option<Self> {
        PreviewRegions::from_document(document).map(Self::new)
    }

    /// Fetch the preview payload and fill the popup once the request
    /// settles. Returns immediately; when calls overlap, only the most
    /// recently issued request gets to update the popup.
    pub fn open_preview(&self, url: &str) {
        let token = self.inner.request_seq.get() + 1;
        self.inner.request_seq.set(token);
        let this = self.clone();
        let url = url.to_string();
        spawn_local(async move {
            this.load_and_render(&url, token).await;
        });
    }

    /// Read the preview URL off a wired trigger and open it.
    pub fn open_from_trigger(&self, trigger: &Element) {
        match trigger.get_attribute(PREVIEW_URL_ATTR) {
            Some(url) => self.open_preview(&url),
            None => log::warn!("preview trigger lost its {} attribute", PREVIEW_URL_ATTR),
        }
    }

    async fn load_and_render(&self, url: &str, token: u64) {
        let result = match Request::get(url).send().await {
            Ok(resp) => resp
                .json::<PreviewPayload>()
                .await
                .map_err(|e| format!("Failed to decode preview payload: {:?}", e)),
            Err(e) => Err(format!("Failed to load preview: {:?}", e)),
        };
        if self.inner.request_seq.get() != token {
            log::debug!("Dropping stale preview response for {}", url);
            return;
        }
        match result {
            Ok(payload) => self.apply_payload(&payload),
            Err(e) => {
                log::warn!("{}", e);
                self.show_error();
            }
        }
    }

    /// Fill every display region from the payload and reveal the popup.
    pub fn apply_payload(&self, payload: &PreviewPayload) {
        let regions = &self.inner.regions;
        // Right-to-left languages get a right-aligned text layout.
        if payload.right_to_left {
            let _ = regions.overlay.class_list().add_1("text-right");
        } else {
            let _ = regions.overlay.class_list().remove_1("text-right");
        }
        // The title is user-controlled text, never markup.
        regions.title.set_text_content(Some(&payload.title));
        regions.content.set_inner_html(&payload.page_translation);
        // Mirrored content fills exactly one slot; the other is cleared
        // in the same step so nothing stale survives.
        match payload.mirror_slot() {
            MirrorSlot::First => {
                regions
                    .mirror_first
                    .set_inner_html(&payload.mirrored_translation);
                regions.mirror_last.set_inner_html("");
            }
            MirrorSlot::Last => {
                regions.mirror_first.set_inner_html("");
                regions
                    .mirror_last
                    .set_inner_html(&payload.mirrored_translation);
            }
        }
        self.reveal();
    }

    /// Failure path: the popup still opens, with a fixed message in the
    /// content region. Title and mirror slots keep whatever they held
    /// before.
    pub fn show_error(&self) {
        self.reveal();
        self.inner
            .regions
            .content
            .set_text_content(Some(LOAD_ERROR_MESSAGE));
    }

    pub fn close(&self) {
        let class_list = self.inner.regions.overlay.class_list();
        let _ = class_list.add_1("hidden");
        let _ = class_list.remove_1("flex");
    }

    pub fn is_open(&self) -> bool {
        !self.inner.regions.overlay.class_list().contains("hidden")
    }

    fn reveal(&self) {
        let class_list = self.inner.regions.overlay.class_list();
        let _ = class_list.remove_1("hidden");
        let _ = class_list.add_1("flex");
    }

    /// Attach a click handler to every `[data-preview-page]` trigger not
    /// wired yet, invoking `on_open` with the controller and the trigger.
    /// Safe to call again after new triggers are injected into the page.
    /// The close button and the backdrop are wired on the first call only.
    pub fn wire_listeners<F>(&self, document: &Document, on_open: F)
    where
        F: Fn(&PreviewOverlay, &Element) + Clone + 'static,
    {
        let selector = format!("[{}]", PREVIEW_URL_ATTR);
        let triggers = match document.query_selector_all(&selector) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Preview trigger scan failed: {:?}", e);
                return;
            }
        };
        for i in 0..triggers.length() {
            let Some(node) = triggers.item(i) else { continue };
            let Ok(trigger) = node.dyn_into::<Element>() else {
                continue;
            };
            if self.is_wired(&trigger) {
                continue;
            }
            let listener = {
                let this = self.clone();
                let on_open = on_open.clone();
                let captured = trigger.clone();
                EventListener::new(&trigger, "click", move |_event| {
                    on_open(&this, &captured);
                })
            };
            self.inner.wired.borrow_mut().push((trigger, listener));
        }
        self.wire_overlay_controls();
    }

    fn is_wired(&self, trigger: &Element) -> bool {
        self.inner.wired.borrow().iter().any(|(el, _)| el == trigger)
    }

    fn wire_overlay_controls(&self) {
        let mut listeners = self.inner.overlay_listeners.borrow_mut();
        if !listeners.is_empty() {
            return;
        }
        let close = {
            let this = self.clone();
            EventListener::new(&self.inner.regions.close_button, "click", move |_event| {
                this.close();
            })
        };
        let backdrop = {
            let this = self.clone();
            let overlay = self.inner.regions.overlay.clone();
            EventListener::new(&self.inner.regions.overlay, "click", move |event| {
                // Only a click on the backdrop itself closes the popup,
                // not one bubbling up from the content.
                let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
                if target.as_ref() == Some(&overlay) {
                    this.close();
                }
            })
        };
        listeners.push(close);
        listeners.push(backdrop);
    }
}
