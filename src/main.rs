// src/main.rs
mod components;
mod preview_data;
mod utils;

use components::preview_overlay::PreviewOverlay;
use components::translation_state::TranslationStateReset;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use web_sys::Document;

/// Wire every widget whose DOM dependencies are present on this page.
/// Pages that lack a widget's markup simply skip it.
fn wire_widgets(document: &Document) {
    match PreviewOverlay::from_document(document) {
        Some(overlay) => {
            overlay.wire_listeners(document, |overlay, trigger| {
                overlay.open_from_trigger(trigger);
            });
        }
        None => log::debug!("Preview overlay not present on this page"),
    }
    if TranslationStateReset::wire(document).is_none() {
        log::debug!("Translation state reset control not present on this page");
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    // The widgets expect the full page markup, so wiring waits for load.
    EventListener::once(&window(), "load", move |_event| {
        wire_widgets(&document());
    })
    .forget();
}
