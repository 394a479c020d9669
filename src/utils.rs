// src/utils.rs
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// Reveal an element hidden via the `hidden` utility class.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
}

/// Hide an element via the `hidden` utility class.
pub fn hide(el: &Element) {
    let _ = el.class_list().add_1("hidden");
}

/// Read the CSRF token from the hidden form input rendered into every
/// page that carries a form.
pub fn get_csrf_token(document: &Document) -> Result<String, String> {
    let input = document
        .query_selector("[name=csrfmiddlewaretoken]")
        .map_err(|e| format!("CSRF token lookup failed: {:?}", e))?
        .ok_or_else(|| "CSRF token input not found".to_string())?;
    let input: HtmlInputElement = input
        .dyn_into()
        .map_err(|_| "CSRF token element is not an input".to_string())?;
    Ok(input.value())
}
