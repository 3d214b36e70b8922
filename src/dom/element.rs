// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Vaciar un contenedor
pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}

/// Mostrar u ocultar con la clase `hidden`
pub fn set_hidden(element: &Element, hidden: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force("hidden", hidden).map(|_| ())
}

/// `window.alert` (no bloquea si no hay window)
pub fn alert(message: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.alert_with_message(message) {
            log::warn!("⚠️ [DOM] alert falló: {:?}", e);
        }
    }
}

/// Path y query actuales (`/navigation`, `service=police`)
pub fn current_location() -> (String, Option<String>) {
    let Some(location) = window().map(|w| w.location()) else {
        return (String::from("/"), None);
    };
    let path = location.pathname().unwrap_or_else(|_| String::from("/"));
    let query = location
        .search()
        .ok()
        .map(|s| s.trim_start_matches('?').to_string())
        .filter(|s| !s.is_empty());
    (path, query)
}

/// `history.pushState` sin recargar
pub fn push_history(url: &str) -> Result<(), JsValue> {
    let history = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()?;
    history.push_state_with_url(&JsValue::NULL, "", Some(url))
}
