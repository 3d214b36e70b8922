// ============================================================================
// EMERGENCY DIALOG - Selección de servicio de emergencia
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, text_element};
use crate::models::content::EMERGENCY_OPTIONS;
use crate::models::Route;

/// Renderizar diálogo modal (overlay + opciones)
pub fn render_emergency_dialog() -> Result<Element, JsValue> {
    let overlay = ElementBuilder::new("div")?
        .id("emergency-dialog")?
        .class("modal-overlay active")
        .build();

    // Click fuera del diálogo -> cerrar
    on_click(&overlay, move |e| {
        let on_backdrop = match (e.target(), e.current_target()) {
            (Some(target), Some(current)) => JsValue::from(target) == JsValue::from(current),
            _ => false,
        };
        if on_backdrop {
            close_dialog();
        }
    })?;

    let dialog = ElementBuilder::new("div")?
        .class("modal-content emergency-dialog")
        .build();

    let close_btn = text_element("button", "btn-close", "✕")?;
    on_click(&close_btn, move |_e| close_dialog())?;

    append_child(&dialog, &close_btn)?;
    append_child(&dialog, &text_element("h2", "dialog-title", "🚨 Emergency Services")?)?;
    append_child(
        &dialog,
        &text_element("p", "dialog-subtitle", "Choose the type of emergency service you need")?,
    )?;

    for option in EMERGENCY_OPTIONS {
        let service = option.service;
        let button = ElementBuilder::new("button")?
            .class(&format!("emergency-option option-{}", service.tag()))
            .attr("data-service", service.tag())?
            .child(text_element("span", "option-icon", service.icon())?)?
            .child(
                ElementBuilder::new("div")?
                    .class("option-text")
                    .child(text_element("div", "option-title", option.title)?)?
                    .child(text_element("div", "option-description", option.description)?)?
                    .build(),
            )?
            .build();

        on_click(&button, move |_e| {
            log::info!("🚨 [EMERGENCY] Servicio seleccionado: {}", service);
            crate::navigate(Route::Navigation { service: Some(service) });
        })?;

        append_child(&dialog, &button)?;
    }

    append_child(&overlay, &dialog)?;
    Ok(overlay)
}

fn close_dialog() {
    crate::with_app_state(|state| state.set_emergency_dialog(false));
    crate::schedule_rerender();
}
