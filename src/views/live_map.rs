// ============================================================================
// LIVE MAP VIEW - Mapa en vivo con servicios cercanos
// ============================================================================
// El esqueleto se renderiza una vez; overlay, banner de error y botón de
// seguimiento se actualizan en sitio con cada MapStatus publicado.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{
    ElementBuilder, alert, append_child, clear_children, get_element_by_id, on_click, set_hidden,
    set_text_content, text_element,
};
use crate::models::{Route, ServiceCategory};
use crate::utils::{
    LOCATION_ERROR_ID, LOCATION_ERROR_TEXT_ID, SOS_CONFIRMATION, STATUS_BODY_ID,
    STATUS_OVERLAY_ID, TRACKING_BUTTON_ID,
};
use crate::viewmodels::MapStatus;

/// Renderizar la pantalla de navegación (el mapa se monta después de insertar en el DOM)
pub fn render_live_map(service: Option<ServiceCategory>) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?
        .class("navigation-screen")
        .build();

    append_child(&page, &render_header(service)?)?;

    let body = ElementBuilder::new("div")?
        .class("map-wrapper")
        .child(
            ElementBuilder::new("div")?
                .id(&CONFIG.map_config.container_id)?
                .class("map-container")
                .build(),
        )?
        .child(render_status_overlay(service)?)?
        .child(render_error_banner()?)?
        .child(render_safety_banner()?)?
        .build();
    append_child(&page, &body)?;

    Ok(page)
}

fn render_header(service: Option<ServiceCategory>) -> Result<Element, JsValue> {
    let back_btn = text_element("button", "btn-back", "← Back")?;
    on_click(&back_btn, move |_e| crate::navigate(Route::Home))?;

    let (icon, title) = match service {
        Some(category) => (category.icon(), category.title()),
        None => ("🧭", "Live Navigation"),
    };

    let tracking_btn = ElementBuilder::new("button")?
        .id(TRACKING_BUTTON_ID)?
        .class("btn-tracking")
        .text("📍 Start Tracking")
        .build();
    on_click(&tracking_btn, move |_e| {
        crate::with_live_map(|vm| {
            if let Err(e) = vm.toggle_tracking() {
                log::warn!("⚠️ [NAV] Seguimiento no disponible: {}", e);
            }
        });
    })?;

    let sos_btn = text_element("button", "btn-sos", "📞 Emergency SOS")?;
    on_click(&sos_btn, move |_e| {
        log::info!("🆘 [NAV] SOS pulsado");
        alert(SOS_CONFIRMATION);
    })?;

    Ok(ElementBuilder::new("header")?
        .class("navigation-header")
        .child(back_btn)?
        .child(text_element("span", "navigation-title", &format!("{} {}", icon, title))?)?
        .child(
            ElementBuilder::new("div")?
                .class("header-actions")
                .child(tracking_btn)?
                .child(sos_btn)?
                .build(),
        )?
        .build())
}

fn render_status_overlay(service: Option<ServiceCategory>) -> Result<Element, JsValue> {
    let heading = match service {
        Some(category) => category.title(),
        None => "Location Status",
    };

    let overlay = ElementBuilder::new("div")?
        .id(STATUS_OVERLAY_ID)?
        .class("status-overlay")
        .child(text_element("h3", "overlay-title", heading)?)?
        .child(
            ElementBuilder::new("div")?
                .id(STATUS_BODY_ID)?
                .class("overlay-body")
                .build(),
        )?
        .build();

    if service.is_some() {
        let refresh_btn = text_element("button", "btn-refresh", "↻ Refresh nearby")?;
        on_click(&refresh_btn, move |_e| {
            crate::with_live_map(|vm| {
                let count = vm.refresh_nearby();
                log::info!("🔄 [NAV] {} ubicaciones regeneradas", count);
            });
        })?;
        append_child(&overlay, &refresh_btn)?;
    }

    Ok(overlay)
}

fn render_error_banner() -> Result<Element, JsValue> {
    let retry_btn = text_element("button", "btn-retry", "Retry")?;
    on_click(&retry_btn, move |_e| {
        crate::with_live_map(|vm| vm.retry_location());
    })?;

    Ok(ElementBuilder::new("div")?
        .id(LOCATION_ERROR_ID)?
        .class("location-error hidden")
        .child(
            ElementBuilder::new("span")?
                .id(LOCATION_ERROR_TEXT_ID)?
                .class("error-text")
                .build(),
        )?
        .child(retry_btn)?
        .build())
}

fn render_safety_banner() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("safety-banner")
        .child(text_element("span", "pulse-dot", "")?)?
        .child(text_element("span", "safety-zone", "Safe Zone")?)?
        .child(text_element("span", "safety-status", "All systems active")?)?
        .build())
}

/// Actualizar overlay, banner de error y botón de seguimiento
pub fn update_live_map_status(status: &MapStatus) -> Result<(), JsValue> {
    if let Some(body) = get_element_by_id(STATUS_BODY_ID) {
        clear_children(&body);
        for (label, value) in status.overlay_rows() {
            let row = ElementBuilder::new("div")?
                .class("overlay-row")
                .child(text_element("span", "row-label", label)?)?
                .child(text_element("span", "row-value", &value)?)?
                .build();
            append_child(&body, &row)?;
        }

        if !status.points_of_interest.is_empty() {
            let list = ElementBuilder::new("ul")?
                .class("poi-list")
                .build();
            for poi in &status.points_of_interest {
                append_child(
                    &list,
                    &text_element("li", "poi-item", &format!("{} · {}", poi.name, poi.distance_label()))?,
                )?;
            }
            append_child(&body, &list)?;
        }
    }

    if let Some(banner) = get_element_by_id(LOCATION_ERROR_ID) {
        match &status.error {
            Some(error) => {
                if let Some(text) = get_element_by_id(LOCATION_ERROR_TEXT_ID) {
                    set_text_content(&text, error.user_message());
                }
                set_hidden(&banner, false)?;
            }
            None => set_hidden(&banner, true)?,
        }
    }

    if let Some(button) = get_element_by_id(TRACKING_BUTTON_ID) {
        let tracking = status.is_tracking();
        set_text_content(&button, if tracking { "📍 Tracking" } else { "📍 Start Tracking" });
        button.class_list().toggle_with_force("active", tracking)?;
    }

    Ok(())
}
