// ============================================================================
// HOME VIEW - Landing con métricas y features
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, text_element};
use crate::models::content::{FeatureCard, BRAND, CORE_FEATURES, SAFETY_METRICS};
use crate::models::Route;
use crate::state::AppState;
use crate::views::render_emergency_dialog;

/// Renderizar pantalla principal
pub fn render_home(state: &AppState) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?
        .class("home-screen")
        .build();

    append_child(&page, &render_nav()?)?;
    append_child(&page, &render_hero()?)?;
    append_child(&page, &render_features()?)?;
    append_child(&page, &render_privacy()?)?;
    append_child(&page, &render_footer()?)?;

    if state.is_emergency_dialog_open() {
        append_child(&page, &render_emergency_dialog()?)?;
    }

    Ok(page)
}

fn render_nav() -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?
        .class("home-nav")
        .child(text_element("span", "brand", &format!("🛡️ {}", BRAND))?)?
        .build();

    let actions = ElementBuilder::new("div")?
        .class("nav-actions")
        .build();

    let help_lines_btn = text_element("button", "btn-outline", "📞 Help Lines")?;
    on_click(&help_lines_btn, move |_e| {
        crate::navigate(Route::HelpLines);
    })?;

    let emergency_btn = text_element("button", "btn-primary", "Get Emergency Help")?;
    on_click(&emergency_btn, move |_e| {
        crate::with_app_state(|state| state.set_emergency_dialog(true));
        crate::schedule_rerender();
    })?;

    append_child(&actions, &help_lines_btn)?;
    append_child(&actions, &emergency_btn)?;
    append_child(&nav, &actions)?;
    Ok(nav)
}

fn render_hero() -> Result<Element, JsValue> {
    let metrics = ElementBuilder::new("div")?
        .class("metrics-grid")
        .build();

    for metric in SAFETY_METRICS {
        let item = ElementBuilder::new("div")?
            .class("metric")
            .child(text_element("div", "metric-icon", metric.icon)?)?
            .child(text_element("div", "metric-value", metric.value)?)?
            .child(text_element("div", "metric-label", metric.label)?)?
            .build();
        append_child(&metrics, &item)?;
    }

    Ok(ElementBuilder::new("section")?
        .class("hero")
        .child(text_element("span", "badge", "Team GarudaX - Smart India Hackathon 2025")?)?
        .child(text_element("h1", "hero-title", "Smart Tourist Safety Platform for Modern India")?)?
        .child(text_element(
            "p",
            "hero-subtitle",
            "Revolutionary safety platform combining live location fusion, dynamic geofencing, and intelligent emergency dispatch to protect tourists with cutting-edge technology and sub-second response times.",
        )?)?
        .child(metrics)?
        .build())
}

fn render_features() -> Result<Element, JsValue> {
    let grid = ElementBuilder::new("div")?
        .class("features-grid")
        .build();

    for feature in CORE_FEATURES {
        append_child(&grid, &render_feature_card(feature)?)?;
    }

    Ok(ElementBuilder::new("section")?
        .class("features")
        .child(text_element("h2", "section-title", "Core Safety Features")?)?
        .child(text_element(
            "p",
            "section-subtitle",
            "Advanced technology stack designed for maximum tourist protection and rapid emergency response",
        )?)?
        .child(grid)?
        .build())
}

/// Tarjeta de feature; la de localización abre el mapa
fn render_feature_card(feature: &FeatureCard) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class(if feature.opens_map { "feature-card clickable" } else { "feature-card" })
        .child(text_element("div", "feature-icon", feature.icon)?)?
        .child(text_element("h3", "feature-title", feature.title)?)?
        .child(text_element("p", "feature-description", feature.description)?)?
        .child(text_element("span", "feature-metrics", feature.metrics)?)?
        .build();

    if feature.opens_map {
        on_click(&card, move |_e| {
            crate::navigate(Route::Navigation { service: None });
        })?;
    }

    Ok(card)
}

fn render_privacy() -> Result<Element, JsValue> {
    let modes = ElementBuilder::new("div")?
        .class("privacy-modes")
        .child(
            ElementBuilder::new("div")?
                .class("privacy-mode")
                .child(text_element("h3", "", "Anonymous Mode")?)?
                .child(text_element("p", "", "Privacy-preserving analytics with zero personal data retention")?)?
                .build(),
        )?
        .child(
            ElementBuilder::new("div")?
                .class("privacy-mode")
                .child(text_element("h3", "", "Enhanced Response")?)?
                .child(text_element("p", "", "Identifiable mode for faster emergency services and family alerts")?)?
                .build(),
        )?
        .build();

    Ok(ElementBuilder::new("section")?
        .class("privacy")
        .child(text_element("h2", "section-title", "Privacy-First Security")?)?
        .child(text_element(
            "p",
            "section-subtitle",
            "End-to-end encryption with GDPR-style controls. Users choose between anonymous telemetry for insights or identifiable data for enhanced emergency response - complete transparency and control.",
        )?)?
        .child(modes)?
        .build())
}

fn render_footer() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("footer")?
        .class("footer")
        .child(text_element("div", "footer-brand", &format!("🛡️ {}", BRAND))?)?
        .child(text_element("p", "", "Smart Tourist Safety Platform by Team GarudaX")?)?
        .child(text_element("p", "footer-small", "Smart India Hackathon 2025 • Built for Scale • Engineered for Safety")?)?
        .build())
}
