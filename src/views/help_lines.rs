// ============================================================================
// HELP LINES VIEW - Directorio estático de números de ayuda
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click, text_element};
use crate::models::content::{
    dialable_number, FrroOffice, HelpLineContact, BRAND, EVISA_HELPDESK, FRRO_OFFICES, HELP_LINES,
};
use crate::models::Route;

/// Renderizar directorio de help lines
pub fn render_help_lines() -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?
        .class("help-lines-screen")
        .build();

    let back_btn = text_element("button", "btn-back", "← Back to Home")?;
    on_click(&back_btn, move |_e| crate::navigate(Route::Home))?;

    let header = ElementBuilder::new("header")?
        .class("page-header")
        .child(back_btn)?
        .child(text_element("h1", "page-title", "📞 Emergency Help Lines")?)?
        .child(text_element(
            "p",
            "page-subtitle",
            "Important contact numbers for tourists and travelers in India",
        )?)?
        .build();
    append_child(&page, &header)?;

    for category in HELP_LINES {
        let section = ElementBuilder::new("section")?
            .class("help-category")
            .child(text_element(
                "h2",
                "section-title",
                &format!("{} {}", category.icon, category.category),
            )?)?
            .build();

        let grid = ElementBuilder::new("div")?
            .class("contacts-grid")
            .build();
        for contact in category.contacts {
            append_child(&grid, &render_contact(contact)?)?;
        }
        append_child(&section, &grid)?;
        append_child(&page, &section)?;
    }

    append_child(&page, &render_frro_section()?)?;

    append_child(
        &page,
        &ElementBuilder::new("footer")?
            .class("footer")
            .child(text_element("div", "footer-brand", &format!("🛡️ {}", BRAND))?)?
            .child(text_element("p", "", "Emergency Help Lines Directory")?)?
            .child(text_element("p", "footer-small", "Smart India Hackathon 2025 • Always Here to Help • Stay Safe")?)?
            .build(),
    )?;

    Ok(page)
}

fn render_contact(contact: &HelpLineContact) -> Result<Element, JsValue> {
    let call = ElementBuilder::new("a")?
        .class("btn-call")
        .attr("href", &format!("tel:{}", dialable_number(contact.number)))?
        .text(&format!("📞 {}", contact.number))
        .build();

    let card = ElementBuilder::new("div")?
        .class("contact-card")
        .child(text_element("h3", "contact-name", contact.name)?)?
        .child(call)?
        .child(text_element("p", "contact-description", contact.description)?)?
        .build();

    if !contact.features.is_empty() {
        let list = ElementBuilder::new("ul")?
            .class("contact-features")
            .build();
        for feature in contact.features {
            append_child(&list, &text_element("li", "", feature)?)?;
        }
        append_child(&card, &list)?;
    }

    Ok(card)
}

fn render_frro_section() -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("help-category frro")
        .child(text_element("h2", "section-title", "🏢 Foreigners Regional Registration Offices (FRRO)")?)?
        .child(text_element(
            "p",
            "section-subtitle",
            "For visa and other official issues, foreigners can contact their nearest FRRO. These offices are located in major cities.",
        )?)?
        .build();

    let grid = ElementBuilder::new("div")?
        .class("contacts-grid")
        .build();
    for office in FRRO_OFFICES {
        append_child(&grid, &render_frro_office(office)?)?;
    }
    append_child(&section, &grid)?;

    let evisa = ElementBuilder::new("div")?
        .class("contact-card evisa")
        .child(text_element("h3", "contact-name", EVISA_HELPDESK.title)?)?
        .child(text_element("div", "contact-phone", EVISA_HELPDESK.phone)?)?
        .build();
    if EVISA_HELPDESK.paid {
        append_child(&evisa, &text_element("span", "badge", "Paid Service")?)?;
    }
    append_child(&evisa, &text_element("div", "contact-email", EVISA_HELPDESK.email)?)?;
    append_child(&section, &evisa)?;

    Ok(section)
}

fn render_frro_office(office: &FrroOffice) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?
        .class("contact-card")
        .child(text_element("h3", "contact-name", &format!("FRRO {}", office.city))?)?
        .child(text_element("div", "contact-phone", office.phone)?)?
        .build();
    if let Some(timing) = office.timing {
        append_child(&card, &text_element("div", "contact-timing", &format!("Timing: {}", timing))?)?;
    }
    append_child(&card, &text_element("div", "contact-email", office.email)?)?;
    Ok(card)
}
