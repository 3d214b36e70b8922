pub mod home;
pub mod emergency_dialog;
pub mod help_lines;
pub mod live_map;

pub use home::render_home;
pub use emergency_dialog::render_emergency_dialog;
pub use help_lines::render_help_lines;
pub use live_map::{render_live_map, update_live_map_status};

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::models::Route;
use crate::state::AppState;

/// Renderizar la pantalla de la ruta actual
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match state.current_route() {
        Route::Home => render_home(state),
        Route::HelpLines => render_help_lines(),
        Route::Navigation { service } => render_live_map(service),
    }
}
