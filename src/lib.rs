// ============================================================================
// TRAVELPULSE - FRONTEND MVVM (RUST PURO + WASM)
// ============================================================================
// - Views: funciones que renderizan DOM
// - ViewModels: estado + lógica de la vista de mapa
// - Services: geolocalización y servicios cercanos
// - Maps: superficie de mapa (MapLibre)
// - State: Rc<RefCell> + notificaciones
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod maps;
pub mod viewmodels;
pub mod state;
mod dom;
mod views;
pub mod utils;
mod app;

use std::cell::RefCell;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;
use crate::models::Route;
use crate::state::AppState;
use crate::viewmodels::LiveMapViewModel;

// Instancia global de la App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 TravelPulse - Rust + MVVM ({})", CONFIG.environment);

    let mut app = App::new(route_from_location())?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Botones atrás/adelante del navegador. Listener global: se registra una sola vez.
    dom::on_window_event("popstate", move |_e| {
        let route = route_from_location();
        log::info!("↩️ [ROUTER] popstate -> {:?}", route);
        with_app_state(|state| state.set_route(route));
        schedule_rerender();
    })?;

    Ok(())
}

fn route_from_location() -> Route {
    let (path, query) = dom::current_location();
    Route::parse(&path, query.as_deref().unwrap_or(""))
}

/// Navegar a una ruta: pushState + re-render diferido
pub fn navigate(route: Route) {
    if let Err(e) = dom::push_history(&route.to_url()) {
        log::warn!("⚠️ [ROUTER] pushState falló: {:?}", e);
    }
    log::info!("🧭 [ROUTER] -> {}", route.to_url());
    with_app_state(|state| state.set_route(route));
    schedule_rerender();
}

/// Re-render completo (inmediato)
pub fn rerender_app() {
    APP.with(|app_cell| {
        // try_borrow_mut: un re-render anidado se ignora
        match app_cell.try_borrow_mut() {
            Ok(mut guard) => {
                if let Some(app) = guard.as_mut() {
                    if let Err(e) = app.render() {
                        log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                    }
                } else {
                    log::warn!("⚠️ [RERENDER] App no está inicializada");
                }
            }
            Err(_) => log::warn!("⚠️ [RERENDER] Render en curso, ignorado"),
        }
    });
}

/// Re-render en el siguiente tick (fuera del handler actual)
pub fn schedule_rerender() {
    Timeout::new(0, rerender_app).forget();
}

/// Ejecutar con el estado global (no-op si la app no existe)
pub fn with_app_state<F>(f: F)
where
    F: FnOnce(&AppState),
{
    let state = APP.with(|app_cell| {
        app_cell
            .try_borrow()
            .ok()
            .and_then(|guard| guard.as_ref().map(|app| app.state().clone()))
    });
    match state {
        Some(state) => f(&state),
        None => log::warn!("⚠️ [APP] Estado no disponible"),
    }
}

/// Ejecutar con el viewmodel del mapa activo, sin mantener préstamos de APP
pub fn with_live_map<F>(f: F)
where
    F: FnOnce(&LiveMapViewModel),
{
    let mut vm = None;
    with_app_state(|state| vm = state.live_map());
    match vm {
        Some(vm) => f(&vm),
        None => log::info!("ℹ️ [APP] No hay vista de mapa activa"),
    }
}

/// Navegación llamable desde JavaScript (`navigate_to("/help-lines")`)
#[wasm_bindgen]
pub fn navigate_to(path: &str) {
    let (path, query) = path.split_once('?').unwrap_or((path, ""));
    navigate(Route::parse(path, query));
}
