// ============================================================================
// APP - Aplicación principal (router + montaje de vistas)
// ============================================================================

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::maps::{MapLibreSurface, MapSurface};
use crate::models::{Route, ServiceCategory};
use crate::services::{BrowserGeolocation, LocationProvider, MockNearbyGenerator};
use crate::state::AppState;
use crate::utils::ROOT_ELEMENT_ID;
use crate::viewmodels::LiveMapViewModel;
use crate::views::{render_app, update_live_map_status};

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación en la ruta indicada
    pub fn new(route: Route) -> Result<Self, JsValue> {
        let root = get_element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", ROOT_ELEMENT_ID)))?;

        log::info!("🧭 [APP] Ruta inicial: {:?}", route);
        Ok(Self {
            state: AppState::new(route),
            root,
        })
    }

    /// Renderizar la ruta actual (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        // La vista de mapa anterior no sobrevive al re-render
        self.state.teardown_live_map();

        clear_children(&self.root);
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;

        if let Route::Navigation { service } = self.state.current_route() {
            self.mount_live_map(service);
        }
        Ok(())
    }

    /// Crear el viewmodel del mapa una vez que el contenedor está en el DOM
    fn mount_live_map(&self, service: Option<ServiceCategory>) {
        let provider: Rc<dyn LocationProvider> = Rc::new(BrowserGeolocation::new());
        let nearby = MockNearbyGenerator::from_entropy(CONFIG.nearby_config.jitter_deg);
        let vm = LiveMapViewModel::new(
            service,
            provider,
            Box::new(nearby),
            CONFIG.location_config.clone(),
        );

        vm.subscribe(|status| {
            if let Err(e) = update_live_map_status(status) {
                log::warn!("⚠️ [APP] Error actualizando estado del mapa: {:?}", e);
            }
        });

        let mounted = vm.mount(|| {
            MapLibreSurface::create(&CONFIG.map_config).map(|map| Box::new(map) as Box<dyn MapSurface>)
        });
        if let Err(e) = mounted {
            log::error!("❌ [APP] No se pudo crear el mapa: {}", e);
        }

        self.state.set_live_map(vm);
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
