// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::Route;
use crate::viewmodels::LiveMapViewModel;

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub route: Rc<RefCell<Route>>,

    // UI Visibility
    pub show_emergency_dialog: Rc<RefCell<bool>>,

    /// Vista de mapa activa (solo en la ruta de navegación)
    pub live_map: Rc<RefCell<Option<LiveMapViewModel>>>,
}

impl AppState {
    pub fn new(route: Route) -> Self {
        Self {
            route: Rc::new(RefCell::new(route)),
            show_emergency_dialog: Rc::new(RefCell::new(false)),
            live_map: Rc::new(RefCell::new(None)),
        }
    }

    pub fn current_route(&self) -> Route {
        *self.route.borrow()
    }

    /// Cambiar de ruta (cierra el diálogo de emergencia)
    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
        *self.show_emergency_dialog.borrow_mut() = false;
    }

    pub fn set_emergency_dialog(&self, show: bool) {
        *self.show_emergency_dialog.borrow_mut() = show;
    }

    pub fn is_emergency_dialog_open(&self) -> bool {
        *self.show_emergency_dialog.borrow()
    }

    /// Copia del viewmodel activo (sin mantener el préstamo)
    pub fn live_map(&self) -> Option<LiveMapViewModel> {
        self.live_map.borrow().clone()
    }

    pub fn set_live_map(&self, vm: LiveMapViewModel) {
        if let Some(previous) = self.live_map.borrow_mut().replace(vm) {
            previous.teardown();
        }
    }

    /// Liberar la vista de mapa activa, si existe
    pub fn teardown_live_map(&self) {
        let previous = self.live_map.borrow_mut().take();
        if let Some(vm) = previous {
            vm.teardown();
        }
    }
}
