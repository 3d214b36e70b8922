// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod app_state;

pub use reactivity::*;
pub use app_state::*;
