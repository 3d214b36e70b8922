/// Texto del alert del botón SOS (no hay despacho real)
pub const SOS_CONFIRMATION: &str = "Emergency SOS activated! Location shared with emergency services.";

/// Posición de los controles del mapa
pub const CONTROL_POSITION: &str = "top-right";

/// ID del contenedor raíz en index.html
pub const ROOT_ELEMENT_ID: &str = "app";

/// IDs de elementos de la vista de mapa que se actualizan sin re-render
pub const STATUS_OVERLAY_ID: &str = "map-status-overlay";
pub const LOCATION_ERROR_ID: &str = "map-location-error";
pub const TRACKING_BUTTON_ID: &str = "btn-tracking";
pub const STATUS_BODY_ID: &str = "map-status-body";
pub const LOCATION_ERROR_TEXT_ID: &str = "map-location-error-text";
