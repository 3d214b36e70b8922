// ============================================================================
// LOCATION SERVICE - Contrato del proveedor de ubicación del dispositivo
// ============================================================================
// Dos operaciones: lectura única y seguimiento continuo.
// El seguimiento devuelve un handle explícito que hay que liberar.
// ============================================================================

use std::rc::Rc;
use crate::config::LocationConfig;
use crate::models::PositionFix;

/// Opciones de cada petición (equivalente a `PositionOptions` del navegador)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// None = sin timeout
    pub timeout_ms: Option<u32>,
    pub maximum_age_ms: u32,
}

/// `maximumAge` por defecto de la API de geolocalización: sin posiciones en caché
pub const DEFAULT_MAXIMUM_AGE_MS: u32 = 0;

impl PositionOptions {
    /// Lectura única: alta precisión, sin timeout, `maximumAge` por defecto del navegador (0)
    pub fn one_shot(config: &LocationConfig) -> Self {
        Self {
            enable_high_accuracy: config.enable_high_accuracy,
            timeout_ms: None,
            maximum_age_ms: DEFAULT_MAXIMUM_AGE_MS,
        }
    }

    /// Seguimiento continuo: alta precisión, 5s de timeout, sin caché
    pub fn watch(config: &LocationConfig) -> Self {
        Self {
            enable_high_accuracy: config.enable_high_accuracy,
            timeout_ms: Some(config.watch_timeout_ms),
            maximum_age_ms: config.watch_maximum_age_ms,
        }
    }
}

/// Error de ubicación
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// El navegador no expone `navigator.geolocation`
    Unsupported,
    Backend(String),
}

impl LocationError {
    /// Códigos W3C de `GeolocationPositionError`
    pub fn from_code(code: u16, message: &str) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Backend(message.to_string()),
        }
    }

    /// Mensaje para el usuario
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "Location permission denied. Allow location access and retry.",
            LocationError::PositionUnavailable => "Your position is currently unavailable.",
            LocationError::Timeout => "Locating your device took too long.",
            LocationError::Unsupported => "This browser does not support geolocation.",
            LocationError::Backend(_) => "Could not determine your location.",
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location permission denied"),
            LocationError::PositionUnavailable => write!(f, "Position unavailable"),
            LocationError::Timeout => write!(f, "Location request timed out"),
            LocationError::Unsupported => write!(f, "Geolocation not supported"),
            LocationError::Backend(msg) => write!(f, "Geolocation error: {}", msg),
        }
    }
}

impl std::error::Error for LocationError {}

pub type LocationResult = Result<PositionFix, LocationError>;
pub type PositionCallback = Box<dyn FnOnce(LocationResult)>;
pub type WatchCallback = Box<dyn FnMut(LocationResult)>;

/// ID de un watch activo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub i32);

/// Proveedor de ubicación del dispositivo
///
/// Los callbacks llegan en el hilo principal, en cualquier momento posterior
/// a la llamada (o nunca). Un proveedor puede invocarlos de forma síncrona
/// cuando el fallo es inmediato (p. ej. `Unsupported`).
pub trait LocationProvider {
    /// Pedir la posición actual una vez
    fn current_position(&self, options: PositionOptions, callback: PositionCallback);

    /// Empezar seguimiento continuo
    fn watch_position(&self, options: PositionOptions, callback: WatchCallback) -> Result<WatchId, LocationError>;

    /// Detener un seguimiento. Ids desconocidos se ignoran.
    fn clear_watch(&self, id: WatchId);
}

/// Suscripción de seguimiento con liberación explícita
///
/// `release()` detiene el watch; si el handle se suelta sin liberar,
/// `Drop` lo libera igualmente.
pub struct LocationSubscription {
    id: WatchId,
    provider: Rc<dyn LocationProvider>,
    released: bool,
}

impl LocationSubscription {
    /// Iniciar un watch y envolverlo en un handle
    pub fn start(
        provider: Rc<dyn LocationProvider>,
        options: PositionOptions,
        callback: WatchCallback,
    ) -> Result<Self, LocationError> {
        let id = provider.watch_position(options, callback)?;
        log::info!("👁️ [GEO] Watch {} iniciado", id.0);
        Ok(Self {
            id,
            provider,
            released: false,
        })
    }

    pub fn id(&self) -> WatchId {
        self.id
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.provider.clear_watch(self.id);
            log::info!("🛑 [GEO] Watch {} liberado", self.id.0);
        }
    }
}

impl Drop for LocationSubscription {
    fn drop(&mut self) {
        self.release_inner();
    }
}
