use crate::models::{MarkerId, MarkerSpec, Position};

/// Superficie de mapa que posee la vista (un recurso por vista)
pub trait MapSurface {
    /// Centrar el mapa (conserva el zoom actual)
    fn set_center(&mut self, center: Position) -> Result<(), MapError>;

    /// Centro actual
    fn center(&self) -> Position;

    /// Agregar un control (zoom/pan, geolocalizar)
    fn add_control(&mut self, control: MapControl) -> Result<(), MapError>;

    /// Agregar un marcador
    fn add_marker(&mut self, marker: MarkerSpec) -> Result<MarkerId, MapError>;

    /// Mover un marcador existente
    fn move_marker(&mut self, id: MarkerId, position: Position) -> Result<(), MapError>;

    /// Remover un marcador
    fn remove_marker(&mut self, id: MarkerId) -> Result<(), MapError>;

    /// Liberar el mapa y todos sus recursos. Idempotente.
    fn release(&mut self);
}

/// Controles del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapControl {
    Navigation { visualize_pitch: bool },
    Geolocate { high_accuracy: bool, track_user: bool },
}

/// Error del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    Released,
    UnknownMarker(MarkerId),
    Backend(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Released => write!(f, "Map has been released"),
            MapError::UnknownMarker(id) => write!(f, "Unknown marker {}", id),
            MapError::Backend(msg) => write!(f, "Map backend error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
