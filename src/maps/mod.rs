// Módulo de mapas: trait común + implementación MapLibre para web

pub mod traits;
pub mod web;

pub use traits::{MapControl, MapError, MapSurface};
pub use web::MapLibreSurface;
