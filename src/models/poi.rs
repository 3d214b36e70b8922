use serde::{Deserialize, Serialize};
use super::position::Position;

/// Punto de interés sintetizado (no persistido, sin identidad entre llamadas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

impl PointOfInterest {
    pub fn position(&self) -> Position {
        Position::new(self.longitude, self.latitude)
    }

    /// Distancia formateada a un decimal ("1.2km")
    pub fn distance_label(&self) -> String {
        format!("{:.1}km", self.distance_km)
    }
}
