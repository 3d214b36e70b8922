use serde::{Deserialize, Serialize};

/// Radio medio de la Tierra (IUGG) en km
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Posición del dispositivo (longitud, latitud) en grados
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Par [lng, lat] tal como lo espera MapLibre
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Coordenadas finitas y dentro de rango
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }

    /// Distancia haversine en km
    pub fn distance_km(&self, other: &Position) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lng = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Lectura puntual del proveedor de ubicación
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub position: Position,
    /// Precisión reportada en metros (si el proveedor la da)
    pub accuracy_m: Option<f64>,
}

impl PositionFix {
    pub fn with_accuracy(position: Position, accuracy_m: f64) -> Self {
        Self { position, accuracy_m: Some(accuracy_m) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point_is_zero() {
        let delhi = Position::new(77.2090, 28.6139);
        assert_eq!(delhi.distance_km(&delhi), 0.0);
    }

    #[test]
    fn test_distance_delhi_to_agra() {
        let delhi = Position::new(77.2090, 28.6139);
        let agra = Position::new(78.0081, 27.1767);
        let d = delhi.distance_km(&agra);
        // ~178 km en línea recta
        assert!(d > 170.0 && d < 185.0, "distance was {}", d);
    }

    #[test]
    fn test_validity() {
        assert!(Position::new(77.2090, 28.6139).is_valid());
        assert!(!Position::new(181.0, 0.0).is_valid());
        assert!(!Position::new(0.0, -90.5).is_valid());
        assert!(!Position::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_lng_lat_order() {
        assert_eq!(Position::new(77.2, 28.6).lng_lat(), [77.2, 28.6]);
    }
}
