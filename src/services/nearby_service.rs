// ============================================================================
// NEARBY SERVICE - Puntos de interés cercanos por categoría
// ============================================================================
// El generador mock desplaza el origen con ruido uniforme; la distancia
// mostrada se calcula sobre las coordenadas generadas.
// ============================================================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::NearbyConfig;
use crate::models::{PointOfInterest, Position, ServiceCategory};

/// Fuente de servicios cercanos (mock hoy, búsqueda geoespacial real mañana)
pub trait NearbyServiceSource {
    /// Lista completa, ordenada de más cercano a más lejano
    fn nearby(&mut self, origin: Position, category: ServiceCategory) -> Vec<PointOfInterest>;
}

/// Generador de POIs falsos alrededor del origen
pub struct MockNearbyGenerator<R: Rng = StdRng> {
    rng: R,
    jitter_deg: f64,
}

impl MockNearbyGenerator<StdRng> {
    /// Generador con semilla de entropía del sistema (crypto.getRandomValues en wasm)
    pub fn from_entropy(jitter_deg: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), jitter_deg)
    }
}

impl<R: Rng> MockNearbyGenerator<R> {
    /// Jitter no finito, negativo o excesivo -> valor por defecto
    pub fn with_rng(rng: R, jitter_deg: f64) -> Self {
        Self {
            rng,
            jitter_deg: NearbyConfig::sanitize_jitter(jitter_deg),
        }
    }

    fn jitter(&mut self) -> f64 {
        if self.jitter_deg == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-self.jitter_deg..=self.jitter_deg)
    }
}

impl<R: Rng> NearbyServiceSource for MockNearbyGenerator<R> {
    fn nearby(&mut self, origin: Position, category: ServiceCategory) -> Vec<PointOfInterest> {
        let mut results: Vec<PointOfInterest> = category
            .facility_names()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let point = Position::new(
                    origin.longitude + self.jitter(),
                    origin.latitude + self.jitter(),
                );
                PointOfInterest {
                    name: name.to_string(),
                    address: format!("{} Address, Sector {}", name, index + 1),
                    latitude: point.latitude,
                    longitude: point.longitude,
                    distance_km: round_one_decimal(origin.distance_km(&point)),
                }
            })
            .collect();

        results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        log::info!(
            "📍 [NEARBY] {} puntos de '{}' generados alrededor de ({})",
            results.len(),
            category,
            origin
        );
        results
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Position = Position { longitude: 77.2090, latitude: 28.6139 };

    fn generator(seed: u64) -> MockNearbyGenerator<StdRng> {
        MockNearbyGenerator::with_rng(StdRng::seed_from_u64(seed), 0.01)
    }

    #[test]
    fn test_four_entries_within_jitter_for_every_category() {
        for seed in 0..20 {
            let mut generator = generator(seed);
            for category in ServiceCategory::ALL {
                let pois = generator.nearby(ORIGIN, category);
                assert_eq!(pois.len(), 4);
                for poi in &pois {
                    assert!((poi.latitude - ORIGIN.latitude).abs() <= 0.01 + 1e-12);
                    assert!((poi.longitude - ORIGIN.longitude).abs() <= 0.01 + 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_distance_matches_generated_coordinates() {
        let mut generator = generator(7);
        for poi in generator.nearby(ORIGIN, ServiceCategory::Hospital) {
            let expected = round_one_decimal(ORIGIN.distance_km(&poi.position()));
            assert_eq!(poi.distance_km, expected);
            // ±0.01° en ambos ejes no supera ~1.6 km a esta latitud
            assert!(poi.distance_km >= 0.0 && poi.distance_km <= 1.6);
            assert_eq!(poi.distance_km, (poi.distance_km * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn test_sorted_nearest_first() {
        let mut generator = generator(42);
        let pois = generator.nearby(ORIGIN, ServiceCategory::Fire);
        assert!(pois.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn test_names_and_addresses_come_from_category_table() {
        let mut generator = generator(3);
        let pois = generator.nearby(ORIGIN, ServiceCategory::Hospital);
        let mut names: Vec<_> = pois.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        let mut expected = ServiceCategory::Hospital.facility_names().to_vec();
        expected.sort();
        assert_eq!(names, expected);

        let clinic = pois.iter().find(|p| p.name == "Apollo Clinic").unwrap();
        assert_eq!(clinic.address, "Apollo Clinic Address, Sector 3");
    }

    #[test]
    fn test_unknown_tag_uses_police_names() {
        let mut generator = generator(5);
        let pois = generator.nearby(ORIGIN, ServiceCategory::from_tag("embassy"));
        for poi in &pois {
            assert!(ServiceCategory::Police.facility_names().contains(&poi.name.as_str()));
        }
    }

    #[test]
    fn test_non_finite_jitter_uses_default() {
        let nan: f64 = "NaN".parse().unwrap();
        for jitter in [nan, f64::INFINITY, -0.5] {
            let mut generator = MockNearbyGenerator::with_rng(StdRng::seed_from_u64(1), jitter);
            let pois = generator.nearby(ORIGIN, ServiceCategory::Hospital);
            assert_eq!(pois.len(), 4);
            for poi in &pois {
                assert!((poi.latitude - ORIGIN.latitude).abs() <= 0.01 + 1e-12);
                assert!((poi.longitude - ORIGIN.longitude).abs() <= 0.01 + 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_jitter_places_everything_on_origin() {
        let mut generator = MockNearbyGenerator::with_rng(StdRng::seed_from_u64(1), 0.0);
        for poi in generator.nearby(ORIGIN, ServiceCategory::Police) {
            assert_eq!(poi.position(), ORIGIN);
            assert_eq!(poi.distance_km, 0.0);
        }
    }
}
