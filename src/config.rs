use serde::{Deserialize, Serialize};
use crate::models::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub location_config: LocationConfig,
    pub nearby_config: NearbyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            map_config: MapConfig::default(),
            location_config: LocationConfig::default(),
            nearby_config: NearbyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lng: f64,
    pub default_center_lat: f64,
    pub default_zoom: f64,
    pub tile_url: String,
    pub tile_size: u32,
    pub attribution: String,
    pub container_id: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lng: 77.2090, // Delhi
            default_center_lat: 28.6139,
            default_zoom: 13.0,
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_size: 256,
            attribution: "© OpenStreetMap contributors".to_string(),
            container_id: "map".to_string(),
        }
    }
}

impl MapConfig {
    pub fn default_center(&self) -> Position {
        Position::new(self.default_center_lng, self.default_center_lat)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub enable_high_accuracy: bool,
    pub watch_timeout_ms: u32,
    pub watch_maximum_age_ms: u32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            watch_timeout_ms: 5000,
            watch_maximum_age_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyConfig {
    /// Desplazamiento máximo por eje, en grados
    pub jitter_deg: f64,
}

pub const DEFAULT_JITTER_DEG: f64 = 0.01;
/// Jitter máximo aceptado (más allá deja de ser "cercano")
pub const MAX_JITTER_DEG: f64 = 1.0;

impl Default for NearbyConfig {
    fn default() -> Self {
        Self { jitter_deg: DEFAULT_JITTER_DEG }
    }
}

impl NearbyConfig {
    /// Jitter válido: finito y en [0, MAX_JITTER_DEG]; cualquier otro valor -> por defecto
    pub fn sanitize_jitter(jitter_deg: f64) -> f64 {
        if jitter_deg.is_finite() && (0.0..=MAX_JITTER_DEG).contains(&jitter_deg) {
            jitter_deg
        } else {
            log::warn!("⚠️ [CONFIG] Jitter inválido {}, usando {}", jitter_deg, DEFAULT_JITTER_DEG);
            DEFAULT_JITTER_DEG
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("77.2090").parse().unwrap_or(77.2090),
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("28.6139").parse().unwrap_or(28.6139),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("13.0").parse().unwrap_or(13.0),
                tile_url: option_env!("MAP_TILE_URL")
                    .map(|s| s.to_string())
                    .unwrap_or(defaults.map_config.tile_url),
                tile_size: option_env!("MAP_TILE_SIZE")
                    .unwrap_or("256").parse().unwrap_or(256),
                attribution: option_env!("MAP_ATTRIBUTION")
                    .map(|s| s.to_string())
                    .unwrap_or(defaults.map_config.attribution),
                container_id: defaults.map_config.container_id,
            },
            location_config: LocationConfig {
                enable_high_accuracy: option_env!("LOCATION_HIGH_ACCURACY")
                    .unwrap_or("true").parse().unwrap_or(true),
                watch_timeout_ms: option_env!("WATCH_TIMEOUT_MS")
                    .unwrap_or("5000").parse().unwrap_or(5000),
                watch_maximum_age_ms: option_env!("WATCH_MAXIMUM_AGE_MS")
                    .unwrap_or("0").parse().unwrap_or(0),
            },
            nearby_config: NearbyConfig {
                jitter_deg: NearbyConfig::sanitize_jitter(
                    option_env!("NEARBY_JITTER_DEG")
                        .unwrap_or("0.01").parse().unwrap_or(DEFAULT_JITTER_DEG),
                ),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm-logger
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            log::Level::Error
        } else if self.is_production() {
            log::Level::Warn
        } else {
            log::Level::Info
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_center_is_delhi() {
        let config = AppConfig::default();
        assert_eq!(config.map_config.default_center(), Position::new(77.2090, 28.6139));
        assert_eq!(config.map_config.default_zoom, 13.0);
    }

    #[test]
    fn test_watch_defaults() {
        let location = LocationConfig::default();
        assert!(location.enable_high_accuracy);
        assert_eq!(location.watch_timeout_ms, 5000);
        assert_eq!(location.watch_maximum_age_ms, 0);
    }

    #[test]
    fn test_invalid_jitter_falls_back_to_default() {
        let nan: f64 = "NaN".parse().unwrap();
        assert_eq!(NearbyConfig::sanitize_jitter(nan), DEFAULT_JITTER_DEG);
        assert_eq!(NearbyConfig::sanitize_jitter(f64::INFINITY), DEFAULT_JITTER_DEG);
        assert_eq!(NearbyConfig::sanitize_jitter(-0.02), DEFAULT_JITTER_DEG);
        assert_eq!(NearbyConfig::sanitize_jitter(1e300), DEFAULT_JITTER_DEG);
        assert_eq!(NearbyConfig::sanitize_jitter(0.0), 0.0);
        assert_eq!(NearbyConfig::sanitize_jitter(0.05), 0.05);
    }

    #[test]
    fn test_log_level() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), log::Level::Info);
        config.environment = "production".to_string();
        assert_eq!(config.log_level(), log::Level::Warn);
        config.enable_logging = false;
        assert_eq!(config.log_level(), log::Level::Error);
    }
}
