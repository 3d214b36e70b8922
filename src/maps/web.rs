use std::collections::BTreeMap;
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::JsValue;
use crate::config::MapConfig;
use crate::models::{MarkerId, MarkerSpec, Position};
use crate::utils::maplibre_ffi::{self, to_js_options, lng_lat};
use crate::utils::CONTROL_POSITION;
use super::{MapControl, MapError, MapSurface};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerOptions<'a> {
    color: &'a str,
}

/// Renderizador de mapas para web usando MapLibre GL JS
pub struct MapLibreSurface {
    map: Option<maplibre_ffi::Map>,
    markers: BTreeMap<MarkerId, maplibre_ffi::Marker>,
    next_marker_id: u32,
    center: Position,
}

impl MapLibreSurface {
    /// Crear el mapa en el contenedor configurado, con fuente raster OSM
    pub fn create(config: &MapConfig) -> Result<Self, MapError> {
        log::info!("🗺️ [MAP] Inicializando MapLibre en #{}...", config.container_id);

        let center = config.default_center();
        let options = json!({
            "container": config.container_id,
            "style": {
                "version": 8,
                "sources": {
                    "osm": {
                        "type": "raster",
                        "tiles": [config.tile_url],
                        "tileSize": config.tile_size,
                        "attribution": config.attribution,
                    }
                },
                "layers": [
                    { "id": "osm", "type": "raster", "source": "osm" }
                ]
            },
            "center": center.lng_lat(),
            "zoom": config.default_zoom,
        });

        let js_options = to_js_options(&options).map_err(js_error)?;
        let map = maplibre_ffi::Map::new(&js_options).map_err(js_error)?;

        log::info!("✅ [MAP] Mapa creado en ({}) zoom {}", center, config.default_zoom);
        Ok(Self {
            map: Some(map),
            markers: BTreeMap::new(),
            next_marker_id: 1,
            center,
        })
    }

    fn map(&self) -> Result<&maplibre_ffi::Map, MapError> {
        self.map.as_ref().ok_or(MapError::Released)
    }
}

impl MapSurface for MapLibreSurface {
    fn set_center(&mut self, center: Position) -> Result<(), MapError> {
        self.map()?.set_center(&lng_lat(center.lng_lat()));
        self.center = center;
        log::info!("🎯 [MAP] Centro -> ({})", center);
        Ok(())
    }

    fn center(&self) -> Position {
        self.center
    }

    fn add_control(&mut self, control: MapControl) -> Result<(), MapError> {
        let map = self.map()?;
        match control {
            MapControl::Navigation { visualize_pitch } => {
                let options = to_js_options(&json!({ "visualizePitch": visualize_pitch })).map_err(js_error)?;
                let control = maplibre_ffi::NavigationControl::new(&options);
                map.add_control(control.as_ref(), CONTROL_POSITION);
            }
            MapControl::Geolocate { high_accuracy, track_user } => {
                let options = to_js_options(&json!({
                    "positionOptions": { "enableHighAccuracy": high_accuracy },
                    "trackUserLocation": track_user,
                }))
                .map_err(js_error)?;
                let control = maplibre_ffi::GeolocateControl::new(&options);
                map.add_control(control.as_ref(), CONTROL_POSITION);
            }
        }
        Ok(())
    }

    fn add_marker(&mut self, spec: MarkerSpec) -> Result<MarkerId, MapError> {
        let map = self.map()?;

        let options = to_js_options(&MarkerOptions { color: &spec.color }).map_err(js_error)?;
        let marker = maplibre_ffi::Marker::new(&options);
        marker.set_lng_lat(&lng_lat(spec.position.lng_lat()));

        if let Some(popup_content) = &spec.popup {
            let popup = maplibre_ffi::Popup::new(&JsValue::UNDEFINED);
            popup.set_html(&popup_content.to_html());
            marker.set_popup(&popup);
        }
        marker.add_to(map);

        let id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;
        self.markers.insert(id, marker);
        Ok(id)
    }

    fn move_marker(&mut self, id: MarkerId, position: Position) -> Result<(), MapError> {
        self.map()?;
        let marker = self.markers.get(&id).ok_or(MapError::UnknownMarker(id))?;
        marker.set_lng_lat(&lng_lat(position.lng_lat()));
        Ok(())
    }

    fn remove_marker(&mut self, id: MarkerId) -> Result<(), MapError> {
        self.map()?;
        let marker = self.markers.remove(&id).ok_or(MapError::UnknownMarker(id))?;
        marker.remove();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(map) = self.map.take() {
            for (_, marker) in std::mem::take(&mut self.markers) {
                marker.remove();
            }
            map.remove();
            log::info!("🧹 [MAP] Mapa liberado");
        }
    }
}

impl Drop for MapLibreSurface {
    fn drop(&mut self) {
        self.release();
    }
}

fn js_error(e: JsValue) -> MapError {
    MapError::Backend(format!("{:?}", e))
}
