// ============================================================================
// BROWSER GEOLOCATION - LocationProvider sobre navigator.geolocation
// ============================================================================
// Los closures de cada watch se guardan aquí y se sueltan en clear_watch,
// así un watch liberado no deja closures JS vivos.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Geolocation;
use crate::models::{Position, PositionFix};
use super::location_service::*;

struct WatchClosures {
    _on_success: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

/// Proveedor de ubicación del navegador
pub struct BrowserGeolocation {
    watches: RefCell<HashMap<i32, WatchClosures>>,
}

impl BrowserGeolocation {
    pub fn new() -> Self {
        Self {
            watches: RefCell::new(HashMap::new()),
        }
    }

    fn geolocation() -> Result<Geolocation, LocationError> {
        let window = web_sys::window().ok_or(LocationError::Unsupported)?;
        let geolocation = window
            .navigator()
            .geolocation()
            .map_err(|_| LocationError::Unsupported)?;
        // Algunos navegadores devuelven undefined en contextos no seguros
        if JsValue::from(geolocation.clone()).is_undefined() {
            return Err(LocationError::Unsupported);
        }
        Ok(geolocation)
    }
}

impl Default for BrowserGeolocation {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for BrowserGeolocation {
    fn current_position(&self, options: PositionOptions, callback: PositionCallback) {
        let geolocation = match Self::geolocation() {
            Ok(g) => g,
            Err(e) => {
                callback(Err(e));
                return;
            }
        };

        // Solo uno de los dos closures se ejecuta; el compartido garantiza
        // que el callback de Rust se llama como máximo una vez
        let shared: Rc<RefCell<Option<PositionCallback>>> = Rc::new(RefCell::new(Some(callback)));

        let on_success = {
            let shared = shared.clone();
            Closure::once_into_js(move |value: JsValue| {
                if let Some(cb) = shared.borrow_mut().take() {
                    cb(parse_position(&value));
                }
            })
        };
        let on_error = {
            let shared = shared.clone();
            Closure::once_into_js(move |value: JsValue| {
                if let Some(cb) = shared.borrow_mut().take() {
                    cb(Err(parse_error(&value)));
                }
            })
        };

        let js_options = build_options(&options);
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
            &js_options,
        ) {
            if let Some(cb) = shared.borrow_mut().take() {
                cb(Err(LocationError::Backend(format!("{:?}", e))));
            }
        }
    }

    fn watch_position(&self, options: PositionOptions, callback: WatchCallback) -> Result<WatchId, LocationError> {
        let geolocation = Self::geolocation()?;
        let shared = Rc::new(RefCell::new(callback));

        let on_success = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move |value: JsValue| {
                let mut cb = shared.borrow_mut();
                (&mut *cb)(parse_position(&value));
            }) as Box<dyn FnMut(JsValue)>)
        };
        let on_error = {
            let shared = shared.clone();
            Closure::wrap(Box::new(move |value: JsValue| {
                let mut cb = shared.borrow_mut();
                (&mut *cb)(Err(parse_error(&value)));
            }) as Box<dyn FnMut(JsValue)>)
        };

        let js_options = build_options(&options);
        let id = geolocation
            .watch_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &js_options,
            )
            .map_err(|e| LocationError::Backend(format!("{:?}", e)))?;

        self.watches.borrow_mut().insert(id, WatchClosures {
            _on_success: on_success,
            _on_error: on_error,
        });
        Ok(WatchId(id))
    }

    fn clear_watch(&self, id: WatchId) {
        if let Ok(geolocation) = Self::geolocation() {
            geolocation.clear_watch(id.0);
        }
        // Soltar los closures después de clearWatch
        if self.watches.borrow_mut().remove(&id.0).is_none() {
            log::warn!("⚠️ [GEO] clear_watch para id desconocido {}", id.0);
        }
    }
}

/// Objeto `PositionOptions` de JS
fn build_options(options: &PositionOptions) -> web_sys::PositionOptions {
    let object = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &object,
        &JsValue::from_str("enableHighAccuracy"),
        &JsValue::from_bool(options.enable_high_accuracy),
    );
    if let Some(timeout) = options.timeout_ms {
        let _ = js_sys::Reflect::set(
            &object,
            &JsValue::from_str("timeout"),
            &JsValue::from_f64(timeout as f64),
        );
    }
    let _ = js_sys::Reflect::set(
        &object,
        &JsValue::from_str("maximumAge"),
        &JsValue::from_f64(options.maximum_age_ms as f64),
    );
    object.unchecked_into()
}

fn get_f64(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

/// `GeolocationPosition` -> PositionFix
fn parse_position(value: &JsValue) -> LocationResult {
    let coords = js_sys::Reflect::get(value, &JsValue::from_str("coords"))
        .map_err(|_| LocationError::Backend("position without coords".to_string()))?;

    let longitude = get_f64(&coords, "longitude")
        .ok_or_else(|| LocationError::Backend("missing longitude".to_string()))?;
    let latitude = get_f64(&coords, "latitude")
        .ok_or_else(|| LocationError::Backend("missing latitude".to_string()))?;

    let position = Position::new(longitude, latitude);
    if !position.is_valid() {
        return Err(LocationError::Backend(format!("invalid coordinates ({})", position)));
    }

    Ok(PositionFix {
        position,
        accuracy_m: get_f64(&coords, "accuracy"),
    })
}

/// `GeolocationPositionError` -> LocationError
fn parse_error(value: &JsValue) -> LocationError {
    let code = get_f64(value, "code").unwrap_or(0.0) as u16;
    let message = js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    LocationError::from_code(code, &message)
}
