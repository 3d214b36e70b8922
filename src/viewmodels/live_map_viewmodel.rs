// ============================================================================
// LIVE MAP VIEWMODEL - Ciclo de vida de la vista de mapa
// ============================================================================
// Uninitialized -> Initialized -> Located -> Tracking, y TornDown al salir.
// La vista posee el mapa y la suscripción de seguimiento; ambos se liberan
// en teardown(). Todo corre en el hilo principal; los callbacks de ubicación
// guardan un Weak y se ignoran después del teardown.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use crate::config::LocationConfig;
use crate::maps::{MapControl, MapError, MapSurface};
use crate::models::{MarkerId, MarkerSpec, PointOfInterest, Position, PositionFix, ServiceCategory};
use crate::services::{
    LocationError, LocationProvider, LocationResult, LocationSubscription, NearbyServiceSource,
    PositionOptions,
};
use crate::state::ReactiveState;

/// Fase de la vista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPhase {
    Uninitialized,
    /// Mapa creado en el centro por defecto, sin posición
    Initialized,
    /// Posición obtenida, marcador colocado
    Located,
    /// Seguimiento continuo activo
    Tracking,
    TornDown,
}

/// Snapshot publicado para la vista
#[derive(Debug, Clone, PartialEq)]
pub struct MapStatus {
    pub phase: MapPhase,
    pub service: Option<ServiceCategory>,
    pub position: Option<Position>,
    pub accuracy_m: Option<f64>,
    pub points_of_interest: Vec<PointOfInterest>,
    pub error: Option<LocationError>,
}

impl MapStatus {
    fn initial(service: Option<ServiceCategory>) -> Self {
        Self {
            phase: MapPhase::Uninitialized,
            service,
            position: None,
            accuracy_m: None,
            points_of_interest: Vec::new(),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.service {
            Some(category) => category.title(),
            None => "Live Navigation",
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.phase == MapPhase::Tracking
    }

    pub fn found(&self) -> usize {
        self.points_of_interest.len()
    }

    /// Distancia del POI más cercano
    pub fn nearest_km(&self) -> Option<f64> {
        self.points_of_interest
            .iter()
            .map(|p| p.distance_km)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Estado legible para el overlay
    pub fn status_label(&self) -> &'static str {
        match (self.phase, &self.error, self.position) {
            (MapPhase::TornDown, _, _) => "Closed",
            (_, Some(_), None) => "Location unavailable",
            (MapPhase::Uninitialized | MapPhase::Initialized, _, _) => "Locating…",
            (MapPhase::Tracking, _, _) => "Tracking",
            _ => "Active",
        }
    }

    /// Filas (etiqueta, valor) del overlay de estado
    pub fn overlay_rows(&self) -> Vec<(&'static str, String)> {
        match self.service {
            Some(_) => vec![
                ("Found:", format!("{} locations", self.found())),
                (
                    "Nearest:",
                    self.nearest_km()
                        .map(|d| format!("{:.1}km", d))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                ("Status:", self.status_label().to_string()),
            ],
            None => vec![
                (
                    "Position:",
                    self.position
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                (
                    "Accuracy:",
                    self.accuracy_m
                        .map(|a| format!("±{:.0}m", a))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                ("Status:", self.status_label().to_string()),
            ],
        }
    }
}

/// Origen de una lectura
#[derive(Debug, Clone, Copy, PartialEq)]
enum FixSource {
    OneShot,
    Watch(u64),
}

struct Inner {
    phase: MapPhase,
    service: Option<ServiceCategory>,
    map: Option<Box<dyn MapSurface>>,
    nearby: Box<dyn NearbyServiceSource>,
    fix: Option<PositionFix>,
    position_marker: Option<MarkerId>,
    points_of_interest: Vec<PointOfInterest>,
    poi_markers: Vec<MarkerId>,
    nearby_generated: bool,
    subscription: Option<LocationSubscription>,
    watch_generation: u64,
    last_error: Option<LocationError>,
}

struct Shared {
    inner: RefCell<Inner>,
    status: ReactiveState<MapStatus>,
    provider: Rc<dyn LocationProvider>,
    location_config: LocationConfig,
}

/// ViewModel de la vista de mapa en vivo
#[derive(Clone)]
pub struct LiveMapViewModel {
    shared: Rc<Shared>,
}

impl LiveMapViewModel {
    pub fn new(
        service: Option<ServiceCategory>,
        provider: Rc<dyn LocationProvider>,
        nearby: Box<dyn NearbyServiceSource>,
        location_config: LocationConfig,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                inner: RefCell::new(Inner {
                    phase: MapPhase::Uninitialized,
                    service,
                    map: None,
                    nearby,
                    fix: None,
                    position_marker: None,
                    points_of_interest: Vec::new(),
                    poi_markers: Vec::new(),
                    nearby_generated: false,
                    subscription: None,
                    watch_generation: 0,
                    last_error: None,
                }),
                status: ReactiveState::new(MapStatus::initial(service)),
                provider,
                location_config,
            }),
        }
    }

    fn from_weak(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    // ------------------------------------------------------------------------
    // Consultas
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> MapPhase {
        self.shared.inner.borrow().phase
    }

    pub fn status(&self) -> MapStatus {
        self.shared.status.get()
    }

    /// Centro actual del mapa (None si no hay mapa)
    pub fn center(&self) -> Option<Position> {
        self.shared.inner.borrow().map.as_ref().map(|m| m.center())
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&MapStatus) + 'static,
    {
        self.shared.status.subscribe(callback);
    }

    // ------------------------------------------------------------------------
    // Ciclo de vida
    // ------------------------------------------------------------------------

    /// Uninitialized -> Initialized: crear el mapa y pedir la posición una vez
    pub fn mount<F>(&self, create_map: F) -> Result<(), MapError>
    where
        F: FnOnce() -> Result<Box<dyn MapSurface>, MapError>,
    {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.phase != MapPhase::Uninitialized {
                log::warn!("⚠️ [MAP] mount() ignorado en fase {:?}", inner.phase);
                return Ok(());
            }

            let mut map = create_map()?;
            let controls = [
                MapControl::Navigation { visualize_pitch: true },
                MapControl::Geolocate {
                    high_accuracy: self.shared.location_config.enable_high_accuracy,
                    track_user: true,
                },
            ];
            for control in controls {
                if let Err(e) = map.add_control(control) {
                    log::warn!("⚠️ [MAP] No se pudo agregar control: {}", e);
                }
            }

            inner.map = Some(map);
            inner.phase = MapPhase::Initialized;
            log::info!("🗺️ [MAP] Vista inicializada (servicio: {:?})", inner.service);
        }

        self.publish();
        self.request_current_position();
        Ok(())
    }

    /// Reintentar la lectura única (después de un fallo)
    pub fn retry_location(&self) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if matches!(inner.phase, MapPhase::Uninitialized | MapPhase::TornDown) {
                return;
            }
            inner.last_error = None;
        }
        log::info!("🔄 [GEO] Reintentando ubicación...");
        self.publish();
        self.request_current_position();
    }

    fn request_current_position(&self) {
        let weak = Rc::downgrade(&self.shared);
        let options = PositionOptions::one_shot(&self.shared.location_config);
        self.shared.provider.current_position(
            options,
            Box::new(move |result| {
                if let Some(vm) = Self::from_weak(&weak) {
                    vm.handle_location(FixSource::OneShot, result);
                }
            }),
        );
    }

    /// Empezar seguimiento continuo
    ///
    /// Si ya hay un seguimiento activo se libera antes de crear el nuevo:
    /// nunca hay más de un watch por vista.
    pub fn start_tracking(&self) -> Result<(), LocationError> {
        let (previous, generation) = {
            let mut inner = self.shared.inner.borrow_mut();
            if matches!(inner.phase, MapPhase::Uninitialized | MapPhase::TornDown) {
                log::warn!("⚠️ [GEO] start_tracking() ignorado en fase {:?}", inner.phase);
                return Ok(());
            }
            inner.watch_generation += 1;
            (inner.subscription.take(), inner.watch_generation)
        };

        if let Some(previous) = previous {
            log::info!("🔁 [GEO] Reemplazando watch {}", previous.id().0);
            previous.release();
        }

        let weak = Rc::downgrade(&self.shared);
        let started = LocationSubscription::start(
            self.shared.provider.clone(),
            PositionOptions::watch(&self.shared.location_config),
            Box::new(move |result| {
                if let Some(vm) = Self::from_weak(&weak) {
                    vm.handle_location(FixSource::Watch(generation), result);
                }
            }),
        );

        let outcome = {
            let mut inner = self.shared.inner.borrow_mut();
            match started {
                Ok(subscription) => {
                    if inner.phase == MapPhase::TornDown || inner.watch_generation != generation {
                        // teardown o stop entre medias: no conservar el watch
                        drop(inner);
                        subscription.release();
                        return Ok(());
                    }
                    inner.subscription = Some(subscription);
                    inner.phase = MapPhase::Tracking;
                    Ok(())
                }
                Err(e) => {
                    log::warn!("⚠️ [GEO] No se pudo iniciar el seguimiento: {}", e);
                    inner.phase = Self::resting_phase(&inner);
                    inner.last_error = Some(e.clone());
                    Err(e)
                }
            }
        };

        self.publish();
        outcome
    }

    /// Detener el seguimiento continuo
    pub fn stop_tracking(&self) {
        let subscription = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.phase != MapPhase::Tracking {
                return;
            }
            inner.watch_generation += 1;
            inner.phase = Self::resting_phase(&inner);
            inner.subscription.take()
        };

        if let Some(subscription) = subscription {
            subscription.release();
        }
        self.publish();
    }

    /// Alternar seguimiento (botón del header)
    pub fn toggle_tracking(&self) -> Result<(), LocationError> {
        if self.phase() == MapPhase::Tracking {
            self.stop_tracking();
            Ok(())
        } else {
            self.start_tracking()
        }
    }

    /// Regenerar la lista completa de POIs desde la posición actual
    pub fn refresh_nearby(&self) -> usize {
        let count = {
            let mut inner = self.shared.inner.borrow_mut();
            match (inner.phase, inner.fix, inner.service) {
                (MapPhase::Located | MapPhase::Tracking, Some(fix), Some(service)) => {
                    Self::place_nearby(&mut inner, fix.position, service)
                }
                _ => {
                    log::info!("ℹ️ [NEARBY] Sin posición o sin servicio, nada que regenerar");
                    return 0;
                }
            }
        };
        self.publish();
        count
    }

    /// Liberar todo: suscripción, marcadores y mapa. Idempotente.
    pub fn teardown(&self) {
        let (subscription, map, markers) = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.phase == MapPhase::TornDown {
                return;
            }
            inner.phase = MapPhase::TornDown;
            inner.watch_generation += 1;

            let mut markers: Vec<MarkerId> = inner.poi_markers.drain(..).collect();
            markers.extend(inner.position_marker.take());
            inner.points_of_interest.clear();
            (inner.subscription.take(), inner.map.take(), markers)
        };

        if let Some(subscription) = subscription {
            subscription.release();
        }
        if let Some(mut map) = map {
            for id in markers {
                if let Err(e) = map.remove_marker(id) {
                    log::warn!("⚠️ [MAP] Error removiendo {}: {}", id, e);
                }
            }
            map.release();
        }

        log::info!("🧹 [MAP] Vista de mapa liberada");
        self.publish();
    }

    // ------------------------------------------------------------------------
    // Callbacks de ubicación
    // ------------------------------------------------------------------------

    fn handle_location(&self, source: FixSource, result: LocationResult) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if matches!(inner.phase, MapPhase::TornDown | MapPhase::Uninitialized) {
                return;
            }
            if let FixSource::Watch(generation) = source {
                if generation != inner.watch_generation || inner.phase != MapPhase::Tracking {
                    log::info!("ℹ️ [GEO] Lectura de un watch ya liberado, ignorada");
                    return;
                }
            }

            match result {
                Ok(fix) => Self::apply_fix(&mut inner, fix, source),
                Err(e) => {
                    // No se reintenta automáticamente: la vista muestra el error y un botón
                    log::warn!("⚠️ [GEO] Error de ubicación ({:?}): {}", source, e);
                    inner.last_error = Some(e);
                }
            }
        }
        self.publish();
    }

    fn apply_fix(inner: &mut Inner, fix: PositionFix, source: FixSource) {
        let position = fix.position;
        log::info!("📍 [GEO] Posición ({:?}): ({})", source, position);

        if let Some(map) = inner.map.as_mut() {
            if let Err(e) = map.set_center(position) {
                log::warn!("⚠️ [MAP] No se pudo centrar: {}", e);
            }

            match inner.position_marker {
                Some(id) => {
                    if let Err(e) = map.move_marker(id, position) {
                        log::warn!("⚠️ [MAP] No se pudo mover el marcador: {}", e);
                    }
                }
                None => match map.add_marker(MarkerSpec::user(position)) {
                    Ok(id) => inner.position_marker = Some(id),
                    Err(e) => log::warn!("⚠️ [MAP] No se pudo colocar el marcador: {}", e),
                },
            }
        }

        inner.fix = Some(fix);
        inner.last_error = None;
        if inner.phase == MapPhase::Initialized {
            inner.phase = MapPhase::Located;
        }

        // Los POIs se generan con la primera posición; el seguimiento no los regenera
        if !inner.nearby_generated {
            if let Some(service) = inner.service {
                Self::place_nearby(inner, position, service);
            }
        }
    }

    /// Reemplazar todos los marcadores de POI por una generación nueva
    fn place_nearby(inner: &mut Inner, origin: Position, service: ServiceCategory) -> usize {
        let points = inner.nearby.nearby(origin, service);
        inner.nearby_generated = true;

        let old_markers: Vec<MarkerId> = inner.poi_markers.drain(..).collect();
        if let Some(map) = inner.map.as_mut() {
            for id in old_markers {
                if let Err(e) = map.remove_marker(id) {
                    log::warn!("⚠️ [MAP] Error removiendo {}: {}", id, e);
                }
            }
            for poi in &points {
                match map.add_marker(MarkerSpec::point_of_interest(poi, service.marker_color())) {
                    Ok(id) => inner.poi_markers.push(id),
                    Err(e) => log::warn!("⚠️ [MAP] No se pudo colocar '{}': {}", poi.name, e),
                }
            }
        }

        let count = points.len();
        inner.points_of_interest = points;
        count
    }

    fn resting_phase(inner: &Inner) -> MapPhase {
        if inner.fix.is_some() {
            MapPhase::Located
        } else {
            MapPhase::Initialized
        }
    }

    fn publish(&self) {
        let snapshot = {
            let inner = self.shared.inner.borrow();
            MapStatus {
                phase: inner.phase,
                service: inner.service,
                position: inner.fix.map(|f| f.position),
                accuracy_m: inner.fix.and_then(|f| f.accuracy_m),
                points_of_interest: inner.points_of_interest.clone(),
                error: inner.last_error.clone(),
            }
        };
        self.shared.status.set(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::config::MapConfig;
    use crate::services::{MockNearbyGenerator, PositionCallback, WatchCallback, WatchId};

    const DELHI: Position = Position { longitude: 77.2090, latitude: 28.6139 };

    // ---------------------------------------------------------------- fakes

    #[derive(Default)]
    struct FakeMapState {
        center: Option<Position>,
        markers: BTreeMap<MarkerId, MarkerSpec>,
        controls: Vec<MapControl>,
        next_id: u32,
        released: bool,
    }

    struct FakeMap(Rc<RefCell<FakeMapState>>);

    impl MapSurface for FakeMap {
        fn set_center(&mut self, center: Position) -> Result<(), MapError> {
            let mut s = self.0.borrow_mut();
            if s.released {
                return Err(MapError::Released);
            }
            s.center = Some(center);
            Ok(())
        }

        fn center(&self) -> Position {
            self.0.borrow().center.unwrap()
        }

        fn add_control(&mut self, control: MapControl) -> Result<(), MapError> {
            self.0.borrow_mut().controls.push(control);
            Ok(())
        }

        fn add_marker(&mut self, marker: MarkerSpec) -> Result<MarkerId, MapError> {
            let mut s = self.0.borrow_mut();
            if s.released {
                return Err(MapError::Released);
            }
            s.next_id += 1;
            let id = MarkerId(s.next_id);
            s.markers.insert(id, marker);
            Ok(id)
        }

        fn move_marker(&mut self, id: MarkerId, position: Position) -> Result<(), MapError> {
            let mut s = self.0.borrow_mut();
            let marker = s.markers.get_mut(&id).ok_or(MapError::UnknownMarker(id))?;
            marker.position = position;
            Ok(())
        }

        fn remove_marker(&mut self, id: MarkerId) -> Result<(), MapError> {
            self.0.borrow_mut().markers.remove(&id).map(|_| ()).ok_or(MapError::UnknownMarker(id))
        }

        fn release(&mut self) {
            let mut s = self.0.borrow_mut();
            s.markers.clear();
            s.released = true;
        }
    }

    #[derive(Default)]
    struct FakeProvider {
        pending: RefCell<Vec<PositionCallback>>,
        watches: RefCell<HashMap<i32, WatchCallback>>,
        next_watch: RefCell<i32>,
        cleared: RefCell<Vec<WatchId>>,
        options_seen: RefCell<Vec<PositionOptions>>,
        fail_watch: RefCell<Option<LocationError>>,
    }

    impl FakeProvider {
        /// Resolver la petición única más antigua
        fn resolve_current(&self, result: LocationResult) {
            let callback = self.pending.borrow_mut().remove(0);
            callback(result);
        }

        /// Emitir una lectura a todos los watches activos
        fn emit(&self, result: LocationResult) {
            let ids: Vec<i32> = self.watches.borrow().keys().copied().collect();
            for id in ids {
                let callback = self.watches.borrow_mut().remove(&id);
                if let Some(mut callback) = callback {
                    callback(result.clone());
                    self.watches.borrow_mut().insert(id, callback);
                }
            }
        }

        fn active_watches(&self) -> usize {
            self.watches.borrow().len()
        }
    }

    impl LocationProvider for FakeProvider {
        fn current_position(&self, options: PositionOptions, callback: PositionCallback) {
            self.options_seen.borrow_mut().push(options);
            self.pending.borrow_mut().push(callback);
        }

        fn watch_position(&self, options: PositionOptions, callback: WatchCallback) -> Result<WatchId, LocationError> {
            if let Some(e) = self.fail_watch.borrow().clone() {
                return Err(e);
            }
            self.options_seen.borrow_mut().push(options);
            let mut next = self.next_watch.borrow_mut();
            *next += 1;
            self.watches.borrow_mut().insert(*next, callback);
            Ok(WatchId(*next))
        }

        fn clear_watch(&self, id: WatchId) {
            self.watches.borrow_mut().remove(&id.0);
            self.cleared.borrow_mut().push(id);
        }
    }

    struct Harness {
        vm: LiveMapViewModel,
        map: Rc<RefCell<FakeMapState>>,
        provider: Rc<FakeProvider>,
    }

    impl Harness {
        fn new(service: Option<ServiceCategory>) -> Self {
            let provider = Rc::new(FakeProvider::default());
            let nearby = MockNearbyGenerator::with_rng(StdRng::seed_from_u64(11), 0.01);
            let vm = LiveMapViewModel::new(service, provider.clone(), Box::new(nearby), LocationConfig::default());
            let map = Rc::new(RefCell::new(FakeMapState::default()));
            let map_for_factory = map.clone();
            vm.mount(move || {
                map_for_factory.borrow_mut().center = Some(MapConfig::default().default_center());
                Ok(Box::new(FakeMap(map_for_factory)) as Box<dyn MapSurface>)
            })
            .unwrap();
            Self { vm, map, provider }
        }

        fn poi_markers(&self) -> Vec<MarkerSpec> {
            self.map.borrow().markers.values().filter(|m| m.popup.is_some()).cloned().collect()
        }

        fn user_markers(&self) -> Vec<MarkerSpec> {
            self.map.borrow().markers.values().filter(|m| m.popup.is_none()).cloned().collect()
        }
    }

    fn fix(lng: f64, lat: f64) -> LocationResult {
        Ok(PositionFix::with_accuracy(Position::new(lng, lat), 12.0))
    }

    // ---------------------------------------------------------------- tests

    #[test]
    fn test_mount_creates_map_at_default_center_and_requests_position() {
        let h = Harness::new(None);
        assert_eq!(h.vm.phase(), MapPhase::Initialized);
        assert_eq!(h.vm.center(), Some(DELHI));
        assert_eq!(h.map.borrow().controls.len(), 2);
        assert_eq!(h.provider.pending.borrow().len(), 1);
        let options = h.provider.options_seen.borrow()[0];
        assert!(options.enable_high_accuracy);
    }

    #[test]
    fn test_mount_twice_is_ignored() {
        let h = Harness::new(None);
        h.vm.mount(|| Err(MapError::Backend("should not be called".into()))).unwrap();
        assert_eq!(h.provider.pending.borrow().len(), 1);
    }

    #[test]
    fn test_successful_fix_locates_and_centers() {
        let h = Harness::new(None);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        assert_eq!(h.vm.phase(), MapPhase::Located);
        assert_eq!(h.vm.center(), Some(DELHI));
        assert_eq!(h.user_markers().len(), 1);
        let status = h.vm.status();
        assert_eq!(status.position, Some(DELHI));
        assert_eq!(status.accuracy_m, Some(12.0));
    }

    #[test]
    fn test_failed_fix_keeps_default_center() {
        let h = Harness::new(Some(ServiceCategory::Police));
        h.provider.resolve_current(Err(LocationError::PermissionDenied));
        assert_eq!(h.vm.phase(), MapPhase::Initialized);
        assert_eq!(h.vm.center(), Some(DELHI));
        assert_eq!(h.map.borrow().markers.len(), 0);
        assert_eq!(h.vm.status().error, Some(LocationError::PermissionDenied));
        // sin reintento automático
        assert!(h.provider.pending.borrow().is_empty());
    }

    #[test]
    fn test_retry_after_failure() {
        let h = Harness::new(None);
        h.provider.resolve_current(Err(LocationError::Timeout));
        h.vm.retry_location();
        assert_eq!(h.vm.status().error, None);
        assert_eq!(h.provider.pending.borrow().len(), 1);
        h.provider.resolve_current(fix(72.8777, 19.0760));
        assert_eq!(h.vm.phase(), MapPhase::Located);
        assert_eq!(h.vm.center(), Some(Position::new(72.8777, 19.0760)));
    }

    #[test]
    fn test_hospital_service_places_hospital_markers() {
        let h = Harness::new(Some(ServiceCategory::Hospital));
        h.provider.resolve_current(fix(77.2090, 28.6139));
        let pois = h.poi_markers();
        assert_eq!(pois.len(), 4);
        for marker in &pois {
            assert_eq!(marker.color, ServiceCategory::Hospital.marker_color());
            let title = &marker.popup.as_ref().unwrap().title;
            assert!(ServiceCategory::Hospital.facility_names().contains(&title.as_str()));
        }
        let status = h.vm.status();
        assert_eq!(status.found(), 4);
        assert_eq!(status.title(), "Nearest Hospitals");
        assert_eq!(status.nearest_km(), Some(status.points_of_interest[0].distance_km));
    }

    #[test]
    fn test_no_service_means_no_poi_markers() {
        let h = Harness::new(None);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        assert!(h.poi_markers().is_empty());
        assert_eq!(h.vm.status().found(), 0);
        assert_eq!(h.vm.status().title(), "Live Navigation");
    }

    #[test]
    fn test_tracking_last_write_wins() {
        let h = Harness::new(None);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        h.vm.start_tracking().unwrap();
        assert_eq!(h.vm.phase(), MapPhase::Tracking);

        let watch_options = *h.provider.options_seen.borrow().last().unwrap();
        assert_eq!(watch_options.timeout_ms, Some(5000));
        assert_eq!(watch_options.maximum_age_ms, 0);

        h.provider.emit(fix(77.2100, 28.6200));
        h.provider.emit(fix(77.2300, 28.6400));
        assert_eq!(h.vm.center(), Some(Position::new(77.2300, 28.6400)));

        // un solo marcador de usuario, movido a la última lectura
        let users = h.user_markers();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].position, Position::new(77.2300, 28.6400));
    }

    #[test]
    fn test_tracking_does_not_regenerate_pois() {
        let h = Harness::new(Some(ServiceCategory::Fire));
        h.provider.resolve_current(fix(77.2090, 28.6139));
        let before = h.vm.status().points_of_interest;
        h.vm.start_tracking().unwrap();
        h.provider.emit(fix(77.3000, 28.7000));
        assert_eq!(h.vm.status().points_of_interest, before);
        assert_eq!(h.poi_markers().len(), 4);
    }

    #[test]
    fn test_tracking_from_no_position_places_marker_and_pois() {
        let h = Harness::new(Some(ServiceCategory::Police));
        h.provider.resolve_current(Err(LocationError::PositionUnavailable));
        h.vm.start_tracking().unwrap();
        h.provider.emit(fix(77.2090, 28.6139));
        assert_eq!(h.vm.phase(), MapPhase::Tracking);
        assert_eq!(h.user_markers().len(), 1);
        assert_eq!(h.poi_markers().len(), 4);
    }

    #[test]
    fn test_start_tracking_twice_replaces_subscription() {
        let h = Harness::new(None);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        h.vm.start_tracking().unwrap();
        h.vm.start_tracking().unwrap();
        assert_eq!(h.provider.active_watches(), 1);
        assert_eq!(h.provider.cleared.borrow().len(), 1);
    }

    #[test]
    fn test_stop_tracking_releases_watch() {
        let h = Harness::new(None);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        h.vm.start_tracking().unwrap();
        h.vm.stop_tracking();
        assert_eq!(h.vm.phase(), MapPhase::Located);
        assert_eq!(h.provider.active_watches(), 0);

        h.vm.toggle_tracking().unwrap();
        assert_eq!(h.vm.phase(), MapPhase::Tracking);
        h.vm.toggle_tracking().unwrap();
        assert_eq!(h.vm.phase(), MapPhase::Located);
    }

    #[test]
    fn test_watch_failure_is_reported() {
        let h = Harness::new(None);
        *h.provider.fail_watch.borrow_mut() = Some(LocationError::Unsupported);
        assert_eq!(h.vm.start_tracking(), Err(LocationError::Unsupported));
        assert_eq!(h.vm.phase(), MapPhase::Initialized);
        assert_eq!(h.vm.status().error, Some(LocationError::Unsupported));
    }

    #[test]
    fn test_tracking_error_keeps_tracking() {
        let h = Harness::new(None);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        h.vm.start_tracking().unwrap();
        h.provider.emit(Err(LocationError::Timeout));
        assert_eq!(h.vm.phase(), MapPhase::Tracking);
        assert_eq!(h.vm.status().error, Some(LocationError::Timeout));
        h.provider.emit(fix(77.2100, 28.6150));
        assert_eq!(h.vm.status().error, None);
    }

    #[test]
    fn test_refresh_nearby_replaces_full_set() {
        let h = Harness::new(Some(ServiceCategory::Hospital));
        h.provider.resolve_current(fix(77.2090, 28.6139));
        let first: Vec<MarkerId> = h.map.borrow().markers.keys().copied().collect();
        assert_eq!(h.vm.refresh_nearby(), 4);
        assert_eq!(h.poi_markers().len(), 4);
        assert_eq!(h.user_markers().len(), 1);
        // los ids de POI anteriores ya no existen
        let now: Vec<MarkerId> = h.map.borrow().markers.keys().copied().collect();
        let surviving = first.iter().filter(|id| now.contains(id)).count();
        assert_eq!(surviving, 1);
    }

    #[test]
    fn test_refresh_nearby_without_service_or_position() {
        let h = Harness::new(None);
        assert_eq!(h.vm.refresh_nearby(), 0);
        h.provider.resolve_current(fix(77.2090, 28.6139));
        assert_eq!(h.vm.refresh_nearby(), 0);
    }

    #[test]
    fn test_teardown_releases_everything_and_ignores_late_callbacks() {
        let h = Harness::new(Some(ServiceCategory::Police));
        h.provider.resolve_current(fix(77.2090, 28.6139));
        h.vm.start_tracking().unwrap();
        h.vm.retry_location();

        h.vm.teardown();
        assert_eq!(h.vm.phase(), MapPhase::TornDown);
        assert_eq!(h.provider.active_watches(), 0);
        assert!(h.map.borrow().released);
        assert!(h.map.borrow().markers.is_empty());
        assert_eq!(h.vm.center(), None);

        // lectura tardía de la petición pendiente
        h.provider.resolve_current(fix(0.0, 0.0));
        assert_eq!(h.vm.phase(), MapPhase::TornDown);

        // segunda llamada no hace nada
        h.vm.teardown();
        assert_eq!(h.provider.cleared.borrow().len(), 1);
        assert!(h.vm.start_tracking().is_ok());
        assert_eq!(h.provider.active_watches(), 0);
    }

    #[test]
    fn test_dropping_viewmodel_releases_watch() {
        let provider = Rc::new(FakeProvider::default());
        {
            let nearby = MockNearbyGenerator::with_rng(StdRng::seed_from_u64(1), 0.01);
            let vm = LiveMapViewModel::new(None, provider.clone(), Box::new(nearby), LocationConfig::default());
            let map = Rc::new(RefCell::new(FakeMapState::default()));
            vm.mount(move || {
                map.borrow_mut().center = Some(DELHI);
                Ok(Box::new(FakeMap(map)) as Box<dyn MapSurface>)
            })
            .unwrap();
            vm.start_tracking().unwrap();
            assert_eq!(provider.active_watches(), 1);
        }
        assert_eq!(provider.active_watches(), 0);
    }

    #[test]
    fn test_overlay_rows_for_service() {
        let h = Harness::new(Some(ServiceCategory::Police));
        let rows = h.vm.status().overlay_rows();
        assert_eq!(rows[0], ("Found:", "0 locations".to_string()));
        assert_eq!(rows[1], ("Nearest:", "-".to_string()));
        assert_eq!(rows[2], ("Status:", "Locating…".to_string()));

        h.provider.resolve_current(fix(77.2090, 28.6139));
        let status = h.vm.status();
        let rows = status.overlay_rows();
        assert_eq!(rows[0].1, "4 locations");
        assert_eq!(rows[1].1, format!("{:.1}km", status.points_of_interest[0].distance_km));
        assert_eq!(rows[2].1, "Active");
    }

    #[test]
    fn test_overlay_rows_without_service() {
        let h = Harness::new(None);
        h.provider.resolve_current(Err(LocationError::PermissionDenied));
        assert_eq!(h.vm.status().overlay_rows()[2].1, "Location unavailable");

        h.vm.retry_location();
        h.provider.resolve_current(fix(77.2090, 28.6139));
        let rows = h.vm.status().overlay_rows();
        assert_eq!(rows[0].1, "28.6139, 77.2090");
        assert_eq!(rows[1].1, "±12m");
        assert_eq!(rows[2].1, "Active");
    }

    #[test]
    fn test_subscribers_see_phase_changes() {
        let h = Harness::new(None);
        let phases = Rc::new(RefCell::new(Vec::new()));
        let phases_clone = phases.clone();
        h.vm.subscribe(move |status| phases_clone.borrow_mut().push(status.phase));
        h.provider.resolve_current(fix(77.2090, 28.6139));
        h.vm.start_tracking().unwrap();
        h.vm.teardown();
        assert_eq!(
            *phases.borrow(),
            vec![MapPhase::Located, MapPhase::Tracking, MapPhase::TornDown]
        );
    }
}
