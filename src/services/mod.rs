pub mod location_service;
pub mod geolocation;
pub mod nearby_service;

pub use location_service::*;
pub use geolocation::BrowserGeolocation;
pub use nearby_service::{MockNearbyGenerator, NearbyServiceSource};
