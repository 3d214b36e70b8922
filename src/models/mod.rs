pub mod position;
pub mod service;
pub mod poi;
pub mod marker;
pub mod route;
pub mod content;

pub use position::{Position, PositionFix};
pub use service::ServiceCategory;
pub use poi::PointOfInterest;
pub use marker::{MarkerId, MarkerSpec, PopupContent, USER_MARKER_COLOR};
pub use route::Route;
