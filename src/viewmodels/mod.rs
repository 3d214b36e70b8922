pub mod live_map_viewmodel;

pub use live_map_viewmodel::{LiveMapViewModel, MapPhase, MapStatus};
