// Utils compartidos

pub mod constants;
pub mod html;
pub mod maplibre_ffi;

pub use constants::*;
pub use html::escape_html;
