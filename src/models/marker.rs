use super::poi::PointOfInterest;
use super::position::Position;
use crate::utils::escape_html;

/// Color del marcador de la posición del usuario
pub const USER_MARKER_COLOR: &str = "#00BFA6";

/// Handle opaco de un marcador en el mapa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// Contenido de un popup: título + líneas de texto plano
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl PopupContent {
    /// Markup simple con todo el texto escapado
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div class=\"poi-popup\"><h3 class=\"poi-popup__title\">{}</h3>",
            escape_html(&self.title)
        );
        for line in &self.lines {
            html.push_str(&format!("<p class=\"poi-popup__line\">{}</p>", escape_html(line)));
        }
        html.push_str("</div>");
        html
    }
}

/// Descripción de un marcador a colocar
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Position,
    pub color: String,
    pub popup: Option<PopupContent>,
}

impl MarkerSpec {
    pub fn user(position: Position) -> Self {
        Self {
            position,
            color: USER_MARKER_COLOR.to_string(),
            popup: None,
        }
    }

    pub fn point_of_interest(poi: &PointOfInterest, color: &str) -> Self {
        Self {
            position: poi.position(),
            color: color.to_string(),
            popup: Some(PopupContent {
                title: poi.name.clone(),
                lines: vec![
                    poi.address.clone(),
                    format!("Distance: {}", poi.distance_label()),
                ],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_marker_popup() {
        let poi = PointOfInterest {
            name: "Apollo Clinic".to_string(),
            address: "Apollo Clinic Address, Sector 3".to_string(),
            latitude: 28.61,
            longitude: 77.21,
            distance_km: 0.4,
        };
        let spec = MarkerSpec::point_of_interest(&poi, "#EF4444");
        assert_eq!(spec.position, Position::new(77.21, 28.61));
        let html = spec.popup.unwrap().to_html();
        assert!(html.contains("Apollo Clinic Address, Sector 3"));
        assert!(html.contains("Distance: 0.4km"));
    }

    #[test]
    fn test_popup_escapes_markup() {
        let popup = PopupContent {
            title: "<script>".to_string(),
            lines: vec!["a & b".to_string()],
        };
        let html = popup.to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_user_marker_has_no_popup() {
        let spec = MarkerSpec::user(Position::new(77.2090, 28.6139));
        assert_eq!(spec.color, USER_MARKER_COLOR);
        assert!(spec.popup.is_none());
    }
}
