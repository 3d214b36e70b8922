use serde::{Deserialize, Serialize};

/// Categoría de servicio de emergencia seleccionada vía `?service=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Police,
    Hospital,
    Fire,
}

const POLICE_NAMES: [&str; 4] = [
    "Central Police Station",
    "Traffic Police Post",
    "Cyber Crime Unit",
    "District HQ",
];

const HOSPITAL_NAMES: [&str; 4] = [
    "City General Hospital",
    "Emergency Medical Center",
    "Apollo Clinic",
    "Max Healthcare",
];

const FIRE_NAMES: [&str; 4] = [
    "Fire Station No. 1",
    "Emergency Response Unit",
    "Rescue Services",
    "Fire Department HQ",
];

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [
        ServiceCategory::Police,
        ServiceCategory::Hospital,
        ServiceCategory::Fire,
    ];

    /// Parámetro de navegación opcional. Ausente o vacío = sin categoría.
    pub fn from_query(value: Option<&str>) -> Option<ServiceCategory> {
        match value.map(str::trim) {
            None | Some("") => None,
            Some(tag) => Some(Self::from_tag(tag)),
        }
    }

    /// Tag desconocido -> policía
    pub fn from_tag(tag: &str) -> ServiceCategory {
        match tag.to_ascii_lowercase().as_str() {
            "police" => ServiceCategory::Police,
            "hospital" => ServiceCategory::Hospital,
            "fire" => ServiceCategory::Fire,
            other => {
                log::warn!("⚠️ [SERVICE] Categoría desconocida '{}', usando police", other);
                ServiceCategory::Police
            }
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ServiceCategory::Police => "police",
            ServiceCategory::Hospital => "hospital",
            ServiceCategory::Fire => "fire",
        }
    }

    /// Título del header y del overlay
    pub fn title(&self) -> &'static str {
        match self {
            ServiceCategory::Police => "Nearest Police Stations",
            ServiceCategory::Hospital => "Nearest Hospitals",
            ServiceCategory::Fire => "Nearest Fire Stations",
        }
    }

    pub fn marker_color(&self) -> &'static str {
        match self {
            ServiceCategory::Police => "#3B82F6",
            ServiceCategory::Hospital => "#EF4444",
            ServiceCategory::Fire => "#F97316",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ServiceCategory::Police => "🛡️",
            ServiceCategory::Hospital => "🏥",
            ServiceCategory::Fire => "🔥",
        }
    }

    /// Tabla estática de nombres por categoría
    pub fn facility_names(&self) -> &'static [&'static str] {
        match self {
            ServiceCategory::Police => &POLICE_NAMES,
            ServiceCategory::Hospital => &HOSPITAL_NAMES,
            ServiceCategory::Fire => &FIRE_NAMES,
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_absent_or_empty() {
        assert_eq!(ServiceCategory::from_query(None), None);
        assert_eq!(ServiceCategory::from_query(Some("")), None);
        assert_eq!(ServiceCategory::from_query(Some("  ")), None);
    }

    #[test]
    fn test_from_query_known_tags() {
        assert_eq!(ServiceCategory::from_query(Some("hospital")), Some(ServiceCategory::Hospital));
        assert_eq!(ServiceCategory::from_query(Some("FIRE")), Some(ServiceCategory::Fire));
        assert_eq!(ServiceCategory::from_query(Some("police")), Some(ServiceCategory::Police));
    }

    #[test]
    fn test_unknown_tag_falls_back_to_police() {
        assert_eq!(ServiceCategory::from_tag("ambulance"), ServiceCategory::Police);
        assert_eq!(
            ServiceCategory::from_tag("ambulance").facility_names(),
            ServiceCategory::Police.facility_names()
        );
    }

    #[test]
    fn test_every_category_has_four_names() {
        for category in ServiceCategory::ALL {
            assert_eq!(category.facility_names().len(), 4);
        }
    }
}
