// ============================================================================
// CONTENIDO ESTÁTICO - Landing, diálogo de emergencia y directorio de ayuda
// ============================================================================

use super::service::ServiceCategory;

pub const BRAND: &str = "TravelPulse";

pub struct FeatureCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub metrics: &'static str,
    /// La tarjeta abre la vista de mapa
    pub opens_map: bool,
}

pub struct SafetyMetric {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: &'static str,
}

pub struct EmergencyOption {
    pub service: ServiceCategory,
    pub title: &'static str,
    pub description: &'static str,
}

pub struct HelpLineContact {
    pub name: &'static str,
    pub number: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

pub struct HelpLineCategory {
    pub category: &'static str,
    pub icon: &'static str,
    pub contacts: &'static [HelpLineContact],
}

pub struct FrroOffice {
    pub city: &'static str,
    pub phone: &'static str,
    pub timing: Option<&'static str>,
    pub email: &'static str,
}

pub const CORE_FEATURES: &[FeatureCard] = &[
    FeatureCard {
        icon: "📍",
        title: "Live Location Fusion",
        description: "Ultra-precise real-time tracking with GPS, cellular, and WiFi triangulation for accurate positioning even in challenging environments.",
        metrics: "±3m accuracy",
        opens_map: true,
    },
    FeatureCard {
        icon: "🧭",
        title: "Dynamic Geofencing",
        description: "Intelligent virtual boundaries that adapt to real-time risk assessments, providing instant alerts for high-risk or restricted areas.",
        metrics: "Real-time alerts",
        opens_map: false,
    },
    FeatureCard {
        icon: "🚨",
        title: "Multi-Agency Dispatch",
        description: "Seamless coordination with police, ambulance, and disaster departments using intelligent triage to minimize emergency response times.",
        metrics: "<60s response",
        opens_map: false,
    },
];

pub const SAFETY_METRICS: &[SafetyMetric] = &[
    SafetyMetric { icon: "🛡️", label: "Tourist Safety Score", value: "98.7%" },
    SafetyMetric { icon: "⏱️", label: "Emergency Response", value: "<60s" },
    SafetyMetric { icon: "📍", label: "Location Accuracy", value: "±3m" },
    SafetyMetric { icon: "👥", label: "Multi-Agency", value: "24/7" },
];

pub const EMERGENCY_OPTIONS: &[EmergencyOption] = &[
    EmergencyOption {
        service: ServiceCategory::Police,
        title: "Nearest Police Station",
        description: "Find closest police stations in your area",
    },
    EmergencyOption {
        service: ServiceCategory::Hospital,
        title: "Nearest Hospital",
        description: "Locate nearby hospitals and medical centers",
    },
    EmergencyOption {
        service: ServiceCategory::Fire,
        title: "Nearest Fire Department",
        description: "Find fire stations and emergency services",
    },
];

pub const HELP_LINES: &[HelpLineCategory] = &[
    HelpLineCategory {
        category: "Emergency Response",
        icon: "⚠️",
        contacts: &[
            HelpLineContact {
                name: "Emergency Response Support System (ERSS)",
                number: "112",
                description: "Single, pan-India emergency number for all services including police, fire, and ambulance",
                features: &["Phone call", "SMS", "Email", "112 India mobile app with SHOUT feature"],
            },
            HelpLineContact {
                name: "Police",
                number: "100 or 112",
                description: "Direct police assistance and law enforcement support",
                features: &[],
            },
            HelpLineContact {
                name: "Fire Service",
                number: "101",
                description: "Fire emergency response and rescue operations",
                features: &[],
            },
            HelpLineContact {
                name: "Ambulance",
                number: "102",
                description: "Medical emergency response and ambulance services",
                features: &[],
            },
        ],
    },
    HelpLineCategory {
        category: "Tourist & Travel",
        icon: "📍",
        contacts: &[
            HelpLineContact {
                name: "24x7 Tourist Helpline",
                number: "1800-11-1363 or 1363",
                description: "Toll-free helpline supported in multiple languages including English, Hindi, Arabic, French, German, Japanese",
                features: &["Multi-language support", "24/7 availability", "Tourist assistance"],
            },
            HelpLineContact {
                name: "Road Accident Emergency (National Highways)",
                number: "1033",
                description: "Emergency assistance for road accidents on national highways",
                features: &[],
            },
        ],
    },
    HelpLineCategory {
        category: "Specialized Services",
        icon: "❤️",
        contacts: &[
            HelpLineContact {
                name: "Women's Helpline",
                number: "1091",
                description: "Support for women in distress and emergency situations",
                features: &[],
            },
            HelpLineContact {
                name: "Domestic Abuse Helpline",
                number: "181",
                description: "24/7 support for domestic violence victims",
                features: &[],
            },
            HelpLineContact {
                name: "Children in Difficult Situations",
                number: "1098",
                description: "Child protection and emergency assistance",
                features: &[],
            },
            HelpLineContact {
                name: "Senior Citizen Helpline",
                number: "1091 or 1291",
                description: "Support services for senior citizens",
                features: &[],
            },
            HelpLineContact {
                name: "Disaster Management",
                number: "1078",
                description: "Natural disaster response and coordination",
                features: &[],
            },
            HelpLineContact {
                name: "Cyber Crime Helpline",
                number: "1930",
                description: "Report cyber crimes and online fraud",
                features: &[],
            },
            HelpLineContact {
                name: "Railway Enquiry",
                number: "139",
                description: "Train schedules, booking, and railway information",
                features: &[],
            },
        ],
    },
];

pub const FRRO_OFFICES: &[FrroOffice] = &[
    FrroOffice {
        city: "Delhi",
        phone: "011-26711443 or 011-26713851",
        timing: Some("9 AM to 9 PM"),
        email: "frrodli@nic.in",
    },
    FrroOffice {
        city: "Mumbai",
        phone: "022-22620446",
        timing: None,
        email: "helpdesk.mum-ivfrt@gov.in",
    },
];

pub struct Helpdesk {
    pub title: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub paid: bool,
}

pub const EVISA_HELPDESK: Helpdesk = Helpdesk {
    title: "eVisa Helpdesk",
    phone: "+91-40-6717-4100",
    email: "indian-evisa@gov.in",
    paid: true,
};

/// Primer número marcable de un texto tipo "100 or 112"
pub fn dialable_number(number: &str) -> &str {
    number.split(" or ").next().unwrap_or(number).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialable_number() {
        assert_eq!(dialable_number("100 or 112"), "100");
        assert_eq!(dialable_number("112"), "112");
        assert_eq!(dialable_number("1800-11-1363 or 1363"), "1800-11-1363");
    }

    #[test]
    fn test_emergency_options_cover_every_category() {
        for category in ServiceCategory::ALL {
            assert!(EMERGENCY_OPTIONS.iter().any(|o| o.service == category));
        }
    }

    #[test]
    fn test_only_location_card_opens_map() {
        let opening: Vec<_> = CORE_FEATURES.iter().filter(|f| f.opens_map).collect();
        assert_eq!(opening.len(), 1);
        assert_eq!(opening[0].title, "Live Location Fusion");
    }
}
