use super::service::ServiceCategory;

pub const HOME_PATH: &str = "/";
pub const HELP_LINES_PATH: &str = "/help-lines";
pub const NAVIGATION_PATH: &str = "/navigation";

/// Pantallas de la aplicación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    HelpLines,
    Navigation { service: Option<ServiceCategory> },
}

impl Route {
    /// Parsear a partir de `location.pathname` y `location.search`
    /// Rutas desconocidas -> Home
    pub fn parse(path: &str, query: &str) -> Route {
        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Home,
            HELP_LINES_PATH => Route::HelpLines,
            NAVIGATION_PATH => {
                let service = query_param(query, "service");
                Route::Navigation {
                    service: ServiceCategory::from_query(service.as_deref()),
                }
            }
            other => {
                log::warn!("⚠️ [ROUTE] Ruta desconocida '{}', redirigiendo a Home", other);
                Route::Home
            }
        }
    }

    /// Path + query para `history.pushState`
    pub fn to_url(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::HelpLines => HELP_LINES_PATH.to_string(),
            Route::Navigation { service: None } => NAVIGATION_PATH.to_string(),
            Route::Navigation { service: Some(category) } => {
                format!("{}?service={}", NAVIGATION_PATH, category.tag())
            }
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self, Route::Navigation { .. })
    }
}

/// Valor decodificado de un parámetro de query (primera aparición)
fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
