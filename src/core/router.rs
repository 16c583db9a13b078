use super::constants::{FIELD_NAME, FIELD_SLUG};

/// Navigation capability
pub trait Router {
    fn push_route(&self, path: &str);
}

/// Navigates the browser window; collective pages live outside this app.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRouter;

impl Router for BrowserRouter {
    fn push_route(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No browser window, cannot open {}", path);
            return;
        };

        if let Err(e) = window.location().assign(path) {
            log::error!("Failed to navigate to {}: {:?}", path, e);
        }
    }
}

/// Entry parameters of the pledge page (`?name=...&slug=...`)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageParams {
    /// Display name of the cause, empty when not given
    pub name: String,
    /// Existing collective to pledge to
    pub slug: Option<String>,
}

impl PageParams {
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                FIELD_NAME => params.name = value.into_owned(),
                FIELD_SLUG => {
                    params.slug = Some(value.into_owned()).filter(|slug| !slug.is_empty());
                }
                _ => {}
            }
        }

        params
    }

    /// Read the parameters of the current page
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|win| win.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }
}
