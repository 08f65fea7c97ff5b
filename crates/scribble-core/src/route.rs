//! Application routes.

use std::fmt;

/// Where the application is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// The list of the user's drawings.
    #[default]
    Dashboard,
    /// An editor for a drawing that has not been saved yet.
    NewDrawing,
    /// An editor for an existing drawing.
    EditDrawing(String),
}

impl Route {
    /// Parse a path such as `/draw/<id>`.
    ///
    /// Accepts an optional leading `#` so URL fragments can be passed as-is.
    /// Unknown paths fall back to the dashboard.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        match (segments.next(), segments.next(), segments.next()) {
            (Some("draw"), None, None) => Route::NewDrawing,
            (Some("draw"), Some(id), None) => Route::EditDrawing(id.to_string()),
            _ => Route::Dashboard,
        }
    }

    /// The drawing identifier, in edit mode.
    pub fn drawing_id(&self) -> Option<&str> {
        match self {
            Route::EditDrawing(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_editor(&self) -> bool {
        !matches!(self, Route::Dashboard)
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::NewDrawing => "/draw".to_string(),
            Route::EditDrawing(id) => format!("/draw/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
