use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::flash::FlashMessage;

/// A named template plus the data it is rendered with.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub template: String,
    pub flash: Vec<FlashMessage>,
    pub context: Map<String, Value>,
}

impl View {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            flash: Vec::new(),
            context: Map::new(),
        }
    }

    /// Adds `value` to the template context under `key`.
    pub fn with<T: Serialize + ?Sized>(
        mut self,
        key: &str,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        self.context
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn with_flash(mut self, flash: Vec<FlashMessage>) -> Self {
        self.flash = flash;
        self
    }
}

/// Turns a [`View`] into a response. Injected into handler state so a template
/// engine can be swapped in without touching the handlers.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View) -> Response;
}

/// Renders the view document itself as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view: View) -> Response {
        Json(json!({
            "template": view.template,
            "flash": view.flash,
            "context": view.context,
        }))
        .into_response()
    }
}
