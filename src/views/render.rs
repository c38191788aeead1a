//! Rendering seam
//!
//! Page controllers never format HTML themselves: they hand a view name and
//! a JSON context to a [`Render`] implementation.

use crate::domain::{PolyclinicError, Result};
use serde_json::{json, Value};

/// Turns a view name and a context object into response text
pub trait Render: Send + Sync {
    /// # Errors
    ///
    /// Returns `PolyclinicError::Render` if the view cannot be produced.
    fn render(&self, view: &str, context: &Value) -> Result<String>;
}

/// Renders `{"view": <name>, "context": <context>}` as compact JSON
///
/// The default renderer. The context must be a JSON object.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Render for JsonRenderer {
    fn render(&self, view: &str, context: &Value) -> Result<String> {
        if !context.is_object() {
            return Err(PolyclinicError::Render(format!(
                "context for '{view}' must be an object"
            )));
        }
        Ok(serde_json::to_string(&json!({ "view": view, "context": context }))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_renderer_wraps_context() {
        let body = JsonRenderer
            .render("about.html", &json!({ "title": "About" }))
            .unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["view"], "about.html");
        assert_eq!(parsed["context"]["title"], "About");
    }

    #[test]
    fn test_json_renderer_rejects_non_object() {
        let err = JsonRenderer.render("index.html", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, PolyclinicError::Render(_)));
    }
}
