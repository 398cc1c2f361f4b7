use axum::Json;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::Value;

/// What a view asks the web layer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminResponse {
    /// `303 See Other` to the given location.
    Redirect(String),
    /// Render `template` with `context`.
    Render { template: String, context: Value },
}

impl AdminResponse {
    #[must_use]
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect(to.into())
    }

    #[must_use]
    pub fn render(template: impl Into<String>, context: Value) -> Self {
        Self::Render { template: template.into(), context }
    }

    /// Redirect target, if this is a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect(to) => Some(to),
            Self::Render { .. } => None,
        }
    }
}

/// Templates are rendered client-side, so a render becomes its JSON context.
impl IntoResponse for AdminResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(to) => Redirect::to(&to).into_response(),
            Self::Render { template, context } => {
                Json(serde_json::json!({"template": template, "context": context}))
                    .into_response()
            },
        }
    }
}
