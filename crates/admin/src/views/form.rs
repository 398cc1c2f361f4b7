use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{after_submit, AdminForm, TargetedView};
use crate::error::DispatchError;
use crate::request::{AdminRequest, FormData};
use crate::response::AdminResponse;

/// A targeted view that shows a form and handles its submission.
#[async_trait]
pub trait FormView: TargetedView {
    type Form: AdminForm;

    fn template(&self) -> &str {
        "form.html"
    }

    /// Build the form, bound to `data` when there is any.
    fn create_form(&self, request: &AdminRequest, data: Option<&FormData>) -> Self::Form;

    fn initialize_form(&self, request: &AdminRequest) -> Self::Form {
        if request.is_post() {
            self.create_form(request, Some(&request.form))
        } else {
            self.create_form(request, None)
        }
    }

    /// Act on a valid submission. `Some` replaces the default redirect.
    async fn handle_form(
        &self,
        _form: Self::Form,
        _request: &mut AdminRequest,
    ) -> Result<Option<AdminResponse>, DispatchError> {
        Err(DispatchError::NotImplemented("FormView::handle_form"))
    }

    /// Form flow: handle a valid POST, otherwise render the form.
    ///
    /// # Errors
    /// Propagates `handle_form` errors and form serialization failures.
    async fn form_dispatch(
        &self,
        request: &mut AdminRequest,
    ) -> Result<AdminResponse, DispatchError> {
        let mut form = self.initialize_form(request);

        if request.is_post() && form.is_valid() {
            if let Some(response) = self.handle_form(form, request).await? {
                return Ok(response);
            }
            return Ok(after_submit(request, self.root_link()));
        }

        let mut context = Map::new();
        context.insert("form".to_owned(), serde_json::to_value(&form)?);
        Ok(AdminResponse::render(self.template(), Value::Object(context)))
    }
}
