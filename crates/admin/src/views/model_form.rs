use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{after_submit, AdminForm, ModelForm, NamedTarget, TargetedView};
use crate::error::DispatchError;
use crate::request::{AdminRequest, FormData};
use crate::response::AdminResponse;

/// A form view editing the target itself.
#[async_trait]
pub trait ModelFormView: TargetedView<Target: NamedTarget> {
    type Form: ModelForm<Self::Target>;

    fn template(&self) -> &str {
        "form.html"
    }

    /// Success message after a save; `{name}` becomes the saved target's name.
    fn message_submit(&self) -> Option<&str> {
        None
    }

    /// Build the form around `target`, bound to `data` when there is any.
    fn create_form(
        &self,
        request: &AdminRequest,
        data: Option<&FormData>,
        target: Self::Target,
    ) -> Self::Form;

    fn initialize_form(&self, request: &AdminRequest, target: &Self::Target) -> Self::Form {
        let data = request.is_post().then_some(&request.form);
        self.create_form(request, data, target.clone())
    }

    async fn save_target(&self, target: &Self::Target) -> Result<(), DispatchError>;

    /// Save the edited instance and flash `message_submit`.
    async fn handle_form(
        &self,
        form: Self::Form,
        request: &mut AdminRequest,
        _target: &Self::Target,
    ) -> Result<Option<AdminResponse>, DispatchError> {
        let instance = form.into_instance();
        self.save_target(&instance).await?;
        if let Some(message) = self.message_submit() {
            request.messages.success(message.replace("{name}", instance.name()));
        }
        Ok(None)
    }

    /// Model form flow: save a valid POST, otherwise render form and target.
    ///
    /// # Errors
    /// Propagates `handle_form` errors and context serialization failures.
    async fn model_form_dispatch(
        &self,
        request: &mut AdminRequest,
        target: Self::Target,
    ) -> Result<AdminResponse, DispatchError> {
        let mut form = self.initialize_form(request, &target);

        if request.is_post() && form.is_valid() {
            if let Some(response) = self.handle_form(form, request, &target).await? {
                return Ok(response);
            }
            return Ok(after_submit(request, self.root_link()));
        }

        let mut context = Map::new();
        context.insert("form".to_owned(), serde_json::to_value(&form)?);
        context.insert("target".to_owned(), serde_json::to_value(&target)?);
        Ok(AdminResponse::render(self.template(), Value::Object(context)))
    }
}
