use async_trait::async_trait;

use super::TargetedView;
use crate::error::DispatchError;
use crate::request::AdminRequest;
use crate::response::AdminResponse;

/// A targeted view behind a single POST button, such as "delete".
#[async_trait]
pub trait ButtonView: TargetedView {
    /// Run the action. `Some` replaces the redirect to the root link.
    async fn button_action(
        &self,
        _request: &mut AdminRequest,
        _target: Self::Target,
    ) -> Result<Option<AdminResponse>, DispatchError> {
        Err(DispatchError::NotImplemented("ButtonView::button_action"))
    }

    /// Button flow: run the action on POST, then redirect to the root link.
    ///
    /// # Errors
    /// Propagates `button_action` errors.
    async fn button_dispatch(
        &self,
        request: &mut AdminRequest,
        target: Self::Target,
    ) -> Result<AdminResponse, DispatchError> {
        if request.is_post()
            && let Some(response) = self.button_action(request, target).await?
        {
            return Ok(response);
        }
        Ok(AdminResponse::redirect(self.root_link()))
    }
}
