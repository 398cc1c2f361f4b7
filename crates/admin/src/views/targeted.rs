use async_trait::async_trait;

use crate::error::DispatchError;
use crate::request::{AdminRequest, TargetKwargs};
use crate::response::AdminResponse;

/// A view working on one record picked by the route kwargs.
///
/// [`dispatch`](TargetedView::dispatch) loads the target, checks
/// permissions and calls [`real_dispatch`](TargetedView::real_dispatch).
/// Atomic views run all of it between the `*_atomic` hooks, which a
/// backend uses to open and close its transaction.
#[async_trait]
pub trait TargetedView: Send + Sync {
    type Target: Send + Sync;

    /// Where the view sends the user after an action or a failure.
    fn root_link(&self) -> &str;

    /// Shown when the kwargs name a record that does not exist.
    fn message_404(&self) -> &str;

    fn is_atomic(&self) -> bool {
        true
    }

    /// A fresh, unsaved target for views routed without a primary key.
    fn new_target(&self) -> Self::Target;

    /// Load the target by primary key. `lock` asks for a row lock held until
    /// the atomic section ends.
    async fn find_target(&self, pk: &str, lock: bool)
    -> Result<Option<Self::Target>, DispatchError>;

    /// `Ok(None)` only when a primary key was given and nothing matched it.
    ///
    /// # Errors
    /// Returns `TooManyKwargs` for more than one kwarg, or whatever
    /// [`find_target`](TargetedView::find_target) fails with.
    async fn get_target(
        &self,
        kwargs: &TargetKwargs,
    ) -> Result<Option<Self::Target>, DispatchError> {
        match kwargs.primary_key()? {
            None => Ok(Some(self.new_target())),
            Some(pk) => self.find_target(pk, self.is_atomic()).await,
        }
    }

    /// An error message when the user may not act on `target`.
    async fn check_permissions(
        &self,
        _request: &AdminRequest,
        _target: &Self::Target,
    ) -> Option<String> {
        None
    }

    async fn real_dispatch(
        &self,
        request: &mut AdminRequest,
        target: Self::Target,
    ) -> Result<AdminResponse, DispatchError>;

    async fn begin_atomic(&self) -> Result<(), DispatchError> {
        Ok(())
    }

    async fn commit_atomic(&self) -> Result<(), DispatchError> {
        Ok(())
    }

    async fn rollback_atomic(&self) -> Result<(), DispatchError> {
        Ok(())
    }

    /// Handle one request, inside the atomic section when the view is atomic.
    ///
    /// # Errors
    /// Returns the first error of the dispatch; the atomic section is rolled
    /// back in that case.
    async fn dispatch(&self, request: &mut AdminRequest) -> Result<AdminResponse, DispatchError> {
        if !self.is_atomic() {
            return self.wrapped_dispatch(request).await;
        }

        self.begin_atomic().await?;
        match self.wrapped_dispatch(request).await {
            Ok(response) => {
                self.commit_atomic().await?;
                Ok(response)
            },
            Err(err) => {
                if let Err(rollback_err) = self.rollback_atomic().await {
                    tracing::error!(error = %rollback_err, "admin rollback failed");
                }
                Err(err)
            },
        }
    }

    /// Target lookup and permission check around `real_dispatch`.
    ///
    /// # Errors
    /// Propagates target lookup and `real_dispatch` errors.
    async fn wrapped_dispatch(
        &self,
        request: &mut AdminRequest,
    ) -> Result<AdminResponse, DispatchError> {
        let Some(target) = self.get_target(&request.target).await? else {
            tracing::debug!(path = %request.path, "admin target not found");
            request.messages.error(self.message_404());
            return Ok(AdminResponse::redirect(self.root_link()));
        };

        if let Some(error) = self.check_permissions(request, &target).await {
            tracing::debug!(path = %request.path, error = %error, "admin permission denied");
            request.messages.error(error);
            return Ok(AdminResponse::redirect(self.root_link()));
        }

        self.real_dispatch(request, target).await
    }
}
