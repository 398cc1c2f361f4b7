//! View traits.
//!
//! [`TargetedView`] owns the dispatch flow. [`FormView`], [`ModelFormView`]
//! and [`ButtonView`] each add one `*_dispatch` method that an implementor
//! returns from its `real_dispatch`.

mod button;
mod form;
mod model_form;
mod targeted;

pub use button::ButtonView;
pub use form::FormView;
pub use model_form::ModelFormView;
pub use targeted::TargetedView;

use serde::Serialize;

use crate::request::AdminRequest;
use crate::response::AdminResponse;

/// A form bound to submitted data, or unbound on GET.
pub trait AdminForm: Serialize + Send + Sync {
    /// Validate the bound data, recording field errors on the form.
    fn is_valid(&mut self) -> bool;
}

/// A form editing an instance of `T`.
pub trait ModelForm<T>: AdminForm {
    /// The instance with the submitted fields applied.
    fn into_instance(self) -> T;
}

/// A target with a display name for flash messages.
pub trait NamedTarget: Serialize + Clone + Send + Sync {
    fn name(&self) -> &str;
}

/// Redirect after a successful submit: back to the form when "stay" was
/// posted, to the root link otherwise.
fn after_submit(request: &AdminRequest, root_link: &str) -> AdminResponse {
    if request.form.contains("stay") {
        AdminResponse::redirect(request.path.clone())
    } else {
        AdminResponse::redirect(root_link)
    }
}
