//! Admin view dispatch for readtrack.
//!
//! Views locate a target record from the route kwargs, check permissions
//! and hand over to a form or button callback. Routing, sessions and
//! templates belong to the embedding web application; this crate only
//! decides what happens to one request.

mod error;
mod request;
mod response;
#[cfg(test)]
mod tests;
pub mod views;

pub use error::DispatchError;
pub use request::{AdminRequest, FlashMessages, FormData, Level, Method, TargetKwargs};
pub use response::AdminResponse;
pub use views::{AdminForm, ButtonView, FormView, ModelForm, ModelFormView, NamedTarget, TargetedView};
