//! Fixture views over an in-memory category table.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::request::{AdminRequest, FormData};
use crate::response::AdminResponse;
use crate::views::{AdminForm, ButtonView, FormView, ModelForm, ModelFormView, NamedTarget};
use crate::{DispatchError, TargetedView};


pub const ROOT: &str = "/admin/categories/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub locked: bool,
}

impl NamedTarget for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Categories plus a log of every hook the views went through.
#[derive(Debug, Default)]
pub struct AdminDb {
    categories: Mutex<BTreeMap<u32, Category>>,
    events: Mutex<Vec<String>>,
}

#[expect(clippy::unwrap_used, reason = "test code")]
impl AdminDb {
    pub fn with_categories(categories: &[(u32, &str, bool)]) -> Self {
        let db = Self::default();
        for &(id, name, locked) in categories {
            db.insert(Category { id, name: name.to_owned(), locked });
        }
        db
    }

    pub fn insert(&self, category: Category) {
        self.categories.lock().unwrap().insert(category.id, category);
    }

    pub fn category(&self, id: u32) -> Option<Category> {
        self.categories.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.categories.lock().unwrap().len()
    }

    pub fn log(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn find(&self, pk: &str, lock: bool) -> Result<Option<Category>, DispatchError> {
        self.log(format!("find {pk} lock={lock}"));
        let id = pk.parse::<u32>().map_err(|e| DispatchError::Storage(e.to_string()))?;
        Ok(self.category(id))
    }

    fn remove(&self, id: u32) {
        self.categories.lock().unwrap().remove(&id);
    }

    fn next_id(&self) -> u32 {
        self.categories.lock().unwrap().keys().max().map_or(1, |id| id + 1)
    }
}

/// `TargetedView` over the category table for a fixture view holding `db`.
macro_rules! category_view {
    ($view:ident, atomic: $atomic:expr, |$this:ident, $request:ident, $target:ident| $body:expr) => {
        #[async_trait]
        impl<'a> TargetedView for $view<'a> {
            type Target = Category;

            fn root_link(&self) -> &str {
                ROOT
            }

            fn message_404(&self) -> &str {
                "Requested category does not exist."
            }

            fn is_atomic(&self) -> bool {
                $atomic
            }

            fn new_target(&self) -> Category {
                Category { id: 0, name: String::new(), locked: false }
            }

            async fn find_target(
                &self,
                pk: &str,
                lock: bool,
            ) -> Result<Option<Category>, DispatchError> {
                self.db.find(pk, lock)
            }

            async fn check_permissions(
                &self,
                _request: &AdminRequest,
                target: &Category,
            ) -> Option<String> {
                target.locked.then(|| format!("{} is locked.", target.name))
            }

            async fn real_dispatch(
                &self,
                $request: &mut AdminRequest,
                $target: Category,
            ) -> Result<AdminResponse, DispatchError> {
                let $this = self;
                $body
            }

            async fn begin_atomic(&self) -> Result<(), DispatchError> {
                self.db.log("begin");
                Ok(())
            }

            async fn commit_atomic(&self) -> Result<(), DispatchError> {
                self.db.log("commit");
                Ok(())
            }

            async fn rollback_atomic(&self) -> Result<(), DispatchError> {
                self.db.log("rollback");
                Ok(())
            }
        }
    };
}

#[derive(Debug, Serialize)]
pub struct CategoryForm {
    name: String,
    errors: Vec<String>,
    #[serde(skip)]
    instance: Category,
}

impl AdminForm for CategoryForm {
    fn is_valid(&mut self) -> bool {
        if self.name.trim().is_empty() {
            self.errors.push("name: this field is required".to_owned());
        }
        self.errors.is_empty()
    }
}

impl ModelForm<Category> for CategoryForm {
    fn into_instance(self) -> Category {
        Category { name: self.name.trim().to_owned(), ..self.instance }
    }
}

/// Edit or create a category.
pub struct EditCategory<'a> {
    pub db: &'a AdminDb,
}

category_view!(EditCategory, atomic: true, |view, request, target| {
    view.model_form_dispatch(request, target).await
});

#[async_trait]
impl<'a> ModelFormView for EditCategory<'a> {
    type Form = CategoryForm;

    fn message_submit(&self) -> Option<&str> {
        Some("Category \"{name}\" has been saved.")
    }

    fn create_form(
        &self,
        _request: &AdminRequest,
        data: Option<&FormData>,
        target: Category,
    ) -> CategoryForm {
        let name = match data {
            Some(data) => data.get("name").unwrap_or_default().to_owned(),
            None => target.name.clone(),
        };
        CategoryForm { name, errors: Vec::new(), instance: target }
    }

    async fn save_target(&self, target: &Category) -> Result<(), DispatchError> {
        let mut saved = target.clone();
        if saved.id == 0 {
            saved.id = self.db.next_id();
        }
        self.db.log(format!("save {}", saved.id));
        self.db.insert(saved);
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MoveForm {
    to: Option<String>,
}

impl AdminForm for MoveForm {
    fn is_valid(&mut self) -> bool {
        self.to.is_some()
    }
}

/// Move a category's content elsewhere; non-atomic.
pub struct MoveContent<'a> {
    pub db: &'a AdminDb,
    /// When set, `handle_form` answers with its own redirect.
    pub custom_redirect: Option<&'static str>,
}

category_view!(MoveContent, atomic: false, |view, request, _target| {
    view.form_dispatch(request).await
});

#[async_trait]
impl<'a> FormView for MoveContent<'a> {
    type Form = MoveForm;

    fn template(&self) -> &str {
        "move.html"
    }

    fn create_form(&self, _request: &AdminRequest, data: Option<&FormData>) -> MoveForm {
        MoveForm { to: data.and_then(|d| d.get("to")).map(str::to_owned) }
    }

    async fn handle_form(
        &self,
        form: MoveForm,
        request: &mut AdminRequest,
    ) -> Result<Option<AdminResponse>, DispatchError> {
        self.db.log(format!("move to {}", form.to.unwrap_or_default()));
        request.messages.info("Content moved.");
        Ok(self.custom_redirect.map(AdminResponse::redirect))
    }
}

/// A form view that never implemented its submit handler.
pub struct UnfinishedForm<'a> {
    pub db: &'a AdminDb,
}

category_view!(UnfinishedForm, atomic: true, |view, request, _target| {
    view.form_dispatch(request).await
});

impl<'a> FormView for UnfinishedForm<'a> {
    type Form = MoveForm;

    fn create_form(&self, _request: &AdminRequest, _data: Option<&FormData>) -> MoveForm {
        MoveForm { to: Some("anywhere".to_owned()) }
    }
}

/// Delete a category; fails on demand to exercise rollback.
pub struct DeleteCategory<'a> {
    pub db: &'a AdminDb,
    pub fail: bool,
}

category_view!(DeleteCategory, atomic: true, |view, request, target| {
    view.button_dispatch(request, target).await
});

#[async_trait]
impl<'a> ButtonView for DeleteCategory<'a> {
    async fn button_action(
        &self,
        request: &mut AdminRequest,
        target: Category,
    ) -> Result<Option<AdminResponse>, DispatchError> {
        if self.fail {
            return Err(DispatchError::Storage("category is referenced".to_owned()));
        }
        self.db.remove(target.id);
        request.messages.success(format!("Category \"{}\" has been deleted.", target.name));
        Ok(None)
    }
}

/// A button view without an action.
pub struct UnfinishedButton<'a> {
    pub db: &'a AdminDb,
}

category_view!(UnfinishedButton, atomic: true, |view, request, target| {
    view.button_dispatch(request, target).await
});

impl<'a> ButtonView for UnfinishedButton<'a> {}
