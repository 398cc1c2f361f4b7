//! Request-side types handed to admin views.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl From<&axum::http::Method> for Method {
    fn from(method: &axum::http::Method) -> Self {
        if method == axum::http::Method::POST { Self::Post } else { Self::Get }
    }
}

/// Submitted form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Route kwargs captured for a targeted view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetKwargs(BTreeMap<String, String>);

impl TargetKwargs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kwargs holding only the primary key.
    #[must_use]
    pub fn pk(pk: impl Into<String>) -> Self {
        Self::new().with("pk", pk)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The primary key, whatever its kwarg is called.
    ///
    /// `None` means the view works on a fresh target.
    ///
    /// # Errors
    /// Returns `TooManyKwargs` when more than one kwarg was captured.
    pub fn primary_key(&self) -> Result<Option<&str>, DispatchError> {
        match self.0.len() {
            0 => Ok(None),
            1 => Ok(self.0.values().next().map(String::as_str)),
            n => Err(DispatchError::TooManyKwargs(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

/// Messages shown to the user on the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashMessages(Vec<(Level, String)>);

impl FlashMessages {
    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.0.push((level, message.into()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, &str)> {
        self.0.iter().map(|(level, message)| (*level, message.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One admin request as seen by a view.
#[derive(Debug, Clone, Default)]
pub struct AdminRequest {
    pub method: Method,
    pub path: String,
    pub form: FormData,
    pub target: TargetKwargs,
    pub messages: FlashMessages,
}

impl AdminRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), ..Self::default() }
    }

    #[must_use]
    pub fn post(path: impl Into<String>, form: FormData) -> Self {
        Self { method: Method::Post, path: path.into(), form, ..Self::default() }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetKwargs) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn is_post(&self) -> bool {
        self.method == Method::Post
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_depends_on_kwarg_count() {
        assert_eq!(TargetKwargs::new().primary_key().unwrap(), None);
        assert_eq!(TargetKwargs::new().with("category_id", "7").primary_key().unwrap(), Some("7"));
        let err = TargetKwargs::pk("1").with("slug", "news").primary_key().unwrap_err();
        assert!(matches!(err, DispatchError::TooManyKwargs(2)));
    }

    #[test]
    fn flash_messages_keep_order() {
        let mut messages = FlashMessages::default();
        messages.error("missing");
        messages.success("saved");
        let collected: Vec<_> = messages.iter().collect();
        assert_eq!(collected, vec![(Level::Error, "missing"), (Level::Success, "saved")]);
    }

    #[test]
    fn only_http_post_is_a_post() {
        assert_eq!(Method::from(&axum::http::Method::POST), Method::Post);
        assert_eq!(Method::from(&axum::http::Method::HEAD), Method::Get);
    }
}
