//! Handles for the page elements the controllers act on.
//!
//! Controllers receive these at construction or call time instead of
//! looking elements up themselves, so tests can hand in doubles.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use regex::Regex;

/// Name of the hidden input carrying the anti-forgery token.
pub const CSRF_FIELD: &str = "csrf_token";

/// A form-like container of named input values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Collects every `<input>` that has both a `name` and a `value`
    /// attribute. Later inputs with the same name win.
    pub fn from_html(html: &str) -> Self {
        let mut form = Form::new();
        for tag in INPUT_TAG_RE.find_iter(html) {
            let tag = tag.as_str();
            let name = attribute(tag, &NAME_ATTR_RE);
            let value = attribute(tag, &VALUE_ATTR_RE);
            if let (Some(name), Some(value)) = (name, value) {
                form.fields.insert(name, value);
            }
        }
        form
    }
}

static INPUT_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<input\b[^>]*>").unwrap());
static NAME_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\sname\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#).unwrap()
});
static VALUE_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)\svalue\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#).unwrap()
});

fn attribute(tag: &str, pattern: &Regex) -> Option<String> {
    let caps = pattern.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

/// The files chosen in the upload form's `file` input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<PathBuf>,
}

impl FileSelection {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressState {
    Hidden,
    Active { percent: u8, label: String },
}

/// A page-level progress indicator: an outer element that is shown or
/// hidden and an inner bar with a width and a text label.
pub trait ProgressIndicator: Send + Sync {
    fn reveal(&self);
    fn set_bar(&self, percent: u8, label: &str);
    fn state(&self) -> ProgressState;
}

/// Indicator that only tracks state. Used where nothing is rendered.
#[derive(Debug, Clone)]
pub struct ProgressHandle {
    state: Arc<Mutex<ProgressState>>,
}

impl Default for ProgressHandle {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(ProgressState::Hidden)),
        }
    }
}

impl ProgressHandle {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressIndicator for ProgressHandle {
    fn reveal(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state == ProgressState::Hidden {
            *state = ProgressState::Active {
                percent: 0,
                label: String::new(),
            };
        }
    }

    fn set_bar(&self, percent: u8, label: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        // The bar is styled even while the outer element is hidden, but
        // stays invisible until revealed.
        if let ProgressState::Active { .. } = *state {
            *state = ProgressState::Active {
                percent,
                label: label.to_string(),
            };
        }
    }

    fn state(&self) -> ProgressState {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
