use parking_lot::RwLock;
use serde::Serialize;

/// A rendered view fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub name: String,
    /// css class of the view root, e.g. `problem-view`
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub html: String,
}

impl View {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            title: None,
            html: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }
}

/// The single element views are rendered into. Holds at most one view.
#[derive(Debug, Default)]
pub struct ViewContainer {
    current: RwLock<Option<View>>,
}

impl ViewContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the container contents.
    pub fn replace(&self, view: View) {
        *self.current.write() = Some(view);
    }

    pub fn current(&self) -> Option<View> {
        self.current.read().clone()
    }
}
