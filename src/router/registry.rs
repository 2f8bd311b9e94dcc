use std::collections::HashMap;
use std::sync::Arc;

use crate::router::container::View;

/// Builds a view from the optional fragment argument.
pub type ViewProducer = Arc<dyn Fn(Option<&str>) -> View + Send + Sync>;

/// view name -> producer, filled once at startup
#[derive(Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<String, ViewProducer>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, producer: F) -> &mut Self
    where
        F: Fn(Option<&str>) -> View + Send + Sync + 'static,
    {
        self.views.insert(name.into(), Arc::new(producer));
        self
    }

    pub fn get(&self, name: &str) -> Option<ViewProducer> {
        self.views.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry").field("views", &self.names()).finish()
    }
}
