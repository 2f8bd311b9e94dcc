use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::observability::metrics::get_metrics;
use crate::router::container::{View, ViewContainer};
use crate::router::registry::ViewRegistry;
use crate::router::route::Route;
use crate::router::window::Window;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown view '{0}'")]
    UnknownView(String),
}

/// Maps location fragments to registered views and renders them into the
/// container.
#[derive(Debug)]
pub struct HashRouter {
    registry: Arc<ViewRegistry>,
    container: Arc<ViewContainer>,
    landing: String,
}

impl HashRouter {
    pub fn new(registry: Arc<ViewRegistry>, container: Arc<ViewContainer>, landing: impl Into<String>) -> Self {
        Self {
            registry,
            container,
            landing: landing.into(),
        }
    }

    pub fn container(&self) -> &Arc<ViewContainer> {
        &self.container
    }

    /// Render the view named by `fragment` into the container.
    pub fn show_view(&self, fragment: &str) -> Result<(), RouteError> {
        let route = Route::parse(fragment, &self.landing);
        let producer = self
            .registry
            .get(&route.view)
            .ok_or_else(|| RouteError::UnknownView(route.view.clone()))?;

        debug!(view = %route.view, arg = ?route.arg, "showing view");
        let view = producer(route.arg.as_deref());
        self.container.replace(view);
        get_metrics().view_renders.with_label_values(&[route.view.as_str()]).inc();
        Ok(())
    }

    /// `show_view`, falling back to the landing view for unknown names.
    /// Always leaves something rendered.
    pub fn navigate(&self, fragment: &str) {
        match self.show_view(fragment) {
            Ok(()) => {}
            Err(RouteError::UnknownView(name)) => {
                get_metrics().unknown_views.inc();
                warn!(view = %name, fragment = %fragment, "unknown view, showing landing view");
                if self.registry.contains(&self.landing) {
                    let _ = self.show_view("");
                } else {
                    self.container.replace(
                        View::new("not-found", "not-found-view").with_title("Page not found"),
                    );
                }
            }
        }
    }

    /// Render the current fragment, then re-render on every `hashchange`
    /// for the life of the window.
    pub fn app_on_ready(self: &Arc<Self>, window: Arc<Window>) -> JoinHandle<()> {
        // subscribe first so a change racing the initial render is not lost
        let mut hashchange = window.subscribe();
        self.navigate(&window.hash());
        info!(hash = %window.hash(), "router ready");

        let router = self.clone();
        tokio::spawn(async move {
            loop {
                match hashchange.recv().await {
                    Ok(_) => router.navigate(&window.hash()),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("skipped {} hashchange events", skipped);
                        router.navigate(&window.hash());
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
