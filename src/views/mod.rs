//! Views rendered into the container.

use std::sync::Arc;

use crate::identity::IdentityCell;
use crate::router::ViewRegistry;

pub mod landing;
pub mod problem;
pub mod profile;

pub const LANDING_VIEW: &str = "landing";
pub const PROBLEM_VIEW: &str = "problem";
pub const PROFILE_VIEW: &str = "profile";

/// Register every view the app ships with.
pub fn default_registry(identity: Arc<IdentityCell>) -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    registry
        .register(LANDING_VIEW, |_| landing::landing_view())
        .register(PROBLEM_VIEW, |arg| problem::problem_view(arg.unwrap_or_default()))
        .register(PROFILE_VIEW, move |_| profile::profile_view(&identity));
    registry
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
