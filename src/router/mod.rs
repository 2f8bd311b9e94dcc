//! Hash-fragment routing between in-page views.

pub mod container;
pub mod hash_router;
pub mod registry;
pub mod route;
pub mod window;

pub use container::{View, ViewContainer};
pub use hash_router::{HashRouter, RouteError};
pub use registry::{ViewProducer, ViewRegistry};
pub use route::Route;
pub use window::{HashChange, Window};
