//! Core of the scopeconf configuration service.
//!
//! Answers "what is the effective value of configuration path P for scope S"
//! by walking the fixed store -> website -> default chain over an injected
//! [`scopeconf_types::Storage`] adapter. The resolver and the generic
//! scoped-config cache are the two pieces collaborators build on.

pub mod registry;
pub mod scope_cache;
pub mod scoped;
pub mod service;

mod prelude;

pub use registry::DefaultRegistry;
pub use scope_cache::{ConfigLoader, ScopeCache, ScopedConfig};
pub use scoped::Scoped;
pub use service::Service;

// vim: ts=4
