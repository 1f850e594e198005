//! Registry of default-scope configuration values.
//!
//! An explicit object passed into [`crate::Service`] at construction, not a
//! package-level singleton: modules register their defaults during app
//! initialization and the service persists them at Default scope exactly
//! once.

use crate::prelude::*;

/// Collects `(route, value)` defaults during initialization. Registration
/// order is preserved so re-registration conflicts are deterministic to
/// debug.
#[derive(Debug, Default)]
pub struct DefaultRegistry {
	entries: Vec<(Route, Value)>,
}

impl DefaultRegistry {
	pub fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Register a default value for a route. Registering the same route
	/// twice is a wiring mistake and fails with `NotValid`.
	pub fn register(&mut self, route: &str, value: impl Into<Value>) -> CfgResult<()> {
		let route = Route::new(route)?;
		if self.entries.iter().any(|(r, _)| *r == route) {
			return Err(Error::not_valid(format!("default for {:?} is already registered", route.as_str())));
		}
		debug!("Registering default: {}", route);
		self.entries.push((route, value.into()));
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(crate) fn into_entries(self) -> Vec<(Route, Value)> {
		self.entries
	}
}


// vim: ts=4
