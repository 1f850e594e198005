//! Validated configuration paths.
//!
//! A [`Route`] is the scope-less `section/group/field` part of a key. A
//! [`Path`] combines a route with an optionally bound scope hash and
//! serializes to the canonical storage key `{scope}/{id}/{route}`. The
//! canonical form is stable by contract: it is used as the backing-store
//! lookup key, so any change breaks persisted data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CfgResult, Error};
use crate::hash::Hash;
use crate::scope::Scope;

/// Minimum number of slash-separated segments in a route.
pub const ROUTE_LEVELS: usize = 3;

const SEPARATOR: char = '/';

/// A validated, scope-less route like `web/unsecure/url`.
///
/// Immutable once constructed. Validation happens exactly once, in
/// [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(Box<str>);

impl Route {
	/// Validate and create a route. Rules: at least [`ROUTE_LEVELS`]
	/// non-empty segments, no leading or trailing separator, segment
	/// characters restricted to ASCII alphanumerics, `_` and `-`.
	pub fn new(route: &str) -> CfgResult<Route> {
		if route.is_empty() {
			return Err(Error::empty("route"));
		}
		if route.starts_with(SEPARATOR) || route.ends_with(SEPARATOR) {
			return Err(Error::not_valid(format!(
				"route {:?} must not start or end with {:?}",
				route, SEPARATOR
			)));
		}
		let mut segments = 0;
		for segment in route.split(SEPARATOR) {
			if segment.is_empty() {
				return Err(Error::not_valid(format!("route {:?} contains an empty segment", route)));
			}
			if !segment.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
				return Err(Error::not_valid(format!(
					"route {:?}: segment {:?} contains disallowed characters",
					route, segment
				)));
			}
			segments += 1;
		}
		if segments < ROUTE_LEVELS {
			return Err(Error::not_valid(format!(
				"route {:?} has {} segment(s), need at least {}",
				route, segments, ROUTE_LEVELS
			)));
		}
		Ok(Route(route.into()))
	}

	/// Join parts into a route, validating the result.
	pub fn from_parts(parts: &[&str]) -> CfgResult<Route> {
		Route::new(&parts.join("/"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Number of segments.
	pub fn level(&self) -> usize {
		self.0.split(SEPARATOR).count()
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for Route {
	type Error = Error;

	fn try_from(s: String) -> CfgResult<Route> {
		Route::new(&s)
	}
}

impl From<Route> for String {
	fn from(r: Route) -> String {
		r.0.into()
	}
}

/// A route bound to a scope. Unbound paths default to Default scope.
///
/// Binding never mutates in place: `bind_store` / `bind_website` return a
/// copy with only the scope hash changed. The bound ID is not validated here;
/// validation happens when the hash is unpacked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
	pub route: Route,
	pub scope_hash: Hash,
}

impl Path {
	/// Path for a route at Default scope.
	pub fn new(route: Route) -> Path {
		Path { route, scope_hash: Hash::DEFAULT }
	}

	/// Validate a raw route string and create a Default-scoped path.
	pub fn parse(route: &str) -> CfgResult<Path> {
		Ok(Path::new(Route::new(route)?))
	}

	/// Copy of this path bound to Store scope with the given ID.
	pub fn bind_store(&self, id: i64) -> Path {
		Path { route: self.route.clone(), scope_hash: Hash::new(Scope::Store, id) }
	}

	/// Copy of this path bound to Website scope with the given ID.
	pub fn bind_website(&self, id: i64) -> Path {
		Path { route: self.route.clone(), scope_hash: Hash::new(Scope::Website, id) }
	}

	/// Copy of this path bound to an arbitrary scope. Group cannot carry
	/// configuration values and Absent is not bindable.
	pub fn bind(&self, scope: Scope, id: i64) -> CfgResult<Path> {
		match scope {
			Scope::Store => Ok(self.bind_store(id)),
			Scope::Website => Ok(self.bind_website(id)),
			Scope::Default => Ok(Path::new(self.route.clone())),
			Scope::Group | Scope::Absent => Err(Error::not_supported(format!(
				"scope {:?} cannot be bound to a path",
				scope.name()
			))),
		}
	}

	pub fn scope(&self) -> Scope {
		self.scope_hash.scope()
	}

	pub fn scope_id(&self) -> i64 {
		self.scope_hash.id()
	}
}

impl fmt::Display for Path {
	/// Canonical storage key: `{scope-prefix}/{scope-id}/{route}`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (scope, id) = self.scope_hash.unpack();
		// An unbound or broken hash still serializes under the default
		// prefix so a Display call can never fail
		let id = if id < 0 { 0 } else { id };
		write!(f, "{}/{}/{}", scope.as_str(), id, self.route)
	}
}


// vim: ts=4
