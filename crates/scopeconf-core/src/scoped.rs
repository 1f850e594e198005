//! Scope-bound resolver: the store -> website -> default fallback chain.
//!
//! Wraps a root [`Getter`] together with a (website_id, store_id) pair and
//! walks the chain for every typed accessor. The chain is a strict total
//! order and only an exact `NotFound` moves it along; any other error
//! short-circuits with the hash of the scope that produced it. The default
//! attempt is terminal and always tagged with the [`Hash::DEFAULT`]
//! constant.
//!
//! `website_id` and `store_id` are expected to be in a parent/child relation
//! like the one enforced by [`Hash::valid_parent`]. A store_id of 0 makes
//! the resolver website-scoped, both zero make it default-scoped.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::prelude::*;

#[derive(Clone)]
pub struct Scoped {
	root: Arc<dyn Getter>,
	website_id: i64,
	store_id: i64,
}

impl std::fmt::Debug for Scoped {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Scoped")
			.field("website_id", &self.website_id)
			.field("store_id", &self.store_id)
			.finish()
	}
}

impl Scoped {
	pub fn new(root: Arc<dyn Getter>, website_id: i64, store_id: i64) -> Self {
		Self { root, website_id, store_id }
	}

	/// The most specific scope implied by the bound IDs.
	pub fn scope(&self) -> (Scope, i64) {
		if self.store_id > 0 {
			return (Scope::Store, self.store_id);
		}
		if self.website_id > 0 {
			return (Scope::Website, self.website_id);
		}
		(Scope::Default, 0)
	}

	/// The next broader scope: store falls back to website, everything else
	/// to default.
	pub fn parent(&self) -> (Scope, i64) {
		if self.store_id > 0 {
			return (Scope::Website, self.website_id);
		}
		(Scope::Default, 0)
	}

	/// Scope used for permission checks: the restriction when one is
	/// supplied and more specific than Absent, the natural scope otherwise.
	fn effective_scope(&self, restrict: Option<Scope>) -> Scope {
		match restrict {
			Some(s) if s > Scope::Absent => s,
			_ => self.scope().0,
		}
	}

	fn is_allowed_store(&self, restrict: Option<Scope>) -> bool {
		self.store_id > 0 && Perm::STORE_REVERSE.has(self.effective_scope(restrict))
	}

	fn is_allowed_website(&self, restrict: Option<Scope>) -> bool {
		self.website_id > 0 && Perm::WEBSITE_REVERSE.has(self.effective_scope(restrict))
	}

	/// The fallback algorithm, shared by all typed accessors.
	///
	/// A malformed route fails immediately with a zero hash; no fallback
	/// happens for it. The store and website attempts are independently
	/// gated, so a resolver with store_id > 0 and website_id == 0 goes
	/// store -> default.
	fn resolve<T>(
		&self,
		route: &str,
		restrict: Option<Scope>,
		get: impl Fn(&Path) -> CfgResult<T>,
	) -> ScopedResult<T> {
		let path = match Path::parse(route) {
			Ok(p) => p,
			Err(err) => {
				return Err(ScopedError::new(
					Hash::from_raw(0),
					err.context(format!("route {:?}", route)),
				));
			}
		};

		if self.is_allowed_store(restrict) {
			let p = path.bind_store(self.store_id);
			match get(&p) {
				Ok(v) => return Ok((v, p.scope_hash)),
				Err(err) if err.is_not_found() => {
					debug!("Store scope miss for {}, falling back", p);
				}
				Err(err) => return Err(ScopedError::new(p.scope_hash, err)),
			}
		}

		if self.is_allowed_website(restrict) {
			let p = path.bind_website(self.website_id);
			match get(&p) {
				Ok(v) => return Ok((v, p.scope_hash)),
				Err(err) if err.is_not_found() => {
					debug!("Website scope miss for {}, falling back", p);
				}
				Err(err) => return Err(ScopedError::new(p.scope_hash, err)),
			}
		}

		// Terminal step. Any error here, including NotFound, goes to the
		// caller, always tagged with the Hash::DEFAULT constant.
		let p = Path { route: path.route, scope_hash: Hash::DEFAULT };
		match get(&p) {
			Ok(v) => Ok((v, Hash::DEFAULT)),
			Err(err) => Err(ScopedError::new(Hash::DEFAULT, err)),
		}
	}
}

impl ScopedGetter for Scoped {
	fn get_string(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<String> {
		self.resolve(route, restrict, |p| self.root.get_string(p))
	}

	fn get_bool(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<bool> {
		self.resolve(route, restrict, |p| self.root.get_bool(p))
	}

	fn get_int(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<i64> {
		self.resolve(route, restrict, |p| self.root.get_int(p))
	}

	fn get_float(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<f64> {
		self.resolve(route, restrict, |p| self.root.get_float(p))
	}

	fn get_time(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<DateTime<Utc>> {
		self.resolve(route, restrict, |p| self.root.get_time(p))
	}

	fn get_bytes(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<Vec<u8>> {
		self.resolve(route, restrict, |p| self.root.get_bytes(p))
	}

	fn scope(&self) -> (Scope, i64) {
		Scoped::scope(self)
	}

	fn parent(&self) -> (Scope, i64) {
		Scoped::parent(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::RwLock;
	use std::collections::HashMap;

	/// Root getter stand-in keyed by canonical path strings. Keys can also
	/// carry a forced error to exercise the short-circuit branches.
	#[derive(Debug, Default)]
	struct MockGetter {
		values: RwLock<HashMap<String, Value>>,
		errors: RwLock<HashMap<String, Error>>,
	}

	impl MockGetter {
		fn with(values: &[(&str, Value)]) -> Arc<Self> {
			let m = Self::default();
			{
				let mut lock = m.values.write();
				for (k, v) in values {
					lock.insert((*k).to_string(), v.clone());
				}
			}
			Arc::new(m)
		}

		fn fail(self: &Arc<Self>, key: &str, err: Error) {
			self.errors.write().insert(key.to_string(), err);
		}

		fn value(&self, path: &Path) -> CfgResult<Value> {
			let key = path.to_string();
			if let Some(err) = self.errors.read().get(&key) {
				return Err(err.clone());
			}
			match self.values.read().get(&key) {
				Some(v) => Ok(v.clone()),
				None => Err(Error::not_found(format!("key {:?}", key))),
			}
		}
	}

	impl Getter for MockGetter {
		fn get_string(&self, path: &Path) -> CfgResult<String> {
			self.value(path)?.into_str()
		}

		fn get_bool(&self, path: &Path) -> CfgResult<bool> {
			self.value(path)?.into_bool()
		}

		fn get_int(&self, path: &Path) -> CfgResult<i64> {
			self.value(path)?.into_int()
		}

		fn get_float(&self, path: &Path) -> CfgResult<f64> {
			self.value(path)?.into_float()
		}

		fn get_time(&self, path: &Path) -> CfgResult<DateTime<Utc>> {
			self.value(path)?.into_time()
		}

		fn get_bytes(&self, path: &Path) -> CfgResult<Vec<u8>> {
			self.value(path)?.into_bytes()
		}
	}

	#[test]
	fn test_scope_and_parent() {
		let root = MockGetter::with(&[]);
		let ss = Scoped::new(root.clone(), 1, 4);
		assert_eq!(ss.scope(), (Scope::Store, 4));
		assert_eq!(ss.parent(), (Scope::Website, 1));

		let ss = Scoped::new(root.clone(), 1, 0);
		assert_eq!(ss.scope(), (Scope::Website, 1));
		assert_eq!(ss.parent(), (Scope::Default, 0));

		let ss = Scoped::new(root, 0, 0);
		assert_eq!(ss.scope(), (Scope::Default, 0));
		assert_eq!(ss.parent(), (Scope::Default, 0));
	}

	#[test]
	fn test_fallback_to_default_tagged_with_default_hash() {
		// P1: value only at default scope resolves through a store-scoped
		// resolver tagged with the DEFAULT constant
		let root = MockGetter::with(&[("default/0/web/cors/origin", "*".into())]);
		let ss = Scoped::new(root, 1, 1);
		assert_eq!(ss.get_string("web/cors/origin", None).ok(), Some(("*".to_string(), Hash::DEFAULT)));
	}

	#[test]
	fn test_store_scope_wins() {
		let root = MockGetter::with(&[
			("default/0/web/unsecure/url", "http://default".into()),
			("websites/1/web/unsecure/url", "http://website".into()),
			("stores/4/web/unsecure/url", "http://store".into()),
		]);
		let ss = Scoped::new(root, 1, 4);
		assert_eq!(
			ss.get_string("web/unsecure/url", None).ok(),
			Some(("http://store".to_string(), Hash::new(Scope::Store, 4)))
		);
	}

	#[test]
	fn test_website_scope_fallback() {
		// Scenario B: value stored only at Website(1)
		let root = MockGetter::with(&[("websites/1/web/unsecure/url", "http://cs.io".into())]);
		let ss = Scoped::new(root, 1, 1);
		assert_eq!(
			ss.get_string("web/unsecure/url", None).ok(),
			Some(("http://cs.io".to_string(), Hash::new(Scope::Website, 1)))
		);
	}

	#[test]
	fn test_nothing_stored_anywhere() {
		// Scenario A: terminal NotFound carries the DEFAULT hash
		let root = MockGetter::with(&[]);
		let ss = Scoped::new(root, 1, 1);
		let err = match ss.get_string("catalog/product/enable_flat", None) {
			Err(err) => err,
			Ok(v) => panic!("unexpected value {:?}", v),
		};
		assert!(err.error.is_not_found());
		assert_eq!(err.hash, Hash::DEFAULT);
	}

	#[test]
	fn test_malformed_route_short_circuits() {
		// No fallback on a malformed route; the hash is the zero hash
		let root = MockGetter::with(&[("default/0/catalog/product/enable_flat", true.into())]);
		let ss = Scoped::new(root, 1, 1);
		let err = match ss.get_string("catalog", None) {
			Err(err) => err,
			Ok(v) => panic!("unexpected value {:?}", v),
		};
		assert!(err.error.is_not_valid());
		assert!(!err.error.is_not_found());
		assert_eq!(err.hash, Hash::from_raw(0));
		// Wrapped with route context, kind preserved
		assert!(err.error.to_string().contains("route \"catalog\""));
	}

	#[test]
	fn test_non_not_found_error_short_circuits() {
		// P2: a NotValid error at store scope stops the chain with the
		// store hash even though website and default values exist
		let root = MockGetter::with(&[
			("default/0/web/unsecure/url", "http://default".into()),
			("websites/1/web/unsecure/url", "http://website".into()),
		]);
		root.fail("stores/4/web/unsecure/url", Error::not_valid("stored value is garbage"));
		let ss = Scoped::new(root, 1, 4);
		let err = match ss.get_string("web/unsecure/url", None) {
			Err(err) => err,
			Ok(v) => panic!("unexpected value {:?}", v),
		};
		assert!(err.error.is_not_valid());
		assert_eq!(err.hash, Hash::new(Scope::Store, 4));
	}

	#[test]
	fn test_kind_mismatch_does_not_fall_through() {
		// Same property via a genuinely stored wrong-kind value
		let root = MockGetter::with(&[
			("stores/4/web/unsecure/url", 4711_i64.into()),
			("default/0/web/unsecure/url", "http://default".into()),
		]);
		let ss = Scoped::new(root, 1, 4);
		let err = match ss.get_string("web/unsecure/url", None) {
			Err(err) => err,
			Ok(v) => panic!("unexpected value {:?}", v),
		};
		assert!(err.error.is_not_valid());
		assert_eq!(err.hash, Hash::new(Scope::Store, 4));
	}

	#[test]
	fn test_scope_restriction_skips_store() {
		// P3: restricting to Website on a store-scoped resolver goes
		// website -> default
		let root = MockGetter::with(&[
			("stores/4/web/unsecure/url", "http://store".into()),
			("websites/1/web/unsecure/url", "http://website".into()),
		]);
		let ss = Scoped::new(root, 1, 4);
		assert_eq!(
			ss.get_string("web/unsecure/url", Some(Scope::Website)).ok(),
			Some(("http://website".to_string(), Hash::new(Scope::Website, 1)))
		);
	}

	#[test]
	fn test_scope_restriction_default_goes_straight_down() {
		let root = MockGetter::with(&[
			("stores/4/a/b/c", 1_i64.into()),
			("websites/1/a/b/c", 2_i64.into()),
			("default/0/a/b/c", 3_i64.into()),
		]);
		let ss = Scoped::new(root, 1, 4);
		assert_eq!(ss.get_int("a/b/c", Some(Scope::Default)).ok(), Some((3, Hash::DEFAULT)));
	}

	#[test]
	fn test_restriction_absent_means_natural_scope() {
		let root = MockGetter::with(&[("stores/4/a/b/c", 1_i64.into())]);
		let ss = Scoped::new(root, 1, 4);
		assert_eq!(
			ss.get_int("a/b/c", Some(Scope::Absent)).ok(),
			Some((1, Hash::new(Scope::Store, 4)))
		);
	}

	#[test]
	fn test_store_without_website_skips_website_step() {
		// Independently gated steps: store_id > 0, website_id == 0 goes
		// store -> default
		let root = MockGetter::with(&[("default/0/a/b/c", 9_i64.into())]);
		let ss = Scoped::new(root, 0, 4);
		assert_eq!(ss.get_int("a/b/c", None).ok(), Some((9, Hash::DEFAULT)));
	}

	#[test]
	fn test_default_scoped_resolver_never_reads_specific_scopes() {
		let root = MockGetter::with(&[
			("stores/4/a/b/c", 1_i64.into()),
			("websites/1/a/b/c", 2_i64.into()),
			("default/0/a/b/c", 3_i64.into()),
		]);
		let ss = Scoped::new(root, 0, 0);
		assert_eq!(ss.get_int("a/b/c", None).ok(), Some((3, Hash::DEFAULT)));
	}

	#[test]
	fn test_all_typed_accessors_resolve() {
		let now = Utc::now();
		let root = MockGetter::with(&[
			("websites/1/t/v/str", "s".into()),
			("websites/1/t/v/bool", true.into()),
			("websites/1/t/v/int", 3_i64.into()),
			("websites/1/t/v/float", 0.5_f64.into()),
			("websites/1/t/v/time", now.into()),
			("websites/1/t/v/bytes", vec![7_u8].into()),
		]);
		let ss = Scoped::new(root, 1, 2);
		let wh = Hash::new(Scope::Website, 1);
		assert_eq!(ss.get_string("t/v/str", None).ok(), Some(("s".to_string(), wh)));
		assert_eq!(ss.get_bool("t/v/bool", None).ok(), Some((true, wh)));
		assert_eq!(ss.get_int("t/v/int", None).ok(), Some((3, wh)));
		assert_eq!(ss.get_float("t/v/float", None).ok(), Some((0.5, wh)));
		assert_eq!(ss.get_time("t/v/time", None).ok(), Some((now, wh)));
		assert_eq!(ss.get_bytes("t/v/bytes", None).ok(), Some((vec![7], wh)));
	}

	#[test]
	fn test_scoped_error_converts_to_plain_error() {
		let root = MockGetter::with(&[]);
		let ss = Scoped::new(root, 1, 1);
		let err = match ss.get_string("a/b/c", None) {
			Err(err) => err,
			Ok(v) => panic!("unexpected value {:?}", v),
		};
		let plain: Error = err.into();
		assert!(plain.is_not_found());
	}
}

// vim: ts=4
