//! Storage adapter seam and the typed read/write contracts.
//!
//! All three contracts are synchronous by design: resolution happens inline
//! in the calling thread, and a backing store that needs to block on I/O
//! does so behind the [`Storage`] trait.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::error::{CfgResult, Error};
use crate::hash::Hash;
use crate::path::Path;
use crate::scope::Scope;
use crate::value::Value;

/// Raw key/value seam implemented by backing-store adapters. Keys are
/// canonical path strings (`{scope}/{id}/{route}`).
pub trait Storage: Debug + Send + Sync {
	fn set(&self, key: &str, value: Value) -> CfgResult<()>;

	/// `Ok(None)` means the key is absent; errors are reserved for the
	/// store itself failing.
	fn get(&self, key: &str) -> CfgResult<Option<Value>>;

	/// All currently stored keys, unordered.
	fn keys(&self) -> CfgResult<Vec<String>>;
}

/// Typed exact-scope read contract. No fallback happens here: an absent key
/// fails with `NotFound`, a stored value of the wrong kind with `NotValid`.
pub trait Getter: Send + Sync {
	fn get_string(&self, path: &Path) -> CfgResult<String>;
	fn get_bool(&self, path: &Path) -> CfgResult<bool>;
	fn get_int(&self, path: &Path) -> CfgResult<i64>;
	fn get_float(&self, path: &Path) -> CfgResult<f64>;
	fn get_time(&self, path: &Path) -> CfgResult<DateTime<Utc>>;
	fn get_bytes(&self, path: &Path) -> CfgResult<Vec<u8>>;
}

/// Typed write contract. The value is persisted under the path's canonical
/// string form.
pub trait Writer: Send + Sync {
	fn write(&self, path: &Path, value: Value) -> CfgResult<()>;
}

/// Error produced by a scoped lookup, tagged with the scope hash the chain
/// stopped at. The hash is part of the observable contract: a terminal
/// `NotFound` carries [`Hash::DEFAULT`], a short-circuiting error carries
/// the hash of the scope that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedError {
	pub hash: Hash,
	pub error: Error,
}

impl ScopedError {
	pub fn new(hash: Hash, error: Error) -> Self {
		ScopedError { hash, error }
	}
}

impl std::fmt::Display for ScopedError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} at {}", self.error, self.hash)
	}
}

impl std::error::Error for ScopedError {}

impl From<ScopedError> for Error {
	fn from(e: ScopedError) -> Error {
		e.error
	}
}

/// Result of a scoped lookup: the value plus the hash of the scope it was
/// actually resolved at.
pub type ScopedResult<T> = std::result::Result<(T, Hash), ScopedError>;

/// What a scope-bound resolver exposes to collaborators: typed accessors
/// that walk the store -> website -> default chain, plus the resolver's own
/// position in it.
///
/// `restrict` caps the chain at the given scope: `Some(Scope::Website)`
/// skips the store attempt even on a store-scoped resolver. `None` (and
/// `Some(Scope::Absent)`) leave the resolver's natural scope in charge.
pub trait ScopedGetter: Send + Sync {
	fn get_string(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<String>;
	fn get_bool(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<bool>;
	fn get_int(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<i64>;
	fn get_float(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<f64>;
	fn get_time(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<DateTime<Utc>>;
	fn get_bytes(&self, route: &str, restrict: Option<Scope>) -> ScopedResult<Vec<u8>>;

	/// The most specific scope this resolver is bound to, with its ID.
	fn scope(&self) -> (Scope, i64);

	/// The next broader scope in the chain, with its ID.
	fn parent(&self) -> (Scope, i64);
}

// vim: ts=4
