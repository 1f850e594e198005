//! Generic per-scope configuration cache.
//!
//! Collaborators that sit on top of the resolver (CORS, auth, rate limiting
//! and friends) all need the same thing: a map from scope [`Hash`] to a
//! validated configuration snapshot, populated lazily from a
//! [`ScopedGetter`] and guarded by a read/write lock, with a default-scope
//! entry as the fallback of last resort. This module is that pattern, once,
//! generically.
//!
//! The default entry is seeded at construction and is never removed, only
//! overwritten; [`ScopeCache::invalidate`] clears the scoped map but leaves
//! the default in place.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::prelude::*;

/// A per-scope configuration snapshot a collaborator caches.
pub trait ScopedConfig: Clone + Send + Sync {
	/// The scope hash this snapshot was resolved for.
	fn scope_hash(&self) -> Hash;

	/// Whether the snapshot is usable. The error is propagated to lookups
	/// that end up falling back to an invalid default entry.
	fn validate(&self) -> CfgResult<()>;
}

/// Lazy population hook: builds a snapshot for a scope by reading through a
/// [`ScopedGetter`]. Explicit trait instead of an option-closure chain so
/// reconfiguration is plain data in, plain data out.
pub trait ConfigLoader<T: ScopedConfig>: Send + Sync {
	fn load(&self, getter: &dyn ScopedGetter) -> CfgResult<T>;
}

impl<T: ScopedConfig, F> ConfigLoader<T> for F
where
	F: Fn(&dyn ScopedGetter) -> CfgResult<T> + Send + Sync,
{
	fn load(&self, getter: &dyn ScopedGetter) -> CfgResult<T> {
		self(getter)
	}
}

pub struct ScopeCache<T: ScopedConfig> {
	default_config: RwLock<T>,
	cache: RwLock<HashMap<Hash, T>>,
	loader: Option<Box<dyn ConfigLoader<T>>>,
}

impl<T: ScopedConfig> std::fmt::Debug for ScopeCache<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ScopeCache")
			.field("entries", &self.cache.read().len())
			.field("loader", &self.loader.is_some())
			.finish()
	}
}

impl<T: ScopedConfig> ScopeCache<T> {
	/// Create the cache with its always-present default-scope entry.
	pub fn new(default_config: T) -> Self {
		Self {
			default_config: RwLock::new(default_config),
			cache: RwLock::new(HashMap::new()),
			loader: None,
		}
	}

	/// Attach the lazy population hook.
	pub fn with_loader(mut self, loader: impl ConfigLoader<T> + 'static) -> Self {
		self.loader = Some(Box::new(loader));
		self
	}

	/// Store a snapshot under its own scope hash.
	pub fn set(&self, config: T) {
		let hash = config.scope_hash();
		debug!("Caching scoped config for {}", hash);
		self.cache.write().insert(hash, config);
	}

	/// Overwrite the default-scope entry.
	pub fn set_default(&self, config: T) {
		*self.default_config.write() = config;
	}

	/// Drop every scoped entry. The default entry stays.
	pub fn invalidate(&self) {
		let mut cache = self.cache.write();
		info!("Invalidating {} scoped config entr(ies)", cache.len());
		cache.clear();
	}

	pub fn len(&self) -> usize {
		self.cache.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.cache.read().is_empty()
	}

	/// Shard index for callers that segment their own structures.
	pub fn segment_index(hash: Hash) -> u8 {
		hash.segment()
	}

	/// Look up the snapshot for the scope of `getter`, or the default-scope
	/// snapshot when no getter is supplied.
	///
	/// Lookup order: default fast path, cached entry, lazy load through the
	/// configured loader. An entry that exists for the hash but fails
	/// validation surfaces its own validity error; the fallback to the
	/// default entry is reserved for hashes with no entry at all. Only a
	/// cache with neither an entry nor a usable default fails with
	/// `NotFound`.
	pub fn config_by_scoped_getter(&self, getter: Option<&dyn ScopedGetter>) -> CfgResult<T> {
		let hash = match getter {
			Some(sg) => {
				let (scope, id) = sg.scope();
				Hash::new(scope, id)
			}
			None => Hash::DEFAULT,
		};

		if (self.loader.is_none() || getter.is_none()) && hash == Hash::DEFAULT {
			let default = self.default_config.read();
			if default.validate().is_ok() {
				return Ok(default.clone());
			}
		}

		// An invalid entry does not short-circuit here: the loader below may
		// replace it with a usable one.
		if let Some(Ok(config)) = self.lookup(hash) {
			return Ok(config);
		}

		if let (Some(loader), Some(sg)) = (&self.loader, getter) {
			let config = loader
				.load(sg)
				.map_err(|err| err.context(format!("loading scoped config for {}", hash)))?;
			self.set(config);
		}

		match self.lookup(hash) {
			Some(Ok(config)) => return Ok(config),
			// An entry exists for this hash but is unusable; the default
			// entry never papers over that.
			Some(Err(err)) => {
				return Err(err.context(format!("scoped config for {} is unusable", hash)));
			}
			None => {}
		}

		// No entry for the hash at all: fall back to the default entry
		let default = self.default_config.read();
		match default.validate() {
			Ok(()) => Ok(default.clone()),
			Err(err) => Err(Error::not_found(format!(
				"scoped config not found for {}; default entry unusable: {}",
				hash, err
			))),
		}
	}

	fn lookup(&self, hash: Hash) -> Option<CfgResult<T>> {
		let cache = self.cache.read();
		cache.get(&hash).map(|c| c.validate().map(|()| c.clone()))
	}
}


// vim: ts=4
