//! Typed accessor service over an untyped storage adapter.
//!
//! Implements the exact-scope [`Getter`] / [`Writer`] contracts: lookups key
//! the storage by the path's canonical string, absent keys fail with
//! `NotFound`, stored values of the wrong kind with `NotValid`. Scope
//! fallback lives one layer up, in [`crate::Scoped`].

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::prelude::*;
use crate::registry::DefaultRegistry;
use crate::scoped::Scoped;

#[derive(Clone)]
pub struct Service {
	storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for Service {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Service").field("storage", &self.storage).finish()
	}
}

impl Service {
	pub fn new(storage: Arc<dyn Storage>) -> Self {
		Self { storage }
	}

	/// Create a service and persist every registered default at Default
	/// scope. Values already present in the storage win over registry
	/// defaults so a warm store survives a restart unchanged.
	pub fn with_defaults(
		storage: Arc<dyn Storage>,
		defaults: DefaultRegistry,
	) -> CfgResult<Self> {
		let service = Self::new(storage);
		let entries = defaults.into_entries();
		info!("Applying {} configuration default(s)", entries.len());
		for (route, value) in entries {
			let path = Path::new(route);
			let key = path.to_string();
			if service.storage.get(&key)?.is_none() {
				service.storage.set(&key, value)?;
			}
		}
		Ok(service)
	}

	/// Scope-bound resolver over this service. The service is a thin handle
	/// around its storage, so the resolver holds a cheap clone.
	pub fn scoped(&self, website_id: i64, store_id: i64) -> Scoped {
		Scoped::new(Arc::new(self.clone()), website_id, store_id)
	}

	fn get_value(&self, path: &Path) -> CfgResult<Value> {
		let key = path.to_string();
		match self.storage.get(&key)? {
			Some(value) => Ok(value),
			None => Err(Error::not_found(format!("key {:?}", key))),
		}
	}
}

impl Getter for Service {
	fn get_string(&self, path: &Path) -> CfgResult<String> {
		self.get_value(path)?.into_str()
	}

	fn get_bool(&self, path: &Path) -> CfgResult<bool> {
		self.get_value(path)?.into_bool()
	}

	fn get_int(&self, path: &Path) -> CfgResult<i64> {
		self.get_value(path)?.into_int()
	}

	fn get_float(&self, path: &Path) -> CfgResult<f64> {
		self.get_value(path)?.into_float()
	}

	fn get_time(&self, path: &Path) -> CfgResult<DateTime<Utc>> {
		self.get_value(path)?.into_time()
	}

	fn get_bytes(&self, path: &Path) -> CfgResult<Vec<u8>> {
		self.get_value(path)?.into_bytes()
	}
}

impl Writer for Service {
	fn write(&self, path: &Path, value: Value) -> CfgResult<()> {
		let key = path.to_string();
		debug!("Writing {} = {:?}", key, value.type_name());
		self.storage.set(&key, value)
	}
}


// vim: ts=4
