//! In-memory storage adapter.
//!
//! The default backing store for the configuration service: a plain map
//! guarded by a read/write lock, keyed by canonical path strings. Useful as
//! the always-available storage layer and as the backing store in tests;
//! persistent adapters implement the same [`Storage`] trait.

use parking_lot::RwLock;
use std::collections::HashMap;

use scopeconf::prelude::*;

#[derive(Debug, Default)]
pub struct MemoryStorage {
	data: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.data.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.read().is_empty()
	}
}

impl Storage for MemoryStorage {
	fn set(&self, key: &str, value: Value) -> CfgResult<()> {
		if key.is_empty() {
			return Err(Error::empty("storage key"));
		}
		debug!("memstorage set {} ({})", key, value.type_name());
		self.data.write().insert(key.to_string(), value);
		Ok(())
	}

	fn get(&self, key: &str) -> CfgResult<Option<Value>> {
		Ok(self.data.read().get(key).cloned())
	}

	fn keys(&self) -> CfgResult<Vec<String>> {
		Ok(self.data.read().keys().cloned().collect())
	}
}


// vim: ts=4
