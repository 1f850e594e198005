//! Shared primitives and adapter traits for the scopeconf configuration service.
//!
//! This crate contains the foundational types that are shared between the
//! core service crate and all storage adapter implementations: scope and
//! permission primitives, the packed scope hash, validated configuration
//! paths, the closed value union, the error taxonomy and the storage /
//! getter / writer contracts.

pub mod error;
pub mod hash;
pub mod path;
pub mod prelude;
pub mod scope;
pub mod storage;
pub mod value;

pub use error::{CfgResult, Error};
pub use hash::Hash;
pub use path::{Path, Route};
pub use scope::{Perm, Scope};
pub use storage::{Getter, ScopedError, ScopedGetter, ScopedResult, Storage, Writer};
pub use value::Value;

// vim: ts=4
