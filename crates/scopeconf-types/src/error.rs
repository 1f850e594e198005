//! Error taxonomy shared across the service and its adapters.
//!
//! Four kinds cover the whole boundary: `NotFound` (key absent at the exact
//! scope, recoverable by scope fallback), `NotValid` (malformed input, never
//! recoverable), `NotSupported` (operation invoked with a scope kind it does
//! not handle) and `Empty` (a required string argument was empty). Callers
//! are expected to test kinds through the predicates, not by matching
//! message strings, so wrapping with `context()` keeps the kind intact.

use std::fmt;

pub type CfgResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// Key absent at the requested exact scope
	NotFound(String),
	/// Malformed route, scope/ID combination or value kind
	NotValid(String),
	/// Operation does not support the requested scope kind
	NotSupported(String),
	/// Required string argument was empty
	Empty(String),
}

impl Error {
	pub fn not_found(msg: impl Into<String>) -> Self {
		Error::NotFound(msg.into())
	}

	pub fn not_valid(msg: impl Into<String>) -> Self {
		Error::NotValid(msg.into())
	}

	pub fn not_supported(msg: impl Into<String>) -> Self {
		Error::NotSupported(msg.into())
	}

	pub fn empty(msg: impl Into<String>) -> Self {
		Error::Empty(msg.into())
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Error::NotFound(_))
	}

	pub fn is_not_valid(&self) -> bool {
		matches!(self, Error::NotValid(_))
	}

	pub fn is_not_supported(&self) -> bool {
		matches!(self, Error::NotSupported(_))
	}

	pub fn is_empty_arg(&self) -> bool {
		matches!(self, Error::Empty(_))
	}

	/// Prefix the message with collaborator context while preserving the kind.
	pub fn context(self, prefix: impl AsRef<str>) -> Self {
		let prefix = prefix.as_ref();
		match self {
			Error::NotFound(msg) => Error::NotFound(format!("{}: {}", prefix, msg)),
			Error::NotValid(msg) => Error::NotValid(format!("{}: {}", prefix, msg)),
			Error::NotSupported(msg) => Error::NotSupported(format!("{}: {}", prefix, msg)),
			Error::Empty(msg) => Error::Empty(format!("{}: {}", prefix, msg)),
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound(msg) => write!(f, "not found: {}", msg),
			Error::NotValid(msg) => write!(f, "not valid: {}", msg),
			Error::NotSupported(msg) => write!(f, "not supported: {}", msg),
			Error::Empty(msg) => write!(f, "empty argument: {}", msg),
		}
	}
}

impl std::error::Error for Error {}


// vim: ts=4
