//! Scope kinds and permission bit-sets.
//!
//! A scope is the granularity level at which a configuration value is bound.
//! The ordering expresses specificity: `Store > Group > Website > Default >
//! Absent`. Group is a logical scope used by some resolution logic but never
//! carries an ID of its own in a [`crate::Hash`].

use serde::{Deserialize, Serialize};
use std::fmt;

const STR_DEFAULT: &str = "default";
const STR_WEBSITES: &str = "websites";
const STR_STORES: &str = "stores";

/// Scope kind. The discriminants are load-bearing: they are packed into the
/// upper 8 bits of a [`crate::Hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Scope {
	#[serde(rename = "absent")]
	Absent = 0,
	#[serde(rename = "default")]
	Default = 1,
	#[serde(rename = "websites")]
	Website = 2,
	#[serde(rename = "group")]
	Group = 3,
	#[serde(rename = "stores")]
	Store = 4,
}

impl Scope {
	/// Parse a scope prefix string. Unrecognized input resolves to `Default`
	/// rather than erroring. This permissive behavior is deliberate graceful
	/// degradation inherited from the original storage format; use
	/// [`Scope::valid_str`] when strict rejection is needed.
	pub fn from_str_lossy(s: &str) -> Scope {
		match s {
			STR_WEBSITES => Scope::Website,
			STR_STORES => Scope::Store,
			_ => Scope::Default,
		}
	}

	/// Exact, case-sensitive check whether `s` is a known scope prefix.
	pub fn valid_str(s: &str) -> bool {
		matches!(s, STR_DEFAULT | STR_WEBSITES | STR_STORES)
	}

	/// Canonical prefix string. Absent and Group have no serialized form of
	/// their own and render as `"default"`.
	pub fn as_str(self) -> &'static str {
		match self {
			Scope::Website => STR_WEBSITES,
			Scope::Store => STR_STORES,
			Scope::Absent | Scope::Default | Scope::Group => STR_DEFAULT,
		}
	}

	/// Human readable name, used by [`Perm`] display and hash diagnostics.
	pub fn name(self) -> &'static str {
		match self {
			Scope::Absent => "Absent",
			Scope::Default => "Default",
			Scope::Website => "Website",
			Scope::Group => "Group",
			Scope::Store => "Store",
		}
	}

	pub(crate) fn from_u8(v: u8) -> Option<Scope> {
		match v {
			0 => Some(Scope::Absent),
			1 => Some(Scope::Default),
			2 => Some(Scope::Website),
			3 => Some(Scope::Group),
			4 => Some(Scope::Store),
			_ => None,
		}
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Validates the scope-level parent chain: default <- default,
/// website <- default, store <- website.
pub fn valid_parent(child: Scope, parent: Scope) -> bool {
	matches!(
		(child, parent),
		(Scope::Default, Scope::Default)
			| (Scope::Website, Scope::Default)
			| (Scope::Store, Scope::Website)
	)
}

/// Bit-set of scope kinds.
///
/// The forward sets (`DEFAULT`, `WEBSITE`, `STORE`) answer "which scopes may
/// a value at this level apply to". The reverse sets answer the resolver's
/// question "is level X reachable from the currently effective scope Y":
/// only a Store-scoped caller may read store rows, while both Store- and
/// Website-scoped callers may read website rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Perm(u8);

impl Perm {
	/// Default scope only
	pub const DEFAULT: Perm = Perm(1 << Scope::Default as u8);
	/// Default and Website scopes
	pub const WEBSITE: Perm = Perm(Self::DEFAULT.0 | 1 << Scope::Website as u8);
	/// Default, Website and Store scopes
	pub const STORE: Perm = Perm(Self::WEBSITE.0 | 1 << Scope::Store as u8);

	/// Store rows are reachable from Store scope only
	pub const STORE_REVERSE: Perm = Perm(1 << Scope::Store as u8);
	/// Website rows are reachable from Website and Store scope
	pub const WEBSITE_REVERSE: Perm = Perm(1 << Scope::Website as u8 | 1 << Scope::Store as u8);

	pub fn new() -> Perm {
		Perm(0)
	}

	/// Add scopes to the set, returning the extended set.
	pub fn set(self, scopes: &[Scope]) -> Perm {
		let mut bits = self.0;
		for s in scopes {
			bits |= 1 << *s as u8;
		}
		Perm(bits)
	}

	pub fn has(self, scope: Scope) -> bool {
		self.0 & (1 << scope as u8) != 0
	}

	/// Human readable names of the member scopes, most general first.
	pub fn human(self) -> Vec<&'static str> {
		[Scope::Default, Scope::Website, Scope::Group, Scope::Store]
			.into_iter()
			.filter(|s| self.has(*s))
			.map(Scope::name)
			.collect()
	}
}

impl fmt::Display for Perm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.human().join(","))
	}
}


// vim: ts=4
