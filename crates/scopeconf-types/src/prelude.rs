pub use crate::error::{CfgResult, Error};
pub use crate::hash::Hash;
pub use crate::path::{Path, Route};
pub use crate::scope::{Perm, Scope};
pub use crate::storage::{Getter, ScopedError, ScopedGetter, ScopedResult, Storage, Writer};
pub use crate::value::Value;

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
