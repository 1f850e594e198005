pub use scopeconf_types::prelude::*;

// vim: ts=4
