//! Module payload handed back to the host.

pub(crate) mod module;

pub use module::EmitOpts;
