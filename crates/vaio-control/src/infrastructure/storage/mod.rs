//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the XDG config
//! directory, writes it back, and supplies defaults when no file exists yet
//! (first run).  The attribute files themselves are not "storage" in this
//! sense; they belong to the `sysfs` adapter.

pub mod config;
