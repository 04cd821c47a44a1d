//! Infrastructure layer for the control panel.
//!
//! Contains the OS-facing adapters behind the application-layer ports.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `vaio_core`, but MUST NOT be imported by the `application` layer (tests
//! excepted).
//!
//! # Sub-modules
//!
//! - **`sysfs`** – `SysfsAttributeStore`, the `AttributeStore` that reads and
//!   writes the `sony-laptop` files, plus `MockAttributeStore` for tests and
//!   demo mode.
//!
//! - **`ui_bridge`** – `PanelState`, the `SettingsView` used by the console
//!   front end, its JSON snapshot DTO, and the console command parser.
//!
//! - **`storage`** – TOML configuration file.

pub mod storage;
pub mod sysfs;
pub mod ui_bridge;
