//! vaio-control library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does vaio-control do? (for beginners)
//!
//! Sony VAIO laptops expose a handful of firmware settings through the
//! `sony-laptop` kernel driver: battery charge limiting, keyboard backlight,
//! the ambient light sensor, lid resume behaviour, optical drive power and
//! the fan profile.  Each setting is one small file under
//! `/sys/devices/platform/sony-laptop/`.
//!
//! The control panel:
//!
//! 1. Reads every file once and shows its value (checkbox, radio button,
//!    slider position, or label).
//! 2. Writes the new value whenever the user changes a control.
//! 3. Re-reads the two ambient light readings every 500 ms.
//!
//! There is no daemon, cache, or background thread; the files are the only
//! state.

/// Application layer: the settings mirror use case and its ports.
pub mod application;

/// Infrastructure layer: sysfs adapter, UI bridge, config file.
pub mod infrastructure;

/// Console event loop driving the mirror.
pub mod event_loop;
