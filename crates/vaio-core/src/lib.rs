//! # vaio-core
//!
//! Shared domain library for the VAIO control panel.  It names every
//! hardware attribute the `sony-laptop` kernel driver exposes, every UI
//! control that mirrors one of them, and the small value transforms that
//! convert between what the panel displays and what the driver expects.
//!
//! This crate has zero dependencies on the file system, UI toolkits, or async
//! runtimes.  Everything here is a pure function of its inputs, so the rules
//! can be tested on any machine, VAIO or not.
//!
//! # Architecture overview (for beginners)
//!
//! The driver publishes one small text file per setting under
//! `/sys/devices/platform/sony-laptop/`.  Writing `1` to `touchpad` turns the
//! touchpad on; reading `thermal_profiles` tells you how many fan profiles the
//! firmware supports.  The control panel is little more than a mirror of
//! those files:
//!
//! - **`domain::attribute`** – The fixed catalogue of files ([`Attribute`]),
//!   what kind of value each one holds, and whether it may be written.
//!
//! - **`domain::controls`** – The UI side: checkbox / radio / slider / label
//!   identifiers plus the transforms (tri-state → flag, lid bit set/clear,
//!   thermal profile gating, keyboard timeout labels).

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `vaio_core::Attribute` instead of `vaio_core::domain::attribute::Attribute`.
pub use domain::attribute::{Attribute, AttributeKind, DEFAULT_PLATFORM_DIR};
pub use domain::controls::{
    BatteryProtection, CheckState, Control, DomainError, KeyboardTimeout, Label, LidBit,
    RadioGroup, ThermalProfile, ALS_POLL_INTERVAL_MS,
};
