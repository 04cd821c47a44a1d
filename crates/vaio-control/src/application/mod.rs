//! Application layer use cases for the control panel.
//!
//! # What use cases does the panel have?
//!
//! - **`settings_mirror`** – Binds each UI control to one hardware attribute:
//!   reads every attribute at start-up, writes the transformed value when the
//!   user changes a control, and refreshes the ambient-light readings on a
//!   timer.  File access and UI updates go through the `AttributeStore` and
//!   `SettingsView` traits, which the infrastructure layer implements.

pub mod settings_mirror;
