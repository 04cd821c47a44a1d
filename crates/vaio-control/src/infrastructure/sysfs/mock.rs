//! In-memory attribute store for tests and demo mode.
//!
//! # Why a mock store?
//!
//! The real attribute files only exist on a Sony VAIO running the
//! `sony-laptop` driver, and writing them changes the hardware.  The
//! `MockAttributeStore` keeps every attribute as a string in a map and records
//! each write so test assertions can inspect exactly what was written and in
//! what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let store = Arc::new(MockAttributeStore::with_values([(Attribute::LidControl, "3")]));
//! let mut mirror = SettingsMirror::new(store.clone());
//! // ... drive the mirror ...
//! assert_eq!(store.last_write(), Some((Attribute::LidControl, 2)));
//! ```
//!
//! # `fail_writes`
//!
//! Call `fail_writes(true)` to make every write return an I/O error, which
//! exercises the error path of callers without a read-only file system.

use std::collections::HashMap;
use std::sync::Mutex;

use vaio_core::Attribute;

use crate::application::settings_mirror::{AttributeError, AttributeStore};

/// A store that keeps attribute values in memory and records all writes.
#[derive(Default)]
pub struct MockAttributeStore {
    values: Mutex<HashMap<Attribute, String>>,
    writes: Mutex<Vec<(Attribute, i64)>>,
    fail_writes: Mutex<bool>,
}

impl MockAttributeStore {
    /// Creates an empty store: every attribute is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given raw file contents.
    pub fn with_values<'a>(values: impl IntoIterator<Item = (Attribute, &'a str)>) -> Self {
        let store = Self::new();
        for (attribute, raw) in values {
            store.set(attribute, raw);
        }
        store
    }

    /// A plausible VAIO Z-series tree used by `--demo`.
    pub fn demo() -> Self {
        Self::with_values([
            (Attribute::BatteryFastCharge, "0"),
            (Attribute::BatteryChargeLimiter, "1"),
            (Attribute::KeyboardBacklight, "1"),
            (Attribute::KeyboardBacklightTimeout, "0"),
            (Attribute::Touchpad, "1"),
            (Attribute::AlsPower, "1"),
            (Attribute::AlsLux, "212"),
            (Attribute::AlsKelvin, "4870"),
            (Attribute::LidControl, "2"),
            (Attribute::OpticalDevice, "1"),
            (Attribute::ThermalProfileCount, "3"),
            (Attribute::ThermalProfile, "0"),
        ])
    }

    /// Sets the raw content of an attribute, creating it if absent.
    pub fn set(&self, attribute: Attribute, raw: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(attribute, raw.to_string());
    }

    /// Removes an attribute so that it reads as missing.
    pub fn remove(&self, attribute: Attribute) {
        self.values.lock().unwrap().remove(&attribute);
    }

    /// All successful writes, oldest first.
    pub fn writes(&self) -> Vec<(Attribute, i64)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn last_write(&self) -> Option<(Attribute, i64)> {
        self.writes.lock().unwrap().last().copied()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }
}

impl AttributeStore for MockAttributeStore {
    fn exists(&self, attribute: Attribute) -> bool {
        self.values.lock().unwrap().contains_key(&attribute)
    }

    fn read_int(&self, attribute: Attribute) -> Result<i64, AttributeError> {
        let raw = self.read_str(attribute)?;
        raw.parse()
            .map_err(|_| AttributeError::Parse { attribute, raw })
    }

    fn read_str(&self, attribute: Attribute) -> Result<String, AttributeError> {
        self.values
            .lock()
            .unwrap()
            .get(&attribute)
            .map(|raw| raw.trim().to_string())
            .ok_or(AttributeError::Missing(attribute))
    }

    /// Stores the value so later reads observe it, then records the write.
    fn write_int(&self, attribute: Attribute, value: i64) -> Result<(), AttributeError> {
        if !attribute.is_writable() {
            return Err(AttributeError::ReadOnly(attribute));
        }
        if *self.fail_writes.lock().unwrap() {
            return Err(AttributeError::Io {
                attribute,
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "mock failure"),
            });
        }
        self.set(attribute, &value.to_string());
        self.writes.lock().unwrap().push((attribute, value));
        Ok(())
    }
}
