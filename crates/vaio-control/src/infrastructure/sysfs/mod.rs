//! sysfs adapter: reads and writes the `sony-laptop` attribute files.
//!
//! The driver publishes each setting as a tiny text file.  Reading returns
//! the value followed by a newline (`"1\n"`); writing expects the decimal
//! value.  Every call opens the file, transfers a few bytes, and closes it
//! again, so there is nothing to keep open between events.
//!
//! # Root directory
//!
//! [`SysfsAttributeStore`] is rooted at a directory rather than hard-coding
//! `/sys/devices/platform/sony-laptop`.  The default comes from the config
//! file; integration tests point it at a temporary directory filled with
//! plain files that look exactly like the driver's.
//!
//! A [`mock::MockAttributeStore`] is always compiled (not guarded by
//! `#[cfg(test)]`) so the `--demo` mode and tests on any machine can use it.

use std::path::{Path, PathBuf};

use vaio_core::Attribute;

use crate::application::settings_mirror::{AttributeError, AttributeStore};

pub mod mock;

/// [`AttributeStore`] backed by files under a platform directory.
#[derive(Debug, Clone)]
pub struct SysfsAttributeStore {
    root: PathBuf,
}

impl SysfsAttributeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file backing `attribute`.
    pub fn path(&self, attribute: Attribute) -> PathBuf {
        self.root.join(attribute.file_name())
    }
}

impl AttributeStore for SysfsAttributeStore {
    fn exists(&self, attribute: Attribute) -> bool {
        self.path(attribute).exists()
    }

    fn read_int(&self, attribute: Attribute) -> Result<i64, AttributeError> {
        let raw = self.read_str(attribute)?;
        raw.parse()
            .map_err(|_| AttributeError::Parse { attribute, raw })
    }

    fn read_str(&self, attribute: Attribute) -> Result<String, AttributeError> {
        match std::fs::read_to_string(self.path(attribute)) {
            Ok(content) => Ok(content.trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AttributeError::Missing(attribute))
            }
            Err(source) => Err(AttributeError::Io { attribute, source }),
        }
    }

    fn write_int(&self, attribute: Attribute, value: i64) -> Result<(), AttributeError> {
        if !attribute.is_writable() {
            return Err(AttributeError::ReadOnly(attribute));
        }
        std::fs::write(self.path(attribute), value.to_string())
            .map_err(|source| AttributeError::Io { attribute, source })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vaio_sysfs_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_int_trims_driver_newline() {
        // Arrange
        let root = temp_root();
        std::fs::write(root.join("touchpad"), "1\n").unwrap();
        let store = SysfsAttributeStore::new(&root);

        // Act
        let value = store.read_int(Attribute::Touchpad);

        // Assert
        assert_eq!(value.unwrap(), 1);
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_read_missing_file_reports_missing() {
        let root = temp_root();
        let store = SysfsAttributeStore::new(&root);

        assert!(!store.exists(Attribute::KeyboardBacklight));
        assert!(matches!(
            store.read_int(Attribute::KeyboardBacklight),
            Err(AttributeError::Missing(Attribute::KeyboardBacklight))
        ));
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_read_int_rejects_non_numeric_content() {
        let root = temp_root();
        std::fs::write(root.join("thermal_profiles"), "three\n").unwrap();
        let store = SysfsAttributeStore::new(&root);

        let result = store.read_int(Attribute::ThermalProfileCount);

        assert!(matches!(result, Err(AttributeError::Parse { ref raw, .. }) if raw == "three"));
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_write_int_writes_decimal_text() {
        let root = temp_root();
        std::fs::write(root.join("lid_resume_control"), "3\n").unwrap();
        let store = SysfsAttributeStore::new(&root);

        store.write_int(Attribute::LidControl, 2).expect("write");

        let content = std::fs::read_to_string(root.join("lid_resume_control")).unwrap();
        assert_eq!(content, "2");
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_write_to_read_only_attribute_is_refused() {
        let root = temp_root();
        let store = SysfsAttributeStore::new(&root);

        let result = store.write_int(Attribute::AlsLux, 5);

        assert!(matches!(result, Err(AttributeError::ReadOnly(Attribute::AlsLux))));
        assert!(!root.join("als_lux").exists());
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_path_joins_root_and_file_name() {
        let store = SysfsAttributeStore::new("/sys/devices/platform/sony-laptop");
        assert_eq!(
            store.path(Attribute::OpticalDevice),
            PathBuf::from("/sys/devices/platform/sony-laptop/odd_power")
        );
    }
}
