//! The fixed catalogue of hardware attributes.
//!
//! Each [`Attribute`] corresponds to exactly one pseudo-file published by the
//! `sony-laptop` platform driver.  The set is closed: the panel never discovers
//! attributes at runtime, it only checks whether the ones it knows about exist.

use serde::{Deserialize, Serialize};

/// Directory under which the `sony-laptop` driver publishes its attributes.
pub const DEFAULT_PLATFORM_DIR: &str = "/sys/devices/platform/sony-laptop";

/// How the value inside an attribute file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// `0` or `1`.
    Flag,
    /// A small ordinal such as a charge-limit level or a profile index.
    Enumerated,
    /// Several independent boolean settings packed into the bits of one integer.
    Bitmask,
    /// Driver-formatted text displayed verbatim (sensor readings, counts).
    ReadOnly,
}

/// One kernel-exposed hardware setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    BatteryFastCharge,
    BatteryChargeLimiter,
    KeyboardBacklight,
    KeyboardBacklightTimeout,
    Touchpad,
    AlsPower,
    AlsLux,
    AlsKelvin,
    LidControl,
    OpticalDevice,
    ThermalProfileCount,
    ThermalProfile,
}

impl Attribute {
    /// Every attribute, in the order the panel initialises them.
    pub const ALL: [Attribute; 12] = [
        Attribute::BatteryFastCharge,
        Attribute::BatteryChargeLimiter,
        Attribute::KeyboardBacklight,
        Attribute::KeyboardBacklightTimeout,
        Attribute::Touchpad,
        Attribute::AlsPower,
        Attribute::AlsLux,
        Attribute::AlsKelvin,
        Attribute::LidControl,
        Attribute::OpticalDevice,
        Attribute::ThermalProfileCount,
        Attribute::ThermalProfile,
    ];

    /// File name of the attribute relative to the platform directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Attribute::BatteryFastCharge => "battery_highspeed_charging",
            Attribute::BatteryChargeLimiter => "battery_care_limiter",
            Attribute::KeyboardBacklight => "kbd_backlight",
            Attribute::KeyboardBacklightTimeout => "kbd_backlight_timeout",
            Attribute::Touchpad => "touchpad",
            Attribute::AlsPower => "als_power",
            Attribute::AlsLux => "als_lux",
            Attribute::AlsKelvin => "als_kelvin",
            Attribute::LidControl => "lid_resume_control",
            Attribute::OpticalDevice => "odd_power",
            Attribute::ThermalProfileCount => "thermal_profiles",
            Attribute::ThermalProfile => "thermal_control",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::BatteryFastCharge
            | Attribute::KeyboardBacklight
            | Attribute::Touchpad
            | Attribute::AlsPower
            | Attribute::OpticalDevice => AttributeKind::Flag,
            Attribute::BatteryChargeLimiter
            | Attribute::KeyboardBacklightTimeout
            | Attribute::ThermalProfile => AttributeKind::Enumerated,
            Attribute::LidControl => AttributeKind::Bitmask,
            Attribute::AlsLux | Attribute::AlsKelvin | Attribute::ThermalProfileCount => {
                AttributeKind::ReadOnly
            }
        }
    }

    /// Returns `true` if the panel is allowed to write this attribute.
    pub fn is_writable(self) -> bool {
        self.kind() != AttributeKind::ReadOnly
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
