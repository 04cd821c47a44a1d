//! UI control identifiers and the transforms between UI state and file values.
//!
//! Every control on the panel mirrors exactly one [`Attribute`].  The
//! transforms here are the only place where UI conventions (tri-state
//! checkboxes, radio ids, slider positions) meet the driver's integer
//! encoding.
//!
//! # Tri-state checkboxes (for beginners)
//!
//! Desktop toolkits report a checkbox change as an integer state:
//! `0` = unchecked, `1` = partially checked, `2` = checked.  The driver only
//! understands `0` and `1`, so [`CheckState::to_flag`] collapses the three
//! states: only a fully checked box turns the feature on.
//!
//! # The lid bitmask
//!
//! `lid_resume_control` packs two independent settings into one integer:
//!
//! ```text
//! bit value 2  →  resume from S3 (suspend-to-RAM) when the lid opens
//! bit value 1  →  resume from S4 (hibernate) when the lid opens
//! ```
//!
//! Each checkbox owns one bit and must leave the other untouched, so writes go
//! through [`LidBit::apply`] against a freshly read mask.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::attribute::Attribute;

/// Period of the ambient-light sensor refresh, in milliseconds.
pub const ALS_POLL_INTERVAL_MS: u64 = 500;

/// Error type for values that have no meaning in the domain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A raw UI or file value fell outside the range a control accepts.
    #[error("{what} value {value} is out of range")]
    OutOfRange { what: &'static str, value: i64 },
}

// ── Checkbox state ────────────────────────────────────────────────────────────

/// State reported by a tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    Unchecked = 0,
    PartiallyChecked = 1,
    Checked = 2,
}

impl CheckState {
    /// Interprets a raw toolkit state.  Unknown values count as unchecked.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            2 => CheckState::Checked,
            1 => CheckState::PartiallyChecked,
            _ => CheckState::Unchecked,
        }
    }

    /// Builds the displayed state from a file flag (non-zero means on).
    pub fn from_flag(value: i64) -> Self {
        if value != 0 {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }

    /// Value the driver expects: `1` only for a fully checked box.
    pub fn to_flag(self) -> i64 {
        match self {
            CheckState::Checked => 1,
            CheckState::Unchecked | CheckState::PartiallyChecked => 0,
        }
    }

    pub fn is_checked(self) -> bool {
        self == CheckState::Checked
    }
}

// ── Control identifiers ───────────────────────────────────────────────────────

/// Every interactive control on the panel.
///
/// Radio buttons are listed individually because each one can be enabled or
/// disabled on its own (the silent thermal profile, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Control {
    BatteryFastCharge,
    ProtectionNone,
    ProtectionMedium,
    ProtectionMax,
    KeyboardBacklight,
    KeyboardTimeout,
    Touchpad,
    AlsPower,
    LidS3,
    LidS4,
    OpticalDevice,
    ThermalBalanced,
    ThermalPerformance,
    ThermalSilent,
}

impl Control {
    pub const ALL: [Control; 14] = [
        Control::BatteryFastCharge,
        Control::ProtectionNone,
        Control::ProtectionMedium,
        Control::ProtectionMax,
        Control::KeyboardBacklight,
        Control::KeyboardTimeout,
        Control::Touchpad,
        Control::AlsPower,
        Control::LidS3,
        Control::LidS4,
        Control::OpticalDevice,
        Control::ThermalBalanced,
        Control::ThermalPerformance,
        Control::ThermalSilent,
    ];

    /// The attribute this control reads from and writes to.
    pub fn attribute(self) -> Attribute {
        match self {
            Control::BatteryFastCharge => Attribute::BatteryFastCharge,
            Control::ProtectionNone | Control::ProtectionMedium | Control::ProtectionMax => {
                Attribute::BatteryChargeLimiter
            }
            Control::KeyboardBacklight => Attribute::KeyboardBacklight,
            Control::KeyboardTimeout => Attribute::KeyboardBacklightTimeout,
            Control::Touchpad => Attribute::Touchpad,
            Control::AlsPower => Attribute::AlsPower,
            Control::LidS3 | Control::LidS4 => Attribute::LidControl,
            Control::OpticalDevice => Attribute::OpticalDevice,
            Control::ThermalBalanced | Control::ThermalPerformance | Control::ThermalSilent => {
                Attribute::ThermalProfile
            }
        }
    }

    /// Human-readable caption used by text front ends.
    pub fn caption(self) -> &'static str {
        match self {
            Control::BatteryFastCharge => "Fast charging",
            Control::ProtectionNone => "No battery protection",
            Control::ProtectionMedium => "Medium battery protection (80%)",
            Control::ProtectionMax => "Maximum battery protection (50%)",
            Control::KeyboardBacklight => "Keyboard backlight",
            Control::KeyboardTimeout => "Backlight timeout",
            Control::Touchpad => "Touchpad",
            Control::AlsPower => "Ambient light sensor",
            Control::LidS3 => "Resume from suspend on lid open",
            Control::LidS4 => "Resume from hibernation on lid open",
            Control::OpticalDevice => "Optical drive power",
            Control::ThermalBalanced => "Balanced",
            Control::ThermalPerformance => "Performance",
            Control::ThermalSilent => "Silent",
        }
    }
}

/// Groups of mutually exclusive radio buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RadioGroup {
    BatteryProtection,
    Thermal,
}

impl RadioGroup {
    pub fn attribute(self) -> Attribute {
        match self {
            RadioGroup::BatteryProtection => Attribute::BatteryChargeLimiter,
            RadioGroup::Thermal => Attribute::ThermalProfile,
        }
    }

    /// Maps a button id to its control, or `None` for an id the group lacks.
    pub fn control_for(self, id: i64) -> Option<Control> {
        match self {
            RadioGroup::BatteryProtection => BatteryProtection::from_id(id).map(|p| p.control()),
            RadioGroup::Thermal => ThermalProfile::from_id(id).map(|p| p.control()),
        }
    }
}

/// Read-only text outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    KeyboardTimeout,
    AlsLux,
    AlsKelvin,
}

// ── Enumerated values ─────────────────────────────────────────────────────────

/// Battery charge limiter level (`battery_care_limiter`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryProtection {
    None = 0,
    Medium = 1,
    Max = 2,
}

impl BatteryProtection {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(BatteryProtection::None),
            1 => Some(BatteryProtection::Medium),
            2 => Some(BatteryProtection::Max),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn control(self) -> Control {
        match self {
            BatteryProtection::None => Control::ProtectionNone,
            BatteryProtection::Medium => Control::ProtectionMedium,
            BatteryProtection::Max => Control::ProtectionMax,
        }
    }
}

/// Fan / thermal profile (`thermal_control`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalProfile {
    Balanced = 0,
    Performance = 1,
    Silent = 2,
}

impl ThermalProfile {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(ThermalProfile::Balanced),
            1 => Some(ThermalProfile::Performance),
            2 => Some(ThermalProfile::Silent),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn control(self) -> Control {
        match self {
            ThermalProfile::Balanced => Control::ThermalBalanced,
            ThermalProfile::Performance => Control::ThermalPerformance,
            ThermalProfile::Silent => Control::ThermalSilent,
        }
    }

    /// Returns `true` if the firmware reporting `profile_count` profiles
    /// supports this one.  Profiles are numbered from zero, so the ordinal
    /// must be strictly below the count.
    pub fn is_offered(self, profile_count: i64) -> bool {
        self.id() < profile_count
    }
}

/// Keyboard backlight timeout (`kbd_backlight_timeout`), one slider position each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardTimeout {
    TenSeconds = 0,
    ThirtySeconds = 1,
    SixtySeconds = 2,
    AlwaysOn = 3,
}

impl KeyboardTimeout {
    /// Slider range is `0..=MAX_ORDINAL`.
    pub const MAX_ORDINAL: i64 = 3;

    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] for positions the slider does not have.
    pub fn from_ordinal(value: i64) -> Result<Self, DomainError> {
        match value {
            0 => Ok(KeyboardTimeout::TenSeconds),
            1 => Ok(KeyboardTimeout::ThirtySeconds),
            2 => Ok(KeyboardTimeout::SixtySeconds),
            3 => Ok(KeyboardTimeout::AlwaysOn),
            _ => Err(DomainError::OutOfRange {
                what: "keyboard timeout",
                value,
            }),
        }
    }

    pub fn ordinal(self) -> i64 {
        self as i64
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyboardTimeout::TenSeconds => "10 seconds",
            KeyboardTimeout::ThirtySeconds => "30 seconds",
            KeyboardTimeout::SixtySeconds => "60 seconds",
            KeyboardTimeout::AlwaysOn => "Always on",
        }
    }
}

// ── Lid bitmask ───────────────────────────────────────────────────────────────

/// One bit of `lid_resume_control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LidBit {
    S3,
    S4,
}

impl LidBit {
    pub fn mask(self) -> i64 {
        match self {
            LidBit::S3 => 2,
            LidBit::S4 => 1,
        }
    }

    pub fn is_set(self, bitmask: i64) -> bool {
        bitmask & self.mask() != 0
    }

    /// Sets or clears this bit in `bitmask`, leaving every other bit as-is.
    pub fn apply(self, bitmask: i64, enabled: bool) -> i64 {
        if enabled {
            bitmask | self.mask()
        } else {
            bitmask & !self.mask()
        }
    }

    pub fn control(self) -> Control {
        match self {
            LidBit::S3 => Control::LidS3,
            LidBit::S4 => Control::LidS4,
        }
    }

    pub fn for_control(control: Control) -> Option<Self> {
        match control {
            Control::LidS3 => Some(LidBit::S3),
            Control::LidS4 => Some(LidBit::S4),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
