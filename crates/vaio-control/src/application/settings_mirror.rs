//! SettingsMirror: keeps every panel control in step with its sysfs attribute.
//!
//! This use case sits at the application layer.  It reads and writes
//! attributes through an [`AttributeStore`] and pushes displayed state through
//! a [`SettingsView`]; both are traits so the same logic drives the real
//! sysfs tree, an in-memory fake, or a mock in unit tests.
//!
//! # Data flow (for beginners)
//!
//! ```text
//!  startup        initialize()      file ──read──► view
//!  user action    on_user_change()  view ──event──► transform ──write──► file
//!  every 500 ms   on_timer_tick()   als_lux / als_kelvin ──read──► labels
//! ```
//!
//! Reads fail soft: a missing or unreadable attribute is shown as `0` /
//! empty text and logged at `debug` level.  The only attribute whose absence
//! changes the panel is the keyboard backlight: without it, the backlight
//! checkbox and the timeout slider are disabled for the lifetime of the
//! mirror.
//!
//! # Lid bitmask
//!
//! The two lid checkboxes share one file.  Each change re-reads the file,
//! flips its own bit, and writes the whole value back.  The mirror never
//! keeps a cached copy, so a change made by another program between two
//! clicks is preserved (apart from the usual read-modify-write race, which is
//! not guarded against).

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use vaio_core::{
    Attribute, BatteryProtection, CheckState, Control, DomainError, KeyboardTimeout, Label,
    LidBit, RadioGroup, ThermalProfile,
};

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Error type for attribute file access.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The attribute file does not exist on this machine.
    #[error("attribute {0} is not available")]
    Missing(Attribute),

    /// Reading or writing the attribute file failed.
    #[error("I/O error on attribute {attribute}: {source}")]
    Io {
        attribute: Attribute,
        #[source]
        source: std::io::Error,
    },

    /// The attribute content is not a decimal integer.
    #[error("attribute {attribute} holds non-numeric value {raw:?}")]
    Parse { attribute: Attribute, raw: String },

    /// A write was attempted on a read-only attribute.
    #[error("attribute {0} is read-only")]
    ReadOnly(Attribute),
}

/// Access to the kernel-exposed attribute files.
///
/// The production implementation lives in `infrastructure::sysfs`; tests use
/// `MockAttributeStore` from the same module.
pub trait AttributeStore: Send + Sync {
    /// Returns `true` if the attribute file exists.
    fn exists(&self, attribute: Attribute) -> bool;

    /// Reads the attribute as a decimal integer.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError`] if the file is missing, unreadable, or not numeric.
    fn read_int(&self, attribute: Attribute) -> Result<i64, AttributeError>;

    /// Reads the attribute as text with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError`] if the file is missing or unreadable.
    fn read_str(&self, attribute: Attribute) -> Result<String, AttributeError>;

    /// Writes `value` to the attribute in one synchronous call.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError`] if the attribute is read-only or the write fails.
    fn write_int(&self, attribute: Attribute, value: i64) -> Result<(), AttributeError>;
}

/// The setter half of the UI: how the mirror changes what the user sees.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsView {
    fn set_checked(&mut self, control: Control, checked: bool);
    fn set_enabled(&mut self, control: Control, enabled: bool);
    /// Marks the button with `id` as the selected one in `group`.
    fn select(&mut self, group: RadioGroup, id: i64);
    /// Moves the keyboard timeout slider.
    fn set_slider(&mut self, value: i64);
    fn set_label(&mut self, label: Label, text: &str);
}

// ── Events and errors ─────────────────────────────────────────────────────────

/// A user interaction with one control, carrying the toolkit's raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A checkbox reported a new tri-state value (0, 1 or 2).
    CheckboxChanged { control: Control, state: i32 },
    /// A radio button with the given id was clicked.
    RadioClicked { group: RadioGroup, id: i64 },
    /// The keyboard timeout slider moved to a new position.
    SliderMoved { value: i64 },
}

/// Error type for user-driven changes.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The control is disabled; nothing was written.
    #[error("{0:?} is disabled on this machine")]
    ControlDisabled(Control),

    /// The event does not make sense for the control it names.
    #[error("{0:?} is not a checkbox")]
    NotACheckbox(Control),

    /// The radio group has no button with this id.
    #[error("{group:?} has no button with id {id}")]
    UnknownRadioId { group: RadioGroup, id: i64 },

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Writing the attribute failed.
    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

// ── Use case ──────────────────────────────────────────────────────────────────

/// Binds the panel controls to their attributes.
pub struct SettingsMirror {
    store: Arc<dyn AttributeStore>,
    /// Controls disabled at initialisation.  Never re-evaluated.
    disabled: BTreeSet<Control>,
    /// Number of thermal profiles reported at initialisation.
    profile_count: i64,
    /// The timeout slider follows the backlight checkbox.
    slider_enabled: bool,
}

impl SettingsMirror {
    pub fn new(store: Arc<dyn AttributeStore>) -> Self {
        Self {
            store,
            disabled: BTreeSet::new(),
            profile_count: 0,
            slider_enabled: true,
        }
    }

    /// Returns `false` for controls that initialisation disabled, and for the
    /// timeout slider while the keyboard backlight is off.
    pub fn is_enabled(&self, control: Control) -> bool {
        if control == Control::KeyboardTimeout && !self.slider_enabled {
            return false;
        }
        !self.disabled.contains(&control)
    }

    /// Thermal profile count read by [`SettingsMirror::initialize`].
    pub fn profile_count(&self) -> i64 {
        self.profile_count
    }

    /// Reads every attribute once and pushes its displayed state to `view`.
    ///
    /// Never writes an attribute.
    pub fn initialize(&mut self, view: &mut dyn SettingsView) {
        self.disabled.clear();

        // Battery
        self.show_flag(view, Control::BatteryFastCharge);
        if let Some(level) = BatteryProtection::from_id(self.read_int(Attribute::BatteryChargeLimiter)) {
            view.select(RadioGroup::BatteryProtection, level.id());
        }

        // Keyboard backlight
        if self.store.exists(Attribute::KeyboardBacklight) {
            let backlight = self.show_flag(view, Control::KeyboardBacklight);
            self.slider_enabled = backlight;
            view.set_enabled(Control::KeyboardTimeout, backlight);

            let timeout = self.read_int(Attribute::KeyboardBacklightTimeout);
            view.set_slider(timeout);
            let text = KeyboardTimeout::from_ordinal(timeout)
                .map(KeyboardTimeout::label)
                .unwrap_or_default();
            view.set_label(Label::KeyboardTimeout, text);
        } else {
            info!("keyboard backlight not available; disabling its controls");
            self.slider_enabled = false;
            for control in [Control::KeyboardBacklight, Control::KeyboardTimeout] {
                self.disabled.insert(control);
                view.set_enabled(control, false);
            }
        }

        self.show_flag(view, Control::Touchpad);
        self.show_flag(view, Control::AlsPower);

        let lid = self.read_int(Attribute::LidControl);
        show_lid_bits(view, lid);

        self.show_flag(view, Control::OpticalDevice);

        // Thermal
        self.profile_count = self.read_int(Attribute::ThermalProfileCount);
        if !ThermalProfile::Silent.is_offered(self.profile_count) {
            self.disabled.insert(Control::ThermalSilent);
            view.set_enabled(Control::ThermalSilent, false);
        }
        if let Some(profile) = ThermalProfile::from_id(self.read_int(Attribute::ThermalProfile)) {
            view.select(RadioGroup::Thermal, profile.id());
        }

        self.refresh_als(view);

        debug!(
            "settings mirror initialised ({} profiles, {} disabled controls)",
            self.profile_count,
            self.disabled.len()
        );
    }

    /// Applies one user interaction: transforms the raw value and writes the
    /// result to the bound attribute.  After a successful write the view
    /// shows the new state; on error it is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError`] if the control is disabled, the event carries a
    /// value the control does not accept, or the write fails.  In every error
    /// case at most one write has been attempted.
    pub fn on_user_change(
        &mut self,
        event: UiEvent,
        view: &mut dyn SettingsView,
    ) -> Result<(), MirrorError> {
        match event {
            UiEvent::CheckboxChanged { control, state } => {
                self.ensure_enabled(control)?;
                let state = CheckState::from_raw(state);
                if let Some(bit) = LidBit::for_control(control) {
                    let lid = self.toggle_lid_bit(bit, state)?;
                    show_lid_bits(view, lid);
                    return Ok(());
                }
                match control {
                    Control::BatteryFastCharge
                    | Control::KeyboardBacklight
                    | Control::Touchpad
                    | Control::AlsPower
                    | Control::OpticalDevice => {}
                    other => return Err(MirrorError::NotACheckbox(other)),
                }
                self.write(control.attribute(), state.to_flag())?;
                view.set_checked(control, state.is_checked());
                if control == Control::KeyboardBacklight {
                    self.slider_enabled = state.is_checked();
                    view.set_enabled(Control::KeyboardTimeout, self.slider_enabled);
                }
                Ok(())
            }

            UiEvent::RadioClicked { group, id } => {
                let control = group
                    .control_for(id)
                    .ok_or(MirrorError::UnknownRadioId { group, id })?;
                self.ensure_enabled(control)?;
                if group == RadioGroup::Thermal {
                    // The profile count is re-read on every click.
                    let profiles = self.read_int(Attribute::ThermalProfileCount);
                    if id >= profiles {
                        debug!("thermal profile {id} not offered ({profiles} profiles)");
                        return Ok(());
                    }
                }
                self.write(group.attribute(), id)?;
                view.select(group, id);
                Ok(())
            }

            UiEvent::SliderMoved { value } => {
                self.ensure_enabled(Control::KeyboardTimeout)?;
                let timeout = KeyboardTimeout::from_ordinal(value)?;
                self.write(Attribute::KeyboardBacklightTimeout, timeout.ordinal())?;
                view.set_slider(timeout.ordinal());
                view.set_label(Label::KeyboardTimeout, timeout.label());
                Ok(())
            }
        }
    }

    /// Periodic refresh of the ambient-light readings.  Never writes.
    pub fn on_timer_tick(&self, view: &mut dyn SettingsView) {
        self.refresh_als(view);
    }

    fn refresh_als(&self, view: &mut dyn SettingsView) {
        view.set_label(Label::AlsLux, &self.read_str(Attribute::AlsLux));
        view.set_label(Label::AlsKelvin, &self.read_str(Attribute::AlsKelvin));
    }

    /// Re-reads the lid mask, flips `bit`, and returns the mask written.
    fn toggle_lid_bit(&self, bit: LidBit, state: CheckState) -> Result<i64, MirrorError> {
        let current = self.read_int(Attribute::LidControl);
        let updated = bit.apply(current, state.is_checked());
        self.write(Attribute::LidControl, updated)?;
        Ok(updated)
    }

    /// Reads a flag attribute into its checkbox and returns the shown state.
    fn show_flag(&self, view: &mut dyn SettingsView, control: Control) -> bool {
        let checked = CheckState::from_flag(self.read_int(control.attribute())).is_checked();
        view.set_checked(control, checked);
        checked
    }

    fn ensure_enabled(&self, control: Control) -> Result<(), MirrorError> {
        if self.is_enabled(control) {
            Ok(())
        } else {
            Err(MirrorError::ControlDisabled(control))
        }
    }

    fn read_int(&self, attribute: Attribute) -> i64 {
        self.store.read_int(attribute).unwrap_or_else(|e| {
            debug!("{e}; using 0");
            0
        })
    }

    fn read_str(&self, attribute: Attribute) -> String {
        self.store.read_str(attribute).unwrap_or_else(|e| {
            debug!("{e}; showing empty text");
            String::new()
        })
    }

    fn write(&self, attribute: Attribute, value: i64) -> Result<(), MirrorError> {
        match self.store.write_int(attribute, value) {
            Ok(()) => {
                info!("{attribute} <- {value}");
                Ok(())
            }
            Err(e) => {
                warn!("write of {value} to {attribute} failed: {e}");
                Err(e.into())
            }
        }
    }
}

fn show_lid_bits(view: &mut dyn SettingsView, lid: i64) {
    for bit in [LidBit::S3, LidBit::S4] {
        view.set_checked(bit.control(), bit.is_set(lid));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
