//! UI bridge: the panel state seen by the user and the commands that change it.
//!
//! The application layer talks to the UI only through the
//! [`SettingsView`] trait.  This module provides the implementation used by
//! the console front end:
//!
//! - [`PanelState`] – an in-memory snapshot of every control (checked,
//!   enabled, selected radio id, slider position, label text).  It renders as
//!   a text panel and converts to [`PanelSnapshotDto`] for `status --json`.
//! - [`command`] – parses typed console lines into [`UiEvent`]s.
//!
//! # DTOs (Data Transfer Objects)
//!
//! `PanelState` is keyed by domain enums; the DTO flattens it into plain
//! strings and numbers so it can be serialized for scripts:
//!
//! ```json
//! { "controls": [{ "control": "Touchpad", "checked": true, "enabled": true }],
//!   "battery_protection": 1, "thermal_profile": 0, "keyboard_timeout": 2,
//!   "labels": { "AlsLux": "212" } }
//! ```
//!
//! [`UiEvent`]: crate::application::settings_mirror::UiEvent

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use vaio_core::{Control, Label, RadioGroup};

use crate::application::settings_mirror::SettingsView;

pub mod command;

// ── Panel state ───────────────────────────────────────────────────────────────

/// Displayed state of every control on the panel.
///
/// Controls start enabled and unchecked; the mirror fills in the rest during
/// initialisation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    checked: BTreeMap<Control, bool>,
    disabled: BTreeSet<Control>,
    selections: BTreeMap<RadioGroup, i64>,
    slider: i64,
    labels: BTreeMap<Label, String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked(&self, control: Control) -> bool {
        self.checked.get(&control).copied().unwrap_or(false)
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        !self.disabled.contains(&control)
    }

    /// Id of the selected button in `group`, if any is selected.
    pub fn selected(&self, group: RadioGroup) -> Option<i64> {
        self.selections.get(&group).copied()
    }

    pub fn slider(&self) -> i64 {
        self.slider
    }

    /// Current text of `label` (empty until first set).
    pub fn label(&self, label: Label) -> &str {
        self.labels.get(&label).map(String::as_str).unwrap_or("")
    }

    /// Renders the panel as a block of text for the console front end.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Battery");
        self.render_checkbox(&mut out, Control::BatteryFastCharge, "fast-charge");
        self.render_radios(
            &mut out,
            RadioGroup::BatteryProtection,
            &[
                (Control::ProtectionNone, 0),
                (Control::ProtectionMedium, 1),
                (Control::ProtectionMax, 2),
            ],
            "protection",
        );

        let _ = writeln!(out, "Keyboard");
        self.render_checkbox(&mut out, Control::KeyboardBacklight, "backlight");
        let _ = writeln!(
            out,
            "  {} {}: {} [{}/3]{}   (timeout)",
            if self.is_enabled(Control::KeyboardTimeout) { "<>" } else { "--" },
            Control::KeyboardTimeout.caption(),
            self.label(Label::KeyboardTimeout),
            self.slider,
            disabled_suffix(self.is_enabled(Control::KeyboardTimeout)),
        );

        let _ = writeln!(out, "Input & sensors");
        self.render_checkbox(&mut out, Control::Touchpad, "touchpad");
        self.render_checkbox(&mut out, Control::AlsPower, "als");
        let _ = writeln!(
            out,
            "      Illuminance: {} lx   Colour temperature: {} K",
            self.label(Label::AlsLux),
            self.label(Label::AlsKelvin)
        );

        let _ = writeln!(out, "Lid & drives");
        self.render_checkbox(&mut out, Control::LidS3, "lid-s3");
        self.render_checkbox(&mut out, Control::LidS4, "lid-s4");
        self.render_checkbox(&mut out, Control::OpticalDevice, "optical");

        let _ = writeln!(out, "Thermal profile");
        self.render_radios(
            &mut out,
            RadioGroup::Thermal,
            &[
                (Control::ThermalBalanced, 0),
                (Control::ThermalPerformance, 1),
                (Control::ThermalSilent, 2),
            ],
            "thermal",
        );

        out
    }

    /// Flattens the panel into a serializable snapshot.
    pub fn to_dto(&self) -> PanelSnapshotDto {
        let controls = Control::ALL
            .iter()
            .map(|&control| ControlDto {
                control: format!("{control:?}"),
                checked: self.displays_checked(control),
                enabled: self.is_enabled(control),
            })
            .collect();

        PanelSnapshotDto {
            controls,
            battery_protection: self.selected(RadioGroup::BatteryProtection),
            thermal_profile: self.selected(RadioGroup::Thermal),
            keyboard_timeout: self.slider,
            labels: self
                .labels
                .iter()
                .map(|(label, text)| (format!("{label:?}"), text.clone()))
                .collect(),
        }
    }

    /// Checkbox state, or "is the selected button" for radio buttons.
    fn displays_checked(&self, control: Control) -> bool {
        [RadioGroup::BatteryProtection, RadioGroup::Thermal]
            .into_iter()
            .find_map(|group| {
                let id = self.selected(group)?;
                (group.control_for(id)? == control).then_some(true)
            })
            .unwrap_or_else(|| self.is_checked(control))
    }

    fn render_checkbox(&self, out: &mut String, control: Control, command: &str) {
        let enabled = self.is_enabled(control);
        let mark = match (enabled, self.is_checked(control)) {
            (false, _) => "[-]",
            (true, true) => "[x]",
            (true, false) => "[ ]",
        };
        let _ = writeln!(
            out,
            "  {mark} {}{}   ({command})",
            control.caption(),
            disabled_suffix(enabled)
        );
    }

    fn render_radios(
        &self,
        out: &mut String,
        group: RadioGroup,
        buttons: &[(Control, i64)],
        command: &str,
    ) {
        let selected = self.selected(group);
        let mut line = String::from(" ");
        for &(control, id) in buttons {
            let mark = if !self.is_enabled(control) {
                "(-)"
            } else if selected == Some(id) {
                "(*)"
            } else {
                "( )"
            };
            let _ = write!(line, " {mark} {}", control.caption());
        }
        let _ = writeln!(out, "{line}   ({command})");
    }
}

fn disabled_suffix(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " (unavailable)"
    }
}

impl SettingsView for PanelState {
    fn set_checked(&mut self, control: Control, checked: bool) {
        self.checked.insert(control, checked);
    }

    fn set_enabled(&mut self, control: Control, enabled: bool) {
        if enabled {
            self.disabled.remove(&control);
        } else {
            self.disabled.insert(control);
        }
    }

    fn select(&mut self, group: RadioGroup, id: i64) {
        self.selections.insert(group, id);
    }

    fn set_slider(&mut self, value: i64) {
        self.slider = value;
    }

    fn set_label(&mut self, label: Label, text: &str) {
        self.labels.insert(label, text.to_string());
    }
}

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// Displayed state of one control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlDto {
    pub control: String,
    pub checked: bool,
    pub enabled: bool,
}

/// Full panel snapshot returned by `vaio-control status --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelSnapshotDto {
    pub controls: Vec<ControlDto>,
    pub battery_protection: Option<i64>,
    pub thermal_profile: Option<i64>,
    pub keyboard_timeout: i64,
    pub labels: BTreeMap<String, String>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_has_every_control_enabled_and_unchecked() {
        let panel = PanelState::new();
        for control in Control::ALL {
            assert!(panel.is_enabled(control));
            assert!(!panel.is_checked(control));
        }
        assert_eq!(panel.selected(RadioGroup::Thermal), None);
    }

    #[test]
    fn test_set_enabled_round_trips() {
        let mut panel = PanelState::new();

        panel.set_enabled(Control::ThermalSilent, false);
        assert!(!panel.is_enabled(Control::ThermalSilent));

        panel.set_enabled(Control::ThermalSilent, true);
        assert!(panel.is_enabled(Control::ThermalSilent));
    }

    #[test]
    fn test_render_marks_checked_disabled_and_selected_controls() {
        // Arrange
        let mut panel = PanelState::new();
        panel.set_checked(Control::Touchpad, true);
        panel.set_enabled(Control::KeyboardBacklight, false);
        panel.select(RadioGroup::Thermal, 1);
        panel.set_label(Label::AlsLux, "212");

        // Act
        let text = panel.render();

        // Assert
        assert!(text.contains("[x] Touchpad"));
        assert!(text.contains("[-] Keyboard backlight (unavailable)"));
        assert!(text.contains("(*) Performance"));
        assert!(text.contains("Illuminance: 212 lx"));
    }

    #[test]
    fn test_dto_reports_selected_radio_button_as_checked() {
        let mut panel = PanelState::new();
        panel.select(RadioGroup::BatteryProtection, 2);

        let dto = panel.to_dto();

        let max = dto
            .controls
            .iter()
            .find(|c| c.control == "ProtectionMax")
            .expect("control present");
        assert!(max.checked);
        assert_eq!(dto.battery_protection, Some(2));
        assert_eq!(dto.controls.len(), Control::ALL.len());
    }

    #[test]
    fn test_dto_serializes_labels_by_name() {
        let mut panel = PanelState::new();
        panel.set_label(Label::AlsKelvin, "4870");

        let json = serde_json::to_string(&panel.to_dto()).expect("serialize");

        assert!(json.contains(r#""AlsKelvin":"4870""#));
    }
}
