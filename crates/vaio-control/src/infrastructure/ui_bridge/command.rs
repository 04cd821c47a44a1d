//! Console command parser.
//!
//! Each line typed at the prompt names one control and a value, mirroring
//! what a click in a graphical panel would report:
//!
//! ```text
//! touchpad off          → CheckboxChanged { Touchpad, 0 }
//! lid-s3 on             → CheckboxChanged { LidS3, 2 }
//! protection medium     → RadioClicked { BatteryProtection, 1 }
//! thermal silent        → RadioClicked { Thermal, 2 }
//! timeout 3             → SliderMoved { 3 }
//! ```
//!
//! Checkbox values accept `on`/`off`/`partial` or the raw tri-state number.
//! Radio values accept the button name or its numeric id.

use thiserror::Error;
use vaio_core::{Control, RadioGroup};

use crate::application::settings_mirror::UiEvent;

/// Something the user asked the console front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help')")]
    UnknownCommand(String),
    #[error("'{0}' needs a value")]
    MissingValue(String),
    #[error("'{value}' is not a valid value for '{command}'")]
    InvalidValue { command: String, value: String },
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  fast-charge|backlight|touchpad|als|lid-s3|lid-s4|optical  on|off|partial|0|1|2
  protection  none|medium|max|0|1|2
  thermal     balanced|performance|silent|0|1|2
  timeout     0|1|2|3        (10 s, 30 s, 60 s, always on)
  show        print the panel
  help        print this text
  quit        exit";

/// Parses one console line.
///
/// # Errors
///
/// Returns [`CommandError`] naming the token that could not be understood.
pub fn parse_command(line: &str) -> Result<PanelCommand, CommandError> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

    match name.as_str() {
        "show" => return Ok(PanelCommand::Show),
        "help" | "?" => return Ok(PanelCommand::Help),
        "quit" | "exit" | "q" => return Ok(PanelCommand::Quit),
        _ => {}
    }

    let target = target_for(&name).ok_or_else(|| CommandError::UnknownCommand(name.clone()))?;
    let value = tokens
        .next()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| CommandError::MissingValue(name.clone()))?;
    let invalid = || CommandError::InvalidValue {
        command: name.clone(),
        value: value.clone(),
    };

    let event = match target {
        Target::Checkbox(control) => {
            let state = match value.as_str() {
                "on" | "2" => 2,
                "partial" | "1" => 1,
                "off" | "0" => 0,
                _ => return Err(invalid()),
            };
            UiEvent::CheckboxChanged { control, state }
        }
        Target::Radio(group, names) => {
            let id = radio_id(&value, names).ok_or_else(invalid)?;
            UiEvent::RadioClicked { group, id }
        }
        Target::Slider => {
            let value = value.parse().map_err(|_| invalid())?;
            UiEvent::SliderMoved { value }
        }
    };

    Ok(PanelCommand::Event(event))
}

/// The control a command name refers to.
enum Target {
    Checkbox(Control),
    Radio(RadioGroup, [&'static str; 3]),
    Slider,
}

fn target_for(name: &str) -> Option<Target> {
    Some(match name {
        "fast-charge" => Target::Checkbox(Control::BatteryFastCharge),
        "backlight" => Target::Checkbox(Control::KeyboardBacklight),
        "touchpad" => Target::Checkbox(Control::Touchpad),
        "als" => Target::Checkbox(Control::AlsPower),
        "lid-s3" => Target::Checkbox(Control::LidS3),
        "lid-s4" => Target::Checkbox(Control::LidS4),
        "optical" => Target::Checkbox(Control::OpticalDevice),
        "protection" => Target::Radio(RadioGroup::BatteryProtection, ["none", "medium", "max"]),
        "thermal" => Target::Radio(RadioGroup::Thermal, ["balanced", "performance", "silent"]),
        "timeout" => Target::Slider,
        _ => return None,
    })
}

/// Looks a button up by name, or accepts its numeric id as-is.
fn radio_id(value: &str, names: [&str; 3]) -> Option<i64> {
    names
        .iter()
        .position(|n| *n == value)
        .map(|i| i as i64)
        .or_else(|| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> UiEvent {
        match parse_command(line) {
            Ok(PanelCommand::Event(e)) => e,
            other => panic!("expected event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_checkbox_values_map_to_tri_state() {
        assert_eq!(
            event("touchpad on"),
            UiEvent::CheckboxChanged { control: Control::Touchpad, state: 2 }
        );
        assert_eq!(
            event("lid-s4 off"),
            UiEvent::CheckboxChanged { control: Control::LidS4, state: 0 }
        );
        assert_eq!(
            event("optical partial"),
            UiEvent::CheckboxChanged { control: Control::OpticalDevice, state: 1 }
        );
    }

    #[test]
    fn test_radio_names_and_ids_are_accepted() {
        assert_eq!(
            event("thermal silent"),
            UiEvent::RadioClicked { group: RadioGroup::Thermal, id: 2 }
        );
        assert_eq!(
            event("protection 1"),
            UiEvent::RadioClicked { group: RadioGroup::BatteryProtection, id: 1 }
        );
    }

    #[test]
    fn test_timeout_passes_slider_position_through() {
        assert_eq!(event("timeout 3"), UiEvent::SliderMoved { value: 3 });
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(
            event("Fast-Charge ON"),
            UiEvent::CheckboxChanged { control: Control::BatteryFastCharge, state: 2 }
        );
        assert_eq!(parse_command("QUIT"), Ok(PanelCommand::Quit));
    }

    #[test]
    fn test_parse_errors_name_the_bad_token() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("wifi on"),
            Err(CommandError::UnknownCommand("wifi".to_string()))
        );
        assert_eq!(
            parse_command("touchpad"),
            Err(CommandError::MissingValue("touchpad".to_string()))
        );
        assert_eq!(
            parse_command("wifi"),
            Err(CommandError::UnknownCommand("wifi".to_string()))
        );
        assert_eq!(
            parse_command("thermal turbo"),
            Err(CommandError::InvalidValue {
                command: "thermal".to_string(),
                value: "turbo".to_string()
            })
        );
    }
}
