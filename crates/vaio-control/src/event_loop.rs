//! Single-threaded event loop for the console front end.
//!
//! # Why one loop? (for beginners)
//!
//! The panel has exactly two event sources: lines typed by the user and the
//! 500 ms ambient-light timer.  `tokio::select!` waits on both (plus Ctrl-C)
//! and runs whichever fires first to completion before waiting again.  Two
//! handlers therefore never run at the same time, which is what makes the
//! lid bitmask read-modify-write safe with respect to our own events without
//! any locking.
//!
//! ```text
//! loop {
//!     select! {
//!         shutdown      → return Interrupted
//!         line of input → parse → SettingsMirror::on_user_change
//!         timer tick    → SettingsMirror::on_timer_tick
//!     }
//! }
//! ```

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use vaio_core::ALS_POLL_INTERVAL_MS;

use crate::application::settings_mirror::SettingsMirror;
use crate::infrastructure::ui_bridge::command::{parse_command, PanelCommand, HELP};
use crate::infrastructure::ui_bridge::PanelState;

/// Why [`run_console`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user typed `quit`.
    Quit,
    /// The input stream reached end-of-file.
    InputClosed,
    /// The shutdown future completed (Ctrl-C).
    Interrupted,
}

/// Runs the console front end until the user quits, input closes, or
/// `shutdown` completes.
///
/// The mirror must already be initialised against `panel`.
///
/// # Errors
///
/// Returns an I/O error if reading `input` or writing `output` fails.
/// Attribute and command errors are reported on `output` and do not stop
/// the loop.
pub async fn run_console<R, W, F>(
    mirror: &mut SettingsMirror,
    panel: &mut PanelState,
    input: R,
    output: &mut W,
    shutdown: F,
) -> std::io::Result<LoopExit>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    let mut timer = tokio::time::interval(Duration::from_millis(ALS_POLL_INTERVAL_MS));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; initialisation already read the sensor.
    timer.tick().await;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                info!("shutdown signal received");
                return Ok(LoopExit::Interrupted);
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    return Ok(LoopExit::InputClosed);
                };
                if line.trim().is_empty() {
                    continue;
                }
                if !handle_line(mirror, panel, &line, output)? {
                    return Ok(LoopExit::Quit);
                }
                output.flush()?;
            }

            _ = timer.tick() => {
                mirror.on_timer_tick(panel);
            }
        }
    }
}

/// Completes when `signal` fires.  If the signal cannot be registered the
/// returned future never completes, so the loop keeps running.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("cannot listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

/// Handles one console line.  Returns `false` when the user asked to quit.
fn handle_line<W: Write>(
    mirror: &mut SettingsMirror,
    panel: &mut PanelState,
    line: &str,
    output: &mut W,
) -> std::io::Result<bool> {
    match parse_command(line) {
        Ok(PanelCommand::Event(event)) => match mirror.on_user_change(event, panel) {
            Ok(()) => writeln!(output, "ok")?,
            Err(e) => {
                warn!("{event:?} rejected: {e}");
                writeln!(output, "error: {e}")?;
            }
        },
        Ok(PanelCommand::Show) => write!(output, "{}", panel.render())?,
        Ok(PanelCommand::Help) => writeln!(output, "{HELP}")?,
        Ok(PanelCommand::Quit) => return Ok(false),
        Err(e) => writeln!(output, "error: {e}")?,
    }
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::io::{AsyncWriteExt, BufReader};
    use vaio_core::{Attribute, Control, Label};

    use crate::application::settings_mirror::AttributeStore;
    use crate::infrastructure::sysfs::mock::MockAttributeStore;

    fn setup() -> (Arc<MockAttributeStore>, SettingsMirror, PanelState) {
        let store = Arc::new(MockAttributeStore::demo());
        let mut mirror = SettingsMirror::new(Arc::clone(&store) as Arc<dyn AttributeStore>);
        let mut panel = PanelState::new();
        mirror.initialize(&mut panel);
        (store, mirror, panel)
    }

    #[test]
    fn test_commands_are_dispatched_in_order_until_quit() {
        // Arrange
        let (store, mut mirror, mut panel) = setup();
        let input = BufReader::new(&b"touchpad off\nlid-s3 off\nquit\ntouchpad on\n"[..]);
        let mut output = Vec::new();

        // Act
        let exit = tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            input,
            &mut output,
            std::future::pending(),
        ))
        .expect("loop");

        // Assert
        assert_eq!(exit, LoopExit::Quit);
        assert_eq!(
            store.writes(),
            vec![(Attribute::Touchpad, 0), (Attribute::LidControl, 0)]
        );
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let (store, mut mirror, mut panel) = setup();
        let input = BufReader::new(&b"timeout 9\nbogus\ntimeout 1\n"[..]);
        let mut output = Vec::new();

        let exit = tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            input,
            &mut output,
            std::future::pending(),
        ))
        .expect("loop");

        let text = String::from_utf8(output).unwrap();
        assert_eq!(exit, LoopExit::InputClosed);
        assert_eq!(text.matches("error:").count(), 2);
        assert_eq!(store.writes(), vec![(Attribute::KeyboardBacklightTimeout, 1)]);
        assert_eq!(panel.label(Label::KeyboardTimeout), "30 seconds");
    }

    #[test]
    fn test_show_prints_rendered_panel() {
        let (_store, mut mirror, mut panel) = setup();
        let input = BufReader::new(&b"show\n"[..]);
        let mut output = Vec::new();

        tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            input,
            &mut output,
            std::future::pending(),
        ))
        .expect("loop");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains(Control::OpticalDevice.caption()));
    }

    #[test]
    fn test_show_reflects_changes_made_in_same_session() {
        // Arrange
        let (_store, mut mirror, mut panel) = setup();
        let input = BufReader::new(&b"touchpad off\nthermal silent\ntimeout 3\nshow\n"[..]);
        let mut output = Vec::new();

        // Act
        tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            input,
            &mut output,
            std::future::pending(),
        ))
        .expect("loop");

        // Assert
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains(&format!("[ ] {}", Control::Touchpad.caption())), "{text}");
        assert!(!text.contains(&format!("[x] {}", Control::Touchpad.caption())), "{text}");
        assert!(text.contains(&format!("(*) {}", Control::ThermalSilent.caption())), "{text}");
        assert!(text.contains("Always on [3/3]"), "{text}");
    }

    #[test]
    fn test_timeout_is_refused_while_backlight_is_off() {
        let (store, mut mirror, mut panel) = setup();
        let input = BufReader::new(&b"backlight off\ntimeout 3\n"[..]);
        let mut output = Vec::new();

        tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            input,
            &mut output,
            std::future::pending(),
        ))
        .expect("loop");

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("error:").count(), 1, "{text}");
        assert_eq!(store.writes(), vec![(Attribute::KeyboardBacklight, 0)]);
    }

    #[test]
    fn test_shutdown_future_stops_loop() {
        let (_store, mut mirror, mut panel) = setup();
        let (_writer, reader) = tokio::io::duplex(64);
        let mut output = Vec::new();

        let exit = tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            BufReader::new(reader),
            &mut output,
            std::future::ready(()),
        ))
        .expect("loop");

        assert_eq!(exit, LoopExit::Interrupted);
    }

    #[test]
    fn test_failed_signal_registration_does_not_stop_loop() {
        // Arrange
        let (_store, mut mirror, mut panel) = setup();
        let (mut writer, reader) = tokio::io::duplex(64);
        let mut output = Vec::new();
        let broken_signal = async { Err::<(), _>(std::io::Error::other("no signal handler")) };

        // Act
        tokio_test::block_on(async {
            let driver = async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                writer.write_all(b"quit\n").await.unwrap();
            };
            let (exit, ()) = tokio::join!(
                run_console(
                    &mut mirror,
                    &mut panel,
                    BufReader::new(reader),
                    &mut output,
                    shutdown_on(broken_signal),
                ),
                driver
            );

            // Assert
            assert_eq!(exit.expect("loop"), LoopExit::Quit);
        });
    }

    #[test]
    fn test_signal_stops_loop() {
        let (_store, mut mirror, mut panel) = setup();
        let (_writer, reader) = tokio::io::duplex(64);
        let mut output = Vec::new();

        let exit = tokio_test::block_on(run_console(
            &mut mirror,
            &mut panel,
            BufReader::new(reader),
            &mut output,
            shutdown_on(async { Ok::<(), std::io::Error>(()) }),
        ))
        .expect("loop");

        assert_eq!(exit, LoopExit::Interrupted);
    }

    #[test]
    fn test_timer_refreshes_als_labels_while_idle() {
        // Arrange
        let (store, mut mirror, mut panel) = setup();
        let (mut writer, reader) = tokio::io::duplex(64);
        let mut output = Vec::new();

        // Act: change the sensor readings, stay idle past one period, then quit.
        tokio_test::block_on(async {
            let driver = async {
                store.set(Attribute::AlsLux, "999");
                store.set(Attribute::AlsKelvin, "6500");
                tokio::time::sleep(Duration::from_millis(ALS_POLL_INTERVAL_MS * 2)).await;
                writer.write_all(b"quit\n").await.unwrap();
            };
            let (exit, ()) = tokio::join!(
                run_console(
                    &mut mirror,
                    &mut panel,
                    BufReader::new(reader),
                    &mut output,
                    std::future::pending(),
                ),
                driver
            );
            assert_eq!(exit.expect("loop"), LoopExit::Quit);
        });

        // Assert
        assert_eq!(panel.label(Label::AlsLux), "999");
        assert_eq!(panel.label(Label::AlsKelvin), "6500");
        assert!(store.writes().is_empty());
    }
}
