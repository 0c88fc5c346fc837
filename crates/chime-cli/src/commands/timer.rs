use std::time::Duration;

use chime_core::audio::{AlertSink, MuteAlert, RodioAlert};
use chime_core::controller::{ActionController, ControllerMode};
use chime_core::error::{CoreError, Result};
use chime_core::events::Event;
use chime_core::Config;
use clap::Subcommand;
use tokio::io::AsyncBufReadExt;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown and sound the alert when it reaches zero
    Run {
        /// Duration as seconds, MM:SS, or HH:MM:SS (config default when omitted)
        duration: Option<String>,
        /// Emit events as JSON lines
        #[arg(long)]
        json: bool,
        /// Run without audio playback
        #[arg(long)]
        silent: bool,
    },
}

pub fn run(action: TimerAction) -> Result<()> {
    match action {
        TimerAction::Run {
            duration,
            json,
            silent,
        } => {
            let config = Config::load()?;
            let duration_secs = match duration {
                Some(raw) => parse_duration(&raw)?,
                None => config.timer.default_duration_secs,
            };

            let alert: Box<dyn AlertSink> = if silent || !config.alert.enabled {
                Box::new(MuteAlert::default())
            } else {
                Box::new(RodioAlert::new(
                    config.alert.sound_path()?,
                    config.alert.volume,
                ))
            };

            let mut controller = ActionController::new(alert);
            let rt = tokio::runtime::Runtime::new()?;
            let result = rt.block_on(drive(&mut controller, duration_secs, json, silent));
            // A pending stdin read must not hold the runtime open.
            rt.shutdown_timeout(Duration::from_millis(100));
            result
        }
    }
}

/// One full control cycle: start the countdown, tick it down once per
/// second, sound the alert at zero, and treat a line on stdin as the
/// control activation that stops it.
async fn drive(
    controller: &mut ActionController<Box<dyn AlertSink>>,
    duration_secs: u64,
    json: bool,
    silent: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&controller.snapshot())?);
    }

    match controller.activate(duration_secs) {
        Some(event) => emit(&event, json)?,
        // A zero duration is dropped by the engine; nothing to run.
        None => return Ok(()),
    }

    let mut ticks = tokio::time::interval(Duration::from_secs(1));
    ticks.tick().await; // the first tick resolves immediately
    let mut input = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                let Some(event) = controller.tick() else { continue };
                let finished = matches!(event, Event::CountdownFinished { .. });
                emit(&event, json)?;
                if finished {
                    if silent {
                        // No audible alert to acknowledge; complete the cycle.
                        if let Some(stopped) = controller.activate(duration_secs) {
                            emit(&stopped, json)?;
                        }
                        return Ok(());
                    }
                    if !json {
                        println!("Press Enter to stop the alert.");
                    }
                }
            }
            line = input.next_line(), if input_open => {
                match line {
                    Ok(Some(_)) => {
                        // Ignored while the countdown is running; stops the
                        // alert once it is playing.
                        if let Some(event) = controller.activate(duration_secs) {
                            emit(&event, json)?;
                        }
                        if controller.mode() == ControllerMode::Idle {
                            return Ok(());
                        }
                    }
                    // stdin closed; keep running on the interval alone
                    _ => input_open = false,
                }
            }
        }
    }
}

fn emit(event: &Event, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::CountdownStarted { display, .. } | Event::CountdownTick { display, .. } => {
            println!("Time Remaining: {display}");
        }
        Event::CountdownFinished { .. } => println!("Time Remaining: 00:00:00"),
        Event::AlertStopped { .. } => println!("Alert stopped."),
        _ => {}
    }
    Ok(())
}

/// Parse a duration given as plain seconds, `MM:SS`, or `HH:MM:SS`.
fn parse_duration(input: &str) -> Result<u64> {
    let invalid = || {
        CoreError::Custom(format!(
            "invalid duration '{input}' (expected seconds, MM:SS, or HH:MM:SS)"
        ))
    };
    let fields = input
        .split(':')
        .map(|f| f.parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;
    match fields.as_slice() {
        [secs] => Ok(*secs),
        [mins, secs] if *secs < 60 => Ok(mins * 60 + secs),
        [hours, mins, secs] if *mins < 60 && *secs < 60 => Ok(hours * 3600 + mins * 60 + secs),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert_eq!(parse_duration("0").unwrap(), 0);
    }

    #[test]
    fn parses_colon_forms() {
        assert_eq!(parse_duration("01:30").unwrap(), 90);
        assert_eq!(parse_duration("1:01:01").unwrap(), 3661);
        assert_eq!(parse_duration("25:00:00").unwrap(), 90_000);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1:99").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("-5").is_err());
    }
}
