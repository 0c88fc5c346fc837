use std::time::Duration;

use chime_core::clock::ClockSnapshot;
use chime_core::error::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ClockAction {
    /// Print the current clock snapshot
    Now {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-render the clock every second until interrupted
    Watch {
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ClockAction) -> Result<()> {
    match action {
        ClockAction::Now { json } => print_snapshot(&ClockSnapshot::now(), json),
        ClockAction::Watch { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                let mut ticks = tokio::time::interval(Duration::from_secs(1));
                loop {
                    // The first tick resolves immediately, so the clock
                    // renders before the first full second elapses.
                    ticks.tick().await;
                    print_snapshot(&ClockSnapshot::now(), json)?;
                }
            })
        }
    }
}

fn print_snapshot(snapshot: &ClockSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        println!("{}  [{}]", snapshot.formatted_text, snapshot.background_asset());
    }
    Ok(())
}
