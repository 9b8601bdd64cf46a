//! Vector Race entry point
//!
//! Text front end: reads commands (`+x`, `-x`, `+y`, `-y`, `tic`) from stdin,
//! plays them against a race and prints the final state as JSON.
//!
//! Usage: `vector-race [track.json] < moves.txt`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{self, BufRead};

    use vector_race::sim::{Command, RaceStatus};
    use vector_race::{Race, RaceConfig};

    env_logger::init();
    log::info!("Vector Race (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match RaceConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load track {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RaceConfig::default(),
    };

    match config.to_json() {
        Ok(json) => log::debug!("Track:\n{}", json),
        Err(e) => log::warn!("Failed to serialize track: {}", e),
    }

    let mut race = match Race::new(config) {
        Ok(race) => race,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    'input: for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        };

        for word in line.split_whitespace() {
            let command: Command = match word.parse() {
                Ok(command) => command,
                Err(e) => {
                    log::warn!("{}", e);
                    continue;
                }
            };

            if let Some(outcome) = race.apply(command) {
                println!(
                    "t = {}  tip = {}  v = {}",
                    outcome.turn,
                    race.tip(),
                    race.committed_velocity()
                );
            }
            if race.is_finished() {
                break 'input;
            }
        }
    }

    match race.status() {
        RaceStatus::InProgress => println!("Race abandoned after {} turns", race.turn()),
        status => println!("{} ({} turns)", status.as_str(), race.turn()),
    }

    match serde_json::to_string_pretty(race.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize race state: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native front end on wasm
}
