//! Contagion Arena entry point
//!
//! Runs the simulation headless until the epidemic burns out, logging
//! progress and printing a JSON summary.

use std::time::{SystemTime, UNIX_EPOCH};

use contagion_arena::consts::*;
use contagion_arena::sim::{ConditionCounts, EpidemicStats, Measure, enact, progress_recovery, step_tick};
use contagion_arena::Universe;

/// Safety cap: no realistic run needs this many ticks
const MAX_TICKS: u64 = 100_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let mut universe = Universe::new(seed, POP_UNEXPOSED, POP_INFECTED);
    log::info!(
        "universe seeded with {} (population {})",
        seed,
        universe.total_population()
    );

    enact(&mut universe, &[Measure::ShelterInPlace], MEASURE_ADHERENCE);
    let mut stats = EpidemicStats::new(&universe);

    while !universe.is_epidemic_over() && universe.tick < MAX_TICKS {
        step_tick(&mut universe);
        progress_recovery(&mut universe);
        stats.update(&universe);

        if universe.tick % 50 == 0 {
            let counts = ConditionCounts::of(&universe);
            log::info!(
                "tick {}: unexposed {} infected {} recovered {}",
                universe.tick,
                counts.unexposed,
                counts.infected,
                counts.recovered
            );
        }
    }

    log::info!("epidemic over after {} ticks", universe.tick);
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize summary: {e}"),
    }
}
