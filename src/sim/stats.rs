//! Epidemic statistics
//!
//! Textual aggregation only; no drawing. The run loop updates the stats
//! after every tick and serializes the final record as the run summary.

use serde::{Deserialize, Serialize};

use super::state::{Condition, Universe};

/// Population split by condition at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionCounts {
    pub unexposed: usize,
    pub infected: usize,
    pub recovered: usize,
}

impl ConditionCounts {
    pub fn of(universe: &Universe) -> Self {
        Self {
            unexposed: universe.population_count(Condition::Unexposed),
            infected: universe.population_count(Condition::Infected),
            recovered: universe.population_count(Condition::Recovered),
        }
    }
}

/// Running statistics over an epidemic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpidemicStats {
    /// Largest simultaneous infected count seen so far
    pub max_infected: usize,
    /// `max_infected` as a percentage of the population
    pub max_active_infected_percent: f32,
    /// Peak of (infected + recovered) as a percentage of the population,
    /// i.e. how much of the population the pathogen ever reached
    pub max_total_infected_percent: f32,
}

impl EpidemicStats {
    pub fn new(universe: &Universe) -> Self {
        let mut stats = Self {
            max_infected: 0,
            max_active_infected_percent: 0.0,
            max_total_infected_percent: 0.0,
        };
        stats.update(universe);
        stats
    }

    /// Fold the current tick's counts into the running maxima
    pub fn update(&mut self, universe: &Universe) {
        let counts = ConditionCounts::of(universe);
        let population = universe.total_population().max(1) as f32;

        self.max_infected = self.max_infected.max(counts.infected);
        self.max_active_infected_percent = self.max_infected as f32 / population * 100.0;

        let ever_infected = (counts.infected + counts.recovered) as f32 / population * 100.0;
        self.max_total_infected_percent = self.max_total_infected_percent.max(ever_infected);
    }
}
