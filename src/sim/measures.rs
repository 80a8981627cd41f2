//! Preventative measures
//!
//! Population-level interventions enacted once at simulation start on a
//! random sample of the population. They only flip per-host flags; the
//! stepping loop reads those flags every sub-step.

use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

use super::state::{Universe, Vaccine};
use crate::consts::VACCINATION_DRIP;

/// A strategy for slowing the spread of infection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    /// Adhering hosts stop moving entirely
    ShelterInPlace,
    /// Adhering hosts move at 30% of their velocity
    LimitTravel,
    /// Adhering hosts receive a vaccine that drains their recovery timer
    VaccinatePop,
}

/// Enact each measure on an independent random sample of the population
///
/// `adherence` is the fraction of hosts that comply, rounded up.
pub fn enact(universe: &mut Universe, measures: &[Measure], adherence: f32) {
    for &measure in measures {
        let count = adherent_count(universe.hosts.len(), adherence);
        let picked = sample(&mut universe.rng, universe.hosts.len(), count);
        for idx in picked {
            let host = &mut universe.hosts[idx];
            match measure {
                Measure::ShelterInPlace => host.is_sheltering = true,
                Measure::LimitTravel => host.limit_travel = true,
                Measure::VaccinatePop => {
                    host.vaccine = Some(Vaccine {
                        drip_rate: VACCINATION_DRIP,
                    });
                }
            }
        }
    }
}

fn adherent_count(population: usize, adherence: f32) -> usize {
    ((population as f32 * adherence).ceil() as usize).min(population)
}
