//! Tick stepping loop
//!
//! One tick spends a fixed time budget in sub-steps. Each sub-step detects
//! the earliest pending contact across all host pairs and all walls,
//! advances every host to that moment, applies the resolved velocities, and
//! repeats until the budget is exhausted.

use rand::Rng;

use super::collision::{boundary_contact, pair_contact_time, resolve_elastic, transmit};
use super::state::{Boundary, Condition, Host, Universe};
use crate::consts::{T_EPSILON, TICK_BUDGET};

/// Advance the universe by one full simulation tick
///
/// Performs nothing when no host is infected; the run loop stops calling
/// once the epidemic is over, and a stray extra call must not move anyone.
pub fn step_tick(universe: &mut Universe) {
    if universe.is_epidemic_over() {
        return;
    }

    let mut budget = TICK_BUDGET;
    while budget > T_EPSILON {
        for host in &mut universe.hosts {
            host.event.reset();
        }

        let mut t_min = budget;
        t_min = detect_host_contacts(&mut universe.hosts, t_min);
        t_min = detect_boundary_contacts(&mut universe.hosts, &universe.boundary, t_min);

        for host in &mut universe.hosts {
            host.advance_substep(t_min);
        }

        budget -= t_min;
    }

    universe.tick += 1;
}

/// Detect contacts across every unordered host pair
///
/// An accepted contact is resolved immediately: transmission applies to both
/// pre-collision states at once, and the resulting velocities land on each
/// host's contact event, which keeps only its earliest candidate. Host state
/// itself is untouched until the advancing phase, so detection for later
/// pairs still sees consistent positions and velocities.
fn detect_host_contacts(hosts: &mut [Host], mut t_min: f32) -> f32 {
    for i in 0..hosts.len() {
        for j in (i + 1)..hosts.len() {
            let (left, right) = hosts.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            let t = pair_contact_time(a, b);
            if t - T_EPSILON > t_min {
                continue;
            }

            let (new_a, new_b) = resolve_elastic(a, b, t);
            let (cond_a, cond_b) = transmit(a.condition, b.condition);
            a.condition = cond_a;
            b.condition = cond_b;

            a.event.record(t, new_a);
            b.event.record(t, new_b);

            if t < t_min {
                t_min = t;
            }
        }
    }
    t_min
}

/// Detect wall contacts for every host, keeping each host's global minimum
fn detect_boundary_contacts(hosts: &mut [Host], bounds: &Boundary, mut t_min: f32) -> f32 {
    for host in hosts.iter_mut() {
        let wall = boundary_contact(host, bounds, t_min);
        host.event.record(wall.time, wall.new_vel);
        if host.event.time < t_min {
            t_min = host.event.time;
        }
    }
    t_min
}

/// Advance every host's recovery timer by one tick
///
/// Runs between ticks, never inside `step_tick`. Vaccinated hosts drain
/// their timer faster and become immune without ever being infected once it
/// runs out; unvaccinated timers only move while infected.
pub fn progress_recovery(universe: &mut Universe) {
    for host in &mut universe.hosts {
        if let Some(vaccine) = host.vaccine {
            let boost = 1 + universe.rng.random_range(0..=vaccine.drip_rate);
            host.remaining_recovery -= boost as i32;
        }

        if host.remaining_recovery <= 0 {
            host.condition = Condition::Recovered;
        }

        if host.condition == Condition::Infected {
            host.remaining_recovery -= 1;
        }
    }
}
