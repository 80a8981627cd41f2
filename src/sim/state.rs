//! Simulation state and core types
//!
//! Everything the stepper mutates lives here: the host population, the arena
//! boundary, and the per-sub-step contact events.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{advance, velocity_from_speed_angle};

/// Contagion state of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Never infected, susceptible on contact
    Unexposed,
    /// Currently carrying the pathogen
    Infected,
    /// Recovered and immune for the rest of the run
    Recovered,
}

/// A vaccine attached to a host, draining its recovery timer each tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vaccine {
    /// Upper bound of the per-tick recovery boost
    pub drip_rate: u32,
}

/// The earliest known contact for one host within the current sub-step
///
/// Reset to "no event" at the start of every sub-step. Once a finite time is
/// recorded, only a strictly smaller candidate may replace it.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    /// Time of the event from the start of the sub-step (infinite = none)
    pub time: f32,
    /// Velocity the host adopts when the event fires
    pub new_vel: Vec2,
}

impl ContactEvent {
    /// No pending event
    pub fn none() -> Self {
        Self {
            time: f32::INFINITY,
            new_vel: Vec2::ZERO,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::none();
    }

    /// Record a candidate event, keeping only the earliest
    pub fn record(&mut self, time: f32, new_vel: Vec2) {
        if time < self.time {
            self.time = time;
            self.new_vel = new_vel;
        }
    }
}

impl Default for ContactEvent {
    fn default() -> Self {
        Self::none()
    }
}

/// One circular host moving through the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub condition: Condition,
    /// Ticks until an infected host recovers
    pub remaining_recovery: i32,
    /// Vaccine, if one was assigned by a preventative measure
    pub vaccine: Option<Vaccine>,
    /// Sheltering hosts do not move at all
    pub is_sheltering: bool,
    /// Travel-limited hosts move at a fraction of their velocity
    pub limit_travel: bool,
    /// Pending contact event, scoped to the current sub-step
    #[serde(skip)]
    pub event: ContactEvent,
}

impl Host {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, condition: Condition) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            condition,
            remaining_recovery: RECOVERY_PERIOD,
            vaccine: None,
            is_sheltering: false,
            limit_travel: false,
            event: ContactEvent::none(),
        }
    }

    /// Spawn a host at a random position and heading inside the boundary,
    /// clear of every host already placed
    ///
    /// Positions are rejection-sampled: a candidate overlapping an existing
    /// host is discarded and redrawn. Detection assumes every pair starts
    /// outside its contact distance; a pair seeded in penetration would be
    /// resolved at its exit root and driven back together forever.
    pub fn spawn(
        id: u32,
        condition: Condition,
        bounds: &Boundary,
        placed: &[Host],
        rng: &mut Pcg32,
    ) -> Self {
        let clearance = HOST_RADIUS + SPAWN_MARGIN;
        let speed = rng.random_range(HOST_MIN_SPEED..=HOST_MAX_SPEED);
        let angle = rng.random_range(0.0..360.0);
        let pos = loop {
            let candidate = Vec2::new(
                rng.random_range(bounds.left() + clearance..bounds.right() - clearance),
                rng.random_range(bounds.top() + clearance..bounds.bottom() - clearance),
            );
            let clear = placed
                .iter()
                .all(|o| (candidate - o.pos).length() > HOST_RADIUS + o.radius + T_EPSILON);
            if clear {
                break candidate;
            }
        };
        Self::new(
            id,
            pos,
            velocity_from_speed_angle(speed, angle),
            HOST_RADIUS,
            condition,
        )
    }

    /// Advance this host by one sub-step of length `t_min`
    ///
    /// A host whose pending event fires this sub-step stops `T_EPSILON` short
    /// of the contact and adopts the event's resulting velocity. Everyone
    /// else walks the full `t_min` with their current velocity, scaled by
    /// their travel modifier.
    pub fn advance_substep(&mut self, t_min: f32) {
        if self.is_sheltering {
            self.vel = Vec2::ZERO;
        }

        if self.event.time < t_min || (self.event.time - t_min).abs() < T_EPSILON {
            if t_min > T_EPSILON {
                self.pos = advance(self.pos, self.vel, t_min - T_EPSILON);
            }
            self.vel = self.event.new_vel;
        } else if self.limit_travel {
            self.pos = advance(self.pos, self.vel * LIMIT_TRAVEL_FACTOR, t_min);
        } else {
            self.pos = advance(self.pos, self.vel, t_min);
        }
    }
}

/// Axis-aligned rectangular arena boundary, immutable for the run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boundary {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Boundary {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The default arena border, inset from the screen edges
    pub fn default_arena() -> Self {
        Self::new(
            BORDER_MARGIN,
            BORDER_MARGIN,
            ARENA_WIDTH - 2.0 * BORDER_MARGIN,
            ARENA_HEIGHT - BORDER_BOTTOM_RESERVE,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

fn skipped_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// A bounded 2D space and time containing a population of hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Universe {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Completed tick count
    pub tick: u64,
    pub boundary: Boundary,
    /// Host population, fixed for the run (sorted by id)
    pub hosts: Vec<Host>,
    /// Live RNG stream; reseeded from `seed` after deserialization
    #[serde(skip, default = "skipped_rng")]
    pub rng: Pcg32,
}

impl Universe {
    /// Create a universe with the given population split
    pub fn new(seed: u64, unexposed: usize, infected: usize) -> Self {
        let boundary = Boundary::default_arena();
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut hosts: Vec<Host> = Vec::with_capacity(unexposed + infected);
        for i in 0..unexposed {
            let host = Host::spawn(i as u32, Condition::Unexposed, &boundary, &hosts, &mut rng);
            hosts.push(host);
        }
        for i in 0..infected {
            let host = Host::spawn(
                (unexposed + i) as u32,
                Condition::Infected,
                &boundary,
                &hosts,
                &mut rng,
            );
            hosts.push(host);
        }

        Self {
            seed,
            tick: 0,
            boundary,
            hosts,
            rng,
        }
    }

    pub fn total_population(&self) -> usize {
        self.hosts.len()
    }

    /// Count of hosts currently in the given condition
    pub fn population_count(&self, condition: Condition) -> usize {
        self.hosts.iter().filter(|h| h.condition == condition).count()
    }

    /// The epidemic is over once no host is infected
    pub fn is_epidemic_over(&self) -> bool {
        self.population_count(Condition::Infected) == 0
    }
}
