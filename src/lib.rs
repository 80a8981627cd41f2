//! Contagion Arena - an epidemic simulation driven by exact collision times
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision detection, contagion spread,
//!   preventative measures, epidemic statistics)
//!
//! The simulation advances in discrete ticks. Within a tick, hosts move in
//! continuous time: the stepper solves for the exact moment of the next
//! contact (host-host or host-wall), advances everyone to that moment,
//! resolves the contact, and repeats until the tick's time budget is spent.

pub mod sim;

pub use sim::{Condition, Host, Measure, Universe};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Time budget of one simulation tick
    pub const TICK_BUDGET: f32 = 1.0;
    /// Tolerance for contact-time comparisons; also the backoff applied when
    /// positioning a host at a resolved contact
    pub const T_EPSILON: f32 = 0.01;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 680.0;
    pub const ARENA_HEIGHT: f32 = 480.0;
    /// Border inset from the arena edges
    pub const BORDER_MARGIN: f32 = 5.0;
    /// Height reserved below the border (stats band in the original layout)
    pub const BORDER_BOTTOM_RESERVE: f32 = 100.0;

    /// Host defaults
    pub const HOST_RADIUS: f32 = 5.5;
    pub const HOST_MIN_SPEED: f32 = 2.0;
    pub const HOST_MAX_SPEED: f32 = 6.0;
    /// Spawn clearance from the border, beyond the host radius
    pub const SPAWN_MARGIN: f32 = 12.0;

    /// Ticks an infected host stays infected before recovering
    pub const RECOVERY_PERIOD: i32 = 340;
    /// Extra recovery units per tick granted by a vaccine (upper bound)
    pub const VACCINATION_DRIP: u32 = 3;
    /// Fraction of the population that adheres to a preventative measure
    pub const MEASURE_ADHERENCE: f32 = 0.5;
    /// Velocity scale for travel-limited hosts
    pub const LIMIT_TRAVEL_FACTOR: f32 = 0.3;

    /// Default population split
    pub const POP_UNEXPOSED: usize = 49;
    pub const POP_INFECTED: usize = 1;
}

/// Convert a scalar speed and heading (degrees) into a velocity vector
#[inline]
pub fn velocity_from_speed_angle(speed: f32, angle_degrees: f32) -> Vec2 {
    let angle = angle_degrees.to_radians();
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

/// Advance a position linearly by velocity over elapsed time
#[inline]
pub fn advance(position: Vec2, velocity: Vec2, elapsed: f32) -> Vec2 {
    position + velocity * elapsed
}
