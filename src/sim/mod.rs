//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Fixed tick budget only
//! - Seeded RNG only
//! - Stable iteration order (by host index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod measures;
pub mod state;
pub mod stats;
pub mod tick;

pub use collision::{boundary_contact, pair_contact_time, resolve_elastic, transmit};
pub use measures::{Measure, enact};
pub use state::{Boundary, Condition, ContactEvent, Host, Universe, Vaccine};
pub use stats::{ConditionCounts, EpidemicStats};
pub use tick::{progress_recovery, step_tick};
