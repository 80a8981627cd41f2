//! Contact detection and elastic resolution
//!
//! The tricky part of the simulation: exact time-of-contact between two
//! moving circles (a per-pair quadratic), time-of-contact against the four
//! boundary walls, and the equal-mass elastic response in a rotated
//! collision frame.

use glam::Vec2;

use super::state::{Boundary, Condition, ContactEvent, Host};
use crate::advance;
use crate::consts::T_EPSILON;

/// Earliest future time at which the surfaces of two moving circles touch
///
/// Solves `|posA(t) - posB(t)| = rA + rB` as `a·t² + b·t + c = 0` over the
/// relative position and velocity. Returns infinity when the pair never
/// touches under the current motion: no relative velocity, a negative
/// discriminant, or only non-positive roots are all ordinary "no event"
/// outcomes, not errors.
pub fn pair_contact_time(a: &Host, b: &Host) -> f32 {
    let dp = a.pos - b.pos;
    let dv = a.vel - b.vel;
    let r = a.radius + b.radius;

    let qa = dv.length_squared();
    let qb = 2.0 * dp.dot(dv);
    let qc = dp.length_squared() - r * r;

    if qa == 0.0 {
        // No relative motion: at most one root
        if qb != 0.0 {
            let t = -qc / qb;
            if t > 0.0 {
                return t;
            }
        }
        return f32::INFINITY;
    }

    let delta = qb * qb - 4.0 * qa * qc;
    if delta < 0.0 {
        return f32::INFINITY;
    }

    let sqrt_delta = delta.sqrt();
    let t1 = (-qb - sqrt_delta) / (2.0 * qa);
    let t2 = (-qb + sqrt_delta) / (2.0 * qa);

    // qa > 0 so t1 <= t2; prefer the earlier positive root
    if t1 > 0.0 {
        t1
    } else if t2 > 0.0 {
        t2
    } else {
        f32::INFINITY
    }
}

/// Rotate a collision-frame (normal, tangential) pair back into world space
#[inline]
fn rotate_out(p: f32, q: f32, theta: f32) -> Vec2 {
    // Inverse rotation, i.e. rotation by -theta
    let (sin_t, cos_t) = theta.sin_cos();
    Vec2::new(p * cos_t - q * sin_t, p * sin_t + q * cos_t)
}

/// Post-collision velocities for two equal-mass circles touching at time `t`
///
/// Advances both hosts to their exact contact points, rotates each velocity
/// into the frame of the contact normal, swaps the normal components, and
/// rotates back. Tangential components are untouched, so kinetic energy and
/// momentum are conserved by construction. Pure: the caller stores the
/// results on the hosts' contact events, it must not mutate velocities here.
pub fn resolve_elastic(a: &Host, b: &Host, t: f32) -> (Vec2, Vec2) {
    let contact_a = advance(a.pos, a.vel, t);
    let contact_b = advance(b.pos, b.vel, t);

    let d = contact_b - contact_a;
    let theta = d.y.atan2(d.x);
    let (sin_t, cos_t) = theta.sin_cos();

    // Normal (p) and tangential (q) components in the collision frame
    let p_a = a.vel.x * cos_t + a.vel.y * sin_t;
    let q_a = -a.vel.x * sin_t + a.vel.y * cos_t;
    let p_b = b.vel.x * cos_t + b.vel.y * sin_t;
    let q_b = -b.vel.x * sin_t + b.vel.y * cos_t;

    // Equal masses: the normal components swap outright
    let new_a = rotate_out(p_b, q_a, theta);
    let new_b = rotate_out(p_a, q_b, theta);

    (new_a, new_b)
}

/// Transmission on contact, evaluated over both pre-collision states at once
///
/// An infected host infects an unexposed partner; a recovered host is immune
/// and transmits nothing. Evaluating both directions before either state
/// changes keeps the rule symmetric.
pub fn transmit(a: Condition, b: Condition) -> (Condition, Condition) {
    let new_a = match (a, b) {
        (Condition::Unexposed, Condition::Infected) => Condition::Infected,
        _ => a,
    };
    let new_b = match (a, b) {
        (Condition::Infected, Condition::Unexposed) => Condition::Infected,
        _ => b,
    };
    (new_a, new_b)
}

/// Earliest accepted contact against any of the four boundary walls
///
/// Each wall is checked independently; only the smallest accepted time
/// survives. The resulting velocity negates the component perpendicular to
/// the struck wall and preserves the tangential one.
pub fn boundary_contact(host: &Host, bounds: &Boundary, bound: f32) -> ContactEvent {
    let mut event = ContactEvent::none();

    let left = vertical_wall_contact(host, bounds.left(), bound);
    event.record(left.time, left.new_vel);

    let right = vertical_wall_contact(host, bounds.right(), bound);
    event.record(right.time, right.new_vel);

    let top = horizontal_wall_contact(host, bounds.top(), bound);
    event.record(top.time, top.new_vel);

    let bottom = horizontal_wall_contact(host, bounds.bottom(), bound);
    event.record(bottom.time, bottom.new_vel);

    event
}

/// Contact with a vertical wall at `wall_x`
///
/// The signed surface distance accounts for which side the wall is on; a
/// host with no x velocity can never reach it. Times within `T_EPSILON` of
/// the bound are accepted, favoring detection over a missed reflection.
fn vertical_wall_contact(host: &Host, wall_x: f32, bound: f32) -> ContactEvent {
    if host.vel.x == 0.0 {
        return ContactEvent::none();
    }
    let distance = if wall_x > host.pos.x {
        wall_x - host.pos.x - host.radius
    } else {
        wall_x - host.pos.x + host.radius
    };
    let time = distance / host.vel.x;
    if time > 0.0 && (time < bound || (time - bound).abs() < T_EPSILON) {
        ContactEvent {
            time,
            new_vel: Vec2::new(-host.vel.x, host.vel.y),
        }
    } else {
        ContactEvent::none()
    }
}

/// Contact with a horizontal wall at `wall_y`
fn horizontal_wall_contact(host: &Host, wall_y: f32, bound: f32) -> ContactEvent {
    if host.vel.y == 0.0 {
        return ContactEvent::none();
    }
    let distance = if wall_y > host.pos.y {
        wall_y - host.pos.y - host.radius
    } else {
        wall_y - host.pos.y + host.radius
    };
    let time = distance / host.vel.y;
    if time > 0.0 && (time < bound || (time - bound).abs() < T_EPSILON) {
        ContactEvent {
            time,
            new_vel: Vec2::new(host.vel.x, -host.vel.y),
        }
    } else {
        ContactEvent::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::velocity_from_speed_angle;
    use proptest::prelude::*;

    fn host(pos: Vec2, vel: Vec2, radius: f32, condition: Condition) -> Host {
        Host::new(0, pos, vel, radius, condition)
    }

    #[test]
    fn test_pair_contact_head_on() {
        let a = host(Vec2::ZERO, Vec2::new(5.0, 0.0), 5.0, Condition::Unexposed);
        let b = host(
            Vec2::new(20.0, 0.0),
            Vec2::new(-5.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        let t = pair_contact_time(&a, &b);
        assert!((t - 1.0).abs() < 1e-5);

        // Advancing both by t puts the centers exactly rA + rB apart
        let pa = advance(a.pos, a.vel, t);
        let pb = advance(b.pos, b.vel, t);
        assert!(((pa - pb).length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_pair_contact_no_relative_motion() {
        // Same velocity, separated: lock-step, never touch
        let a = host(Vec2::ZERO, Vec2::new(3.0, 1.0), 5.0, Condition::Unexposed);
        let b = host(
            Vec2::new(50.0, 0.0),
            Vec2::new(3.0, 1.0),
            5.0,
            Condition::Unexposed,
        );
        assert!(pair_contact_time(&a, &b).is_infinite());
    }

    #[test]
    fn test_pair_contact_both_at_rest() {
        let a = host(Vec2::ZERO, Vec2::ZERO, 5.0, Condition::Unexposed);
        let b = host(Vec2::new(30.0, 0.0), Vec2::ZERO, 5.0, Condition::Unexposed);
        assert!(pair_contact_time(&a, &b).is_infinite());
    }

    #[test]
    fn test_pair_contact_diverging() {
        let a = host(Vec2::ZERO, Vec2::new(-5.0, 0.0), 5.0, Condition::Unexposed);
        let b = host(
            Vec2::new(20.0, 0.0),
            Vec2::new(5.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        assert!(pair_contact_time(&a, &b).is_infinite());
    }

    #[test]
    fn test_pair_contact_miss_negative_discriminant() {
        // Parallel tracks too far apart in y to ever touch
        let a = host(Vec2::ZERO, Vec2::new(5.0, 0.0), 5.0, Condition::Unexposed);
        let b = host(
            Vec2::new(100.0, 50.0),
            Vec2::new(-5.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        assert!(pair_contact_time(&a, &b).is_infinite());
    }

    #[test]
    fn test_resolve_elastic_head_on_swaps_velocities() {
        let a = host(Vec2::ZERO, Vec2::new(5.0, 0.0), 5.0, Condition::Unexposed);
        let b = host(
            Vec2::new(20.0, 0.0),
            Vec2::new(-5.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        let (va, vb) = resolve_elastic(&a, &b, 1.0);
        assert!((va.x + 5.0).abs() < 1e-4);
        assert!(va.y.abs() < 1e-4);
        assert!((vb.x - 5.0).abs() < 1e-4);
        assert!(vb.y.abs() < 1e-4);
    }

    #[test]
    fn test_resolve_elastic_glancing_keeps_tangential() {
        // B at rest, A hits it dead center moving in +x: A stops, B takes
        // A's velocity (the classic billiard exchange)
        let a = host(Vec2::ZERO, Vec2::new(4.0, 0.0), 5.0, Condition::Unexposed);
        let b = host(Vec2::new(14.0, 0.0), Vec2::ZERO, 5.0, Condition::Unexposed);
        let t = pair_contact_time(&a, &b);
        assert!((t - 1.0).abs() < 1e-4);
        let (va, vb) = resolve_elastic(&a, &b, t);
        assert!(va.length() < 1e-4);
        assert!((vb.x - 4.0).abs() < 1e-4);
        assert!(vb.y.abs() < 1e-4);
    }

    #[test]
    fn test_transmit_matrix() {
        use Condition::*;
        assert_eq!(transmit(Infected, Unexposed), (Infected, Infected));
        assert_eq!(transmit(Unexposed, Infected), (Infected, Infected));
        assert_eq!(transmit(Infected, Recovered), (Infected, Recovered));
        assert_eq!(transmit(Recovered, Infected), (Recovered, Infected));
        assert_eq!(transmit(Recovered, Unexposed), (Recovered, Unexposed));
        assert_eq!(transmit(Unexposed, Recovered), (Unexposed, Recovered));
        assert_eq!(transmit(Infected, Infected), (Infected, Infected));
        assert_eq!(transmit(Unexposed, Unexposed), (Unexposed, Unexposed));
        assert_eq!(transmit(Recovered, Recovered), (Recovered, Recovered));
    }

    #[test]
    fn test_boundary_contact_right_wall() {
        let bounds = Boundary::new(0.0, 0.0, 100.0, 100.0);
        let h = host(
            Vec2::new(90.0, 50.0),
            Vec2::new(3.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        // Surface reaches x=100 at t = (100 - 90 - 5) / 3
        let event = boundary_contact(&h, &bounds, 2.0);
        assert!((event.time - 5.0 / 3.0).abs() < 1e-4);
        assert_eq!(event.new_vel, Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_boundary_contact_beyond_bound_rejected() {
        let bounds = Boundary::new(0.0, 0.0, 100.0, 100.0);
        let h = host(
            Vec2::new(90.0, 50.0),
            Vec2::new(3.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        // Contact at ~1.67 exceeds a 1.0 bound by more than T_EPSILON
        let event = boundary_contact(&h, &bounds, 1.0);
        assert!(event.time.is_infinite());
    }

    #[test]
    fn test_boundary_contact_within_epsilon_of_bound_accepted() {
        let bounds = Boundary::new(0.0, 0.0, 100.0, 100.0);
        let h = host(
            Vec2::new(92.0, 50.0),
            Vec2::new(3.0, 0.0),
            5.0,
            Condition::Unexposed,
        );
        // Contact at exactly 1.0 against a bound fractionally below it
        let event = boundary_contact(&h, &bounds, 1.0 - 0.005);
        assert!((event.time - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_boundary_contact_zero_perpendicular_velocity() {
        let bounds = Boundary::new(0.0, 0.0, 100.0, 100.0);
        let h = host(
            Vec2::new(50.0, 50.0),
            Vec2::new(0.0, 2.0),
            5.0,
            Condition::Unexposed,
        );
        // Only the bottom wall is reachable; x walls report nothing
        let event = boundary_contact(&h, &bounds, 100.0);
        assert!((event.time - (100.0 - 50.0 - 5.0) / 2.0).abs() < 1e-4);
        assert_eq!(event.new_vel, Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_boundary_contact_keeps_nearest_wall() {
        let bounds = Boundary::new(0.0, 0.0, 100.0, 100.0);
        // Moving diagonally toward the top-left corner, closer to the left
        let h = host(
            Vec2::new(15.0, 40.0),
            Vec2::new(-5.0, -2.0),
            5.0,
            Condition::Unexposed,
        );
        let event = boundary_contact(&h, &bounds, 100.0);
        // Left wall at t = (0 - 15 + 5) / -5 = 2.0, top at t = (0 - 40 + 5) / -2 = 17.5
        assert!((event.time - 2.0).abs() < 1e-4);
        assert_eq!(event.new_vel, Vec2::new(5.0, -2.0));
    }

    proptest! {
        /// Elastic resolution conserves momentum and kinetic energy
        #[test]
        fn prop_elastic_conserves_momentum_and_energy(
            speed_a in 0.5f32..10.0,
            angle_a in 0.0f32..360.0,
            speed_b in 0.5f32..10.0,
            angle_b in 0.0f32..360.0,
            contact_angle in 0.0f32..360.0,
        ) {
            // Place B on a circle of radius rA + rB around A's contact point
            // so the pair touches at t = 0
            let va = velocity_from_speed_angle(speed_a, angle_a);
            let vb = velocity_from_speed_angle(speed_b, angle_b);
            let offset = velocity_from_speed_angle(10.0, contact_angle);
            let a = Host::new(0, Vec2::ZERO, va, 5.0, Condition::Unexposed);
            let b = Host::new(1, offset, vb, 5.0, Condition::Unexposed);

            let (na, nb) = resolve_elastic(&a, &b, 0.0);

            let momentum_before = va + vb;
            let momentum_after = na + nb;
            prop_assert!((momentum_before - momentum_after).length() < 1e-3);

            let energy_before = va.length_squared() + vb.length_squared();
            let energy_after = na.length_squared() + nb.length_squared();
            prop_assert!((energy_before - energy_after).abs() < 1e-2);
        }

        /// Wall reflection preserves speed and flips only the perpendicular
        /// component
        #[test]
        fn prop_wall_reflection_preserves_speed(
            x in 20.0f32..80.0,
            y in 20.0f32..80.0,
            speed in 1.0f32..8.0,
            angle in 0.0f32..360.0,
        ) {
            let bounds = Boundary::new(0.0, 0.0, 100.0, 100.0);
            let vel = velocity_from_speed_angle(speed, angle);
            let h = Host::new(0, Vec2::new(x, y), vel, 5.0, Condition::Unexposed);

            let event = boundary_contact(&h, &bounds, f32::INFINITY);
            if event.time.is_finite() {
                prop_assert!((event.new_vel.length() - vel.length()).abs() < 1e-4);
                // Exactly one component is negated
                let x_flipped = (event.new_vel.x + vel.x).abs() < 1e-5
                    && (event.new_vel.y - vel.y).abs() < 1e-5;
                let y_flipped = (event.new_vel.y + vel.y).abs() < 1e-5
                    && (event.new_vel.x - vel.x).abs() < 1e-5;
                prop_assert!(x_flipped || y_flipped);
            }
        }
    }
}
