//! Pure straight-line movement step. One call advances one logical tick.
use bevy::prelude::*;

use super::components::Facing;

/// Outcome of advancing one tick toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub position: Vec2,
    pub arrived: bool,
    /// New facing, or `None` when the horizontal delta is zero and the
    /// previous facing should be kept.
    pub facing: Option<Facing>,
}

/// Advances `position` toward `target` by at most `speed` world units.
/// Snaps onto the target (and reports arrival) once the remaining distance
/// drops below one step.
pub fn step_toward(position: Vec2, target: Vec2, speed: f32) -> Step {
    let delta = target - position;
    let distance = delta.length();

    let facing = if delta.x > 0.0 {
        Some(Facing::Right)
    } else if delta.x < 0.0 {
        Some(Facing::Left)
    } else {
        None
    };

    if distance < speed {
        return Step {
            position: target,
            arrived: true,
            facing,
        };
    }

    Step {
        position: position + delta * (speed / distance),
        arrived: false,
        facing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f32 = 6.0;
    const EPSILON: f32 = 1e-4;

    #[test]
    fn zero_distance_snaps_and_arrives() {
        let here = Vec2::new(42.0, 17.0);
        let step = step_toward(here, here, SPEED);
        assert!(step.arrived);
        assert_eq!(step.position, here);
        assert_eq!(step.facing, None);
    }

    #[test]
    fn within_one_step_snaps_onto_target() {
        let step = step_toward(Vec2::ZERO, Vec2::new(3.0, 4.0), SPEED);
        assert!(step.arrived);
        assert_eq!(step.position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn far_target_decreases_distance_by_exactly_one_step() {
        let start = Vec2::new(100.0, 200.0);
        let target = Vec2::new(400.0, -50.0);
        let before = start.distance(target);

        let step = step_toward(start, target, SPEED);
        assert!(!step.arrived);
        let after = step.position.distance(target);
        assert!((before - after - SPEED).abs() < EPSILON);
    }

    #[test]
    fn repeated_steps_eventually_arrive() {
        let mut position = Vec2::ZERO;
        let target = Vec2::new(57.0, -33.0);
        let mut ticks = 0;
        loop {
            let step = step_toward(position, target, SPEED);
            position = step.position;
            ticks += 1;
            if step.arrived {
                break;
            }
            assert!(ticks < 1000, "walk must terminate");
        }
        assert_eq!(position, target);
    }

    #[test]
    fn facing_follows_horizontal_delta_sign() {
        assert_eq!(
            step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), SPEED).facing,
            Some(Facing::Right)
        );
        assert_eq!(
            step_toward(Vec2::ZERO, Vec2::new(-10.0, 0.0), SPEED).facing,
            Some(Facing::Left)
        );
        // Straight vertical walk keeps the previous facing.
        assert_eq!(
            step_toward(Vec2::ZERO, Vec2::new(0.0, 10.0), SPEED).facing,
            None
        );
    }
}
