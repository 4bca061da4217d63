//! Discrete-time planar pose integration.
//!
//! The robot-frame displacement from kinematics is rotated into the field
//! frame at the midpoint heading, which keeps the step second-order
//! accurate under a constant turn rate.

use serde::{Deserialize, Serialize};
use simcore::{normalize_radians, BodyDelta, Model, Pose};

/// Position limits for a square field.
///
/// The chassis centroid may not leave the square of half-width
/// `half_field_width - half_bot_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub half_field_width: f64,
    pub half_bot_width: f64,
}

impl FieldBounds {
    pub fn new(half_field_width: f64, half_bot_width: f64) -> Self {
        FieldBounds {
            half_field_width,
            half_bot_width,
        }
    }

    /// Largest centroid coordinate magnitude still on the field.
    pub fn limit(&self) -> f64 {
        self.half_field_width - self.half_bot_width
    }
}

/// Integrates `(x, y, heading)` from per-tick robot-frame displacements.
///
/// Heading stays in `(-pi, pi]` via a single wrap per step (per-tick
/// heading changes are far below pi at realizable motor rates), and the
/// position saturates hard at the field bounds with no bounce.
#[derive(Debug, Clone)]
pub struct PoseIntegrator {
    pose: Pose,
    bounds: FieldBounds,
}

impl PoseIntegrator {
    pub fn new(bounds: FieldBounds) -> Self {
        PoseIntegrator {
            pose: Pose::default(),
            bounds,
        }
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    /// Place the robot, applying the same wrap and clamp invariants the
    /// integrator maintains.
    pub fn set_pose(&mut self, pose: Pose) {
        let limit = self.bounds.limit();
        self.pose = Pose {
            x: pose.x.clamp(-limit, limit),
            y: pose.y.clamp(-limit, limit),
            heading: normalize_radians(pose.heading),
        };
    }

    /// Advance the pose by one tick's displacement.
    pub fn step(&mut self, delta: &BodyDelta) {
        let mid_heading = self.pose.heading + delta.dtheta / 2.0;
        let (sin, cos) = mid_heading.sin_cos();

        self.pose.x += delta.dx * cos - delta.dy * sin;
        self.pose.y += delta.dx * sin + delta.dy * cos;
        self.pose.heading = normalize_radians(self.pose.heading + delta.dtheta);

        let limit = self.bounds.limit();
        self.pose.x = self.pose.x.clamp(-limit, limit);
        self.pose.y = self.pose.y.clamp(-limit, limit);
    }
}

impl Model for PoseIntegrator {
    fn reset(&mut self) {
        self.pose = Pose::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn integrator() -> PoseIntegrator {
        PoseIntegrator::new(FieldBounds::new(72.0, 9.0))
    }

    #[test]
    fn test_identity_at_rest() {
        let mut pose = integrator();
        for _ in 0..100 {
            pose.step(&BodyDelta::default());
        }
        assert_eq!(pose.pose(), Pose::default());
    }

    #[test]
    fn test_forward_moves_along_heading() {
        let mut pose = integrator();
        pose.set_pose(Pose::new(0.0, 0.0, FRAC_PI_2));
        // Robot-frame +y is forward; at heading pi/2 forward points -x.
        pose.step(&BodyDelta {
            dy: 2.0,
            ..BodyDelta::default()
        });
        assert_relative_eq!(pose.pose().x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(pose.pose().y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_midpoint_heading_used_for_translation() {
        let mut pose = integrator();
        let dtheta = 0.2;
        pose.step(&BodyDelta {
            dy: 1.0,
            dtheta,
            ..BodyDelta::default()
        });
        let mid = dtheta / 2.0;
        assert_relative_eq!(pose.pose().x, -mid.sin(), epsilon = 1e-12);
        assert_relative_eq!(pose.pose().y, mid.cos(), epsilon = 1e-12);
        assert_relative_eq!(pose.pose().heading, dtheta, epsilon = 1e-12);
    }

    #[test]
    fn test_heading_wraps_once_past_pi() {
        let mut pose = integrator();
        let eps = 1e-3;
        pose.set_pose(Pose::new(0.0, 0.0, PI - eps));
        pose.step(&BodyDelta {
            dtheta: 2.0 * eps,
            ..BodyDelta::default()
        });
        assert_relative_eq!(pose.pose().heading, -PI + eps, epsilon = 1e-12);
    }

    #[test]
    fn test_position_clamps_at_field_edge() {
        let mut pose = integrator();
        for _ in 0..500 {
            pose.step(&BodyDelta {
                dy: 1.0,
                ..BodyDelta::default()
            });
        }
        assert_relative_eq!(pose.pose().y, 63.0, epsilon = 1e-12);
        // Still clamped coming back across the other edge.
        for _ in 0..500 {
            pose.step(&BodyDelta {
                dy: -1.0,
                ..BodyDelta::default()
            });
        }
        assert_relative_eq!(pose.pose().y, -63.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut pose = integrator();
        pose.set_pose(Pose::new(10.0, -4.0, 1.0));
        pose.reset();
        assert_eq!(pose.pose(), Pose::default());
    }
}
