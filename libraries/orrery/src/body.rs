use bevy::prelude::*;
use std::f64::consts::TAU;

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OrbitalBody>();
    }
}

/// Orbital and rotational parameters of a single body, fixed at scene
/// construction.
///
/// Speeds are signed angular velocities in radians per second; a negative
/// value reverses direction.
#[derive(Debug, Clone, Copy, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitalBody {
    /// Visual scale of the body. Applied at draw time only, never part of
    /// the composed hierarchy transform.
    pub radius: f32,
    /// Distance from the parent's origin in the orbital plane.
    pub orbit_radius: f32,
    /// Angular velocity of revolution around the parent's up axis.
    pub orbit_speed: f32,
    /// Angular velocity of self-rotation around the body's own up axis.
    pub rotation_speed: f32,
}

impl OrbitalBody {
    /// Transform of this body relative to its parent at simulation time
    /// `time`: revolve around the parent's up axis, step out to the orbit
    /// radius, then spin around the body's own up axis. The spin comes
    /// after the translation so it turns the body in place.
    pub fn local_transform(&self, time: f64) -> Transform {
        let orbit = Quat::from_rotation_y(wrap_angle(self.orbit_speed, time));
        let spin = Quat::from_rotation_y(wrap_angle(self.rotation_speed, time));
        Transform {
            translation: orbit * Vec3::new(self.orbit_radius, 0.0, 0.0),
            rotation: orbit * spin,
            scale: Vec3::ONE,
        }
    }
}

/// Accumulates the angle in f64 and wraps it into [0, TAU) before
/// narrowing, so precision holds up over long simulation times.
fn wrap_angle(speed: f32, time: f64) -> f32 {
    (speed as f64 * time).rem_euclid(TAU) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    fn earth() -> OrbitalBody {
        OrbitalBody {
            radius: 0.4,
            orbit_radius: 6.0,
            orbit_speed: 0.4,
            rotation_speed: 1.0,
        }
    }

    #[test]
    fn reference_pose_at_time_zero() {
        let transform = earth().local_transform(0.0);
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.translation, Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn half_orbit_lands_on_the_far_side() {
        let body = OrbitalBody {
            radius: 1.0,
            orbit_radius: 10.0,
            orbit_speed: PI,
            rotation_speed: 0.0,
        };
        let position = body.local_transform(1.0).translation;
        assert_abs_diff_eq!(position.x, -10.0, epsilon = 1e-3);
        assert_abs_diff_eq!(position.y, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(position.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn deterministic_for_equal_times() {
        let body = earth();
        assert_eq!(body.local_transform(12.375), body.local_transform(12.375));
    }

    #[test]
    fn reversed_speed_mirrors_reversed_time() {
        let reversed = OrbitalBody {
            orbit_speed: -0.4,
            ..earth()
        };
        let forward = earth().local_transform(-7.25);
        let backward = reversed.local_transform(7.25);
        assert_eq!(forward.translation, backward.translation);
    }

    #[test]
    fn zero_orbit_radius_spins_in_place() {
        let sun = OrbitalBody {
            radius: 1.5,
            orbit_radius: 0.0,
            orbit_speed: 0.0,
            rotation_speed: 0.2,
        };
        let transform = sun.local_transform(3.0);
        assert_eq!(transform.translation, Vec3::ZERO);
        assert_eq!(
            transform.rotation,
            Quat::from_rotation_y(wrap_angle(0.2, 3.0))
        );
    }

    #[test]
    fn angles_stay_bounded_over_long_runs() {
        let body = earth();
        let transform = body.local_transform(1.0e9);
        assert!(transform.translation.is_finite());
        assert_abs_diff_eq!(transform.translation.length(), 6.0, epsilon = 1e-3);
    }
}
