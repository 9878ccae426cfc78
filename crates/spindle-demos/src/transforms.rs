//! Camera and animation math.
//!
//! The camera is fixed, looking at the origin; the cube spins with yaw and
//! roll both equal to `2 × elapsed` radians (a visual choice, not physics).

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Vertical field of view: 75 degrees.
pub const FOV_Y: f32 = 1.308_997;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Fixed eye position, looking at the origin.
pub const EYE: Vec3 = Vec3::new(0.0, 1.5, 4.0);

/// Yaw and roll at logical time `elapsed`, in radians.
pub fn rotation_angles(elapsed: f32) -> (f32, f32) {
    (2.0 * elapsed, 2.0 * elapsed)
}

pub fn model_matrix(elapsed: f32) -> Mat4 {
    let (yaw, roll) = rotation_angles(elapsed);
    Mat4::from_quat(Quat::from_euler(EulerRot::YXZ, yaw, 0.0, roll))
}

pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y)
}

pub fn projection_matrix(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y, aspect, Z_NEAR, Z_FAR)
}

/// View-projection for the spinning cube: projection × view × rotation.
pub fn cube_view_proj(elapsed: f32, aspect: f32) -> Mat4 {
    projection_matrix(aspect) * view_matrix() * model_matrix(elapsed)
}

/// View-projection for the skybox: projection × view, no model term — the box
/// never rotates with the cube.
pub fn sky_view_proj(aspect: f32) -> Mat4 {
    projection_matrix(aspect) * view_matrix()
}

/// Grayscale heartbeat shown while assets load: `|sin(elapsed)|`, in `[0, 1]`.
pub fn loading_pulse(elapsed: f32) -> f32 {
    elapsed.sin().abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn rotation_is_twice_elapsed() {
        for t in [0.0, 0.5, 1.0, 10.0, 1234.5] {
            let (yaw, roll) = rotation_angles(t);
            assert_eq!(yaw, 2.0 * t);
            assert_eq!(roll, 2.0 * t);
        }
    }

    #[test]
    fn quarter_pi_gives_quarter_turn() {
        let (yaw, roll) = rotation_angles(FRAC_PI_4);
        assert_eq!(yaw, FRAC_PI_2);
        assert_eq!(roll, FRAC_PI_2);
    }

    #[test]
    fn rotation_is_monotonic() {
        let mut prev = -1.0;
        for i in 0..1000 {
            let t = i as f32 * 0.01;
            let (yaw, _) = rotation_angles(t);
            assert!(yaw > prev);
            prev = yaw;
        }
    }

    #[test]
    fn cube_view_proj_includes_rotation() {
        let aspect = 640.0 / 480.0;
        let t = 0.7;
        let expected = projection_matrix(aspect) * view_matrix() * model_matrix(t);
        assert_eq!(cube_view_proj(t, aspect), expected);
        // With a nonzero rotation the two matrices must differ.
        assert_ne!(cube_view_proj(t, aspect), sky_view_proj(aspect));
    }

    #[test]
    fn sky_view_proj_has_no_model_term() {
        let aspect = 640.0 / 480.0;
        assert_eq!(
            sky_view_proj(aspect),
            projection_matrix(aspect) * view_matrix()
        );
        // Time-independent by construction.
        assert_eq!(sky_view_proj(aspect), sky_view_proj(aspect));
    }

    #[test]
    fn pulse_stays_in_unit_range() {
        for i in 0..1000 {
            let p = loading_pulse(i as f32 * 0.037);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn pulse_matches_abs_sin() {
        for t in [0.0, 0.3, 1.0, PI, 4.5] {
            assert_eq!(loading_pulse(t), t.sin().abs());
        }
    }
}
