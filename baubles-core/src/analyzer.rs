//! Static checks on a scene configuration
//!
//! Runs before a scene is built so that bad constants are reported up front
//! instead of showing up as NaN positions a few frames later.

use crate::config::SceneConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use glam::Vec3;

const UP_PARALLEL_EPSILON: f32 = 1e-8;

/// Analyze a config and return diagnostics
pub fn analyze_config(config: &SceneConfig) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let physics = &config.physics;

    let scalars = [
        ("physics.radius", physics.radius),
        ("physics.attraction_radius_sq", physics.attraction_radius_sq),
        ("physics.attraction_strength", physics.attraction_strength),
        ("physics.centering_strength", physics.centering_strength),
        ("physics.centering_scale", physics.centering_scale),
        ("physics.linear_damping", physics.linear_damping),
        ("setup.spread", config.setup.spread),
        ("max_frame_dt", config.max_frame_dt),
    ];
    for (field, value) in scalars {
        if !value.is_finite() {
            diagnostics.push(Diagnostic::error(field, format!("must be finite, got {}", value)));
        }
    }
    if !physics.gravity.is_finite() {
        diagnostics.push(Diagnostic::error("physics.gravity", "must be finite"));
    }

    if physics.radius < 0.0 {
        diagnostics.push(Diagnostic::error(
            "physics.radius",
            format!("must not be negative, got {}", physics.radius),
        ));
    }
    if config.setup.spread < 0.0 {
        diagnostics.push(Diagnostic::error(
            "setup.spread",
            format!("must not be negative, got {}", config.setup.spread),
        ));
    }
    if config.max_frame_dt < 0.0 {
        diagnostics.push(Diagnostic::error(
            "max_frame_dt",
            format!("must not be negative, got {}", config.max_frame_dt),
        ));
    }

    if config.setup.count == 0 {
        diagnostics.push(Diagnostic::warning("setup.count", "scene has no bodies"));
    }
    if physics.attraction_radius_sq <= 0.0 && physics.attraction_strength != 0.0 {
        diagnostics.push(Diagnostic::warning(
            "physics.attraction_radius_sq",
            "attraction can never fire with a non-positive radius",
        ));
    }

    // Damping factor 1 - c*dt turns negative past dt = 1/c
    let factor = 1.0 - physics.linear_damping * config.max_frame_dt;
    if factor < 0.0 {
        diagnostics.push(Diagnostic::warning(
            "physics.linear_damping",
            format!(
                "damping factor at max_frame_dt {} is {}, velocities will flip direction",
                config.max_frame_dt, factor
            ),
        ));
    }

    let camera = &config.camera;
    if camera.near <= 0.0 || camera.far <= camera.near {
        diagnostics.push(Diagnostic::error(
            "camera",
            format!("need 0 < near < far, got near {} far {}", camera.near, camera.far),
        ));
    }
    if camera.position == camera.look_at {
        diagnostics.push(Diagnostic::error("camera", "position and look_at coincide"));
    } else {
        // look_at_rh with +Y up degenerates to a NaN view matrix
        let forward = (camera.look_at - camera.position).normalize_or_zero();
        if forward.cross(Vec3::Y).length_squared() < UP_PARALLEL_EPSILON {
            diagnostics.push(Diagnostic::error(
                "camera",
                "view direction is parallel to the +Y up vector",
            ));
        }
    }

    diagnostics
}
