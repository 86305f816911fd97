use crate::analyzer::analyze_config;
use crate::config::{SceneConfig, SceneSetup};
use crate::diagnostics::{summarize_errors, Diagnostics};
use crate::engine::{Body, PhysicsParams, World};
use crate::pointer::Camera;
use glam::{Vec2, Vec3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Snapshot of one body for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub index: usize,
    pub pos: Vec3,
    pub vel: Vec3,
}

/// Summary of the scene right after a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub elapsed: f32,
    pub kinetic_energy: f32,
    pub overlapping_pairs: usize,
    pub attracted: usize,
}

/// A running simulation: the world, the attractor and the frame clock
#[derive(Debug, Clone)]
pub struct Scene {
    pub world: World,
    pub target: Vec3,
    pub camera: Camera,
    pub frame: u64,
    pub elapsed: f32,
    setup: SceneSetup,
    max_frame_dt: f32,
    warned_large_dt: bool,
}

impl Scene {
    /// Rebuild the bodies from the stored setup, same seed, same layout
    pub fn reset(&mut self) {
        self.world.bodies = spawn_bodies(&self.setup);
        self.target = Vec3::ZERO;
        self.frame = 0;
        self.elapsed = 0.0;
        self.warned_large_dt = false;
        log::debug!("scene reset with {} bodies", self.world.bodies.len());
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Move the attractor under a pointer given in normalized device
    /// coordinates. Keeps the previous target if the ray misses the plane.
    pub fn set_pointer(&mut self, ndc: Vec2) -> Option<Vec3> {
        let hit = self.camera.pointer_to_plane(ndc)?;
        self.target = hit;
        Some(hit)
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.world.params
    }

    pub fn body_count(&self) -> usize {
        self.world.bodies.len()
    }
}

/// Place `setup.count` resting bodies uniformly inside the cube
/// `[-spread, spread]^3`
pub fn spawn_bodies(setup: &SceneSetup) -> Vec<Body> {
    let mut rng = fastrand::Rng::with_seed(setup.seed);
    let mut coord = || (rng.f32() * 2.0 - 1.0) * setup.spread;
    (0..setup.count)
        .map(|_| {
            let x = coord();
            let y = coord();
            let z = coord();
            Body::at(Vec3::new(x, y, z))
        })
        .collect()
}

/// Build a scene from a config, refusing configs with errors
pub fn build_scene(config: &SceneConfig) -> Result<Scene, SceneError> {
    let (scene, _diagnostics) = build_scene_with_diagnostics(config)?;
    Ok(scene)
}

/// Build a scene and hand back any warnings found along the way
pub fn build_scene_with_diagnostics(
    config: &SceneConfig,
) -> Result<(Scene, Diagnostics), SceneError> {
    let diagnostics = analyze_config(config);
    if diagnostics.has_errors() {
        return Err(SceneError::InvalidConfig(summarize_errors(&diagnostics)));
    }
    for warning in diagnostics.warnings() {
        log::warn!("{}", warning);
    }

    let bodies = spawn_bodies(&config.setup);
    log::debug!(
        "built scene: {} bodies, spread {}, seed {}",
        bodies.len(),
        config.setup.spread,
        config.setup.seed
    );

    let scene = Scene {
        world: World::with_bodies(bodies, config.physics),
        target: Vec3::ZERO,
        camera: config.camera,
        frame: 0,
        elapsed: 0.0,
        setup: config.setup,
        max_frame_dt: config.max_frame_dt,
        warned_large_dt: false,
    };
    Ok((scene, diagnostics))
}

/// Load a YAML config from disk and build a scene from it
pub fn build_scene_from_file(path: impl AsRef<std::path::Path>) -> Result<Scene, SceneError> {
    let config = SceneConfig::load(path)?;
    build_scene(&config)
}

/// Advance the scene by one frame toward its current target
pub fn step_scene(scene: &mut Scene, dt: f32) -> FrameStats {
    if dt > scene.max_frame_dt && !scene.warned_large_dt {
        log::warn!(
            "frame delta {}s exceeds {}s, bodies may tunnel",
            dt,
            scene.max_frame_dt
        );
        scene.warned_large_dt = true;
    }

    scene.world.step(scene.target, dt);
    scene.frame += 1;
    scene.elapsed += dt;

    let stats = FrameStats {
        frame: scene.frame,
        elapsed: scene.elapsed,
        kinetic_energy: scene.world.kinetic_energy(),
        overlapping_pairs: scene.world.overlapping_pairs(),
        attracted: scene.world.attracted_count(scene.target),
    };
    log::trace!(
        "frame {}: energy {:.4}, overlaps {}, attracted {}",
        stats.frame,
        stats.kinetic_energy,
        stats.overlapping_pairs,
        stats.attracted
    );
    stats
}

/// Per-body positions and velocities for placing render instances
pub fn body_states(scene: &Scene) -> Vec<BodyState> {
    scene
        .world
        .bodies
        .iter()
        .enumerate()
        .map(|(index, b)| BodyState {
            index,
            pos: b.pos,
            vel: b.vel,
        })
        .collect()
}
