pub mod analyzer;
pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod integrator;
pub mod pointer;
pub mod scene;

pub use analyzer::analyze_config;
pub use config::{ConfigError, SceneConfig, SceneSetup};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use engine::{Body, PhysicsParams, World};
pub use integrator::step;
pub use pointer::{screen_to_ndc, Camera};
pub use scene::{
    body_states, build_scene, build_scene_from_file, build_scene_with_diagnostics, step_scene,
    BodyState, FrameStats, Scene, SceneError,
};
