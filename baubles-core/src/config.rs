//! Scene configuration loaded from YAML.
//!
//! Every field has a default, so an empty document gives the reference
//! scene: 40 unit spheres spread over a 20-unit cube, pulled toward the
//! pointer on the `z = 0` plane.
//!
//! ```yaml
//! physics:
//!   radius: 1.0
//!   attraction_radius_sq: 9.0
//!   attraction_strength: 200.0
//!   centering_strength: -80.0
//!   centering_scale: 0.1
//!   gravity: [0.0, 2.0, 0.0]
//!   linear_damping: 0.65
//! setup:
//!   count: 40
//!   spread: 10.0
//!   seed: 0
//! camera:
//!   position: [0.0, 0.0, 20.0]
//!   look_at: [0.0, 0.0, 0.0]
//!   fov_y_degrees: 35.0
//!   aspect: 1.0
//!   near: 1.0
//!   far: 40.0
//! max_frame_dt: 0.1
//! ```

use crate::engine::PhysicsParams;
use crate::pointer::Camera;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// How the bodies are placed when a scene is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSetup {
    pub count: usize,
    /// Half-extent of the cube the bodies start in
    pub spread: f32,
    pub seed: u64,
}

impl Default for SceneSetup {
    fn default() -> Self {
        Self {
            count: 40,
            spread: 10.0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub physics: PhysicsParams,
    pub setup: SceneSetup,
    pub camera: Camera,
    /// Frame deltas above this are logged, never clamped
    pub max_frame_dt: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsParams::default(),
            setup: SceneSetup::default(),
            camera: Camera::default(),
            max_frame_dt: 0.1,
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document, treat it as all defaults
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&source)?;
        log::debug!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
