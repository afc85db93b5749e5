use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("body {name:?}: negative radius {radius}")]
    NegativeRadius { name: String, radius: f32 },
    #[error("body {name:?}: negative orbit radius {orbit_radius}")]
    NegativeOrbitRadius { name: String, orbit_radius: f32 },
    #[error("body {name:?}: non-finite orbital parameters")]
    NonFinite { name: String },
    #[error("body {name:?}: texture {path:?} not found")]
    MissingTexture { name: String, path: PathBuf },
}
