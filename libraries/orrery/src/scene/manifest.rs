use crate::body::OrbitalBody;
use crate::scene::error::SceneError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod serialize_as_degrees {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_degrees().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f32, D::Error>
    where
        D: Deserializer<'de>,
    {
        f32::deserialize(deserializer).map(|v| v.to_radians())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BodyMaterial {
    pub color: [f32; 3],
    #[serde(default)]
    pub emissive: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

/// One body of the scene description. Satellites are an ordered list;
/// their order in the file is the traversal (and therefore draw) order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BodyManifest {
    pub name: String,
    pub radius: f32,
    #[serde(default)]
    pub orbit_radius: f32,
    /// Degrees per second in the manifest, radians per second in memory.
    #[serde(default, with = "serialize_as_degrees")]
    pub orbit_speed: f32,
    #[serde(default, with = "serialize_as_degrees")]
    pub rotation_speed: f32,
    pub material: BodyMaterial,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub satellites: Vec<BodyManifest>,
}

impl BodyManifest {
    pub fn body(&self) -> OrbitalBody {
        OrbitalBody {
            radius: self.radius,
            orbit_radius: self.orbit_radius,
            orbit_speed: self.orbit_speed,
            rotation_speed: self.rotation_speed,
        }
    }

    fn validate(&self, asset_root: &Path) -> Result<(), SceneError> {
        let params = [
            self.radius,
            self.orbit_radius,
            self.orbit_speed,
            self.rotation_speed,
        ];
        if params.iter().any(|value| !value.is_finite()) {
            return Err(SceneError::NonFinite {
                name: self.name.clone(),
            });
        }
        if self.radius < 0.0 {
            return Err(SceneError::NegativeRadius {
                name: self.name.clone(),
                radius: self.radius,
            });
        }
        if self.orbit_radius < 0.0 {
            return Err(SceneError::NegativeOrbitRadius {
                name: self.name.clone(),
                orbit_radius: self.orbit_radius,
            });
        }
        if let Some(texture) = &self.material.texture {
            let path = asset_root.join(texture);
            if !path.exists() {
                return Err(SceneError::MissingTexture {
                    name: self.name.clone(),
                    path,
                });
            }
        }
        for satellite in &self.satellites {
            satellite.validate(asset_root)?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        1 + self.satellites.iter().map(Self::count).sum::<usize>()
    }
}

/// Initial pose of the scene camera. Angles are degrees in the manifest.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Component, Reflect)]
#[reflect(Component)]
#[serde(rename_all = "kebab-case")]
pub struct CameraConfig {
    pub position: [f32; 3],
    #[serde(default, with = "serialize_as_degrees")]
    pub yaw: f32,
    #[serde(default, with = "serialize_as_degrees")]
    pub pitch: f32,
    #[serde(default = "default_fov", with = "serialize_as_degrees")]
    pub fov: f32,
}

fn default_fov() -> f32 {
    45f32.to_radians()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneManifest {
    pub root: BodyManifest,
    pub camera: CameraConfig,
}

impl SceneManifest {
    /// Reads, parses and validates a scene description. Any failure here
    /// aborts startup before the frame loop exists.
    pub fn from_path(path: &Path, asset_root: &Path) -> Result<Self, SceneError> {
        let input = std::fs::read_to_string(path)?;
        let manifest = serde_yaml::from_str::<Self>(&input)?;
        manifest.validate(asset_root)?;
        Ok(manifest)
    }

    pub fn validate(&self, asset_root: &Path) -> Result<(), SceneError> {
        self.root.validate(asset_root)
    }

    /// Total number of bodies, the root included.
    pub fn body_count(&self) -> usize {
        self.root.count()
    }
}
