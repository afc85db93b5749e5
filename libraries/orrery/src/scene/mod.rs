use bevy::prelude::*;

use crate::graph::{NodeId, SceneGraph};
use crate::sun::Sun;

mod error;
mod manifest;

pub use error::SceneError;
pub use manifest::{BodyManifest, BodyMaterial, CameraConfig, SceneManifest};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SceneCamera>()
            .register_type::<CameraConfig>()
            .add_systems(Startup, spawn_scene.run_if(resource_exists::<LoadedScene>));
    }
}

/// The validated scene description, inserted by the application before the
/// schedule first runs.
#[derive(Debug, Clone, Resource)]
pub struct LoadedScene(pub SceneManifest);

/// Marks the entity the application should turn into the live camera.
#[derive(Debug, Copy, Clone, Default, Reflect, Component)]
#[reflect(Component)]
pub struct SceneCamera;

fn spawn_scene(
    scene: Res<LoadedScene>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(36, 18));
    let mut graph = SceneGraph::default();
    spawn_body(
        &mut commands,
        &mut graph,
        None,
        &scene.0.root,
        &sphere,
        &mut materials,
        &asset_server,
    );
    info!("Spawned {} bodies", graph.len());
    commands.insert_resource(graph);

    let camera = scene.0.camera;
    commands.spawn((
        Name::new("Scene Camera"),
        SceneCamera,
        camera,
        Transform::from_translation(Vec3::from_array(camera.position)),
    ));
}

fn spawn_body(
    commands: &mut Commands,
    graph: &mut SceneGraph,
    parent: Option<NodeId>,
    manifest: &BodyManifest,
    sphere: &Handle<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
) {
    let body = manifest.body();
    let material = materials.add(body_material(&manifest.material, asset_server));
    let mut entity = commands.spawn((
        Name::new(manifest.name.clone()),
        body,
        Mesh3d(sphere.clone()),
        MeshMaterial3d(material),
        Transform::from_scale(Vec3::splat(body.radius)),
    ));
    if manifest.material.emissive > 0.0 {
        entity.insert(Sun);
    }
    let visual = entity.id();
    let node = graph.insert(parent, body, visual);
    for satellite in &manifest.satellites {
        spawn_body(
            commands,
            graph,
            Some(node),
            satellite,
            sphere,
            materials,
            asset_server,
        );
    }
}

pub fn body_material(material: &BodyMaterial, asset_server: &AssetServer) -> StandardMaterial {
    let base_color: LinearRgba = Srgba::from_f32_array_no_alpha(material.color).into();
    StandardMaterial {
        base_color: base_color.into(),
        base_color_texture: material
            .texture
            .as_ref()
            .map(|path| asset_server.load(path.clone())),
        emissive: base_color * material.emissive,
        perceptual_roughness: 1.0,
        ..Default::default()
    }
}
