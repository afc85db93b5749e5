use bevy::prelude::*;
use bevy::window::WindowResolution;
use fly_cam::components::{FlyCam, FlyCamState};
use fly_cam::{FlyCamPlugin, FlyCamSet};
use orrery::scene::{CameraConfig, LoadedScene, SceneCamera, SceneError, SceneManifest};
use orrery::{OrreryPlugins, SimSet};
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_SCENE: &str = "assets/scenes/sol.system.yaml";
const ASSET_ROOT: &str = "assets";

pub(crate) struct AppSettings {
    pub(crate) resolution: WindowResolution,
    pub(crate) scene: PathBuf,
}

pub(crate) fn load_scene(path: &Path) -> Result<SceneManifest, SceneError> {
    SceneManifest::from_path(path, Path::new(ASSET_ROOT))
}

/// Loads and validates the scene first, then assembles the app around it.
/// A scene that fails to load never reaches the frame loop.
pub(crate) fn get_app(settings: AppSettings) -> Result<App, SceneError> {
    let manifest = load_scene(&settings.scene)?;
    let mut app = App::new();
    app.add_plugins((
        DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".to_string(),
                resolution: settings.resolution,
                ..default()
            }),
            ..default()
        }),
        FlyCamPlugin,
    ))
    .add_plugins(OrreryPlugins)
    .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.05)))
    .insert_resource(LoadedScene(manifest))
    .configure_sets(Update, (FlyCamSet, SimSet::Tick, SimSet::Update).chain())
    .add_systems(Update, exit_on_escape)
    .add_observer(on_add_scene_camera);
    Ok(app)
}

fn exit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

fn on_add_scene_camera(trigger: Trigger<OnAdd, SceneCamera>, mut commands: Commands) {
    debug!("Add scene camera to {}", trigger.entity());
    commands
        .entity(trigger.entity())
        .queue(|entity: Entity, world: &mut World| {
            let mut entity_mut = world.entity_mut(entity);
            let config = *entity_mut.get::<CameraConfig>().unwrap();
            entity_mut.insert((
                Camera3d::default(),
                Camera {
                    hdr: true,
                    ..default()
                },
                Projection::Perspective(PerspectiveProjection {
                    fov: config.fov,
                    ..default()
                }),
                FlyCam::default(),
                FlyCamState {
                    yaw: config.yaw,
                    pitch: config.pitch,
                    fov: config.fov,
                },
            ));
        });
}
