use bevy::prelude::*;

pub mod components;
mod systems;

/// Label for the camera update so applications can order their own systems
/// around input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct FlyCamSet;

pub struct FlyCamPlugin;

impl Plugin for FlyCamPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::FlyCam>()
            .register_type::<components::FlyCamState>()
            .add_systems(Startup, systems::grab_cursor)
            .add_systems(
                Update,
                systems::fly_camera
                    .in_set(FlyCamSet)
                    .run_if(any_with_component::<components::FlyCamState>),
            );
    }
}
