use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

pub struct SunPlugin;

impl Plugin for SunPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Sun>().add_observer(attach_light);
    }
}

/// Marks a body the rest of the system is lit from. The scene spawner
/// tags bodies whose material has emissive power.
#[derive(Debug, Clone, Copy, Component, Reflect)]
#[reflect(Component)]
pub struct Sun;

fn attach_light(trigger: Trigger<OnAdd, Sun>, mut commands: Commands) {
    debug!("Attaching light to sun {}", trigger.entity());
    commands.entity(trigger.entity()).insert((
        PointLight {
            color: Color::WHITE,
            intensity: 4.0e8,
            range: 500.0,
            shadows_enabled: false,
            ..Default::default()
        },
        NotShadowCaster,
    ));
}
