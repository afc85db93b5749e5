use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub mod body;
pub mod clock;
pub mod graph;
pub mod scene;
pub mod sun;

/// Per-frame phases of the simulation. Applications order their input
/// handling before [`SimSet::Tick`]; the two phases themselves always run
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum SimSet {
    /// Advance the simulation clock.
    Tick,
    /// Recompute world transforms from the scene graph.
    Update,
}

pub struct OrreryPlugins;

impl PluginGroup for OrreryPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(body::BodyPlugin)
            .add(clock::ClockPlugin)
            .add(graph::GraphPlugin)
            .add(scene::ScenePlugin)
            .add(sun::SunPlugin)
    }
}
