use bevy::prelude::*;

use crate::body::OrbitalBody;
use crate::clock::SimClock;
use crate::SimSet;

pub struct GraphPlugin;

impl Plugin for GraphPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            update_scene
                .in_set(SimSet::Update)
                .run_if(resource_exists::<SceneGraph>),
        );
    }
}

/// Handle to a node in a [`SceneGraph`]. Only valid for the graph that
/// issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct SceneNode {
    body: OrbitalBody,
    parent: Option<NodeId>,
    visual: Entity,
    world: Transform,
}

/// The ownership tree of orbital bodies, stored as a flat list in which
/// every parent precedes its children. A single forward pass is therefore
/// a top-down traversal, and insertion order doubles as traversal order.
#[derive(Debug, Default, Resource)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Adds a body under `parent` (`None` roots it at the world origin)
    /// and returns its handle. A parent must already be in the graph, so
    /// the hierarchy cannot form a cycle.
    pub fn insert(&mut self, parent: Option<NodeId>, body: OrbitalBody, visual: Entity) -> NodeId {
        if let Some(NodeId(index)) = parent {
            assert!(index < self.nodes.len(), "parent node is not in this graph");
        }
        self.nodes.push(SceneNode {
            body,
            parent,
            visual,
            world: Transform::IDENTITY,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recomputes every node's world transform for simulation time `time`,
    /// parent before descendants. The root composes against the identity.
    pub fn update_all(&mut self, time: f64) {
        for index in 0..self.nodes.len() {
            let local = self.nodes[index].body.local_transform(time);
            let world = match self.nodes[index].parent {
                Some(NodeId(parent)) => self.nodes[parent].world.mul_transform(local),
                None => local,
            };
            self.nodes[index].world = world;
        }
    }

    /// World transform of `id` as of the last [`Self::update_all`] pass.
    /// Rigid: the body's visual radius is not part of the hierarchy.
    pub fn world_transform(&self, id: NodeId) -> Transform {
        self.nodes[id.0].world
    }

    /// Flat (render transform, visual) list in traversal order. The render
    /// transform carries the body's visual radius as scale.
    pub fn drawables(&self) -> impl Iterator<Item = (Transform, Entity)> + '_ {
        self.nodes.iter().map(|node| {
            (
                node.world.with_scale(Vec3::splat(node.body.radius)),
                node.visual,
            )
        })
    }
}

fn update_scene(
    clock: Res<SimClock>,
    mut graph: ResMut<SceneGraph>,
    mut bodies: Query<&mut Transform>,
) {
    graph.update_all(clock.elapsed());
    for (transform, visual) in graph.drawables() {
        if let Ok(mut target) = bodies.get_mut(visual) {
            *target = transform;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    fn body(orbit_radius: f32, orbit_speed: f32, rotation_speed: f32) -> OrbitalBody {
        OrbitalBody {
            radius: 1.0,
            orbit_radius,
            orbit_speed,
            rotation_speed,
        }
    }

    fn visual(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    fn sun_earth_moon() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut graph = SceneGraph::default();
        let sun = graph.insert(None, body(0.0, 0.0, 0.2), visual(0));
        let earth = graph.insert(Some(sun), body(6.0, 0.4, 1.0), visual(1));
        let moon = graph.insert(Some(earth), body(1.0, 2.0, 0.5), visual(2));
        (graph, sun, earth, moon)
    }

    #[test]
    fn world_transforms_compose_parent_times_local() {
        let (mut graph, sun, earth, moon) = sun_earth_moon();
        for time in [0.0, 0.5, 1.0, 7.25, 100.0] {
            graph.update_all(time);
            let earth_expected = graph
                .world_transform(sun)
                .mul_transform(body(6.0, 0.4, 1.0).local_transform(time));
            assert_eq!(graph.world_transform(earth), earth_expected);
            let moon_expected = graph
                .world_transform(earth)
                .mul_transform(body(1.0, 2.0, 0.5).local_transform(time));
            assert_eq!(graph.world_transform(moon), moon_expected);
        }
    }

    #[test]
    fn satellites_travel_with_their_parent() {
        let (mut graph, _, earth, moon) = sun_earth_moon();
        for time in [0.25, 3.0, 42.0] {
            graph.update_all(time);
            let earth_position = graph.world_transform(earth).translation;
            let moon_position = graph.world_transform(moon).translation;
            assert_abs_diff_eq!(moon_position.distance(earth_position), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn root_with_zero_orbit_radius_stays_at_the_origin() {
        let (mut graph, sun, ..) = sun_earth_moon();
        for time in [0.0, 11.0, 500.0] {
            graph.update_all(time);
            assert_eq!(graph.world_transform(sun).translation, Vec3::ZERO);
        }
    }

    #[test]
    fn half_orbit_crosses_to_the_far_side() {
        let mut graph = SceneGraph::default();
        let node = graph.insert(None, body(10.0, PI, 0.0), visual(0));
        graph.update_all(1.0);
        let position = graph.world_transform(node).translation;
        assert_abs_diff_eq!(position.x, -10.0, epsilon = 1e-3);
        assert_abs_diff_eq!(position.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn traversal_order_is_stable_insertion_order() {
        let (mut graph, ..) = sun_earth_moon();
        graph.update_all(2.0);
        let first: Vec<Entity> = graph.drawables().map(|(_, entity)| entity).collect();
        assert_eq!(first, vec![visual(0), visual(1), visual(2)]);
        graph.update_all(4.0);
        let second: Vec<Entity> = graph.drawables().map(|(_, entity)| entity).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn drawables_carry_the_visual_radius_as_scale() {
        let mut graph = SceneGraph::default();
        graph.insert(
            None,
            OrbitalBody {
                radius: 1.5,
                orbit_radius: 0.0,
                orbit_speed: 0.0,
                rotation_speed: 0.0,
            },
            visual(0),
        );
        graph.update_all(1.0);
        let (transform, _) = graph.drawables().next().unwrap();
        assert_eq!(transform.scale, Vec3::splat(1.5));
    }

    #[test]
    #[should_panic(expected = "parent node is not in this graph")]
    fn foreign_parent_handles_are_rejected() {
        let (_, _, earth, _) = sun_earth_moon();
        let mut other = SceneGraph::default();
        other.insert(Some(earth), body(1.0, 1.0, 0.0), visual(9));
    }
}
