use super::{Hierarchy, NodeId};
use glam::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct Collider {
    /// Local offset relative to the owning bone.
    pub offset: Vec3,
    pub radius: f32,
}

/// A set of collision spheres attached to one reference bone, referenced by
/// spring chains to keep them out of other body parts.
///
/// World-space centers are recomputed on every query; the owning bone moves
/// between frames, so nothing is cached.
#[derive(Clone, Debug)]
pub struct ColliderGroup {
    node: NodeId,
    colliders: Vec<Collider>,
}

impl ColliderGroup {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            colliders: Vec::new(),
        }
    }

    /// Appends a collider. Called only while the controller builds the group
    /// from the normalized description; no mutation afterwards.
    pub fn add(&mut self, offset: Vec3, radius: f32) {
        self.colliders.push(Collider { offset, radius });
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Current world-space sphere centers and radii, in declaration order.
    pub fn world_colliders<'a>(
        &'a self,
        hierarchy: &'a Hierarchy,
    ) -> impl Iterator<Item = (Vec3, f32)> + 'a {
        let matrix = hierarchy.world_matrix(self.node);
        self.colliders
            .iter()
            .map(move |collider| (matrix.transform_point3(collider.offset), collider.radius))
    }
}
