use super::{ColliderGroup, Hierarchy, NodeId};
use glam::{Mat4, Quat, Vec3};

/// Below this length a segment is degenerate and its normalization step is
/// skipped in favor of the rest direction.
const LENGTH_EPSILON: f32 = 1.0e-7;

/// Simulation state for one bone segment (joint i -> joint i+1). A chain of N
/// joints carries N-1 segments; the last joint is only ever a tail.
#[derive(Clone, Debug)]
struct Segment {
    node: NodeId,
    /// Rest-pose tail direction in the bone's local space, unit length.
    bone_axis: Vec3,
    /// World-space rest distance to the tail. Fixed for the life of the
    /// chain; integration changes rotation only, never length.
    rest_length: f32,
    /// Local rotation at construction; the accumulated rotation the stiffness
    /// term pulls the tail back toward.
    initial_local_rotation: Quat,
    /// Center-space when the chain has a center node, world-space otherwise.
    prev_tail: Vec3,
    current_tail: Vec3,
}

/// One root-to-leaf sequence of bones simulated as a damped spring with
/// gravity, for hair/cloth-like secondary motion.
#[derive(Clone, Debug)]
pub struct SpringChain {
    /// Free text from the source asset, never used for logic.
    pub comment: String,
    pub stiffness: f32,
    pub gravity_power: f32,
    /// Unit vector, already converted to the scene's handedness.
    pub gravity_dir: Vec3,
    /// 0..=1; closer to 1 means stronger damping of carried-over momentum.
    pub drag_force: f32,
    /// Collision radius of the chain's own bones.
    pub hit_radius: f32,
    center: Option<NodeId>,
    joints: Vec<NodeId>,
    segments: Vec<Segment>,
    /// Indices into the controller's collider-group list, resolved at
    /// construction.
    collider_groups: Vec<usize>,
}

impl SpringChain {
    /// Captures the rest pose of `joints` (root first) from the hierarchy's
    /// current transforms. A chain with fewer than two joints has no segments
    /// and performs no work.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        comment: String,
        stiffness: f32,
        gravity_power: f32,
        gravity_dir: Vec3,
        drag_force: f32,
        center: Option<NodeId>,
        hit_radius: f32,
        joints: Vec<NodeId>,
        collider_groups: Vec<usize>,
        hierarchy: &Hierarchy,
    ) -> Self {
        let to_center = match center {
            Some(center) => hierarchy.world_matrix(center).inverse(),
            None => Mat4::IDENTITY,
        };

        let mut segments = Vec::with_capacity(joints.len().saturating_sub(1));
        for pair in joints.windows(2) {
            let (node, child) = (pair[0], pair[1]);
            let node_world = hierarchy.world_position(node);
            let child_world = hierarchy.world_position(child);
            let tail = to_center.transform_point3(child_world);
            segments.push(Segment {
                node,
                bone_axis: hierarchy.node(child).position.normalize_or_zero(),
                rest_length: child_world.distance(node_world),
                initial_local_rotation: hierarchy.node(node).rotation,
                prev_tail: tail,
                current_tail: tail,
            });
        }

        Self {
            comment,
            stiffness,
            gravity_power,
            gravity_dir,
            drag_force,
            hit_radius,
            center,
            joints,
            segments,
            collider_groups,
        }
    }

    pub fn joints(&self) -> &[NodeId] {
        &self.joints
    }

    pub fn center(&self) -> Option<NodeId> {
        self.center
    }

    /// Resolved indices into the owning controller's collider-group list.
    pub fn collider_groups(&self) -> &[usize] {
        &self.collider_groups
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn rest_length(&self, segment: usize) -> f32 {
        self.segments[segment].rest_length
    }

    /// Current world-space tail position of a segment.
    pub fn tail_position(&self, segment: usize, hierarchy: &Hierarchy) -> Vec3 {
        let tail = self.segments[segment].current_tail;
        match self.center {
            Some(center) => hierarchy.world_matrix(center).transform_point3(tail),
            None => tail,
        }
    }

    /// Integrates every segment for `delta` seconds (already clamped by the
    /// controller) and writes the resulting local rotations into the
    /// hierarchy.
    ///
    /// Root-to-leaf order is mandatory: each segment reads the parent
    /// segment's just-updated world transform.
    pub fn update(&mut self, delta: f32, hierarchy: &mut Hierarchy, groups: &[ColliderGroup]) {
        if self.segments.is_empty() {
            return;
        }

        let external = self.gravity_dir * (self.gravity_power * delta);
        let (to_world, to_center) = match self.center {
            Some(center) => {
                let matrix = hierarchy.world_matrix(center);
                (matrix, matrix.inverse())
            }
            None => (Mat4::IDENTITY, Mat4::IDENTITY),
        };

        for index in 0..self.segments.len() {
            let (node, bone_axis, rest_length, initial_local_rotation) = {
                let segment = &self.segments[index];
                (
                    segment.node,
                    segment.bone_axis,
                    segment.rest_length,
                    segment.initial_local_rotation,
                )
            };
            if rest_length <= LENGTH_EPSILON {
                // Degenerate segment: nothing to swing.
                continue;
            }

            let world_position = hierarchy.world_position(node);
            let parent_rotation = hierarchy.parent_world_rotation(node);
            let rotation = parent_rotation * initial_local_rotation;
            let rest_dir = rotation * bone_axis;

            let current_tail = to_world.transform_point3(self.segments[index].current_tail);
            let prev_tail = to_world.transform_point3(self.segments[index].prev_tail);

            // Verlet-style step: damped inertia, stiffness pull toward the
            // rest orientation, constant external force.
            let mut next = current_tail
                + (current_tail - prev_tail) * (1.0 - self.drag_force)
                + rest_dir * (self.stiffness * delta)
                + external;

            // A spring bone never stretches or compresses, only swings.
            next = constrain_length(world_position, next, rest_dir, rest_length);

            // Sequential resolution in declaration order, re-normalizing after
            // every correction. Order dependence under overlapping colliders
            // is specified behavior.
            for &group_index in &self.collider_groups {
                let Some(group) = groups.get(group_index) else {
                    continue;
                };
                for (center, radius) in group.world_colliders(hierarchy) {
                    let combined = radius + self.hit_radius;
                    let offset = next - center;
                    let distance_sq = offset.length_squared();
                    if distance_sq < combined * combined {
                        let normal = if distance_sq > LENGTH_EPSILON {
                            offset / distance_sq.sqrt()
                        } else {
                            (world_position - center).normalize_or(Vec3::Y)
                        };
                        next = center + normal * combined;
                        next = constrain_length(world_position, next, rest_dir, rest_length);
                    }
                }
            }

            let segment = &mut self.segments[index];
            segment.prev_tail = to_center.transform_point3(current_tail);
            segment.current_tail = to_center.transform_point3(next);

            // The rotation taking the rest direction to the corrected tail
            // direction, expressed in the parent's local space.
            let next_dir = (next - world_position).normalize_or(rest_dir);
            let world_rotation = Quat::from_rotation_arc(rest_dir, next_dir) * rotation;
            let local_rotation = parent_rotation.inverse() * world_rotation;
            hierarchy.set_local_rotation(node, local_rotation.normalize());
        }
    }
}

fn constrain_length(origin: Vec3, tail: Vec3, rest_dir: Vec3, rest_length: f32) -> Vec3 {
    let offset = tail - origin;
    let length = offset.length();
    if length <= LENGTH_EPSILON {
        // Degenerate: keep the rest direction instead of dividing by zero.
        origin + rest_dir * rest_length
    } else {
        origin + offset * (rest_length / length)
    }
}
