use super::{ColliderGroup, Hierarchy, NodeId, SpringChain};
use crate::{DEFAULT_GRAVITY_DIR, GltfNodeIndex, SecondaryAnimation};
use glam::Vec3;

/// Owns every collider group and spring chain for one avatar instance and
/// fans the per-frame update out to all of them.
///
/// Lifecycle is bound to the avatar: construct at load time, [`update`] once
/// per rendered frame, [`dispose`] when the avatar unloads.
///
/// [`update`]: SpringBoneController::update
/// [`dispose`]: SpringBoneController::dispose
#[derive(Clone, Debug, Default)]
pub struct SpringBoneController {
    collider_groups: Vec<ColliderGroup>,
    chains: Vec<SpringChain>,
}

impl SpringBoneController {
    /// Elapsed time per update is clamped to this many milliseconds so a
    /// pause or breakpoint cannot produce an explosive spring step.
    pub const MAX_DELTA_MS: f32 = 16.666;

    /// Builds collider groups first (chains reference them by index), then
    /// one chain per declared root bone.
    ///
    /// `lookup` resolves a glTF node index from the description to a node in
    /// `hierarchy`. Unresolvable references never fail construction: the
    /// owning collider group or chain is dropped from the simulation set, and
    /// a controller with zero resolvable chains is a correct no-op.
    pub fn construct<F>(
        description: &SecondaryAnimation,
        hierarchy: &Hierarchy,
        mut lookup: F,
    ) -> Self
    where
        F: FnMut(GltfNodeIndex) -> Option<NodeId>,
    {
        let mut collider_groups: Vec<ColliderGroup> = Vec::new();
        // Dropped groups leave holes, so chain references are remapped
        // through this table instead of using description indices directly.
        let mut group_index_map: Vec<Option<usize>> = vec![None; description.collider_groups.len()];
        for (desc_index, desc) in description.collider_groups.iter().enumerate() {
            let Some(node) = lookup(desc.node) else {
                continue;
            };
            let mut group = ColliderGroup::new(node);
            for collider in &desc.colliders {
                group.add(collider.offset, collider.radius);
            }
            group_index_map[desc_index] = Some(collider_groups.len());
            collider_groups.push(group);
        }

        let mut chains: Vec<SpringChain> = Vec::new();
        for bone_group in &description.bone_groups {
            let Some(group_refs) = remap_group_refs(&bone_group.collider_groups, &group_index_map)
            else {
                continue;
            };

            let gravity_dir =
                convert_gravity_dir(bone_group.gravity_dir, hierarchy.is_right_handed());
            let center = bone_group.center.and_then(&mut lookup);

            for &root in &bone_group.bones {
                let Some(root_node) = lookup(root) else {
                    continue;
                };
                let joints = walk_chain(hierarchy, root_node);
                chains.push(SpringChain::new(
                    bone_group.comment.clone(),
                    bone_group.stiffness,
                    bone_group.gravity_power,
                    gravity_dir,
                    bone_group.drag_force,
                    center,
                    bone_group.hit_radius,
                    joints,
                    group_refs.clone(),
                    hierarchy,
                ));
            }
        }

        Self {
            collider_groups,
            chains,
        }
    }

    pub fn chains(&self) -> &[SpringChain] {
        &self.chains
    }

    pub fn chains_mut(&mut self) -> &mut [SpringChain] {
        &mut self.chains
    }

    pub fn collider_groups(&self) -> &[ColliderGroup] {
        &self.collider_groups
    }

    /// Advances every chain by `delta_ms` milliseconds, clamped to
    /// `[0, MAX_DELTA_MS]` and converted to seconds. Chains are mutually
    /// independent; all of them have finished when this returns.
    pub fn update(&mut self, delta_ms: f32, hierarchy: &mut Hierarchy) {
        let delta = delta_ms.clamp(0.0, Self::MAX_DELTA_MS) / 1000.0;
        for chain in &mut self.chains {
            chain.update(delta, hierarchy, &self.collider_groups);
        }
    }

    /// Releases all chains and collider groups. Idempotent; the node ids they
    /// held were weak references into the hierarchy, which stays untouched.
    pub fn dispose(&mut self) {
        self.chains.clear();
        self.collider_groups.clear();
    }
}

/// VRM gravity directions are right-handed Y-up Z-back; a left-handed scene
/// mirrors X and Z. Resolved once at construction, then normalized.
fn convert_gravity_dir(dir: Vec3, right_handed: bool) -> Vec3 {
    let dir = if right_handed {
        dir
    } else {
        Vec3::new(-dir.x, dir.y, -dir.z)
    };
    dir.normalize_or(DEFAULT_GRAVITY_DIR)
}

/// A chain whose collider-group reference does not resolve is dropped whole.
fn remap_group_refs(refs: &[usize], index_map: &[Option<usize>]) -> Option<Vec<usize>> {
    refs.iter()
        .map(|&index| index_map.get(index).copied().flatten())
        .collect()
}

/// The declared root is walked down the hierarchy to the leaf to form the
/// chain body, following the first child at every branch.
fn walk_chain(hierarchy: &Hierarchy, root: NodeId) -> Vec<NodeId> {
    let mut joints = vec![root];
    let mut current = root;
    while let Some(child) = hierarchy.first_child(current) {
        joints.push(child);
        current = child;
    }
    joints
}
