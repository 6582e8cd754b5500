use crate::{
    BoneGroupDesc, ColliderDesc, ColliderGroupDesc, ColliderShape, DEFAULT_DRAG_FORCE,
    DEFAULT_GRAVITY_DIR, DEFAULT_GRAVITY_POWER, DEFAULT_HIT_RADIUS, DEFAULT_STIFFNESS,
    SecondaryAnimation, SpringBoneSchema, SpringSchema,
};

/// Converts either source schema version into the normalized description
/// consumed by the runtime controller. Pure data transform, runs once at load
/// time.
///
/// Legacy input passes through unchanged; normalizing an already-normalized
/// description is the identity.
pub fn normalize(schema: SpringSchema) -> SecondaryAnimation {
    match schema {
        SpringSchema::Legacy(description) => description,
        SpringSchema::Current(spring_bone) => normalize_current(&spring_bone),
    }
}

fn normalize_current(spring_bone: &SpringBoneSchema) -> SecondaryAnimation {
    let mut out = SecondaryAnimation::default();

    // Every VRM 1.0 collider becomes its own single-collider legacy group, so
    // flattened collider indices below double as group indices. A collider
    // with no supported shape keeps its slot as an empty group.
    for collider in &spring_bone.colliders {
        let mut group = ColliderGroupDesc {
            node: collider.node,
            colliders: Vec::new(),
        };
        if let Some(shape) = collider.shape {
            let (offset, radius) = match shape {
                ColliderShape::Sphere { offset, radius } => (offset, radius),
                ColliderShape::Capsule { offset, radius, .. } => (offset, radius),
            };
            group.colliders.push(ColliderDesc { offset, radius });
        }
        out.collider_groups.push(group);
    }

    for spring in &spring_bone.springs {
        let mut group = BoneGroupDesc {
            comment: spring.name.clone(),
            stiffness: DEFAULT_STIFFNESS,
            gravity_power: DEFAULT_GRAVITY_POWER,
            gravity_dir: DEFAULT_GRAVITY_DIR,
            drag_force: DEFAULT_DRAG_FORCE,
            center: spring.center,
            hit_radius: DEFAULT_HIT_RADIUS,
            bones: Vec::new(),
            collider_groups: Vec::new(),
        };

        // Joints are applied in order onto the defaults; a later joint's
        // finite values win. The legacy schema has per-group parameters only.
        for joint in &spring.joints {
            apply_finite(&mut group.stiffness, joint.stiffness);
            apply_finite(&mut group.gravity_power, joint.gravity_power);
            apply_finite(&mut group.drag_force, joint.drag_force);
            apply_finite(&mut group.hit_radius, joint.hit_radius);
            if let Some(dir) = joint.gravity_dir {
                if dir.is_finite() {
                    group.gravity_dir = dir;
                }
            }
            // The legacy schema declares exactly one root per chain; the
            // chain body is walked down the hierarchy at construction.
            if group.bones.is_empty() {
                group.bones.push(joint.node);
            }
        }

        // Two-level group references flatten to the duplicate-free union of
        // underlying collider indices, in first-seen order.
        for &group_index in &spring.collider_groups {
            let Some(collider_group) = spring_bone.collider_groups.get(group_index) else {
                continue;
            };
            for &collider_index in &collider_group.colliders {
                if !group.collider_groups.contains(&collider_index) {
                    group.collider_groups.push(collider_index);
                }
            }
        }

        out.bone_groups.push(group);
    }

    out
}

fn apply_finite(target: &mut f32, value: Option<f32>) {
    match value {
        Some(value) if value.is_finite() => *target = value,
        _ => {}
    }
}
