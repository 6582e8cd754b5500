use crate::runtime::{ColliderGroup, Hierarchy};
use glam::Vec3;

fn assert_vec3_approx(actual: Vec3, expected: Vec3) {
    let diff = (actual - expected).length();
    assert!(
        diff <= 1.0e-5,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn world_centers_follow_the_owning_bone() {
    let mut hierarchy = Hierarchy::new(true);
    let bone = hierarchy.add_node("head", None, Vec3::new(0.0, 1.5, 0.0));

    let mut group = ColliderGroup::new(bone);
    group.add(Vec3::new(0.0, 0.1, 0.0), 0.12);

    let (center, radius) = group.world_colliders(&hierarchy).next().unwrap();
    assert_vec3_approx(center, Vec3::new(0.0, 1.6, 0.0));
    assert_eq!(radius, 0.12);

    // The bone moves; the next query reflects it without any invalidation.
    hierarchy.node_mut(bone).position = Vec3::new(0.5, 1.5, -0.2);
    let (center, _) = group.world_colliders(&hierarchy).next().unwrap();
    assert_vec3_approx(center, Vec3::new(0.5, 1.6, -0.2));
}

#[test]
fn colliders_keep_declaration_order() {
    let mut hierarchy = Hierarchy::new(true);
    let bone = hierarchy.add_node("chest", None, Vec3::ZERO);

    let mut group = ColliderGroup::new(bone);
    group.add(Vec3::X, 0.1);
    group.add(Vec3::Y, 0.2);
    group.add(Vec3::Z, 0.3);

    let radii: Vec<f32> = group
        .world_colliders(&hierarchy)
        .map(|(_, radius)| radius)
        .collect();
    assert_eq!(radii, vec![0.1, 0.2, 0.3]);
    assert_eq!(group.colliders().len(), 3);
    assert_eq!(group.node(), bone);
}
