use crate::runtime::Hierarchy;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

fn assert_vec3_approx(actual: Vec3, expected: Vec3) {
    let diff = (actual - expected).length();
    assert!(
        diff <= 1.0e-5,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn world_position_accumulates_parent_translations() {
    let mut hierarchy = Hierarchy::new(true);
    let root = hierarchy.add_node("root", None, Vec3::new(1.0, 2.0, 3.0));
    let child = hierarchy.add_node("child", Some(root), Vec3::new(0.0, 1.0, 0.0));
    let grandchild = hierarchy.add_node("grandchild", Some(child), Vec3::new(0.5, 0.0, 0.0));

    assert_vec3_approx(hierarchy.world_position(root), Vec3::new(1.0, 2.0, 3.0));
    assert_vec3_approx(hierarchy.world_position(child), Vec3::new(1.0, 3.0, 3.0));
    assert_vec3_approx(
        hierarchy.world_position(grandchild),
        Vec3::new(1.5, 3.0, 3.0),
    );
}

#[test]
fn parent_rotation_moves_child_world_position() {
    let mut hierarchy = Hierarchy::new(true);
    let root = hierarchy.add_node("root", None, Vec3::ZERO);
    let child = hierarchy.add_node("child", Some(root), Vec3::new(1.0, 0.0, 0.0));

    hierarchy.set_local_rotation(root, Quat::from_rotation_z(FRAC_PI_2));
    assert_vec3_approx(hierarchy.world_position(child), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn world_rotation_composes_down_the_chain() {
    let mut hierarchy = Hierarchy::new(true);
    let root = hierarchy.add_node("root", None, Vec3::ZERO);
    let child = hierarchy.add_node("child", Some(root), Vec3::ZERO);

    hierarchy.set_local_rotation(root, Quat::from_rotation_z(FRAC_PI_2));
    hierarchy.set_local_rotation(child, Quat::from_rotation_z(FRAC_PI_2));

    let expected = Quat::from_rotation_z(FRAC_PI_2 * 2.0);
    assert!(hierarchy.world_rotation(child).angle_between(expected) <= 1.0e-5);
    assert!(
        hierarchy
            .parent_world_rotation(child)
            .angle_between(Quat::from_rotation_z(FRAC_PI_2))
            <= 1.0e-5
    );
    assert!(hierarchy.parent_world_rotation(root).angle_between(Quat::IDENTITY) <= 1.0e-5);
}

#[test]
fn scaled_parent_scales_child_world_position() {
    let mut hierarchy = Hierarchy::new(true);
    let root = hierarchy.add_node("root", None, Vec3::ZERO);
    let child = hierarchy.add_node("child", Some(root), Vec3::new(0.0, 1.0, 0.0));

    hierarchy.node_mut(root).scale = Vec3::splat(2.0);
    assert_vec3_approx(hierarchy.world_position(child), Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn children_keep_insertion_order() {
    let mut hierarchy = Hierarchy::new(true);
    let root = hierarchy.add_node("root", None, Vec3::ZERO);
    let a = hierarchy.add_node("a", Some(root), Vec3::X);
    let b = hierarchy.add_node("b", Some(root), Vec3::Y);

    assert_eq!(hierarchy.children(root), &[a, b]);
    assert_eq!(hierarchy.first_child(root), Some(a));
    assert_eq!(hierarchy.first_child(b), None);
}

#[test]
fn handedness_flag_is_reported() {
    assert!(Hierarchy::new(true).is_right_handed());
    assert!(!Hierarchy::new(false).is_right_handed());
}
