use crate::runtime::{Hierarchy, SpringBoneController};
use crate::{Avatar, AvatarRegistry, BoneGroupDesc, SecondaryAnimation};
use glam::Vec3;

fn avatar() -> Avatar {
    let mut hierarchy = Hierarchy::new(true);
    let root = hierarchy.add_node("root", None, Vec3::ZERO);
    let mid = hierarchy.add_node("mid", Some(root), Vec3::new(0.05, 1.0, 0.0));
    hierarchy.add_node("tip", Some(mid), Vec3::new(0.05, 1.0, 0.0));

    let description = SecondaryAnimation {
        bone_groups: vec![BoneGroupDesc {
            comment: String::new(),
            stiffness: 1.0,
            gravity_power: 1.0,
            gravity_dir: Vec3::new(0.0, -1.0, 0.0),
            drag_force: 0.4,
            center: None,
            hit_radius: 0.0,
            bones: vec![0],
            collider_groups: Vec::new(),
        }],
        collider_groups: Vec::new(),
    };
    let spring_bones =
        SpringBoneController::construct(&description, &hierarchy, |index| Some(index as usize));

    Avatar {
        hierarchy,
        spring_bones,
    }
}

#[test]
fn add_get_remove_roundtrip() {
    let mut registry = AvatarRegistry::new();
    assert!(registry.is_empty());

    let first = registry.add(avatar());
    let second = registry.add(avatar());
    assert_ne!(first, second);
    assert_eq!(registry.len(), 2);
    assert!(registry.get(first).is_some());

    assert!(registry.remove(first));
    assert!(!registry.remove(first));
    assert_eq!(registry.len(), 1);
    assert!(registry.get(first).is_none());
    assert!(registry.get_mut(second).is_some());
}

#[test]
fn update_all_drives_every_avatar() {
    let mut registry = AvatarRegistry::new();
    let a = registry.add(avatar());
    let b = registry.add(avatar());

    for _ in 0..60 {
        registry.update_all(16.0);
    }

    for id in [a, b] {
        let avatar = registry.get(id).unwrap();
        let chain = &avatar.spring_bones.chains()[0];
        let tip_rest = Vec3::new(0.1, 2.0, 0.0);
        let tip = chain.tail_position(1, &avatar.hierarchy);
        assert!(
            tip.distance(tip_rest) > 0.1,
            "avatar {id:?} never left its rest pose: {tip}"
        );
        assert!(tip.y < tip_rest.y);
    }
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut registry = AvatarRegistry::new();
    let first = registry.add(avatar());
    registry.remove(first);
    let second = registry.add(avatar());
    assert_ne!(first, second);

    let ids: Vec<_> = registry.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![second]);
}
