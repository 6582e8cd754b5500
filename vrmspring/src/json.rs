//! Parsing of the VRM spring-bone extension blocks out of a glTF document.
//!
//! The runtime itself only consumes the normalized description; this module
//! covers the load-time step of pulling either schema version out of the
//! glTF `extensions` object.

use crate::{
    BoneGroupDesc, ColliderDesc, ColliderGroupDesc, ColliderGroupSchema, ColliderSchema,
    ColliderShape, Error, GltfNodeIndex, JointDesc, SecondaryAnimation, SpringBoneSchema,
    SpringDesc, SpringSchema,
};
use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;

/// `extensions` key for VRM 0.x.
const VRM0_EXTENSION: &str = "VRM";
/// `extensions` key for the VRM 1.0 spring-bone extension.
const SPRING_BONE_EXTENSION: &str = "VRMC_springBone";

const SUPPORTED_SPEC_VERSION: &str = "1.0";

/// Extracts the spring-bone description from a parsed glTF root object.
///
/// VRM 0.x takes precedence when both extension blocks are present, matching
/// loader behavior for mixed assets. Returns `Ok(None)` when neither block
/// exists; the caller then skips secondary animation entirely.
pub fn parse_spring_schema(root: &Value) -> Result<Option<SpringSchema>, Error> {
    let extensions = match root.get("extensions") {
        Some(extensions) => extensions,
        None => return Ok(None),
    };

    if let Some(vrm0) = extensions.get(VRM0_EXTENSION) {
        let description = match vrm0.get("secondaryAnimation") {
            Some(value) => parse_value::<SecondaryAnimationDef>(value)?.into(),
            // A VRM 0.x asset without the block still animates; it just has
            // no springs.
            None => SecondaryAnimation::default(),
        };
        return Ok(Some(SpringSchema::Legacy(description)));
    }

    if let Some(spring_bone) = extensions.get(SPRING_BONE_EXTENSION) {
        let def = parse_value::<SpringBoneDef>(spring_bone)?;
        if def.spec_version != SUPPORTED_SPEC_VERSION {
            return Err(Error::JsonSpecVersion {
                value: def.spec_version,
            });
        }
        return Ok(Some(SpringSchema::Current(def.into())));
    }

    Ok(None)
}

/// Convenience wrapper over [`parse_spring_schema`] for raw glTF JSON text,
/// e.g. the JSON chunk of a `.vrm` container.
pub fn parse_spring_schema_str(json: &str) -> Result<Option<SpringSchema>, Error> {
    let root: Value = serde_json::from_str(json).map_err(|e| Error::JsonParse {
        message: e.to_string(),
    })?;
    parse_spring_schema(&root)
}

fn parse_value<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T, Error> {
    T::deserialize(value).map_err(|e| Error::JsonParse {
        message: e.to_string(),
    })
}

fn default_gravity_dir() -> Vec3Def {
    Vec3Def {
        x: 0.0,
        y: -1.0,
        z: 0.0,
    }
}

fn default_stiffness() -> f32 {
    1.0
}

fn default_drag_force() -> f32 {
    0.5
}

#[derive(Debug, Deserialize, Default, Clone, Copy)]
#[serde(default)]
struct Vec3Def {
    x: f32,
    y: f32,
    z: f32,
}

impl From<Vec3Def> for Vec3 {
    fn from(v: Vec3Def) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

// ---- VRM 0.x `secondaryAnimation` ----

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SecondaryAnimationDef {
    #[serde(rename = "boneGroups")]
    bone_groups: Vec<BoneGroupDef>,
    #[serde(rename = "colliderGroups")]
    collider_groups: Vec<ColliderGroupDef>,
}

#[derive(Debug, Deserialize)]
struct BoneGroupDef {
    #[serde(default)]
    comment: String,
    // "stiffiness" is the field name the VRM 0.x schema actually ships with.
    #[serde(default = "default_stiffness", rename = "stiffiness")]
    stiffness: f32,
    #[serde(default, rename = "gravityPower")]
    gravity_power: f32,
    #[serde(default = "default_gravity_dir", rename = "gravityDir")]
    gravity_dir: Vec3Def,
    #[serde(default = "default_drag_force", rename = "dragForce")]
    drag_force: f32,
    // Exporters write -1 for "no center node".
    #[serde(default)]
    center: Option<i64>,
    #[serde(default, rename = "hitRadius")]
    hit_radius: f32,
    #[serde(default)]
    bones: Vec<GltfNodeIndex>,
    #[serde(default, rename = "colliderGroups")]
    collider_groups: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct ColliderGroupDef {
    node: GltfNodeIndex,
    #[serde(default)]
    colliders: Vec<SphereColliderDef>,
}

#[derive(Debug, Deserialize)]
struct SphereColliderDef {
    #[serde(default)]
    offset: Vec3Def,
    #[serde(default)]
    radius: f32,
}

impl From<SecondaryAnimationDef> for SecondaryAnimation {
    fn from(def: SecondaryAnimationDef) -> Self {
        SecondaryAnimation {
            bone_groups: def
                .bone_groups
                .into_iter()
                .map(|group| BoneGroupDesc {
                    comment: group.comment,
                    stiffness: group.stiffness,
                    gravity_power: group.gravity_power,
                    gravity_dir: group.gravity_dir.into(),
                    drag_force: group.drag_force,
                    center: group
                        .center
                        .and_then(|center| GltfNodeIndex::try_from(center).ok()),
                    hit_radius: group.hit_radius,
                    bones: group.bones,
                    collider_groups: group.collider_groups,
                })
                .collect(),
            collider_groups: def
                .collider_groups
                .into_iter()
                .map(|group| ColliderGroupDesc {
                    node: group.node,
                    colliders: group
                        .colliders
                        .into_iter()
                        .map(|collider| ColliderDesc {
                            offset: collider.offset.into(),
                            radius: collider.radius,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ---- VRM 1.0 `VRMC_springBone` ----

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SpringBoneDef {
    #[serde(rename = "specVersion")]
    spec_version: String,
    colliders: Vec<ColliderDef>,
    #[serde(rename = "colliderGroups")]
    collider_groups: Vec<ColliderGroupDef1>,
    springs: Vec<SpringDef>,
}

#[derive(Debug, Deserialize)]
struct ColliderDef {
    node: GltfNodeIndex,
    #[serde(default)]
    shape: ShapeDef,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ShapeDef {
    sphere: Option<SphereShapeDef>,
    capsule: Option<CapsuleShapeDef>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SphereShapeDef {
    offset: [f32; 3],
    radius: f32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CapsuleShapeDef {
    offset: [f32; 3],
    radius: f32,
    tail: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct ColliderGroupDef1 {
    #[serde(default)]
    name: String,
    #[serde(default)]
    colliders: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct SpringDef {
    #[serde(default)]
    name: String,
    #[serde(default)]
    joints: Vec<JointDef>,
    #[serde(default, rename = "colliderGroups")]
    collider_groups: Vec<usize>,
    #[serde(default)]
    center: Option<GltfNodeIndex>,
}

#[derive(Debug, Deserialize)]
struct JointDef {
    node: GltfNodeIndex,
    #[serde(default, rename = "hitRadius")]
    hit_radius: Option<f32>,
    #[serde(default)]
    stiffness: Option<f32>,
    #[serde(default, rename = "gravityPower")]
    gravity_power: Option<f32>,
    #[serde(default, rename = "gravityDir")]
    gravity_dir: Option<[f32; 3]>,
    #[serde(default, rename = "dragForce")]
    drag_force: Option<f32>,
}

impl From<SpringBoneDef> for SpringBoneSchema {
    fn from(def: SpringBoneDef) -> Self {
        SpringBoneSchema {
            colliders: def
                .colliders
                .into_iter()
                .map(|collider| ColliderSchema {
                    node: collider.node,
                    shape: match (collider.shape.sphere, collider.shape.capsule) {
                        (Some(sphere), _) => Some(ColliderShape::Sphere {
                            offset: Vec3::from_array(sphere.offset),
                            radius: sphere.radius,
                        }),
                        (None, Some(capsule)) => Some(ColliderShape::Capsule {
                            offset: Vec3::from_array(capsule.offset),
                            radius: capsule.radius,
                            tail: Vec3::from_array(capsule.tail),
                        }),
                        (None, None) => None,
                    },
                })
                .collect(),
            collider_groups: def
                .collider_groups
                .into_iter()
                .map(|group| ColliderGroupSchema {
                    name: group.name,
                    colliders: group.colliders,
                })
                .collect(),
            springs: def
                .springs
                .into_iter()
                .map(|spring| SpringDesc {
                    name: spring.name,
                    joints: spring
                        .joints
                        .into_iter()
                        .map(|joint| JointDesc {
                            node: joint.node,
                            hit_radius: joint.hit_radius,
                            stiffness: joint.stiffness,
                            gravity_power: joint.gravity_power,
                            gravity_dir: joint.gravity_dir.map(Vec3::from_array),
                            drag_force: joint.drag_force,
                        })
                        .collect(),
                    collider_groups: spring.collider_groups,
                    center: spring.center,
                })
                .collect(),
        }
    }
}
