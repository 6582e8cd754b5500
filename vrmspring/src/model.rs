use glam::Vec3;

/// glTF node index, as referenced by the VRM extension blocks.
pub type GltfNodeIndex = u32;

/// Joint parameter defaults from the `VRMC_springBone-1.0` joint schema,
/// also substituted for non-finite values during normalization.
pub const DEFAULT_STIFFNESS: f32 = 1.0;
pub const DEFAULT_GRAVITY_POWER: f32 = 0.0;
pub const DEFAULT_GRAVITY_DIR: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const DEFAULT_DRAG_FORCE: f32 = 0.5;
pub const DEFAULT_HIT_RADIUS: f32 = 0.0;

/// Normalized secondary-animation description: the single internal shape both
/// source schema versions are converted into, and the only input the runtime
/// controller consumes.
///
/// Matches the VRM 0.x `secondaryAnimation` layout, which already has this
/// shape; VRM 1.0 `VRMC_springBone` data is converted by
/// [`normalize`](crate::normalize).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SecondaryAnimation {
    pub bone_groups: Vec<BoneGroupDesc>,
    pub collider_groups: Vec<ColliderGroupDesc>,
}

/// One configured spring chain: shared spring parameters plus the declared
/// root bones the chain bodies are walked down from.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneGroupDesc {
    /// Free text, never used for logic.
    pub comment: String,
    pub stiffness: f32,
    pub gravity_power: f32,
    pub gravity_dir: Vec3,
    pub drag_force: f32,
    /// Reference frame for relative bone motion; the simulation's world frame
    /// when absent.
    pub center: Option<GltfNodeIndex>,
    /// Collision radius of the moving spring bones themselves.
    pub hit_radius: f32,
    /// Declared chain roots. Each root spawns one chain walked down the node
    /// hierarchy.
    pub bones: Vec<GltfNodeIndex>,
    /// Indices into [`SecondaryAnimation::collider_groups`].
    pub collider_groups: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderDesc {
    /// Local offset relative to the owning bone.
    pub offset: Vec3,
    pub radius: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColliderGroupDesc {
    pub node: GltfNodeIndex,
    pub colliders: Vec<ColliderDesc>,
}

/// The two incompatible source schema versions, consumed by
/// [`normalize`](crate::normalize). One conversion boundary, no runtime
/// polymorphism.
#[derive(Clone, Debug)]
pub enum SpringSchema {
    /// VRM 0.x `extensions.VRM.secondaryAnimation` — already the normalized
    /// shape.
    Legacy(SecondaryAnimation),
    /// VRM 1.0 `extensions.VRMC_springBone`.
    Current(SpringBoneSchema),
}

/// `VRMC_springBone` extension block, after JSON parsing.
#[derive(Clone, Debug, Default)]
pub struct SpringBoneSchema {
    pub colliders: Vec<ColliderSchema>,
    pub collider_groups: Vec<ColliderGroupSchema>,
    pub springs: Vec<SpringDesc>,
}

#[derive(Clone, Debug)]
pub struct ColliderSchema {
    pub node: GltfNodeIndex,
    /// `None` when the shape object carried neither a sphere nor a capsule.
    /// The collider still occupies its index so group references stay valid.
    pub shape: Option<ColliderShape>,
}

#[derive(Clone, Copy, Debug)]
pub enum ColliderShape {
    Sphere {
        offset: Vec3,
        radius: f32,
    },
    /// The tail point is ignored by normalization; the capsule degrades to a
    /// sphere at `offset`. Documented limitation of the legacy collider model.
    Capsule {
        offset: Vec3,
        radius: f32,
        tail: Vec3,
    },
}

#[derive(Clone, Debug)]
pub struct ColliderGroupSchema {
    pub name: String,
    /// Indices into [`SpringBoneSchema::colliders`].
    pub colliders: Vec<usize>,
}

/// Per-joint parameters; absent values fall back to the spring's accumulated
/// values (ultimately the `DEFAULT_*` constants).
#[derive(Clone, Copy, Debug, Default)]
pub struct JointDesc {
    pub node: GltfNodeIndex,
    pub hit_radius: Option<f32>,
    pub stiffness: Option<f32>,
    pub gravity_power: Option<f32>,
    pub gravity_dir: Option<Vec3>,
    pub drag_force: Option<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct SpringDesc {
    pub name: String,
    pub joints: Vec<JointDesc>,
    /// Indices into [`SpringBoneSchema::collider_groups`].
    pub collider_groups: Vec<usize>,
    pub center: Option<GltfNodeIndex>,
}
