use glam::{Mat4, Quat, Vec3};

/// Index of a node inside a [`Hierarchy`].
///
/// The runtime never holds owning pointers into the scene graph; all bone
/// references are ids resolved against the hierarchy owned by the hosting
/// scene.
pub type NodeId = usize;

/// A movable transform node: parent link plus local TRS.
#[derive(Clone, Debug)]
pub struct TransformNode {
    pub name: String,
    parent: Option<NodeId>,

    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl TransformNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// The transform-node registry for one avatar: the scene-graph collaborator
/// the spring runtime reads world transforms from and writes local rotations
/// into.
///
/// World transforms are recomputed on every query, never cached across
/// frames.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    nodes: Vec<TransformNode>,
    children: Vec<Vec<NodeId>>,
    right_handed: bool,
}

impl Hierarchy {
    /// `right_handed` is the handedness convention of the hosting scene. VRM
    /// source data is right-handed Y-up Z-back; a left-handed scene makes the
    /// controller flip gravity directions at construction.
    pub fn new(right_handed: bool) -> Self {
        Self {
            nodes: Vec::new(),
            children: Vec::new(),
            right_handed,
        }
    }

    pub fn is_right_handed(&self) -> bool {
        self.right_handed
    }

    /// Appends a node with an identity rotation and unit scale. Parents must
    /// be added before their children.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        position: Vec3,
    ) -> NodeId {
        debug_assert!(parent.is_none_or(|p| p < self.nodes.len()));
        let id = self.nodes.len();
        self.nodes.push(TransformNode {
            name: name.into(),
            parent,
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        });
        self.children.push(Vec::new());
        if let Some(parent) = parent {
            self.children[parent].push(id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TransformNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut TransformNode {
        &mut self.nodes[id]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id]
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children[id].first().copied()
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = self.nodes[id].local_matrix();
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            matrix = self.nodes[parent].local_matrix() * matrix;
            current = self.nodes[parent].parent;
        }
        matrix
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut position = self.nodes[id].position;
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            position = self.nodes[parent].local_matrix().transform_point3(position);
            current = self.nodes[parent].parent;
        }
        position
    }

    /// Accumulated rotation from the root down to `id`, ignoring scale and
    /// shear (rotations compose independently of them).
    pub fn world_rotation(&self, id: NodeId) -> Quat {
        let mut rotation = self.nodes[id].rotation;
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            rotation = self.nodes[parent].rotation * rotation;
            current = self.nodes[parent].parent;
        }
        rotation
    }

    pub fn parent_world_rotation(&self, id: NodeId) -> Quat {
        match self.nodes[id].parent {
            Some(parent) => self.world_rotation(parent),
            None => Quat::IDENTITY,
        }
    }

    pub fn set_local_rotation(&mut self, id: NodeId, rotation: Quat) {
        self.nodes[id].rotation = rotation;
    }
}
