use crate::runtime::{Hierarchy, SpringBoneController};

/// Handle for one avatar held by an [`AvatarRegistry`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AvatarId(u32);

/// One loaded avatar: its transform hierarchy plus the spring-bone controller
/// built against it.
#[derive(Clone, Debug)]
pub struct Avatar {
    pub hierarchy: Hierarchy,
    pub spring_bones: SpringBoneController,
}

/// Explicit registry of active avatars, owned by whatever orchestrates the
/// scene's lifecycle. Replaces ambient scene-level shared state: enumeration
/// requires being handed the registry, and membership changes only through
/// [`add`](AvatarRegistry::add) and [`remove`](AvatarRegistry::remove).
#[derive(Debug, Default)]
pub struct AvatarRegistry {
    next_id: u32,
    avatars: Vec<(AvatarId, Avatar)>,
}

impl AvatarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, avatar: Avatar) -> AvatarId {
        let id = AvatarId(self.next_id);
        self.next_id += 1;
        self.avatars.push((id, avatar));
        id
    }

    /// Disposes the avatar's controller and forgets the entry. Returns false
    /// when the id is not (or no longer) registered.
    pub fn remove(&mut self, id: AvatarId) -> bool {
        match self.avatars.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                let (_, mut avatar) = self.avatars.remove(index);
                avatar.spring_bones.dispose();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: AvatarId) -> Option<&Avatar> {
        self.avatars
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, avatar)| avatar)
    }

    pub fn get_mut(&mut self, id: AvatarId) -> Option<&mut Avatar> {
        self.avatars
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, avatar)| avatar)
    }

    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AvatarId, &Avatar)> {
        self.avatars.iter().map(|(id, avatar)| (*id, avatar))
    }

    /// Drives every avatar's controller against its own hierarchy. Called
    /// once per rendered frame from the host's render loop.
    pub fn update_all(&mut self, delta_ms: f32) {
        for (_, avatar) in &mut self.avatars {
            avatar.spring_bones.update(delta_ms, &mut avatar.hierarchy);
        }
    }
}
