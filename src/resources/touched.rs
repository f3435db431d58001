use bevy_ecs::prelude::*;
use smallvec::SmallVec;

/// Entities the player touched during the current tick.
///
/// Filled by the horizontal probes and the vertical resolution, drained by
/// effect dispatch.
#[derive(Resource, Debug, Default, Clone)]
pub struct TouchedEntities {
    pub left: Option<Entity>,
    pub right: Option<Entity>,
    pub vertical: SmallVec<[Entity; 4]>,
}

impl TouchedEntities {
    /// Touched entities in dispatch order (left, right, vertical), each once.
    pub fn unique(&self) -> SmallVec<[Entity; 6]> {
        let mut out: SmallVec<[Entity; 6]> = SmallVec::new();
        let all = self
            .left
            .iter()
            .chain(self.right.iter())
            .chain(self.vertical.iter());
        for entity in all {
            if !out.contains(entity) {
                out.push(*entity);
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
        self.vertical.clear();
    }
}
