use rapier2d::prelude::*;

/// Layer a collider lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    Player = 1 << 1,
    /// Floors, walls and ledges: everything the probes look for
    Ground = 1 << 2,
    /// Background props; solid to nothing and invisible to probes
    Decoration = 1 << 3,
}

impl CollisionGroups {
    const fn bit(self) -> u32 {
        self as u32
    }

    /// Layers this one generates contacts with
    const fn contacts(self) -> u32 {
        match self {
            CollisionGroups::Player => CollisionGroups::Ground.bit(),
            CollisionGroups::Ground => CollisionGroups::Player.bit(),
            CollisionGroups::Decoration => 0,
        }
    }

    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.bit()),
            Group::from_bits_truncate(self.contacts()),
        )
    }
}

/// Set of layers a geometry query is allowed to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const GROUND: LayerMask = LayerMask(CollisionGroups::Ground.bit());

    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub const NONE: LayerMask = LayerMask(0);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, group: CollisionGroups) -> bool {
        self.0 & group.bit() != 0
    }

    pub const fn with(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }

    /// Query groups that accept exactly the masked layers
    pub fn to_query_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(self.0))
    }
}

impl From<CollisionGroups> for LayerMask {
    fn from(group: CollisionGroups) -> Self {
        Self(group.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_only_touches_ground() {
        let player = CollisionGroups::Player.to_interaction_groups();
        assert!(player.test(CollisionGroups::Ground.to_interaction_groups()));
        assert!(!player.test(player));
        assert!(!player.test(CollisionGroups::Decoration.to_interaction_groups()));
    }

    #[test]
    fn test_ground_mask_hits_ground_only() {
        let query = LayerMask::GROUND.to_query_groups();
        assert!(query.test(CollisionGroups::Ground.to_interaction_groups()));
        assert!(!query.test(CollisionGroups::Player.to_interaction_groups()));
        assert!(!query.test(CollisionGroups::Decoration.to_interaction_groups()));
    }

    #[test]
    fn test_layer_mask_union() {
        let mask = LayerMask::GROUND.with(CollisionGroups::Decoration.into());
        assert!(mask.contains(CollisionGroups::Ground));
        assert!(mask.contains(CollisionGroups::Decoration));
        assert!(!mask.contains(CollisionGroups::Player));
        assert!(!LayerMask::NONE.contains(CollisionGroups::Ground));
        assert!(LayerMask::ALL.contains(CollisionGroups::Player));
    }
}
