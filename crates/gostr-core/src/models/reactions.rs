//! The viewer's own likes and boosts on the current feed.

use std::collections::HashMap;

use nostr_sdk::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Boost,
}

/// Outcome of a like/boost command, applied to [`ReactionIndex`] in dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Liked { target: EventId, reaction: EventId },
    Unliked { reaction: EventId },
    Boosted { target: EventId, reaction: EventId },
    Unboosted { reaction: EventId },
}

/// Target event id to the id of the viewer's unretracted reaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionIndex {
    liked: HashMap<EventId, EventId>,
    boosted: HashMap<EventId, EventId>,
}

impl ReactionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: ReactionKind) -> &HashMap<EventId, EventId> {
        match kind {
            ReactionKind::Like => &self.liked,
            ReactionKind::Boost => &self.boosted,
        }
    }

    fn map_mut(&mut self, kind: ReactionKind) -> &mut HashMap<EventId, EventId> {
        match kind {
            ReactionKind::Like => &mut self.liked,
            ReactionKind::Boost => &mut self.boosted,
        }
    }

    /// Later records for the same target overwrite earlier ones.
    pub fn record(&mut self, kind: ReactionKind, target: EventId, reaction: EventId) {
        self.map_mut(kind).insert(target, reaction);
    }

    /// Remove the entry whose value is `reaction`. Returns the target it
    /// was attached to, or `None` when no entry matched.
    pub fn retract(&mut self, kind: ReactionKind, reaction: &EventId) -> Option<EventId> {
        let map = self.map_mut(kind);
        let target = map
            .iter()
            .find(|(_, id)| *id == reaction)
            .map(|(target, _)| *target)?;
        map.remove(&target);
        Some(target)
    }

    pub fn reaction_for(&self, kind: ReactionKind, target: &EventId) -> Option<EventId> {
        self.map(kind).get(target).copied()
    }

    pub fn liked(&self, target: &EventId) -> Option<EventId> {
        self.reaction_for(ReactionKind::Like, target)
    }

    pub fn boosted(&self, target: &EventId) -> Option<EventId> {
        self.reaction_for(ReactionKind::Boost, target)
    }

    pub fn apply(&mut self, change: ReactionChange) {
        match change {
            ReactionChange::Liked { target, reaction } => {
                self.record(ReactionKind::Like, target, reaction)
            }
            ReactionChange::Boosted { target, reaction } => {
                self.record(ReactionKind::Boost, target, reaction)
            }
            ReactionChange::Unliked { reaction } => {
                self.retract(ReactionKind::Like, &reaction);
            }
            ReactionChange::Unboosted { reaction } => {
                self.retract(ReactionKind::Boost, &reaction);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.boosted.is_empty()
    }

    pub fn len(&self, kind: ReactionKind) -> usize {
        self.map(kind).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> EventId {
        EventId::from_byte_array([n; 32])
    }

    #[test]
    fn test_like_then_unlike_removes_only_matching_entry() {
        let (x, y) = (id(1), id(2));
        let (r, s) = (id(10), id(20));
        let mut index = ReactionIndex::new();

        index.apply(ReactionChange::Liked {
            target: x,
            reaction: r,
        });
        index.apply(ReactionChange::Liked {
            target: y,
            reaction: s,
        });
        assert_eq!(index.liked(&x), Some(r));

        index.apply(ReactionChange::Unliked { reaction: r });
        assert_eq!(index.liked(&x), None);
        assert_eq!(index.liked(&y), Some(s));
    }

    #[test]
    fn test_stale_retraction_is_a_no_op() {
        let mut index = ReactionIndex::new();
        index.record(ReactionKind::Boost, id(1), id(10));

        assert_eq!(index.retract(ReactionKind::Boost, &id(99)), None);
        // A like retraction must not touch the boost map.
        assert_eq!(index.retract(ReactionKind::Like, &id(10)), None);
        assert_eq!(index.boosted(&id(1)), Some(id(10)));

        assert_eq!(index.retract(ReactionKind::Boost, &id(10)), Some(id(1)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_later_record_overwrites() {
        let mut index = ReactionIndex::new();
        index.record(ReactionKind::Like, id(1), id(10));
        index.record(ReactionKind::Like, id(1), id(11));
        assert_eq!(index.liked(&id(1)), Some(id(11)));
        assert_eq!(index.len(ReactionKind::Like), 1);
    }
}
