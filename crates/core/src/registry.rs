//! Generic in-memory entity registry.

use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::Sequence;

/// Owns every entity of one kind and hands out their ids.
///
/// Entities are keyed by id rather than by position, so lookups stay valid
/// regardless of how the collection evolves. Nothing is ever removed;
/// iteration order is ascending id, which is also creation order.
#[derive(Debug, Clone)]
pub struct Registry<E: Entity> {
    entries: BTreeMap<E::Id, E>,
    sequence: Sequence,
}

impl<E: Entity> Registry<E> {
    pub fn new() -> Self {
        Self::with_sequence(Sequence::default())
    }

    /// Registry whose first issued id is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self::with_sequence(Sequence::starting_at(first))
    }

    fn with_sequence(sequence: Sequence) -> Self {
        Self {
            entries: BTreeMap::new(),
            sequence,
        }
    }

    /// Assign the next id, build the entity with it and store it.
    pub fn create(&mut self, build: impl FnOnce(E::Id) -> E) -> E::Id {
        let id = E::Id::from(self.sequence.advance());
        let entity = build(id);
        debug_assert_eq!(entity.id(), id, "entity must keep the id it was built with");
        self.entries.insert(id, entity);
        id
    }

    pub fn find(&self, id: E::Id) -> Option<&E> {
        self.entries.get(&id)
    }

    pub fn find_mut(&mut self, id: E::Id) -> Option<&mut E> {
        self.entries.get_mut(&id)
    }

    /// Like [`Registry::find`], but absence becomes [`DomainError::NotFound`].
    pub fn require(&self, id: E::Id) -> DomainResult<&E> {
        self.find(id).ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    pub fn require_mut(&mut self, id: E::Id) -> DomainResult<&mut E> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    /// Fail with [`DomainError::NotFound`] unless `id` was issued here.
    pub fn ensure(&self, id: E::Id) -> DomainResult<()> {
        self.require(id).map(|_| ())
    }

    pub fn contains(&self, id: E::Id) -> bool {
        self.entries.contains_key(&id)
    }

    /// First entity (in id order) matching `predicate`.
    pub fn find_by(&self, mut predicate: impl FnMut(&E) -> bool) -> Option<&E> {
        self.entries.values().find(|e| predicate(e))
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id the next [`Registry::create`] call will assign.
    pub fn next_id(&self) -> E::Id {
        E::Id::from(self.sequence.peek())
    }
}

impl<E: Entity> Default for Registry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    crate::define_id!(NoteId, "NoteId");

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: NoteId,
        text: String,
    }

    impl Entity for Note {
        type Id = NoteId;
        const KIND: &'static str = "note";

        fn id(&self) -> NoteId {
            self.id
        }
    }

    fn note(id: NoteId, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    #[test]
    fn create_assigns_one_based_ids_in_order() {
        let mut notes = Registry::<Note>::new();
        let a = notes.create(|id| note(id, "a"));
        let b = notes.create(|id| note(id, "b"));
        assert_eq!(a, NoteId::new(1));
        assert_eq!(b, NoteId::new(2));
        assert_eq!(notes.len(), 2);
        let texts: Vec<_> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn custom_start_offsets_first_id() {
        let mut notes = Registry::<Note>::starting_at(1001);
        assert_eq!(notes.next_id(), NoteId::new(1001));
        let id = notes.create(|id| note(id, "x"));
        assert_eq!(id, NoteId::new(1001));
    }

    #[test]
    fn require_reports_kind_and_id() {
        let notes = Registry::<Note>::new();
        assert_eq!(
            notes.require(NoteId::new(3)).unwrap_err(),
            DomainError::not_found("note", 3)
        );
        assert!(notes.find(NoteId::new(0)).is_none());
    }

    #[test]
    fn find_by_scans_in_id_order() {
        let mut notes = Registry::<Note>::new();
        notes.create(|id| note(id, "dup"));
        notes.create(|id| note(id, "dup"));
        let hit = notes.find_by(|n| n.text == "dup").unwrap();
        assert_eq!(hit.id, NoteId::new(1));
        assert!(notes.find_by(|n| n.text == "none").is_none());
    }

    #[test]
    fn registries_do_not_share_numbering() {
        let mut first = Registry::<Note>::new();
        let mut second = Registry::<Note>::new();
        first.create(|id| note(id, "a"));
        first.create(|id| note(id, "b"));
        assert_eq!(second.create(|id| note(id, "c")), NoteId::new(1));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every issued id is findable, ids are unique and strictly
        /// increasing, and ids past the end are never found.
        #[test]
        fn issued_ids_are_unique_and_findable(texts in prop::collection::vec("[a-z]{0,8}", 0..50)) {
            let mut notes = Registry::<Note>::new();
            let ids: Vec<NoteId> = texts.iter().map(|t| notes.create(|id| note(id, t))).collect();

            for pair in ids.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for (id, text) in ids.iter().zip(&texts) {
                prop_assert_eq!(&notes.require(*id).unwrap().text, text);
            }
            prop_assert!(notes.find(notes.next_id()).is_none());
            prop_assert!(notes.find(NoteId::new(0)).is_none());
        }
    }
}
