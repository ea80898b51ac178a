use std::slice;
use std::sync::Arc;

use halaqa_types::enums::VoteKind;

use crate::record::{Appendable, FreshId, Flagged, ListRecord};
use crate::vote::Votable;

/// What an interaction did to the collection.
///
/// `NotFound` leaves the collection exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Where a page shows newly created records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Front,
    Back,
}

/// Immutable, cheaply shared record sequence. Every update builds a new one.
#[derive(Debug)]
pub struct Collection<T> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when both handles share the same underlying sequence.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: ListRecord> Collection<T> {
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn toggled(&self, id: &T::Id, flag: T::Flag) -> (Self, Mutation)
    where
        T: Flagged,
    {
        self.replace_one(id, |item| item.toggle(flag))
    }

    pub fn voted(&self, id: &T::Id, vote: VoteKind) -> (Self, Mutation)
    where
        T: Votable,
    {
        self.replace_one(id, |item| {
            let tally = item.tally_mut();
            *tally = tally.cast(vote);
        })
    }

    /// Adds `item` under a freshly generated id, returning the new
    /// collection and that id.
    pub fn appended(&self, mut item: T, at: Placement) -> (Self, T::Id)
    where
        T: Appendable,
    {
        let id = T::Id::fresh();
        item.set_id(id.clone());

        let mut items = Vec::with_capacity(self.items.len() + 1);
        match at {
            Placement::Front => {
                items.push(item);
                items.extend(self.items.iter().cloned());
            }
            Placement::Back => {
                items.extend(self.items.iter().cloned());
                items.push(item);
            }
        }

        (Self::new(items), id)
    }

    /// Copies the sequence with one record swapped for its updated version.
    fn replace_one(&self, id: &T::Id, update: impl FnOnce(&mut T)) -> (Self, Mutation) {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            return (self.clone(), Mutation::NotFound);
        };

        let mut items = self.items.as_ref().clone();
        if let Some(slot) = items.get_mut(index) {
            update(slot);
        }
        (Self::new(items), Mutation::Applied)
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
