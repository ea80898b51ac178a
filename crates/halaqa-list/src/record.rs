use std::cmp::Ordering;
use std::fmt::Debug;
use std::str::FromStr;

use uuid::Uuid;

/// A record a [`ListView`](crate::ListView) can filter, search and sort.
pub trait ListRecord: Clone {
    type Id: PartialEq + Clone + Debug;
    type Filters: FilterSet<Self>;
    type Sort: SortKey<Self>;

    fn id(&self) -> &Self::Id;

    /// Fields a search query is matched against. Any one matching is enough.
    fn search_fields(&self) -> Vec<&str>;
}

/// The independent filter selectors of one record type.
pub trait FilterSet<T>: Default + Clone {
    /// True when `item` satisfies every active selector.
    fn admits(&self, item: &T) -> bool;
}

/// For record types without classification filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilters;

impl<T> FilterSet<T> for NoFilters {
    fn admits(&self, _item: &T) -> bool {
        true
    }
}

/// Closed set of orderings for one record type, parsed from UI tags.
pub trait SortKey<T>: Copy + FromStr {
    /// Must be a total order; ties keep source order.
    fn compare(self, a: &T, b: &T) -> Ordering;
}

/// Records with owner-toggled boolean flags.
pub trait Flagged: ListRecord {
    type Flag: Copy + Debug;

    /// Inverts `flag`, adjusting any counter coupled to it by one.
    fn toggle(&mut self, flag: Self::Flag);
}

/// Records that can be created locally and given a fresh identifier.
pub trait Appendable: ListRecord<Id: FreshId> {
    fn set_id(&mut self, id: Self::Id);
}

pub trait FreshId {
    fn fresh() -> Self;
}

impl FreshId for Uuid {
    fn fresh() -> Self {
        Uuid::new_v4()
    }
}

impl FreshId for String {
    fn fresh() -> Self {
        Uuid::new_v4().to_string()
    }
}
