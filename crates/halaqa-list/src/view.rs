use halaqa_types::enums::VoteKind;
use tracing::debug;

use crate::collection::{Collection, Mutation, Placement};
use crate::record::{Appendable, FilterSet, Flagged, ListRecord, SortKey};
use crate::vote::Votable;

/// One page's list: base collection plus the active filter, search and sort
/// selections.
#[derive(Clone)]
pub struct ListView<T: ListRecord> {
    items: Collection<T>,
    filters: T::Filters,
    query: String,
    sort: Option<T::Sort>,
}

impl<T: ListRecord> Default for ListView<T> {
    fn default() -> Self {
        Self::new(Collection::default())
    }
}

impl<T: ListRecord> ListView<T> {
    pub fn new(items: impl Into<Collection<T>>) -> Self {
        Self {
            items: items.into(),
            filters: T::Filters::default(),
            query: String::new(),
            sort: None,
        }
    }

    pub fn items(&self) -> &Collection<T> {
        &self.items
    }

    /// Swaps in a whole new collection, e.g. a resolved fetch.
    pub fn replace_items(&mut self, items: impl Into<Collection<T>>) {
        self.items = items.into();
    }

    pub fn filters(&self) -> &T::Filters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut T::Filters {
        &mut self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn sort(&self) -> Option<T::Sort> {
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<T::Sort>) {
        self.sort = sort;
    }

    /// Selects a sort key by its UI tag. Unrecognized tags leave the list in
    /// source order.
    pub fn select_sort(&mut self, tag: &str) {
        self.sort = match tag.parse::<T::Sort>() {
            Ok(key) => Some(key),
            Err(_) => {
                debug!(tag, "unrecognized sort key, keeping source order");
                None
            }
        };
    }

    /// The records to render: filtered, searched, then stably sorted.
    /// The base collection is never modified.
    pub fn visible_items(&self) -> Vec<&T> {
        // Blank queries disable search; otherwise the query is matched as typed.
        let needle = if self.query.trim().is_empty() {
            String::new()
        } else {
            self.query.to_lowercase()
        };

        let mut visible: Vec<&T> = self
            .items
            .iter()
            .filter(|item| self.filters.admits(item))
            .filter(|item| needle.is_empty() || matches_query(*item, &needle))
            .collect();

        if let Some(key) = self.sort {
            visible.sort_by(|a, b| key.compare(a, b));
        }

        visible
    }

    pub fn toggle_flag(&mut self, id: &T::Id, flag: T::Flag) -> Mutation
    where
        T: Flagged,
    {
        let (items, outcome) = self.items.toggled(id, flag);
        self.items = items;
        outcome
    }

    pub fn cast_vote(&mut self, id: &T::Id, vote: VoteKind) -> Mutation
    where
        T: Votable,
    {
        let (items, outcome) = self.items.voted(id, vote);
        self.items = items;
        outcome
    }

    pub fn append(&mut self, item: T, at: Placement) -> T::Id
    where
        T: Appendable,
    {
        let (items, id) = self.items.appended(item, at);
        self.items = items;
        id
    }
}

fn matches_query<T: ListRecord>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}
