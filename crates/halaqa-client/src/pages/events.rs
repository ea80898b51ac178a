//! Event listings with category, audience and featured selectors.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use halaqa_list::{FilterSet, Flagged, ListRecord, Selection, SortKey, order, toggle_counted};
use halaqa_types::enums::{EventCategory, Gender};
use halaqa_types::tables::Event;
use uuid::Uuid;

use super::counter;

#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub audience: Gender,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub capacity: Option<u32>,
    pub interested_count: u32,
    pub interested: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventCard {
    fn from(row: Event) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            audience: row.audience,
            location: row.location,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            capacity: row.capacity.map(counter),
            interested_count: counter(row.interested_count),
            interested: false,
            featured: row.is_featured,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilters {
    pub category: Selection<EventCategory>,
    pub audience: Selection<Gender>,
    pub featured: Selection<bool>,
}

impl FilterSet<EventCard> for EventFilters {
    fn admits(&self, item: &EventCard) -> bool {
        self.category.admits(&item.category)
            && self.audience.admits(&item.audience)
            && self.featured.admits(&item.featured)
    }
}

sort_keys! {
    EventSort {
        /// Soonest first.
        Date => "date",
        Latest => "latest",
        Popular => "popular",
        Title => "title",
    }
}

impl SortKey<EventCard> for EventSort {
    fn compare(self, a: &EventCard, b: &EventCard) -> Ordering {
        match self {
            Self::Date => order::ascending(a.starts_at, b.starts_at),
            Self::Latest => order::descending(a.created_at, b.created_at),
            Self::Popular => order::descending(a.interested_count, b.interested_count),
            Self::Title => order::alphabetical(&a.title, &b.title),
        }
    }
}

impl ListRecord for EventCard {
    type Id = Uuid;
    type Filters = EventFilters;
    type Sort = EventSort;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.title.as_str()), self.description.as_deref(), self.location.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlag {
    Interested,
}

impl Flagged for EventCard {
    type Flag = EventFlag;

    fn toggle(&mut self, flag: EventFlag) {
        match flag {
            EventFlag::Interested => toggle_counted(&mut self.interested, &mut self.interested_count),
        }
    }
}
