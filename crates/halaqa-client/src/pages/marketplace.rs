//! Second-hand marketplace listings.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use halaqa_list::{Appendable, FilterSet, Flagged, ListRecord, Selection, SortKey, order};
use halaqa_types::enums::{ListingCategory, ListingStatus};
use halaqa_types::tables::MarketplaceListing;
use uuid::Uuid;

use super::counter;

#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: ListingCategory,
    pub status: ListingStatus,
    pub images: Vec<String>,
    pub views: u32,
    pub saved: bool,
    pub created_at: DateTime<Utc>,
}

impl ListingCard {
    pub fn draft(seller_id: Uuid, title: &str, price: f64, category: ListingCategory) -> Self {
        Self {
            id: Uuid::nil(),
            seller_id,
            title: title.to_owned(),
            description: None,
            price,
            category,
            status: ListingStatus::Available,
            images: Vec::new(),
            views: 0,
            saved: false,
            created_at: Utc::now(),
        }
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl From<MarketplaceListing> for ListingCard {
    fn from(row: MarketplaceListing) -> Self {
        Self {
            id: row.id,
            seller_id: row.seller_id,
            title: row.title,
            description: row.description,
            price: row.price,
            category: row.category,
            status: row.status,
            images: row.images,
            views: counter(row.views),
            saved: false,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingFilters {
    pub category: Selection<ListingCategory>,
    pub status: Selection<ListingStatus>,
}

impl FilterSet<ListingCard> for ListingFilters {
    fn admits(&self, item: &ListingCard) -> bool {
        self.category.admits(&item.category) && self.status.admits(&item.status)
    }
}

sort_keys! {
    ListingSort {
        Newest => "newest",
        PriceLow => "price_low",
        PriceHigh => "price_high",
        MostViewed => "views",
    }
}

impl SortKey<ListingCard> for ListingSort {
    fn compare(self, a: &ListingCard, b: &ListingCard) -> Ordering {
        match self {
            Self::Newest => order::descending(a.created_at, b.created_at),
            Self::PriceLow => order::ascending_f64(a.price, b.price),
            Self::PriceHigh => order::descending_f64(a.price, b.price),
            Self::MostViewed => order::descending(a.views, b.views),
        }
    }
}

impl ListRecord for ListingCard {
    type Id = Uuid;
    type Filters = ListingFilters;
    type Sort = ListingSort;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFlag {
    Saved,
}

impl Flagged for ListingCard {
    type Flag = ListingFlag;

    fn toggle(&mut self, flag: ListingFlag) {
        match flag {
            ListingFlag::Saved => self.saved = !self.saved,
        }
    }
}

impl Appendable for ListingCard {
    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}
