//! Member inbox.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use halaqa_list::{FilterSet, Flagged, ListRecord, Selection, SortKey, order};
use halaqa_types::tables::Message;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct InboxMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub starred: bool,
    pub received_at: DateTime<Utc>,
}

impl From<Message> for InboxMessage {
    fn from(row: Message) -> Self {
        Self {
            id: row.id,
            sender_id: row.sender_id,
            subject: row.subject,
            body: row.body,
            read: row.is_read,
            starred: row.is_starred,
            received_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InboxFilters {
    pub read: Selection<bool>,
    pub starred: Selection<bool>,
}

impl FilterSet<InboxMessage> for InboxFilters {
    fn admits(&self, item: &InboxMessage) -> bool {
        self.read.admits(&item.read) && self.starred.admits(&item.starred)
    }
}

sort_keys! {
    InboxSort {
        Latest => "latest",
        Oldest => "oldest",
        Subject => "subject",
    }
}

impl SortKey<InboxMessage> for InboxSort {
    fn compare(self, a: &InboxMessage, b: &InboxMessage) -> Ordering {
        match self {
            Self::Latest => order::descending(a.received_at, b.received_at),
            Self::Oldest => order::ascending(a.received_at, b.received_at),
            Self::Subject => order::alphabetical(&a.subject, &b.subject),
        }
    }
}

impl ListRecord for InboxMessage {
    type Id = Uuid;
    type Filters = InboxFilters;
    type Sort = InboxSort;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.subject.as_str(), self.body.as_str()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboxFlag {
    Read,
    Star,
}

impl Flagged for InboxMessage {
    type Flag = InboxFlag;

    fn toggle(&mut self, flag: InboxFlag) {
        match flag {
            InboxFlag::Read => self.read = !self.read,
            InboxFlag::Star => self.starred = !self.starred,
        }
    }
}

/// Number of messages not yet read, regardless of active selectors.
pub fn unread_count<'a>(messages: impl IntoIterator<Item = &'a InboxMessage>) -> usize {
    messages.into_iter().filter(|m| !m.read).count()
}
