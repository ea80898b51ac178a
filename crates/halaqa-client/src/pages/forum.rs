//! Discussion forum: category filter, votes and bookmarks.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use halaqa_list::{
    Appendable, FilterSet, Flagged, ListRecord, Selection, SortKey, Votable, VoteTally, order,
};
use halaqa_types::enums::PostCategory;
use halaqa_types::tables::ForumPost;
use uuid::Uuid;

use super::counter;

#[derive(Debug, Clone, PartialEq)]
pub struct ForumThread {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: PostCategory,
    pub tags: Vec<String>,
    pub reply_count: u32,
    pub votes: VoteTally,
    pub bookmarked: bool,
    pub created_at: DateTime<Utc>,
}

impl ForumThread {
    /// A locally composed thread; its id is assigned when appended.
    pub fn draft(author_id: Uuid, title: &str, content: &str, category: PostCategory) -> Self {
        Self {
            id: Uuid::nil(),
            author_id,
            title: title.to_owned(),
            content: content.to_owned(),
            category,
            tags: Vec::new(),
            reply_count: 0,
            votes: VoteTally::default(),
            bookmarked: false,
            created_at: Utc::now(),
        }
    }
}

impl From<ForumPost> for ForumThread {
    fn from(row: ForumPost) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            content: row.content,
            category: row.category,
            tags: row.tags,
            reply_count: counter(row.reply_count),
            votes: VoteTally {
                likes: counter(row.likes),
                dislikes: counter(row.dislikes),
                user_vote: None,
            },
            bookmarked: false,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForumFilters {
    pub category: Selection<PostCategory>,
}

impl FilterSet<ForumThread> for ForumFilters {
    fn admits(&self, item: &ForumThread) -> bool {
        self.category.admits(&item.category)
    }
}

sort_keys! {
    ForumSort {
        Latest => "latest",
        Popular => "popular",
        MostReplies => "replies",
        Title => "title",
    }
}

impl SortKey<ForumThread> for ForumSort {
    fn compare(self, a: &ForumThread, b: &ForumThread) -> Ordering {
        match self {
            Self::Latest => order::descending(a.created_at, b.created_at),
            Self::Popular => order::descending(a.votes.likes, b.votes.likes),
            Self::MostReplies => order::descending(a.reply_count, b.reply_count),
            Self::Title => order::alphabetical(&a.title, &b.title),
        }
    }
}

impl ListRecord for ForumThread {
    type Id = Uuid;
    type Filters = ForumFilters;
    type Sort = ForumSort;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.content.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumFlag {
    Bookmark,
}

impl Flagged for ForumThread {
    type Flag = ForumFlag;

    fn toggle(&mut self, flag: ForumFlag) {
        match flag {
            ForumFlag::Bookmark => self.bookmarked = !self.bookmarked,
        }
    }
}

impl Votable for ForumThread {
    fn tally_mut(&mut self) -> &mut VoteTally {
        &mut self.votes
    }
}

impl Appendable for ForumThread {
    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use halaqa_list::{ListView, Placement, choices};
    use halaqa_types::enums::VoteKind;

    use super::*;

    fn thread(title: &str, category: PostCategory, likes: u32, day: u32) -> ForumThread {
        let mut t = ForumThread::draft(Uuid::nil(), title, "", category);
        t.id = Uuid::new_v4();
        t.votes.likes = likes;
        t.created_at = Utc.with_ymd_and_hms(2025, 2, day, 12, 0, 0).unwrap();
        t
    }

    fn board() -> ListView<ForumThread> {
        let mut tagged = thread("Fasting while travelling", PostCategory::Fiqh, 7, 3);
        tagged.tags = vec!["Ramadan".into(), "safar".into()];
        ListView::new(vec![
            thread("Understanding Tawakkul", PostCategory::Aqeedah, 12, 1),
            tagged,
            thread("Jumu'ah room change", PostCategory::Announcements, 3, 5),
            thread("Hijrah timeline", PostCategory::Seerah, 12, 2),
        ])
    }

    fn titles(view: &ListView<ForumThread>) -> Vec<&str> {
        view.visible_items().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_latest_and_popular() {
        let mut view = board();
        view.select_sort("latest");
        assert_eq!(
            titles(&view),
            vec!["Jumu'ah room change", "Fasting while travelling", "Hijrah timeline", "Understanding Tawakkul"]
        );

        view.select_sort("popular");
        assert_eq!(
            titles(&view),
            vec!["Understanding Tawakkul", "Hijrah timeline", "Fasting while travelling", "Jumu'ah room change"]
        );
    }

    #[test]
    fn test_search_reaches_tags() {
        let mut view = board();
        view.set_query("RAMADAN");
        assert_eq!(titles(&view), vec!["Fasting while travelling"]);
    }

    #[test]
    fn test_category_filter() {
        let options = choices::<PostCategory>();
        assert_eq!(options[0], "all");
        assert!(options.contains(&"seerah"));

        let mut view = board();
        view.filters_mut().category = Selection::parse(options[4]).unwrap();
        assert_eq!(titles(&view), vec!["Hijrah timeline"]);
    }

    #[test]
    fn test_vote_and_bookmark() {
        let mut view = board();
        let id = view.items().as_slice()[2].id;

        view.cast_vote(&id, VoteKind::Dislike);
        view.toggle_flag(&id, ForumFlag::Bookmark);
        let thread = view.items().get(&id).unwrap();
        assert_eq!(thread.votes.dislikes, 1);
        assert_eq!(thread.votes.user_vote, Some(VoteKind::Dislike));
        assert!(thread.bookmarked);
    }

    #[test]
    fn test_new_thread_goes_on_top() {
        let mut view = board();
        let draft = ForumThread::draft(Uuid::new_v4(), "Study buddies?", "Looking for Arabic partners", PostCategory::General);
        let id = view.append(draft, Placement::Front);
        assert!(!id.is_nil());
        assert_eq!(view.visible_items()[0].id, id);
    }

    #[test]
    fn test_from_row_clamps_counters() {
        let row = ForumPost {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "t".into(),
            content: "c".into(),
            category: PostCategory::General,
            tags: vec![],
            likes: 4,
            dislikes: -1,
            reply_count: 9,
            created_at: Utc::now(),
        };
        let thread = ForumThread::from(row);
        assert_eq!(thread.votes, VoteTally { likes: 4, dislikes: 0, user_vote: None });
        assert_eq!(thread.reply_count, 9);
        assert_eq!(ForumSort::TAGS, &["latest", "popular", "replies", "title"]);
    }
}
