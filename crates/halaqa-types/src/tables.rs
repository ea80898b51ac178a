//! Row, insert and update shapes for every table.

use chrono::{DateTime, Utc};
use halaqa_schema::table;
use uuid::Uuid;

use crate::enums::{
    AppRole, CourseLevel, EventCategory, Gender, ListingCategory, ListingStatus, PostCategory,
    PrayerName, PrayerStatus, VoteKind,
};

table! {
    /// Public profile of a registered member.
    "profiles" => Profile, ProfileInsert, ProfileUpdate {
        id: Uuid = default,
        full_name: String,
        email: String,
        university: Option<String>,
        avatar_url: Option<String>,
        created_at: DateTime<Utc> = default,
    }
}

table! {
    "user_roles" => UserRole, UserRoleInsert, UserRoleUpdate {
        id: Uuid = default,
        user_id: Uuid,
        role: AppRole = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        user_id -> "profiles".id (ManyToOne),
    }
}

table! {
    /// At most one row per profile.
    "notification_preferences" => NotificationPreferences, NotificationPreferencesInsert, NotificationPreferencesUpdate {
        id: Uuid = default,
        user_id: Uuid,
        email_enabled: bool = default,
        prayer_reminders: bool = default,
        /// Per-channel overrides, shape owned by the settings page.
        settings: serde_json::Value = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        user_id -> "profiles".id (OneToOne),
    }
}

table! {
    /// One logged prayer.
    "prayer_sessions" => PrayerSession, PrayerSessionInsert, PrayerSessionUpdate {
        id: Uuid = default,
        user_id: Uuid,
        prayer: PrayerName,
        status: PrayerStatus = default,
        prayed_at: DateTime<Utc>,
        in_congregation: bool = default,
        notes: Option<String>,
        created_at: DateTime<Utc> = default,
    }
    relations {
        user_id -> "profiles".id (ManyToOne),
    }
}

table! {
    "events" => Event, EventInsert, EventUpdate {
        id: Uuid = default,
        title: String,
        description: Option<String>,
        category: EventCategory,
        audience: Gender = default,
        location: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        organizer_id: Uuid,
        capacity: Option<i64>,
        interested_count: i64 = default,
        is_featured: bool = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        organizer_id -> "profiles".id (ManyToOne),
    }
}

table! {
    "courses" => Course, CourseInsert, CourseUpdate {
        id: Uuid = default,
        title: String,
        instructor: String,
        level: CourseLevel,
        description: Option<String>,
        lessons: i64 = default,
        enrolled_count: i64 = default,
        rating: Option<f64>,
        created_at: DateTime<Utc> = default,
    }
}

table! {
    "course_enrollments" => CourseEnrollment, CourseEnrollmentInsert, CourseEnrollmentUpdate {
        id: Uuid = default,
        course_id: Uuid,
        user_id: Uuid,
        progress: i64 = default,
        completed: bool = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        course_id -> "courses".id (ManyToOne),
        user_id -> "profiles".id (ManyToOne),
    }
}

table! {
    /// Direct message between two members.
    "messages" => Message, MessageInsert, MessageUpdate {
        id: Uuid = default,
        sender_id: Uuid,
        recipient_id: Uuid,
        subject: String,
        body: String,
        is_read: bool = default,
        is_starred: bool = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        sender_id -> "profiles".id (ManyToOne),
        recipient_id -> "profiles".id (ManyToOne),
    }
}

table! {
    "marketplace_listings" => MarketplaceListing, MarketplaceListingInsert, MarketplaceListingUpdate {
        id: Uuid = default,
        seller_id: Uuid,
        title: String,
        description: Option<String>,
        price: f64,
        category: ListingCategory,
        status: ListingStatus = default,
        images: Vec<String> = default,
        views: i64 = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        seller_id -> "profiles".id (ManyToOne),
    }
}

table! {
    "forum_posts" => ForumPost, ForumPostInsert, ForumPostUpdate {
        id: Uuid = default,
        author_id: Uuid,
        title: String,
        content: String,
        category: PostCategory = default,
        tags: Vec<String> = default,
        likes: i64 = default,
        dislikes: i64 = default,
        reply_count: i64 = default,
        created_at: DateTime<Utc> = default,
    }
    relations {
        author_id -> "profiles".id (ManyToOne),
    }
}

table! {
    /// A member's current vote on a post; retracting deletes the row.
    "post_votes" => PostVote, PostVoteInsert, PostVoteUpdate {
        id: Uuid = default,
        post_id: Uuid,
        user_id: Uuid,
        kind: VoteKind,
        created_at: DateTime<Utc> = default,
    }
    relations {
        post_id -> "forum_posts".id (ManyToOne),
        user_id -> "profiles".id (ManyToOne),
    }
}
