use halaqa_schema::enum_tags;

enum_tags! {
    AppRole = "app_role" {
        Member => "member",
        Moderator => "moderator",
        Admin => "admin",
    }
}

enum_tags! {
    Gender = "gender" {
        Brothers => "brothers",
        Sisters => "sisters",
        Mixed => "mixed",
    }
}

enum_tags! {
    PrayerName = "prayer_name" {
        Fajr => "fajr",
        Dhuhr => "dhuhr",
        Asr => "asr",
        Maghrib => "maghrib",
        Isha => "isha",
    }
}

enum_tags! {
    PrayerStatus = "prayer_status" {
        OnTime => "on_time",
        Late => "late",
        Missed => "missed",
        /// Made up after its time.
        Qada => "qada",
    }
}

enum_tags! {
    EventCategory = "event_category" {
        Lecture => "lecture",
        Halaqa => "halaqa",
        Social => "social",
        Sports => "sports",
        Charity => "charity",
    }
}

enum_tags! {
    CourseLevel = "course_level" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

enum_tags! {
    ListingCategory = "listing_category" {
        Books => "books",
        Electronics => "electronics",
        Clothing => "clothing",
        Furniture => "furniture",
        Other => "other",
    }
}

enum_tags! {
    ListingStatus = "listing_status" {
        Available => "available",
        Reserved => "reserved",
        Sold => "sold",
    }
}

enum_tags! {
    PostCategory = "post_category" {
        General => "general",
        Fiqh => "fiqh",
        Aqeedah => "aqeedah",
        Seerah => "seerah",
        Announcements => "announcements",
    }
}

enum_tags! {
    VoteKind = "vote_kind" {
        Like => "like",
        Dislike => "dislike",
    }
}
