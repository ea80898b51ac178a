//! Generated contract for the halaqa store.
//!
//! Regenerated from the store schema whenever it changes; not edited by hand.

pub mod api;
pub mod enums;
pub mod tables;

use halaqa_schema::{EnumDef, Schema, Table, TableDef};

use crate::enums::*;
use crate::tables::*;

static TABLES: [TableDef; 11] = [
    Profile::DEF,
    UserRole::DEF,
    NotificationPreferences::DEF,
    PrayerSession::DEF,
    Event::DEF,
    Course::DEF,
    CourseEnrollment::DEF,
    Message::DEF,
    MarketplaceListing::DEF,
    ForumPost::DEF,
    PostVote::DEF,
];

static ENUMS: [EnumDef; 10] = [
    EnumDef::of::<AppRole>(),
    EnumDef::of::<Gender>(),
    EnumDef::of::<PrayerName>(),
    EnumDef::of::<PrayerStatus>(),
    EnumDef::of::<EventCategory>(),
    EnumDef::of::<CourseLevel>(),
    EnumDef::of::<ListingCategory>(),
    EnumDef::of::<ListingStatus>(),
    EnumDef::of::<PostCategory>(),
    EnumDef::of::<VoteKind>(),
];

/// Every table and enumeration of the store.
pub static SCHEMA: Schema = Schema::new(&TABLES, &ENUMS);
