//! Filter, search and sort over an in-memory collection, plus pure
//! collection updates for per-item interactions.
//!
//! Each page owns one [`ListView`] over its own records. A record type
//! declares its filter selectors, searchable fields and sort keys through
//! [`ListRecord`]; the view derives the visible sequence without touching the
//! underlying [`Collection`]. Interactions (flag toggles, votes, appends)
//! produce a new collection and swap it in.

pub mod collection;
pub mod order;
pub mod record;
pub mod selection;
pub mod view;
pub mod vote;

pub use collection::{Collection, Mutation, Placement};
pub use record::{Appendable, FilterSet, Flagged, FreshId, ListRecord, NoFilters, SortKey};
pub use selection::{MATCH_ALL, Selection, choices};
pub use view::ListView;
pub use vote::{Votable, VoteTally, toggle_counted};
