//! Page-side data layer: fetching decoded collections from the store and
//! the list views each page renders.

pub mod api;
pub mod pages;
pub mod remote;

pub use api::{ApiClient, FetchError};
pub use remote::{FetchState, FetchTicket, RemoteList};
