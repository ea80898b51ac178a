use std::fmt::Display;

use halaqa_list::{ListRecord, ListView};
use tracing::{debug, warn};

/// Where a remotely sourced list stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Ready,
    /// Shown to the user until dismissed. Retrying is a new manual fetch.
    Failed { message: String, dismissed: bool },
}

/// Identifies one fetch; results carrying an outdated ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A page list whose collection comes from the store.
///
/// A resolved fetch replaces the whole collection. There is no automatic
/// retry and no cancellation: abandoning the page or starting a newer fetch
/// just makes older results stale.
pub struct RemoteList<T: ListRecord> {
    view: ListView<T>,
    state: FetchState,
    generation: u64,
}

impl<T: ListRecord> Default for RemoteList<T> {
    fn default() -> Self {
        Self::new(ListView::default())
    }
}

impl<T: ListRecord> RemoteList<T> {
    pub fn new(view: ListView<T>) -> Self {
        Self {
            view,
            state: FetchState::Idle,
            generation: 0,
        }
    }

    pub fn view(&self) -> &ListView<T> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<T> {
        &mut self.view
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = FetchState::Loading;
        FetchTicket(self.generation)
    }

    /// Applies a fetch outcome. Returns false when the ticket is stale and
    /// the result was discarded.
    pub fn resolve<E: Display>(&mut self, ticket: FetchTicket, result: Result<Vec<T>, E>) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale fetch result");
            return false;
        }

        match result {
            Ok(items) => {
                self.view.replace_items(items);
                self.state = FetchState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "fetch failed");
                self.state = FetchState::Failed {
                    message: err.to_string(),
                    dismissed: false,
                };
            }
        }
        true
    }

    /// The page was left; any in-flight fetch resolves into nothing.
    pub fn abandon(&mut self) {
        self.generation += 1;
        if self.state == FetchState::Loading {
            self.state = FetchState::Idle;
        }
    }

    /// Error text to show, if any.
    pub fn visible_error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message, dismissed: false } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn dismiss_error(&mut self) {
        if let FetchState::Failed { dismissed, .. } = &mut self.state {
            *dismissed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use halaqa_list::ListView;

    use super::*;
    use crate::api::FetchError;
    use crate::pages::names::{self, DivineName};

    fn offline() -> Result<Vec<DivineName>, FetchError> {
        Err(FetchError::Status {
            status: 503,
            message: "store unavailable".into(),
        })
    }

    #[test]
    fn test_success_replaces_collection() {
        let mut list = RemoteList::new(ListView::new(vec![]));
        let ticket = list.begin_fetch();
        assert!(list.is_loading());

        assert!(list.resolve(ticket, Ok::<_, FetchError>(names::seed())));
        assert_eq!(list.state(), &FetchState::Ready);
        assert_eq!(list.view().items().len(), names::seed().len());
    }

    #[test]
    fn test_failure_is_visible_until_dismissed() {
        let mut list = RemoteList::new(ListView::new(names::seed()));
        let ticket = list.begin_fetch();
        list.resolve(ticket, offline());

        assert_eq!(list.visible_error(), Some("server answered 503: store unavailable"));
        assert_eq!(list.view().items().len(), names::seed().len());

        list.dismiss_error();
        assert_eq!(list.visible_error(), None);
        assert!(matches!(list.state(), FetchState::Failed { dismissed: true, .. }));

        let retry = list.begin_fetch();
        assert!(list.resolve(retry, Ok::<_, FetchError>(vec![])));
        assert!(list.view().items().is_empty());
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let mut list = RemoteList::<DivineName>::default();
        let first = list.begin_fetch();
        let second = list.begin_fetch();

        assert!(!list.resolve(first, Ok::<_, FetchError>(names::seed())));
        assert!(list.view().items().is_empty());
        assert!(list.is_loading());

        assert!(list.resolve(second, offline()));
        assert!(list.visible_error().is_some());
    }

    #[test]
    fn test_abandoned_page_ignores_late_result() {
        let mut list = RemoteList::<DivineName>::default();
        let ticket = list.begin_fetch();
        list.abandon();

        assert_eq!(list.state(), &FetchState::Idle);
        assert!(!list.resolve(ticket, Ok::<_, FetchError>(names::seed())));
        assert!(list.view().items().is_empty());
    }
}
