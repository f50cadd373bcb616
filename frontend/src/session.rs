use log::debug;

use crate::criteria::{Criteria, SortMode};
use crate::derivation::derive_view;
use crate::error::LoadError;
use crate::post::{distinct_authors, AuthorId, Post, PostSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(LoadError),
}

/// Identifies one load request. Completions only apply while their ticket
/// is the one in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub enum Msg {
    SearchChanged(String),
    AuthorSelected(Option<AuthorId>),
    SortSelected(SortMode),
    LoadFinished(LoadTicket, Result<Vec<Post>, LoadError>),
    RetryRequested,
}

/// State of one mounted listing: the raw snapshot, the criteria, the load
/// state and the view derived from them.
///
/// Every change goes through [`ListingSession::update`]; the derived view is
/// recomputed when the raw revision or the criteria differ from the inputs
/// it was last derived from.
#[derive(Debug)]
pub struct ListingSession {
    raw: PostSnapshot,
    raw_revision: u64,
    criteria: Criteria,
    load_state: LoadState,
    view: Vec<Post>,
    derived_from: Option<(u64, Criteria)>,
    generation: u64,
    in_flight: Option<LoadTicket>,
    pending: Option<LoadTicket>,
    activated: bool,
    torn_down: bool,
}

impl Default for ListingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingSession {
    pub fn new() -> Self {
        let mut session = ListingSession {
            raw: PostSnapshot::from(Vec::new()),
            raw_revision: 0,
            criteria: Criteria::default(),
            load_state: LoadState::Loading,
            view: Vec::new(),
            derived_from: None,
            generation: 0,
            in_flight: None,
            pending: None,
            activated: false,
            torn_down: false,
        };
        session.refresh();
        session
    }

    /// Issues the one load of this activation. Later calls return `None`.
    pub fn activate(&mut self) -> Option<LoadTicket> {
        if self.activated || self.torn_down {
            return None;
        }
        self.activated = true;
        Some(self.issue_ticket())
    }

    /// Hands out the ticket issued by [`Msg::RetryRequested`], once.
    pub fn take_pending_ticket(&mut self) -> Option<LoadTicket> {
        self.pending.take()
    }

    /// Any load still in flight will be ignored when it completes.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.in_flight = None;
        self.pending = None;
        self.generation += 1;
    }

    /// Applies a message; returns whether anything observable changed.
    pub fn update(&mut self, msg: Msg) -> bool {
        match msg {
            Msg::SearchChanged(query) => {
                if self.criteria.search_query == query {
                    return false;
                }
                self.criteria.search_query = query;
            }
            Msg::AuthorSelected(author) => {
                if self.criteria.author_filter == author {
                    return false;
                }
                self.criteria.author_filter = author;
            }
            Msg::SortSelected(mode) => {
                if self.criteria.sort_mode == mode {
                    return false;
                }
                self.criteria.sort_mode = mode;
            }
            Msg::LoadFinished(ticket, result) => {
                if !self.finish_load(ticket, result) {
                    return false;
                }
            }
            Msg::RetryRequested => {
                if self.torn_down || !matches!(self.load_state, LoadState::Failed(_)) {
                    return false;
                }
                self.load_state = LoadState::Loading;
                self.pending = Some(self.issue_ticket());
            }
        }
        self.refresh();
        true
    }

    /// Re-derives the view if its inputs moved. Returns whether it did.
    pub fn refresh(&mut self) -> bool {
        let key = (self.raw_revision, self.criteria.clone());
        if self.derived_from.as_ref() == Some(&key) {
            return false;
        }
        self.view = derive_view(&self.raw, &self.criteria);
        self.derived_from = Some(key);
        true
    }

    pub fn posts(&self) -> &PostSnapshot {
        &self.raw
    }

    pub fn view(&self) -> &[Post] {
        &self.view
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn authors(&self) -> Vec<AuthorId> {
        distinct_authors(&self.raw)
    }

    fn issue_ticket(&mut self) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Post>, LoadError>) -> bool {
        if self.in_flight != Some(ticket) {
            debug!(
                "ignoring completion of load {} (torn down: {})",
                ticket.generation, self.torn_down
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(posts) => {
                self.raw = PostSnapshot::from(posts);
                self.raw_revision += 1;
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                debug!("load {} marked the listing failed: {}", ticket.generation, err);
                self.load_state = LoadState::Failed(err);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> Vec<Post> {
        vec![
            Post::new(1, 1, "Alpha", "x"),
            Post::new(2, 2, "beta", "y"),
        ]
    }

    fn loaded() -> ListingSession {
        let mut session = ListingSession::new();
        let ticket = session.activate().unwrap();
        assert!(session.update(Msg::LoadFinished(ticket, Ok(posts()))));
        session
    }

    #[test]
    fn starts_loading_with_empty_view() {
        let session = ListingSession::new();
        assert!(session.is_loading());
        assert!(session.posts().is_empty());
        assert!(session.view().is_empty());
    }

    #[test]
    fn activation_issues_a_single_ticket() {
        let mut session = ListingSession::new();
        assert!(session.activate().is_some());
        assert!(session.activate().is_none());
    }

    #[test]
    fn load_replaces_raw_and_clears_loading() {
        let session = loaded();
        assert_eq!(*session.load_state(), LoadState::Ready);
        assert_eq!(&session.posts()[..], &posts()[..]);
        assert_eq!(session.view(), &posts()[..]);
        assert_eq!(session.authors(), vec![1, 2]);
    }

    #[test]
    fn late_completion_after_teardown_is_ignored() {
        let mut session = ListingSession::new();
        let ticket = session.activate().unwrap();
        session.teardown();

        assert!(session.is_torn_down());
        assert!(!session.update(Msg::LoadFinished(ticket, Ok(posts()))));
        assert!(session.is_loading());
        assert!(session.posts().is_empty());
        assert!(session.activate().is_none());
    }

    #[test]
    fn failure_enters_failed_state_and_allows_retry() {
        let mut session = ListingSession::new();
        assert!(!session.update(Msg::RetryRequested));
        assert!(session.take_pending_ticket().is_none());

        let first = session.activate().unwrap();
        session.update(Msg::LoadFinished(first, Err(LoadError::Status(500))));
        assert_eq!(
            *session.load_state(),
            LoadState::Failed(LoadError::Status(500))
        );

        assert!(session.update(Msg::RetryRequested));
        assert!(session.is_loading());
        let second = session.take_pending_ticket().unwrap();
        assert_ne!(first, second);
        assert!(session.take_pending_ticket().is_none());
        assert!(!session.update(Msg::RetryRequested));

        // the failed ticket can no longer land
        assert!(!session.update(Msg::LoadFinished(first, Ok(posts()))));
        assert!(session.update(Msg::LoadFinished(second, Ok(posts()))));
        assert_eq!(*session.load_state(), LoadState::Ready);
    }

    #[test]
    fn retry_after_teardown_issues_nothing() {
        let mut session = ListingSession::new();
        let ticket = session.activate().unwrap();
        session.update(Msg::LoadFinished(ticket, Err(LoadError::Network("offline".into()))));
        session.teardown();

        assert!(!session.update(Msg::RetryRequested));
        assert!(session.take_pending_ticket().is_none());
        assert!(matches!(session.load_state(), LoadState::Failed(_)));
    }

    #[test]
    fn unchanged_criteria_report_no_change() {
        let mut session = loaded();
        assert!(!session.update(Msg::SearchChanged(String::new())));
        assert!(!session.update(Msg::AuthorSelected(None)));
        assert!(!session.update(Msg::SortSelected(SortMode::None)));
        assert!(!session.refresh());
    }

    #[test]
    fn each_criterion_changes_only_itself() {
        let mut session = loaded();
        assert!(session.update(Msg::SearchChanged("al".into())));
        assert!(session.update(Msg::SortSelected(SortMode::TitleDesc)));
        assert!(session.update(Msg::AuthorSelected(Some(1))));

        assert_eq!(
            *session.criteria(),
            Criteria {
                search_query: "al".into(),
                author_filter: Some(1),
                sort_mode: SortMode::TitleDesc,
            }
        );
        let ids: Vec<u64> = session.view().iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
