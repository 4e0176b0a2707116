//! Decides when the notice list is fetched and which response is shown.
//!
//! The orchestrator is free of I/O: [`QueryOrchestrator::apply`] turns a user
//! event into at most one [`PendingQuery`], and
//! [`QueryOrchestrator::complete`] reconciles the outcome of a fetch. Only the
//! response to the most recently issued query may reach the result view.

use std::num::NonZeroU32;

use chrono::NaiveDate;

use crate::domain::criteria::{SearchCriteria, SortField, SortSpec};
use crate::domain::notice::NoticePage;
use crate::domain::query::NoticeListQuery;
use crate::pagination::{PagePosition, PaginationStore};
use crate::repository::errors::ApiResult;
use crate::services::composition::{CompositionGuard, CompositionState};
use crate::services::criteria::CriteriaStore;
use crate::services::result_view::ResultView;

/// Discrete user or page-lifecycle event on the listing page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent {
    Mounted,
    /// Re-issues the current query, e.g. after a failure.
    Refresh,
    CompositionStarted,
    CompositionEnded,
    KeywordEdited(String),
    SearchSubmitted,
    TitleOnlyChanged(bool),
    DateRangeChanged {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    SortClicked(SortField),
    SortSelected(SortSpec),
    PageRequested(u32),
    NextPage,
    PreviousPage,
}

/// How an event relates to fetching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Updates input state only.
    Local,
    /// Explicit keyword submission, held back while composing.
    Guarded,
    /// Fetches whenever the event changes state. `resets_page` marks events
    /// that alter the result set, so the old page position is meaningless.
    Automatic { resets_page: bool },
}

impl ListEvent {
    /// The trigger table of the listing page.
    pub fn trigger(&self) -> Trigger {
        match self {
            ListEvent::CompositionStarted
            | ListEvent::CompositionEnded
            | ListEvent::KeywordEdited(_) => Trigger::Local,
            ListEvent::SearchSubmitted => Trigger::Guarded,
            ListEvent::TitleOnlyChanged(_)
            | ListEvent::DateRangeChanged { .. }
            | ListEvent::SortClicked(_)
            | ListEvent::SortSelected(_) => Trigger::Automatic { resets_page: true },
            ListEvent::Mounted
            | ListEvent::Refresh
            | ListEvent::PageRequested(_)
            | ListEvent::NextPage
            | ListEvent::PreviousPage => Trigger::Automatic { resets_page: false },
        }
    }
}

/// A query that has been issued and awaits its response.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingQuery {
    pub sequence: u64,
    pub query: NoticeListQuery,
}

/// What became of a completed fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// The page was written into the result view.
    Accepted,
    /// The result view moved to its failed state.
    Failed,
    /// A newer query had been issued; the response was dropped.
    Stale,
}

#[derive(Debug)]
pub struct QueryOrchestrator {
    criteria: CriteriaStore,
    pagination: PaginationStore,
    composition: CompositionGuard,
    view: ResultView,
    latest_sequence: u64,
}

impl Default for QueryOrchestrator {
    fn default() -> Self {
        Self::new(crate::pagination::DEFAULT_ITEMS_PER_PAGE)
    }
}

impl QueryOrchestrator {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            criteria: CriteriaStore::default(),
            pagination: PaginationStore::new(page_size),
            composition: CompositionGuard::default(),
            view: ResultView::default(),
            latest_sequence: 0,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        self.criteria.criteria()
    }

    pub fn draft_keyword(&self) -> &str {
        self.criteria.draft_keyword()
    }

    pub fn sort(&self) -> SortSpec {
        self.criteria.sort()
    }

    pub fn position(&self) -> PagePosition {
        self.pagination.position()
    }

    pub fn composition(&self) -> CompositionState {
        self.composition.state()
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Sequence number of the most recently issued query, 0 before the first.
    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    /// Applies `event` to the stores and issues a query when it calls for one.
    pub fn apply(&mut self, event: ListEvent) -> Option<PendingQuery> {
        let trigger = event.trigger();

        if trigger == Trigger::Guarded && !self.composition.permits_keyword_submit() {
            log::debug!("Ignoring search submission while composing");
            return None;
        }

        if !self.mutate(event) {
            return None;
        }

        if matches!(
            trigger,
            Trigger::Guarded | Trigger::Automatic { resets_page: true }
        ) {
            self.pagination.reset_to_first_page();
        }

        Some(self.issue())
    }

    /// Reconciles the outcome of the fetch tagged with `sequence`.
    pub fn complete(&mut self, sequence: u64, result: ApiResult<NoticePage>) -> Reconciliation {
        if sequence != self.latest_sequence {
            log::debug!(
                "Dropping stale response #{sequence}, latest is #{}",
                self.latest_sequence
            );
            return Reconciliation::Stale;
        }

        match result {
            Ok(page) => {
                self.view.populate(page);
                Reconciliation::Accepted
            }
            Err(err) => {
                log::error!("Failed to load notices: {err}");
                self.view.fail(err.to_string());
                Reconciliation::Failed
            }
        }
    }

    /// Returns whether the event changed state that a query depends on.
    fn mutate(&mut self, event: ListEvent) -> bool {
        match event {
            ListEvent::Mounted | ListEvent::Refresh => true,
            ListEvent::CompositionStarted => {
                self.composition.start();
                false
            }
            ListEvent::CompositionEnded => {
                self.composition.end();
                false
            }
            ListEvent::KeywordEdited(text) => {
                self.criteria.set_draft_keyword(text);
                false
            }
            ListEvent::SearchSubmitted => {
                // A repeated search re-fetches even when the keyword is unchanged.
                self.criteria.commit_draft();
                true
            }
            ListEvent::TitleOnlyChanged(title_only) => self.criteria.set_title_only(title_only),
            ListEvent::DateRangeChanged { from, to } => self.criteria.set_date_range(from, to),
            ListEvent::SortClicked(field) => {
                self.criteria.set_sort(field);
                true
            }
            ListEvent::SortSelected(sort) => self.criteria.select_sort(sort),
            ListEvent::PageRequested(page_number) => self.pagination.go_to_page(page_number),
            ListEvent::NextPage => self.pagination.next(self.view.settled_page_info()),
            ListEvent::PreviousPage => self.pagination.previous(self.view.settled_page_info()),
        }
    }

    fn issue(&mut self) -> PendingQuery {
        self.latest_sequence += 1;
        let query = NoticeListQuery::new(
            self.criteria.criteria().clone(),
            self.criteria.sort(),
            self.pagination.position(),
        );
        self.view.begin_loading();
        log::info!("Issuing notice query #{}: {query}", self.latest_sequence);
        PendingQuery {
            sequence: self.latest_sequence,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::criteria::SortDirection;
    use crate::domain::notice::PageInfo;
    use crate::repository::errors::ApiError;
    use crate::services::result_view::ListOutcome;

    fn page(page_number: u32, total_pages: u32) -> NoticePage {
        NoticePage {
            items: vec![],
            page_info: PageInfo {
                page_number,
                page_size: 20,
                total_elements: u64::from(total_pages) * 20,
                total_pages,
                first: page_number == 0,
                last: page_number + 1 >= total_pages,
            },
        }
    }

    fn mounted() -> QueryOrchestrator {
        let mut orchestrator = QueryOrchestrator::default();
        let pending = orchestrator.apply(ListEvent::Mounted).unwrap();
        orchestrator.complete(pending.sequence, Ok(page(0, 5)));
        orchestrator
    }

    #[test]
    fn mount_issues_default_query() {
        let mut orchestrator = QueryOrchestrator::default();

        let pending = orchestrator.apply(ListEvent::Mounted).unwrap();

        assert_eq!(pending.sequence, 1);
        assert_eq!(
            pending.query.to_string(),
            "keyword=&titleOnly=false&page=0&size=20&sort=createdAt,desc"
        );
        assert!(orchestrator.view().is_loading());
    }

    #[test]
    fn criteria_and_sort_changes_reset_page() {
        let events = [
            ListEvent::SearchSubmitted,
            ListEvent::TitleOnlyChanged(true),
            ListEvent::DateRangeChanged {
                from: NaiveDate::from_ymd_opt(2024, 1, 1),
                to: None,
            },
            ListEvent::SortClicked(SortField::ViewCount),
            ListEvent::SortSelected(SortSpec::new(SortField::Title, SortDirection::Asc)),
        ];

        let mut orchestrator = mounted();
        for event in events {
            let pending = orchestrator.apply(ListEvent::PageRequested(3)).unwrap();
            orchestrator.complete(pending.sequence, Ok(page(3, 5)));

            let pending = orchestrator.apply(event.clone()).unwrap();

            assert_eq!(pending.query.position.page_number, 0, "{event:?}");
            assert_eq!(orchestrator.position().page_number, 0);
        }
    }

    #[test]
    fn unchanged_values_do_not_fetch() {
        let mut orchestrator = mounted();

        assert!(orchestrator.apply(ListEvent::TitleOnlyChanged(false)).is_none());
        assert!(orchestrator.apply(ListEvent::PageRequested(0)).is_none());
        assert!(orchestrator
            .apply(ListEvent::SortSelected(SortSpec::default()))
            .is_none());
        assert!(orchestrator
            .apply(ListEvent::DateRangeChanged { from: None, to: None })
            .is_none());
        assert_eq!(orchestrator.latest_sequence(), 1);
    }

    #[test]
    fn keyword_edits_never_fetch() {
        let mut orchestrator = mounted();

        assert!(orchestrator
            .apply(ListEvent::KeywordEdited("점검".to_string()))
            .is_none());

        assert_eq!(orchestrator.draft_keyword(), "점검");
        assert_eq!(orchestrator.criteria().keyword, "");
    }

    #[test]
    fn submission_is_ignored_while_composing() {
        let mut orchestrator = mounted();
        orchestrator.apply(ListEvent::CompositionStarted);
        orchestrator.apply(ListEvent::KeywordEdited("공".to_string()));

        assert!(orchestrator.apply(ListEvent::SearchSubmitted).is_none());
        assert_eq!(orchestrator.composition(), CompositionState::Composing);

        orchestrator.apply(ListEvent::KeywordEdited("공지".to_string()));
        orchestrator.apply(ListEvent::CompositionEnded);
        let pending = orchestrator.apply(ListEvent::SearchSubmitted).unwrap();

        assert_eq!(pending.query.criteria.keyword, "공지");
    }

    #[test]
    fn non_keyword_triggers_pass_during_composition() {
        let mut orchestrator = mounted();
        orchestrator.apply(ListEvent::CompositionStarted);
        orchestrator.apply(ListEvent::KeywordEdited("공".to_string()));

        let pending = orchestrator
            .apply(ListEvent::SortClicked(SortField::Title))
            .unwrap();

        // The uncommitted fragment stays out of the query.
        assert_eq!(pending.query.criteria.keyword, "");
        assert_eq!(pending.query.sort.to_string(), "title,desc");
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut orchestrator = mounted();
        let first = orchestrator.apply(ListEvent::PageRequested(1)).unwrap();
        let second = orchestrator.apply(ListEvent::PageRequested(2)).unwrap();

        assert_eq!(
            orchestrator.complete(second.sequence, Ok(page(2, 5))),
            Reconciliation::Accepted
        );
        assert_eq!(
            orchestrator.complete(first.sequence, Ok(page(1, 5))),
            Reconciliation::Stale
        );
        assert_eq!(orchestrator.view().page_info().unwrap().page_number, 2);
    }

    #[test]
    fn stale_failures_are_dropped() {
        let mut orchestrator = mounted();
        let first = orchestrator.apply(ListEvent::PageRequested(1)).unwrap();
        let second = orchestrator.apply(ListEvent::PageRequested(2)).unwrap();
        orchestrator.complete(second.sequence, Ok(page(2, 5)));

        let outcome = orchestrator.complete(
            first.sequence,
            Err(ApiError::Network("connection reset".to_string())),
        );

        assert_eq!(outcome, Reconciliation::Stale);
        assert!(!orchestrator.view().is_failed());
    }

    #[test]
    fn current_failure_clears_the_view() {
        let mut orchestrator = mounted();
        let pending = orchestrator.apply(ListEvent::NextPage).unwrap();

        let outcome = orchestrator.complete(pending.sequence, Err(ApiError::Malformed("pageInfo")));

        assert_eq!(outcome, Reconciliation::Failed);
        assert!(matches!(
            orchestrator.view().outcome(),
            ListOutcome::Failed { .. }
        ));
        assert!(orchestrator.view().page_info().is_none());
    }

    #[test]
    fn page_navigation_follows_page_info() {
        let mut orchestrator = mounted();
        assert!(orchestrator.apply(ListEvent::PreviousPage).is_none());

        let pending = orchestrator.apply(ListEvent::NextPage).unwrap();
        assert_eq!(pending.query.position.page_number, 1);
        orchestrator.complete(pending.sequence, Ok(page(1, 2)));

        assert!(orchestrator.apply(ListEvent::NextPage).is_none());
        let pending = orchestrator.apply(ListEvent::PreviousPage).unwrap();
        assert_eq!(pending.query.position.page_number, 0);
    }

    #[test]
    fn next_page_waits_for_the_requested_page() {
        let mut orchestrator = mounted();
        let last = orchestrator.apply(ListEvent::PageRequested(4)).unwrap();

        assert!(orchestrator.apply(ListEvent::NextPage).is_none());
        assert_eq!(orchestrator.position().page_number, 4);

        orchestrator.complete(last.sequence, Ok(page(4, 5)));
        assert!(orchestrator.apply(ListEvent::NextPage).is_none());
    }

    #[test]
    fn previous_page_is_not_refused_by_an_older_first_page() {
        let mut orchestrator = mounted();
        orchestrator.apply(ListEvent::PageRequested(3)).unwrap();

        let pending = orchestrator.apply(ListEvent::PreviousPage).unwrap();

        assert_eq!(pending.query.position.page_number, 2);
    }

    #[test]
    fn next_page_after_criteria_change_waits_for_new_results() {
        let mut orchestrator = mounted();
        let pending = orchestrator.apply(ListEvent::TitleOnlyChanged(true)).unwrap();

        assert!(orchestrator.apply(ListEvent::NextPage).is_none());

        orchestrator.complete(pending.sequence, Ok(page(0, 1)));
        assert!(orchestrator.apply(ListEvent::NextPage).is_none());
    }

    #[test]
    fn sequence_numbers_increase_monotonically() {
        let mut orchestrator = QueryOrchestrator::default();
        let sequences: Vec<_> = [
            ListEvent::Mounted,
            ListEvent::Refresh,
            ListEvent::SortClicked(SortField::CreatedAt),
        ]
        .into_iter()
        .filter_map(|event| orchestrator.apply(event))
        .map(|pending| pending.sequence)
        .collect();

        assert_eq!(sequences, vec![1, 2, 3]);
    }
}
