use std::cell::{Ref, RefCell};
use std::num::NonZeroU32;

use crate::repository::NoticeReader;
use crate::services::orchestrator::{ListEvent, PendingQuery, QueryOrchestrator, Reconciliation};
use crate::services::result_view::ResultView;

/// Drives a [`QueryOrchestrator`] against a [`NoticeReader`].
///
/// Fetches may overlap: the orchestrator is only borrowed around the
/// synchronous steps, never across an `.await`, so several `fetch` futures can
/// be polled on the same thread and complete in any order. Callers must not
/// hold the guards returned by [`Self::state`] or [`Self::view`] across an
/// `.await` on this service.
pub struct NoticeListService<R> {
    reader: R,
    orchestrator: RefCell<QueryOrchestrator>,
}

impl<R> NoticeListService<R>
where
    R: NoticeReader,
{
    pub fn new(reader: R, page_size: NonZeroU32) -> Self {
        Self {
            reader,
            orchestrator: RefCell::new(QueryOrchestrator::new(page_size)),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn state(&self) -> Ref<'_, QueryOrchestrator> {
        self.orchestrator.borrow()
    }

    pub fn view(&self) -> Ref<'_, ResultView> {
        Ref::map(self.orchestrator.borrow(), QueryOrchestrator::view)
    }

    /// Applies `event` without fetching; see [`QueryOrchestrator::apply`].
    pub fn apply(&self, event: ListEvent) -> Option<PendingQuery> {
        self.orchestrator.borrow_mut().apply(event)
    }

    /// Runs the fetch for `pending` and reconciles its outcome.
    pub async fn fetch(&self, pending: PendingQuery) -> Reconciliation {
        let result = self.reader.list_notices(&pending.query).await;
        self.orchestrator
            .borrow_mut()
            .complete(pending.sequence, result)
    }

    /// Applies `event` and, when it issues a query, awaits the fetch.
    ///
    /// Returns `None` when the event did not call for a fetch.
    pub async fn handle(&self, event: ListEvent) -> Option<Reconciliation> {
        let pending = self.apply(event)?;
        Some(self.fetch(pending).await)
    }
}
