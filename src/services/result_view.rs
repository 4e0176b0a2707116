//! The list currently shown to the user.

use crate::domain::notice::{NoticePage, NoticeSummary, PageInfo};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// What rendering should show for the current view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOutcome<'a> {
    Loading,
    /// The latest request failed; there is no data to show.
    Failed { message: &'a str },
    /// The latest request succeeded with an empty page.
    NoMatches,
    Rows(&'a [NoticeSummary]),
}

/// Most recently accepted page of notices.
///
/// An empty list with page info is a legitimate "nothing matched" result; an
/// empty list without page info means the request failed. While loading, the
/// previously accepted rows stay readable.
#[derive(Clone, Debug, Default)]
pub struct ResultView {
    items: Vec<NoticeSummary>,
    page_info: Option<PageInfo>,
    phase: ViewPhase,
    error: Option<String>,
}

impl ResultView {
    pub fn items(&self) -> &[NoticeSummary] {
        &self.items
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    /// Page info of the accepted page, or `None` while a newer query is
    /// loading and the accepted page no longer describes the current position.
    pub fn settled_page_info(&self) -> Option<&PageInfo> {
        match self.phase {
            ViewPhase::Loading => None,
            ViewPhase::Ready | ViewPhase::Failed => self.page_info.as_ref(),
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.phase == ViewPhase::Failed
    }

    pub fn outcome(&self) -> ListOutcome<'_> {
        match self.phase {
            ViewPhase::Loading => ListOutcome::Loading,
            ViewPhase::Failed => ListOutcome::Failed {
                message: self.error.as_deref().unwrap_or_default(),
            },
            ViewPhase::Ready if self.items.is_empty() => ListOutcome::NoMatches,
            ViewPhase::Ready => ListOutcome::Rows(&self.items),
        }
    }

    pub(crate) fn begin_loading(&mut self) {
        self.phase = ViewPhase::Loading;
    }

    pub(crate) fn populate(&mut self, page: NoticePage) {
        self.items = page.items;
        self.page_info = Some(page.page_info);
        self.phase = ViewPhase::Ready;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.items.clear();
        self.page_info = None;
        self.phase = ViewPhase::Failed;
        self.error = Some(message.into());
    }
}
