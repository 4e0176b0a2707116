//! Data required to render the notice listing.

use serde::Serialize;

use crate::domain::notice::NoticeSummary;
use crate::domain::query::DATE_FORMAT;
use crate::pagination::page_window;
use crate::services::composition::CompositionState;
use crate::services::orchestrator::QueryOrchestrator;
use crate::services::result_view::ListOutcome;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A notice row with display-ready values.
#[derive(Debug, Serialize)]
pub struct NoticeRow {
    pub id: i64,
    pub title: String,
    pub has_attachment: bool,
    pub created_at: String,
    pub view_count: u64,
    pub author: String,
}

impl From<&NoticeSummary> for NoticeRow {
    fn from(notice: &NoticeSummary) -> Self {
        Self {
            id: notice.id.get(),
            title: notice.title.clone(),
            has_attachment: notice.has_attachment,
            created_at: notice.created_at.format(CREATED_AT_FORMAT).to_string(),
            view_count: notice.view_count,
            author: notice.author.name.clone(),
        }
    }
}

/// Pager shown below the rows. Page numbers are one-based for display.
#[derive(Debug, Serialize)]
pub struct PagerData {
    pub current: u32,
    pub total: u32,
    pub has_previous: bool,
    pub has_next: bool,
    /// Page strip entries: `"3"`, `"[4]"` for the current page, `"…"`.
    pub window: Vec<String>,
}

/// Everything the list template needs.
#[derive(Debug, Serialize)]
pub struct ListPageData {
    pub keyword: String,
    pub draft_keyword: String,
    pub title_only: bool,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub sort: String,
    pub composing: bool,
    /// One of `loading`, `failed`, `empty` or `rows`.
    pub status: &'static str,
    pub error: Option<String>,
    pub rows: Vec<NoticeRow>,
    pub pager: Option<PagerData>,
}

impl From<&QueryOrchestrator> for ListPageData {
    fn from(state: &QueryOrchestrator) -> Self {
        let criteria = state.criteria();
        let view = state.view();

        let (status, error, rows) = match view.outcome() {
            ListOutcome::Loading => ("loading", None, Vec::new()),
            ListOutcome::Failed { message } => ("failed", Some(message.to_string()), Vec::new()),
            ListOutcome::NoMatches => ("empty", None, Vec::new()),
            ListOutcome::Rows(items) => ("rows", None, items.iter().map(NoticeRow::from).collect()),
        };

        let pager = view.page_info().map(|info| PagerData {
            current: info.page_number.saturating_add(1),
            total: info.total_pages,
            has_previous: !info.first,
            has_next: !info.last,
            window: page_window(info.total_pages, info.page_number)
                .into_iter()
                .map(|page| match page {
                    Some(page) if page == info.page_number => {
                        format!("[{}]", page.saturating_add(1))
                    }
                    Some(page) => page.saturating_add(1).to_string(),
                    None => "…".to_string(),
                })
                .collect(),
        });

        Self {
            keyword: criteria.keyword.clone(),
            draft_keyword: state.draft_keyword().to_string(),
            title_only: criteria.title_only,
            from_date: criteria.from_date.map(|d| d.format(DATE_FORMAT).to_string()),
            to_date: criteria.to_date.map(|d| d.format(DATE_FORMAT).to_string()),
            sort: state.sort().to_string(),
            composing: state.composition() == CompositionState::Composing,
            status,
            error,
            rows,
            pager,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notice::{NoticePage, PageInfo};
    use crate::services::orchestrator::ListEvent;

    fn accepted(page_info: PageInfo) -> QueryOrchestrator {
        let mut state = QueryOrchestrator::default();
        let pending = state.apply(ListEvent::Mounted).unwrap();
        state.complete(
            pending.sequence,
            Ok(NoticePage {
                items: vec![],
                page_info,
            }),
        );
        state
    }

    #[test]
    fn pager_is_one_based_and_marks_current() {
        let data = ListPageData::from(&accepted(PageInfo {
            page_number: 1,
            page_size: 20,
            total_elements: 60,
            total_pages: 3,
            first: false,
            last: false,
        }));

        let pager = data.pager.unwrap();
        assert_eq!(pager.current, 2);
        assert_eq!(pager.window, vec!["1", "[2]", "3"]);
        assert!(pager.has_previous && pager.has_next);
        assert_eq!(data.status, "empty");
    }

    #[test]
    fn pager_survives_extreme_page_numbers() {
        let data = ListPageData::from(&accepted(PageInfo {
            page_number: u32::MAX,
            page_size: 20,
            total_elements: 0,
            total_pages: u32::MAX,
            first: false,
            last: true,
        }));

        let pager = data.pager.unwrap();
        assert_eq!(pager.current, u32::MAX);
        assert_eq!(pager.window.last().map(String::as_str), Some("4294967295"));
    }
}
