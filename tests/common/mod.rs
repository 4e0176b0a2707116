use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::NaiveDate;

use notice_board::domain::notice::{Author, Notice, NoticePage, NoticeSummary, PageInfo};
use notice_board::domain::query::NoticeListQuery;
use notice_board::domain::types::{MemberId, NoticeId};
use notice_board::repository::NoticeReader;
use notice_board::repository::errors::{ApiError, ApiResult};

pub const TOTAL_PAGES: u32 = 5;

/// Reader that records every list query and answers with a synthetic page.
///
/// Each returned page holds one notice titled after the query keyword, so a
/// test can tell which query a rendered page came from.
#[derive(Default)]
pub struct RecordingReader {
    queries: RefCell<Vec<NoticeListQuery>>,
    fail_next: Cell<bool>,
    empty_next: Cell<bool>,
}

impl RecordingReader {
    pub fn queries(&self) -> Vec<NoticeListQuery> {
        self.queries.borrow().clone()
    }

    pub fn last_query(&self) -> NoticeListQuery {
        self.queries
            .borrow()
            .last()
            .cloned()
            .expect("no query recorded")
    }

    pub fn fail_next(&self) {
        self.fail_next.set(true);
    }

    pub fn empty_next(&self) {
        self.empty_next.set(true);
    }
}

pub fn page_for(query: &NoticeListQuery, empty: bool) -> NoticePage {
    let items = if empty {
        Vec::new()
    } else {
        vec![NoticeSummary {
            id: NoticeId::new(i64::from(query.position.page_number) + 1).unwrap(),
            title: format!("result for '{}'", query.criteria.keyword),
            has_attachment: false,
            created_at: NaiveDate::from_ymd_opt(2025, 3, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            view_count: 3,
            author: Author {
                id: MemberId::new(1).unwrap(),
                name: "admin".to_string(),
            },
        }]
    };
    let total_pages = if empty { 0 } else { TOTAL_PAGES };
    let page_number = query.position.page_number;

    NoticePage {
        page_info: PageInfo {
            page_number,
            page_size: query.position.page_size.get(),
            total_elements: items.len() as u64,
            total_pages,
            first: page_number == 0,
            last: total_pages == 0 || page_number + 1 >= total_pages,
        },
        items,
    }
}

#[async_trait(?Send)]
impl NoticeReader for RecordingReader {
    async fn list_notices(&self, query: &NoticeListQuery) -> ApiResult<NoticePage> {
        self.queries.borrow_mut().push(query.clone());
        if self.fail_next.replace(false) {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        Ok(page_for(query, self.empty_next.replace(false)))
    }

    async fn get_notice(&self, _id: NoticeId) -> ApiResult<Notice> {
        Err(ApiError::Malformed("notice"))
    }
}
