//! Capabilities the listing page consumes from the notice API.
//!
//! The traits are `?Send`: the listing page runs on a single thread and its
//! fetches only interleave, they never run in parallel.

use async_trait::async_trait;

use crate::domain::notice::{Notice, NoticePage, NoticePayload};
use crate::domain::query::NoticeListQuery;
use crate::domain::types::NoticeId;
use crate::repository::errors::ApiResult;

pub mod errors;
#[cfg(feature = "client")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[cfg(feature = "client")]
pub use http::HttpNoticeRepository;

#[async_trait(?Send)]
pub trait NoticeReader {
    /// Fetches one page of notice summaries matching `query`.
    async fn list_notices(&self, query: &NoticeListQuery) -> ApiResult<NoticePage>;
    async fn get_notice(&self, id: NoticeId) -> ApiResult<Notice>;
}

#[async_trait(?Send)]
pub trait NoticeWriter {
    async fn create_notice(&self, payload: &NoticePayload) -> ApiResult<Notice>;
    async fn update_notice(&self, id: NoticeId, payload: &NoticePayload) -> ApiResult<Notice>;
    async fn delete_notice(&self, id: NoticeId) -> ApiResult<()>;
}
