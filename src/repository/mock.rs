//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::notice::{Notice, NoticePage, NoticePayload};
use crate::domain::query::NoticeListQuery;
use crate::domain::types::NoticeId;
use crate::repository::errors::ApiResult;
use crate::repository::{NoticeReader, NoticeWriter};

mock! {
    pub NoticeRepository {}

    #[async_trait(?Send)]
    impl NoticeReader for NoticeRepository {
        async fn list_notices(&self, query: &NoticeListQuery) -> ApiResult<NoticePage>;
        async fn get_notice(&self, id: NoticeId) -> ApiResult<Notice>;
    }

    #[async_trait(?Send)]
    impl NoticeWriter for NoticeRepository {
        async fn create_notice(&self, payload: &NoticePayload) -> ApiResult<Notice>;
        async fn update_notice(&self, id: NoticeId, payload: &NoticePayload) -> ApiResult<Notice>;
        async fn delete_notice(&self, id: NoticeId) -> ApiResult<()>;
    }
}
