//! Wire envelope shared by every notice API response.
//!
//! ```json
//! { "status": "success", "data": { ... }, "exception": null }
//! { "status": "error", "data": null, "exception": { "code": "N0001", "message": "..." } }
//! ```

use serde::Deserialize;

use crate::domain::notice::{NoticePage, NoticeSummary, PageInfo};
use crate::repository::errors::{ApiError, ApiResult};

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Deserialize)]
pub struct ExceptionBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub status: String,
    pub data: Option<T>,
    pub exception: Option<ExceptionBody>,
}

impl<T> ResponseEnvelope<T> {
    /// Unwraps the payload of a successful envelope.
    pub fn into_data(self) -> ApiResult<T> {
        if self.status != STATUS_SUCCESS {
            let exception = self.exception.unwrap_or_else(|| ExceptionBody {
                code: self.status.clone(),
                message: "request failed".to_string(),
            });
            return Err(ApiError::Rejected {
                code: exception.code,
                message: exception.message,
            });
        }
        self.data.ok_or(ApiError::Malformed("data"))
    }
}

/// `data` payload of the list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeListBody {
    pub notice_list: Option<Vec<NoticeSummary>>,
    pub page_info: Option<PageInfo>,
}

impl TryFrom<NoticeListBody> for NoticePage {
    type Error = ApiError;

    fn try_from(body: NoticeListBody) -> Result<Self, Self::Error> {
        Ok(NoticePage {
            items: body.notice_list.ok_or(ApiError::Malformed("noticeList"))?,
            page_info: body.page_info.ok_or(ApiError::Malformed("pageInfo"))?,
        })
    }
}

/// Decodes a list response body into a page of notices.
pub fn decode_notice_page(body: &str) -> ApiResult<NoticePage> {
    let envelope: ResponseEnvelope<NoticeListBody> = serde_json::from_str(body)?;
    NoticePage::try_from(envelope.into_data()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BODY: &str = r#"{
        "status": "success",
        "data": {
            "noticeList": [
                {
                    "id": 123,
                    "title": "점검 안내",
                    "hasAttachment": true,
                    "createdAt": "2025-06-01T18:00:00",
                    "viewCount": 777,
                    "author": { "id": 1, "name": "테스트" }
                }
            ],
            "pageInfo": {
                "pageNumber": 0,
                "pageSize": 20,
                "totalElements": 1,
                "totalPages": 1,
                "first": true,
                "last": true
            }
        },
        "exception": null
    }"#;

    #[test]
    fn decodes_list_envelope() {
        let page = decode_notice_page(LIST_BODY).unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id.get(), 123);
        assert_eq!(page.items[0].author.name, "테스트");
        assert!(page.items[0].has_attachment);
        assert_eq!(page.page_info.total_pages, 1);
        assert!(page.page_info.first && page.page_info.last);
    }

    #[test]
    fn empty_list_with_page_info_is_a_valid_page() {
        let body = r#"{"status":"success","data":{"noticeList":[],
            "pageInfo":{"pageNumber":0,"totalPages":0,"first":true,"last":true}}}"#;

        let page = decode_notice_page(body).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.page_info.total_elements, 0);
    }

    #[test]
    fn missing_fields_are_malformed() {
        let no_page_info = r#"{"status":"success","data":{"noticeList":[]}}"#;
        let no_list = r#"{"status":"success","data":{"pageInfo":
            {"pageNumber":0,"totalPages":0,"first":true,"last":true}}}"#;
        let no_data = r#"{"status":"success","data":null}"#;

        assert!(matches!(
            decode_notice_page(no_page_info),
            Err(ApiError::Malformed("pageInfo"))
        ));
        assert!(matches!(
            decode_notice_page(no_list),
            Err(ApiError::Malformed("noticeList"))
        ));
        assert!(matches!(
            decode_notice_page(no_data),
            Err(ApiError::Malformed("data"))
        ));
    }

    #[test]
    fn error_envelope_is_rejected() {
        let body = r#"{"status":"error","data":null,
            "exception":{"code":"C0001","message":"잘못된 입력 값입니다."}}"#;

        match decode_notice_page(body) {
            Err(ApiError::Rejected { code, .. }) => assert_eq!(code, "C0001"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        assert!(matches!(
            decode_notice_page("<html>"),
            Err(ApiError::Decode(_))
        ));
    }
}
