use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AttachmentId, MemberId, NoticeId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: MemberId,
    pub name: String,
}

/// Row of the notice list. Read-only projection of a notice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NoticeSummary {
    pub id: NoticeId,
    pub title: String,
    pub has_attachment: bool,
    pub created_at: NaiveDateTime,
    pub view_count: u64,
    pub author: Author,
}

/// Server-reported pagination metadata for one result page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Zero-based index of the returned page.
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

/// One page of notices as returned by the list endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticePage {
    pub items: Vec<NoticeSummary>,
    pub page_info: PageInfo,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: AttachmentId,
    pub filename: String,
    pub url: String,
    pub uploaded_at: Option<NaiveDateTime>,
}

/// Full notice as returned by the detail, create and update endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub content: String,
    pub start_at: Option<NaiveDateTime>,
    pub end_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub view_count: u64,
    pub author: Author,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// File selected for upload alongside a notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Validated content sent to the create and update endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticePayload {
    pub title: String,
    pub content: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub files: Vec<UploadFile>,
}
