//! `reqwest` implementation of the notice capabilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::domain::notice::{Notice, NoticePage, NoticePayload, UploadFile};
use crate::domain::query::NoticeListQuery;
use crate::domain::types::{MemberId, NoticeId};
use crate::dto::api::{ResponseEnvelope, decode_notice_page};
use crate::models::config::{ClientConfig, ConfigError};
use crate::repository::errors::{ApiError, ApiResult};
use crate::repository::{NoticeReader, NoticeWriter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const CREATE_FILES_FIELD: &str = "files";
const UPDATE_FILES_FIELD: &str = "newFiles";

/// One multipart field of a notice payload.
#[derive(Debug, PartialEq, Eq)]
enum PayloadField<'a> {
    Text(&'static str, String),
    File(&'static str, &'a UploadFile),
}

#[derive(Clone, Debug)]
pub struct HttpNoticeRepository {
    http: reqwest::Client,
    base_url: String,
    user_id: MemberId,
}

impl HttpNoticeRepository {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_id = config.user_id()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ConfigError::Invalid {
                key: "timeout_secs",
                reason: err.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/v1/notices", self.base_url)
    }

    fn item_url(&self, id: NoticeId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    /// Full list URL with the percent-encoded query string.
    pub fn list_url(&self, query: &NoticeListQuery) -> ApiResult<String> {
        let params = serde_html_form::to_string(query.query_pairs())?;
        Ok(format!("{}?{}", self.collection_url(), params))
    }

    fn identity(&self) -> [(&'static str, i64); 1] {
        [("userId", self.user_id.get())]
    }

    fn payload_fields<'a>(
        &self,
        payload: &'a NoticePayload,
        files_field: &'static str,
    ) -> Vec<PayloadField<'a>> {
        let mut fields = vec![
            PayloadField::Text("userId", self.user_id.to_string()),
            PayloadField::Text("title", payload.title.clone()),
            PayloadField::Text("content", payload.content.clone()),
            PayloadField::Text("startAt", payload.start_at.format(TIMESTAMP_FORMAT).to_string()),
            PayloadField::Text("endAt", payload.end_at.format(TIMESTAMP_FORMAT).to_string()),
        ];
        fields.extend(
            payload
                .files
                .iter()
                .map(|file| PayloadField::File(files_field, file)),
        );
        fields
    }

    fn payload_form(&self, payload: &NoticePayload, files_field: &'static str) -> Form {
        self.payload_fields(payload, files_field)
            .into_iter()
            .fold(Form::new(), |form, field| match field {
                PayloadField::Text(name, value) => form.text(name, value),
                PayloadField::File(name, file) => form.part(
                    name,
                    Part::bytes(file.bytes.clone()).file_name(file.filename.clone()),
                ),
            })
    }

    /// Fails on a non-success status, preferring the envelope's exception
    /// message over the raw body.
    async fn ensure_success(resp: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let exception = serde_json::from_str::<ResponseEnvelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.exception);

        Err(match exception {
            Some(exception) => ApiError::Server {
                status: status.as_u16(),
                code: Some(exception.code),
                message: exception.message,
            },
            None => ApiError::Server {
                status: status.as_u16(),
                code: None,
                message: body,
            },
        })
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let resp = Self::ensure_success(resp).await?;
        let body = resp.text().await?;
        let envelope: ResponseEnvelope<T> = serde_json::from_str(&body)?;
        envelope.into_data()
    }
}

#[async_trait(?Send)]
impl NoticeReader for HttpNoticeRepository {
    async fn list_notices(&self, query: &NoticeListQuery) -> ApiResult<NoticePage> {
        let url = self.list_url(query)?;
        log::debug!("GET {url}");
        let resp = Self::ensure_success(self.http.get(&url).send().await?).await?;
        decode_notice_page(&resp.text().await?)
    }

    async fn get_notice(&self, id: NoticeId) -> ApiResult<Notice> {
        let resp = self
            .http
            .get(self.item_url(id))
            .query(&self.identity())
            .send()
            .await?;
        Self::parse(resp).await
    }
}

#[async_trait(?Send)]
impl NoticeWriter for HttpNoticeRepository {
    async fn create_notice(&self, payload: &NoticePayload) -> ApiResult<Notice> {
        let resp = self
            .http
            .post(self.collection_url())
            .multipart(self.payload_form(payload, CREATE_FILES_FIELD))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn update_notice(&self, id: NoticeId, payload: &NoticePayload) -> ApiResult<Notice> {
        let resp = self
            .http
            .patch(self.item_url(id))
            .query(&self.identity())
            .multipart(self.payload_form(payload, UPDATE_FILES_FIELD))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn delete_notice(&self, id: NoticeId) -> ApiResult<()> {
        let resp = self
            .http
            .delete(self.item_url(id))
            .query(&self.identity())
            .send()
            .await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }
}
