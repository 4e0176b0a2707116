use chrono::NaiveDateTime;
use validator::{Validate, ValidationError};

use crate::domain::notice::{Notice, NoticePayload, UploadFile};
use crate::forms::FormError;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, Validate)]
/// Form data for creating or editing a notice.
pub struct NoticeForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[validate(required)]
    pub start_at: Option<NaiveDateTime>,
    #[validate(required)]
    pub end_at: Option<NaiveDateTime>,
    pub files: Vec<UploadFile>,
}

impl NoticeForm {
    /// Prefills the edit form from an existing notice. Attachments are not
    /// re-uploaded, so `files` starts empty.
    pub fn from_notice(notice: &Notice) -> Self {
        Self {
            title: notice.title.clone(),
            content: notice.content.clone(),
            start_at: notice.start_at,
            end_at: notice.end_at,
            files: Vec::new(),
        }
    }
}

impl TryFrom<NoticeForm> for NoticePayload {
    type Error = FormError;

    fn try_from(form: NoticeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let (Some(start_at), Some(end_at)) = (form.start_at, form.end_at) else {
            return Err(FormError::MissingPeriod);
        };

        Ok(Self {
            title: form.title.trim().to_string(),
            content: ammonia::clean(form.content.trim()),
            start_at,
            end_at,
            files: form.files,
        })
    }
}
