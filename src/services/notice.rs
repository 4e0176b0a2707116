//! Services backing the notice create and edit views.

use thiserror::Error;

use crate::domain::notice::{Notice, NoticePayload};
use crate::domain::types::NoticeId;
use crate::forms::FormError;
use crate::forms::notice::NoticeForm;
use crate::repository::errors::ApiError;
use crate::repository::{NoticeReader, NoticeWriter};

#[derive(Debug, Error)]
pub enum NoticeServiceError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type NoticeServiceResult<T> = Result<T, NoticeServiceError>;

/// Validates the form and creates the notice.
pub async fn create_notice<R>(repo: &R, form: NoticeForm) -> NoticeServiceResult<Notice>
where
    R: NoticeWriter + ?Sized,
{
    let payload = NoticePayload::try_from(form)?;

    let notice = repo.create_notice(&payload).await?;
    log::info!("Created notice {}", notice.id);

    Ok(notice)
}

/// Loads an existing notice into a prefilled edit form.
pub async fn load_edit_form<R>(repo: &R, id: NoticeId) -> NoticeServiceResult<NoticeForm>
where
    R: NoticeReader + ?Sized,
{
    let notice = repo.get_notice(id).await?;
    Ok(NoticeForm::from_notice(&notice))
}

/// Validates the edited form and updates the notice.
pub async fn update_notice<R>(
    repo: &R,
    id: NoticeId,
    form: NoticeForm,
) -> NoticeServiceResult<Notice>
where
    R: NoticeWriter + ?Sized,
{
    let payload = NoticePayload::try_from(form)?;

    let notice = repo.update_notice(id, &payload).await?;
    log::info!("Updated notice {id}");

    Ok(notice)
}
