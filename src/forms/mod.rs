//! Form definitions backing the notice create and edit views.

use thiserror::Error;
use validator::ValidationErrors;

pub mod notice;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("start and end of the notice period are required")]
    MissingPeriod,
}
