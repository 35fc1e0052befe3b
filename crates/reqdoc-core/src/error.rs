use crate::model::NfrCategory;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid project payload: {field} {message}")]
    InvalidPayload { field: String, message: String },

    #[error("Duplicate id in {collection}: {id}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("More than one non-functional requirement for category: {category}")]
    DuplicateCategory { category: NfrCategory },

    #[error("Project JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            field: field.into(),
            message: message.into(),
        }
    }
}
