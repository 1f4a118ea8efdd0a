use thiserror::Error;

/// Top-level application error. All variants carry a human-readable message
/// for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Conversation errors ──────────────────────────────────────────────────
    #[error("Conversation '{id}' not found")]
    ConversationNotFound { id: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── Upload errors ────────────────────────────────────────────────────────
    #[error("Unsupported file type for '{file_name}': only CSV files are accepted")]
    UnsupportedFileType { file_name: String },

    #[error("File '{file_name}' exceeds max size of {max_bytes} bytes (actual: {actual_bytes})")]
    FileTooLarge { file_name: String, max_bytes: u64, actual_bytes: u64 },

    #[error("Upload failed: {message}")]
    UploadFailed { message: String },
}

impl AppError {
    pub fn empty_field(field_name: impl Into<String>) -> Self {
        AppError::EmptyField { field_name: field_name.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ConversationNotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyField { .. } | AppError::FieldTooLong { .. })
    }

    pub fn is_upload_error(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedFileType { .. }
                | AppError::FileTooLarge { .. }
                | AppError::UploadFailed { .. }
        )
    }
}
