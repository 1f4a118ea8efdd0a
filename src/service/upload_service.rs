use rand::Rng;

use crate::errors::AppError;
use crate::latency::Latency;
use crate::models::{CsvUploadRequest, TextUploadRequest, UploadReceipt};

const MAX_CSV_BYTES: u64 = 10 * 1024 * 1024;

/// Simulates the ingestion backend. Validation fails fast, before the
/// simulated transfer time elapses; an otherwise valid upload then settles as
/// success or failure according to the configured failure rate. Nothing is
/// persisted and uploads are not linked to chat state.
#[derive(Clone)]
pub struct UploadService {
    latency: Latency,
    /// Probability in `[0, 1]` that a valid upload fails after its transfer
    /// delay. Tests pin this to 0.0 or 1.0 to force each outcome.
    failure_rate: f64,
}

impl UploadService {
    pub fn new(latency: Latency, failure_rate: f64) -> Self {
        Self { latency, failure_rate: failure_rate.clamp(0.0, 1.0) }
    }

    pub async fn upload_csv(&self, request: CsvUploadRequest) -> Result<UploadReceipt, AppError> {
        if !is_csv(&request.file_name, request.content_type.as_deref()) {
            return Err(AppError::UnsupportedFileType { file_name: request.file_name });
        }
        if request.size_bytes > MAX_CSV_BYTES {
            return Err(AppError::FileTooLarge {
                file_name: request.file_name,
                max_bytes: MAX_CSV_BYTES,
                actual_bytes: request.size_bytes,
            });
        }

        self.latency.wait(self.latency.csv_upload).await;
        self.settle()?;

        Ok(UploadReceipt {
            message: format!("Successfully uploaded and processed {}", request.file_name),
        })
    }

    pub async fn upload_text(&self, request: TextUploadRequest) -> Result<UploadReceipt, AppError> {
        if request.text.trim().is_empty() {
            return Err(AppError::empty_field("text"));
        }

        self.latency.wait(self.latency.text_upload).await;
        self.settle()?;

        Ok(UploadReceipt {
            message: format!(
                "Successfully processed {} characters of text",
                request.text.chars().count()
            ),
        })
    }

    /// Rolls the configured failure rate once the transfer delay has elapsed.
    fn settle(&self) -> Result<(), AppError> {
        if self.failure_rate > 0.0 && rand::rng().random_bool(self.failure_rate) {
            return Err(AppError::UploadFailed {
                message: "transient failure while processing the upload".to_string(),
            });
        }
        Ok(())
    }
}

/// The client accepts a file when either the name or the declared content
/// type marks it as CSV.
fn is_csv(file_name: &str, content_type: Option<&str>) -> bool {
    file_name.to_lowercase().ends_with(".csv") || content_type == Some("text/csv")
}

#[cfg(test)]
#[path = "upload_service_test.rs"]
mod tests;
