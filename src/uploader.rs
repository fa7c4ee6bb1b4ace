use std::sync::Arc;

use crate::error::AppError;
use crate::normalize::normalize_name;
use crate::slack::{SlackApi, SlackError};

/// Runs the five-step external-URL upload workflow: request a staging slot,
/// transfer the bytes, finalize the file, publish it, register the emoji.
///
/// Steps after the first each mutate workspace state and there is no
/// rollback: a failure late in the sequence can leave a file uploaded but
/// never registered as an emoji.
#[derive(Clone)]
pub struct EmojiUploader {
    slack: Arc<dyn SlackApi>,
}

impl EmojiUploader {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }

    pub async fn upload(&self, name: &str, image: Vec<u8>) -> Result<(), AppError> {
        let name = normalize_name(name);
        let filename = format!("{name}.png");

        let dest = self
            .slack
            .file_upload_url(&filename, image.len())
            .await
            .map_err(|e| AppError::UploadUrl(e.to_string()))?;
        self.slack
            .put_file(&dest.upload_url, image)
            .await
            .map_err(|e| AppError::Transfer(e.to_string()))?;
        self.slack
            .complete_upload(&dest.file_id, &name)
            .await
            .map_err(|e| AppError::CompleteUpload(e.to_string()))?;
        let public_url = self
            .slack
            .share_public(&dest.file_id)
            .await
            .map_err(|e| AppError::Publicize(e.to_string()))?;
        self.slack
            .add_emoji(&name, &public_url)
            .await
            .map_err(map_registration_error)?;

        tracing::info!(name = %name, "registered custom emoji");
        Ok(())
    }
}

fn map_registration_error(err: SlackError) -> AppError {
    match err {
        SlackError::Api { code, .. } => match code.as_str() {
            "admin_not_found" => AppError::Permission(
                "emoji upload requires a token with admin write scope".to_string(),
            ),
            "error_name_taken" => {
                AppError::Conflict("an emoji with that name already exists".to_string())
            }
            "invalid_name" => AppError::Validation("invalid emoji name".to_string()),
            "invalid_img" => AppError::Validation("invalid emoji image".to_string()),
            _ => AppError::Upstream(format!("emoji registration failed: {code}")),
        },
        other => AppError::Upstream(other.to_string()),
    }
}
